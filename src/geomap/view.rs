//! Terminal-independent description of one rendered map frame.
//!
//! All positions and sizes are in design-frame pixels (see
//! [`MercatorProjection::DESIGN`](crate::map::MercatorProjection::DESIGN)).

use glam::DVec2;

use super::color::Rgb;
use super::events::EventId;

/// A heat zone ready to draw
#[derive(Clone, Debug, PartialEq)]
pub struct HeatZoneView {
    pub label: &'static str,
    pub center: DVec2,
    pub radius: f64,
    pub color: Rgb,
    /// Already scaled: `intensity * HEAT_OPACITY_SCALE`
    pub opacity: f64,
}

/// The dashed 33°N line
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceLine {
    pub from: DVec2,
    pub to: DVec2,
    pub color: Rgb,
    pub opacity: f64,
    /// (dash, gap) lengths
    pub dash: (f64, f64),
}

/// Two-layer event marker: outer ring plus inner dot
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerView {
    pub id: EventId,
    pub name: &'static str,
    pub center: DVec2,
    pub color: Rgb,
    pub selected: bool,
    pub ring_radius: f64,
    pub ring_width: f64,
    pub ring_opacity: f64,
    pub dot_radius: f64,
    pub dot_opacity: f64,
}

/// Content of the detail panel for the selected event
#[derive(Clone, Debug, PartialEq)]
pub struct DetailPanel {
    pub id: EventId,
    pub category: &'static str,
    pub year: &'static str,
    pub coords: String,
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Category color, used for the panel border and kicker line
    pub accent: Rgb,
}

impl DetailPanel {
    /// `category · year · coords` line shown above the name
    pub fn kicker(&self) -> String {
        format!("{} · {} · {}", self.category.to_uppercase(), self.year, self.coords)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendSwatch {
    Dot,
    DashedLine,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Rgb,
    pub swatch: LegendSwatch,
}

/// Everything the caller needs to draw one frame
#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    pub phase: i64,
    /// Resolved phase accent color
    pub accent: Rgb,
    /// `33° Parallel Events · <phase label>`
    pub header: String,
    /// Phase label for the corner caption, `None` outside 0..=3
    pub caption: Option<&'static str>,
    pub heat_zones: Vec<HeatZoneView>,
    pub reference_line: ReferenceLine,
    pub markers: Vec<MarkerView>,
    pub detail: Option<DetailPanel>,
    pub legend: Vec<LegendEntry>,
}

impl MapView {
    /// Nearest marker whose outer ring (grown by `tolerance`) contains
    /// `point`. Ties go to the lower id.
    pub fn marker_at(&self, point: DVec2, tolerance: f64) -> Option<EventId> {
        self.markers
            .iter()
            .map(|m| (m, m.center.distance(point)))
            .filter(|(m, d)| *d <= m.ring_radius + tolerance)
            .min_by(|(a, da), (b, db)| da.total_cmp(db).then(a.id.cmp(&b.id)))
            .map(|(m, _)| m.id)
    }

    pub fn marker(&self, id: EventId) -> Option<&MarkerView> {
        self.markers.iter().find(|m| m.id == id)
    }
}
