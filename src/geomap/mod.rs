//! The map component: static event and heat-zone tables, the selection
//! slot, and a pure `render` that turns `(phase, accent, selection)` into a
//! [`MapView`].

mod color;
mod events;
mod view;
mod zones;

use tracing::debug;

use crate::map::MercatorProjection;

pub use color::Rgb;
pub use events::{format_coords, Category, EventId, GeoEvent, DEFAULT_MARKER_COLOR, EVENTS};
pub use view::{
    DetailPanel, HeatZoneView, LegendEntry, LegendSwatch, MapView, MarkerView, ReferenceLine,
};
pub use zones::{phase_label, zones_for_phase, HeatZone, HEAT_OPACITY_SCALE, PHASE_COUNT};

/// Accent used when the caller supplies no (or an unparseable) phase color
pub const DEFAULT_ACCENT: Rgb = Rgb::hex(0x3b82f6);

/// Latitude of the reference line
pub const REFERENCE_LATITUDE: f64 = 33.0;

const REFERENCE_COLOR: Rgb = Rgb::hex(0x3b82f6);

/// Marker geometry: (ring radius, ring width, ring opacity, dot radius)
const MARKER_IDLE: (f64, f64, f64, f64) = (10.0, 0.8, 0.3, 4.5);
const MARKER_SELECTED: (f64, f64, f64, f64) = (14.0, 1.5, 0.6, 7.0);
const DOT_OPACITY: f64 = 0.95;

/// At most one selected event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection(Option<EventId>);

impl Selection {
    pub fn get(self) -> Option<EventId> {
        self.0
    }

    pub fn is_selected(self, id: EventId) -> bool {
        self.0 == Some(id)
    }
}

/// Map component instance. Owns the event table it shows and the selection.
pub struct GeoMap {
    events: &'static [GeoEvent],
    projection: MercatorProjection,
    selection: Selection,
}

impl GeoMap {
    /// Component over the built-in nine events
    pub fn new() -> Self {
        Self::with_events(&EVENTS)
    }

    pub fn with_events(events: &'static [GeoEvent]) -> Self {
        Self {
            events,
            projection: MercatorProjection::DESIGN,
            selection: Selection::default(),
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_event(&self) -> Option<&'static GeoEvent> {
        let id = self.selection.get()?;
        self.events.iter().find(|e| e.id == id)
    }

    /// Marker activation: selects `id`, or clears the selection when `id` is
    /// already selected. Unknown ids are ignored. Returns whether the
    /// selection changed.
    pub fn activate(&mut self, id: EventId) -> bool {
        if !self.events.iter().any(|e| e.id == id) {
            debug!(id, "ignoring activation of unknown event");
            return false;
        }
        self.selection = if self.selection.is_selected(id) {
            Selection(None)
        } else {
            Selection(Some(id))
        };
        debug!(selected = ?self.selection.get(), "selection changed");
        true
    }

    /// Dismiss the detail panel
    pub fn clear(&mut self) {
        if self.selection.get().is_some() {
            debug!("selection cleared");
        }
        self.selection = Selection(None);
    }

    /// Select the next (`forward`) or previous event in table order,
    /// wrapping. With nothing selected, starts at the first or last event.
    pub fn cycle(&mut self, forward: bool) {
        let n = self.events.len();
        if n == 0 {
            return;
        }
        let current = self
            .selection
            .get()
            .and_then(|id| self.events.iter().position(|e| e.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => n - 1,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        };
        self.activate(self.events[next].id);
    }

    /// Render one frame. Pure: equal inputs and selection give equal views.
    ///
    /// `phase_color` must be a hex color (`#rgb` or `#rrggbb`). Named colors,
    /// `rgb()` and anything else unparseable fall back to `DEFAULT_ACCENT`.
    pub fn render(&self, active_phase: i64, phase_color: Option<&str>) -> MapView {
        let accent = phase_color.and_then(Rgb::parse).unwrap_or(DEFAULT_ACCENT);
        let caption = phase_label(active_phase);

        let heat_zones = zones_for_phase(active_phase)
            .iter()
            .map(|z| HeatZoneView {
                label: z.label,
                center: self.projection.project(z.center.0, z.center.1),
                radius: z.radius,
                color: z.color,
                opacity: z.opacity(),
            })
            .collect();

        let markers = self
            .events
            .iter()
            .map(|e| {
                let selected = self.selection.is_selected(e.id);
                let (ring_radius, ring_width, ring_opacity, dot_radius) =
                    if selected { MARKER_SELECTED } else { MARKER_IDLE };
                MarkerView {
                    id: e.id,
                    name: e.name,
                    center: self.projection.project(e.coords.0, e.coords.1),
                    color: e.category.color(),
                    selected,
                    ring_radius,
                    ring_width,
                    ring_opacity,
                    dot_radius,
                    dot_opacity: DOT_OPACITY,
                }
            })
            .collect();

        let detail = self.selected_event().map(|e| DetailPanel {
            id: e.id,
            category: e.category.tag(),
            year: e.year,
            coords: format_coords(e.coords.0, e.coords.1),
            name: e.name,
            label: e.label,
            description: e.description,
            accent: e.category.color(),
        });

        MapView {
            phase: active_phase,
            accent,
            header: match caption {
                Some(label) => format!("33° Parallel Events · {label}"),
                None => "33° Parallel Events".to_string(),
            },
            caption,
            heat_zones,
            reference_line: self.reference_line(),
            markers,
            detail,
            legend: legend(),
        }
    }

    fn reference_line(&self) -> ReferenceLine {
        ReferenceLine {
            from: self.projection.project(-180.0, REFERENCE_LATITUDE),
            to: self.projection.project(180.0, REFERENCE_LATITUDE),
            color: REFERENCE_COLOR,
            opacity: 0.55,
            dash: (6.0, 5.0),
        }
    }
}

impl Default for GeoMap {
    fn default() -> Self {
        Self::new()
    }
}

fn legend() -> Vec<LegendEntry> {
    Category::KNOWN
        .iter()
        .map(|c| LegendEntry {
            label: c.tag(),
            color: c.color(),
            swatch: LegendSwatch::Dot,
        })
        .chain(std::iter::once(LegendEntry {
            label: "33°N",
            color: REFERENCE_COLOR,
            swatch: LegendSwatch::DashedLine,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_toggles() {
        let mut map = GeoMap::new();
        assert!(map.activate(3));
        assert_eq!(map.selection().get(), Some(3));
        assert!(map.activate(3));
        assert_eq!(map.selection().get(), None);
    }

    #[test]
    fn test_activate_replaces() {
        let mut map = GeoMap::new();
        map.activate(1);
        map.activate(2);
        assert_eq!(map.selection().get(), Some(2));
        let view = map.render(0, None);
        let selected: Vec<_> = view.markers.iter().filter(|m| m.selected).map(|m| m.id).collect();
        assert_eq!(selected, vec![2]);
    }

    #[test]
    fn test_unknown_id_ignored() {
        let mut map = GeoMap::new();
        map.activate(4);
        assert!(!map.activate(42));
        assert_eq!(map.selection().get(), Some(4));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut map = GeoMap::new();
        map.cycle(false);
        assert_eq!(map.selection().get(), Some(9));
        map.cycle(true);
        assert_eq!(map.selection().get(), Some(1));
        map.cycle(true);
        assert_eq!(map.selection().get(), Some(2));
    }

    #[test]
    fn test_accent_fallback() {
        let map = GeoMap::new();
        assert_eq!(map.render(1, None).accent, DEFAULT_ACCENT);
        assert_eq!(map.render(1, Some("not a color")).accent, DEFAULT_ACCENT);
        assert_eq!(map.render(1, Some("#+12345")).accent, DEFAULT_ACCENT);
        assert_eq!(map.render(1, Some("red")).accent, DEFAULT_ACCENT);
        assert_eq!(map.render(1, Some("#ef4444")).accent, Rgb::hex(0xef4444));
    }

    #[test]
    fn test_marker_geometry_by_state() {
        let mut map = GeoMap::new();
        map.activate(7);
        let view = map.render(2, None);
        let on = view.marker(7).unwrap();
        let off = view.marker(8).unwrap();
        assert!(on.ring_radius > off.ring_radius);
        assert!(on.ring_opacity > off.ring_opacity);
        assert!(on.dot_radius > off.dot_radius);
        assert_eq!(on.dot_opacity, off.dot_opacity);
    }

    #[test]
    fn test_reference_line_spans_frame_at_33n() {
        let view = GeoMap::new().render(0, None);
        let line = &view.reference_line;
        assert_eq!(line.from.y, line.to.y);
        assert!(line.from.x < 0.0);
        // Full 360° of longitude at scale 130
        assert!((line.to.x - line.from.x - 130.0 * std::f64::consts::TAU).abs() < 1e-9);
        assert_eq!(line.opacity, 0.55);
        // Independent of phase
        assert_eq!(GeoMap::new().render(3, Some("#8b5cf6")).reference_line, *line);
    }

    #[test]
    fn test_legend_has_six_categories_and_line() {
        let view = GeoMap::new().render(0, None);
        assert_eq!(view.legend.len(), 7);
        assert_eq!(view.legend.iter().filter(|e| e.swatch == LegendSwatch::Dot).count(), 6);
        assert_eq!(view.legend[6].label, "33°N");
    }

    #[test]
    fn test_header_and_caption() {
        let map = GeoMap::new();
        let view = map.render(1, None);
        assert_eq!(view.caption, Some("Phase 2 · Upheaval"));
        assert_eq!(view.header, "33° Parallel Events · Phase 2 · Upheaval");
        let none = map.render(9, None);
        assert_eq!(none.caption, None);
        assert_eq!(none.header, "33° Parallel Events");
    }

    #[test]
    fn test_marker_at_picks_nearest() {
        let view = GeoMap::new().render(0, None);
        let jerusalem = view.marker(7).unwrap().center;
        assert_eq!(view.marker_at(jerusalem, 0.0), Some(7));
        let trinity = view.marker(1).unwrap().center;
        assert_eq!(view.marker_at(trinity + glam::DVec2::new(3.0, 0.0), 0.0), Some(1));
        // Mid-Pacific, far from every marker
        let empty = MercatorProjection::DESIGN.project(-160.0, 0.0);
        assert_eq!(view.marker_at(empty, 2.0), None);
    }
}
