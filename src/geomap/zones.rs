use super::color::Rgb;

/// Rendered heat zone opacity is `intensity * HEAT_OPACITY_SCALE`, so even a
/// full-intensity zone stays translucent.
pub const HEAT_OPACITY_SCALE: f64 = 0.38;

/// Number of narrative phases with a zone set
pub const PHASE_COUNT: usize = 4;

/// A static circular overlay shown during one phase
#[derive(Clone, Debug, PartialEq)]
pub struct HeatZone {
    /// (longitude, latitude) in degrees
    pub center: (f64, f64),
    /// Radius in design-frame pixels, not geographic distance
    pub radius: f64,
    pub color: Rgb,
    /// 0.0..=1.0
    pub intensity: f64,
    pub label: &'static str,
}

impl HeatZone {
    pub fn opacity(&self) -> f64 {
        self.intensity.clamp(0.0, 1.0) * HEAT_OPACITY_SCALE
    }
}

const BLUE: Rgb = Rgb::hex(0x3b82f6);
const RED: Rgb = Rgb::hex(0xef4444);
const AMBER: Rgb = Rgb::hex(0xf59e0b);
const VIOLET: Rgb = Rgb::hex(0x8b5cf6);

const fn zone(lon: f64, lat: f64, radius: f64, color: Rgb, intensity: f64, label: &'static str) -> HeatZone {
    HeatZone {
        center: (lon, lat),
        radius,
        color,
        intensity,
        label,
    }
}

static PHASE_0: [HeatZone; 4] = [
    zone(27.0, 52.0, 75.0, BLUE, 0.55, "Eastern Europe"),
    zone(13.0, 51.0, 60.0, BLUE, 0.40, "Central Europe"),
    zone(-74.0, 40.7, 50.0, BLUE, 0.35, "New York"),
    zone(35.0, 32.0, 40.0, BLUE, 0.30, "Levant"),
];

static PHASE_1: [HeatZone; 4] = [
    zone(10.0, 50.0, 85.0, RED, 0.60, "European Theater"),
    zone(-74.0, 40.7, 55.0, RED, 0.75, "New York"),
    zone(44.0, 33.0, 70.0, RED, 0.65, "Iraq"),
    zone(36.0, 33.0, 60.0, RED, 0.55, "Syria"),
];

static PHASE_2: [HeatZone; 4] = [
    zone(35.0, 32.0, 65.0, AMBER, 0.85, "Israel"),
    zone(34.5, 31.5, 45.0, AMBER, 0.75, "Gaza Strip"),
    zone(-122.0, 37.4, 55.0, AMBER, 0.60, "Silicon Valley"),
    zone(-74.0, 40.7, 45.0, AMBER, 0.50, "Wall Street"),
];

static PHASE_3: [HeatZone; 3] = [
    zone(35.2, 31.8, 45.0, VIOLET, 1.00, "Jerusalem"),
    zone(35.0, 32.0, 75.0, VIOLET, 0.70, "Levant"),
    zone(0.0, 20.0, 220.0, VIOLET, 0.10, "Global"),
];

static PHASE_LABELS: [&str; PHASE_COUNT] = [
    "Phase 1 · Dispersion",
    "Phase 2 · Upheaval",
    "Phase 3 · Gathering",
    "Phase 4 · Convergence",
];

/// Zone set for a phase; any index outside 0..=3 has no zones.
pub fn zones_for_phase(phase: i64) -> &'static [HeatZone] {
    match phase {
        0 => &PHASE_0,
        1 => &PHASE_1,
        2 => &PHASE_2,
        3 => &PHASE_3,
        _ => &[],
    }
}

pub fn phase_label(phase: i64) -> Option<&'static str> {
    usize::try_from(phase).ok().and_then(|i| PHASE_LABELS.get(i).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_sizes() {
        assert_eq!(zones_for_phase(0).len(), 4);
        assert_eq!(zones_for_phase(1).len(), 4);
        assert_eq!(zones_for_phase(2).len(), 4);
        assert_eq!(zones_for_phase(3).len(), 3);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        for phase in [-1, 4, 5, i64::MIN, i64::MAX] {
            assert!(zones_for_phase(phase).is_empty());
            assert!(phase_label(phase).is_none());
        }
    }

    #[test]
    fn test_opacity_cap() {
        let full = &zones_for_phase(3)[0];
        assert_eq!(full.intensity, 1.0);
        assert!(full.opacity() <= HEAT_OPACITY_SCALE);
        assert!((full.opacity() - 0.38).abs() < 1e-12);

        for phase in 0..PHASE_COUNT as i64 {
            for z in zones_for_phase(phase) {
                assert!(z.opacity() <= HEAT_OPACITY_SCALE);
                assert!((0.0..=1.0).contains(&z.intensity));
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(phase_label(0), Some("Phase 1 · Dispersion"));
        assert_eq!(phase_label(3), Some("Phase 4 · Convergence"));
    }
}
