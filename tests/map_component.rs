use glam::DVec2;
use parallel_map::geomap::{
    format_coords, zones_for_phase, Category, GeoEvent, GeoMap, DEFAULT_MARKER_COLOR, EVENTS,
    HEAT_OPACITY_SCALE,
};
use parallel_map::map::MercatorProjection;

#[test]
fn zones_match_phase_table_exactly() {
    let map = GeoMap::new();
    for phase in 0..4 {
        let view = map.render(phase, None);
        let table = zones_for_phase(phase);
        assert_eq!(view.heat_zones.len(), table.len());
        for (rendered, zone) in view.heat_zones.iter().zip(table) {
            assert_eq!(rendered.label, zone.label);
            assert_eq!(rendered.radius, zone.radius);
            assert_eq!(rendered.color, zone.color);
            assert_eq!(rendered.opacity, zone.intensity * HEAT_OPACITY_SCALE);
            assert_eq!(
                rendered.center,
                MercatorProjection::DESIGN.project(zone.center.0, zone.center.1)
            );
        }
    }
}

#[test]
fn out_of_range_phase_has_no_zones() {
    let map = GeoMap::new();
    for phase in [-1, 4, 100, i64::MIN] {
        let view = map.render(phase, Some("#ef4444"));
        assert!(view.heat_zones.is_empty());
        // Everything else still renders
        assert_eq!(view.markers.len(), 9);
        assert_eq!(view.legend.len(), 7);
    }
}

#[test]
fn full_intensity_zone_stays_translucent() {
    let view = GeoMap::new().render(3, None);
    let max = view.heat_zones.iter().map(|z| z.opacity).fold(0.0, f64::max);
    assert!(max <= 0.38);
    assert!((max - 0.38).abs() < 1e-12);
}

#[test]
fn marker_projection_is_reproducible() {
    let a = GeoMap::new().render(0, None);
    let b = GeoMap::new().render(2, Some("#f59e0b"));
    for (ma, mb) in a.markers.iter().zip(&b.markers) {
        assert_eq!(ma.center.x.to_bits(), mb.center.x.to_bits());
        assert_eq!(ma.center.y.to_bits(), mb.center.y.to_bits());
    }
}

#[test]
fn render_is_idempotent() {
    let mut map = GeoMap::new();
    map.activate(5);
    assert_eq!(map.render(1, Some("#ef4444")), map.render(1, Some("#ef4444")));
}

#[test]
fn selecting_opens_detail_with_record_fields() {
    let mut map = GeoMap::new();
    for event in &EVENTS {
        map.clear();
        map.activate(event.id);
        let detail = map.render(0, None).detail.expect("detail panel open");
        assert_eq!(detail.id, event.id);
        assert_eq!(detail.name, event.name);
        assert_eq!(detail.label, event.label);
        assert_eq!(detail.year, event.year);
        assert_eq!(detail.category, event.category.tag());
        assert_eq!(detail.description, event.description);
        assert_eq!(detail.coords, format_coords(event.coords.0, event.coords.1));
    }
}

#[test]
fn clicking_selected_marker_closes_panel() {
    let mut map = GeoMap::new();
    map.activate(7);
    map.activate(7);
    let view = map.render(0, None);
    assert!(view.detail.is_none());
    assert!(view.markers.iter().all(|m| !m.selected));
}

#[test]
fn second_selection_replaces_first() {
    let mut map = GeoMap::new();
    map.activate(1);
    map.activate(8);
    let view = map.render(0, None);
    assert!(!view.marker(1).unwrap().selected);
    assert!(view.marker(8).unwrap().selected);
    assert_eq!(view.detail.unwrap().name, "Gaza");
}

#[test]
fn detail_coordinates_use_hemisphere_suffixes() {
    let mut map = GeoMap::new();
    map.activate(7);
    assert_eq!(map.render(0, None).detail.unwrap().coords, "31.8°N 35.2°E");
    map.activate(1);
    assert_eq!(map.render(0, None).detail.unwrap().coords, "33.7°N 106.5°W");
}

static SYNTHETIC: [GeoEvent; 2] = [
    GeoEvent {
        id: 100,
        name: "Unclassified",
        coords: (10.0, 10.0),
        year: "n/a",
        label: "Unknown tag",
        category: Category::Other("festival"),
        description: "Synthetic event with a category outside the legend.",
    },
    GeoEvent {
        id: 101,
        name: "Classified",
        coords: (-10.0, -10.0),
        year: "n/a",
        label: "Known tag",
        category: Category::War,
        description: "Synthetic event with a known category.",
    },
];

#[test]
fn unknown_category_renders_with_default_color() {
    let mut map = GeoMap::with_events(&SYNTHETIC);
    let view = map.render(0, None);
    assert_eq!(view.marker(100).unwrap().color, DEFAULT_MARKER_COLOR);
    assert_ne!(view.marker(101).unwrap().color, DEFAULT_MARKER_COLOR);

    map.activate(100);
    let detail = map.render(0, None).detail.unwrap();
    assert_eq!(detail.category, "festival");
    assert_eq!(detail.accent, DEFAULT_MARKER_COLOR);
}

#[test]
fn hit_test_prefers_nearest_marker_in_cluster() {
    // Jerusalem, Gaza and Tel Aviv sit within a degree of each other
    let view = GeoMap::new().render(0, None);
    for id in [7, 8, 9] {
        let center = view.marker(id).unwrap().center;
        assert_eq!(view.marker_at(center, 0.0), Some(id));
    }
    let far = DVec2::new(-500.0, -500.0);
    assert_eq!(view.marker_at(far, 10.0), None);
}
