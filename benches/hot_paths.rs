//! Benchmarks for the per-frame hot paths
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parallel_map::geomap::{GeoMap, Rgb, EVENTS};
use parallel_map::map::{heat, MapRenderer, MercatorProjection, Polygon, Viewport};

/// Grid of 10° boxes standing in for a country dataset
fn synthetic_boundaries() -> MapRenderer {
    let mut polygons = Vec::new();
    for (i, lon) in (-170..170).step_by(12).enumerate() {
        for lat in (-60..70).step_by(12) {
            let (x, y) = (lon as f64, lat as f64);
            let ring = vec![(x, y), (x + 10.0, y), (x + 10.0, y + 10.0), (x, y + 10.0), (x, y)];
            polygons.extend(Polygon::new(i, vec![ring]));
        }
    }
    MapRenderer::from_polygons(polygons)
}

fn bench_projection(c: &mut Criterion) {
    let projection = MercatorProjection::DESIGN;
    c.bench_function("project_events", |b| {
        b.iter(|| {
            for e in &EVENTS {
                black_box(projection.project(black_box(e.coords.0), black_box(e.coords.1)));
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut map = GeoMap::new();
    map.activate(7);
    c.bench_function("geomap_render", |b| b.iter(|| black_box(map.render(black_box(3), Some("#8b5cf6")))));
}

fn bench_heat(c: &mut Criterion) {
    let view = GeoMap::new().render(1, None);
    let viewport = Viewport::world(400, 200);
    let (cols, rows) = (200, 50);
    c.bench_function("heat_shade_200x50", |b| {
        b.iter(|| {
            let mut cells = vec![Rgb::hex(0x09090b); cols * rows];
            heat::shade_cells(&mut cells, cols, &view.heat_zones, &viewport);
            black_box(cells)
        })
    });
}

fn bench_fill(c: &mut Criterion) {
    let renderer = synthetic_boundaries();
    let viewport = Viewport::world(400, 200);
    c.bench_function("boundary_fill_200x50", |b| {
        b.iter(|| black_box(renderer.fill_cells(&viewport, 200, 50, Some(3))))
    });
}

criterion_group!(benches, bench_projection, bench_render, bench_heat, bench_fill);
criterion_main!(benches);
