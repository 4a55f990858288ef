mod topojson;

use geojson::{GeoJson, Geometry, Value};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::map::{MapRenderer, Polygon, Ring};

/// Encoding of a boundary dataset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetFormat {
    TopoJson,
    GeoJson,
}

/// Only the top-level `type` member, to pick a decoder
#[derive(Deserialize)]
struct TypeProbe {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Load the world boundary dataset into a renderer. Any failure leaves the
/// boundary layer empty; markers, zones and the reference line still draw.
pub fn load_boundaries(path: &Path, object: &str) -> MapRenderer {
    match read_boundaries(path, object) {
        Ok((format, polygons)) if !polygons.is_empty() => {
            info!(path = %path.display(), ?format, polygons = polygons.len(), "loaded boundary dataset");
            MapRenderer::from_polygons(polygons)
        }
        Ok((format, _)) => {
            warn!(path = %path.display(), ?format, "boundary dataset has no polygons; boundary layer disabled");
            MapRenderer::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load boundary dataset; boundary layer disabled");
            MapRenderer::new()
        }
    }
}

/// Read and decode a boundary dataset file
pub fn read_boundaries(path: &Path, object: &str) -> Result<(DatasetFormat, Vec<Polygon>)> {
    let bytes = fs::read(path)?;
    parse_boundaries(bytes, object)
}

/// Decode boundary polygons from TopoJSON or GeoJSON bytes
pub fn parse_boundaries(mut bytes: Vec<u8>, object: &str) -> Result<(DatasetFormat, Vec<Polygon>)> {
    // simd-json parses in place, so probe a scratch copy
    let mut scratch = bytes.clone();
    let probe: TypeProbe = simd_json::serde::from_slice(&mut scratch)?;

    if probe.kind.as_deref() == Some("Topology") {
        let polygons = topojson::decode(&mut bytes, object)?;
        return Ok((DatasetFormat::TopoJson, polygons));
    }

    let content = String::from_utf8(bytes)?;
    let geojson: GeoJson = content.parse()?;
    let mut polygons = Vec::new();
    process_geojson_polygons(&geojson, &mut polygons);
    Ok((DatasetFormat::GeoJson, polygons))
}

/// Extract polygons from GeoJSON, one feature index per Feature
fn process_geojson_polygons(geojson: &GeoJson, out: &mut Vec<Polygon>) {
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for (feature, f) in fc.features.iter().enumerate() {
                if let Some(ref geometry) = f.geometry {
                    process_geometry_polygons(geometry, feature, out);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                process_geometry_polygons(geometry, 0, out);
            }
        }
        GeoJson::Geometry(geometry) => {
            process_geometry_polygons(geometry, 0, out);
        }
    }
}

fn to_ring(coords: &[Vec<f64>]) -> Ring {
    coords.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect()
}

fn process_geometry_polygons(geometry: &Geometry, feature: usize, out: &mut Vec<Polygon>) {
    match &geometry.value {
        Value::Polygon(rings) => {
            out.extend(Polygon::new(feature, rings.iter().map(|r| to_ring(r)).collect()));
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                out.extend(Polygon::new(feature, rings.iter().map(|r| to_ring(r)).collect()));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_polygons(g, feature, out);
            }
        }
        // Points and lines have no area to fill
        _ => {}
    }
}
