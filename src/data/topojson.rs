//! TopoJSON decoding (the format of `world-atlas/countries-110m.json`).
//!
//! Arcs are shared between neighbouring polygons and, when the topology is
//! quantized, stored as integer deltas. Decoding turns each polygon's arc
//! references back into closed lon/lat rings.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{GeoDataError, Result};
use crate::map::{Polygon, Ring};

#[derive(Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: BTreeMap<String, TopoObject>,
}

#[derive(Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Deserialize)]
struct TopoObject {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    geometries: Vec<TopoObject>,
    #[serde(default)]
    arcs: Option<ArcRefs>,
}

/// Arc index nesting differs by geometry type; the type string decides
/// how it is read.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArcRefs {
    Flat(Vec<i64>),
    Nested(Vec<Vec<i64>>),
    DoubleNested(Vec<Vec<Vec<i64>>>),
}

/// Decode a TopoJSON document into polygons. Uses the object named
/// `object`, or the first object (by name) when it is absent.
pub fn decode(bytes: &mut [u8], object: &str) -> Result<Vec<Polygon>> {
    let topology: Topology = simd_json::serde::from_slice(bytes)?;
    let arcs = absolute_arcs(&topology);

    let root = topology
        .objects
        .get(object)
        .or_else(|| topology.objects.values().next())
        .ok_or_else(|| GeoDataError::Topology("topology has no objects".to_string()))?;

    let mut polygons = Vec::new();
    let mut feature = 0;
    collect(root, &arcs, &mut feature, &mut polygons)?;
    Ok(polygons)
}

/// Undo delta encoding and quantization
fn absolute_arcs(topology: &Topology) -> Vec<Ring> {
    topology
        .arcs
        .iter()
        .map(|arc| match &topology.transform {
            Some(t) => {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| {
                        x += p[0];
                        y += p[1];
                        (x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1])
                    })
                    .collect()
            }
            None => arc.iter().filter(|p| p.len() >= 2).map(|p| (p[0], p[1])).collect(),
        })
        .collect()
}

/// Points of one arc reference; a negative index `!i` means arc `i` reversed
fn arc_points(arcs: &[Ring], index: i64) -> Result<Ring> {
    let (i, reversed) = if index < 0 { (!index, true) } else { (index, false) };
    let arc = usize::try_from(i)
        .ok()
        .and_then(|i| arcs.get(i))
        .ok_or_else(|| GeoDataError::Topology(format!("arc index {index} out of range")))?;
    let mut points = arc.clone();
    if reversed {
        points.reverse();
    }
    Ok(points)
}

/// Join arcs into one ring; consecutive arcs share their junction point
fn stitch(arcs: &[Ring], refs: &[i64]) -> Result<Ring> {
    let mut ring: Ring = Vec::new();
    for &index in refs {
        let points = arc_points(arcs, index)?;
        let skip = usize::from(!ring.is_empty());
        ring.extend(points.into_iter().skip(skip));
    }
    Ok(ring)
}

fn polygon_from(arcs: &[Ring], feature: usize, rings: &[Vec<i64>]) -> Result<Option<Polygon>> {
    let rings = rings.iter().map(|r| stitch(arcs, r)).collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(feature, rings))
}

fn collect(obj: &TopoObject, arcs: &[Ring], feature: &mut usize, out: &mut Vec<Polygon>) -> Result<()> {
    match (obj.kind.as_deref(), &obj.arcs) {
        (Some("GeometryCollection"), _) => {
            for g in &obj.geometries {
                collect(g, arcs, feature, out)?;
            }
            return Ok(());
        }
        (Some("Polygon"), Some(ArcRefs::Nested(rings))) => {
            out.extend(polygon_from(arcs, *feature, rings)?);
        }
        (Some("MultiPolygon"), Some(ArcRefs::DoubleNested(polys))) => {
            for rings in polys {
                out.extend(polygon_from(arcs, *feature, rings)?);
            }
        }
        (Some("LineString"), Some(ArcRefs::Flat(line))) => {
            debug!(arcs = line.len(), "skipping line geometry");
            return Ok(());
        }
        // Null geometries, points and empty arc lists carry no area
        _ => return Ok(()),
    }
    *feature += 1;
    Ok(())
}
