use rayon::prelude::*;

use crate::geomap::{HeatZoneView, Rgb};
use crate::map::projection::Viewport;

/// Standard deviation of the soft edge, in design-frame pixels
pub const HEAT_BLUR_SIGMA: f64 = 20.0;

/// Complementary error function (Abramowitz & Stegun 7.1.26, |err| < 1.5e-7)
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * z);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    let r = poly * (-z * z).exp();
    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}

/// Coverage of a Gaussian-blurred disk at distance `d` from its center:
/// ~1 well inside, 0.5 on the rim, ~0 well outside.
#[inline]
pub fn blurred_disk(d: f64, radius: f64, sigma: f64) -> f64 {
    if sigma <= 0.0 {
        return if d <= radius { 1.0 } else { 0.0 };
    }
    (0.5 * erfc((d - radius) / (sigma * std::f64::consts::SQRT_2))).clamp(0.0, 1.0)
}

/// Alpha a zone contributes at a design-frame point; never above the
/// zone's opacity.
#[inline]
pub fn zone_alpha(zone: &HeatZoneView, point: glam::DVec2) -> f64 {
    let d = zone.center.distance(point);
    zone.opacity * blurred_disk(d, zone.radius, HEAT_BLUR_SIGMA)
}

/// Composite heat zones over per-cell background colors. `cells` is a
/// row-major `cols`-wide grid of character cells; each cell is sampled at
/// its center in the design frame and zones are layered in list order.
pub fn shade_cells(cells: &mut [Rgb], cols: usize, zones: &[HeatZoneView], viewport: &Viewport) {
    if zones.is_empty() || cols == 0 {
        return;
    }

    cells.par_chunks_mut(cols).enumerate().for_each(|(cy, row)| {
        for (cx, cell) in row.iter_mut().enumerate() {
            let point = viewport.to_design(cx as f64 * 2.0 + 1.0, cy as f64 * 4.0 + 2.0);
            for zone in zones {
                let alpha = zone_alpha(zone, point);
                if alpha > 1e-3 {
                    *cell = zone.color.over(*cell, alpha);
                }
            }
        }
    });
}
