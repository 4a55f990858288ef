use glam::DVec2;
use rayon::prelude::*;

use crate::braille::BrailleCanvas;
use crate::map::geometry::draw_line;
use crate::map::projection::{MercatorProjection, Viewport};
use crate::map::spatial::{BBox, FeatureGrid};

/// A geographic ring (sequence of lon/lat coordinates)
pub type Ring = Vec<(f64, f64)>;

/// Grid cell size in degrees for the boundary index
const GRID_CELL_DEGREES: f64 = 10.0;

/// One polygon of a country: exterior ring first, then holes
#[derive(Clone, Debug)]
pub struct Polygon {
    /// Index of the feature this polygon belongs to (a country may have many)
    pub feature: usize,
    pub rings: Vec<Ring>,
    pub bbox: BBox,
    /// Rings pre-projected into the design frame
    projected: Vec<Vec<DVec2>>,
}

impl Polygon {
    /// Build a polygon; `None` when the exterior ring is empty
    pub fn new(feature: usize, rings: Vec<Ring>) -> Option<Self> {
        let bbox = BBox::of(rings.first()?)?;
        Some(Self {
            feature,
            rings,
            bbox,
            projected: Vec::new(),
        })
    }

    /// Even-odd point test against the exterior ring, excluding holes
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if !self.bbox.contains(lon, lat) {
            return false;
        }
        let mut rings = self.rings.iter();
        match rings.next() {
            Some(exterior) if ring_contains(exterior, lon, lat) => {
                !rings.any(|hole| ring_contains(hole, lon, lat))
            }
            _ => false,
        }
    }
}

fn ring_contains(ring: &[(f64, f64)], lon: f64, lat: f64) -> bool {
    let mut inside = false;
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// What a character cell shows of the base map
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFill {
    Water,
    Land,
    /// Land belonging to the feature under the pointer
    Hovered,
}

/// Base map renderer: country boundary polygons, indexed for culling
pub struct MapRenderer {
    polygons: Vec<Polygon>,
    grid: FeatureGrid,
}

impl MapRenderer {
    /// Empty renderer (no boundary layer)
    pub fn new() -> Self {
        Self {
            polygons: Vec::new(),
            grid: FeatureGrid::new(GRID_CELL_DEGREES),
        }
    }

    /// Build from decoded polygons; rings are projected once here since the
    /// design projection never changes.
    pub fn from_polygons(mut polygons: Vec<Polygon>) -> Self {
        let projection = MercatorProjection::DESIGN;
        polygons.par_iter_mut().for_each(|poly| {
            poly.projected = poly
                .rings
                .iter()
                .map(|ring| ring.iter().map(|&(lon, lat)| projection.project(lon, lat)).collect())
                .collect();
        });
        let grid = FeatureGrid::build(polygons.iter().map(|p| &p.bbox), GRID_CELL_DEGREES);
        Self { polygons, grid }
    }

    /// Check if any boundary data is loaded
    pub fn has_data(&self) -> bool {
        !self.polygons.is_empty()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Feature (country) containing the point, if any
    pub fn feature_at(&self, lon: f64, lat: f64) -> Option<usize> {
        self.grid
            .query_point(lon, lat)
            .iter()
            .map(|&i| &self.polygons[i])
            .find(|p| p.contains(lon, lat))
            .map(|p| p.feature)
    }

    /// Lon/lat box covering what the viewport shows
    fn visible_bbox(viewport: &Viewport) -> BBox {
        let projection = MercatorProjection::DESIGN;
        let (min, max) = viewport.visible_design_bounds();
        let (min_lon, max_lat) = projection.unproject(min);
        let (max_lon, min_lat) = projection.unproject(max);
        BBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Draw country outlines (thin stroke) with viewport culling
    pub fn draw_outlines(&self, canvas: &mut BrailleCanvas, viewport: &Viewport) {
        let visible = Self::visible_bbox(viewport);
        let half_frame = MercatorProjection::DESIGN.width / 2.0;

        for idx in self.grid.query(&visible) {
            let poly = &self.polygons[idx];
            if !poly.bbox.intersects(&visible) {
                continue;
            }
            for ring in &poly.projected {
                draw_ring_path(canvas, ring, viewport, half_frame);
            }
        }
    }

    /// Per-cell fill for a `cols` x `rows` character grid. Rows are
    /// independent, so they are computed in parallel.
    pub fn fill_cells(&self, viewport: &Viewport, cols: usize, rows: usize, hovered: Option<usize>) -> Vec<CellFill> {
        let mut cells = vec![CellFill::Water; cols * rows];
        if !self.has_data() || cols == 0 {
            return cells;
        }
        let projection = MercatorProjection::DESIGN;

        cells.par_chunks_mut(cols).enumerate().for_each(|(cy, row)| {
            for (cx, cell) in row.iter_mut().enumerate() {
                // Sample the middle of the 2x4 braille cell
                let design = viewport.to_design(cx as f64 * 2.0 + 1.0, cy as f64 * 4.0 + 2.0);
                let (lon, lat) = projection.unproject(design);
                if !(-180.0..=180.0).contains(&lon) {
                    continue;
                }
                if let Some(feature) = self.feature_at(lon, lat) {
                    *cell = if Some(feature) == hovered {
                        CellFill::Hovered
                    } else {
                        CellFill::Land
                    };
                }
            }
        });
        cells
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a closed projected ring, skipping segments that wrap the antimeridian
fn draw_ring_path(canvas: &mut BrailleCanvas, ring: &[DVec2], viewport: &Viewport, max_jump: f64) {
    if ring.len() < 2 {
        return;
    }

    for pair in ring.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if (a.x - b.x).abs() > max_jump {
            continue;
        }
        let p1 = viewport.to_pixel(a);
        let p2 = viewport.to_pixel(b);
        if viewport.line_might_be_visible(p1, p2) {
            draw_line(canvas, p1.0, p1.1, p2.0, p2.1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(feature: usize, lon: f64, lat: f64, size: f64) -> Polygon {
        Polygon::new(
            feature,
            vec![vec![
                (lon, lat),
                (lon + size, lat),
                (lon + size, lat + size),
                (lon, lat + size),
                (lon, lat),
            ]],
        )
        .unwrap()
    }

    #[test]
    fn test_polygon_contains_with_hole() {
        let mut poly = square(0, 0.0, 0.0, 10.0);
        poly.rings.push(vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0), (4.0, 4.0)]);
        assert!(poly.contains(2.0, 2.0));
        assert!(!poly.contains(5.0, 5.0));
        assert!(!poly.contains(12.0, 2.0));
    }

    #[test]
    fn test_empty_polygon_rejected() {
        assert!(Polygon::new(0, vec![]).is_none());
        assert!(Polygon::new(0, vec![vec![]]).is_none());
    }

    #[test]
    fn test_feature_at() {
        let r = MapRenderer::from_polygons(vec![square(3, 30.0, 30.0, 10.0), square(4, -10.0, -10.0, 5.0)]);
        assert_eq!(r.feature_at(35.0, 33.0), Some(3));
        assert_eq!(r.feature_at(-8.0, -8.0), Some(4));
        assert_eq!(r.feature_at(100.0, 0.0), None);
    }

    #[test]
    fn test_empty_renderer_draws_nothing() {
        let r = MapRenderer::new();
        assert!(!r.has_data());
        let vp = Viewport::world(40, 20);
        let cells = r.fill_cells(&vp, 20, 5, None);
        assert!(cells.iter().all(|c| *c == CellFill::Water));

        let mut canvas = BrailleCanvas::new(20, 5);
        r.draw_outlines(&mut canvas, &vp);
        assert!(!canvas.to_string().chars().any(|c| c != '\u{2800}' && c != '\n'));
    }

    #[test]
    fn test_fill_marks_land_and_hover() {
        // One large box covering the frame center (20°E 25°N)
        let r = MapRenderer::from_polygons(vec![square(7, -10.0, 0.0, 60.0)]);
        let vp = Viewport::world(90, 46);
        let cols = 45;
        let rows = 12;
        let cells = r.fill_cells(&vp, cols, rows, None);
        let mid = (rows / 2) * cols + cols / 2;
        assert_eq!(cells[mid], CellFill::Land);
        assert_eq!(cells[0], CellFill::Water);

        let hovered = r.fill_cells(&vp, cols, rows, Some(7));
        assert_eq!(hovered[mid], CellFill::Hovered);
    }
}
