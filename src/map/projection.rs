use glam::DVec2;
use std::f64::consts::{FRAC_PI_4, PI};

/// Mercator latitude limit; beyond this the projection diverges
const MAX_LAT: f64 = 85.05112878;

/// Fixed Mercator projection onto the design frame. Every map feature is
/// expressed in this frame, so positions do not depend on terminal size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorProjection {
    /// Pixels per radian
    pub scale: f64,
    /// (longitude, latitude) placed at the frame center
    pub center: (f64, f64),
    pub width: f64,
    pub height: f64,
}

impl MercatorProjection {
    /// Frame used by the map component: 900x460, scale 130, centered on 20°E 25°N
    pub const DESIGN: MercatorProjection = MercatorProjection {
        scale: 130.0,
        center: (20.0, 25.0),
        width: 900.0,
        height: 460.0,
    };

    #[inline(always)]
    fn mercator_y(lat: f64) -> f64 {
        let phi = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
        (FRAC_PI_4 + phi / 2.0).tan().ln()
    }

    /// Project a geographic coordinate (lon, lat) to design-frame pixels
    #[inline]
    pub fn project(&self, lon: f64, lat: f64) -> DVec2 {
        let x = self.width / 2.0 + self.scale * (lon - self.center.0).to_radians();
        let y = self.height / 2.0
            - self.scale * (Self::mercator_y(lat) - Self::mercator_y(self.center.1));
        DVec2::new(x, y)
    }

    /// Inverse of `project`
    pub fn unproject(&self, p: DVec2) -> (f64, f64) {
        let lon = self.center.0 + ((p.x - self.width / 2.0) / self.scale).to_degrees();
        let my = Self::mercator_y(self.center.1) - (p.y - self.height / 2.0) / self.scale;
        let lat = (2.0 * my.exp().atan() - PI / 2.0).to_degrees();
        (lon, lat)
    }
}

/// Maps the design frame onto the braille pixel grid of the terminal,
/// with zoom and pan.
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Design-frame point shown at the middle of the canvas
    pub focus: DVec2,
    /// Zoom level (1.0 = whole frame fits)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub const MIN_ZOOM: f64 = 0.5;
    pub const MAX_ZOOM: f64 = 20.0;

    pub fn new(focus: DVec2, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            focus,
            zoom,
            width,
            height,
        }
    }

    /// Whole design frame, centered
    pub fn world(width: usize, height: usize) -> Self {
        let p = MercatorProjection::DESIGN;
        Self::new(DVec2::new(p.width / 2.0, p.height / 2.0), 1.0, width, height)
    }

    /// Braille pixels per design pixel
    pub fn scale(&self) -> f64 {
        let p = MercatorProjection::DESIGN;
        let fit = (self.width as f64 / p.width).min(self.height as f64 / p.height);
        fit * self.zoom
    }

    fn half_size(&self) -> DVec2 {
        DVec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Design-frame point to fractional canvas pixels
    #[inline]
    pub fn to_canvas(&self, p: DVec2) -> DVec2 {
        (p - self.focus) * self.scale() + self.half_size()
    }

    /// Design-frame point to integer canvas pixels
    #[inline]
    pub fn to_pixel(&self, p: DVec2) -> (i32, i32) {
        let c = self.to_canvas(p);
        (c.x.floor() as i32, c.y.floor() as i32)
    }

    /// Canvas pixel back to the design frame
    pub fn to_design(&self, px: f64, py: f64) -> DVec2 {
        let scale = self.scale();
        if scale <= 0.0 {
            return self.focus;
        }
        (DVec2::new(px, py) - self.half_size()) / scale + self.focus
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = self.scale();
        if scale <= 0.0 {
            return;
        }
        self.focus += DVec2::new(dx as f64, dy as f64) / scale;

        // Keep the focus inside the frame so the map cannot be lost
        let p = MercatorProjection::DESIGN;
        self.focus.x = self.focus.x.clamp(0.0, p.width);
        self.focus.y = self.focus.y.clamp(0.0, p.height);
    }

    /// Zoom in by a factor
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(Self::MAX_ZOOM);
    }

    /// Zoom out by a factor
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(Self::MIN_ZOOM);
    }

    /// Zoom in towards a specific pixel location
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.5);
    }

    /// Zoom out from a specific pixel location
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / 1.5);
    }

    /// Zoom by factor keeping the design point under (px, py) fixed
    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let anchor = self.to_design(px as f64, py as f64);
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);

        let scale = self.scale();
        if scale <= 0.0 {
            return;
        }
        // Solve to_canvas(anchor) == (px, py) for the focus
        self.focus = anchor - (DVec2::new(px as f64, py as f64) - self.half_size()) / scale;
    }

    /// Design-frame rectangle currently on screen: (min, max)
    pub fn visible_design_bounds(&self) -> (DVec2, DVec2) {
        let a = self.to_design(0.0, 0.0);
        let b = self.to_design(self.width as f64, self.height as f64);
        (a.min(b), a.max(b))
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_projects_to_frame_middle() {
        let p = MercatorProjection::DESIGN;
        let c = p.project(20.0, 25.0);
        assert!((c.x - 450.0).abs() < 1e-9);
        assert!((c.y - 230.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_is_deterministic() {
        let p = MercatorProjection::DESIGN;
        let a = p.project(-106.5, 33.7);
        let b = p.project(-106.5, 33.7);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }

    #[test]
    fn test_unproject_inverts_project() {
        let p = MercatorProjection::DESIGN;
        for &(lon, lat) in &[(35.2, 31.8), (-106.5, 33.7), (129.9, 32.7), (0.0, -40.0)] {
            let (lon2, lat2) = p.unproject(p.project(lon, lat));
            assert!((lon - lon2).abs() < 1e-9);
            assert!((lat - lat2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_north_is_up_east_is_right() {
        let p = MercatorProjection::DESIGN;
        let a = p.project(0.0, 0.0);
        let b = p.project(10.0, 10.0);
        assert!(b.x > a.x);
        assert!(b.y < a.y);
    }

    #[test]
    fn test_poles_are_finite() {
        let p = MercatorProjection::DESIGN;
        assert!(p.project(0.0, 90.0).y.is_finite());
        assert!(p.project(0.0, -90.0).y.is_finite());
    }

    #[test]
    fn test_viewport_round_trip() {
        let vp = Viewport::world(400, 200);
        let d = DVec2::new(300.0, 100.0);
        let c = vp.to_canvas(d);
        let back = vp.to_design(c.x, c.y);
        assert!((back - d).length() < 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let mut vp = Viewport::world(400, 200);
        let before = vp.to_design(100.0, 50.0);
        vp.zoom_in_at(100, 50);
        let after = vp.to_design(100.0, 50.0);
        assert!((before - after).length() < 1e-9);
        assert!(vp.zoom > 1.0);
    }

    #[test]
    fn test_pan() {
        let mut vp = Viewport::world(400, 200);
        let x0 = vp.focus.x;
        vp.pan(10, 0);
        assert!(vp.focus.x > x0);
    }
}
