use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::config::Settings;
use crate::geomap::{EventId, GeoMap, MapView, PHASE_COUNT};
use crate::map::{MapRenderer, MercatorProjection, Viewport};
use crate::ui;

/// Phase used to show the map without any heat zones
pub const NO_PHASE: i64 = -1;

/// Application state: the page shell around the map component. It owns the
/// phase and accent the component is rendered with.
pub struct App {
    pub viewport: Viewport,
    pub map: GeoMap,
    pub boundaries: MapRenderer,
    pub settings: Settings,
    pub phase: i64,
    pub should_quit: bool,
    /// Terminal area the UI is laid out in
    screen: Rect,
    /// Last mouse position for drag tracking
    last_mouse: Option<(u16, u16)>,
    /// Whether the current press has moved enough to count as a drag
    dragging: bool,
    /// Current mouse position for hover highlight
    pub mouse_pos: Option<(u16, u16)>,
}

impl App {
    pub fn new(settings: Settings, boundaries: MapRenderer, width: u16, height: u16) -> Self {
        let screen = Rect::new(0, 0, width, height);
        let (pw, ph) = Self::pixel_size(screen);
        Self {
            viewport: Viewport::world(pw, ph),
            map: GeoMap::new(),
            boundaries,
            phase: settings.initial_phase,
            settings,
            should_quit: false,
            screen,
            last_mouse: None,
            dragging: false,
            mouse_pos: None,
        }
    }

    /// Braille pixel size of the map area: 2x4 dots per character
    fn pixel_size(screen: Rect) -> (usize, usize) {
        let inner = ui::map_inner(screen);
        (inner.width as usize * 2, inner.height as usize * 4)
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        let (pw, ph) = Self::pixel_size(self.screen);
        self.viewport.width = pw;
        self.viewport.height = ph;
    }

    /// Reset zoom and pan
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_phase(&mut self, phase: i64) {
        if phase != self.phase {
            debug!(from = self.phase, to = phase, "phase changed");
            self.phase = phase;
        }
    }

    /// Advance to the next phase, wrapping; from "no phase" goes to phase 0
    pub fn next_phase(&mut self) {
        let count = PHASE_COUNT as i64;
        let next = if (0..count).contains(&self.phase) { (self.phase + 1) % count } else { 0 };
        self.set_phase(next);
    }

    pub fn prev_phase(&mut self) {
        let count = PHASE_COUNT as i64;
        let prev = if (0..count).contains(&self.phase) {
            (self.phase + count - 1) % count
        } else {
            count - 1
        };
        self.set_phase(prev);
    }

    /// Accent color handed to the component for the current phase
    pub fn accent(&self) -> Option<&str> {
        self.settings.accent_for(self.phase)
    }

    /// Render the component for the current phase and selection
    pub fn view(&self) -> MapView {
        self.map.render(self.phase, self.accent())
    }

    /// Escape: close the detail panel, or quit when none is open
    pub fn escape(&mut self) {
        if self.map.selection().get().is_some() {
            self.map.clear();
        } else {
            self.quit();
        }
    }

    /// Pan the map
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.cell_to_pixel(col, row) {
            self.viewport.zoom_in_at(px as i32, py as i32);
        }
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.cell_to_pixel(col, row) {
            self.viewport.zoom_out_at(px as i32, py as i32);
        }
    }

    /// Center of a terminal cell in braille pixels of the map area, `None`
    /// outside the map
    pub fn cell_to_pixel(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        let inner = ui::map_inner(self.screen);
        if !inner.contains(Position::new(col, row)) {
            return None;
        }
        let cx = (col - inner.x) as f64;
        let cy = (row - inner.y) as f64;
        Some((cx * 2.0 + 1.0, cy * 4.0 + 2.0))
    }

    /// Mouse button pressed: may become a click or a drag
    pub fn press(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragging = false;
    }

    /// Handle mouse drag: pans once the pointer leaves the pressed cell
    pub fn handle_drag(&mut self, col: u16, row: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            if (last_x, last_y) == (col, row) {
                return;
            }
            self.dragging = true;
            let dx = last_x as i32 - col as i32;
            let dy = last_y as i32 - row as i32;
            // One cell is 2x4 braille pixels
            self.pan(dx * 2, dy * 4);
        }
        self.last_mouse = Some((col, row));
    }

    /// Mouse button released: a press that never dragged is a click
    pub fn release(&mut self, col: u16, row: u16) {
        let was_drag = self.dragging;
        self.last_mouse = None;
        self.dragging = false;
        if !was_drag {
            self.click(col, row);
        }
    }

    /// Click: dismiss button first, then markers. Returns the event
    /// activated, if any.
    pub fn click(&mut self, col: u16, row: u16) -> Option<EventId> {
        let view = self.view();
        if view.detail.is_some() {
            let inner = ui::map_inner(self.screen);
            let panel = ui::detail_panel_rect(inner);
            let pos = Position::new(col, row);
            if ui::close_button_rect(panel).contains(pos) {
                self.map.clear();
                return None;
            }
            // Clicks on the panel body do not reach markers beneath it
            if panel.contains(pos) {
                return None;
            }
        }

        let id = self.marker_at_cell(&view, col, row)?;
        self.map.activate(id);
        Some(id)
    }

    /// Marker under a terminal cell, with roughly one cell of slack
    fn marker_at_cell(&self, view: &MapView, col: u16, row: u16) -> Option<EventId> {
        let (px, py) = self.cell_to_pixel(col, row)?;
        let point = self.viewport.to_design(px, py);
        let scale = self.viewport.scale();
        let tolerance = if scale > 0.0 { 2.0 / scale } else { 0.0 };
        view.marker_at(point, tolerance)
    }

    /// Update mouse cursor position
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Boundary feature under the pointer (presentation only)
    pub fn hovered_feature(&self) -> Option<usize> {
        let (col, row) = self.mouse_pos?;
        let (px, py) = self.cell_to_pixel(col, row)?;
        let (lon, lat) = MercatorProjection::DESIGN.unproject(self.viewport.to_design(px, py));
        self.boundaries.feature_at(lon, lat)
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    /// Geographic coordinate at the middle of the view
    pub fn center_coords(&self) -> String {
        let (lon, lat) = MercatorProjection::DESIGN.unproject(self.viewport.focus);
        crate::geomap::format_coords(lon, lat)
    }
}
