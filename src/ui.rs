use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::App;
use crate::braille::{BrailleCanvas, ColorCanvas, BLANK};
use crate::geomap::{DetailPanel, LegendSwatch, MapView, Rgb};
use crate::map::{draw_circle, draw_dashed_line, draw_ring, heat, CellFill, MapRenderer, Viewport};

const WATER: Rgb = Rgb::hex(0x09090b);
const LAND: Rgb = Rgb::hex(0x111113);
const LAND_HOVER: Rgb = Rgb::hex(0x1a1a1e);
/// Braille strokes are a single dot wide, so the outline is lifted above
/// the fill more than a vector stroke would be
const BOUNDARY_STROKE: Rgb = Rgb::hex(0x3f3f46);
const MUTED: Color = Color::Rgb(0x52, 0x52, 0x5b);
const FAINT: Color = Color::Rgb(0x3f, 0x3f, 0x46);

const DETAIL_MAX_WIDTH: u16 = 64;
const DETAIL_HEIGHT: u16 = 9;
/// Narrower than this, the legend is hidden
const LEGEND_MIN_WIDTH: u16 = 60;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = split(area);
    let view = app.view();

    render_map(frame, app, &view, chunks[0]);
    render_status_bar(frame, app, &view, chunks[1]);
}

/// Split into map area and status bar
fn split(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area)
}

/// Drawable map area (inside the border) for a terminal of this size
pub fn map_inner(screen: Rect) -> Rect {
    map_block(Color::Reset, "").inner(split(screen)[0])
}

/// Detail panel position: bottom-center of the map, independent of which
/// marker is selected
pub fn detail_panel_rect(inner: Rect) -> Rect {
    let width = inner.width.saturating_sub(4).min(DETAIL_MAX_WIDTH);
    let height = DETAIL_HEIGHT.min(inner.height);
    let x = inner.x + (inner.width - width) / 2;
    let y = (inner.y + inner.height).saturating_sub(height + 1).max(inner.y);
    Rect::new(x, y, width, height)
}

/// The `[x]` dismiss control in the panel's top border
pub fn close_button_rect(panel: Rect) -> Rect {
    Rect::new(panel.x + panel.width.saturating_sub(5), panel.y, 3.min(panel.width), 1)
}

fn map_block(accent: Color, header: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {header} "),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
}

fn render_map(frame: &mut Frame, app: &App, view: &MapView, area: Rect) {
    let accent: Color = view.accent.into();
    let block = map_block(accent, &view.header).title_bottom(Line::from(Span::styled(
        " Geographic Intelligence ",
        Style::default().fg(MUTED),
    )));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Phase accent bar along the top border
    let bar_width = (area.width / 3).max(1);
    frame.render_widget(
        Paragraph::new("━".repeat(bar_width as usize)).style(Style::default().fg(accent)),
        Rect::new(area.x, area.y, bar_width.min(area.width), 1),
    );

    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let map_widget = MapWidget {
        view,
        boundaries: &app.boundaries,
        viewport: &viewport,
        hovered: app.hovered_feature(),
    };
    frame.render_widget(map_widget, inner);

    render_overlays(frame, view, inner);
}

/// Custom widget that renders the braille map layers over shaded cells
struct MapWidget<'a> {
    view: &'a MapView,
    boundaries: &'a MapRenderer,
    viewport: &'a Viewport,
    hovered: Option<usize>,
}

/// OR two braille glyphs together
fn merge_glyphs(a: char, b: char) -> char {
    let bits = |c: char| (c as u32).saturating_sub(0x2800) & 0xff;
    char::from_u32(0x2800 + (bits(a) | bits(b))).unwrap_or(BLANK)
}

impl MapWidget<'_> {
    /// Background per cell: base map fill, then heat zones
    fn shade(&self, cols: usize, rows: usize) -> Vec<Rgb> {
        let mut cells: Vec<Rgb> = self
            .boundaries
            .fill_cells(self.viewport, cols, rows, self.hovered)
            .into_iter()
            .map(|fill| match fill {
                CellFill::Water => WATER,
                CellFill::Land => LAND,
                CellFill::Hovered => LAND_HOVER,
            })
            .collect();
        heat::shade_cells(&mut cells, cols, &self.view.heat_zones, self.viewport);
        cells
    }

    fn reference_canvas(&self, cols: usize, rows: usize) -> BrailleCanvas {
        let mut canvas = BrailleCanvas::new(cols, rows);
        let line = &self.view.reference_line;
        let scale = self.viewport.scale();
        let (x0, y0) = self.viewport.to_pixel(line.from);
        let (x1, y1) = self.viewport.to_pixel(line.to);
        let on = (line.dash.0 * scale).round().max(1.0) as u32;
        let off = (line.dash.1 * scale).round().max(1.0) as u32;
        draw_dashed_line(&mut canvas, x0, y0, x1, y1, on, off);
        canvas
    }

    fn marker_canvas(&self, cols: usize, rows: usize) -> ColorCanvas {
        let mut canvas = ColorCanvas::new(cols, rows);
        let scale = self.viewport.scale();

        // Selected marker last so it sits on top of its neighbours
        let mut markers: Vec<_> = self.view.markers.iter().collect();
        markers.sort_by_key(|m| m.selected);

        for m in markers {
            let c = self.viewport.to_canvas(m.center);
            canvas.set_pen(m.color.over(WATER, m.ring_opacity));
            draw_ring(&mut canvas, c.x, c.y, m.ring_radius * scale, (m.ring_width * scale).max(1.0));
            canvas.set_pen(m.color.over(WATER, m.dot_opacity));
            let r = (m.dot_radius * scale).round().max(1.0) as i32;
            draw_circle(&mut canvas, c.x.floor() as i32, c.y.floor() as i32, r);
        }
        canvas
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = area.width as usize;
        let rows = area.height as usize;
        if cols == 0 || rows == 0 {
            return;
        }

        let shade = self.shade(cols, rows);

        let mut outlines = BrailleCanvas::new(cols, rows);
        self.boundaries.draw_outlines(&mut outlines, self.viewport);
        let reference = self.reference_canvas(cols, rows);
        let markers = self.marker_canvas(cols, rows);
        let line = &self.view.reference_line;

        for cy in 0..rows {
            for cx in 0..cols {
                let bg = shade[cy * cols + cx];
                let cell = &mut buf[(area.x + cx as u16, area.y + cy as u16)];
                cell.set_char(' ').set_bg(bg.into());

                // Layers from back to front: outlines, 33°N line, markers
                if let Some((glyph, color)) = markers.cell(cx, cy) {
                    cell.set_char(glyph).set_fg(color.into());
                    continue;
                }
                let outline = outlines.glyph(cx, cy);
                let dash = reference.glyph(cx, cy);
                if dash != BLANK {
                    cell.set_char(merge_glyphs(outline, dash))
                        .set_fg(line.color.over(bg, line.opacity).into());
                } else if outline != BLANK {
                    cell.set_char(outline).set_fg(BOUNDARY_STROKE.into());
                }
            }
        }

        // Name of the selected marker, to its right
        if let Some(m) = self.view.markers.iter().find(|m| m.selected) {
            let c = self.viewport.to_canvas(m.center);
            let lx = (c.x / 2.0).floor() as i64 + 2;
            let ly = (c.y / 4.0).floor() as i64;
            if lx >= 0 && ly >= 0 && (ly as usize) < rows {
                let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
                for (i, ch) in m.name.chars().enumerate() {
                    let x = lx as usize + i;
                    if x >= cols {
                        break;
                    }
                    buf[(area.x + x as u16, area.y + ly as u16)].set_char(ch).set_style(style);
                }
            }
        }
    }
}

fn render_overlays(frame: &mut Frame, view: &MapView, inner: Rect) {
    if inner.width >= LEGEND_MIN_WIDTH {
        render_legend(frame, view, inner);
    }

    // Click hint, bottom-left
    if inner.height > 1 {
        let hint = Rect::new(inner.x + 1, inner.y + inner.height - 1, 26.min(inner.width), 1);
        frame.render_widget(
            Paragraph::new(Span::styled("CLICK MARKERS TO REVEAL", Style::default().fg(FAINT))),
            hint,
        );
    }

    // Phase caption, bottom-right, in the accent color
    if let Some(caption) = view.caption {
        let text = caption.to_uppercase();
        let width = (text.chars().count() as u16).min(inner.width);
        let rect = Rect::new(
            inner.x + inner.width - width,
            inner.y + inner.height.saturating_sub(1),
            width,
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(view.accent.into()))),
            rect,
        );
    }

    if let Some(ref detail) = view.detail {
        render_detail(frame, detail, detail_panel_rect(inner));
    }
}

fn render_legend(frame: &mut Frame, view: &MapView, inner: Rect) {
    let lines: Vec<Line> = view
        .legend
        .iter()
        .map(|entry| {
            let swatch = match entry.swatch {
                LegendSwatch::Dot => "●  ",
                LegendSwatch::DashedLine => "╌╌ ",
            };
            Line::from(vec![
                Span::styled(swatch, Style::default().fg(entry.color.into())),
                Span::styled(entry.label.to_uppercase(), Style::default().fg(MUTED)),
            ])
        })
        .collect();

    let width = 14;
    let height = lines.len() as u16;
    if inner.height <= height + 1 {
        return;
    }
    let rect = Rect::new(inner.x + inner.width - width - 1, inner.y + 1, width, height);
    frame.render_widget(Paragraph::new(lines), rect);
}

fn render_detail(frame: &mut Frame, detail: &DetailPanel, rect: Rect) {
    if rect.width < 10 || rect.height < 4 {
        return;
    }
    let accent: Color = detail.accent.into();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Color::Black));

    let body = vec![
        Line::from(Span::styled(detail.kicker(), Style::default().fg(accent))),
        Line::from(Span::styled(
            detail.name,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            detail.label,
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(detail.description, Style::default().fg(Color::Gray))),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
        rect,
    );

    let close = close_button_rect(rect);
    frame.render_widget(
        Paragraph::new(Span::styled("[x]", Style::default().fg(Color::Gray))),
        close,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, view: &MapView, area: Rect) {
    let phase = match view.caption {
        Some(_) => format!("{}/4", view.phase + 1),
        None => "none".to_string(),
    };
    let selected = app
        .map
        .selected_event()
        .map(|e| e.name)
        .unwrap_or("-");

    let status = Line::from(vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" Phase: ", Style::default().fg(Color::DarkGray)),
        Span::styled(phase, Style::default().fg(view.accent.into())),
        Span::styled(" Selected: ", Style::default().fg(Color::DarkGray)),
        Span::styled(selected, Style::default().fg(Color::White)),
        Span::styled(
            if app.boundaries.has_data() { "" } else { " [no boundaries]" },
            Style::default().fg(Color::Red),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(
            " | 1-4/n/p:phase 0:none []:marker hjkl:pan +/-:zoom r:reset esc:close q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
