use crate::braille::Plot;

/// Draw a line using Bresenham's algorithm
pub fn draw_line<C: Plot>(canvas: &mut C, x0: i32, y0: i32, x1: i32, y1: i32) {
    draw_pattern_line(canvas, x0, y0, x1, y1, |_| true);
}

/// Draw a dashed line: `on` pixels drawn, `off` pixels skipped, repeating.
/// A zero-length pattern draws a solid line.
pub fn draw_dashed_line<C: Plot>(canvas: &mut C, x0: i32, y0: i32, x1: i32, y1: i32, on: u32, off: u32) {
    let period = on + off;
    if period == 0 || off == 0 {
        draw_line(canvas, x0, y0, x1, y1);
        return;
    }
    draw_pattern_line(canvas, x0, y0, x1, y1, |step| step % period < on);
}

fn draw_pattern_line<C: Plot>(
    canvas: &mut C,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    mut visible: impl FnMut(u32) -> bool,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;
    let mut step = 0u32;

    loop {
        if visible(step) {
            canvas.plot(x, y);
        }
        step = step.wrapping_add(1);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled circle (marker core dots)
pub fn draw_circle<C: Plot>(canvas: &mut C, cx: i32, cy: i32, radius: i32) {
    let radius = radius.max(0);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.plot(cx + dx, cy + dy);
            }
        }
    }
}

/// Draw a circle outline of the given stroke width (marker rings).
/// Pixels whose distance from the center lies in
/// `[radius - width/2, radius + width/2]` are set.
pub fn draw_ring<C: Plot>(canvas: &mut C, cx: f64, cy: f64, radius: f64, width: f64) {
    let half = (width / 2.0).max(0.5);
    let inner = (radius - half).max(0.0);
    let outer = radius + half;
    let reach = outer.ceil() as i32 + 1;
    let (ox, oy) = (cx.floor() as i32, cy.floor() as i32);

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let px = ox + dx;
            let py = oy + dy;
            // Sample pixel centers
            let d = ((px as f64 + 0.5 - cx).powi(2) + (py as f64 + 0.5 - cy).powi(2)).sqrt();
            if d >= inner && d <= outer {
                canvas.plot(px, py);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::braille::BrailleCanvas;

    /// Records plotted pixels for exact assertions
    struct Recorder(Vec<(i32, i32)>);

    impl Plot for Recorder {
        fn plot(&mut self, x: i32, y: i32) {
            self.0.push((x, y));
        }
    }

    #[test]
    fn test_horizontal_line() {
        let mut rec = Recorder(Vec::new());
        draw_line(&mut rec, 0, 0, 9, 0);
        assert_eq!(rec.0.len(), 10);
        assert!(rec.0.iter().all(|&(_, y)| y == 0));
    }

    #[test]
    fn test_vertical_line_on_canvas() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_dashed_line_pattern() {
        let mut rec = Recorder(Vec::new());
        draw_dashed_line(&mut rec, 0, 0, 21, 0, 6, 5);
        let xs: Vec<i32> = rec.0.iter().map(|p| p.0).collect();
        let expected: Vec<i32> = (0..=21).filter(|x| x % 11 < 6).collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn test_dashed_without_gap_is_solid() {
        let mut rec = Recorder(Vec::new());
        draw_dashed_line(&mut rec, 0, 0, 4, 0, 3, 0);
        assert_eq!(rec.0.len(), 5);
    }

    #[test]
    fn test_ring_is_hollow() {
        let mut rec = Recorder(Vec::new());
        draw_ring(&mut rec, 10.0, 10.0, 5.0, 1.0);
        assert!(!rec.0.is_empty());
        assert!(!rec.0.contains(&(10, 10)));
        for &(x, y) in &rec.0 {
            let d = ((x as f64 + 0.5 - 10.0).powi(2) + (y as f64 + 0.5 - 10.0).powi(2)).sqrt();
            assert!((4.5..=5.5).contains(&d));
        }
    }

    #[test]
    fn test_filled_circle_contains_center() {
        let mut rec = Recorder(Vec::new());
        draw_circle(&mut rec, 3, 3, 2);
        assert!(rec.0.contains(&(3, 3)));
        assert!(rec.0.contains(&(5, 3)));
        assert!(!rec.0.contains(&(5, 5)));
    }
}
