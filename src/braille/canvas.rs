use crate::geomap::Rgb;

/// Empty braille pattern (U+2800)
pub const BLANK: char = '\u{2800}';

/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 pixel grid (8 dots).
/// Unicode Braille patterns: U+2800 to U+28FF
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    cells: Vec<u8>, // Bit pattern per char, row-major
}

impl BrailleCanvas {
    /// Create a new canvas with the given character dimensions.
    /// Effective pixel resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0u8; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a pixel at the given coordinates.
    /// Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    /// Returns the cell index touched, if in bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize) -> Option<usize> {
        let cx = x / 2;
        let cy = y / 4;

        if cx >= self.width || cy >= self.height {
            return None;
        }

        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => 0,
        };

        let idx = cy * self.width + cx;
        self.cells[idx] |= bit;
        Some(idx)
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize)
        } else {
            None
        }
    }

    /// Braille glyph for a character cell (BLANK when out of range)
    pub fn glyph(&self, cx: usize, cy: usize) -> char {
        if cx >= self.width || cy >= self.height {
            return BLANK;
        }
        char::from_u32(0x2800 + self.cells[cy * self.width + cx] as u32).unwrap_or(BLANK)
    }

    /// Convert the canvas to a string of Braille characters
    #[cfg(test)]
    pub fn to_string(&self) -> String {
        (0..self.height)
            .map(|cy| (0..self.width).map(|cx| self.glyph(cx, cy)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pixel sink shared by the plain and colored canvases so the raster
/// primitives in `map::geometry` work on both.
pub trait Plot {
    fn plot(&mut self, x: i32, y: i32);
}

impl Plot for BrailleCanvas {
    fn plot(&mut self, x: i32, y: i32) {
        self.set_pixel_signed(x, y);
    }
}

/// Braille canvas where every cell also remembers the color of the last
/// primitive that touched it. Used for markers, where neighbouring glyphs
/// carry different category colors.
pub struct ColorCanvas {
    dots: BrailleCanvas,
    colors: Vec<Option<Rgb>>,
    pen: Rgb,
}

impl ColorCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            dots: BrailleCanvas::new(width, height),
            colors: vec![None; width * height],
            pen: Rgb::WHITE,
        }
    }

    /// Select the color used by subsequent plots
    pub fn set_pen(&mut self, color: Rgb) {
        self.pen = color;
    }

    /// Glyph and color of a cell, `None` when nothing was drawn there
    pub fn cell(&self, cx: usize, cy: usize) -> Option<(char, Rgb)> {
        if cx >= self.dots.width() || cy >= self.dots.height() {
            return None;
        }
        self.colors[cy * self.dots.width() + cx].map(|c| (self.dots.glyph(cx, cy), c))
    }

    pub fn width(&self) -> usize {
        self.dots.width()
    }

    pub fn height(&self) -> usize {
        self.dots.height()
    }
}

impl Plot for ColorCanvas {
    fn plot(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.dots.set_pixel_signed(x, y) {
            self.colors[idx] = Some(self.pen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0);
        assert_eq!(canvas.to_string(), "⠁"); // U+2801
    }

    #[test]
    fn test_all_dots() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for x in 0..2 {
            for y in 0..4 {
                canvas.set_pixel(x, y);
            }
        }
        assert_eq!(canvas.to_string(), "⣿"); // U+28FF (all dots)
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut canvas = BrailleCanvas::new(1, 1);
        assert_eq!(canvas.set_pixel(2, 0), None);
        assert_eq!(canvas.set_pixel_signed(-1, 0), None);
        assert_eq!(canvas.to_string(), "⠀");
    }

    #[test]
    fn test_color_canvas_last_writer_wins() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        let mut canvas = ColorCanvas::new(2, 1);
        canvas.set_pen(red);
        canvas.plot(0, 0);
        canvas.set_pen(blue);
        canvas.plot(1, 1);

        let (ch, color) = canvas.cell(0, 0).unwrap();
        assert_eq!(ch, '⠑'); // 0x01 | 0x10
        assert_eq!(color, blue);
        assert!(canvas.cell(1, 0).is_none());
    }
}
