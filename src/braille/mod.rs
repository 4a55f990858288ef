mod canvas;

pub use canvas::{BrailleCanvas, ColorCanvas, Plot, BLANK};
