mod geometry;
pub mod heat;
mod projection;
mod renderer;
mod spatial;

pub use geometry::{draw_circle, draw_dashed_line, draw_line, draw_ring};
pub use projection::{MercatorProjection, Viewport};
pub use renderer::{CellFill, MapRenderer, Polygon, Ring};
pub use spatial::{BBox, FeatureGrid};
