//! Terminal world map of events along the 33rd parallel.
//!
//! The [`geomap`] component is a pure function of the caller's phase and
//! accent color plus its own marker selection; [`map`] holds projection and
//! rasterization, [`data`] loads the boundary dataset, and [`app`]/[`ui`]
//! are the terminal shell around them.

pub mod app;
pub mod braille;
pub mod config;
pub mod data;
pub mod error;
pub mod geomap;
pub mod map;
pub mod ui;
