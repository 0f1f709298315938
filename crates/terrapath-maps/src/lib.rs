//! Map construction and reporting around the terrapath search core.
//!
//! - [`sample_map`]: a fixed 15×15 demonstration map.
//! - [`MapGen`]: random maps drawn from weighted terrain plus road seeds.
//! - [`render`]: plain-text rendering of a grid with path and closed-set
//!   overlays.
//! - [`compare`]: runs both searches and tabulates the outcome.

pub mod compare;
pub mod mapgen;
pub mod render;
pub mod sample;

pub use compare::{AlgorithmReport, Comparison, compare};
pub use mapgen::{MapConfig, MapConfigError, MapGen};
pub use render::{Mark, RenderOverlay, legend, marks, render};
pub use sample::{SAMPLE_END, SAMPLE_START, sample_map};
