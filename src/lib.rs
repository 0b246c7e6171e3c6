//! Pannable, zoomable viewer for the state of a 2D cellular automaton.
//!
//! A host simulation owns the rules; this crate keeps one color and an
//! optional label per cell, draws them through an affine view transform, and
//! turns pointer and keyboard input into pan, zoom and coordinate readouts.

pub mod app;
pub mod config;
pub mod error;
pub mod gpu;
pub mod grid;
pub mod render;
pub mod view;

pub use app::{run, Host, ViewerApp};
pub use config::{ViewConfig, WheelZoom};
pub use error::ViewError;
pub use grid::{Color, GridState};
pub use render::{HeadlessSurface, Surface};
pub use view::{GridView, InputEvent, ViewTransform, WheelDirection};
