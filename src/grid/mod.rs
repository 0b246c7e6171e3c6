mod color;
mod state;

pub use color::Color;
pub use state::{CellCoord, GridState};
