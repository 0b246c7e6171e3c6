mod controller;
mod input;
mod transform;
mod widget;

pub use controller::{coordinate_label, Controller, Response};
pub use input::{InputEvent, WheelAccumulator, WheelDirection};
pub use transform::{ReferenceFrame, ViewTransform};
pub use widget::GridView;
