use kurbo::Point;

use crate::config::WheelZoom;
use crate::error::ViewError;
use crate::grid::GridState;
use crate::view::input::{InputEvent, WheelDirection};
use crate::view::transform::ViewTransform;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum PointerState {
    #[default]
    Idle,
    Pressed {
        origin: Point,
    },
}

/// What the view has to do after an event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Nothing,
    /// The transform changed: redraw everything and present
    Redraw,
    /// New pointer readout for the coordinate label
    Label(String),
}

/// Turns input events into transform updates.
///
/// Dragging pans once, on release, by the total displacement since the press.
/// Pointer motion with no button held only updates the coordinate readout.
#[derive(Clone, Debug, Default)]
pub struct Controller {
    pointer: PointerState,
    wheel_zoom: WheelZoom,
}

impl Controller {
    pub fn new(wheel_zoom: WheelZoom) -> Self {
        Self {
            pointer: PointerState::Idle,
            wheel_zoom,
        }
    }

    /// True between a press and its release
    pub fn is_dragging(&self) -> bool {
        matches!(self.pointer, PointerState::Pressed { .. })
    }

    pub fn handle(
        &mut self,
        event: &InputEvent,
        transform: &mut ViewTransform,
        grid: &GridState,
    ) -> Response {
        match *event {
            InputEvent::Press(position) => {
                self.pointer = PointerState::Pressed { origin: position };
                Response::Nothing
            }
            InputEvent::Release(position) => {
                let PointerState::Pressed { origin } = std::mem::take(&mut self.pointer) else {
                    return Response::Nothing;
                };
                transform.pan(position - origin);
                log::debug!("Panned, transform: {:?}", transform.affine());
                Response::Redraw
            }
            InputEvent::Move(position) => {
                if self.is_dragging() {
                    return Response::Nothing;
                }
                match coordinate_label(transform, grid, position) {
                    Ok(label) => Response::Label(label),
                    Err(e) => {
                        log::error!("Cannot map pointer at {:?} to the grid: {}", position, e);
                        Response::Nothing
                    }
                }
            }
            InputEvent::Wheel(direction) => {
                let zoom_out = matches!(
                    (direction, self.wheel_zoom),
                    (WheelDirection::Down, WheelZoom::DownZoomsOut)
                        | (WheelDirection::Up, WheelZoom::DownZoomsIn)
                );
                zoom(transform, zoom_out);
                Response::Redraw
            }
            InputEvent::Key('-') => {
                zoom(transform, true);
                Response::Redraw
            }
            InputEvent::Key('=') => {
                zoom(transform, false);
                Response::Redraw
            }
            InputEvent::Key(c) => {
                log::trace!("{:?} is typed", c);
                Response::Nothing
            }
            InputEvent::Resize { width, height } => {
                transform.resize(width, height);
                log::debug!("Resized to {}x{}, transform: {:?}", width, height, transform.affine());
                Response::Redraw
            }
        }
    }
}

fn zoom(transform: &mut ViewTransform, out: bool) {
    if out {
        transform.zoom_out();
    } else {
        transform.zoom_in();
    }
    log::debug!("Zoomed to {:.3}, transform: {:?}", transform.scale(), transform.affine());
}

/// Readout for a screen position: `x=<gx> y=<gy> <text>`
pub fn coordinate_label(
    transform: &ViewTransform,
    grid: &GridState,
    position: Point,
) -> Result<String, ViewError> {
    let p = transform.screen_to_grid(position)?;
    let (gx, gy) = (p.x.floor() as i64, p.y.floor() as i64);
    let text = grid.text(gx, gy).unwrap_or("");
    Ok(format!("x={} y={} {}", gx, gy, text))
}
