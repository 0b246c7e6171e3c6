use std::time::Duration;

use crate::error::ViewError;
use crate::grid::Color;

/// Scale multiplier applied by one zoom-in step
pub const ZOOM_IN_FACTOR: f64 = 1.5;

/// Scale multiplier applied by one zoom-out step
pub const ZOOM_OUT_FACTOR: f64 = 2.0 / 3.0;

/// Screen pixels per grid cell when no scale is given
pub const DEFAULT_SCALE: f64 = 1.0;

/// Surface color behind the grid
pub const BACKGROUND_COLOR: Color = Color::BLACK;

/// Color every cell starts with
pub const INITIAL_CELL_COLOR: Color = Color::WHITE;

/// Crosshair color for the reference frame overlay
pub const FRAME_COLOR: Color = Color::GRAY;

/// How often the host simulation is stepped by the event loop
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(100);

pub const DEFAULT_TITLE: &str = "Cellular Automata";

/// Touchpad scroll distance, in pixels, that counts as one wheel notch
pub const PIXELS_PER_WHEEL_STEP: f64 = 50.0;

// ============================================
// Demo host
// ============================================

/// Demo grid dimensions
pub const DEMO_GRID_WIDTH: u32 = 160;
pub const DEMO_GRID_HEIGHT: u32 = 120;

/// Demo screen pixels per cell
pub const DEMO_SCALE: f64 = 5.0;

/// Number of wanderers painting trails in the demo
pub const DEMO_WANDERERS: usize = 24;

/// Which wheel direction zooms out.
///
/// With `DownZoomsOut`, rotating the wheel toward the user shrinks the grid.
/// `DownZoomsIn` matches map-style viewers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WheelZoom {
    #[default]
    DownZoomsOut,
    DownZoomsIn,
}

/// Construction parameters for a grid view.
#[derive(Clone, Debug)]
pub struct ViewConfig {
    /// Cells along the x axis
    pub width: u32,
    /// Cells along the y axis
    pub height: u32,
    /// Initial screen pixels per cell
    pub scale: f64,
    /// Initial window position in screen pixels, if any
    pub position: Option<(i32, i32)>,
    pub title: String,
    pub draw_reference_frame: bool,
    pub wheel_zoom: WheelZoom,
    pub background: Color,
    pub initial_color: Color,
    pub frame_color: Color,
    pub step_interval: Duration,
}

impl ViewConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: DEFAULT_SCALE,
            position: None,
            title: DEFAULT_TITLE.to_string(),
            draw_reference_frame: true,
            wheel_zoom: WheelZoom::default(),
            background: BACKGROUND_COLOR,
            initial_color: INITIAL_CELL_COLOR,
            frame_color: FRAME_COLOR,
            step_interval: DEFAULT_STEP_INTERVAL,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_reference_frame(mut self, draw: bool) -> Self {
        self.draw_reference_frame = draw;
        self
    }

    pub fn with_wheel_zoom(mut self, wheel_zoom: WheelZoom) -> Self {
        self.wheel_zoom = wheel_zoom;
        self
    }

    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    /// Surface size that shows the whole grid at the initial scale
    pub fn surface_size(&self) -> (u32, u32) {
        (
            ((self.width as f64 * self.scale) as u32).max(1),
            ((self.height as f64 * self.scale) as u32).max(1),
        )
    }

    /// Reject dimensions and scales no view can be built from
    pub fn validate(&self) -> Result<(), ViewError> {
        if self.width == 0 || self.height == 0 {
            return Err(ViewError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ViewError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_factors_are_inverse() {
        assert!((ZOOM_IN_FACTOR * ZOOM_OUT_FACTOR - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_surface_size_follows_scale() {
        let config = ViewConfig::new(10, 20).with_scale(4.0);
        assert_eq!(config.surface_size(), (40, 80));
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let err = ViewConfig::new(0, 5).validate().unwrap_err();
        assert!(matches!(err, ViewError::InvalidDimensions { width: 0, height: 5 }));
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        for scale in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let config = ViewConfig::new(3, 3).with_scale(scale);
            assert!(matches!(config.validate(), Err(ViewError::InvalidScale(_))));
        }
    }

    #[test]
    fn test_defaults() {
        let config = ViewConfig::new(8, 8);
        assert!(config.draw_reference_frame);
        assert_eq!(config.wheel_zoom, WheelZoom::DownZoomsOut);
        assert_eq!(config.scale, DEFAULT_SCALE);
        assert!(config.position.is_none());
        assert!(config.validate().is_ok());
    }
}
