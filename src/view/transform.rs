use kurbo::{Affine, Line, Point, Vec2};

use crate::config::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::error::ViewError;

/// Affine map from grid space (y up, one unit per cell) to screen space (y down, pixels).
///
/// The map is built as translate ∘ scale ∘ flip and afterwards only ever
/// changes in two ways: a uniform scale applied in grid space (zoom), and a
/// translation prepended in screen space (recentering). Recentering keeps the
/// grid centroid pinned to `desired_center`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
    grid_width: u32,
    grid_height: u32,
    affine: Affine,
    desired_center: Point,
}

/// Crosshair through the grid center, in screen space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceFrame {
    pub horizontal: Line,
    pub vertical: Line,
}

impl ViewTransform {
    /// Build the initial transform: cell (0, 0) sits at the bottom-left corner
    /// of a `width * scale` by `height * scale` pixel area anchored at the origin.
    pub fn new(width: u32, height: u32, scale: f64) -> Self {
        let affine = Affine::translate((0.0, height as f64 * scale))
            * Affine::scale(scale)
            * Affine::FLIP_Y;
        let mut transform = Self {
            grid_width: width,
            grid_height: height,
            affine,
            desired_center: Point::ZERO,
        };
        transform.desired_center = transform.grid_to_screen(transform.grid_center());
        transform
    }

    /// Grid point kept at the desired screen center.
    ///
    /// Uses integer halves, so for odd dimensions this is the corner of the
    /// middle cell rather than its midpoint.
    pub fn grid_center(&self) -> Point {
        Point::new((self.grid_width / 2) as f64, (self.grid_height / 2) as f64)
    }

    pub fn affine(&self) -> Affine {
        self.affine
    }

    pub fn desired_center(&self) -> Point {
        self.desired_center
    }

    /// Current uniform scale in pixels per cell
    pub fn scale(&self) -> f64 {
        self.affine.determinant().abs().sqrt()
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(ZOOM_OUT_FACTOR);
    }

    /// Scale relative to the current scale, then pin the grid center again
    fn zoom_by(&mut self, factor: f64) {
        self.affine = self.affine * Affine::scale(factor);
        self.recenter(self.desired_center);
    }

    /// Translate so the grid center lands exactly on `desired`. Scale is untouched.
    pub fn recenter(&mut self, desired: Point) {
        self.desired_center = desired;
        let current = self.affine * self.grid_center();
        self.affine = Affine::translate(desired - current) * self.affine;
    }

    /// Move the desired center by a screen-space delta and recenter
    pub fn pan(&mut self, delta: Vec2) {
        self.recenter(self.desired_center + delta);
    }

    /// Recenter on the middle of a surface of the given pixel size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.recenter(Point::new((width / 2) as f64, (height / 2) as f64));
    }

    pub fn grid_to_screen(&self, point: Point) -> Point {
        self.affine * point
    }

    /// Inverse of [`grid_to_screen`](Self::grid_to_screen).
    ///
    /// Fails only if the scale has collapsed to zero.
    pub fn screen_to_grid(&self, point: Point) -> Result<Point, ViewError> {
        let det = self.affine.determinant();
        if !det.is_finite() || det.abs() < f64::MIN_POSITIVE {
            return Err(ViewError::NonInvertibleTransform);
        }
        Ok(self.affine.inverse() * point)
    }

    /// Crosshair through row `height / 2` and column `width / 2`, mapped to screen space
    pub fn reference_frame(&self) -> ReferenceFrame {
        let center = self.grid_center();
        let right = self.grid_width.saturating_sub(1) as f64;
        let top = self.grid_height.saturating_sub(1) as f64;
        ReferenceFrame {
            horizontal: Line::new(
                self.grid_to_screen(Point::new(0.0, center.y)),
                self.grid_to_screen(Point::new(right, center.y)),
            ),
            vertical: Line::new(
                self.grid_to_screen(Point::new(center.x, 0.0)),
                self.grid_to_screen(Point::new(center.x, top)),
            ),
        }
    }
}
