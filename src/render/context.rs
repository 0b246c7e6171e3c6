use kurbo::{Affine, Line, Point, Rect};

use crate::grid::Color;
use crate::render::framebuffer::Framebuffer;

/// Exclusive drawing access to a surface's back buffer.
///
/// Shapes are given in user space and mapped through the current transform.
/// The context borrows the buffer, so it is released on every exit path when
/// it goes out of scope.
pub struct DrawContext<'a> {
    target: &'a mut Framebuffer,
    transform: Affine,
}

impl<'a> DrawContext<'a> {
    pub fn new(target: &'a mut Framebuffer) -> Self {
        log::trace!("Acquired draw context ({}x{})", target.width(), target.height());
        Self {
            target,
            transform: Affine::IDENTITY,
        }
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Fill the whole buffer, ignoring the transform
    pub fn clear(&mut self, color: Color) {
        self.target.fill(color);
    }

    /// Fill every pixel whose center lies inside the transformed rectangle
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let bounds = self.transform.transform_rect_bbox(rect);
        if !bounds.is_finite() {
            return;
        }
        self.target.fill_block(
            (bounds.x0 - 0.5).ceil() as i64,
            (bounds.y0 - 0.5).ceil() as i64,
            (bounds.x1 - 0.5).ceil() as i64,
            (bounds.y1 - 0.5).ceil() as i64,
            color,
        );
    }

    /// Draw a one-pixel line through the transformed endpoints
    pub fn stroke_line(&mut self, line: Line, color: Color) {
        let p0 = self.transform * line.p0;
        let p1 = self.transform * line.p1;
        let bounds = Rect::new(
            0.0,
            0.0,
            self.target.width() as f64,
            self.target.height() as f64,
        );
        let Some((p0, p1)) = clip_line(p0, p1, bounds) else {
            return;
        };

        // One pixel per column for flat lines, one per row for steep ones
        let d = p1 - p0;
        if d.x.abs() >= d.y.abs() {
            if d.x == 0.0 {
                self.target
                    .set_pixel(p0.x.floor() as i64, p0.y.floor() as i64, color);
                return;
            }
            let (start, end) = (p0.x.min(p1.x).floor() as i64, p0.x.max(p1.x).floor() as i64);
            for px in start..=end {
                let t = ((px as f64 + 0.5 - p0.x) / d.x).clamp(0.0, 1.0);
                let y = p0.y + d.y * t;
                self.target.set_pixel(px, y.floor() as i64, color);
            }
        } else {
            let (start, end) = (p0.y.min(p1.y).floor() as i64, p0.y.max(p1.y).floor() as i64);
            for py in start..=end {
                let t = ((py as f64 + 0.5 - p0.y) / d.y).clamp(0.0, 1.0);
                let x = p0.x + d.x * t;
                self.target.set_pixel(x.floor() as i64, py, color);
            }
        }
    }
}

impl Drop for DrawContext<'_> {
    fn drop(&mut self) {
        log::trace!("Released draw context");
    }
}

/// Liang-Barsky clip of a segment against `bounds`
fn clip_line(p0: Point, p1: Point, bounds: Rect) -> Option<(Point, Point)> {
    if !(p0.is_finite() && p1.is_finite()) {
        return None;
    }
    let d = p1 - p0;
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-d.x, p0.x - bounds.x0),
        (d.x, bounds.x1 - p0.x),
        (-d.y, p0.y - bounds.y0),
        (d.y, bounds.y1 - p0.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((p0 + d * t0, p0 + d * t1))
}
