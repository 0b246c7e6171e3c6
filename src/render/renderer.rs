use kurbo::{Affine, Rect};

use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::grid::{CellCoord, Color, GridState};
use crate::render::context::DrawContext;
use crate::render::surface::Surface;
use crate::view::ViewTransform;

/// Draws grid cells into a surface's back buffer and presents it
pub struct Renderer<S> {
    surface: S,
    background: Color,
    frame_color: Color,
    draw_reference_frame: bool,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S, config: &ViewConfig) -> Self {
        Self {
            surface,
            background: config.background,
            frame_color: config.frame_color,
            draw_reference_frame: config.draw_reference_frame,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn draws_reference_frame(&self) -> bool {
        self.draw_reference_frame
    }

    pub fn set_draw_reference_frame(&mut self, draw: bool) {
        self.draw_reference_frame = draw;
    }

    /// Clear to the background and draw every cell. Pending dirty cells are covered too.
    pub fn draw_full(&mut self, grid: &mut GridState, transform: &ViewTransform) {
        let mut ctx = self.surface.begin_draw();
        ctx.clear(self.background);
        ctx.set_transform(transform.affine());

        for (cell, color) in grid.cells() {
            fill_cell(&mut ctx, cell, color);
        }

        if self.draw_reference_frame {
            draw_reference_frame(&mut ctx, transform, self.frame_color);
        }
        drop(ctx);

        grid.clear_dirty();
    }

    /// Draw only the cells changed since the last draw, leaving every other pixel as is
    pub fn draw_dirty(&mut self, grid: &mut GridState, transform: &ViewTransform) {
        let dirty = grid.take_dirty();
        let mut ctx = self.surface.begin_draw();
        ctx.set_transform(transform.affine());

        for &cell in &dirty {
            fill_cell(&mut ctx, cell, grid.cell_color(cell));
        }

        if self.draw_reference_frame {
            draw_reference_frame(&mut ctx, transform, self.frame_color);
        }
        log::trace!("Drew {} dirty cells", dirty.len());
    }

    /// Store a color and draw that one cell immediately, bypassing the dirty set
    pub fn draw_cell(
        &mut self,
        grid: &mut GridState,
        transform: &ViewTransform,
        x: i64,
        y: i64,
        color: Color,
    ) {
        let Some(cell) = grid.cell_at(x, y) else {
            log::trace!("Ignoring draw outside grid at ({}, {})", x, y);
            return;
        };
        grid.store_color(cell, color);

        let mut ctx = self.surface.begin_draw();
        ctx.set_transform(transform.affine());
        fill_cell(&mut ctx, cell, color);
        if self.draw_reference_frame {
            draw_reference_frame(&mut ctx, transform, self.frame_color);
        }
    }

    pub fn present(&mut self) -> Result<(), ViewError> {
        self.surface.present()
    }
}

fn fill_cell(ctx: &mut DrawContext<'_>, (x, y): CellCoord, color: Color) {
    let (x, y) = (x as f64, y as f64);
    ctx.fill_rect(Rect::new(x, y, x + 1.0, y + 1.0), color);
}

/// Crosshair computed in screen space and stroked under the identity transform,
/// so line width does not follow the zoom level
fn draw_reference_frame(ctx: &mut DrawContext<'_>, transform: &ViewTransform, color: Color) {
    let frame = transform.reference_frame();
    let saved = ctx.transform();
    ctx.set_transform(Affine::IDENTITY);
    ctx.stroke_line(frame.horizontal, color);
    ctx.stroke_line(frame.vertical, color);
    ctx.set_transform(saved);
}
