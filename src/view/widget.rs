use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::grid::{Color, GridState};
use crate::render::{Renderer, Surface};
use crate::view::controller::{Controller, Response};
use crate::view::input::InputEvent;
use crate::view::transform::ViewTransform;

/// A pannable, zoomable view of a cell grid on some surface.
///
/// The host simulation writes colors and labels, then decides when to draw
/// (`draw_dirty_cells` or `draw_whole_space`) and when to `present`. Input
/// events go through [`handle`](GridView::handle), which redraws and presents
/// on its own whenever the view moves.
pub struct GridView<S> {
    config: ViewConfig,
    grid: GridState,
    transform: ViewTransform,
    renderer: Renderer<S>,
    controller: Controller,
    title: String,
    label: String,
}

impl<S: Surface> GridView<S> {
    /// Build a view with every cell at the configured initial color.
    ///
    /// The grid is centered on the surface and drawn into the back buffer,
    /// ready for the first `present`.
    pub fn new(config: &ViewConfig, surface: S) -> Result<Self, ViewError> {
        config.validate()?;
        let grid = GridState::new(config.width, config.height, config.initial_color);
        Ok(Self::with_grid(config.clone(), grid, surface))
    }

    /// Independent view showing a deep copy of another view's colors and labels,
    /// with a fresh transform on a new surface
    pub fn from_view<T: Surface>(original: &GridView<T>, surface: S) -> Self {
        Self::with_grid(original.config.clone(), original.grid.snapshot(), surface)
    }

    fn with_grid(config: ViewConfig, grid: GridState, surface: S) -> Self {
        let mut view = Self {
            transform: ViewTransform::new(config.width, config.height, config.scale),
            renderer: Renderer::new(surface, &config),
            controller: Controller::new(config.wheel_zoom),
            title: config.title.clone(),
            label: String::new(),
            grid,
            config,
        };
        let (width, height) = view.renderer.surface().size();
        view.transform.resize(width, height);
        view.renderer.surface_mut().set_title(&view.title);
        view.draw_whole_space();
        view
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.renderer.surface_mut()
    }

    /// Store a cell color for the next incremental draw. Nothing is drawn yet.
    pub fn set_cell_color(&mut self, x: i64, y: i64, color: Color) {
        self.grid.set_color(x, y, color);
    }

    /// Attach a label shown when the pointer hovers the cell
    pub fn set_cell_text(&mut self, x: i64, y: i64, text: impl Into<String>) {
        self.grid.set_text(x, y, text);
    }

    /// Store a color and draw that cell into the back buffer right away
    pub fn draw_cell(&mut self, x: i64, y: i64, color: Color) {
        self.renderer
            .draw_cell(&mut self.grid, &self.transform, x, y, color);
    }

    pub fn draw_dirty_cells(&mut self) {
        self.renderer.draw_dirty(&mut self.grid, &self.transform);
    }

    pub fn draw_whole_space(&mut self) {
        self.renderer.draw_full(&mut self.grid, &self.transform);
    }

    pub fn present(&mut self) -> Result<(), ViewError> {
        self.renderer.present()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.renderer.surface_mut().set_title(&self.title);
    }

    /// Last pointer readout
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn draws_reference_frame(&self) -> bool {
        self.renderer.draws_reference_frame()
    }

    /// Takes effect on the next draw
    pub fn set_draw_reference_frame(&mut self, draw: bool) {
        self.renderer.set_draw_reference_frame(draw);
    }

    /// Apply one input event. Presentation failures are logged, never returned.
    pub fn handle(&mut self, event: &InputEvent) {
        if let InputEvent::Resize { width, height } = *event {
            self.renderer.surface_mut().resize(width, height);
        }

        match self.controller.handle(event, &mut self.transform, &self.grid) {
            Response::Nothing => {}
            Response::Redraw => {
                self.draw_whole_space();
                if let Err(e) = self.present() {
                    log::error!("Failed to present after {:?}: {}", event, e);
                }
            }
            Response::Label(label) => {
                self.renderer.surface_mut().set_label(&label);
                self.label = label;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessSurface;
    use kurbo::Point;

    fn view(width: u32, height: u32, scale: f64, frame: bool) -> GridView<HeadlessSurface> {
        let config = ViewConfig::new(width, height)
            .with_scale(scale)
            .with_reference_frame(frame);
        let (w, h) = config.surface_size();
        GridView::new(&config, HeadlessSurface::new(w, h)).unwrap()
    }

    /// Presented pixel under the middle of a cell
    fn presented_cell(view: &GridView<HeadlessSurface>, x: u32, y: u32) -> Option<Color> {
        let p = view
            .transform()
            .grid_to_screen(Point::new(x as f64 + 0.5, y as f64 + 0.5));
        view.surface().front().pixel(p.x.floor() as u32, p.y.floor() as u32)
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ViewConfig::new(0, 10);
        assert!(matches!(
            GridView::new(&config, HeadlessSurface::new(1, 1)),
            Err(ViewError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_single_red_cell_end_to_end() {
        let mut view = view(10, 10, 4.0, false);
        view.set_cell_color(5, 5, Color::RED);
        view.draw_dirty_cells();
        view.present().unwrap();

        let front = view.surface().front();
        for py in 0..40 {
            for px in 0..40 {
                // Cell (5, 5) covers x in [20, 24) and, flipped, y in [16, 20)
                let expected = if (20..24).contains(&px) && (16..20).contains(&py) {
                    Color::RED
                } else {
                    Color::WHITE
                };
                assert_eq!(front.pixel(px, py), Some(expected), "pixel ({}, {})", px, py);
            }
        }
    }

    #[test]
    fn test_every_cell_color_reaches_screen() {
        let mut view = view(8, 6, 3.0, true);
        for x in 0..8u8 {
            for y in 0..6u8 {
                view.set_cell_color(x as i64, y as i64, Color::rgb(x * 30, y * 40, 7));
            }
        }
        view.draw_dirty_cells();
        view.present().unwrap();

        for x in 0..8u8 {
            for y in 0..6u8 {
                assert_eq!(
                    presented_cell(&view, x as u32, y as u32),
                    Some(Color::rgb(x * 30, y * 40, 7))
                );
            }
        }
    }

    #[test]
    fn test_out_of_bounds_writes_leave_grid_unchanged() {
        let mut view = view(4, 4, 1.0, false);
        view.set_cell_color(-1, 0, Color::RED);
        view.set_cell_color(4, 0, Color::RED);
        view.set_cell_text(0, 4, "nope");
        view.draw_cell(-3, 2, Color::RED);

        assert!(view.grid().dirty().is_empty());
        assert!(view.grid().cells().all(|(_, color)| color == Color::WHITE));
    }

    #[test]
    fn test_dirty_set_is_drained() {
        let mut view = view(5, 5, 2.0, false);
        view.set_cell_color(1, 1, Color::RED);
        view.set_cell_color(1, 1, Color::GREEN);
        view.set_cell_color(2, 3, Color::BLUE);
        assert_eq!(view.grid().dirty().len(), 2);

        view.draw_dirty_cells();
        assert!(view.grid().dirty().is_empty());

        view.set_cell_color(0, 0, Color::RED);
        view.draw_whole_space();
        assert!(view.grid().dirty().is_empty());
    }

    #[test]
    fn test_nothing_is_visible_before_present() {
        let mut view = view(3, 3, 2.0, false);
        view.set_cell_color(0, 0, Color::RED);
        view.draw_dirty_cells();
        assert_eq!(presented_cell(&view, 0, 0), Some(Color::BLACK));
        view.present().unwrap();
        assert_eq!(presented_cell(&view, 0, 0), Some(Color::RED));
    }

    #[test]
    fn test_clone_construction_copies_grid() {
        let mut original = view(6, 6, 2.0, false);
        original.set_cell_color(1, 2, Color::BLUE);
        original.set_cell_text(1, 2, "seed");
        original.handle(&InputEvent::Key('='));

        let mut copy = GridView::from_view(&original, HeadlessSurface::new(12, 12));
        assert_eq!(copy.grid().color(1, 2), Some(Color::BLUE));
        assert_eq!(copy.grid().text(1, 2), Some("seed"));
        assert!((copy.transform().scale() - 2.0).abs() < 1e-9);

        copy.set_cell_color(1, 2, Color::RED);
        copy.set_cell_text(1, 2, "copy");
        assert_eq!(original.grid().color(1, 2), Some(Color::BLUE));
        assert_eq!(original.grid().text(1, 2), Some("seed"));

        copy.present().unwrap();
        assert_eq!(presented_cell(&copy, 1, 2), Some(Color::BLUE));
    }

    #[test]
    fn test_zoom_key_redraws_and_presents() {
        let mut view = view(10, 10, 4.0, false);
        view.handle(&InputEvent::Key('-'));

        assert_eq!(view.surface().present_count(), 1);
        // Zoomed out around the surface center: the corners now show background
        assert_eq!(view.surface().front().pixel(0, 0), Some(Color::BLACK));
        assert_eq!(view.surface().front().pixel(20, 20), Some(Color::WHITE));
    }

    #[test]
    fn test_hover_updates_label() {
        let mut view = view(10, 10, 4.0, false);
        view.set_cell_text(3, 6, "hello");
        view.handle(&InputEvent::Move(Point::new(13.0, 15.0)));
        assert_eq!(view.label(), "x=3 y=6 hello");
        assert_eq!(view.surface().label(), "x=3 y=6 hello");
        assert_eq!(view.surface().present_count(), 0);
    }

    #[test]
    fn test_collapsed_transform_keeps_label() {
        let mut view = view(2, 2, 1.0, false);
        view.set_cell_text(0, 1, "top");
        view.handle(&InputEvent::Move(Point::new(0.5, 0.5)));
        assert_eq!(view.label(), "x=0 y=1 top");

        for _ in 0..2500 {
            view.handle(&InputEvent::Key('-'));
        }
        assert!(view.transform().screen_to_grid(Point::new(1.0, 1.0)).is_err());

        view.handle(&InputEvent::Move(Point::new(1.5, 1.5)));
        assert_eq!(view.label(), "x=0 y=1 top");
        assert_eq!(view.surface().label(), "x=0 y=1 top");
    }

    #[test]
    fn test_resize_keeps_zoom_and_centers() {
        let mut view = view(10, 10, 4.0, false);
        view.handle(&InputEvent::Key('='));
        view.handle(&InputEvent::Resize { width: 100, height: 80 });

        assert_eq!(view.surface().size(), (100, 80));
        assert!((view.transform().scale() - 6.0).abs() < 1e-9);
        // 60x60 pixel grid centered in a 100x80 surface
        let front = view.surface().front();
        assert_eq!(front.pixel(19, 40), Some(Color::BLACK));
        assert_eq!(front.pixel(20, 40), Some(Color::WHITE));
        assert_eq!(front.pixel(79, 40), Some(Color::WHITE));
        assert_eq!(front.pixel(80, 40), Some(Color::BLACK));
    }

    #[test]
    fn test_drag_pans_view() {
        let mut view = view(10, 10, 4.0, false);
        view.handle(&InputEvent::Press(Point::new(5.0, 5.0)));
        view.handle(&InputEvent::Move(Point::new(9.0, 9.0)));
        assert_eq!(view.surface().present_count(), 0);
        view.handle(&InputEvent::Release(Point::new(15.0, 5.0)));

        assert_eq!(view.surface().present_count(), 1);
        let front = view.surface().front();
        assert_eq!(front.pixel(9, 0), Some(Color::BLACK));
        assert_eq!(front.pixel(10, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_title_and_reference_frame_settings() {
        let mut view = view(4, 4, 1.0, true);
        assert_eq!(view.title(), crate::config::DEFAULT_TITLE);
        view.set_title("Generation 12");
        assert_eq!(view.surface().title(), "Generation 12");

        assert!(view.draws_reference_frame());
        view.set_draw_reference_frame(false);
        assert!(!view.draws_reference_frame());
        assert_eq!(view.width(), 4);
        assert_eq!(view.height(), 4);
    }
}
