use kurbo::Point;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::gpu::WindowSurface;
use crate::render::Surface;
use crate::view::{GridView, InputEvent, WheelAccumulator};

/// A simulation driving a grid view.
///
/// The host owns drawing: after writing cells it calls `draw_dirty_cells`
/// (or `draw_whole_space`) and `present` itself.
pub trait Host {
    /// Called once, right after the view is created
    fn init<S: Surface>(&mut self, view: &mut GridView<S>) {
        let _ = view;
    }

    /// Called every configured step interval
    fn step<S: Surface>(&mut self, view: &mut GridView<S>);
}

/// winit application hosting one grid view window
pub struct ViewerApp<H> {
    config: ViewConfig,
    host: H,
    view: Option<GridView<WindowSurface>>,
    cursor: Point,
    wheel: WheelAccumulator,
    next_step: Instant,
    error: Option<ViewError>,
}

impl<H: Host> ViewerApp<H> {
    pub fn new(config: ViewConfig, host: H) -> Self {
        Self {
            config,
            host,
            view: None,
            cursor: Point::ZERO,
            wheel: WheelAccumulator::new(),
            next_step: Instant::now(),
            error: None,
        }
    }

    fn create_view(&self, event_loop: &ActiveEventLoop) -> Result<GridView<WindowSurface>, ViewError> {
        let (width, height) = self.config.surface_size();
        let mut window_attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(PhysicalSize::new(width, height));
        if let Some((x, y)) = self.config.position {
            window_attrs = window_attrs.with_position(PhysicalPosition::new(x, y));
        }

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let surface = WindowSurface::new(window, self.config.background)?;
        GridView::new(&self.config, surface)
    }

    fn forward(&mut self, event: InputEvent) {
        if let Some(view) = &mut self.view {
            view.handle(&event);
        }
    }
}

impl<H: Host> ApplicationHandler for ViewerApp<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            return;
        }

        log::info!("Initializing grid view...");
        log::info!(
            "Grid size: {}x{} at scale {}",
            self.config.width,
            self.config.height,
            self.config.scale
        );

        let mut view = match self.create_view(event_loop) {
            Ok(view) => view,
            Err(e) => {
                log::error!("Failed to create view: {}", e);
                self.error = Some(e);
                event_loop.exit();
                return;
            }
        };

        self.host.init(&mut view);
        view.draw_whole_space();
        if let Err(e) = view.present() {
            log::error!("Initial present failed: {}", e);
        }

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Drag: Pan view");
        log::info!("  Wheel: Zoom");
        log::info!("  -/=: Zoom out/in");
        log::info!("  Escape: Quit");

        self.view = Some(view);
        self.next_step = Instant::now() + self.config.step_interval;
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_step));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                self.view = None;
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if !event.state.is_pressed() {
                    log::trace!("{:?} is released", event.logical_key);
                    return;
                }
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => {
                        log::info!("Escape pressed, exiting...");
                        self.view = None;
                        event_loop.exit();
                    }
                    Key::Character(text) => {
                        for c in text.chars() {
                            self.forward(InputEvent::Key(c));
                        }
                    }
                    other => log::trace!("{:?} is pressed", other),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x, position.y);
                self.forward(InputEvent::Move(self.cursor));
            }
            WindowEvent::MouseInput { state, .. } => {
                let event = match state {
                    ElementState::Pressed => InputEvent::Press(self.cursor),
                    ElementState::Released => InputEvent::Release(self.cursor),
                };
                self.forward(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports rotation away from the user as positive
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => self.wheel.lines(y as f64),
                    MouseScrollDelta::PixelDelta(position) => self.wheel.pixels(position.y),
                };
                for direction in notches {
                    self.forward(InputEvent::Wheel(direction));
                }
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                self.forward(InputEvent::Resize {
                    width: new_size.width,
                    height: new_size.height,
                });
            }
            WindowEvent::RedrawRequested => {
                if let Some(view) = &mut self.view {
                    view.draw_whole_space();
                    if let Err(e) = view.present() {
                        log::error!("Present failed: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(view) = &mut self.view else {
            return;
        };
        let now = Instant::now();
        if now >= self.next_step {
            self.host.step(view);
            self.next_step = now + self.config.step_interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_step));
    }
}

/// Open a window for `config` and drive `host` until the window closes
pub fn run<H: Host>(config: ViewConfig, host: H) -> Result<(), ViewError> {
    config.validate()?;
    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(config, host);
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
