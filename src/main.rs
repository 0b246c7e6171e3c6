use rand::Rng;

use automata_view::config::{
    DEMO_GRID_HEIGHT, DEMO_GRID_WIDTH, DEMO_SCALE, DEMO_WANDERERS,
};
use automata_view::{Color, GridView, Host, Surface, ViewConfig};

/// Demo host: random walkers painting colored trails.
///
/// Each step touches only a handful of cells, so it exercises the dirty-cell path.
struct Wanderers {
    walkers: Vec<Walker>,
    step: u64,
}

struct Walker {
    x: i64,
    y: i64,
    color: Color,
}

impl Wanderers {
    fn new(count: usize, width: u32, height: u32) -> Self {
        let mut rng = rand::thread_rng();
        let walkers = (0..count)
            .map(|_| Walker {
                x: rng.gen_range(0..width as i64),
                y: rng.gen_range(0..height as i64),
                color: Color::rgb(rng.gen(), rng.gen(), rng.gen()),
            })
            .collect();
        Self { walkers, step: 0 }
    }
}

impl Host for Wanderers {
    fn init<S: Surface>(&mut self, view: &mut GridView<S>) {
        for (i, walker) in self.walkers.iter().enumerate() {
            view.set_cell_color(walker.x, walker.y, walker.color);
            view.set_cell_text(walker.x, walker.y, format!("walker {} starts here", i));
        }
    }

    fn step<S: Surface>(&mut self, view: &mut GridView<S>) {
        let mut rng = rand::thread_rng();
        let (width, height) = (view.width() as i64, view.height() as i64);
        self.step += 1;

        for (i, walker) in self.walkers.iter_mut().enumerate() {
            let (dx, dy) = match rng.gen_range(0..4) {
                0 => (1, 0),
                1 => (-1, 0),
                2 => (0, 1),
                _ => (0, -1),
            };
            // Wrap around the edges
            walker.x = (walker.x + dx).rem_euclid(width);
            walker.y = (walker.y + dy).rem_euclid(height);
            view.set_cell_color(walker.x, walker.y, walker.color);
            view.set_cell_text(walker.x, walker.y, format!("walker {} at step {}", i, self.step));
        }

        view.draw_dirty_cells();
        if let Err(e) = view.present() {
            log::error!("Present failed: {}", e);
        }
        view.set_title(format!("Wanderers - step {}", self.step));
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Wanderers demo...");

    let config = ViewConfig::new(DEMO_GRID_WIDTH, DEMO_GRID_HEIGHT)
        .with_scale(DEMO_SCALE)
        .with_title("Wanderers");
    let host = Wanderers::new(DEMO_WANDERERS, config.width, config.height);

    if let Err(e) = automata_view::run(config, host) {
        log::error!("Viewer failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automata_view::HeadlessSurface;

    fn headless_view(width: u32, height: u32) -> GridView<HeadlessSurface> {
        let config = ViewConfig::new(width, height).with_scale(2.0);
        let (w, h) = config.surface_size();
        GridView::new(&config, HeadlessSurface::new(w, h)).unwrap()
    }

    #[test]
    fn test_walkers_stay_inside_grid() {
        let mut view = headless_view(6, 4);
        let mut host = Wanderers::new(5, 6, 4);
        host.init(&mut view);
        for _ in 0..200 {
            host.step(&mut view);
            for walker in &host.walkers {
                assert!((0..6).contains(&walker.x));
                assert!((0..4).contains(&walker.y));
            }
        }
    }

    #[test]
    fn test_step_draws_and_presents() {
        let mut view = headless_view(8, 8);
        let mut host = Wanderers::new(3, 8, 8);
        host.init(&mut view);
        host.step(&mut view);

        assert!(view.grid().dirty().is_empty());
        assert_eq!(view.surface().present_count(), 1);
        assert_eq!(view.surface().title(), "Wanderers - step 1");
        // Walkers may share a cell; the last one to move wins it
        let last = host.walkers.last().unwrap();
        assert_eq!(view.grid().color(last.x, last.y), Some(last.color));
        assert_eq!(view.grid().text(last.x, last.y), Some("walker 2 at step 1"));
    }
}
