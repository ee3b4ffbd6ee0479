// main.rs - egui host for the Game of Life engine
// The simulation runs as a timer task on the tokio runtime; this app only
// measures the drawing area, paints cells and forwards button presses.

use eframe::egui;
use egui::Color32;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;

use conway::{LifeConfig, LifeError, Simulation};

mod ui;

const DEFAULT_LOG_FILTER: &str = "conway=debug,conway_coro=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let config = LifeConfig::default();
    info!(?config, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(GameOfLife::new(runtime, config, &cc.egui_ctx))),
    )?;
    Ok(())
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER))?;
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(filter),
    )?;
    Ok(())
}

/// Front-end state. The grid itself lives in the simulation.
pub struct GameOfLife {
    // Created once the grid area has been measured
    simulation: Option<Simulation>,
    measured: Option<(i64, i64)>,
    config: LifeConfig,
    ctx: egui::Context,

    pub speed: u64,
    pub live_color: Color32,
    pub dead_color: Color32,

    runtime: tokio::runtime::Runtime,
}

impl GameOfLife {
    fn new(runtime: tokio::runtime::Runtime, config: LifeConfig, ctx: &egui::Context) -> Self {
        let speed = (config.interval.as_millis() as u64 / config.slider_scale.max(1)).clamp(1, 100);
        Self {
            simulation: None,
            measured: None,
            config,
            ctx: ctx.clone(),
            speed,
            live_color: Color32::BLACK,
            dead_color: Color32::from_gray(243),
            runtime,
        }
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size as f32
    }

    /// Builds the simulation on first measurement and re-derives its shape after.
    pub fn measure(&mut self, width: i64, height: i64) {
        if self.measured == Some((width, height)) {
            return;
        }
        self.measured = Some((width, height));

        let outcome = match &self.simulation {
            Some(simulation) => simulation.resize_to_viewport(width, height).map(|_| ()),
            None => self.create_simulation(width, height),
        };
        if let Err(err) = outcome {
            warn!(%err, width, height, "could not size grid");
        }
    }

    fn create_simulation(&mut self, width: i64, height: i64) -> Result<(), LifeError> {
        let config = self.config.clone().with_interval(self.config.slider_interval(self.speed));
        let simulation = Simulation::for_viewport(width, height, config, self.runtime.handle().clone())?;

        // Repaint whenever a generation is published, even with no input
        let mut published = simulation.subscribe();
        let ctx = self.ctx.clone();
        self.runtime.spawn(async move {
            while published.changed().await.is_ok() {
                ctx.request_repaint();
            }
        });

        self.simulation = Some(simulation);
        Ok(())
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.simulation.as_ref()
    }

    pub fn toggle_running(&self) {
        if let Some(simulation) = &self.simulation {
            if simulation.is_running() {
                simulation.stop();
            } else {
                simulation.start();
            }
        }
    }

    pub fn step_once(&self) {
        if let Some(simulation) = &self.simulation {
            simulation.step_once();
        }
    }

    pub fn clear_grid(&self) {
        if let Some(simulation) = &self.simulation {
            simulation.clear();
        }
    }

    pub fn randomise_grid(&mut self) {
        if let Some(simulation) = &mut self.simulation {
            if let Err(err) = simulation.randomise() {
                warn!(%err, "randomise rejected");
            }
        }
    }

    pub fn toggle_cell(&self, row: usize, col: usize) {
        if let Some(simulation) = &self.simulation {
            if let Err(err) = simulation.toggle_cell(row, col) {
                warn!(%err, "toggle rejected");
            }
        }
    }

    pub fn apply_speed(&self) {
        if let Some(simulation) = &self.simulation {
            if let Err(err) = simulation.set_interval(self.config.slider_interval(self.speed)) {
                warn!(%err, speed = self.speed, "interval rejected");
            }
        }
    }
}
