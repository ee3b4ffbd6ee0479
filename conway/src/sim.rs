// sim.rs - Timer-driven simulation loop and the controller that owns it

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::config::LifeConfig;
use crate::error::{LifeError, Result};
use crate::grid::{Dimensions, Grid};
use crate::viewport;

/// The published state readers observe.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    /// Steps applied since the grid was last cleared, randomised or resized.
    pub generation: u64,
    /// Bumped on every publish, whether a step or a user edit.
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    pub running: bool,
    pub interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

struct Shared {
    current: watch::Sender<Snapshot>,
    running: AtomicBool,
    interval_ms: AtomicU64,
    // Identifies the live loop task. A task whose epoch is stale exits at its next wake.
    epoch: AtomicU64,
}

impl Shared {
    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::SeqCst))
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.running.load(Ordering::SeqCst) && self.epoch.load(Ordering::SeqCst) == epoch
    }

    /// Steps the most recently published grid and publishes the result.
    fn advance(&self) -> bool {
        let (grid, revision) = {
            let snapshot = self.current.borrow();
            (snapshot.grid.clone(), snapshot.revision)
        };
        if grid.dims().is_empty() {
            return false;
        }
        let next = grid.step();
        self.publish_step(revision, next)
    }

    /// Publishes `next` unless the grid it was computed from has been replaced.
    fn publish_step(&self, from_revision: u64, next: Grid) -> bool {
        self.current.send_if_modified(|snapshot| {
            if snapshot.revision != from_revision {
                trace!(from_revision, current = snapshot.revision, "dropping superseded step");
                return false;
            }
            snapshot.grid = next;
            snapshot.generation += 1;
            snapshot.revision += 1;
            trace!(generation = snapshot.generation, "published generation");
            true
        })
    }

    fn replace(&self, grid: Grid) {
        self.current.send_modify(|snapshot| {
            snapshot.grid = grid;
            snapshot.generation = 0;
            snapshot.revision += 1;
        });
    }
}

/// Re-arming timer: step, publish, sleep for the current interval, repeat.
async fn run_loop(shared: Arc<Shared>, epoch: u64) {
    while shared.is_current(epoch) {
        shared.advance();
        // Read at arm time so interval changes apply from the next tick
        tokio::time::sleep(shared.interval()).await;
    }
    debug!(epoch, "simulation loop exited");
}

/// Owns the current grid and run state, and drives generations on a tokio runtime.
///
/// Starting runs the first step immediately and then one step per interval.
/// Stopping takes effect at the next step boundary; a step that is already
/// being computed when `stop` is called may still be published.
pub struct Simulation {
    shared: Arc<Shared>,
    runtime: Handle,
    config: LifeConfig,
    rng: fastrand::Rng,
}

impl Simulation {
    pub fn new(grid: Grid, config: LifeConfig, runtime: Handle) -> Result<Self> {
        let interval_ms = interval_millis(config.interval)?;
        let (current, _) = watch::channel(Snapshot {
            grid,
            generation: 0,
            revision: 0,
        });
        let rng = config.rng();
        Ok(Self {
            shared: Arc::new(Shared {
                current,
                running: AtomicBool::new(false),
                interval_ms: AtomicU64::new(interval_ms),
                epoch: AtomicU64::new(0),
            }),
            runtime,
            config,
            rng,
        })
    }

    /// A simulation over an empty grid sized to the host's drawable area.
    pub fn for_viewport(width: i64, height: i64, config: LifeConfig, runtime: Handle) -> Result<Self> {
        let dims = viewport::grid_dimensions(width, height, config.cell_size)?;
        Self::new(Grid::empty(dims), config, runtime)
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        if self.is_running() { LoopState::Running } else { LoopState::Idle }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    pub fn interval(&self) -> Duration {
        self.shared.interval()
    }

    pub fn run_state(&self) -> RunState {
        RunState {
            running: self.is_running(),
            interval: self.interval(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.current.borrow().clone()
    }

    pub fn current_grid(&self) -> Grid {
        self.shared.current.borrow().grid.clone()
    }

    pub fn generation(&self) -> u64 {
        self.shared.current.borrow().generation
    }

    pub fn population(&self) -> usize {
        self.shared.current.borrow().grid.population()
    }

    /// Receives every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.current.subscribe()
    }

    /// Idle -> Running. Does nothing if a loop is already running.
    pub fn start(&self) {
        if self.shared.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let epoch = self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(epoch, interval = ?self.interval(), "simulation started");
        self.runtime.spawn(run_loop(Arc::clone(&self.shared), epoch));
    }

    /// Running -> Idle. Does nothing if already idle.
    pub fn stop(&self) {
        if self.shared.running.swap(false, Ordering::SeqCst) {
            debug!("simulation stopped");
        }
    }

    /// Changes the delay between generations. The tick already armed keeps its delay.
    pub fn set_interval(&self, interval: Duration) -> Result<()> {
        let millis = interval_millis(interval)?;
        self.shared.interval_ms.store(millis, Ordering::SeqCst);
        debug!(interval_ms = millis, "interval changed");
        Ok(())
    }

    /// Advances one generation on demand. Returns false if nothing was published.
    pub fn step_once(&self) -> bool {
        self.shared.advance()
    }

    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<()> {
        let mut outcome = Ok(());
        self.shared.current.send_if_modified(|snapshot| match snapshot.grid.toggle(row, col) {
            Ok(grid) => {
                snapshot.grid = grid;
                snapshot.revision += 1;
                true
            }
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        outcome
    }

    pub fn clear(&self) {
        let dims = self.current_grid().dims();
        self.shared.replace(Grid::empty(dims));
        debug!(rows = dims.rows(), cols = dims.cols(), "grid cleared");
    }

    pub fn randomise(&mut self) -> Result<()> {
        let dims = self.current_grid().dims();
        let grid = Grid::random(dims, self.config.alive_probability, &mut self.rng)?;
        debug!(population = grid.population(), "grid randomised");
        self.shared.replace(grid);
        Ok(())
    }

    /// Replaces the grid with an empty one of the new shape. The run state is kept.
    pub fn resize(&self, dims: Dimensions) {
        if dims == self.current_grid().dims() {
            return;
        }
        debug!(rows = dims.rows(), cols = dims.cols(), running = self.is_running(), "grid resized");
        self.shared.replace(Grid::empty(dims));
    }

    /// Re-derives the grid shape from a newly measured drawable area.
    pub fn resize_to_viewport(&self, width: i64, height: i64) -> Result<Dimensions> {
        let dims = viewport::grid_dimensions(width, height, self.config.cell_size)?;
        self.resize(dims);
        Ok(dims)
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}

fn interval_millis(interval: Duration) -> Result<u64> {
    match u64::try_from(interval.as_millis()) {
        Ok(0) => Err(LifeError::InvalidInterval),
        Ok(millis) => Ok(millis),
        Err(_) => Ok(u64::MAX),
    }
}
