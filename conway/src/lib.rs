//! Conway's Game of Life engine.
//!
//! [`grid`] holds the immutable cell grid and the generation rule, [`sim`]
//! drives generations on a tokio timer, and [`viewport`] turns a drawable
//! area into grid dimensions.

pub mod config;
pub mod error;
pub mod grid;
pub mod sim;
pub mod viewport;

pub use config::LifeConfig;
pub use error::{LifeError, Result};
pub use grid::{Cell, Dimensions, Grid};
pub use sim::{LoopState, RunState, Simulation, Snapshot};
