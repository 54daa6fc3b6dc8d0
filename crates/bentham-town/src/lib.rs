//! Town simulation engine.
//!
//! This module implements the toroidal grid where red and blue houses live
//! and relocate until their neighbourhoods are similar enough.

pub mod grid;
pub mod registry;
pub mod town;
pub mod simulation;

pub use grid::Grid;
pub use registry::PositionRegistry;
pub use town::{StepOutcome, Town};
pub use simulation::{Simulation, SimulationResult};
