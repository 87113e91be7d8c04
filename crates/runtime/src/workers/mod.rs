//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the authoritative encounter state and executes
//! commands sent through [`crate::RuntimeHandle`].

mod simulation;

pub use simulation::{Command, SimulationWorker};
