pub mod config;
pub mod constants;
pub mod genome;
pub mod metrics;
pub mod rng;
pub mod simulation;
pub mod track;
pub mod vehicle;

pub use config::{SimConfig, SimConfigError};
pub use metrics::{GenerationStats, RunSummary, VehicleSnapshot};
pub use simulation::{Simulation, TickOutcome};
pub use track::{Obstacle, Track};
pub use vehicle::Vehicle;
