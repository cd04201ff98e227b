use crate::genome::Genome;
use crate::vehicle::Vehicle;
use serde::{Deserialize, Serialize};

/// Read-only view of one vehicle, valid until the next `tick` or mutator
/// call. This is the shape the presentation layer paints from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub speed: f64,
    pub fitness: f64,
    pub distance_travelled: f64,
    pub crashed: bool,
    /// Cosmetic `#RRGGBB` tag.
    pub color: String,
}

impl From<&Vehicle> for VehicleSnapshot {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            x: vehicle.x,
            y: vehicle.y,
            heading: vehicle.heading,
            speed: vehicle.speed,
            fitness: vehicle.fitness,
            distance_travelled: vehicle.distance_travelled,
            crashed: vehicle.crashed,
            color: vehicle.color_hex(),
        }
    }
}

/// Aggregate fitness figures for one generation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u64,
    pub population_size: usize,
    pub active_count: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
}

fn default_schema_version() -> u32 {
    1
}

/// Serialized output of a headless run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Generations completed during the run.
    pub generations: u64,
    /// Total ticks simulated.
    pub ticks: u64,
    /// One entry per completed generation, captured at its transition.
    pub samples: Vec<GenerationStats>,
    /// Best fitness achieved across all completed generations.
    pub best_fitness: f64,
    /// Genome that achieved `best_fitness`, if any generation completed.
    pub best_genome: Option<Genome>,
}
