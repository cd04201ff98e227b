use crate::constants::{TRACK_BAND_WIDTH, TRACK_MARGIN};
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible runs.
    pub seed: u64,
    /// Canvas width in pixels; the track is centered on the canvas.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    /// Number of vehicles per generation. Constant for the whole run.
    pub population_size: usize,
    /// Per-gene mutation probability applied during breeding.
    pub mutation_rate: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            canvas_width: 800.0,
            canvas_height: 600.0,
            population_size: 50,
            mutation_rate: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimConfigError {
    EmptyPopulation,
    MutationRateOutOfRange { actual: f64 },
    InvalidCanvas,
    CanvasTooSmall { min: f64, actual: f64 },
}

impl fmt::Display for SimConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimConfigError::EmptyPopulation => {
                write!(f, "population_size must be at least 1")
            }
            SimConfigError::MutationRateOutOfRange { actual } => {
                write!(f, "mutation_rate ({actual}) must lie in [0, 1]")
            }
            SimConfigError::InvalidCanvas => {
                write!(f, "canvas dimensions must be finite")
            }
            SimConfigError::CanvasTooSmall { min, actual } => {
                write!(
                    f,
                    "smallest canvas dimension ({actual}) must exceed {min} to leave a drivable ring"
                )
            }
        }
    }
}

impl Error for SimConfigError {}

impl SimConfig {
    /// Smallest canvas dimension that still leaves a positive inner radius.
    pub const MIN_CANVAS_DIMENSION: f64 = 2.0 * (TRACK_MARGIN + TRACK_BAND_WIDTH);

    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.population_size == 0 {
            return Err(SimConfigError::EmptyPopulation);
        }
        if !(self.mutation_rate.is_finite() && (0.0..=1.0).contains(&self.mutation_rate)) {
            return Err(SimConfigError::MutationRateOutOfRange {
                actual: self.mutation_rate,
            });
        }
        if !(self.canvas_width.is_finite() && self.canvas_height.is_finite()) {
            return Err(SimConfigError::InvalidCanvas);
        }
        let min_dim = self.canvas_width.min(self.canvas_height);
        if min_dim <= Self::MIN_CANVAS_DIMENSION {
            return Err(SimConfigError::CanvasTooSmall {
                min: Self::MIN_CANVAS_DIMENSION,
                actual: min_dim,
            });
        }
        Ok(())
    }
}
