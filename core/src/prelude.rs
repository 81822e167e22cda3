use crate::model::{PeriodogramConfig, SimulationParameters};
use serde::{Deserialize, Serialize};

/// Shared configuration for each processing stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageConfig {
    pub params: SimulationParameters,
    pub periodogram: PeriodogramConfig,
}

/// Input payload for a processing stage.
#[derive(Debug, Clone, Default)]
pub struct StageInput {
    /// Sample epochs, in simulation time units.
    pub times: Vec<f64>,
    pub samples: Vec<f64>,
    /// Spot-motion amplitude (h) of the sweep step being processed.
    pub spot_motion_amplitude: f64,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub samples: Vec<f64>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub frequencies: Option<Vec<f64>>,
    pub peak_frequency: Option<f64>,
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error("buffer exhaustion: {0}")]
    BufferExhaustion(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("degenerate series: {0}")]
    DegenerateSeries(String),
    #[error("shape mismatch: expected {expected} columns, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing the signal-processing stages chained by the sweep.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()>;
    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput>;
    fn cleanup(&mut self);
}
