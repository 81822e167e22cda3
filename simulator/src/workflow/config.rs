use anyhow::Context;
use serde::{Deserialize, Serialize};
use spotcore::model::{PeriodogramConfig, SimulationParameters};
use spotcore::prelude::StageConfig;
use std::fs;
use std::path::{Path, PathBuf};
use visualizer::HeatmapConfig;

pub const DEFAULT_OUTPUT: &str = "spot_to_star_amplitude_ratio_2d.png";

/// Everything a sweep run needs; any field left out of the YAML keeps its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub sweep_steps: usize,
    pub time_samples: usize,
    pub params: SimulationParameters,
    pub periodogram: PeriodogramConfig,
    pub heatmap: HeatmapConfig,
    pub output: PathBuf,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            sweep_steps: 100,
            time_samples: 100,
            params: SimulationParameters::default(),
            periodogram: PeriodogramConfig::default(),
            heatmap: HeatmapConfig::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            params: self.params.clone(),
            periodogram: self.periodogram.clone(),
        }
    }
}
