use crate::model::PeriodogramConfig;
use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::processing::lomb_scargle::LombScargle;
use crate::telemetry::log::LogManager;

/// Periodogram stage: power of `input.samples` sampled at `input.times`.
///
/// Output samples are the powers; the matching frequency grid travels in
/// `metadata.frequencies`.
pub struct PeriodogramStage {
    config: Option<PeriodogramConfig>,
    engine: LombScargle,
    logger: LogManager,
}

impl PeriodogramStage {
    pub fn new() -> Self {
        Self {
            config: None,
            engine: LombScargle::new(),
            logger: LogManager::new("periodogram"),
        }
    }
}

impl Default for PeriodogramStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for PeriodogramStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        self.config = Some(config.periodogram.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        let periodogram = self
            .engine
            .autopower(&input.times, &input.samples, config)?;

        let mut notes = Vec::new();
        let peak_frequency = periodogram.peak().map(|(frequency, power)| {
            notes.push(format!("peak {:.2} d power {:.3}", 1.0 / frequency, power));
            frequency
        });
        self.logger.record(&format!(
            "{} bins, method {:?}, {}",
            periodogram.len(),
            config.method.resolve(periodogram.len()),
            notes.first().map(String::as_str).unwrap_or("no finite peak")
        ));

        Ok(StageOutput {
            samples: periodogram.powers,
            metadata: StageMetadata {
                frequencies: Some(periodogram.frequencies),
                peak_frequency,
                notes,
            },
        })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn periodogram_stage_reports_grid_and_peak() {
        let mut stage = PeriodogramStage::new();
        stage.initialize(&StageConfig::default()).unwrap();

        let times: Vec<f64> = (0..100).map(|i| 100.0 * i as f64 / 99.0).collect();
        let samples = times
            .iter()
            .map(|&t| 16.0 + 0.3 * (2.0 * PI * 0.0396 * t).sin())
            .collect();
        let output = stage
            .execute(StageInput {
                times,
                samples,
                ..Default::default()
            })
            .unwrap();

        let frequencies = output.metadata.frequencies.unwrap();
        assert_eq!(frequencies.len(), output.samples.len());
        assert_eq!(frequencies.len(), 3451);
        let peak = output.metadata.peak_frequency.unwrap();
        assert!((peak - 0.0396).abs() < 2e-3);
        assert!(output.metadata.notes[0].starts_with("peak"));
        stage.cleanup();
    }

    #[test]
    fn periodogram_stage_surfaces_degenerate_series() {
        let mut stage = PeriodogramStage::new();
        stage.initialize(&StageConfig::default()).unwrap();
        let err = stage
            .execute(StageInput {
                times: (0..100).map(f64::from).collect(),
                samples: vec![11.72; 100],
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, StageError::DegenerateSeries(_)));
    }
}
