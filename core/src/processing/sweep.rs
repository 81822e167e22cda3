use crate::math::matrix::MatrixHelper;
use crate::model::{SimulationParameters, SweepPoint, SweepResult};
use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageOutput, StageResult,
};
use crate::processing::{CcfStage, PeriodogramStage};
use crate::telemetry::{LogManager, MetricsRecorder};

/// Runs the h/K sweep with the default periodogram settings.
pub fn run_sweep(
    params: &SimulationParameters,
    sweep_steps: usize,
    time_samples: usize,
) -> StageResult<SweepResult> {
    let config = StageConfig {
        params: params.clone(),
        ..Default::default()
    };
    SweepRunner::new().run(&config, sweep_steps, time_samples)
}

/// Chains the CCF and periodogram stages over every sweep step.
pub struct SweepRunner {
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl SweepRunner {
    pub fn new() -> Self {
        Self {
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("sweep"),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn run(
        &self,
        config: &StageConfig,
        sweep_steps: usize,
        time_samples: usize,
    ) -> StageResult<SweepResult> {
        let params = &config.params;
        if params.amplitude_motion_planet == 0.0 || !params.amplitude_motion_planet.is_finite() {
            return Err(StageError::InvalidInput(format!(
                "planet semi-amplitude must be finite and non-zero, got {}",
                params.amplitude_motion_planet
            )));
        }
        if sweep_steps == 0 {
            return Err(StageError::InvalidInput("sweep needs at least one step".into()));
        }

        let mut ccf = CcfStage::new();
        ccf.initialize(config)?;
        let mut periodogram = PeriodogramStage::new();
        periodogram.initialize(config)?;

        let time_indices: Vec<f64> = (0..time_samples).map(|i| i as f64).collect();
        let epochs = params.observation_epochs(time_samples).to_vec();

        let mut points = Vec::with_capacity(sweep_steps);
        let mut frequencies: Option<Vec<f64>> = None;

        for step in 0..sweep_steps {
            let spot_motion_amplitude = params.spot_motion_amplitude(step);
            let outcome = Self::run_step(
                &mut ccf,
                &mut periodogram,
                &time_indices,
                &epochs,
                spot_motion_amplitude,
            );
            let (rv_series, spectrum) = match outcome {
                Ok(values) => values,
                Err(err) => {
                    self.metrics.record_error();
                    self.logger.warn(&format!(
                        "step {} (h {:.3}) failed: {}",
                        step, spot_motion_amplitude, err
                    ));
                    return Err(err);
                }
            };
            let StageOutput {
                samples: powers,
                metadata,
            } = spectrum;
            let grid = metadata.frequencies.ok_or_else(|| {
                StageError::Internal("periodogram returned no frequency grid".into())
            })?;
            if !metadata.notes.is_empty() {
                self.logger.record(&format!(
                    "step {} h/K {:.3}: {}",
                    step,
                    params.ratio(step),
                    metadata.notes.join("; ")
                ));
            }

            match &frequencies {
                Some(shared) if *shared != grid => {
                    return Err(StageError::Internal(format!(
                        "frequency grid changed at sweep step {}",
                        step
                    )));
                }
                Some(_) => {}
                None => frequencies = Some(grid),
            }

            self.metrics.record_processed();
            points.push(SweepPoint {
                spot_motion_amplitude,
                ratio: params.ratio(step),
                rv_series,
                powers,
                peak_frequency: metadata.peak_frequency,
            });
        }

        ccf.cleanup();
        periodogram.cleanup();

        let frequencies = frequencies.unwrap_or_default();
        let rows: Vec<Vec<f64>> = points.iter().map(|point| point.powers.clone()).collect();
        let powers = MatrixHelper::stack_rows(&rows)?;
        let (processed, errors) = self.metrics.snapshot();
        self.logger.record(&format!(
            "sweep complete: {} steps processed, {} errors, {} frequency bins",
            processed,
            errors,
            frequencies.len()
        ));

        Ok(SweepResult {
            ratios: points.iter().map(|point| point.ratio).collect(),
            periods: frequencies.iter().map(|f| 1.0 / f).collect(),
            frequencies,
            powers,
            points,
        })
    }

    fn run_step(
        ccf: &mut CcfStage,
        periodogram: &mut PeriodogramStage,
        time_indices: &[f64],
        epochs: &[f64],
        spot_motion_amplitude: f64,
    ) -> StageResult<(Vec<f64>, StageOutput)> {
        let rv = ccf.execute(StageInput {
            times: time_indices.to_vec(),
            samples: Vec::new(),
            spot_motion_amplitude,
        })?;
        let spectrum = periodogram.execute(StageInput {
            times: epochs.to_vec(),
            samples: rv.samples.clone(),
            spot_motion_amplitude,
        })?;
        Ok((rv.samples, spectrum))
    }
}

impl Default for SweepRunner {
    fn default() -> Self {
        Self::new()
    }
}
