use crate::math::gaussian::GaussianProfile;
use crate::math::stats::StatsHelper;
use crate::model::SimulationParameters;
use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::processing::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;
use ndarray::Array1;
use std::f64::consts::PI;

/// Synthesizes the spotted-star CCF at each epoch and extracts the RV of its minimum.
pub struct CcfStage {
    pool: BufferPool,
    params: Option<SimulationParameters>,
    rv_axis: Array1<f64>,
    logger: LogManager,
}

impl CcfStage {
    pub fn new() -> Self {
        Self {
            pool: BufferPool::with_capacity(2),
            params: None,
            rv_axis: Array1::zeros(0),
            logger: LogManager::new("ccf"),
        }
    }

    fn params(&self) -> StageResult<&SimulationParameters> {
        self.params
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))
    }

    /// Total CCF over the RV axis at time index `time` for spot-motion amplitude `spot_motion`.
    pub fn synthesize(&mut self, time: f64, spot_motion: f64) -> StageResult<Vec<f64>> {
        let params = self.params()?.clone();
        let planet_phase = 2.0 * PI * params.frequency_motion_planet * time;
        let spot_phase = 2.0 * PI * params.frequency_motion_spot * time;
        let planet_center =
            params.mean_rv_planet + params.amplitude_motion_planet * planet_phase.sin();
        let spot_center = params.mean_rv_spot + spot_motion * spot_phase.sin();

        // The planet-driven line keeps the stellar width and depth.
        let planet = GaussianProfile::new(planet_center, params.stddev_star)?;
        let spot = GaussianProfile::new(spot_center, params.stddev_spot)?;

        let mut spot_pdf = self.pool.checkout(self.rv_axis.len())?;
        let mut planet_pdf = match self.pool.checkout(self.rv_axis.len()) {
            Ok(buffer) => buffer,
            Err(err) => {
                self.pool.release(spot_pdf);
                return Err(err);
            }
        };

        let evaluated = spot
            .evaluate_into(self.rv_axis.view(), &mut spot_pdf)
            .and_then(|_| planet.evaluate_into(self.rv_axis.view(), &mut planet_pdf));

        let profile = evaluated.map(|_| {
            spot_pdf
                .iter()
                .zip(planet_pdf.iter())
                .map(|(&s, &p)| {
                    let spot_term = -params.amplitude_spot * s;
                    let planet_term = params.amplitude_star * p;
                    -1.0 * (spot_term + planet_term) + 1.0
                })
                .collect::<Vec<f64>>()
        });

        self.pool.release(spot_pdf);
        self.pool.release(planet_pdf);
        profile
    }

    /// RV-axis value at the first global minimum of the synthesized CCF.
    pub fn minimum_rv(&mut self, time: f64, spot_motion: f64) -> StageResult<f64> {
        let profile = self.synthesize(time, spot_motion)?;
        let index = StatsHelper::argmin(&profile)
            .ok_or_else(|| StageError::InvalidInput("empty RV axis".into()))?;
        Ok(self.rv_axis[index])
    }
}

impl Default for CcfStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for CcfStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        if config.params.rv_axis.samples == 0 {
            return Err(StageError::InvalidInput("RV axis has no samples".into()));
        }
        self.rv_axis = config.params.rv_axis.values();
        self.params = Some(config.params.clone());
        Ok(())
    }

    /// `input.times` are the time indices; `input.samples` is ignored.
    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        self.params()?;
        if input.times.is_empty() {
            return Err(StageError::InvalidInput("no time steps to simulate".into()));
        }

        let mut series = Vec::with_capacity(input.times.len());
        for &time in &input.times {
            series.push(self.minimum_rv(time, input.spot_motion_amplitude)?);
        }

        let spread = StatsHelper::variance(&series).sqrt();
        self.logger.record(&format!(
            "h {:.3}: {} minima, RV scatter {:.4}",
            input.spot_motion_amplitude,
            series.len(),
            spread
        ));

        Ok(StageOutput {
            samples: series,
            metadata: StageMetadata {
                notes: vec![format!("RV scatter {:.4}", spread)],
                ..Default::default()
            },
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
        self.params = None;
        self.rv_axis = Array1::zeros(0);
    }
}
