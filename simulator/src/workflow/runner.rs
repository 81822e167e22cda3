use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::info;
use spotcore::{SweepResult, SweepRunner};
use std::path::Path;
use std::time::{Duration, Instant};
use visualizer::HeatmapRenderer;

pub struct WorkflowResult {
    pub sweep: SweepResult,
    /// Strongest period for every sweep step.
    pub peak_periods: Vec<f64>,
    pub elapsed: Duration,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let stage_config = self.config.to_stage_config();
        info!(
            "sweeping {} h/K steps x {} epochs",
            self.config.sweep_steps, self.config.time_samples
        );

        let started = Instant::now();
        let sweep = SweepRunner::new()
            .run(
                &stage_config,
                self.config.sweep_steps,
                self.config.time_samples,
            )
            .context("running h/K sweep")?;
        let elapsed = started.elapsed();

        let peak_periods = sweep.peak_periods();
        info!("{} sweep steps finished in {:.2?}", sweep.sweep_len(), elapsed);

        Ok(WorkflowResult {
            sweep,
            peak_periods,
            elapsed,
        })
    }

    pub fn render(&self, result: &WorkflowResult, output: &Path) -> anyhow::Result<()> {
        let renderer = HeatmapRenderer::new(self.config.heatmap.clone())
            .context("configuring heatmap renderer")?;
        renderer
            .render_to_file(&result.sweep, output)
            .with_context(|| format!("rendering heatmap to {}", output.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_executes_short_sweep() {
        let cfg = WorkflowConfig {
            sweep_steps: 3,
            ..Default::default()
        };
        let runner = Runner::new(cfg.clone());
        let result = runner.execute().unwrap();
        assert_eq!(result.sweep.ratios.len(), cfg.sweep_steps);
        assert_eq!(result.peak_periods.len(), cfg.sweep_steps);
        assert!(result
            .peak_periods
            .iter()
            .all(|&p| p >= 1.0 / 0.7 - 1e-9 && p <= 100.0 + 1e-9));
    }

    #[test]
    fn runner_surfaces_invalid_parameters_with_context() {
        let mut cfg = WorkflowConfig {
            sweep_steps: 1,
            ..Default::default()
        };
        cfg.params.amplitude_motion_planet = 0.0;
        let err = Runner::new(cfg).execute().err().unwrap();
        assert!(format!("{:#}", err).contains("running h/K sweep"));
    }
}
