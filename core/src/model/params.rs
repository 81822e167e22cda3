use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Evenly spaced radial-velocity axis the line profiles are evaluated on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RvAxis {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for RvAxis {
    fn default() -> Self {
        Self {
            start: -40.0,
            end: 70.0,
            samples: 1000,
        }
    }
}

impl RvAxis {
    pub fn values(&self) -> Array1<f64> {
        Array1::linspace(self.start, self.end, self.samples)
    }
}

/// Fixed scalars describing the star, the spot and the planet for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Mean RV of the starspot.
    pub mean_rv_spot: f64,
    /// Mean RV of the planet.
    pub mean_rv_planet: f64,
    pub stddev_spot: f64,
    pub stddev_star: f64,
    /// CCF amplitude of the spot bump.
    pub amplitude_spot: f64,
    /// CCF amplitude of the stellar line.
    pub amplitude_star: f64,
    /// Planet semi-amplitude (K).
    pub amplitude_motion_planet: f64,
    /// Planet orbital frequency, 1/25.2 d.
    pub frequency_motion_planet: f64,
    /// Spot modulation frequency, 1/9 d.
    pub frequency_motion_spot: f64,
    pub amplitude_motion_spot_start: f64,
    pub amplitude_motion_spot_step: f64,
    pub rv_axis: RvAxis,
    /// Length of the observation window the epochs are spread over.
    pub observation_span: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            mean_rv_spot: 16.39,
            mean_rv_planet: 16.39,
            stddev_spot: 3.0,
            stddev_star: 9.92,
            amplitude_spot: 5.1e-3,
            amplitude_star: 0.0614,
            amplitude_motion_planet: 0.30,
            frequency_motion_planet: 0.0396,
            frequency_motion_spot: 0.11,
            amplitude_motion_spot_start: 0.0,
            amplitude_motion_spot_step: 0.015,
            rv_axis: RvAxis::default(),
            observation_span: 100.0,
        }
    }
}

impl SimulationParameters {
    /// Spot-motion amplitude (h) for sweep step `step`, counted from zero.
    pub fn spot_motion_amplitude(&self, step: usize) -> f64 {
        self.amplitude_motion_spot_start + (step as f64 + 1.0) * self.amplitude_motion_spot_step
    }

    /// h/K for sweep step `step`.
    pub fn ratio(&self, step: usize) -> f64 {
        self.spot_motion_amplitude(step) / self.amplitude_motion_planet
    }

    /// Observation epochs handed to the periodogram.
    pub fn observation_epochs(&self, time_samples: usize) -> Array1<f64> {
        Array1::linspace(0.0, self.observation_span, time_samples)
    }
}
