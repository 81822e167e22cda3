use serde::{Deserialize, Serialize};

/// How the trigonometric sums of the periodogram are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodogramMethod {
    /// `Fast` for grids longer than [`FAST_METHOD_MIN_GRID`], `Exact` otherwise.
    #[default]
    Auto,
    /// Direct summation over every sample and frequency.
    Exact,
    /// Press & Rybicki extirpolation onto an FFT grid.
    Fast,
}

/// Grid length above which `Auto` switches to the fast method.
pub const FAST_METHOD_MIN_GRID: usize = 200;

impl PeriodogramMethod {
    pub fn resolve(self, grid_len: usize) -> Self {
        match self {
            PeriodogramMethod::Auto if grid_len > FAST_METHOD_MIN_GRID => PeriodogramMethod::Fast,
            PeriodogramMethod::Auto => PeriodogramMethod::Exact,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Fraction of the variance explained by the sinusoid, in [0, 1].
    #[default]
    Standard,
    Model,
    Log,
    Psd,
}

/// Frequency search and evaluation settings for the Lomb-Scargle engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodogramConfig {
    pub minimum_frequency: Option<f64>,
    pub maximum_frequency: Option<f64>,
    pub samples_per_peak: f64,
    /// Only consulted when `maximum_frequency` is unset.
    pub nyquist_factor: f64,
    pub method: PeriodogramMethod,
    pub normalization: Normalization,
    /// FFT grid oversampling used by the fast method.
    pub oversampling: usize,
    /// Number of Lagrange points each sample is spread over by the fast method.
    pub extirpolation_points: usize,
}

impl Default for PeriodogramConfig {
    fn default() -> Self {
        Self {
            minimum_frequency: Some(0.01),
            maximum_frequency: Some(0.7),
            samples_per_peak: 50.0,
            nyquist_factor: 5.0,
            method: PeriodogramMethod::Auto,
            normalization: Normalization::Standard,
            oversampling: 5,
            extirpolation_points: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_method_prefers_fast_on_long_grids() {
        assert_eq!(PeriodogramMethod::Auto.resolve(3451), PeriodogramMethod::Fast);
        assert_eq!(PeriodogramMethod::Auto.resolve(50), PeriodogramMethod::Exact);
        assert_eq!(PeriodogramMethod::Exact.resolve(3451), PeriodogramMethod::Exact);
    }
}
