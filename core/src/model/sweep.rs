use ndarray::Array2;

/// One outer-loop iteration of the h/K sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub spot_motion_amplitude: f64,
    /// h/K.
    pub ratio: f64,
    /// RV at the CCF minimum for each time step, in time order.
    pub rv_series: Vec<f64>,
    /// Periodogram power per frequency bin, ascending frequency.
    pub powers: Vec<f64>,
    /// Frequency of the strongest finite bin, if any.
    pub peak_frequency: Option<f64>,
}

/// Everything the renderer needs from a completed sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub ratios: Vec<f64>,
    /// Shared ascending frequency grid.
    pub frequencies: Vec<f64>,
    /// `1 / frequencies`, same order (descending).
    pub periods: Vec<f64>,
    /// Indexed `[sweep step][frequency bin]`.
    pub powers: Array2<f64>,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    pub fn sweep_len(&self) -> usize {
        self.ratios.len()
    }

    /// Period of the strongest peak for every sweep step; NaN where no peak was found.
    pub fn peak_periods(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|point| point.peak_frequency.map_or(f64::NAN, |f| 1.0 / f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ratio: f64, peak_frequency: Option<f64>) -> SweepPoint {
        SweepPoint {
            spot_motion_amplitude: 0.3 * ratio,
            ratio,
            rv_series: Vec::new(),
            powers: Vec::new(),
            peak_frequency,
        }
    }

    #[test]
    fn peak_periods_invert_step_peaks() {
        let result = SweepResult {
            ratios: vec![0.05, 0.1],
            frequencies: Vec::new(),
            periods: Vec::new(),
            powers: Array2::zeros((2, 0)),
            points: vec![point(0.05, Some(0.2)), point(0.1, None)],
        };
        let periods = result.peak_periods();
        assert_eq!(periods[0], 5.0);
        assert!(periods[1].is_nan());
        assert_eq!(result.sweep_len(), 2);
    }
}
