use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Helper that wraps the `rustfft` planner for reuse.
///
/// The inverse transform is left unnormalized: `output[k] = sum_m x[m] e^{+2 pi i k m / n}`.
pub struct FftHelper {
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl FftHelper {
    pub fn new_inverse(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_inverse(size);
        let scratch = vec![Complex64::zero(); fft.get_inplace_scratch_len()];
        Self { fft, scratch }
    }

    pub fn len(&self) -> usize {
        self.fft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fft.len() == 0
    }

    pub fn inverse(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer = input.to_vec();
        buffer.resize(self.fft.len(), Complex64::zero());
        self.fft.process_with_scratch(&mut buffer, &mut self.scratch);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_of_impulse_is_flat() {
        let mut helper = FftHelper::new_inverse(4);
        let output = helper.inverse(&[Complex64::new(1.0, 0.0)]);
        assert_eq!(output.len(), 4);
        for value in output {
            assert!((value.re - 1.0).abs() < 1e-12);
            assert!(value.im.abs() < 1e-12);
        }
    }

    #[test]
    fn inverse_uses_positive_exponent() {
        let mut helper = FftHelper::new_inverse(4);
        let output = helper.inverse(&[Complex64::zero(), Complex64::new(1.0, 0.0)]);
        // e^{+i pi / 2} at k = 1
        assert!(output[1].re.abs() < 1e-12);
        assert!((output[1].im - 1.0).abs() < 1e-12);
    }
}
