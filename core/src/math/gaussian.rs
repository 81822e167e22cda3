use crate::prelude::{StageError, StageResult};
use ndarray::ArrayView1;
use statrs::distribution::{Continuous, Normal};

/// Normal line profile centred on a radial velocity.
#[derive(Debug, Clone, Copy)]
pub struct GaussianProfile {
    normal: Normal,
}

impl GaussianProfile {
    pub fn new(center: f64, width: f64) -> StageResult<Self> {
        let normal = Normal::new(center, width).map_err(|err| {
            StageError::InvalidInput(format!(
                "gaussian profile (center {}, width {}): {}",
                center, width, err
            ))
        })?;
        Ok(Self { normal })
    }

    pub fn pdf(&self, x: f64) -> f64 {
        self.normal.pdf(x)
    }

    /// Writes the density at every axis point into `out`.
    pub fn evaluate_into(&self, axis: ArrayView1<f64>, out: &mut [f64]) -> StageResult<()> {
        if out.len() != axis.len() {
            return Err(StageError::ShapeMismatch {
                expected: axis.len(),
                found: out.len(),
            });
        }
        for (slot, &x) in out.iter_mut().zip(axis.iter()) {
            *slot = self.pdf(x);
        }
        Ok(())
    }
}
