pub mod fft;
pub mod gaussian;
pub mod matrix;
pub mod stats;

pub use fft::FftHelper;
pub use gaussian::GaussianProfile;
pub use matrix::MatrixHelper;
pub use stats::StatsHelper;
