//! Numerical core of the stellar-spot / planet radial-velocity confusion study.
//!
//! A spotted stellar line is synthesized as a cross-correlation function at
//! every epoch, the RV of its minimum is tracked, and a Lomb-Scargle
//! periodogram of that RV series is computed for each spot-to-planet
//! amplitude ratio (h/K) in a sweep.

pub mod math;
pub mod model;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use model::{SimulationParameters, SweepResult};
pub use prelude::{ProcessingStage, StageError, StageInput, StageOutput};
pub use processing::{run_sweep, SweepRunner};
