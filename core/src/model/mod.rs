pub mod params;
pub mod periodogram;
pub mod sweep;

pub use params::{RvAxis, SimulationParameters};
pub use periodogram::{Normalization, PeriodogramConfig, PeriodogramMethod};
pub use sweep::{SweepPoint, SweepResult};
