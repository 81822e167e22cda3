pub mod buffer_pool;
pub mod ccf;
pub mod lomb_scargle;
pub mod periodogram;
pub mod sweep;

pub use buffer_pool::BufferPool;
pub use ccf::CcfStage;
pub use lomb_scargle::{FrequencyGrid, LombScargle, Periodogram};
pub use periodogram::PeriodogramStage;
pub use sweep::{run_sweep, SweepRunner};
