use log::{info, warn};

/// Stage-scoped wrapper around the `log` facade.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    pub fn record(&self, message: &str) {
        info!(target: "spotcore", "[{}] {}", self.target, message);
    }

    pub fn warn(&self, message: &str) {
        warn!(target: "spotcore", "[{}] {}", self.target, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("core")
    }
}
