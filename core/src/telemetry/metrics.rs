use std::sync::Mutex;

/// Counts sweep steps that completed or failed.
pub struct MetricsRecorder {
    inner: Mutex<SweepCounters>,
}

#[derive(Default)]
struct SweepCounters {
    steps_processed: usize,
    steps_failed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SweepCounters::default()),
        }
    }

    pub fn record_processed(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.steps_processed += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.steps_failed += 1;
        }
    }

    /// `(processed, failed)`.
    pub fn snapshot(&self) -> (usize, usize) {
        self.inner
            .lock()
            .map(|counters| (counters.steps_processed, counters.steps_failed))
            .unwrap_or((0, 0))
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_steps() {
        let metrics = MetricsRecorder::new();
        metrics.record_processed();
        metrics.record_processed();
        metrics.record_error();
        assert_eq!(metrics.snapshot(), (2, 1));
    }
}
