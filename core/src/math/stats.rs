pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Population variance.
    pub fn variance(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let mean = Self::mean(samples);
        samples.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / samples.len() as f64
    }

    /// Index of the first occurrence of the smallest value.
    pub fn argmin(samples: &[f64]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, &value) in samples.iter().enumerate() {
            match best {
                Some(current) if value >= samples[current] => {}
                _ => best = Some(idx),
            }
        }
        best
    }
}
