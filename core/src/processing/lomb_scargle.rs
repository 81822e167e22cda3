//! Floating-mean Lomb-Scargle periodogram.
//!
//! The power at each frequency is the fraction of the series variance explained
//! by a least-squares sinusoid plus offset. Two evaluation strategies share the
//! same algebra: direct trigonometric sums, and the Press & Rybicki (1989)
//! approximation that spreads every sample over a regular grid and recovers
//! all sums with a single inverse FFT.

use crate::math::fft::FftHelper;
use crate::model::{Normalization, PeriodogramConfig, PeriodogramMethod};
use crate::prelude::{StageError, StageResult};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Variance below this fraction of the mean square is treated as a constant series.
const DEGENERATE_VARIANCE_RATIO: f64 = 1e-20;

/// Basis terms whose weighted energy falls below this contribute no power.
const MIN_BASIS_ENERGY: f64 = 1e-12;

/// Regular frequency grid `start + step * k` for `k in 0..len`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyGrid {
    pub start: f64,
    pub step: f64,
    pub len: usize,
}

impl FrequencyGrid {
    pub fn values(&self) -> Vec<f64> {
        (0..self.len)
            .map(|k| self.start + self.step * k as f64)
            .collect()
    }
}

/// Frequency grid plus power, ascending frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Periodogram {
    pub frequencies: Vec<f64>,
    pub powers: Vec<f64>,
}

impl Periodogram {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// `1 / f` for every grid point, same order as `frequencies`.
    pub fn periods(&self) -> Vec<f64> {
        self.frequencies.iter().map(|f| 1.0 / f).collect()
    }

    /// Frequency and power of the strongest finite bin.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(self.powers.iter())
            .filter(|(_, p)| p.is_finite())
            .fold(None, |best: Option<(f64, f64)>, (&f, &p)| match best {
                Some((_, best_power)) if best_power >= p => best,
                _ => Some((f, p)),
            })
    }
}

/// Lomb-Scargle engine; keeps the FFT plan of the fast method between calls.
#[derive(Default)]
pub struct LombScargle {
    fft: Option<FftHelper>,
}

impl LombScargle {
    pub fn new() -> Self {
        Self { fft: None }
    }

    /// Grid with `samples_per_peak` points across each peak of width `1 / baseline`.
    pub fn autofrequency(times: &[f64], config: &PeriodogramConfig) -> StageResult<FrequencyGrid> {
        if times.len() < 2 {
            return Err(StageError::InvalidInput(
                "at least two epochs are required".into(),
            ));
        }
        if config.samples_per_peak <= 0.0 || !config.samples_per_peak.is_finite() {
            return Err(StageError::InvalidInput(format!(
                "samples_per_peak must be positive, got {}",
                config.samples_per_peak
            )));
        }

        let (min_t, max_t) = time_bounds(times);
        let baseline = max_t - min_t;
        if baseline <= 0.0 || !baseline.is_finite() {
            return Err(StageError::InvalidInput(format!(
                "observation baseline must be positive, got {}",
                baseline
            )));
        }

        let step = 1.0 / baseline / config.samples_per_peak;
        let start = config.minimum_frequency.unwrap_or(0.5 * step);
        let end = config
            .maximum_frequency
            .unwrap_or(config.nyquist_factor * 0.5 * times.len() as f64 / baseline);
        if start <= 0.0 || end <= start {
            return Err(StageError::InvalidInput(format!(
                "invalid frequency range [{}, {}]",
                start, end
            )));
        }

        let len = 1 + ((end - start) / step).round() as usize;
        Ok(FrequencyGrid { start, step, len })
    }

    pub fn autopower(
        &mut self,
        times: &[f64],
        values: &[f64],
        config: &PeriodogramConfig,
    ) -> StageResult<Periodogram> {
        let grid = Self::autofrequency(times, config)?;
        let powers = self.power(times, values, &grid, config)?;
        Ok(Periodogram {
            frequencies: grid.values(),
            powers,
        })
    }

    pub fn power(
        &mut self,
        times: &[f64],
        values: &[f64],
        grid: &FrequencyGrid,
        config: &PeriodogramConfig,
    ) -> StageResult<Vec<f64>> {
        if times.len() != values.len() {
            return Err(StageError::InvalidInput(format!(
                "{} epochs but {} values",
                times.len(),
                values.len()
            )));
        }
        if values.len() < 2 {
            return Err(StageError::InvalidInput(
                "at least two samples are required".into(),
            ));
        }
        if times.iter().chain(values.iter()).any(|v| !v.is_finite()) {
            return Err(StageError::InvalidInput("non-finite sample".into()));
        }
        if grid.len == 0 || grid.step <= 0.0 {
            return Err(StageError::InvalidInput("empty frequency grid".into()));
        }

        let n = values.len();
        let weight = 1.0 / n as f64;
        let mean = values.iter().sum::<f64>() * weight;
        let centered: Vec<f64> = values.iter().map(|v| v - mean).collect();
        let yy: f64 = centered.iter().map(|y| weight * y * y).sum();
        let mean_square: f64 = values.iter().map(|v| weight * v * v).sum();
        if yy <= mean_square * DEGENERATE_VARIANCE_RATIO {
            return Err(StageError::DegenerateSeries(format!(
                "series of {} samples has zero variance",
                n
            )));
        }

        let weights = vec![weight; n];
        let weighted: Vec<f64> = centered.iter().map(|y| weight * y).collect();

        let method = config.method.resolve(grid.len);
        let (sh, ch) = self.trig_sums(times, &weighted, grid, 1.0, method, config)?;
        let (s2, c2) = self.trig_sums(times, &weights, grid, 2.0, method, config)?;
        let (s, c) = self.trig_sums(times, &weights, grid, 1.0, method, config)?;

        let mut powers = Vec::with_capacity(grid.len);
        for k in 0..grid.len {
            let (c2w, s2w) = double_angle_shift(
                s2[k] - 2.0 * s[k] * c[k],
                c2[k] - (c[k] * c[k] - s[k] * s[k]),
            );
            let cw = (0.5 * (1.0 + c2w)).sqrt();
            let sw = sign(s2w) * (0.5 * (1.0 - c2w)).sqrt();

            let yc = ch[k] * cw + sh[k] * sw;
            let ys = sh[k] * cw - ch[k] * sw;
            let cc = 0.5 * (1.0 + c2[k] * c2w + s2[k] * s2w) - (c[k] * cw + s[k] * sw).powi(2);
            let ss = 0.5 * (1.0 - c2[k] * c2w - s2[k] * s2w) - (s[k] * cw - c[k] * sw).powi(2);

            let raw = basis_power(yc, cc) + basis_power(ys, ss);
            powers.push(normalize(raw, yy, n, config.normalization));
        }

        Ok(powers)
    }

    fn trig_sums(
        &mut self,
        times: &[f64],
        h: &[f64],
        grid: &FrequencyGrid,
        freq_factor: f64,
        method: PeriodogramMethod,
        config: &PeriodogramConfig,
    ) -> StageResult<(Vec<f64>, Vec<f64>)> {
        let f0 = grid.start * freq_factor;
        let df = grid.step * freq_factor;
        match method {
            PeriodogramMethod::Fast => self.extirpolated_sums(times, h, f0, df, grid.len, config),
            _ => Ok(direct_sums(times, h, f0, df, grid.len)),
        }
    }

    /// `S[k] = sum h sin(2 pi f_k t)` and `C[k]` likewise, via extirpolation and one inverse FFT.
    fn extirpolated_sums(
        &mut self,
        times: &[f64],
        h: &[f64],
        f0: f64,
        df: f64,
        len: usize,
        config: &PeriodogramConfig,
    ) -> StageResult<(Vec<f64>, Vec<f64>)> {
        if config.oversampling == 0 || config.extirpolation_points == 0 {
            return Err(StageError::InvalidInput(
                "oversampling and extirpolation points must be positive".into(),
            ));
        }
        let nfft = (len * config.oversampling).next_power_of_two();
        let (t0, _) = time_bounds(times);

        let shifted: Vec<Complex64> = times
            .iter()
            .zip(h.iter())
            .map(|(&t, &value)| {
                if f0 > 0.0 {
                    value * Complex64::from_polar(1.0, 2.0 * PI * f0 * (t - t0))
                } else {
                    Complex64::new(value, 0.0)
                }
            })
            .collect();
        let positions: Vec<f64> = times
            .iter()
            .map(|&t| ((t - t0) * nfft as f64 * df).rem_euclid(nfft as f64))
            .collect();

        let grid = extirpolate(&positions, &shifted, nfft, config.extirpolation_points)?;

        let fft = match self.fft.take() {
            Some(helper) if helper.len() == nfft => self.fft.insert(helper),
            _ => self.fft.insert(FftHelper::new_inverse(nfft)),
        };
        let spectrum = fft.inverse(&grid);

        let mut sines = Vec::with_capacity(len);
        let mut cosines = Vec::with_capacity(len);
        for (k, &value) in spectrum.iter().take(len).enumerate() {
            let value = if t0 != 0.0 {
                value * Complex64::from_polar(1.0, 2.0 * PI * t0 * (f0 + df * k as f64))
            } else {
                value
            };
            cosines.push(value.re);
            sines.push(value.im);
        }
        Ok((sines, cosines))
    }
}

fn time_bounds(times: &[f64]) -> (f64, f64) {
    times
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        })
}

fn direct_sums(times: &[f64], h: &[f64], f0: f64, df: f64, len: usize) -> (Vec<f64>, Vec<f64>) {
    let mut sines = vec![0.0; len];
    let mut cosines = vec![0.0; len];
    for k in 0..len {
        let omega = 2.0 * PI * (f0 + df * k as f64);
        for (&t, &value) in times.iter().zip(h.iter()) {
            let (sin, cos) = (omega * t).sin_cos();
            sines[k] += value * sin;
            cosines[k] += value * cos;
        }
    }
    (sines, cosines)
}

/// Spreads each `(x, y)` over `points` neighbouring integer slots so that
/// `sum_j y_j g(x_j) ~= sum_m result_m g(m)` for smooth `g`.
fn extirpolate(
    positions: &[f64],
    values: &[Complex64],
    size: usize,
    points: usize,
) -> StageResult<Vec<Complex64>> {
    if size < points {
        return Err(StageError::InvalidInput(format!(
            "extirpolation grid of {} is smaller than {} points",
            size, points
        )));
    }

    let mut result = vec![Complex64::new(0.0, 0.0); size];
    let factorial: f64 = (1..points).map(|v| v as f64).product();

    for (&x, &y) in positions.iter().zip(values.iter()) {
        if x.fract() == 0.0 {
            result[x as usize % size] += y;
            continue;
        }

        let ilo = ((x - (points / 2) as f64) as i64).clamp(0, (size - points) as i64) as usize;
        let numerator = y * (0..points)
            .map(|k| x - (ilo + k) as f64)
            .product::<f64>();
        let mut denominator = factorial;
        for j in 0..points {
            if j > 0 {
                denominator *= j as f64 / (j as f64 - points as f64);
            }
            let index = ilo + (points - 1 - j);
            result[index] += numerator / (denominator * (x - index as f64));
        }
    }

    Ok(result)
}

/// Cosine and sine of `2 omega tau`, taking `tan(2 omega tau) = num / den` on the principal branch.
fn double_angle_shift(num: f64, den: f64) -> (f64, f64) {
    let radius = num.hypot(den);
    if radius == 0.0 {
        (1.0, 0.0)
    } else if den == 0.0 {
        (0.0, sign(num))
    } else {
        (den.abs() / radius, num * sign(den) / radius)
    }
}

fn basis_power(projection: f64, energy: f64) -> f64 {
    if energy <= MIN_BASIS_ENERGY {
        0.0
    } else {
        projection * projection / energy
    }
}

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn normalize(raw: f64, yy: f64, samples: usize, normalization: Normalization) -> f64 {
    match normalization {
        Normalization::Standard => raw / yy,
        Normalization::Model => raw / (yy - raw),
        Normalization::Log => -(1.0 - raw / yy).ln(),
        Normalization::Psd => raw * 0.5 * samples as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::stats::StatsHelper;

    fn sinusoid(frequency: f64, samples: usize) -> (Vec<f64>, Vec<f64>) {
        let times: Vec<f64> = (0..samples)
            .map(|i| 100.0 * i as f64 / (samples - 1) as f64)
            .collect();
        let values = times
            .iter()
            .map(|&t| 3.0 + (2.0 * PI * frequency * t).sin() + 0.3 * (2.0 * PI * 0.23 * t).cos())
            .collect();
        (times, values)
    }

    fn config_with(method: PeriodogramMethod) -> PeriodogramConfig {
        PeriodogramConfig {
            method,
            ..Default::default()
        }
    }

    #[test]
    fn autofrequency_matches_oversampled_grid() {
        let (times, _) = sinusoid(0.05, 100);
        let grid = LombScargle::autofrequency(&times, &PeriodogramConfig::default()).unwrap();
        assert_eq!(grid.len, 3451);
        assert!((grid.step - 2e-4).abs() < 1e-12);
        let values = grid.values();
        assert!(values[0] >= 0.01 - 1e-9);
        assert!(*values.last().unwrap() <= 0.7 + 1e-9);
    }

    #[test]
    fn autofrequency_defaults_follow_nyquist_factor() {
        let (times, _) = sinusoid(0.05, 100);
        let config = PeriodogramConfig {
            minimum_frequency: None,
            maximum_frequency: None,
            samples_per_peak: 5.0,
            ..Default::default()
        };
        let grid = LombScargle::autofrequency(&times, &config).unwrap();
        assert!((grid.start - 0.001).abs() < 1e-12);
        let last = grid.values()[grid.len - 1];
        assert!((last - 2.5).abs() < grid.step);
    }

    #[test]
    fn exact_method_recovers_injected_frequency() {
        let (times, values) = sinusoid(0.0396, 100);
        let mut engine = LombScargle::new();
        let periodogram = engine
            .autopower(&times, &values, &config_with(PeriodogramMethod::Exact))
            .unwrap();
        let (frequency, power) = periodogram.peak().unwrap();
        assert!((frequency - 0.0396).abs() < 2e-3);
        assert!(power > 0.8 && power <= 1.0 + 1e-9);
    }

    #[test]
    fn fast_method_tracks_exact_method() {
        let (times, values) = sinusoid(0.11, 100);
        let mut engine = LombScargle::new();
        let exact = engine
            .autopower(&times, &values, &config_with(PeriodogramMethod::Exact))
            .unwrap();
        let fast = engine
            .autopower(&times, &values, &config_with(PeriodogramMethod::Fast))
            .unwrap();

        assert_eq!(exact.frequencies, fast.frequencies);
        // Stay clear of the sampling Nyquist frequency, where both sums are ill-conditioned.
        let max_diff = exact
            .frequencies
            .iter()
            .zip(exact.powers.iter().zip(fast.powers.iter()))
            .filter(|(f, _)| **f < 0.4)
            .map(|(_, (a, b))| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(max_diff < 0.02, "max difference {}", max_diff);

        let (exact_peak, _) = exact.peak().unwrap();
        let (fast_peak, _) = fast.peak().unwrap();
        assert!((exact_peak - fast_peak).abs() < 1e-3);
    }

    #[test]
    fn constant_series_is_rejected_as_degenerate() {
        let times: Vec<f64> = (0..100).map(f64::from).collect();
        let values = vec![16.39; 100];
        let mut engine = LombScargle::new();
        for method in [PeriodogramMethod::Exact, PeriodogramMethod::Fast] {
            let err = engine
                .autopower(&times, &values, &config_with(method))
                .unwrap_err();
            assert!(matches!(err, StageError::DegenerateSeries(_)));
        }
    }

    #[test]
    fn mismatched_lengths_are_invalid() {
        let mut engine = LombScargle::new();
        let err = engine
            .autopower(&[0.0, 1.0, 2.0], &[1.0, 2.0], &PeriodogramConfig::default())
            .unwrap_err();
        assert!(matches!(err, StageError::InvalidInput(_)));
    }

    #[test]
    fn model_normalization_is_monotone_in_standard_power() {
        let (times, values) = sinusoid(0.0396, 64);
        let mut engine = LombScargle::new();
        let standard = engine
            .autopower(&times, &values, &config_with(PeriodogramMethod::Exact))
            .unwrap();
        let model = engine
            .autopower(
                &times,
                &values,
                &PeriodogramConfig {
                    method: PeriodogramMethod::Exact,
                    normalization: Normalization::Model,
                    ..Default::default()
                },
            )
            .unwrap();
        for (p, m) in standard.powers.iter().zip(model.powers.iter()) {
            if *p < 0.999 {
                assert!((m - p / (1.0 - p)).abs() < 1e-6 * (1.0 + m.abs()));
            }
        }
    }

    fn exact_powers(times: &[f64], values: &[f64], normalization: Normalization) -> Vec<f64> {
        let config = PeriodogramConfig {
            method: PeriodogramMethod::Exact,
            normalization,
            ..Default::default()
        };
        LombScargle::new()
            .autopower(times, values, &config)
            .unwrap()
            .powers
    }

    #[test]
    fn log_normalization_is_negative_log_of_unexplained_variance() {
        let (times, values) = sinusoid(0.0396, 64);
        let standard = exact_powers(&times, &values, Normalization::Standard);
        let log = exact_powers(&times, &values, Normalization::Log);
        for (p, l) in standard.iter().zip(log.iter()) {
            if *p < 0.999 {
                assert!((l + (1.0 - p).ln()).abs() < 1e-6 * (1.0 + l.abs()));
            }
        }
    }

    #[test]
    fn psd_normalization_scales_by_variance_and_sample_count() {
        let (times, values) = sinusoid(0.0396, 64);
        let yy = StatsHelper::variance(&values);
        let standard = exact_powers(&times, &values, Normalization::Standard);
        let psd = exact_powers(&times, &values, Normalization::Psd);
        for (p, q) in standard.iter().zip(psd.iter()) {
            let expected = p * yy * 64.0 / 2.0;
            assert!((q - expected).abs() < 1e-9 * (1.0 + expected.abs()));
        }
    }

    #[test]
    fn extirpolation_preserves_total_weight() {
        let positions = [0.0, 2.5, 7.25];
        let values = [
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(-0.5, 0.0),
        ];
        let grid = extirpolate(&positions, &values, 16, 4).unwrap();
        let total: f64 = grid.iter().map(|v| v.re).sum();
        assert!((total - 2.5).abs() < 1e-12);
    }

    #[test]
    fn periods_invert_frequencies() {
        let periodogram = Periodogram {
            frequencies: vec![0.01, 0.0396, 0.7],
            powers: vec![0.1, 0.9, 0.2],
        };
        for (f, p) in periodogram.frequencies.iter().zip(periodogram.periods()) {
            assert!((f * p - 1.0).abs() < 1e-9);
        }
        assert_eq!(periodogram.peak(), Some((0.0396, 0.9)));
    }
}
