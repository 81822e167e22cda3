//! Colour mapping for periodogram power.

/// Maps a value in [0, 1] to an RGB colour.
pub trait Colormap {
    fn map(&self, value: f64) -> [u8; 3];
}

/// Plasma colormap: blue-purple -> pink -> orange -> yellow.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plasma;

const PLASMA_KEYS: &[(f64, [u8; 3])] = &[
    (0.00, [13, 8, 135]),
    (0.25, [126, 3, 168]),
    (0.50, [204, 71, 120]),
    (0.75, [248, 149, 64]),
    (1.00, [240, 249, 33]),
];

fn interpolate(keys: &[(f64, [u8; 3])], value: f64) -> [u8; 3] {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

    let lower = keys.iter().rposition(|&(t, _)| t <= v).unwrap_or(0);
    let upper = (lower + 1).min(keys.len() - 1);
    if lower == upper {
        return keys[lower].1;
    }

    let (t0, c0) = keys[lower];
    let (t1, c1) = keys[upper];
    let t = (v - t0) / (t1 - t0);
    let channel = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).round() as u8;
    [
        channel(c0[0], c1[0]),
        channel(c0[1], c1[1]),
        channel(c0[2], c1[2]),
    ]
}

impl Colormap for Plasma {
    fn map(&self, value: f64) -> [u8; 3] {
        interpolate(PLASMA_KEYS, value)
    }
}

/// Logarithmic normalization onto [0, 1]; values outside `[vmin, vmax]` are clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNorm {
    pub vmin: f64,
    pub vmax: f64,
}

impl LogNorm {
    pub fn new(vmin: f64, vmax: f64) -> Option<Self> {
        (vmin > 0.0 && vmax > vmin).then_some(Self { vmin, vmax })
    }

    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() || value <= 0.0 {
            return 0.0;
        }
        let scaled = (value.ln() - self.vmin.ln()) / (self.vmax.ln() - self.vmin.ln());
        scaled.clamp(0.0, 1.0)
    }

    /// Value at normalized position `t` in [0, 1].
    pub fn invert(&self, t: f64) -> f64 {
        self.vmin * (self.vmax / self.vmin).powf(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plasma_hits_key_colors_at_ends() {
        assert_eq!(Plasma.map(0.0), [13, 8, 135]);
        assert_eq!(Plasma.map(1.0), [240, 249, 33]);
        assert_eq!(Plasma.map(-3.0), [13, 8, 135]);
        assert_eq!(Plasma.map(f64::NAN), [13, 8, 135]);
    }

    #[test]
    fn plasma_interpolates_between_keys() {
        let [r, _, _] = Plasma.map(0.125);
        assert!(r > 13 && r < 126);
    }

    #[test]
    fn log_norm_clips_and_scales() {
        let norm = LogNorm::new(0.02, 1.0).unwrap();
        assert_eq!(norm.normalize(0.02), 0.0);
        assert_eq!(norm.normalize(1.0), 1.0);
        assert_eq!(norm.normalize(0.001), 0.0);
        assert_eq!(norm.normalize(0.0), 0.0);
        assert_eq!(norm.normalize(f64::NAN), 0.0);
        assert_eq!(norm.normalize(2.0), 1.0);
        let mid = norm.normalize((0.02f64).sqrt());
        assert!((mid - 0.5).abs() < 1e-12);
        assert!((norm.invert(0.5) - (0.02f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn log_norm_rejects_non_positive_bounds() {
        assert!(LogNorm::new(0.0, 1.0).is_none());
        assert!(LogNorm::new(0.5, 0.1).is_none());
    }
}
