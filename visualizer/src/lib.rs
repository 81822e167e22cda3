//! Heatmap rendering for h/K periodogram sweeps.

pub mod colormap;
pub mod error;
pub mod heatmap;

pub use colormap::{Colormap, LogNorm, Plasma};
pub use error::{RenderError, RenderResult};
pub use heatmap::{Annotation, HeatmapConfig, HeatmapRenderer, ThresholdLine};
