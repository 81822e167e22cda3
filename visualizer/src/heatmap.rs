//! PNG heatmap of periodogram power over h/K and period, via plotters.

use crate::colormap::{Colormap, LogNorm, Plasma};
use crate::error::{RenderError, RenderResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use spotcore::SweepResult;
use std::path::Path;

/// Dashed vertical marker at a reference h/K value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLine {
    pub ratio: f64,
    pub label: String,
    pub color: [u8; 3],
}

/// Free text placed in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub ratio: f64,
    pub period: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub width: u32,
    pub height: u32,
    /// Lower bound of the logarithmic colour scale.
    pub vmin: f64,
    pub vmax: f64,
    pub colorbar_width: u32,
    pub thresholds: Vec<ThresholdLine>,
    pub annotations: Vec<Annotation>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            vmin: 0.02,
            vmax: 1.0,
            colorbar_width: 170,
            thresholds: vec![
                ThresholdLine {
                    ratio: 1.1,
                    label: "h/K = 1.1 (CI Tau)".into(),
                    color: [255, 255, 255],
                },
                ThresholdLine {
                    ratio: 4.0,
                    label: "h/K = 4.0 (optical)".into(),
                    color: [127, 255, 212],
                },
                ThresholdLine {
                    ratio: 1.7,
                    label: "h/K = 1.7 (H-band)".into(),
                    color: [255, 228, 196],
                },
            ],
            annotations: vec![
                Annotation {
                    ratio: 2.2,
                    period: 28.0,
                    text: "Injected planet".into(),
                },
                Annotation {
                    ratio: 2.2,
                    period: 11.0,
                    text: "Spot signal".into(),
                },
            ],
        }
    }
}

/// Cell boundaries for cells centred on `centers` (nearest shading).
///
/// Works for ascending or descending centres; interior edges are midpoints and
/// the outer edges are extrapolated by half a cell.
pub fn cell_edges(centers: &[f64]) -> Vec<f64> {
    match centers.len() {
        0 => Vec::new(),
        1 => vec![centers[0] - 0.5, centers[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centers[0] - 0.5 * (centers[1] - centers[0]));
            edges.extend(centers.windows(2).map(|w| 0.5 * (w[0] + w[1])));
            edges.push(centers[n - 1] + 0.5 * (centers[n - 1] - centers[n - 2]));
            edges
        }
    }
}

fn span(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

fn drawing_error<E: std::fmt::Debug>(err: E) -> RenderError {
    RenderError::Drawing(format!("{:?}", err))
}

pub struct HeatmapRenderer {
    config: HeatmapConfig,
    norm: LogNorm,
}

impl HeatmapRenderer {
    pub fn new(config: HeatmapConfig) -> RenderResult<Self> {
        let norm = LogNorm::new(config.vmin, config.vmax).ok_or_else(|| {
            RenderError::InvalidConfig(format!(
                "colour scale needs 0 < vmin < vmax, got [{}, {}]",
                config.vmin, config.vmax
            ))
        })?;
        if config.colorbar_width >= config.width {
            return Err(RenderError::InvalidConfig(
                "colorbar wider than the image".into(),
            ));
        }
        Ok(Self { config, norm })
    }

    pub fn render_to_file(&self, result: &SweepResult, path: impl AsRef<Path>) -> RenderResult<()> {
        Self::check_result(result)?;
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(RenderError::InvalidPath(path.to_path_buf()));
        }

        let root =
            BitMapBackend::new(path, (self.config.width, self.config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let (map_area, colorbar_area) =
            root.split_horizontally(self.config.width - self.config.colorbar_width);
        self.draw_map(&map_area, result)?;
        self.draw_colorbar(&colorbar_area)?;

        root.present().map_err(drawing_error)?;
        log::info!(
            "heatmap {}x{} written to {}",
            result.ratios.len(),
            result.periods.len(),
            path.display()
        );
        Ok(())
    }

    fn check_result(result: &SweepResult) -> RenderResult<()> {
        if result.ratios.is_empty() {
            return Err(RenderError::EmptyResult("ratios"));
        }
        if result.periods.is_empty() {
            return Err(RenderError::EmptyResult("periods"));
        }
        if result.powers.dim() != (result.ratios.len(), result.periods.len()) {
            return Err(RenderError::InvalidConfig(format!(
                "power matrix {:?} does not match {} ratios x {} periods",
                result.powers.dim(),
                result.ratios.len(),
                result.periods.len()
            )));
        }
        Ok(())
    }

    fn draw_map<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        result: &SweepResult,
    ) -> RenderResult<()>
    where
        DB::ErrorType: 'static,
    {
        let x_edges = cell_edges(&result.ratios);
        let y_edges = cell_edges(&result.periods);
        let (x_min, x_max) = span(&x_edges);
        let (y_min, y_max) = span(&y_edges);

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("h/K")
            .y_desc("Period (d)")
            .axis_desc_style(("sans-serif", 20))
            .label_style(("sans-serif", 14))
            .draw()
            .map_err(drawing_error)?;

        let colormap = Plasma;
        let cells = result
            .powers
            .indexed_iter()
            .map(|((step, bin), &power)| {
                let color = rgb(colormap.map(self.norm.normalize(power)));
                Rectangle::new(
                    [
                        (x_edges[step], y_edges[bin]),
                        (x_edges[step + 1], y_edges[bin + 1]),
                    ],
                    color.filled(),
                )
            });
        chart.draw_series(cells).map_err(drawing_error)?;

        for line in &self.config.thresholds {
            let color = rgb(line.color);
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(line.ratio, y_min), (line.ratio, y_max)],
                    12,
                    8,
                    color.stroke_width(2),
                ))
                .map_err(drawing_error)?
                .label(line.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(2))
                });
        }

        for note in &self.config.annotations {
            chart
                .draw_series(std::iter::once(Text::new(
                    note.text.clone(),
                    (note.ratio, note.period),
                    ("sans-serif", 16).into_font().color(&WHITE),
                )))
                .map_err(drawing_error)?;
        }

        if !self.config.thresholds.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 14))
                .draw()
                .map_err(drawing_error)?;
        }

        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> RenderResult<()>
    where
        DB::ErrorType: 'static,
    {
        let mut chart = ChartBuilder::on(area)
            .margin_top(20)
            .margin_bottom(80)
            .margin_left(10)
            .margin_right(10)
            .y_label_area_size(100)
            .build_cartesian_2d(0.0..1.0, (self.config.vmin..self.config.vmax).log_scale())
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_desc("Periodogram Power")
            .axis_desc_style(("sans-serif", 18))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(drawing_error)?;

        let steps = 256;
        let colormap = Plasma;
        let bands = (0..steps).map(|i| {
            let lo = i as f64 / steps as f64;
            let hi = (i + 1) as f64 / steps as f64;
            let color = rgb(colormap.map(0.5 * (lo + hi)));
            Rectangle::new(
                [(0.0, self.norm.invert(lo)), (1.0, self.norm.invert(hi))],
                color.filled(),
            )
        });
        chart.draw_series(bands).map_err(drawing_error)?;
        Ok(())
    }
}
