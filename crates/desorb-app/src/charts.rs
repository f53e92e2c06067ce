//! SVG charts of a reduced run.
//!
//! - chart 1: series II, Kxa and H_OL against u on log-log axes
//! - chart 2: series I, Kxa and H_OL against U_L on log-log axes
//! - chart 3: y-x diagram of the desorption (x scaled by 1e6)

use std::error::Error;
use std::path::{Path, PathBuf};

use desorb_core::min_max;
use desorb_fit::{FitOutcome, FitReport, FitResult};
use desorb_reduce::{ReducedTrial, SeriesDataset};
use plotters::prelude::*;
use tracing::info;

use crate::error::{AppError, AppResult};

type DrawResult = Result<(), Box<dyn Error>>;

/// Mole fraction of O2 in air; the gas-phase composition is taken as constant.
const AIR_O2_FRACTION: f64 = 0.21;
/// Scale applied to liquid mole fractions on the y-x diagram.
const X_SCALE: f64 = 1e6;

const ORANGE: RGBColor = RGBColor(255, 165, 0);

#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Image width in pixels (default: 1000)
    pub width: u32,
    /// Image height in pixels (default: 750)
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 750,
        }
    }
}

fn chart_error(path: &Path, e: Box<dyn Error>) -> AppError {
    AppError::Chart {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Log-axis bounds around the positive values, padded by a factor 1.25.
fn log_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let positive: Vec<f64> = values.filter(|v| v.is_finite() && *v > 0.0).collect();
    match min_max(&positive) {
        Some((lo, hi)) => (lo / 1.25, hi * 1.25),
        None => (0.1, 10.0),
    }
}

fn annotation_lines(outcome: &FitOutcome) -> Vec<String> {
    let Some(fit) = outcome.fitted() else {
        return vec![format!("{}: insufficient data", outcome.pair().coefficient)];
    };
    let mut lines = Vec::new();
    if let Some(eq) = fit.equation() {
        lines.push(eq);
    }
    if let Some(r) = fit.r {
        lines.push(format!("{} r = {r:.4}", fit.pair.coefficient));
    }
    lines
}

fn draw_coefficient_chart(
    path: &Path,
    series: &SeriesDataset,
    kxa: &FitOutcome,
    h_ol: &FitOutcome,
    title: &str,
    config: &ChartConfig,
) -> DrawResult {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let variable = series.operating_variable();
    let rows: Vec<&ReducedTrial> = series.positive_rows().collect();
    let kxa_curve = kxa.fitted().map(FitResult::curve).unwrap_or_default();
    let h_ol_curve = h_ol.fitted().map(FitResult::curve).unwrap_or_default();

    let (x_lo, x_hi) = log_bounds(
        rows.iter()
            .map(|t| variable.value_of(t))
            .chain(kxa_curve.iter().map(|p| p.0)),
    );
    let (k_lo, k_hi) = log_bounds(
        rows.iter()
            .map(|t| t.kxa)
            .chain(kxa_curve.iter().map(|p| p.1)),
    );
    let (h_lo, h_hi) = log_bounds(
        rows.iter()
            .map(|t| t.h_ol)
            .chain(h_ol_curve.iter().map(|p| p.1)),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .right_y_label_area_size(80)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), (k_lo..k_hi).log_scale())?
        .set_secondary_coord((x_lo..x_hi).log_scale(), (h_lo..h_hi).log_scale());

    chart
        .configure_mesh()
        .x_desc(format!("{} [{}]", variable.symbol(), variable.unit()))
        .y_desc("Kxa [kmol/(m3·h)]")
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc("H_OL [m]")
        .draw()?;

    chart
        .draw_series(
            rows.iter()
                .map(|t| Circle::new((variable.value_of(t), t.kxa), 5, BLUE.filled())),
        )?
        .label("Kxa")
        .legend(|(x, y)| Circle::new((x, y), 5, BLUE.filled()));
    if !kxa_curve.is_empty() {
        chart
            .draw_series(LineSeries::new(kxa_curve, BLUE.stroke_width(2)))?
            .label("Kxa fit")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));
    }

    chart
        .draw_secondary_series(
            rows.iter()
                .map(|t| TriangleMarker::new((variable.value_of(t), t.h_ol), 6, MAGENTA.filled())),
        )?
        .label("H_OL")
        .legend(|(x, y)| TriangleMarker::new((x, y), 6, MAGENTA.filled()));
    if !h_ol_curve.is_empty() {
        chart
            .draw_secondary_series(LineSeries::new(h_ol_curve, MAGENTA.stroke_width(2)))?
            .label("H_OL fit")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], MAGENTA.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let mut y = 70;
    for (outcome, color) in [(kxa, BLUE), (h_ol, MAGENTA)] {
        for line in annotation_lines(outcome) {
            root.draw(&Text::new(
                line,
                (config.width as i32 - 340, y),
                ("sans-serif", 16.0).into_font().color(&color),
            ))?;
            y += 22;
        }
    }

    root.present()?;
    Ok(())
}

fn draw_yx_diagram(
    path: &Path,
    series_i: &SeriesDataset,
    series_ii: &SeriesDataset,
    config: &ChartConfig,
) -> DrawResult {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let all_x: Vec<f64> = series_i
        .iter()
        .chain(series_ii.iter())
        .flat_map(|t| [t.x_in, t.x_out])
        .collect();
    let x_max = min_max(&all_x).map(|(_, hi)| hi * 1.2).unwrap_or(2e-5) * X_SCALE;
    let y = AIR_O2_FRACTION;

    let mut chart = ChartBuilder::on(&root)
        .caption("Oxygen desorption y-x diagram", ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, (y - 0.005)..(y + 0.005))?;

    chart
        .configure_mesh()
        .x_desc("liquid O2 mole fraction x (x10^6)")
        .y_desc("gas O2 mole fraction y")
        .draw()?;

    chart
        .draw_series(LineSeries::new([(0.0, y), (x_max, y)], BLACK.stroke_width(3)))?
        .label("equilibrium line")
        .legend(|(px, py)| {
            PathElement::new(vec![(px, py), (px + 20, py)], BLACK.stroke_width(3))
        });

    let trials = || series_i.iter().chain(series_ii.iter());
    let max_x1 = trials().map(|t| t.x_in).fold(f64::NAN, f64::max);
    let min_x2 = trials().map(|t| t.x_out).fold(f64::NAN, f64::min);
    if max_x1.is_finite() && min_x2.is_finite() {
        chart
            .draw_series(LineSeries::new(
                [(max_x1 * X_SCALE, y), (min_x2 * X_SCALE, y)],
                BLUE.stroke_width(2),
            ))?
            .label("operating line")
            .legend(|(px, py)| {
                PathElement::new(vec![(px, py), (px + 20, py)], BLUE.stroke_width(2))
            });
    }

    if let Some(first) = series_i.trials().first() {
        let x1 = first.x_in * X_SCALE;
        let x2 = first.x_out * X_SCALE;
        let xs = first.x_star * X_SCALE;

        chart
            .draw_series(std::iter::once(Circle::new((x1, y), 7, RED.filled())))?
            .label(format!("{} inlet", first.id()))
            .legend(|(px, py)| Circle::new((px, py), 5, RED.filled()));
        chart
            .draw_series(std::iter::once(Circle::new((x2, y), 7, GREEN.filled())))?
            .label(format!("{} outlet", first.id()))
            .legend(|(px, py)| Circle::new((px, py), 5, GREEN.filled()));

        let forces = [
            (x1, y - 0.001, RED, "driving force 1"),
            (x2, y - 0.0025, ORANGE, "driving force 2"),
        ];
        for (end, level, color, label) in forces {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(xs, level), (end, level)],
                color.stroke_width(2),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                label.to_string(),
                ((xs + end) / 2.0, level + 0.0004),
                ("sans-serif", 14.0).into_font().color(&color),
            )))?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Render the three charts into `out_dir`, creating it if needed.
pub fn render_charts(
    out_dir: &Path,
    series_i: &SeriesDataset,
    series_ii: &SeriesDataset,
    report: &FitReport,
    config: &ChartConfig,
) -> AppResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let chart1 = out_dir.join("chart1_series_ii_u.svg");
    draw_coefficient_chart(
        &chart1,
        series_ii,
        &report.series_ii_kxa,
        &report.series_ii_h_ol,
        "Series II: Kxa and H_OL vs superficial gas velocity u",
        config,
    )
    .map_err(|e| chart_error(&chart1, e))?;

    let chart2 = out_dir.join("chart2_series_i_ul.svg");
    draw_coefficient_chart(
        &chart2,
        series_i,
        &report.series_i_kxa,
        &report.series_i_h_ol,
        "Series I: Kxa and H_OL vs irrigation density U_L",
        config,
    )
    .map_err(|e| chart_error(&chart2, e))?;

    let chart3 = out_dir.join("chart3_yx_diagram.svg");
    draw_yx_diagram(&chart3, series_i, series_ii, config).map_err(|e| chart_error(&chart3, e))?;

    info!(dir = %out_dir.display(), "charts written");
    Ok(vec![chart1, chart2, chart3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_bounds_pad_and_fall_back() {
        let (lo, hi) = log_bounds([2.0, 0.0, -1.0, 8.0].into_iter());
        assert_eq!(lo, 2.0 / 1.25);
        assert_eq!(hi, 8.0 * 1.25);
        assert_eq!(log_bounds(std::iter::empty()), (0.1, 10.0));
    }
}
