//! Plain-text tables for terminal output.

use std::fmt::Write as _;

use desorb_core::{PhysicalConstants, units};
use desorb_fit::{FitOutcome, FitReport};
use desorb_reduce::{SeriesDataset, SeriesLabel};

const RULE_WIDTH: usize = 100;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// One line per trial: ordinal, the swept flow and its derived variable, Kxa, H_OL.
pub fn series_table(series: &SeriesDataset) -> String {
    let mut out = String::new();
    let title = match series.label() {
        SeriesLabel::I => "Series I (liquid-flow sweep)",
        SeriesLabel::II => "Series II (gas-flow sweep)",
    };
    let _ = writeln!(out, "{}\n{title}\n{}", rule(), rule());
    for t in series {
        let lead = match series.label() {
            SeriesLabel::I => format!(
                "L_v: {:6.1} L/h | U_L: {:6.2} m3/(m2·h)",
                t.raw.liquid_flow_l_h, t.irrigation_density
            ),
            SeriesLabel::II => format!(
                "V_g: {:6.1} m3/h | u: {:6.4} m/s",
                t.raw.gas_flow_m3_h, t.superficial_velocity
            ),
        };
        let _ = writeln!(
            out,
            "{:>6} | {lead} | Kxa: {:7.2} kmol/(m3·h) | H_OL: {:6.3} m",
            t.id(),
            t.kxa,
            t.h_ol
        );
    }
    out
}

/// Column geometry and packed height.
pub fn conditions_table(constants: &PhysicalConstants, packed_height_m: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\nExperimental conditions", rule());
    let _ = writeln!(
        out,
        "Column diameter D = {:.1} mm",
        units::to_mm(constants.diameter())
    );
    let _ = writeln!(out, "Cross-section F = {:.6} m2", constants.area_m2);
    let _ = writeln!(out, "Packed height h = {:.3} m", packed_height_m);
    let _ = writeln!(out, "{}", rule());
    out
}

fn describe(outcome: &FitOutcome) -> (String, String) {
    let title = outcome.pair().title();
    match outcome {
        FitOutcome::Insufficient { points, .. } => (
            format!("{title}: r = n/a ({points} usable rows)"),
            format!("{title}: no fit ({points} usable rows)"),
        ),
        FitOutcome::Fitted(fit) => {
            let r = fit
                .r
                .map(|r| format!("{title}: r = {r:.4}"))
                .unwrap_or_else(|| format!("{title}: r = n/a (constant data)"));
            let eq = fit
                .equation()
                .map(|e| format!("{title}: {e}"))
                .unwrap_or_else(|| {
                    let symbol = fit.pair.variable().symbol();
                    format!("{title}: no fit (no spread in {symbol})")
                });
            (r, eq)
        }
    }
}

/// Pearson r for each of the four pairs.
pub fn correlation_table(report: &FitReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\nCorrelation coefficients", rule());
    for outcome in report.iter() {
        let _ = writeln!(out, "{}", describe(outcome).0);
    }
    out
}

/// Fitted power laws for each of the four pairs.
pub fn fit_table(report: &FitReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\nEmpirical correlations", rule());
    for outcome in report.iter() {
        let _ = writeln!(out, "{}", describe(outcome).1);
    }
    let _ = writeln!(out, "{}", rule());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use desorb_fit::analyze_run;
    use desorb_reduce::{RawTrial, process};

    #[test]
    fn series_rows_follow_the_fixed_layout() {
        let ds = process(
            SeriesLabel::I,
            &[RawTrial::new(30.0, 20.0, 25.0, 22.0, 9.5)],
            0.8,
        );
        let text = series_table(&ds);
        assert!(text.contains("   I-1 | L_v:   30.0 L/h | U_L:   3.67 m3/(m2·h)"));
        assert!(text.contains("Kxa: "));

        let ds = process(
            SeriesLabel::II,
            &[RawTrial::new(45.0, 10.0, 25.0, 22.0, 9.0)],
            0.8,
        );
        assert!(series_table(&ds).contains("  II-1 | V_g:   10.0 m3/h | u: 0.3399 m/s"));
    }

    #[test]
    fn conditions_in_display_units() {
        let text = conditions_table(&PhysicalConstants::rig(), 0.8);
        assert!(text.contains("D = 102.0 mm"));
        assert!(text.contains("F = 0.008171 m2"));
        assert!(text.contains("h = 0.800 m"));
    }

    #[test]
    fn insufficient_pairs_are_reported_not_hidden() {
        let one = process(
            SeriesLabel::I,
            &[RawTrial::new(30.0, 20.0, 25.0, 22.0, 9.5)],
            0.8,
        );
        let two = process(
            SeriesLabel::II,
            &[
                RawTrial::new(45.0, 10.0, 25.0, 22.0, 9.0),
                RawTrial::new(45.0, 20.0, 25.0, 22.0, 10.0),
            ],
            0.8,
        );
        let report = analyze_run(&one, &two);
        let r = correlation_table(&report);
        assert!(r.contains("Series I: Kxa vs U_L: r = n/a (1 usable rows)"));
        assert!(r.contains("Series II: Kxa vs u: r = -1.0000"));
        let fits = fit_table(&report);
        assert!(fits.contains("Series II: H_OL vs u: H_OL = "));
    }
}
