//! CSV workbook export: one file per sheet in an output directory.

use std::path::{Path, PathBuf};

use desorb_core::PhysicalConstants;
use desorb_reduce::{ReducedTrial, SeriesDataset, SeriesLabel};
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::run_service::RunOutcome;

#[derive(Serialize)]
struct DetailRow<'a> {
    id: &'a str,
    #[serde(rename = "L_v [L/h]")]
    liquid_flow: f64,
    #[serde(rename = "V_g [m3/h]")]
    gas_flow: f64,
    #[serde(rename = "T [C]")]
    temperature: f64,
    #[serde(rename = "C1 [mg/L]")]
    c_in: f64,
    #[serde(rename = "C2 [mg/L]")]
    c_out: f64,
    #[serde(rename = "U_L [m3/(m2.h)]")]
    irrigation_density: f64,
    #[serde(rename = "u [m/s]")]
    superficial_velocity: f64,
    #[serde(rename = "L [kmol/h]")]
    molar_liquid_flow: f64,
    x1: f64,
    x2: f64,
    x_star: f64,
    ln_term: f64,
    #[serde(rename = "Kxa [kmol/(m3.h)]")]
    kxa: f64,
    #[serde(rename = "H_OL [m]")]
    h_ol: f64,
}

#[derive(Serialize)]
struct ConditionRow {
    parameter: &'static str,
    value: f64,
    unit: &'static str,
}

fn writer(path: &Path) -> AppResult<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path).map_err(|e| export_error(path, e))
}

fn export_error(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn detail_sheet(path: &Path, series: &SeriesDataset) -> AppResult<()> {
    let mut wtr = writer(path)?;
    for t in series {
        let id = t.id();
        let row = DetailRow {
            id: &id,
            liquid_flow: t.raw.liquid_flow_l_h,
            gas_flow: t.raw.gas_flow_m3_h,
            temperature: t.raw.temperature_c,
            c_in: t.raw.c_in_mg_l,
            c_out: t.raw.c_out_mg_l,
            irrigation_density: t.irrigation_density,
            superficial_velocity: t.superficial_velocity,
            molar_liquid_flow: t.molar_liquid_flow,
            x1: t.x_in,
            x2: t.x_out,
            x_star: t.x_star,
            ln_term: t.ln_term,
            kxa: t.kxa,
            h_ol: t.h_ol,
        };
        wtr.serialize(&row).map_err(|e| export_error(path, e))?;
    }
    wtr.flush().map_err(|e| export_error(path, e))?;
    Ok(())
}

fn swept_flow(label: SeriesLabel, t: &ReducedTrial) -> f64 {
    match label {
        SeriesLabel::I => t.raw.liquid_flow_l_h,
        SeriesLabel::II => t.raw.gas_flow_m3_h,
    }
}

/// The summary sheet keeps only the swept flow and its derived variable.
fn summary_sheet(path: &Path, series: &SeriesDataset) -> AppResult<()> {
    let label = series.label();
    let flow_label = match label {
        SeriesLabel::I => "L_v [L/h]",
        SeriesLabel::II => "V_g [m3/h]",
    };
    let variable = series.operating_variable();
    let variable_label = format!("{} [{}]", variable.symbol(), variable.unit());

    let mut wtr = writer(path)?;
    wtr.write_record(["id", flow_label, variable_label.as_str(), "Kxa [kmol/(m3.h)]", "H_OL [m]"])
        .map_err(|e| export_error(path, e))?;
    for t in series {
        wtr.write_record([
            t.id(),
            swept_flow(label, t).to_string(),
            variable.value_of(t).to_string(),
            t.kxa.to_string(),
            t.h_ol.to_string(),
        ])
        .map_err(|e| export_error(path, e))?;
    }
    wtr.flush().map_err(|e| export_error(path, e))?;
    Ok(())
}

fn conditions_sheet(
    path: &Path,
    constants: &PhysicalConstants,
    packed_height_m: f64,
) -> AppResult<()> {
    let rows = [
        ("column diameter D", constants.diameter_m, "m"),
        ("cross-section F", constants.area_m2, "m2"),
        ("packed height h", packed_height_m, "m"),
        ("water density rho_w", constants.water_density_g_l, "g/L"),
        ("water molar mass M_w", constants.molar_mass_water, "g/mol"),
        ("oxygen molar mass M_O2", constants.molar_mass_o2, "g/mol"),
    ];
    let mut wtr = writer(path)?;
    for (parameter, value, unit) in rows {
        let row = ConditionRow {
            parameter,
            value,
            unit,
        };
        wtr.serialize(row).map_err(|e| export_error(path, e))?;
    }
    wtr.flush().map_err(|e| export_error(path, e))?;
    Ok(())
}

/// Write the five sheets of a run into `out_dir`, creating it if needed.
pub fn export_run(outcome: &RunOutcome, out_dir: &Path) -> AppResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let files = [
        "series_i_detail.csv",
        "series_ii_detail.csv",
        "series_i_summary.csv",
        "series_ii_summary.csv",
        "conditions.csv",
    ]
    .map(|name| out_dir.join(name));

    detail_sheet(&files[0], &outcome.series_i)?;
    detail_sheet(&files[1], &outcome.series_ii)?;
    summary_sheet(&files[2], &outcome.series_i)?;
    summary_sheet(&files[3], &outcome.series_ii)?;
    conditions_sheet(&files[4], &outcome.manifest.constants, outcome.packed_height_m())?;

    info!(run_id = %outcome.run_id, dir = %out_dir.display(), "exported run");
    Ok(files.to_vec())
}
