use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use desorb_app::{
    AppError, AppResult, ChartConfig, ExperimentSource, RunOptions, RunOutcome, RunProgressEvent,
    RunRequest, Session, query, run_service, tables,
};
use desorb_core::PhysicalConstants;
use desorb_fit::analyze_run;
use desorb_project::{DEMO_PACKED_HEIGHT_M, parse_trial_line};
use desorb_reduce::{SeriesLabel, process_validated, validate};
use desorb_results::RunStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "desorb")]
#[command(about = "Oxygen desorption packed-column data reduction", long_about = None)]
struct Cli {
    /// Run store directory shared by every command
    #[arg(long, global = true, default_value = run_service::DEFAULT_STORE_DIR)]
    store: PathBuf,
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an experiment file
    Validate {
        /// Path to the experiment YAML or JSON file
        experiment_path: PathBuf,
    },
    /// Check a single trial's admissibility
    Check {
        /// Water temperature [°C]
        temperature_c: f64,
        /// Inlet O2 concentration C1 [mg/L]
        c_in_mg_l: f64,
        /// Outlet O2 concentration C2 [mg/L]
        c_out_mg_l: f64,
    },
    /// Reduce one comma-separated trial "L_v, V_g, T, C1, C2"
    Trial {
        line: String,
        /// Series the trial belongs to (I or II)
        #[arg(long, default_value = "I")]
        series: String,
        /// Packed height [m]
        #[arg(long, default_value_t = DEMO_PACKED_HEIGHT_M)]
        height: f64,
    },
    /// Reduce an experiment file
    Run {
        /// Path to the experiment YAML or JSON file
        experiment_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// Reduce the built-in demonstration data
    Demo {
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs
    Runs,
    /// Show details of a cached run
    ShowRun {
        /// Run ID, or "last"
        run_id: String,
    },
    /// Export a run as CSV sheets
    Export {
        /// Run ID, or "last"
        run_id: String,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Draw the SVG charts of a run
    Plot {
        /// Run ID, or "last"
        run_id: String,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        /// Image width in pixels
        #[arg(long, default_value_t = 1000)]
        width: u32,
        /// Image height in pixels
        #[arg(long, default_value_t = 750)]
        height: u32,
    },
    /// Print the column geometry
    Conditions {
        /// Packed height [m]
        #[arg(long, default_value_t = DEMO_PACKED_HEIGHT_M)]
        height: f64,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| {
            clear_progress_line();
            io::stderr()
        })
        .with_target(false)
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    desorb_props::check_tables()?;

    let store = cli.store.as_path();
    match cli.command {
        Commands::Validate { experiment_path } => cmd_validate(&experiment_path),
        Commands::Check {
            temperature_c,
            c_in_mg_l,
            c_out_mg_l,
        } => cmd_check(temperature_c, c_in_mg_l, c_out_mg_l),
        Commands::Trial {
            line,
            series,
            height,
        } => cmd_trial(&line, &series, height),
        Commands::Run {
            experiment_path,
            no_cache,
        } => cmd_run(ExperimentSource::File(&experiment_path), store, !no_cache),
        Commands::Demo { no_cache } => cmd_run(ExperimentSource::Demo, store, !no_cache),
        Commands::Runs => cmd_runs(store),
        Commands::ShowRun { run_id } => cmd_show_run(store, &run_id),
        Commands::Export { run_id, out } => cmd_export(store, &run_id, &out),
        Commands::Plot {
            run_id,
            out,
            width,
            height,
        } => cmd_plot(store, &run_id, &out, ChartConfig { width, height }),
        Commands::Conditions { height } => cmd_conditions(height),
    }
}

fn cmd_validate(experiment_path: &Path) -> AppResult<()> {
    println!("Validating experiment: {}", experiment_path.display());
    let experiment = run_service::load_experiment(ExperimentSource::File(experiment_path))?;
    println!("✓ Experiment is valid");
    println!("  Name: {}", experiment.name);
    println!("  Packed height: {:.3} m", experiment.packed_height_m);
    println!(
        "  Trials: {} (series I) + {} (series II)",
        experiment.series_i.len(),
        experiment.series_ii.len()
    );
    Ok(())
}

fn cmd_check(temperature_c: f64, c_in_mg_l: f64, c_out_mg_l: f64) -> AppResult<()> {
    let v = validate(temperature_c, c_in_mg_l, c_out_mg_l);
    println!(
        "T = {:.1} °C, C1 = {:.2} mg/L, C2 = {:.2} mg/L, C_sat = {:.2} mg/L",
        v.temperature_c, v.c_in_mg_l, v.c_out_mg_l, v.c_sat_mg_l
    );
    if v.is_ok() {
        println!("✓ Trial is admissible");
        Ok(())
    } else {
        Err(AppError::InvalidInput(v.message()))
    }
}

fn parse_series(text: &str) -> AppResult<SeriesLabel> {
    match text.trim().to_ascii_uppercase().as_str() {
        "I" | "1" => Ok(SeriesLabel::I),
        "II" | "2" => Ok(SeriesLabel::II),
        other => Err(AppError::InvalidInput(format!(
            "unknown series '{other}' (expected I or II)"
        ))),
    }
}

fn cmd_trial(line: &str, series: &str, height: f64) -> AppResult<()> {
    let label = parse_series(series)?;
    let raw = parse_trial_line(line).map_err(|e| AppError::InvalidInput(e.to_string()))?;
    let dataset = process_validated(label, &[raw], height)?;
    print!("{}", tables::series_table(&dataset));
    for t in &dataset {
        println!(
            "  x1 = {:.4e}  x2 = {:.4e}  x* = {:.4e}  ln term = {:.4}",
            t.x_in, t.x_out, t.x_star, t.ln_term
        );
    }
    Ok(())
}

fn cmd_run(source: ExperimentSource, store_dir: &Path, use_cache: bool) -> AppResult<()> {
    match source {
        ExperimentSource::File(path) => println!("Reducing experiment: {}", path.display()),
        ExperimentSource::Demo => println!("Reducing demonstration data"),
    }

    let request = RunRequest {
        source,
        store_dir: Some(store_dir),
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let outcome = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if outcome.loaded_from_cache {
        println!("✓ Loaded from cache: {}", outcome.run_id);
    } else {
        println!("✓ Reduction completed: {}", outcome.run_id);
    }
    println!("  Store: {}", store_dir.display());

    print_reduction(&outcome);
    Ok(())
}

// The spinner shares stderr with the log output; every log event and every
// redraw starts from a blank line.
fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(80));
    let _ = io::stderr().flush();
}

fn progress_line(event: &RunProgressEvent) -> String {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    line
}

fn render_cli_progress(event: &RunProgressEvent) {
    clear_progress_line();
    eprint!("{}", progress_line(event));
    let _ = io::stderr().flush();
}

fn print_reduction(outcome: &RunOutcome) {
    let report = analyze_run(&outcome.series_i, &outcome.series_ii);
    println!();
    print!("{}", tables::series_table(&outcome.series_i));
    print!("{}", tables::series_table(&outcome.series_ii));
    print!(
        "{}",
        tables::conditions_table(&outcome.manifest.constants, outcome.packed_height_m())
    );
    print!("{}", tables::correlation_table(&report));
    print!("{}", tables::fit_table(&report));
}

fn open_store(store_dir: &Path) -> AppResult<RunStore> {
    Ok(RunStore::new(store_dir.to_path_buf())?)
}

fn cmd_runs(store_dir: &Path) -> AppResult<()> {
    let store = open_store(store_dir)?;
    let runs = run_service::list_runs(&store)?;
    let last = store.last_run()?;

    if runs.is_empty() {
        println!("No cached runs in {}", store_dir.display());
    } else {
        println!("Cached runs in {}:", store_dir.display());
        for manifest in runs {
            let marker = if last.as_deref() == Some(manifest.run_id.as_str()) {
                " (last)"
            } else {
                ""
            };
            println!(
                "  {} {} - {} ({} trials){}",
                manifest.run_id,
                manifest.timestamp,
                manifest.experiment_name,
                manifest.trial_counts.total(),
                marker
            );
        }
    }
    Ok(())
}

fn load_outcome(store_dir: &Path, id_or_last: &str) -> AppResult<RunOutcome> {
    let store = open_store(store_dir)?;
    let run_id = run_service::resolve_run_id(&store, id_or_last)?;
    run_service::load_run(&store, &run_id)
}

fn cmd_show_run(store_dir: &Path, id_or_last: &str) -> AppResult<()> {
    let outcome = load_outcome(store_dir, id_or_last)?;
    println!("Loading run: {}", outcome.run_id);

    let summary = query::get_run_summary(&outcome)?;
    println!("\nRun Summary:");
    println!("  Experiment: {}", summary.experiment_name);
    println!("  Timestamp: {}", summary.timestamp);
    println!("  Engine: {}", outcome.manifest.engine_version);
    let series = [
        (&outcome.series_i, &summary.series_i),
        (&outcome.series_ii, &summary.series_ii),
    ];
    for (dataset, s) in series {
        println!(
            "  Series {}: {} trials, {} usable",
            dataset.label(),
            s.trial_count,
            s.usable_count
        );
        if let Some((lo, hi)) = s.operating_range {
            let variable = dataset.operating_variable();
            println!(
                "    {} range: {lo:.4} - {hi:.4} {}",
                variable.symbol(),
                variable.unit()
            );
        }
        if let Some((lo, hi)) = s.kxa_range {
            println!("    Kxa range: {lo:.2} - {hi:.2} kmol/(m3·h)");
        }
        if let Some((lo, hi)) = s.h_ol_range {
            println!("    H_OL range: {lo:.3} - {hi:.3} m");
        }
        if s.guard_count > 0 || s.fallback_count > 0 {
            println!(
                "    Guarded trials: {}, ratio fallbacks: {}",
                s.guard_count, s.fallback_count
            );
        }
    }

    print_reduction(&outcome);
    Ok(())
}

fn cmd_export(store_dir: &Path, id_or_last: &str, out: &Path) -> AppResult<()> {
    let outcome = load_outcome(store_dir, id_or_last)?;
    let files = desorb_app::export_run(&outcome, out)?;
    println!("✓ Exported run {} to {}", outcome.run_id, out.display());
    for f in files {
        println!("  {}", f.display());
    }
    Ok(())
}

fn cmd_plot(store_dir: &Path, id_or_last: &str, out: &Path, config: ChartConfig) -> AppResult<()> {
    let session = if id_or_last == "last" {
        Session::from_store(&open_store(store_dir)?)?
    } else {
        let mut session = Session::new();
        session.record(&load_outcome(store_dir, id_or_last)?);
        session
    };
    let run_id = session
        .last()
        .map(|l| l.run_id.clone())
        .ok_or(AppError::NoLastRun)?;

    let files = session.replot(out, &config)?;
    println!("✓ Charts for run {} written to {}", run_id, out.display());
    for f in files {
        println!("  {}", f.display());
    }
    Ok(())
}

fn cmd_conditions(height: f64) -> AppResult<()> {
    if !(height.is_finite() && height > 0.0) {
        return Err(AppError::InvalidInput(format!(
            "packed height must be positive, got {height}"
        )));
    }
    print!(
        "{}",
        tables::conditions_table(&PhysicalConstants::rig(), height)
    );
    Ok(())
}
