use std::path::PathBuf;

use desorb_app::{
    ChartConfig, ExperimentSource, RunOptions, RunOutcome, RunRequest, Session, ensure_run,
    export_run, render_charts,
};
use desorb_fit::analyze_run;

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn demo_outcome(store_dir: &PathBuf) -> RunOutcome {
    let request = RunRequest {
        source: ExperimentSource::Demo,
        store_dir: Some(store_dir),
        options: RunOptions::default(),
    };
    ensure_run(&request).expect("demo run failed")
}

#[test]
fn export_writes_five_sheets() {
    let dir = fresh_dir("desorb_app_export");
    let outcome = demo_outcome(&dir.join("runs"));

    let files = export_run(&outcome, &dir.join("out")).unwrap();
    assert_eq!(files.len(), 5);
    for f in &files {
        assert!(f.exists(), "{f:?} missing");
    }

    let detail = std::fs::read_to_string(&files[0]).unwrap();
    // header plus five trials
    assert_eq!(detail.lines().count(), 6);

    let conditions = std::fs::read_to_string(&files[4]).unwrap();
    assert!(conditions.starts_with("parameter,value,unit"));
    assert!(conditions.contains("packed height h"));
}

#[test]
fn charts_render_as_svg() {
    let dir = fresh_dir("desorb_app_charts");
    let outcome = demo_outcome(&dir.join("runs"));
    let report = analyze_run(&outcome.series_i, &outcome.series_ii);

    let files = render_charts(
        &dir.join("plots"),
        &outcome.series_i,
        &outcome.series_ii,
        &report,
        &ChartConfig::default(),
    )
    .unwrap();
    assert_eq!(files.len(), 3);
    for f in &files {
        let svg = std::fs::read_to_string(f).unwrap();
        assert!(svg.contains("<svg"), "{f:?} is not an svg");
    }
    let chart1 = std::fs::read_to_string(&files[0]).unwrap();
    assert!(chart1.contains("Series II"));
}

#[test]
fn session_replots_last_run() {
    let dir = fresh_dir("desorb_app_replot");
    let outcome = demo_outcome(&dir.join("runs"));

    let mut session = Session::new();
    session.record(&outcome);
    let files = session
        .replot(&dir.join("plots"), &ChartConfig::default())
        .unwrap();
    assert!(files.iter().all(|f| f.exists()));
}
