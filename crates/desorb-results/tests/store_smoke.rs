use desorb_core::PhysicalConstants;
use desorb_reduce::{RawTrial, SeriesLabel, process};
use desorb_results::*;

fn manifest(run_id: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        experiment_name: "store test".to_string(),
        timestamp: timestamp.to_string(),
        engine_version: "v1".to_string(),
        packed_height_m: 0.8,
        trial_counts: TrialCounts {
            series_i: 2,
            series_ii: 0,
        },
        constants: PhysicalConstants::rig(),
    }
}

fn fresh_store(name: &str) -> RunStore {
    let temp_dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&temp_dir);
    RunStore::new(temp_dir).unwrap()
}

#[test]
fn save_and_load_run() {
    let store = fresh_store("desorb_results_test");

    let series = process(
        SeriesLabel::I,
        &[
            RawTrial::new(30.0, 20.0, 25.0, 22.0, 9.5),
            RawTrial::new(45.0, 20.0, 25.0, 24.0, 10.0),
        ],
        0.8,
    );
    let m = manifest("aa01", "2026-02-25T12:00:00Z");

    store.save_run(&m, series.trials()).unwrap();
    assert!(store.has_run("aa01"));

    let loaded_manifest = store.load_manifest("aa01").unwrap();
    assert_eq!(loaded_manifest, m);

    let loaded = store.load_trials("aa01").unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded, series.trials());
    assert_eq!(loaded[1].id(), "I-2");
}

#[test]
fn list_runs_newest_first() {
    let store = fresh_store("desorb_results_test_list");

    store.save_run(&manifest("01", "2026-02-25T12:00:00Z"), &[]).unwrap();
    store.save_run(&manifest("03", "2026-02-25T14:00:00Z"), &[]).unwrap();
    store.save_run(&manifest("02", "2026-02-25T13:00:00Z"), &[]).unwrap();

    let ids: Vec<String> = store.list_runs().unwrap().into_iter().map(|m| m.run_id).collect();
    assert_eq!(ids, ["03", "02", "01"]);
}

#[test]
fn last_run_pointer_follows_deletes() {
    let store = fresh_store("desorb_results_test_last");
    assert_eq!(store.last_run().unwrap(), None);

    store.save_run(&manifest("0b", "2026-02-25T12:00:00Z"), &[]).unwrap();
    store.set_last_run("0b").unwrap();
    assert_eq!(store.last_run().unwrap().as_deref(), Some("0b"));

    store.delete_run("0b").unwrap();
    assert!(!store.has_run("0b"));
    assert_eq!(store.last_run().unwrap(), None);
    assert!(!store.root_dir().join("last_run").exists());
}

#[test]
fn missing_and_malformed_ids() {
    let store = fresh_store("desorb_results_test_missing");

    assert!(matches!(
        store.load_manifest("dead"),
        Err(ResultsError::RunNotFound { .. })
    ));
    assert!(matches!(
        store.set_last_run("dead"),
        Err(ResultsError::RunNotFound { .. })
    ));
    assert!(matches!(
        store.load_trials("../outside"),
        Err(ResultsError::InvalidRunId(_))
    ));
    assert!(!store.has_run("../outside"));
}

#[test]
fn list_runs_orders_by_instant_not_text() {
    let store = fresh_store("desorb_results_test_offsets");

    // 12:30+02:00 is 10:30Z, earlier than 11:00Z although it sorts later as text.
    store.save_run(&manifest("0a", "2026-02-25T12:30:00+02:00"), &[]).unwrap();
    store.save_run(&manifest("0b", "2026-02-25T11:00:00Z"), &[]).unwrap();
    store.save_run(&manifest("0c", "not a timestamp"), &[]).unwrap();

    let ids: Vec<String> = store.list_runs().unwrap().into_iter().map(|m| m.run_id).collect();
    assert_eq!(ids, ["0b", "0a", "0c"]);
}

#[test]
fn experiment_store_sits_beside_the_file() {
    let dir = std::env::temp_dir().join("desorb_results_test_beside");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let store = RunStore::for_experiment(&dir.join("column.yaml")).unwrap();
    assert_eq!(store.root_dir(), dir.join(".desorb").join("runs"));
    assert!(store.root_dir().is_dir());
}
