use desorb_project::{
    Experiment, ProjectError, ValidationError, demo_experiment, load, load_json, load_yaml, save,
    save_json, save_yaml,
};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(name)
}

#[test]
fn roundtrip_yaml_demo() {
    let experiment = demo_experiment();
    let path = temp_path("desorb_project_roundtrip_demo.yaml");

    save_yaml(&path, &experiment).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(experiment, loaded);
}

#[test]
fn roundtrip_json_with_notes() {
    let experiment = Experiment {
        notes: Some("probe recalibrated before series II".to_string()),
        ..demo_experiment()
    };
    let path = temp_path("desorb_project_roundtrip_notes.json");

    save_json(&path, &experiment).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(experiment, loaded);
}

#[test]
fn load_dispatches_on_extension() {
    let experiment = demo_experiment();
    let yml = temp_path("desorb_project_dispatch.YML");
    save(&yml, &experiment).unwrap();
    assert_eq!(load(&yml).unwrap(), experiment);

    let txt = temp_path("desorb_project_dispatch.txt");
    assert!(matches!(
        save(&txt, &experiment),
        Err(ProjectError::UnknownFormat(_))
    ));
    assert!(matches!(load(&txt), Err(ProjectError::UnknownFormat(_))));
}

#[test]
fn save_refuses_invalid_experiment() {
    let mut experiment = demo_experiment();
    experiment.series_i.clear();
    let path = temp_path("desorb_project_invalid.yaml");
    let err = save_yaml(&path, &experiment).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::EmptySeries { .. })
    ));
}

#[test]
fn load_rejects_inadmissible_trial() {
    let yaml = r#"
version: 1
name: cold outlet
packed_height_m: 0.8
series_i:
  - [30.0, 20.0, 25.0, 22.0, 8.0]
series_ii:
  - [45.0, 10.0, 25.0, 22.0, 9.0]
"#;
    let path = temp_path("desorb_project_inadmissible.yaml");
    std::fs::write(&path, yaml).unwrap();
    let err = load_yaml(&path).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("I-1"), "{text}");
    assert!(text.contains("C2(8.00) - C_sat(8.26) = -0.26 < 0"), "{text}");
}
