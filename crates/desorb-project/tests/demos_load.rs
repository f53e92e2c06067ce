use std::path::PathBuf;

#[test]
fn bundled_demo_matches_builtin() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    let path = root.join("demos/oxygen_desorption.yaml");
    let loaded = desorb_project::load(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    let builtin = desorb_project::demo_experiment();

    assert_eq!(loaded.packed_height_m, builtin.packed_height_m);
    assert_eq!(loaded.series_i, builtin.series_i);
    assert_eq!(loaded.series_ii, builtin.series_ii);
}
