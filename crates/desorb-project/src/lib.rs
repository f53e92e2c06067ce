//! desorb-project: experiment file format and validation.

pub mod demo;
pub mod parse;
pub mod schema;
pub mod validate;

use std::path::Path;

pub use demo::{DEMO_PACKED_HEIGHT_M, demo_experiment};
pub use parse::{ParseError, parse_trial_line};
pub use schema::Experiment;
pub use validate::{LATEST_VERSION, ValidationError, validate_experiment};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Unknown experiment file format: {0} (expected .yaml, .yml or .json)")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<Experiment> {
    let content = std::fs::read_to_string(path)?;
    let experiment: Experiment = serde_yaml::from_str(&content)?;
    validate_experiment(&experiment)?;
    Ok(experiment)
}

pub fn save_yaml(path: &Path, experiment: &Experiment) -> ProjectResult<()> {
    validate_experiment(experiment)?;
    let content = serde_yaml::to_string(experiment)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Experiment> {
    let content = std::fs::read_to_string(path)?;
    let experiment: Experiment = serde_json::from_str(&content)?;
    validate_experiment(&experiment)?;
    Ok(experiment)
}

pub fn save_json(path: &Path, experiment: &Experiment) -> ProjectResult<()> {
    validate_experiment(experiment)?;
    let content = serde_json::to_string_pretty(experiment)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by file extension.
pub fn load(path: &Path) -> ProjectResult<Experiment> {
    match extension(path).as_deref() {
        Some("yaml" | "yml") => load_yaml(path),
        Some("json") => load_json(path),
        _ => Err(ProjectError::UnknownFormat(path.display().to_string())),
    }
}

/// Save by file extension.
pub fn save(path: &Path, experiment: &Experiment) -> ProjectResult<()> {
    match extension(path).as_deref() {
        Some("yaml" | "yml") => save_yaml(path, experiment),
        Some("json") => save_json(path, experiment),
        _ => Err(ProjectError::UnknownFormat(path.display().to_string())),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}
