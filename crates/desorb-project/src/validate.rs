//! Experiment validation.

use desorb_reduce::{RawTrial, SeriesLabel, validate_trial};

use crate::schema::Experiment;

/// Newest experiment file version understood by this crate.
pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Experiment name must not be empty")]
    EmptyName,

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: f64,
        reason: &'static str,
    },

    #[error("Series {series} has no trials")]
    EmptySeries { series: SeriesLabel },

    #[error("Trial {series}-{ordinal} is not admissible:\n{message}")]
    Inadmissible {
        series: SeriesLabel,
        ordinal: usize,
        message: String,
    },
}

pub fn validate_experiment(experiment: &Experiment) -> Result<(), ValidationError> {
    if experiment.version == 0 || experiment.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: experiment.version,
        });
    }
    if experiment.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    positive("packed_height_m".to_string(), experiment.packed_height_m)?;

    for label in SeriesLabel::ALL {
        let trials = experiment.series(label);
        if trials.is_empty() {
            return Err(ValidationError::EmptySeries { series: label });
        }
        for (i, trial) in trials.iter().enumerate() {
            validate_entry(label, i + 1, trial)?;
        }
    }
    Ok(())
}

fn validate_entry(
    series: SeriesLabel,
    ordinal: usize,
    trial: &RawTrial,
) -> Result<(), ValidationError> {
    let prefix = format!("series_{}[{ordinal}]", series.to_string().to_lowercase());
    let field = |name: &str| format!("{prefix}.{name}");

    positive(field("liquid_flow_l_h"), trial.liquid_flow_l_h)?;
    positive(field("gas_flow_m3_h"), trial.gas_flow_m3_h)?;
    finite(field("temperature_c"), trial.temperature_c)?;
    finite(field("c_in_mg_l"), trial.c_in_mg_l)?;
    finite(field("c_out_mg_l"), trial.c_out_mg_l)?;

    validate_trial(trial).map_err(|failure| ValidationError::Inadmissible {
        series,
        ordinal,
        message: failure.message,
    })?;
    Ok(())
}

fn finite(field: String, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field,
            value,
            reason: "must be finite",
        })
    }
}

fn positive(field: String, value: f64) -> Result<(), ValidationError> {
    finite(field.clone(), value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field,
            value,
            reason: "must be > 0",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_experiment;

    #[test]
    fn demo_is_valid() {
        validate_experiment(&demo_experiment()).unwrap();
    }

    #[test]
    fn rejects_future_version_and_blank_name() {
        let mut exp = demo_experiment();
        exp.version = LATEST_VERSION + 1;
        assert_eq!(
            validate_experiment(&exp),
            Err(ValidationError::UnsupportedVersion { version: 2 })
        );

        let mut exp = demo_experiment();
        exp.name = "  ".into();
        assert_eq!(validate_experiment(&exp), Err(ValidationError::EmptyName));
    }

    #[test]
    fn rejects_bad_height() {
        let mut exp = demo_experiment();
        exp.packed_height_m = -0.8;
        assert!(matches!(
            validate_experiment(&exp),
            Err(ValidationError::InvalidValue { ref field, .. }) if field == "packed_height_m"
        ));
    }

    #[test]
    fn names_the_offending_field() {
        let mut exp = demo_experiment();
        exp.series_ii[2].gas_flow_m3_h = 0.0;
        let err = validate_experiment(&exp).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                field: "series_ii[3].gas_flow_m3_h".into(),
                value: 0.0,
                reason: "must be > 0",
            }
        );
    }

    #[test]
    fn empty_series_is_rejected() {
        let mut exp = demo_experiment();
        exp.series_ii.clear();
        assert_eq!(
            validate_experiment(&exp),
            Err(ValidationError::EmptySeries {
                series: SeriesLabel::II
            })
        );
    }

    #[test]
    fn inadmissible_trial_carries_validator_message() {
        let mut exp = demo_experiment();
        exp.series_i[1].c_in_mg_l = 17.9;
        match validate_experiment(&exp).unwrap_err() {
            ValidationError::Inadmissible {
                series,
                ordinal,
                message,
            } => {
                assert_eq!(series, SeriesLabel::I);
                assert_eq!(ordinal, 2);
                assert!(message.contains("C1 = 17.90 mg/L"));
            }
            other => panic!("unexpected: {other}"),
        }
    }
}
