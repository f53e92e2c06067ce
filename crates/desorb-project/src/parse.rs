//! Parsing of hand-typed trial lines.

use desorb_reduce::RawTrial;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected 5 comma-separated values (L_v, V_g, T, C1, C2), got {0}")]
    FieldCount(usize),

    #[error("field {index} is not a number: {text:?}")]
    NotANumber { index: usize, text: String },
}

/// Parse `"L_v, V_g, T, C1, C2"` into a trial.
pub fn parse_trial_line(line: &str) -> Result<RawTrial, ParseError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(ParseError::FieldCount(fields.len()));
    }
    let mut values = [0.0; 5];
    for (i, text) in fields.iter().enumerate() {
        values[i] = text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::NotANumber {
                index: i + 1,
                text: (*text).to_string(),
            })?;
    }
    let [l, g, t, c1, c2] = values;
    Ok(RawTrial::new(l, g, t, c1, c2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_line() {
        assert_eq!(
            parse_trial_line("30.0, 20.0, 25.0, 22.0, 9.5").unwrap(),
            RawTrial::new(30.0, 20.0, 25.0, 22.0, 9.5)
        );
        assert_eq!(
            parse_trial_line("30,20,25,22,9.5").unwrap().c_out_mg_l,
            9.5
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse_trial_line("30, 20, 25, 22"),
            Err(ParseError::FieldCount(4))
        );
        assert_eq!(parse_trial_line(""), Err(ParseError::FieldCount(1)));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(
            parse_trial_line("30, 20, warm, 22, 9.5"),
            Err(ParseError::NotANumber {
                index: 3,
                text: "warm".into()
            })
        );
        assert!(parse_trial_line("30, 20, 25, 22, NaN").is_err());
    }
}
