//! Boundary parsing from form fields into an [`IndicatorRecord`].
//!
//! The JSON endpoint and the interactive form accept different flag encodings
//! but share the age rules, so both go through [`FormIntake`].

use crate::scoring::{Indicator, IndicatorRecord, DEFAULT_AGE, MAX_AGE};

pub const TRUE_LITERAL: &str = "True";
pub const FALSE_LITERAL: &str = "False";
pub const AGE_FIELD: &str = "age";

/// Client errors raised before a record reaches the scorer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field '{field}' must be \"True\" or \"False\" (found {value:?})")]
    InvalidFlag { field: &'static str, value: String },
    #[error("age must be a whole number of years (found {value:?})")]
    InvalidAge { value: String },
    #[error("age {age} is outside the supported range 0-{max}")]
    AgeOutOfRange { age: i64, max: u8 },
    #[error("malformed submission: {0}")]
    Malformed(String),
}

/// How indicator flags are spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagEncoding {
    /// Literal `"True"` / `"False"`; a blank value reads as `"False"` and
    /// anything else is rejected.
    Literal,
    /// HTML checkbox semantics: the field is sent only when checked.
    Checkbox,
}

#[derive(Debug, Clone, Copy)]
pub struct FormIntake {
    encoding: FlagEncoding,
    default_age: u8,
}

impl FormIntake {
    /// `POST /calculate_frailty`: literal flags, age defaults to 72.
    pub const fn api() -> Self {
        Self {
            encoding: FlagEncoding::Literal,
            default_age: DEFAULT_AGE,
        }
    }

    /// Interactive form: checkbox flags, age defaults to 0 (unspecified).
    pub const fn checkbox_form() -> Self {
        Self {
            encoding: FlagEncoding::Checkbox,
            default_age: 0,
        }
    }

    pub fn encoding(&self) -> FlagEncoding {
        self.encoding
    }

    /// Builds a record from `(name, value)` pairs. Unknown fields are ignored
    /// and the last occurrence of a repeated field wins.
    pub fn parse<'a, I>(&self, fields: I) -> Result<IndicatorRecord, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = IndicatorRecord::new(self.default_age);

        for (name, value) in fields {
            if name == AGE_FIELD {
                let age = if value.trim().is_empty() {
                    self.default_age
                } else {
                    parse_age(value)?
                };
                record.set_age(age);
                continue;
            }

            let Some(indicator) = Indicator::from_field_name(name) else {
                continue;
            };

            let present = match self.encoding {
                FlagEncoding::Literal if value.trim().is_empty() => false,
                FlagEncoding::Literal => parse_flag(indicator, value)?,
                FlagEncoding::Checkbox => true,
            };
            record.set(indicator, present);
        }

        Ok(record)
    }
}

pub fn parse_flag(indicator: Indicator, value: &str) -> Result<bool, ValidationError> {
    match value {
        TRUE_LITERAL => Ok(true),
        FALSE_LITERAL => Ok(false),
        other => Err(ValidationError::InvalidFlag {
            field: indicator.field_name(),
            value: other.to_string(),
        }),
    }
}

pub fn parse_age(raw: &str) -> Result<u8, ValidationError> {
    let age = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidAge {
            value: raw.to_string(),
        })?;
    validate_age(age)
}

pub fn validate_age(age: i64) -> Result<u8, ValidationError> {
    u8::try_from(age)
        .ok()
        .filter(|age| *age <= MAX_AGE)
        .ok_or(ValidationError::AgeOutOfRange { age, max: MAX_AGE })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_defaults_every_flag_to_false_and_age_to_72() {
        let record = FormIntake::api()
            .parse(std::iter::empty())
            .expect("empty form is valid");
        assert_eq!(record.present().count(), 0);
        assert_eq!(record.age(), 72);
    }

    #[test]
    fn api_accepts_literal_flags() {
        let record = FormIntake::api()
            .parse([
                ("impaired_mobility", "True"),
                ("chf", "False"),
                ("uti", "True"),
                ("age", "80"),
            ])
            .expect("valid form");

        assert!(record.is_present(Indicator::ImpairedMobility));
        assert!(!record.is_present(Indicator::CongestiveHeartFailure));
        assert!(record.is_present(Indicator::UrinaryTractInfection));
        assert_eq!(record.age(), 80);
    }

    #[test]
    fn api_rejects_non_literal_flags() {
        let error = FormIntake::api()
            .parse([("depression", "true")])
            .expect_err("lowercase literal is rejected");
        assert_eq!(
            error,
            ValidationError::InvalidFlag {
                field: "depression",
                value: "true".to_string(),
            }
        );
    }

    #[test]
    fn checkbox_form_treats_presence_as_checked() {
        let record = FormIntake::checkbox_form()
            .parse([("gout", "on"), ("falls", "")])
            .expect("checkbox form parses");
        assert!(record.is_present(Indicator::Gout));
        assert!(record.is_present(Indicator::Falls));
        assert_eq!(record.age(), 0);
    }

    #[test]
    fn blank_age_falls_back_to_default() {
        let record = FormIntake::api()
            .parse([("age", " ")])
            .expect("blank age is allowed");
        assert_eq!(record.age(), 72);
    }

    #[test]
    fn blank_literal_flags_fall_back_to_false() {
        let record = FormIntake::api()
            .parse([("stroke", "True"), ("chf", ""), ("stroke", " "), ("age", "")])
            .expect("blank flags are allowed");
        assert_eq!(record.present().count(), 0);
        assert_eq!(record.age(), 72);
    }

    #[test]
    fn unknown_fields_are_ignored_and_last_value_wins() {
        let record = FormIntake::api()
            .parse([
                ("favorite_color", "blue"),
                ("stroke", "True"),
                ("stroke", "False"),
            ])
            .expect("valid form");
        assert!(!record.is_present(Indicator::Stroke));
    }

    #[test]
    fn age_must_be_numeric_and_in_range() {
        assert_eq!(parse_age("115"), Ok(115));
        assert_eq!(parse_age("0"), Ok(0));
        assert_eq!(
            parse_age("72.5"),
            Err(ValidationError::InvalidAge {
                value: "72.5".to_string()
            })
        );
        assert_eq!(
            parse_age("116"),
            Err(ValidationError::AgeOutOfRange { age: 116, max: 115 })
        );
        assert_eq!(
            validate_age(-1),
            Err(ValidationError::AgeOutOfRange { age: -1, max: 115 })
        );
    }
}
