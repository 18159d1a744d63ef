use crate::types::cadence::Cadence;
use std::fmt;
use thiserror::Error;

/// The rule a request field broke.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The number lies outside the inclusive range.
    OutOfRange { min: f64, max: f64 },
    /// The number is NaN or infinite.
    NotFinite,
    /// The string is not one of the accepted values.
    NotOneOf { allowed: &'static [&'static str] },
    /// The name is not in the catalog of this cadence.
    UnknownVariable { cadence: Cadence },
    /// A section was requested with no variables.
    Empty,
    /// The input could not be read as forecast parameters at all.
    Malformed(String),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
            Constraint::NotFinite => f.write_str("must be a finite number"),
            Constraint::NotOneOf { allowed } => write!(f, "must be one of {allowed:?}"),
            Constraint::UnknownVariable { cadence } => {
                write!(f, "is not a known {cadence} variable")
            }
            Constraint::Empty => f.write_str("must list at least one variable"),
            Constraint::Malformed(reason) => write!(f, "is malformed: {reason}"),
        }
    }
}

/// A single failed check, naming the field it applies to.
///
/// Entries of the variable lists are reported with their index, e.g. `hourly[2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterViolation {
    pub field: String,
    pub constraint: Constraint,
}

impl fmt::Display for ParameterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` {}", self.field, self.constraint)
    }
}

/// The request was rejected before any network activity took place.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid forecast parameters: {}", join_violations(.violations))]
pub struct ParameterValidationError {
    violations: Vec<ParameterViolation>,
}

impl ParameterValidationError {
    pub(crate) fn new(violations: Vec<ParameterViolation>) -> Self {
        Self { violations }
    }

    pub(crate) fn single(field: impl Into<String>, constraint: Constraint) -> Self {
        Self::new(vec![ParameterViolation {
            field: field.into(),
            constraint,
        }])
    }

    /// Every violation found, in check order.
    pub fn violations(&self) -> &[ParameterViolation] {
        &self.violations
    }

    /// The first violation reported for `field`, if any.
    pub fn violation_for(&self, field: &str) -> Option<&ParameterViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

fn join_violations(violations: &[ParameterViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The provider's response did not have the required shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadValidationError {
    #[error("Forecast payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Forecast payload is not a JSON object")]
    NotAnObject,

    #[error("Forecast payload is missing required field '{0}'")]
    MissingField(String),

    #[error("Forecast payload field '{path}' should be {expected}")]
    WrongShape { path: String, expected: &'static str },

    #[error("{0} data was requested but the payload has no {0} section")]
    MissingSection(Cadence),
}
