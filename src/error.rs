//! Validation errors surfaced before any solving begins.

use thiserror::Error;

/// Raw instance data failed structural validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstanceError {
    #[error("{field}({value}) has to be a positive integer value")]
    NonPositive { field: &'static str, value: usize },
    #[error("size of {field}({len}) does not match with value of {expected_field}({expected})")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        expected_field: &'static str,
        expected: usize,
    },
    #[error("invalid value({value}) in {field}[{index}]: should be a finite number greater or equal than zero")]
    InvalidValue {
        field: &'static str,
        index: usize,
        value: f64,
    },
    #[error("{field}({value}) has to be a finite number greater or equal than zero")]
    Negative { field: &'static str, value: f64 },
}

/// Solver configuration failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("parameter {field} not contained in configuration, required by {required_by}")]
    MissingField {
        field: &'static str,
        required_by: &'static str,
    },
    #[error("{field}({value}) has to be {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("{field}({value}) is not supported")]
    Unsupported {
        field: &'static str,
        value: &'static str,
    },
}
