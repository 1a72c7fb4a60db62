//! Error taxonomy for arithmetic requests.

use thiserror::Error;

/// Message returned when an operand is missing or not a number.
pub const INVALID_PARAMETERS_MESSAGE: &str =
    "Invalid parameters. Both num1 and num2 must be provided as valid numbers.";

/// Message returned when a division has a zero divisor.
pub const DIVISION_BY_ZERO_MESSAGE: &str = "Invalid parameters. Cannot divide by zero.";

/// Message returned for any unexpected failure. Details stay in the server log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failures an arithmetic request can end in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or both operands were absent or empty
    #[error("{}", INVALID_PARAMETERS_MESSAGE)]
    MissingParameter,

    /// One or both operands did not parse as a finite number
    #[error("{}", INVALID_PARAMETERS_MESSAGE)]
    NotANumber,

    /// Division with a zero divisor
    #[error("{}", DIVISION_BY_ZERO_MESSAGE)]
    DivisionByZero,

    /// Anything the validation pipeline does not account for
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a new internal error.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// The message shown to the caller.
    ///
    /// Internal failures never leak their detail; the caller only sees the
    /// generic message.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MissingParameter | ApiError::NotANumber => INVALID_PARAMETERS_MESSAGE,
            ApiError::DivisionByZero => DIVISION_BY_ZERO_MESSAGE,
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingParameter | ApiError::NotANumber | ApiError::DivisionByZero => 400,
            ApiError::Internal(_) => 500,
        }
    }
}
