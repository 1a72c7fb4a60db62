//! Raw operand tokens and their validated form.

use crate::errors::ApiError;

/// Operands as they arrive from the query string, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationRequest {
    pub num1: Option<String>,
    pub num2: Option<String>,
}

impl OperationRequest {
    pub fn new(num1: Option<impl Into<String>>, num2: Option<impl Into<String>>) -> Self {
        Self {
            num1: num1.map(Into::into),
            num2: num2.map(Into::into),
        }
    }

    /// Build a request from decoded query pairs.
    ///
    /// Keys other than `num1` and `num2` are ignored. A key given more than
    /// once keeps every value, comma-joined, which never parses as a number.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "num1" => &mut request.num1,
                "num2" => &mut request.num2,
                _ => continue,
            };
            let value = value.into();
            *slot = Some(match slot.take() {
                Some(existing) => format!("{},{}", existing, value),
                None => value,
            });
        }
        request
    }

    /// Run the presence and parseability checks, in that order.
    pub fn validate(&self) -> Result<ParsedOperands, ApiError> {
        let (raw1, raw2) = match (present(&self.num1), present(&self.num2)) {
            (Some(raw1), Some(raw2)) => (raw1, raw2),
            _ => return Err(ApiError::MissingParameter),
        };

        match (parse_operand(raw1), parse_operand(raw2)) {
            (Some(num1), Some(num2)) => Ok(ParsedOperands { num1, num2 }),
            _ => Err(ApiError::NotANumber),
        }
    }
}

fn present(token: &Option<String>) -> Option<&str> {
    token.as_deref().filter(|raw| !raw.is_empty())
}

/// Parse a single operand token into a finite number.
///
/// Accepts optionally signed integers and decimals, with or without an
/// exponent, surrounded by optional ASCII whitespace. `NaN` and infinities
/// are rejected whatever their spelling.
pub fn parse_operand(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Two operands that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedOperands {
    num1: f64,
    num2: f64,
}

impl ParsedOperands {
    pub fn num1(&self) -> f64 {
        self.num1
    }

    pub fn num2(&self) -> f64 {
        self.num2
    }
}
