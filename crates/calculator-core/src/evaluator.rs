//! The evaluation pipeline shared by every arithmetic endpoint.

use crate::errors::ApiError;
use crate::logger::OperationLogger;
use crate::operands::OperationRequest;
use crate::operation::Operator;

/// Output of a successful evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationResult {
    value: f64,
}

impl OperationResult {
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Validate two raw operands and apply `operator` to them.
///
/// Checks run in order and the first failure wins: presence, then numeric
/// parse, then the operator's domain rule. Exactly one record is written to
/// `logger` per call.
pub fn evaluate<L>(
    operator: Operator,
    raw_num1: Option<&str>,
    raw_num2: Option<&str>,
    logger: &L,
) -> Result<OperationResult, ApiError>
where
    L: OperationLogger + ?Sized,
{
    let request = OperationRequest::new(raw_num1, raw_num2);
    evaluate_request(operator, &request, logger)
}

/// Same as [`evaluate`], for an already assembled request.
pub fn evaluate_request<L>(
    operator: Operator,
    request: &OperationRequest,
    logger: &L,
) -> Result<OperationResult, ApiError>
where
    L: OperationLogger + ?Sized,
{
    let operands = match request.validate() {
        Ok(operands) => operands,
        Err(err) => {
            logger.error(&operator.invalid_parameters_message());
            return Err(err);
        }
    };

    // -0 compares equal to 0 as well
    if operator.rejects_zero_divisor() && operands.num2() == 0.0 {
        logger.error("Division by zero");
        return Err(ApiError::DivisionByZero);
    }

    let value = operator.apply(operands.num1(), operands.num2());
    logger.info(&operator.performed_message(
        request.num1.as_deref().unwrap_or_default(),
        request.num2.as_deref().unwrap_or_default(),
        value,
    ));

    Ok(OperationResult { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{LogRecord, RecordingLogger};
    use log::Level;

    fn record(level: Level, message: &str) -> LogRecord {
        LogRecord {
            level,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_addition() {
        let logger = RecordingLogger::new();
        let result = evaluate(Operator::Add, Some("3"), Some("4"), &logger).unwrap();

        assert_eq!(result.value(), 7.0);
        assert_eq!(
            logger.records(),
            vec![record(Level::Info, "Addition operation performed: 3 + 4 = 7")]
        );
    }

    #[test]
    fn test_fractional_addition() {
        let logger = RecordingLogger::new();
        let result = evaluate(Operator::Add, Some("2.5"), Some("1.5"), &logger).unwrap();
        assert_eq!(result.value(), 4.0);
    }

    #[test]
    fn test_all_operators() {
        let logger = RecordingLogger::new();
        let pairs = [(6.0, 3.0), (-1.5, 0.25), (1e10, -7.0), (0.1, 0.2)];

        for (a, b) in pairs {
            let (raw1, raw2) = (a.to_string(), b.to_string());
            for op in Operator::ALL {
                let result = evaluate(op, Some(raw1.as_str()), Some(raw2.as_str()), &logger).unwrap();
                let expected = match op {
                    Operator::Add => a + b,
                    Operator::Subtract => a - b,
                    Operator::Multiply => a * b,
                    Operator::Divide => a / b,
                };
                assert_eq!(result.value(), expected, "{} {} {}", a, op, b);
            }
        }
        assert_eq!(logger.len(), pairs.len() * Operator::ALL.len());
    }

    #[test]
    fn test_success_log_wording_per_operator() {
        let logger = RecordingLogger::new();
        evaluate(Operator::Subtract, Some("10"), Some("4"), &logger).unwrap();
        evaluate(Operator::Multiply, Some("2.5"), Some("4"), &logger).unwrap();
        evaluate(Operator::Divide, Some("9"), Some("2"), &logger).unwrap();

        let messages: Vec<_> = logger.records().into_iter().map(|r| r.message).collect();
        assert_eq!(
            messages,
            vec![
                "Subtraction operation performed: 10 - 4 = 6",
                "Multiplication operation performed: 2.5 * 4 = 10",
                "Division operation performed: 9 / 2 = 4.5",
            ]
        );
    }

    #[test]
    fn test_missing_parameter_for_every_operator() {
        for op in Operator::ALL {
            for (raw1, raw2) in [(None, Some("2")), (Some("1"), None), (None, None)] {
                let logger = RecordingLogger::new();
                let err = evaluate(op, raw1, raw2, &logger).unwrap_err();

                assert_eq!(err, ApiError::MissingParameter);
                assert_eq!(err.status_code(), 400);
                assert_eq!(
                    logger.records(),
                    vec![record(Level::Error, &op.invalid_parameters_message())]
                );
            }
        }
    }

    #[test]
    fn test_not_a_number_for_every_operator() {
        for op in Operator::ALL {
            for raw in ["abc", "NaN", "  ", "Infinity"] {
                let logger = RecordingLogger::new();
                let err = evaluate(op, Some(raw), Some("2"), &logger).unwrap_err();
                assert_eq!(err, ApiError::NotANumber, "{} with {:?}", op, raw);

                let err = evaluate(op, Some("2"), Some(raw), &logger).unwrap_err();
                assert_eq!(err, ApiError::NotANumber, "{} with {:?}", op, raw);

                assert_eq!(logger.len(), 2);
            }
        }
    }

    #[test]
    fn test_rejection_log_omits_operands() {
        let logger = RecordingLogger::new();
        evaluate(Operator::Add, Some("secret-token"), Some("2"), &logger).unwrap_err();

        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "Invalid parameters for addition endpoint");
        assert!(!records[0].message.contains("secret-token"));
    }

    #[test]
    fn test_division_by_zero() {
        for numerator in ["10", "0", "-3.5"] {
            for divisor in ["0", "-0", "0.0", "0e5"] {
                let logger = RecordingLogger::new();
                let err =
                    evaluate(Operator::Divide, Some(numerator), Some(divisor), &logger).unwrap_err();

                assert_eq!(err, ApiError::DivisionByZero);
                assert_eq!(err.status_code(), 400);
                assert_eq!(
                    logger.records(),
                    vec![record(Level::Error, "Division by zero")]
                );
            }
        }
    }

    #[test]
    fn test_zero_divisor_only_matters_for_division() {
        let logger = RecordingLogger::new();
        for op in [Operator::Add, Operator::Subtract, Operator::Multiply] {
            assert!(evaluate(op, Some("10"), Some("0"), &logger).is_ok());
        }
    }

    #[test]
    fn test_zero_numerator_divides() {
        let logger = RecordingLogger::new();
        let result = evaluate(Operator::Divide, Some("0"), Some("5"), &logger).unwrap();
        assert_eq!(result.value(), 0.0);
    }

    #[test]
    fn test_parse_failure_beats_division_by_zero() {
        let logger = RecordingLogger::new();
        let err = evaluate(Operator::Divide, Some("abc"), Some("0"), &logger).unwrap_err();
        assert_eq!(err, ApiError::NotANumber);
        assert_eq!(
            logger.records(),
            vec![record(Level::Error, "Invalid parameters for division endpoint")]
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let logger = RecordingLogger::new();
        let inputs = [
            (Operator::Add, Some("3"), Some("4")),
            (Operator::Divide, Some("1"), Some("0")),
            (Operator::Multiply, Some("x"), Some("2")),
        ];

        for (op, raw1, raw2) in inputs {
            let first = evaluate(op, raw1, raw2, &logger);
            let second = evaluate(op, raw1, raw2, &logger);
            assert_eq!(first, second);
        }

        let records = logger.records();
        for pair in records.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_overflow_yields_infinite_result() {
        let logger = RecordingLogger::new();
        let result = evaluate(Operator::Multiply, Some("1e308"), Some("10"), &logger).unwrap();
        assert!(result.value().is_infinite());
        assert_eq!(
            logger.records(),
            vec![record(
                Level::Info,
                "Multiplication operation performed: 1e308 * 10 = Infinity"
            )]
        );
    }

    #[test]
    fn test_evaluate_request_with_dyn_logger() {
        let recorder = RecordingLogger::new();
        let logger: &dyn OperationLogger = &recorder;
        let request = OperationRequest::new(Some("8"), Some("2"));

        let result = evaluate_request(Operator::Divide, &request, logger).unwrap();

        assert_eq!(result.value(), 4.0);
        assert_eq!(recorder.len(), 1);
    }
}
