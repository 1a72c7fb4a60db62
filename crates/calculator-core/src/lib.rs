//! Request validation and arithmetic evaluation for the calculator service.
//!
//! Every endpoint of the service funnels into [`evaluate`]: the raw query
//! tokens are checked for presence, parsed into finite numbers, checked
//! against the operator's domain rule and finally combined. Each call emits
//! exactly one record through the injected [`OperationLogger`].
//!
//! - **Operators**: the closed set of supported operations and their wording
//! - **Operands**: raw request tokens and their validated, parsed form
//! - **Errors**: the failure taxonomy and its HTTP status mapping
//! - **Logging**: the logger capability and its implementations

pub mod errors;
pub mod evaluator;
pub mod logger;
pub mod operands;
pub mod operation;

pub use errors::{
    ApiError, DIVISION_BY_ZERO_MESSAGE, INTERNAL_ERROR_MESSAGE, INVALID_PARAMETERS_MESSAGE,
};
pub use evaluator::{evaluate, evaluate_request, OperationResult};
pub use logger::{LogOperationLogger, LogRecord, OperationLogger, RecordingLogger, LOG_TARGET};
pub use operands::{parse_operand, OperationRequest, ParsedOperands};
pub use operation::Operator;
