//! The closed set of arithmetic operators and their dispatch table.
//!
//! Each operator carries the arithmetic it performs together with the wording
//! used in its log records, so the evaluation pipeline stays a single code
//! path for all endpoints.

use std::fmt;

/// An arithmetic operation selected by the endpoint that was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

struct OperatorSpec {
    name: &'static str,
    noun: &'static str,
    title: &'static str,
    symbol: &'static str,
    apply: fn(f64, f64) -> f64,
    rejects_zero_divisor: bool,
}

fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

fn divide(a: f64, b: f64) -> f64 {
    a / b
}

const ADD: OperatorSpec = OperatorSpec {
    name: "add",
    noun: "addition",
    title: "Addition",
    symbol: "+",
    apply: add,
    rejects_zero_divisor: false,
};

const SUBTRACT: OperatorSpec = OperatorSpec {
    name: "subtract",
    noun: "subtraction",
    title: "Subtraction",
    symbol: "-",
    apply: subtract,
    rejects_zero_divisor: false,
};

const MULTIPLY: OperatorSpec = OperatorSpec {
    name: "multiply",
    noun: "multiplication",
    title: "Multiplication",
    symbol: "*",
    apply: multiply,
    rejects_zero_divisor: false,
};

const DIVIDE: OperatorSpec = OperatorSpec {
    name: "divide",
    noun: "division",
    title: "Division",
    symbol: "/",
    apply: divide,
    rejects_zero_divisor: true,
};

impl Operator {
    /// All operators, in endpoint registration order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    fn spec(self) -> &'static OperatorSpec {
        match self {
            Operator::Add => &ADD,
            Operator::Subtract => &SUBTRACT,
            Operator::Multiply => &MULTIPLY,
            Operator::Divide => &DIVIDE,
        }
    }

    /// Lowercase name, also the endpoint path segment (`add`, `divide`, ...).
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Route path for this operator's endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Operator::Add => "/add",
            Operator::Subtract => "/subtract",
            Operator::Multiply => "/multiply",
            Operator::Divide => "/divide",
        }
    }

    /// Noun used in rejection log records (`addition`, `division`, ...).
    pub fn noun(self) -> &'static str {
        self.spec().noun
    }

    /// Capitalized noun used in success log records.
    pub fn title(self) -> &'static str {
        self.spec().title
    }

    pub fn symbol(self) -> &'static str {
        self.spec().symbol
    }

    /// Whether a zero second operand is outside this operator's domain.
    pub fn rejects_zero_divisor(self) -> bool {
        self.spec().rejects_zero_divisor
    }

    /// Apply the operator with plain IEEE-754 double arithmetic.
    pub fn apply(self, num1: f64, num2: f64) -> f64 {
        (self.spec().apply)(num1, num2)
    }

    /// Error-level message for requests whose operands failed validation.
    pub fn invalid_parameters_message(self) -> String {
        format!("Invalid parameters for {} endpoint", self.noun())
    }

    /// Info-level message for a completed operation.
    pub fn performed_message(self, num1: &str, num2: &str, result: f64) -> String {
        format!(
            "{} operation performed: {} {} {} = {}",
            self.title(),
            num1,
            self.symbol(),
            num2,
            ResultDisplay(result)
        )
    }
}

/// Renders a result for log output, spelling out non-finite values.
struct ResultDisplay(f64);

impl fmt::Display for ResultDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            v if v.is_nan() => f.write_str("NaN"),
            v if v == f64::INFINITY => f.write_str("Infinity"),
            v if v == f64::NEG_INFINITY => f.write_str("-Infinity"),
            v => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
