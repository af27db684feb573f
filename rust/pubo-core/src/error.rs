use crate::vartype::Vartype;

/// Errors raised while building, converting, reducing or translating
/// pseudo-Boolean polynomials.
///
/// Every error is local to the call that produced it; the inputs are left
/// untouched and the call can be retried with corrected data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulationError {
    #[error("invalid key {0}")]
    InvalidKey(String),

    #[error("term {monomial} has degree {degree}, container allows at most {max}")]
    InvalidTermDegree {
        monomial: String,
        degree: usize,
        max: usize,
    },

    #[error("index {0} was never assigned a label")]
    KeyNotFound(usize),

    #[error("expected a {expected} polynomial, found {found}")]
    VartypeMismatch { expected: Vartype, found: Vartype },

    #[error("assignment has no value for variable {0}")]
    MissingValue(String),

    #[error("value {value} is not a {vartype} value")]
    InvalidValue { value: i8, vartype: Vartype },

    #[error("division by zero")]
    DivisionByZero,

    #[error("{value} does not fit in {bits} bits")]
    InsufficientBits { value: u64, bits: usize },
}

pub type Result<T> = std::result::Result<T, FormulationError>;
