use thiserror::Error;

/// Errors produced while parsing or converting balances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// The denomination name is not in the ratio table.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// The text is not a decimal number.
    #[error("Invalid decimal value: {0:?}")]
    Parse(String),

    /// The value cannot be represented in the requested form.
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
