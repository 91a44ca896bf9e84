//! Exact conversion between balance denominations.
//!
//! Balances exceed the precision of 64-bit floats, so every conversion goes
//! through [`Amount`], an arbitrary-precision decimal. All ratios are powers
//! of ten, which makes every conversion of a finite decimal exact.
//!
//! # Example
//!
//! ```rust
//! use nano_rpc::units::convert;
//!
//! assert_eq!(convert("1", "xrb", "raw").unwrap(), "1000000000000000000000000");
//! assert_eq!(convert("2500000000000000000000000000000", "raw", "Mxrb").unwrap(), "2.5");
//! ```

mod amount;
mod denomination;
mod error;

pub use amount::{Amount, MAX_EXPONENT};
pub use denomination::{Denomination, RATIO_TABLE};
pub use error::UnitError;

/// Converts `value` from unit `from` to unit `to`.
///
/// Returns the exact result in plain decimal notation without trailing
/// fractional zeros.
pub fn convert(value: &str, from: &str, to: &str) -> Result<String, UnitError> {
    let from: Denomination = from.parse()?;
    let to: Denomination = to.parse()?;
    let amount: Amount = value.parse()?;
    Ok(convert_amount(&amount, from, to)?.to_string())
}

/// Typed form of [`convert`]: `amount × scale(from) ÷ scale(to)`.
///
/// Fails with `OutOfRange` when the result's exponent leaves `±MAX_EXPONENT`,
/// so every successful result parses back and converts back to `amount`.
pub fn convert_amount(amount: &Amount, from: Denomination, to: Denomination) -> Result<Amount, UnitError> {
    amount.rescale(from.exponent() - to.exponent())
}

pub fn mrai_to_raw(value: &str) -> Result<String, UnitError> {
    convert(value, "Mxrb", "raw")
}

pub fn mrai_from_raw(value: &str) -> Result<String, UnitError> {
    convert(value, "raw", "Mxrb")
}

pub fn krai_to_raw(value: &str) -> Result<String, UnitError> {
    convert(value, "kxrb", "raw")
}

pub fn krai_from_raw(value: &str) -> Result<String, UnitError> {
    convert(value, "raw", "kxrb")
}

pub fn rai_to_raw(value: &str) -> Result<String, UnitError> {
    convert(value, "xrb", "raw")
}

pub fn rai_from_raw(value: &str) -> Result<String, UnitError> {
    convert(value, "raw", "xrb")
}
