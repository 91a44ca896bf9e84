//! Exact decimal quantities.
//!
//! An [`Amount`] is `mantissa × 10^exponent` with an arbitrary-precision
//! mantissa. Rescaling by a power of ten only moves the exponent, so
//! conversions between denominations never round.

use std::fmt::{self, Display};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::error::UnitError;

/// Largest decimal exponent of a normalized [`Amount`], in either direction.
pub const MAX_EXPONENT: i64 = 4096;

/// Exact signed decimal number, kept in normalized form.
///
/// Normalized means the mantissa has no trailing zero digits (they are moved
/// into the exponent) and zero has exponent 0, so equal values compare equal.
/// Every constructor keeps the exponent within `±MAX_EXPONENT`, so anything
/// an `Amount` prints parses back to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    mantissa: BigInt,
    exponent: i64,
}

impl Amount {
    /// `mantissa × 10^exponent`, or `OutOfRange` if the normalized exponent
    /// exceeds `MAX_EXPONENT`.
    pub fn new(mantissa: BigInt, exponent: i64) -> Result<Self, UnitError> {
        let (mantissa, zeros) = strip_trailing_zeros(mantissa);
        let exponent = i64::try_from(zeros)
            .ok()
            .and_then(|zeros| exponent.checked_add(zeros))
            .ok_or_else(|| UnitError::OutOfRange(format!("{mantissa}e{exponent}")))?;
        Self::bounded(mantissa, exponent)
    }

    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: 0,
        }
    }

    /// `10^exponent`.
    pub fn power_of_ten(exponent: i64) -> Result<Self, UnitError> {
        Self::bounded(BigInt::one(), exponent)
    }

    pub fn from_raw(raw: u128) -> Self {
        let mut mantissa = raw;
        let mut exponent = 0;
        while mantissa != 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            exponent += 1;
        }
        Self {
            mantissa: BigInt::from(mantissa),
            exponent,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.exponent >= 0
    }

    /// Multiplies by `10^shift` exactly.
    pub fn rescale(&self, shift: i64) -> Result<Self, UnitError> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let exponent = self
            .exponent
            .checked_add(shift)
            .ok_or_else(|| UnitError::OutOfRange(format!("{self} shifted by 10^{shift}")))?;
        Self::bounded(self.mantissa.clone(), exponent)
    }

    /// Integral non-negative value as a 128-bit balance.
    pub fn to_raw_u128(&self) -> Result<u128, UnitError> {
        if !self.is_integer() {
            return Err(UnitError::OutOfRange(format!("{} is not a whole number of raw", self)));
        }
        let exponent = u32::try_from(self.exponent).map_err(|_| UnitError::OutOfRange(self.to_string()))?;
        if exponent > 39 {
            return Err(UnitError::OutOfRange(self.to_string()));
        }
        (&self.mantissa * BigInt::from(10u8).pow(exponent))
            .to_u128()
            .ok_or_else(|| UnitError::OutOfRange(self.to_string()))
    }

    /// Builds from a mantissa that already has no trailing zeros.
    fn bounded(mantissa: BigInt, exponent: i64) -> Result<Self, UnitError> {
        if mantissa.is_zero() {
            return Ok(Self::zero());
        }
        if exponent.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
            return Err(UnitError::OutOfRange(format!("{mantissa}e{exponent}")));
        }
        Ok(Self { mantissa, exponent })
    }
}

/// Divides out every trailing decimal zero in one step, returning how many there were.
fn strip_trailing_zeros(mantissa: BigInt) -> (BigInt, usize) {
    if mantissa.is_zero() {
        return (mantissa, 0);
    }
    let zeros = mantissa
        .magnitude()
        .to_string()
        .bytes()
        .rev()
        .take_while(|b| *b == b'0')
        .count();
    if zeros == 0 {
        return (mantissa, 0);
    }
    (mantissa / num_traits::pow(BigInt::from(10u8), zeros), zeros)
}

impl FromStr for Amount {
    type Err = UnitError;

    /// Accepts an optional sign, digits with an optional fractional part and
    /// an optional `e`/`E` exponent, e.g. `-12.5`, `.5`, `3e-6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UnitError::Parse(s.to_string());

        let (body, exp) = match s.find(['e', 'E']) {
            Some(pos) => {
                let exp = s[pos + 1..].parse::<i64>().map_err(|_| invalid())?;
                (&s[..pos], exp)
            },
            None => (s, 0),
        };

        let (negative, unsigned) = match body.as_bytes().first() {
            Some(b'-') => (true, &body[1..]),
            Some(b'+') => (false, &body[1..]),
            _ => (false, body),
        };

        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }

        // Trailing zeros go straight into the exponent, so the bound applies
        // to the normalized value and long inputs never loop over a BigInt.
        let digits = format!("{int_part}{frac_part}");
        let significant = digits.trim_end_matches('0');
        if significant.is_empty() {
            return Ok(Self::zero());
        }
        let frac_len = i64::try_from(frac_part.len()).map_err(|_| invalid())?;
        let zeros = i64::try_from(digits.len() - significant.len()).map_err(|_| invalid())?;
        let exponent = exp
            .checked_sub(frac_len)
            .and_then(|e| e.checked_add(zeros))
            .ok_or_else(invalid)?;

        let mut mantissa = significant.parse::<BigInt>().map_err(|_| invalid())?;
        if negative {
            mantissa = -mantissa;
        }

        Self::bounded(mantissa, exponent).map_err(|_| UnitError::OutOfRange(s.to_string()))
    }
}

impl Display for Amount {
    /// Plain decimal notation without trailing fractional zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.mantissa.abs().to_string();

        if self.exponent >= 0 {
            let zeros = if self.is_zero() { 0 } else { self.exponent as usize };
            return write!(f, "{sign}{digits}{}", "0".repeat(zeros));
        }

        let scale = self.exponent.unsigned_abs() as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int_part}.{frac_part}")
        } else {
            write!(f, "{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
        }
    }
}
