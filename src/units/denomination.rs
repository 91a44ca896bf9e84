use std::fmt::{self, Display};
use std::str::FromStr;

use super::amount::Amount;
use super::error::UnitError;

/// Named scales of the atomic balance unit.
///
/// Balances are 128-bit integers of `raw`; the other denominations are SI
/// prefixes over `xrb` (10^24 raw). Reference wallets display `Mxrb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Denomination {
    Raw,
    MicroXrb,
    MilliXrb,
    Xrb,
    KiloXrb,
    MegaXrb,
    GigaXrb,
}

/// Every accepted unit name and the denomination it selects.
///
/// `Mrai` and `krai` are older names for `Mxrb` and `kxrb` and share their
/// scale. Only the canonical names (one per [`Denomination`]) map to distinct
/// powers of ten; the names as a whole do not.
pub const RATIO_TABLE: [(&str, Denomination); 9] = [
    ("Gxrb", Denomination::GigaXrb),
    ("Mxrb", Denomination::MegaXrb),
    ("Mrai", Denomination::MegaXrb),
    ("kxrb", Denomination::KiloXrb),
    ("krai", Denomination::KiloXrb),
    ("xrb", Denomination::Xrb),
    ("mxrb", Denomination::MilliXrb),
    ("uxrb", Denomination::MicroXrb),
    ("raw", Denomination::Raw),
];

impl Denomination {
    pub const ALL: [Denomination; 7] = [
        Denomination::Raw,
        Denomination::MicroXrb,
        Denomination::MilliXrb,
        Denomination::Xrb,
        Denomination::KiloXrb,
        Denomination::MegaXrb,
        Denomination::GigaXrb,
    ];

    /// Power of ten this denomination is worth in raw.
    pub const fn exponent(self) -> i64 {
        match self {
            Denomination::Raw => 0,
            Denomination::MicroXrb => 18,
            Denomination::MilliXrb => 21,
            Denomination::Xrb => 24,
            Denomination::KiloXrb => 27,
            Denomination::MegaXrb => 30,
            Denomination::GigaXrb => 33,
        }
    }

    /// Exact value of one unit of this denomination, in raw.
    pub fn scale(self) -> Amount {
        Amount::from_raw(10u128.pow(self.exponent() as u32))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Denomination::Raw => "raw",
            Denomination::MicroXrb => "uxrb",
            Denomination::MilliXrb => "mxrb",
            Denomination::Xrb => "xrb",
            Denomination::KiloXrb => "kxrb",
            Denomination::MegaXrb => "Mxrb",
            Denomination::GigaXrb => "Gxrb",
        }
    }
}

impl FromStr for Denomination {
    type Err = UnitError;

    /// Names are case-sensitive: `Mxrb` and `mxrb` differ by 10^9.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RATIO_TABLE
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, denomination)| *denomination)
            .ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
    }
}

impl Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
