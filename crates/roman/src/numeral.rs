use crate::NUMERAL_TABLE;
use alloc::string::{String, ToString};
use core::fmt;

/// Smallest value with a Roman numeral representation.
pub const MIN: u16 = 1;

/// Largest value representable without overline (vinculum) notation.
pub const MAX: u16 = 3999;

/// An integer known to lie within [`MIN`]`..=`[`MAX`].
///
/// The numeral itself is never stored: [`fmt::Display`] streams the symbols
/// straight from the [`NUMERAL_TABLE`] into the formatter, so a
/// `RomanNumeral` is as cheap to pass around as the `u16` it wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RomanNumeral(u16);

impl RomanNumeral {
    /// Returns `None` when `value` falls outside [`MIN`]`..=`[`MAX`].
    pub const fn new(value: u16) -> Option<Self> {
        if value >= MIN && value <= MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The integer this numeral represents.
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut remaining = self.0;
        for numeral in NUMERAL_TABLE {
            while remaining >= numeral.value {
                f.write_str(numeral.symbol)?;
                remaining -= numeral.value;
            }
        }
        debug_assert_eq!(remaining, 0);
        Ok(())
    }
}

impl From<RomanNumeral> for u16 {
    fn from(numeral: RomanNumeral) -> Self {
        numeral.0
    }
}

/// Encodes `n` as its canonical Roman numeral.
///
/// The caller guarantees `MIN <= n <= MAX`; the value is not re-checked. Out of
/// domain inputs produce an empty string for `0` and a run of leading `M`s
/// above [`MAX`], neither of which is a canonical numeral.
pub fn encode(n: u16) -> String {
    RomanNumeral(n).to_string()
}
