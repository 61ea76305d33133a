/// A single `(value, symbol)` entry of the [`NUMERAL_TABLE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Numeral {
    pub value: u16,
    pub symbol: &'static str,
}

impl Numeral {
    const fn new(value: u16, symbol: &'static str) -> Self {
        Self { value, symbol }
    }
}

/// The encoding table, strictly descending by value.
///
/// Subtractive forms are atomic entries so that a single greedy pass over the
/// table produces the minimal encoding for every value in
/// [`MIN`](crate::MIN)`..=`[`MAX`](crate::MAX).
pub const NUMERAL_TABLE: &[Numeral] = &[
    Numeral::new(1000, "M"),
    Numeral::new(900, "CM"),
    Numeral::new(500, "D"),
    Numeral::new(400, "CD"),
    Numeral::new(100, "C"),
    Numeral::new(90, "XC"),
    Numeral::new(50, "L"),
    Numeral::new(40, "XL"),
    Numeral::new(10, "X"),
    Numeral::new(9, "IX"),
    Numeral::new(5, "V"),
    Numeral::new(4, "IV"),
    Numeral::new(1, "I"),
];
