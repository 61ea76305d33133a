//! Request and response types.
//!
//! Response types serialize to the service's JSON shapes:
//!
//! - single mode: `{"input": "<query>", "output": "<numeral>"}`
//! - range mode: `{"conversions": [{"input": "<n>", "output": "<numeral>"}, ...]}`
//!
//! Inputs are rendered as strings on the wire even where they are held as
//! integers.

use crate::{Error, Result};
use serde::{Serialize, Serializer};

/// One converted number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    #[serde(serialize_with = "as_display")]
    pub input: u16,
    pub output: String,
}

impl ConversionResult {
    /// Encodes `input`, which must already be validated.
    pub fn convert(input: u16) -> Self {
        Self {
            input,
            output: roman::encode(input),
        }
    }
}

/// Conversions for every integer in an inclusive range, ascending by input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RangeResult {
    pub conversions: Vec<ConversionResult>,
}

impl RangeResult {
    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

/// Single-mode response. `input` echoes the caller's raw query string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SingleResult {
    pub input: String,
    pub output: String,
}

/// A successful response in either mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Single(SingleResult),
    Range(RangeResult),
}

/// A request whose mode has been resolved but whose values are still raw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request<'a> {
    /// Convert a single number.
    Single { query: &'a str },
    /// Convert every number in `min..=max`.
    Range { min: &'a str, max: &'a str },
}

impl<'a> Request<'a> {
    /// Resolves the request mode from the three optional parameters.
    ///
    /// Exactly `query`, or exactly `min` together with `max`, must be present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for any other combination,
    /// including both modes at once, no parameters, or a lone range bound.
    pub fn from_params(
        query: Option<&'a str>,
        min: Option<&'a str>,
        max: Option<&'a str>,
    ) -> Result<Self> {
        match (query, min, max) {
            (Some(query), None, None) => Ok(Self::Single { query }),
            (None, Some(min), Some(max)) => Ok(Self::Range { min, max }),
            _ => Err(Error::InvalidParameters),
        }
    }
}

fn as_display<S>(value: &u16, serializer: S) -> core::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}
