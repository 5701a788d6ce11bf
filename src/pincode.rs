use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PininError, Result};

/// Number of digits in an Indian postal code.
pub const PINCODE_LEN: usize = 6;

// ---------------------------------------------------------------------------
// PincodeInput – what callers may hand us
// ---------------------------------------------------------------------------

/// A pincode as supplied by a caller: free text or an integer.
///
/// Integers are rendered in decimal before validation, so `5` becomes `"5"`
/// and is rejected. Integer callers must carry the full six-digit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PincodeInput<'a> {
    Text(&'a str),
    Number(i64),
}

impl PincodeInput<'_> {
    /// The single normalisation step: canonical text, whitespace trimmed.
    fn canonical(self) -> String {
        match self {
            PincodeInput::Text(s) => s.trim().to_string(),
            PincodeInput::Number(n) => n.to_string(),
        }
    }
}

impl<'a> From<&'a str> for PincodeInput<'a> {
    fn from(s: &'a str) -> Self {
        PincodeInput::Text(s)
    }
}

impl<'a> From<&'a String> for PincodeInput<'a> {
    fn from(s: &'a String) -> Self {
        PincodeInput::Text(s.as_str())
    }
}

impl<'a> From<&'a Pincode> for PincodeInput<'a> {
    fn from(p: &'a Pincode) -> Self {
        PincodeInput::Text(p.as_str())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PincodeInput<'_> {
                fn from(n: $t) -> Self {
                    PincodeInput::Number(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(u32, i32, i64);

// ---------------------------------------------------------------------------
// Pincode – a validated code
// ---------------------------------------------------------------------------

/// A syntactically valid pincode: exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Pincode(String);

impl Pincode {
    /// Normalise and validate caller input.
    pub fn parse<'a>(input: impl Into<PincodeInput<'a>>) -> Result<Self> {
        let text = input.into().canonical();
        if is_valid(&text) {
            Ok(Pincode(text))
        } else {
            Err(PininError::InvalidFormat { pincode: text })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `true` iff `s` is exactly six ASCII decimal digits (no trimming).
pub fn is_valid(s: &str) -> bool {
    s.len() == PINCODE_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Pincode {
    type Err = PininError;

    fn from_str(s: &str) -> Result<Self> {
        Pincode::parse(s)
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pincode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
