use std::num::ParseIntError;
use thiserror::Error;

#[derive(Clone, Error, Debug, Eq, PartialEq)]
#[error("invalid number `{input}`: {source}")]
pub struct ParseNumberError {
    input: String,
    source: ParseIntError,
}

pub trait FromRadix: Sized {
    fn from_radix(s: &str, radix: u32) -> Result<Self, ParseIntError>;
}

macro_rules! impl_from_radix {
    ($($t:ty),*) => {
        $(impl FromRadix for $t {
            fn from_radix(s: &str, radix: u32) -> Result<Self, ParseIntError> {
                <$t>::from_str_radix(s, radix)
            }
        })*
    };
}

impl_from_radix!(u8, u16);

// Accepts decimal or `0x`-prefixed hexadecimal.
pub fn number<T: FromRadix>(input: &str) -> Result<T, ParseNumberError> {
    let trimmed = input.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => T::from_radix(hex, 16),
        None => T::from_radix(trimmed, 10),
    };
    parsed.map_err(|source| ParseNumberError {
        input: input.to_string(),
        source,
    })
}
