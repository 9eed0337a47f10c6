use std::fmt;
use std::str::FromStr;

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;

use crate::constants::ETHER_DECIMALS;
use crate::errors::ValidationError;

/// A strictly positive ETH quantity expressed in wei.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseUnitAmount(U256);

impl BaseUnitAmount {
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Formats the amount back into ETH, with all 18 decimals.
    pub fn to_ether_string(&self) -> String {
        format_ether(self.0)
    }
}

impl fmt::Display for BaseUnitAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUnitAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl From<BaseUnitAmount> for U256 {
    fn from(amount: BaseUnitAmount) -> Self {
        amount.0
    }
}

struct NumericLiteral<'a> {
    negative: bool,
    explicit_plus: bool,
    integer: &'a str,
    fraction: &'a str,
    has_exponent: bool,
}

impl NumericLiteral<'_> {
    fn is_zero(&self) -> bool {
        self.integer.bytes().chain(self.fraction.bytes()).all(|b| b == b'0')
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `input` into sign, integer digits, fraction digits and exponent.
/// Returns `None` when `input` is not a decimal number.
fn lex_numeric(input: &str) -> Option<NumericLiteral<'_>> {
    let (negative, explicit_plus, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, false, &input[1..]),
        Some(b'+') => (false, true, &input[1..]),
        _ => (false, false, input),
    };

    let (mantissa, exponent) = match rest.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };

    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !is_digits(integer) || !is_digits(fraction) {
        return None;
    }

    if let Some(exponent) = exponent {
        let digits = exponent
            .strip_prefix('-')
            .or_else(|| exponent.strip_prefix('+'))
            .unwrap_or(exponent);
        if digits.is_empty() || !is_digits(digits) {
            return None;
        }
    }

    Some(NumericLiteral {
        negative,
        explicit_plus,
        integer,
        fraction,
        has_exponent: exponent.is_some(),
    })
}

/// Validates a raw stake amount and converts it to wei.
///
/// Checks run in order: the input must be numeric (`Type`), strictly
/// positive (`Range`), and a plain decimal with at most 18 significant
/// fractional digits that fits in 256 bits (`Precision`). Trailing
/// fractional zeros are not significant.
pub fn validate(raw: &str) -> Result<BaseUnitAmount, ValidationError> {
    let literal = lex_numeric(raw.trim()).ok_or(ValidationError::Type)?;

    if literal.negative || literal.is_zero() {
        return Err(ValidationError::Range);
    }

    // Exponent and explicit-plus forms are numbers but not decimal ether strings.
    if literal.has_exponent || literal.explicit_plus {
        return Err(ValidationError::Precision);
    }

    let fraction = literal.fraction.trim_end_matches('0');
    if fraction.len() > ETHER_DECIMALS as usize {
        return Err(ValidationError::Precision);
    }

    let integer = if literal.integer.is_empty() { "0" } else { literal.integer };
    let normalized =
        if fraction.is_empty() { integer.to_string() } else { format!("{}.{}", integer, fraction) };

    parse_ether(&normalized).map(BaseUnitAmount).map_err(|_| ValidationError::Precision)
}
