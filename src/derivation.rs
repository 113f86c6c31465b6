// Ways of deriving a share's y value before it reaches the interpolator.

use alloc::string::ToString;
use alloc::vec::Vec;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;

use crate::error::{Error, Result};

/// Decodes `value` written in `base` (2 to 36, case insensitive, optional leading `-`).
///
/// ```
/// use honest_sss::decode;
/// use num_bigint::BigInt;
///
/// assert_eq!(decode("111", 2).unwrap(), BigInt::from(7));
/// assert_eq!(decode("-zz", 36).unwrap(), BigInt::from(-1295));
/// ```
pub fn decode(value: &str, base: u32) -> Result<BigInt> {
    if !(2..=36).contains(&base) {
        return Err(Error::InvalidBase { base });
    }

    BigInt::parse_bytes(value.as_bytes(), base).ok_or_else(|| Error::InvalidDigits {
        value: value.to_string(),
        base,
    })
}

/// A declared operation producing a share value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Derivation {
    Literal(BigInt),
    Sum(Vec<BigInt>),
    Multiply(Vec<BigInt>),
    Gcd(Vec<BigInt>),
    Lcm(Vec<BigInt>),
}

impl Derivation {
    pub fn name(&self) -> &'static str {
        match self {
            Derivation::Literal(_) => "literal",
            Derivation::Sum(_) => "sum",
            Derivation::Multiply(_) => "multiply",
            Derivation::Gcd(_) => "gcd",
            Derivation::Lcm(_) => "lcm",
        }
    }

    /// Computes the value. Every operation other than [`Derivation::Literal`] needs at least
    /// one operand; `gcd` and `lcm` are non-negative.
    pub fn value(&self) -> Result<BigInt> {
        let (operands, absolute) = match self {
            Derivation::Literal(value) => return Ok(value.clone()),
            Derivation::Sum(operands) | Derivation::Multiply(operands) => (operands, false),
            Derivation::Gcd(operands) | Derivation::Lcm(operands) => (operands, true),
        };

        let (first, rest) = operands
            .split_first()
            .ok_or_else(|| Error::EmptyOperands {
                operation: self.name(),
            })?;
        let first = if absolute { first.abs() } else { first.clone() };

        Ok(rest.iter().fold(first, |acc, v| match self {
            Derivation::Sum(_) => acc + v,
            Derivation::Multiply(_) => acc * v,
            Derivation::Gcd(_) => acc.gcd(v),
            Derivation::Lcm(_) => acc.lcm(v),
            Derivation::Literal(_) => acc,
        }))
    }
}
