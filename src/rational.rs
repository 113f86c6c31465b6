// Exact arithmetic helpers used by the interpolator. Every value is an unbounded
// integer; a quotient is only ever produced when the division leaves no remainder.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};

/// Divides `numerator` by `denominator`, failing unless the division is exact.
pub fn exact_divide(numerator: &BigInt, denominator: &BigInt) -> Result<BigInt> {
    if denominator.is_zero() {
        return Err(Error::DivisionByZero);
    }

    let (quotient, remainder) = numerator.div_rem(denominator);
    if !remainder.is_zero() {
        return Err(Error::InexactDivision {
            numerator: numerator.clone(),
            denominator: denominator.clone(),
        });
    }

    Ok(quotient)
}

/// A numerator/denominator pair kept in lowest terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fraction {
    numer: BigInt,
    denom: BigInt,
}

impl Fraction {
    pub fn zero() -> Self {
        Fraction {
            numer: BigInt::zero(),
            denom: BigInt::one(),
        }
    }

    pub fn new(numer: BigInt, denom: BigInt) -> Result<Self> {
        if denom.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let mut fraction = Fraction { numer, denom };
        fraction.reduce();
        Ok(fraction)
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    /// Adds `numer / denom` in place.
    pub fn add_term(&mut self, numer: &BigInt, denom: &BigInt) -> Result<()> {
        if denom.is_zero() {
            return Err(Error::DivisionByZero);
        }

        self.numer = &self.numer * denom + numer * &self.denom;
        self.denom = &self.denom * denom;
        self.reduce();
        Ok(())
    }

    /// Collapses the fraction to an integer, or fails with [`Error::InexactDivision`].
    pub fn into_integer(self) -> Result<BigInt> {
        exact_divide(&self.numer, &self.denom)
    }

    // keeps the denominator positive so equal values compare equal
    fn reduce(&mut self) {
        let divisor = self.numer.gcd(&self.denom);
        if !divisor.is_zero() && !divisor.is_one() {
            self.numer = &self.numer / &divisor;
            self.denom = &self.denom / &divisor;
        }
        if self.denom.is_negative() {
            self.numer = -core::mem::take(&mut self.numer);
            self.denom = -core::mem::take(&mut self.denom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{exact_divide, Fraction};
    use crate::error::Error;
    use num_bigint::BigInt;
    use rstest::rstest;

    #[rstest]
    #[case(12, 4, 3)]
    #[case(-12, 4, -3)]
    #[case(12, -4, -3)]
    #[case(0, 7, 0)]
    fn exact_divide_works(#[case] n: i64, #[case] d: i64, #[case] q: i64) {
        let quotient = exact_divide(&BigInt::from(n), &BigInt::from(d)).unwrap();
        assert_eq!(quotient, BigInt::from(q));
    }

    #[test]
    fn exact_divide_rejects_remainder() {
        let err = exact_divide(&BigInt::from(7), &BigInt::from(2)).unwrap_err();
        assert_eq!(
            err,
            Error::InexactDivision {
                numerator: BigInt::from(7),
                denominator: BigInt::from(2),
            }
        );
    }

    #[test]
    fn exact_divide_rejects_zero_denominator() {
        let err = exact_divide(&BigInt::from(7), &BigInt::from(0)).unwrap_err();
        assert_eq!(err, Error::DivisionByZero);
    }

    #[test]
    fn exact_divide_handles_huge_values() {
        let big = BigInt::from(u128::MAX) * BigInt::from(u128::MAX);
        let quotient = exact_divide(&big, &BigInt::from(u128::MAX)).unwrap();
        assert_eq!(quotient, BigInt::from(u128::MAX));
    }

    #[test]
    fn fraction_reports_inexact_sum() {
        // 3/2 - 3/2 + 1/4 + 3/(-4)
        let mut acc = Fraction::zero();
        acc.add_term(&BigInt::from(3), &BigInt::from(2)).unwrap();
        acc.add_term(&BigInt::from(-3), &BigInt::from(2)).unwrap();
        acc.add_term(&BigInt::from(1), &BigInt::from(4)).unwrap();
        acc.add_term(&BigInt::from(3), &BigInt::from(-4)).unwrap();
        assert_eq!(acc.numer(), &BigInt::from(-1));
        assert_eq!(acc.denom(), &BigInt::from(2));
        assert!(matches!(
            acc.into_integer(),
            Err(Error::InexactDivision { .. })
        ));
    }

    #[test]
    fn fraction_is_kept_in_lowest_terms() {
        let fraction = Fraction::new(BigInt::from(10), BigInt::from(-4)).unwrap();
        assert_eq!(fraction.numer(), &BigInt::from(-5));
        assert_eq!(fraction.denom(), &BigInt::from(2));
        assert_eq!(
            Fraction::new(BigInt::from(1), BigInt::from(0)),
            Err(Error::DivisionByZero)
        );
    }
}
