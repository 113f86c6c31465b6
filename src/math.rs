// A module which contains the polynomial algorithms used to deal shares and recover secrets

use alloc::vec::Vec;

use hashbrown::HashSet;
use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::rational::Fraction;
use crate::share::Share;

// Width of the random non-constant coefficients generated by `random_polynomial`.
const COEFFICIENT_BYTES: usize = 16;

/// Evaluates the unique polynomial of degree `points.len() - 1` through `points` at `target`
/// using the Lagrange form.
///
/// Every term `y_j * prod(target - x_m) / prod(x_j - x_m)` is accumulated as an exact fraction
/// and the result is only returned when the sum is an integer. Individual terms may be
/// fractional: `y = x` through `x = 1` and `x = 3` has terms `3/2` and `-3/2` at zero and still
/// interpolates to `0`, where dividing each term exactly would reject it. Fails with
/// [`Error::DuplicateX`] when two points share an x coordinate and with
/// [`Error::InexactDivision`] when the polynomial does not take an integer value at `target`.
pub fn interpolate_at(points: &[(&BigInt, &BigInt)], target: &BigInt) -> Result<BigInt> {
    let mut seen = HashSet::with_capacity(points.len());
    for (x, _) in points {
        if !seen.insert(*x) {
            return Err(Error::DuplicateX { x: (*x).clone() });
        }
    }

    let mut result = Fraction::zero();
    for (j, (x_j, y_j)) in points.iter().enumerate() {
        let mut num = BigInt::one();
        let mut den = BigInt::one();

        for (m, (x_m, _)) in points.iter().enumerate() {
            if m == j {
                continue;
            }
            num *= target - *x_m;
            den *= *x_j - *x_m;
        }

        result.add_term(&(*y_j * num), &den)?;
    }

    result.into_integer()
}

/// Lagrange interpolation at `target` over shares, resolving implicit coordinates by position.
pub fn interpolate_shares(shares: &[Share], target: &BigInt) -> Result<BigInt> {
    let coordinates: Vec<BigInt> = shares
        .iter()
        .enumerate()
        .map(|(i, share)| share.coordinate(i))
        .collect();
    let points: Vec<(&BigInt, &BigInt)> = coordinates
        .iter()
        .zip(shares.iter().map(|share| &share.y))
        .collect();

    interpolate_at(&points, target)
}

/// Evaluates a polynomial at `x` with Horner's rule.
/// Coefficient degrees go from higher to lower in `poly`.
pub fn evaluate(poly: &[BigInt], x: &BigInt) -> BigInt {
    poly.iter()
        .fold(BigInt::zero(), |acc, coefficient| acc * x + coefficient)
}

// Generates `k` polynomial coefficients, being the last one `secret` and the others random
// signed integers of `COEFFICIENT_BYTES` bytes.
// Coefficient degrees go from higher to lower in the returned vector order.
pub fn random_polynomial<R: rand::Rng>(secret: BigInt, k: usize, rng: &mut R) -> Vec<BigInt> {
    let mut poly = Vec::with_capacity(k);
    let mut bytes = [0u8; COEFFICIENT_BYTES];

    for _ in 1..k {
        rng.fill(&mut bytes[..]);
        poly.push(BigInt::from_signed_bytes_le(&bytes));
    }
    poly.push(secret);

    poly
}

// Returns an iterator over the points of `poly`, starting at `x = 1`.
pub fn get_evaluator(poly: Vec<BigInt>) -> impl Iterator<Item = Share> {
    (1u64..).map(move |x| {
        let x = BigInt::from(x);
        let y = evaluate(&poly, &x);
        Share::at(x, y)
    })
}

#[cfg(test)]
mod tests {
    use super::{evaluate, get_evaluator, interpolate_at, interpolate_shares, random_polynomial};
    use crate::error::Error;
    use crate::share::Share;
    use alloc::{vec, vec::Vec};
    use num_bigint::BigInt;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    fn points(values: &[(i64, i64)]) -> Vec<(BigInt, BigInt)> {
        values
            .iter()
            .map(|&(x, y)| (BigInt::from(x), BigInt::from(y)))
            .collect()
    }

    fn refs(points: &[(BigInt, BigInt)]) -> Vec<(&BigInt, &BigInt)> {
        points.iter().map(|(x, y)| (x, y)).collect()
    }

    #[test]
    fn random_polynomial_works() {
        let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
        let poly = random_polynomial(BigInt::from(1), 3, &mut rng);
        assert_eq!(poly.len(), 3);
        assert_eq!(poly[2], BigInt::from(1));
    }

    #[test]
    fn evaluator_works() {
        // 3x^2 + 2x + 5
        let poly = vec![BigInt::from(3), BigInt::from(2), BigInt::from(5)];
        assert_eq!(evaluate(&poly, &BigInt::from(0)), BigInt::from(5));
        let values: Vec<_> = get_evaluator(poly).take(2).collect();
        assert_eq!(values, vec![Share::from((1, 10)), Share::from((2, 21))]);
    }

    #[test]
    fn interpolate_line() {
        let pts = points(&[(1, 6), (2, 9)]);
        let secret = interpolate_at(&refs(&pts), &BigInt::from(0)).unwrap();
        assert_eq!(secret, BigInt::from(3));

        let at_four = interpolate_at(&refs(&pts), &BigInt::from(4)).unwrap();
        assert_eq!(at_four, BigInt::from(15));
    }

    #[test]
    fn interpolate_single_point_is_constant() {
        let pts = points(&[(5, 42)]);
        let secret = interpolate_at(&refs(&pts), &BigInt::from(0)).unwrap();
        assert_eq!(secret, BigInt::from(42));
    }

    #[test]
    fn interpolate_with_non_integer_basis() {
        // y = x through x = 1 and x = 3: each term is +-3/2 but the sum is 0
        let pts = points(&[(1, 1), (3, 3)]);
        let secret = interpolate_at(&refs(&pts), &BigInt::from(0)).unwrap();
        assert_eq!(secret, BigInt::from(0));
    }

    #[test]
    fn interpolate_detects_inexact_value() {
        let pts = points(&[(1, 0), (3, 1)]);
        let err = interpolate_at(&refs(&pts), &BigInt::from(0)).unwrap_err();
        assert!(matches!(err, Error::InexactDivision { .. }));
    }

    #[test]
    fn interpolate_detects_duplicate_x() {
        let pts = points(&[(2, 9), (2, 9)]);
        let err = interpolate_at(&refs(&pts), &BigInt::from(0)).unwrap_err();
        assert_eq!(err, Error::DuplicateX { x: BigInt::from(2) });

        let pts = points(&[(1, 6), (2, 9), (1, 7)]);
        let err = interpolate_at(&refs(&pts), &BigInt::from(0)).unwrap_err();
        assert_eq!(err, Error::DuplicateX { x: BigInt::from(1) });
    }

    #[rstest]
    #[case(1, [1; 32])]
    #[case(2, [2; 32])]
    #[case(3, [3; 32])]
    #[case(5, [5; 32])]
    #[case(8, [8; 32])]
    fn interpolate_round_trips(#[case] k: usize, #[case] seed: [u8; 32]) {
        let mut rng = ChaCha8Rng::from_seed(seed);
        for round in 0..20 {
            let secret = BigInt::from(round) * BigInt::from(u64::MAX) - BigInt::from(7);
            let poly = random_polynomial(secret.clone(), k, &mut rng);

            // interleaved coordinates on both sides of x = 1000
            let pts: Vec<(BigInt, BigInt)> = (0..k as i64)
                .map(|i| {
                    let x = BigInt::from((i * 7 + round) * if i % 2 == 0 { 1 } else { -1 } + 1000);
                    let y = evaluate(&poly, &x);
                    (x, y)
                })
                .collect();

            let recovered = interpolate_at(&refs(&pts), &BigInt::from(0)).unwrap();
            assert_eq!(recovered, secret);
        }
    }

    #[test]
    fn interpolate_is_order_invariant() {
        let mut rng = ChaCha8Rng::from_seed([0x42; 32]);
        let poly = random_polynomial(BigInt::from(-123_456_789), 4, &mut rng);
        let pts: Vec<(BigInt, BigInt)> = [3i64, -8, 11, 20]
            .iter()
            .map(|&x| (BigInt::from(x), evaluate(&poly, &BigInt::from(x))))
            .collect();
        let expected = interpolate_at(&refs(&pts), &BigInt::from(0)).unwrap();

        let orders = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];
        for order in orders {
            let permuted: Vec<(BigInt, BigInt)> = order.iter().map(|&i| pts[i].clone()).collect();
            let value = interpolate_at(&refs(&permuted), &BigInt::from(0)).unwrap();
            assert_eq!(value, expected);
        }
        assert_eq!(expected, BigInt::from(-123_456_789));
    }

    #[test]
    fn interpolate_shares_uses_positions_for_implicit_x() {
        let shares = vec![Share::new(BigInt::from(6)), Share::new(BigInt::from(9))];
        let secret = interpolate_shares(&shares, &BigInt::from(0)).unwrap();
        assert_eq!(secret, BigInt::from(3));
    }
}
