// Lexicographic enumeration of the k-subsets of `0..n`.

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Iterator over every strictly increasing `k`-length sequence of indices drawn from `0..n`,
/// in lexicographic order.
///
/// Each call to [`combinations`] starts over from `[0, 1, .., k - 1]`, so two enumerations of
/// the same `(n, k)` always yield the same sequence.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

/// Returns an iterator over the `C(n, k)` subsets of `0..n` of size `k`.
///
/// Fails with [`Error::InvalidRange`] unless `1 <= k <= n`.
///
/// ```
/// use honest_sss::combinations;
///
/// let subsets: Vec<Vec<usize>> = combinations(4, 2).unwrap().collect();
/// assert_eq!(subsets[0], vec![0, 1]);
/// assert_eq!(subsets[5], vec![2, 3]);
/// assert_eq!(subsets.len(), 6);
/// ```
pub fn combinations(n: usize, k: usize) -> Result<Combinations> {
    if k == 0 || k > n {
        return Err(Error::InvalidRange { n, k });
    }

    Ok(Combinations {
        n,
        indices: (0..k).collect(),
        done: false,
    })
}

/// Number of `k`-subsets of an `n`-element set, `None` if it does not fit in a `u128`.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }

    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) is always divisible by (i + 1)
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

impl Combinations {
    // Moves the rightmost index that is not yet at its maximum position and packs the
    // indices to its right behind it.
    fn advance(&mut self) {
        let k = self.indices.len();
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            self.done = true;
            return;
        };

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.indices.clone();
        self.advance();
        Some(current)
    }
}

impl core::iter::FusedIterator for Combinations {}

#[cfg(test)]
mod tests {
    use super::{binomial, combinations};
    use crate::error::Error;
    use alloc::{vec, vec::Vec};
    use rstest::rstest;

    #[test]
    fn enumerates_in_lexicographic_order() {
        let subsets: Vec<Vec<usize>> = combinations(5, 3).unwrap().collect();
        assert_eq!(
            subsets,
            vec![
                vec![0, 1, 2],
                vec![0, 1, 3],
                vec![0, 1, 4],
                vec![0, 2, 3],
                vec![0, 2, 4],
                vec![0, 3, 4],
                vec![1, 2, 3],
                vec![1, 2, 4],
                vec![1, 3, 4],
                vec![2, 3, 4],
            ]
        );
    }

    #[rstest]
    #[case(1, 1)]
    #[case(4, 1)]
    #[case(4, 4)]
    #[case(6, 3)]
    #[case(10, 4)]
    #[case(12, 11)]
    fn yields_binomial_many_increasing_subsets(#[case] n: usize, #[case] k: usize) {
        let subsets: Vec<Vec<usize>> = combinations(n, k).unwrap().collect();
        assert_eq!(subsets.len() as u128, binomial(n, k).unwrap());

        for subset in &subsets {
            assert_eq!(subset.len(), k);
            assert!(subset.windows(2).all(|w| w[0] < w[1]));
            assert!(subset.iter().all(|&i| i < n));
        }
        assert!(subsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn enumeration_is_restartable() {
        let first: Vec<Vec<usize>> = combinations(7, 3).unwrap().collect();
        let second: Vec<Vec<usize>> = combinations(7, 3).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let mut iter = combinations(2, 2).unwrap();
        assert_eq!(iter.next(), Some(vec![0, 1]));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[rstest]
    #[case(3, 0)]
    #[case(3, 4)]
    #[case(0, 0)]
    fn rejects_invalid_range(#[case] n: usize, #[case] k: usize) {
        assert_eq!(combinations(n, k).unwrap_err(), Error::InvalidRange { n, k });
    }

    #[test]
    fn binomial_works() {
        assert_eq!(binomial(5, 2), Some(10));
        assert_eq!(binomial(52, 5), Some(2_598_960));
        assert_eq!(binomial(3, 5), Some(0));
        assert_eq!(binomial(200, 100), None);
    }
}
