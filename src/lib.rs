//! Exact [Shamir's Secret Sharing](https://en.wikipedia.org/wiki/Shamir%27s_Secret_Sharing)
//! reconstruction over the integers, with majority-vote detection of forged shares.
//!
//! Shares are points `(x, y)` of an integer polynomial of degree `k - 1` whose constant term
//! is the secret. Every value is an arbitrary-precision integer and Lagrange interpolation is
//! carried out exactly: a set of points that does not give an integer at `x = 0` is reported
//! as inconsistent instead of being rounded.
//!
//! # Usage
//!
//! ```
//! use honest_sss::{SecretSharing, Share};
//! use num_bigint::BigInt;
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//!
//! // Set a minimum threshold of 3 shares
//! let sss = SecretSharing(3);
//! // Obtain an iterator over the shares for secret 1234
//! let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
//! let dealer = sss.dealer_rng(&BigInt::from(1234), &mut rng);
//! // Get 5 shares
//! let mut shares: Vec<Share> = dealer.take(5).collect();
//! // Recover the original secret!
//! assert_eq!(sss.recover(&shares).unwrap(), BigInt::from(1234));
//!
//! // Forge one share: resolution still finds the secret and points at the forger
//! shares[1].y += BigInt::from(1);
//! let resolution = sss.resolve(&shares).unwrap();
//! assert_eq!(resolution.secret, BigInt::from(1234));
//! assert!(resolution.fake.contains("share2"));
//! ```
//!
//! # Coordinates and ids
//!
//! A [`Share`] may carry its `x` coordinate. When it does not, the coordinate is its 1-based
//! position in the slice passed in. Shares without an `id` are reported as `share1`,
//! `share2`, ... by position.
//!
//! # Feature flags
//!
//! - `std` (default): enables `dealer` convenience (uses `rand::rng`). Without `std`, use
//!   `dealer_rng`; the crate is then `no_std` + `alloc`.
//! - `json` (default): enables [`parse_document`] and [`read_document`] to read shares from
//!   JSON documents, with values in any base from 2 to 36 or derived from declared operations.
//! - `fuzzing`: derives `arbitrary::Arbitrary` for [`Share`].
//!
//! # Errors
//!
//! [`Error::DuplicateX`] and [`Error::InexactDivision`] are fatal for a direct
//! [`SecretSharing::recover`], but [`resolve()`] treats them as "this subset is inconsistent" and
//! moves on to the next subset.
#![cfg_attr(not(feature = "std"), no_std)]

mod combination;
mod derivation;
mod error;
#[cfg(feature = "json")]
mod ingest;
mod math;
mod rational;
mod resolve;
mod share;

extern crate alloc;
#[cfg(all(test, not(feature = "std")))]
extern crate std;

use alloc::vec::Vec;

use num_bigint::BigInt;
use num_traits::Zero;

pub use combination::{binomial, combinations, Combinations};
pub use derivation::{decode, Derivation};
pub use error::{Error, Result};
#[cfg(feature = "json")]
pub use ingest::{parse_document, read_document, Document, IngestError};
pub use math::{evaluate, interpolate_at, interpolate_shares};
pub use rational::{exact_divide, Fraction};
pub use resolve::{resolve, Resolution};
pub use share::{labels, Discrepancy, Share};

/// Validated threshold parameters: `n` shares, any `k` of which determine the secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Threshold {
    n: usize,
    k: usize,
}

impl Threshold {
    /// Fails with [`Error::InvalidRange`] unless `1 <= k <= n`.
    pub fn new(n: usize, k: usize) -> Result<Self> {
        if k == 0 || k > n {
            return Err(Error::InvalidRange { n, k });
        }
        Ok(Threshold { n, k })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

/// Tuple struct which implements methods to deal shares and recover secrets over the integers.
/// Its only parameter is the minimum shares threshold.
///
/// Usage example:
/// ```
/// # use honest_sss::{SecretSharing, Share};
/// # use num_bigint::BigInt;
/// // Set a minimum threshold of 10 shares
/// let sss = SecretSharing(10);
/// // Obtain an iterator over the shares for secret 42
/// # #[cfg(feature = "std")]
/// # {
/// let dealer = sss.dealer(&BigInt::from(42));
/// // Get 10 shares
/// let shares: Vec<Share> = dealer.take(10).collect();
/// // Recover the original secret!
/// let secret = sss.recover(&shares).unwrap();
/// assert_eq!(secret, BigInt::from(42));
/// # }
/// ```
pub struct SecretSharing(pub usize);

impl SecretSharing {
    /// This method is useful when `std` is not available. For typical usage
    /// see the `dealer` method.
    ///
    /// Given a `secret`, returns an unbounded `Iterator` of shares at `x = 1, 2, ...` of a
    /// random integer polynomial of degree `k - 1` with `secret` as constant term.
    /// A random number generator has to be provided.
    pub fn dealer_rng<R: rand::Rng>(
        &self,
        secret: &BigInt,
        rng: &mut R,
    ) -> impl Iterator<Item = Share> {
        math::get_evaluator(math::random_polynomial(secret.clone(), self.0, rng))
    }

    /// Given a `secret`, returns an unbounded `Iterator` of new shares.
    #[cfg(feature = "std")]
    pub fn dealer(&self, secret: &BigInt) -> impl Iterator<Item = Share> {
        let mut rng = rand::rng();
        self.dealer_rng(secret, &mut rng)
    }

    /// Recovers the secret from the first `k` shares.
    ///
    /// Fails with [`Error::NotEnoughShares`] if fewer than `k` shares are given, and with
    /// [`Error::DuplicateX`] or [`Error::InexactDivision`] if those shares cannot belong to the
    /// same integer polynomial.
    ///
    /// ```
    /// # use honest_sss::{Error, SecretSharing, Share};
    /// # use num_bigint::BigInt;
    /// let sss = SecretSharing(2);
    /// let shares = [Share::from((1, 6)), Share::from((2, 9))];
    /// assert_eq!(sss.recover(&shares).unwrap(), BigInt::from(3));
    /// assert!(matches!(
    ///     sss.recover(&shares[..1]),
    ///     Err(Error::NotEnoughShares { .. })
    /// ));
    /// ```
    pub fn recover(&self, shares: &[Share]) -> Result<BigInt> {
        let shares = self.first_k(shares)?;
        math::interpolate_shares(shares, &BigInt::zero())
    }

    /// Recovers the share at `x` from the first `k` shares.
    ///
    /// ```
    /// # use honest_sss::{SecretSharing, Share};
    /// # use num_bigint::BigInt;
    /// let sss = SecretSharing(2);
    /// let shares = [Share::from((1, 6)), Share::from((2, 9))];
    /// let share = sss.recover_share(&shares, BigInt::from(4)).unwrap();
    /// assert_eq!(share, Share::from((4, 15)));
    /// ```
    pub fn recover_share(&self, shares: &[Share], x: BigInt) -> Result<Share> {
        let shares = self.first_k(shares)?;
        let y = math::interpolate_shares(shares, &x)?;
        Ok(Share::at(x, y))
    }

    /// Recovers the shares at `x = 1..=n` from the first `k` shares.
    pub fn recover_shares(&self, shares: &[Share], n: usize) -> Result<Vec<Share>> {
        Threshold::new(n, self.0)?;
        (1..=n)
            .map(|x| self.recover_share(shares, BigInt::from(x)))
            .collect()
    }

    /// Determines the secret and the honest and fake shares by majority over every
    /// `k`-subset of `shares`. See [`resolve()`] for the algorithm and its cost.
    pub fn resolve(&self, shares: &[Share]) -> Result<Resolution> {
        let threshold = Threshold::new(shares.len(), self.0)?;
        resolve::resolve(shares, threshold.k())
    }

    fn first_k<'a>(&self, shares: &'a [Share]) -> Result<&'a [Share]> {
        if self.0 == 0 {
            return Err(Error::InvalidRange {
                n: shares.len(),
                k: 0,
            });
        }
        if shares.len() < self.0 {
            return Err(Error::NotEnoughShares {
                threshold: self.0,
                share_count: shares.len(),
            });
        }
        Ok(&shares[..self.0])
    }
}
