use alloc::string::String;

use num_bigint::BigInt;
use thiserror::Error;

/// Errors raised while validating parameters, interpolating or resolving shares.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Threshold parameters violate `1 <= k <= n`.
    #[error("threshold must satisfy 1 <= k <= n (got k = {k}, n = {n})")]
    InvalidRange { n: usize, k: usize },

    #[error("not enough shares to reconstruct secret (need {threshold}, got {share_count})")]
    NotEnoughShares {
        threshold: usize,
        share_count: usize,
    },

    /// Two points handed to the interpolator share an x-coordinate.
    #[error("duplicate x-coordinate {x}")]
    DuplicateX { x: BigInt },

    /// The points do not lie on a common polynomial taking an integer value at the target.
    #[error("{numerator} is not divisible by {denominator}")]
    InexactDivision {
        numerator: BigInt,
        denominator: BigInt,
    },

    /// Two shares handed to the resolver report the same id.
    #[error("duplicate share id {id:?}")]
    DuplicateId { id: String },

    #[error("division by zero")]
    DivisionByZero,

    /// Every `k`-subset of the shares was internally inconsistent.
    #[error("no subset of {k} shares out of {n} lies on a common integer polynomial")]
    NoConsistentSecret { n: usize, k: usize },

    #[error("base {base} is outside the supported range 2..=36")]
    InvalidBase { base: u32 },

    #[error("{value:?} is not a valid base {base} integer")]
    InvalidDigits { value: String, base: u32 },

    #[error("operation {operation} needs at least one operand")]
    EmptyOperands { operation: &'static str },
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Errors that only mean "this subset of shares is inconsistent".
    pub fn is_subset_local(&self) -> bool {
        matches!(self, Error::DuplicateX { .. } | Error::InexactDivision { .. })
    }
}
