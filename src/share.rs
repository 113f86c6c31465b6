use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;
use num_bigint::BigInt;

use crate::error::{Error, Result};

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

/// A share used to reconstruct the secret: one point `(x, y)` of the secret polynomial.
///
/// The `x` coordinate is optional. When it is `None` the coordinate is implicit and is the
/// share's 1-based position in the sequence handed to [`SecretSharing`](crate::SecretSharing)
/// or [`resolve`](crate::resolve()).
///
/// Usage example:
/// ```
/// use honest_sss::Share;
/// use num_bigint::BigInt;
///
/// let implicit = Share::new(BigInt::from(6));
/// assert_eq!(implicit.coordinate(0), BigInt::from(1));
///
/// let explicit = Share::at(BigInt::from(4), BigInt::from(15)).with_id("dave");
/// assert_eq!(explicit.coordinate(0), BigInt::from(4));
/// assert_eq!(explicit.label(0), "dave");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
pub struct Share {
    /// Human readable owner of the share.
    pub id: Option<String>,
    /// The x coordinate of the share, if carried explicitly.
    pub x: Option<BigInt>,
    /// The y coordinate of the share.
    pub y: BigInt,
}

/// Result of comparing an owner's declared value with the computed one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discrepancy {
    pub computed: BigInt,
    pub declared: BigInt,
}

impl Share {
    /// A share whose x coordinate is its position in the input sequence.
    pub fn new(y: BigInt) -> Self {
        Share {
            id: None,
            x: None,
            y,
        }
    }

    /// A share carrying an explicit x coordinate.
    pub fn at(x: BigInt, y: BigInt) -> Self {
        Share {
            id: None,
            x: Some(x),
            y,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The x coordinate used for interpolation when the share sits at `position` (0-based).
    pub fn coordinate(&self, position: usize) -> BigInt {
        match &self.x {
            Some(x) => x.clone(),
            None => BigInt::from(position + 1),
        }
    }

    /// The id reported in resolution outcomes; `share{n}` (1-based) when the share has none.
    pub fn label(&self, position: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("share{}", position + 1),
        }
    }

    /// Compares a declared value against the computed one without altering the share.
    pub fn audit(&self, declared: &BigInt) -> Option<Discrepancy> {
        if &self.y == declared {
            None
        } else {
            Some(Discrepancy {
                computed: self.y.clone(),
                declared: declared.clone(),
            })
        }
    }

    /// Replaces the computed value with a declared one. A differing value is logged as a
    /// discrepancy.
    pub fn with_declared(mut self, declared: BigInt) -> Self {
        if let Some(discrepancy) = self.audit(&declared) {
            tracing::warn!(
                id = ?self.id,
                x = ?self.x,
                computed = %discrepancy.computed,
                declared = %discrepancy.declared,
                "declared share value differs from the computed one, using the declared value"
            );
            self.y = declared;
        }
        self
    }
}

/// The [`Share::label`] of every share in `shares`, failing with [`Error::DuplicateId`] when
/// two of them collide (including an explicit id equal to another share's `share{n}` label).
pub fn labels(shares: &[Share]) -> Result<Vec<String>> {
    let labels: Vec<String> = shares
        .iter()
        .enumerate()
        .map(|(i, share)| share.label(i))
        .collect();

    {
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(Error::DuplicateId { id: label.clone() });
            }
        }
    }
    Ok(labels)
}

impl From<(i64, i64)> for Share {
    fn from((x, y): (i64, i64)) -> Self {
        Share::at(BigInt::from(x), BigInt::from(y))
    }
}
