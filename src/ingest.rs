//! Reading shares from JSON documents.
//!
//! A document lists the threshold parameters under `keys` and one member per share, keyed by
//! the share's x coordinate:
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" },
//!     "3": { "operation": "sum", "operands": ["5", "7"] },
//!     "6": { "base": "4", "value": "213", "id": "alice", "declared": "39" }
//! }
//! ```
//!
//! A share either carries a `value` or an `operation` (`sum`, `multiply`, `gcd`, `lcm`) over
//! `operands`; both are written in `base` (10 when omitted, 2 to 36 otherwise). `declared`
//! overrides the computed value (see [`Share::with_declared`]).

use std::collections::BTreeMap;
use std::io::Read;

use num_bigint::BigInt;
use serde::Deserialize;
use thiserror::Error;

use crate::derivation::{decode, Derivation};
use crate::error::Error;
use crate::resolve::Resolution;
use crate::share::{labels, Share};
use crate::{SecretSharing, Threshold};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed share document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("share key {key:?} is not a decimal integer")]
    InvalidKey { key: String },

    #[error("share {key}: {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error(transparent)]
    Share(#[from] Error),
}

/// Shares read from a document, ordered by ascending x, with their validated threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub threshold: Threshold,
    pub shares: Vec<Share>,
}

impl Document {
    /// Reconstructs the secret from the first `k` shares.
    pub fn recover(&self) -> Result<BigInt, Error> {
        SecretSharing(self.threshold.k()).recover(&self.shares)
    }

    /// Reconstructs the secret by majority over every `k`-subset, see [`crate::resolve()`].
    pub fn resolve(&self) -> Result<Resolution, Error> {
        SecretSharing(self.threshold.k()).resolve(&self.shares)
    }
}

#[derive(Deserialize)]
struct RawDocument {
    keys: Keys,
    #[serde(flatten)]
    entries: BTreeMap<String, Entry>,
}

#[derive(Deserialize)]
struct Keys {
    n: usize,
    k: usize,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    base: Option<Base>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    operation: Option<Operation>,
    #[serde(default)]
    operands: Vec<String>,
    #[serde(default)]
    declared: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Base {
    Number(u32),
    Text(String),
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Operation {
    Sum,
    #[serde(alias = "multiplier", alias = "product")]
    Multiply,
    Gcd,
    Lcm,
}

/// Parses a share document from a string.
///
/// ```
/// use honest_sss::parse_document;
/// use num_bigint::BigInt;
///
/// let document = parse_document(r#"{
///     "keys": { "n": 4, "k": 3 },
///     "1": { "base": "10", "value": "4" },
///     "2": { "base": "2", "value": "111" },
///     "3": { "base": "10", "value": "12" },
///     "6": { "base": "4", "value": "213" }
/// }"#).unwrap();
///
/// assert_eq!(document.recover().unwrap(), BigInt::from(3));
/// ```
pub fn parse_document(json: &str) -> Result<Document, IngestError> {
    let raw: RawDocument = serde_json::from_str(json)?;
    build(raw)
}

/// Parses a share document from a reader.
pub fn read_document<R: Read>(reader: R) -> Result<Document, IngestError> {
    let raw: RawDocument = serde_json::from_reader(reader)?;
    build(raw)
}

fn build(raw: RawDocument) -> Result<Document, IngestError> {
    let declared = Threshold::new(raw.keys.n, raw.keys.k)?;

    let mut shares = raw
        .entries
        .into_iter()
        .map(|(key, entry)| {
            let x = decode(&key, 10).map_err(|_| IngestError::InvalidKey { key: key.clone() })?;
            let share = entry.into_share(&key, x)?;
            Ok(share)
        })
        .collect::<Result<Vec<Share>, IngestError>>()?;
    shares.sort_by(|a, b| a.x.cmp(&b.x));

    // keys such as "1" and "01" name the same coordinate
    if let Some(pair) = shares.windows(2).find(|pair| pair[0].x == pair[1].x) {
        if let Some(x) = &pair[0].x {
            return Err(Error::DuplicateX { x: x.clone() }.into());
        }
    }
    labels(&shares)?;

    if shares.len() < declared.k() {
        return Err(Error::NotEnoughShares {
            threshold: declared.k(),
            share_count: shares.len(),
        }
        .into());
    }

    let threshold = if shares.len() == declared.n() {
        declared
    } else {
        tracing::warn!(
            declared = declared.n(),
            found = shares.len(),
            "share count differs from the declared n, using the share count"
        );
        Threshold::new(shares.len(), declared.k())?
    };

    tracing::debug!(n = threshold.n(), k = threshold.k(), "parsed share document");

    Ok(Document { threshold, shares })
}

impl Entry {
    fn into_share(self, key: &str, x: BigInt) -> Result<Share, IngestError> {
        let invalid = |reason: &str| IngestError::InvalidEntry {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        let base = match self.base {
            None => 10,
            Some(Base::Number(base)) => base,
            Some(Base::Text(text)) => text
                .trim()
                .parse()
                .map_err(|_| invalid("base is not an integer"))?,
        };

        let derivation = match (self.value, self.operation) {
            (Some(value), None) => {
                if !self.operands.is_empty() {
                    return Err(invalid("operands given without an operation"));
                }
                Derivation::Literal(decode(&value, base)?)
            }
            (None, Some(operation)) => {
                let operands = self
                    .operands
                    .iter()
                    .map(|operand| decode(operand, base))
                    .collect::<Result<Vec<BigInt>, Error>>()?;
                match operation {
                    Operation::Sum => Derivation::Sum(operands),
                    Operation::Multiply => Derivation::Multiply(operands),
                    Operation::Gcd => Derivation::Gcd(operands),
                    Operation::Lcm => Derivation::Lcm(operands),
                }
            }
            (Some(_), Some(_)) => return Err(invalid("both value and operation given")),
            (None, None) => return Err(invalid("neither value nor operation given")),
        };

        let mut share = Share::at(x, derivation.value()?);
        share.id = self.id;
        if let Some(declared) = self.declared {
            share = share.with_declared(decode(&declared, base)?);
        }

        Ok(share)
    }
}
