// Majority-vote reconstruction over every k-subset of the shares.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::combination::{binomial, combinations};
use crate::error::{Error, Result};
use crate::math::interpolate_at;
use crate::share::{labels, Share};

/// Outcome of [`resolve`]: the majority secret and the partition of share ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub secret: BigInt,
    /// Ids appearing in at least one subset that reconstructs `secret`.
    pub honest: BTreeSet<String>,
    /// Every other id.
    pub fake: BTreeSet<String>,
    /// Number of subsets that reconstruct `secret`.
    pub support: usize,
    /// Number of distinct secrets reconstructed by some subset.
    pub candidates: usize,
}

// A secret reconstructed by at least one subset: how many subsets back it and the union of
// their positions.
struct Candidate {
    value: BigInt,
    support: usize,
    positions: BTreeSet<usize>,
}

/// Determines the secret and which shares are honest from `shares` and threshold `k`.
///
/// Every `k`-subset of `shares` is interpolated at zero. Subsets whose points share an x
/// coordinate or do not lie on a common integer polynomial are skipped. The secret backed
/// by the most subsets wins; on a tie, the secret that reached the winning count first in
/// lexicographic subset order is kept. Shares that appear in a winning subset are honest,
/// all others are fake.
///
/// Shares without an explicit x coordinate use their 1-based position, and shares without
/// an id are reported as `share{position}` (see [`Share::label`]).
///
/// This runs `C(n, k)` interpolations of `O(k^2)` big integer operations each, which grows
/// quickly: `C(30, 15)` is over 155 million subsets.
///
/// Fails with [`Error::InvalidRange`] unless `1 <= k <= shares.len()`, with
/// [`Error::DuplicateId`] when two shares carry the same label, and with
/// [`Error::NoConsistentSecret`] when no subset is consistent.
///
/// ```
/// use honest_sss::{resolve, Share};
/// use num_bigint::BigInt;
///
/// // y = 3x + 3, with the third share forged
/// let shares: Vec<Share> = [(1, 6), (2, 9), (3, 100), (4, 15)]
///     .into_iter()
///     .map(Share::from)
///     .collect();
/// let resolution = resolve(&shares, 2).unwrap();
/// assert_eq!(resolution.secret, BigInt::from(3));
/// assert!(resolution.fake.contains("share3"));
/// assert_eq!(resolution.honest.len(), 3);
/// ```
pub fn resolve(shares: &[Share], k: usize) -> Result<Resolution> {
    let n = shares.len();
    let subsets = combinations(n, k)?;
    let labels = labels(shares)?;

    tracing::debug!(n, k, subsets = ?binomial(n, k), "resolving shares");

    let coordinates: Vec<BigInt> = shares
        .iter()
        .enumerate()
        .map(|(i, share)| share.coordinate(i))
        .collect();
    let zero = BigInt::zero();

    let mut index: HashMap<BigInt, usize> = HashMap::new();
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut leader: Option<usize> = None;
    let mut skipped = 0usize;

    for subset in subsets {
        let points: Vec<(&BigInt, &BigInt)> = subset
            .iter()
            .map(|&i| (&coordinates[i], &shares[i].y))
            .collect();

        let value = match interpolate_at(&points, &zero) {
            Ok(value) => value,
            Err(e) if e.is_subset_local() => {
                tracing::trace!(?subset, error = %e, "skipping inconsistent subset");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let slot = *index.entry(value).or_insert_with_key(|value| {
            candidates.push(Candidate {
                value: value.clone(),
                support: 0,
                positions: BTreeSet::new(),
            });
            candidates.len() - 1
        });
        let candidate = &mut candidates[slot];
        candidate.support += 1;
        candidate.positions.extend(subset);

        // strictly greater: the first candidate to reach a count keeps it
        let leads = match leader {
            Some(current) => candidates[slot].support > candidates[current].support,
            None => true,
        };
        if leads {
            leader = Some(slot);
        }
    }

    let Some(leader) = leader else {
        tracing::debug!(n, k, skipped, "no consistent subset");
        return Err(Error::NoConsistentSecret { n, k });
    };
    let winner = &candidates[leader];

    let mut honest = BTreeSet::new();
    let mut fake = BTreeSet::new();
    for (i, label) in labels.into_iter().enumerate() {
        if winner.positions.contains(&i) {
            honest.insert(label);
        } else {
            fake.insert(label);
        }
    }

    tracing::debug!(
        support = winner.support,
        candidates = candidates.len(),
        skipped,
        fake = fake.len(),
        "resolved secret"
    );

    Ok(Resolution {
        secret: winner.value.clone(),
        honest,
        fake,
        support: winner.support,
        candidates: candidates.len(),
    })
}
