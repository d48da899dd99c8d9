use crate::core::bigram::{bigram_key, bigrams};
use crate::core::encoded::EncodedString;

/// Safely convert usize to f64 for ratio calculations
///
/// Record lengths are bounded by the buffer capacity, far below the range
/// where f64 loses integer precision.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// A coverage metric: the fraction of a query's comparison units found in a reference.
///
/// Units are derived once per record and then compared many times, so the
/// expensive part of preparing a record lives in [`units`](Self::units).
pub trait SimilarityMetric: Send + Sync {
    type Units: Send + Sync;

    /// Derive the comparison units of an encoded record
    fn units(&self, encoded: &EncodedString) -> Self::Units;

    /// Fraction in `[0, 1]` of the query's units found in the reference
    fn score(&self, query: &Self::Units, reference: &Self::Units) -> f64;
}

/// Multiset overlap of bigrams.
///
/// Each query bigram may consume at most one matching reference bigram, so a
/// repeated pattern in the query only scores as often as it occurs in the
/// reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigramMetric;

impl SimilarityMetric for BigramMetric {
    /// Bigram keys, sorted
    type Units = Vec<u16>;

    fn units(&self, encoded: &EncodedString) -> Self::Units {
        let mut keys: Vec<u16> = bigrams(encoded).into_iter().map(bigram_key).collect();
        keys.sort_unstable();
        keys
    }

    fn score(&self, query: &Self::Units, reference: &Self::Units) -> f64 {
        let shared = sorted_multiset_intersection(query, reference);
        count_to_f64(shared) / count_to_f64(query.len().max(1))
    }
}

/// Size of the multiset intersection of two sorted slices
fn sorted_multiset_intersection(a: &[u16], b: &[u16]) -> usize {
    let (mut i, mut j, mut shared) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    shared
}

/// Byte membership: every query byte that occurs anywhere in the reference counts.
///
/// Coarser than [`BigramMetric`]; repeated query bytes each count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteSetMetric;

/// A record's bytes plus a 256-bit presence set
#[derive(Debug, Clone)]
pub struct ByteUnits {
    bytes: Vec<u8>,
    present: [u64; 4],
}

impl ByteUnits {
    fn contains(&self, byte: u8) -> bool {
        self.present[usize::from(byte >> 6)] & (1u64 << (byte & 63)) != 0
    }
}

impl SimilarityMetric for ByteSetMetric {
    type Units = ByteUnits;

    fn units(&self, encoded: &EncodedString) -> Self::Units {
        let bytes = encoded.as_bytes().to_vec();
        let mut present = [0u64; 4];
        for &b in &bytes {
            present[usize::from(b >> 6)] |= 1u64 << (b & 63);
        }
        ByteUnits { bytes, present }
    }

    fn score(&self, query: &Self::Units, reference: &Self::Units) -> f64 {
        let found = query.bytes.iter().filter(|&&b| reference.contains(b)).count();
        count_to_f64(found) / count_to_f64(query.bytes.len().max(1))
    }
}
