use crate::core::encoded::EncodedString;

/// An overlapping pair of adjacent bytes
pub type Bigram = [u8; 2];

/// Bigrams of an encoded string's non-padding prefix, left to right.
///
/// A prefix of `n` bytes yields `n - 1` bigrams with duplicates retained;
/// prefixes shorter than two bytes yield none.
#[must_use]
pub fn bigrams(encoded: &EncodedString) -> Vec<Bigram> {
    bigrams_of(encoded.as_bytes())
}

#[must_use]
pub fn bigrams_of(bytes: &[u8]) -> Vec<Bigram> {
    bytes.windows(2).map(|w| [w[0], w[1]]).collect()
}

/// Pack a bigram into a single sortable key
#[inline]
#[must_use]
pub fn bigram_key(bigram: Bigram) -> u16 {
    u16::from_be_bytes(bigram)
}
