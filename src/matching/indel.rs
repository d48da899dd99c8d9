//! Bit-parallel longest common subsequence and indel similarity.
//!
//! The pattern string is packed into one bit mask per distinct character
//! (64 positions per word). Each character of the text then updates the whole
//! LCS row with a handful of word operations, so a comparison costs
//! `O(|text| * ceil(|pattern| / 64))` instead of a full DP table.

use std::collections::HashMap;

use crate::matching::metric::count_to_f64;

const ASCII_SLOTS: usize = 256;

/// Per-character match masks of a pattern, reusable against many texts
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    len: usize,
    words: usize,
    /// `ASCII_SLOTS * words` masks for code points below 256
    low: Vec<u64>,
    high: HashMap<char, Vec<u64>>,
    zeros: Vec<u64>,
    last_mask: u64,
}

impl Pattern {
    pub(crate) fn new(chars: &[char]) -> Self {
        let len = chars.len();
        let words = len.div_ceil(64).max(1);
        let mut low = vec![0u64; ASCII_SLOTS * words];
        let mut high: HashMap<char, Vec<u64>> = HashMap::new();

        for (i, &c) in chars.iter().enumerate() {
            let (word, bit) = (i / 64, i % 64);
            match low_slot(c) {
                Some(slot) => low[slot * words + word] |= 1u64 << bit,
                None => high.entry(c).or_insert_with(|| vec![0; words])[word] |= 1u64 << bit,
            }
        }

        let tail = len % 64;
        let last_mask = if tail == 0 { !0 } else { (1u64 << tail) - 1 };

        Self {
            len,
            words,
            low,
            high,
            zeros: vec![0; words],
            last_mask,
        }
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn masks(&self, c: char) -> &[u64] {
        match low_slot(c) {
            Some(slot) => &self.low[slot * self.words..(slot + 1) * self.words],
            None => self.high.get(&c).map_or(&self.zeros, Vec::as_slice),
        }
    }

    /// Matched pattern positions in a row: the zero bits of `row`
    fn matched(&self, row: &[u64]) -> usize {
        let Some((last, full)) = row.split_last() else {
            return 0;
        };
        let full: u32 = full.iter().map(|w| (!w).count_ones()).sum();
        (full + (!last & self.last_mask).count_ones()) as usize
    }

    /// LCS length of the pattern and `text`.
    ///
    /// Returns 0 as soon as the LCS provably cannot reach `required`; pass 0
    /// to always get the exact length.
    pub(crate) fn lcs(&self, text: &[char], required: usize) -> usize {
        if self.len == 0 || text.is_empty() || self.len.min(text.len()) < required {
            return 0;
        }

        let mut row = vec![!0u64; self.words];
        for (i, &c) in text.iter().enumerate() {
            let masks = self.masks(c);
            let mut carry = false;
            for (word, &mask) in row.iter_mut().zip(masks) {
                let matched = *word & mask;
                let (sum, overflow_a) = word.overflowing_add(matched);
                let (sum, overflow_b) = sum.overflowing_add(u64::from(carry));
                carry = overflow_a || overflow_b;
                *word = sum | (*word & !mask);
            }

            if required > 0 {
                let remaining = text.len() - i - 1;
                if self.matched(&row) + remaining < required {
                    return 0;
                }
            }
        }
        self.matched(&row)
    }
}

fn low_slot(c: char) -> Option<usize> {
    usize::try_from(u32::from(c))
        .ok()
        .filter(|&slot| slot < ASCII_SLOTS)
}

/// Indel similarity in `0..=100` for a known LCS: `200 * lcs / (|a| + |b|)`
#[must_use]
pub(crate) fn ratio_from_lcs(lcs: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        return 100.0;
    }
    count_to_f64(2 * lcs) / count_to_f64(lensum) * 100.0
}

/// Smallest LCS a pair with `lensum` characters could need to score above
/// `threshold`, rounded down by one so borderline pairs are never skipped.
#[must_use]
pub(crate) fn required_lcs(threshold: f64, lensum: usize) -> usize {
    let bound = threshold * count_to_f64(lensum) / 200.0;
    if bound < 1.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let floor = bound.floor() as usize;
    floor.saturating_sub(1)
}

/// Length of the longest common subsequence
#[must_use]
pub(crate) fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let prefix = pattern
        .iter()
        .zip(text)
        .take_while(|(x, y)| x == y)
        .count();
    let (pattern, text) = (&pattern[prefix..], &text[prefix..]);
    let suffix = pattern
        .iter()
        .rev()
        .zip(text.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (pattern, text) = (
        &pattern[..pattern.len() - suffix],
        &text[..text.len() - suffix],
    );

    prefix + suffix + Pattern::new(pattern).lcs(text, 0)
}

/// Indel similarity of two complete strings in `0..=100`
#[must_use]
pub(crate) fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    ratio_from_lcs(lcs_len(a, b), a.len() + b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// Quadratic reference LCS
    fn table_lcs(a: &[char], b: &[char]) -> usize {
        let mut prev = vec![0usize; b.len() + 1];
        for &x in a {
            let mut curr = vec![0usize; b.len() + 1];
            for (j, &y) in b.iter().enumerate() {
                curr[j + 1] = if x == y {
                    prev[j] + 1
                } else {
                    curr[j].max(prev[j + 1])
                };
            }
            prev = curr;
        }
        prev[b.len()]
    }

    #[test]
    fn test_lcs_len() {
        assert_eq!(lcs_len(&chars("abcde"), &chars("ace")), 3);
        assert_eq!(lcs_len(&chars("abc"), &chars("xyz")), 0);
        assert_eq!(lcs_len(&chars(""), &chars("abc")), 0);
        assert_eq!(lcs_len(&chars("abc"), &chars("abc")), 3);
    }

    #[test]
    fn test_lcs_agrees_with_table_across_word_boundaries() {
        let pairs = [
            (
                "salmonella enterica subsp. enterica serovar typhimurium str. lt2",
                "salmonela enterica serovar typhimurium",
            ),
            (
                "escherichia coli str. k-12 substr. mg1655 and a long strain annotation tail",
                "escherichia coli k12 mg1655 with some further free text annotation appended",
            ),
            ("Ünïcödé naïve café Łódź ßtraße", "unicode naive cafe lodz strasse"),
        ];
        for (a, b) in pairs {
            let (a, b) = (chars(a), chars(b));
            assert_eq!(lcs_len(&a, &b), table_lcs(&a, &b), "{a:?} / {b:?}");
            assert_eq!(Pattern::new(&a).lcs(&b, 0), table_lcs(&a, &b));
        }

        let long_a: Vec<char> = "gallus gallus domesticus ".repeat(12).chars().collect();
        let long_b: Vec<char> = "gallus galus domestikus ".repeat(11).chars().collect();
        assert!(long_a.len() > 256);
        assert_eq!(Pattern::new(&long_a).lcs(&long_b, 0), table_lcs(&long_a, &long_b));
    }

    #[test]
    fn test_indel_ratio() {
        assert!((indel_ratio(&chars("abc"), &chars("abc")) - 100.0).abs() < 1e-9);
        assert!(indel_ratio(&chars("abc"), &chars("xyz")).abs() < 1e-9);
        // lcs 3 of lensum 8 -> distance 2
        assert!((indel_ratio(&chars("abcd"), &chars("abce")) - 75.0).abs() < 1e-9);
        assert!((indel_ratio(&[], &[]) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_required_lcs_never_exceeds_exact_need() {
        for lensum in 1..200 {
            for threshold in [0.0, 10.0, 50.0, 66.6, 90.0, 99.5, 100.0] {
                let required = required_lcs(threshold, lensum);
                // any LCS that scores above the threshold meets the requirement
                for lcs in 0..=lensum / 2 {
                    if ratio_from_lcs(lcs, lensum) > threshold {
                        assert!(lcs >= required, "lensum {lensum} threshold {threshold}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_lcs_gives_up_below_requirement() {
        let pattern = Pattern::new(&chars("mus musculus"));
        assert_eq!(pattern.lcs(&chars("danio rerio"), 10), 0);
        assert_eq!(pattern.lcs(&chars("mus musculus"), 10), 12);
    }
}
