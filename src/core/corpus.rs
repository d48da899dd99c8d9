use std::borrow::Cow;

use crate::core::encoded::EncodedString;
use crate::error::{CorpusKind, MatchError, Result};

/// An ordered set of strings encoded at a shared buffer capacity
#[derive(Debug, Clone)]
pub struct Corpus {
    kind: CorpusKind,
    capacity: usize,
    records: Vec<EncodedString>,
}

impl Corpus {
    /// Encode every record, failing on the first one that does not fit.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::EmptyCorpus` when `texts` is empty and
    /// `MatchError::BufferOverflow` naming the first oversized record.
    pub fn encode<S: AsRef<str>>(kind: CorpusKind, texts: &[S], capacity: usize) -> Result<Self> {
        if texts.is_empty() {
            return Err(MatchError::EmptyCorpus(kind));
        }

        let records = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                EncodedString::encode(text.as_ref(), capacity).map_err(|overflow| {
                    MatchError::BufferOverflow {
                        corpus: kind,
                        record: i + 1,
                        len: overflow.len,
                        capacity: overflow.capacity,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind,
            capacity,
            records,
        })
    }

    #[must_use]
    pub fn kind(&self) -> CorpusKind {
        self.kind
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[EncodedString] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EncodedString> {
        self.records.get(index)
    }

    /// Decoded text of record `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn text(&self, index: usize) -> Cow<'_, str> {
        self.records[index].decode()
    }

    /// Effective length of every record, in corpus order
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        self.records.iter().map(EncodedString::effective_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_corpus() {
        let corpus = Corpus::encode(
            CorpusKind::References,
            &["Homo sapiens", "Gallus gallus"],
            20,
        )
        .unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.capacity(), 20);
        assert_eq!(corpus.kind(), CorpusKind::References);
        assert_eq!(corpus.text(1), "Gallus gallus");
        assert_eq!(corpus.lengths(), vec![12, 13]);
    }

    #[test]
    fn test_empty_corpus() {
        let texts: Vec<String> = Vec::new();
        let err = Corpus::encode(CorpusKind::Queries, &texts, 10).unwrap_err();
        assert!(matches!(err, MatchError::EmptyCorpus(CorpusKind::Queries)));
    }

    #[test]
    fn test_overflow_names_record() {
        let err = Corpus::encode(
            CorpusKind::Queries,
            &["short", "ok", "this one is too long"],
            10,
        )
        .unwrap_err();
        match err {
            MatchError::BufferOverflow {
                corpus,
                record,
                len,
                capacity,
            } => {
                assert_eq!(corpus, CorpusKind::Queries);
                assert_eq!(record, 3);
                assert_eq!(len, 20);
                assert_eq!(capacity, 10);
            }
            other => panic!("expected BufferOverflow, got {other:?}"),
        }
    }
}
