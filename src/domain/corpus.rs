// ============================================================
// Layer 3 — Corpus Domain Types
// ============================================================
// A corpus is an ordered list of sentences. Each sentence keeps
// three parallel columns, one entry per token:
//
//   words   — surface form ("The")
//   pos     — part-of-speech tag ("DT")
//   labels  — parse label ("1_NP", or a sentinel like "NONE")
//
// The columns always have equal length; `Sentence::from_columns`
// is the only way to build one from loose vectors and it checks
// that invariant.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensorizeError};

/// One annotated sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    words: Vec<String>,
    pos: Vec<String>,
    labels: Vec<String>,
}

impl Sentence {
    /// Build a sentence from its three columns.
    ///
    /// `index` is the sentence's position in its corpus and only
    /// appears in the error message.
    pub fn from_columns(
        index: usize,
        words: Vec<String>,
        pos: Vec<String>,
        labels: Vec<String>,
    ) -> Result<Self> {
        if words.len() != pos.len() || words.len() != labels.len() {
            return Err(TensorizeError::LengthMismatch {
                sentence: index,
                words: words.len(),
                pos: pos.len(),
                labels: labels.len(),
            });
        }
        Ok(Self { words, pos, labels })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn pos(&self) -> &[String] {
        &self.pos
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate tokens as `(word, pos, label)` triples.
    pub fn tokens(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.words
            .iter()
            .zip(&self.pos)
            .zip(&self.labels)
            .map(|((w, p), l)| (w.as_str(), p.as_str(), l.as_str()))
    }
}

/// An ordered collection of sentences, e.g. the contents of one split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub sentences: Vec<Sentence>,
}

impl Corpus {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    /// The word column of every sentence, in corpus order.
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.sentences.iter().map(|s| s.words.clone()).collect()
    }

    /// Total number of tokens across all sentences
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}
