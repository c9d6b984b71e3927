// ============================================================
// Layer 4 — Dataset Configuration
// ============================================================
// Knobs that change how a split is tensorized and iterated.
// Serialisable so a run can be reproduced from a JSON file:
//
//   {
//     "tokenization": { "word": true, "char": true },
//     "max_tokens": null,
//     "max_chars": 20,
//     "factor_labels": true,
//     "minibatch_size": 128,
//     "shuffle": true,
//     "seed": 42
//   }

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensorizeError};

// ─── Tokenization ─────────────────────────────────────────────────────────────
/// Which granularities the text tensor carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenization {
    pub word: bool,
    pub char: bool,
}

impl Default for Tokenization {
    fn default() -> Self {
        Self {
            word: true,
            char: true,
        }
    }
}

/// The resolved shape of the text tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextUnits {
    /// sentence × word × char ids
    WordChars,
    /// sentence × word ids
    Words,
    /// sentence × char ids, words joined by spaces
    Chars,
}

impl Tokenization {
    /// # Errors
    /// `NoTextGranularity` when both flags are off.
    pub fn units(self) -> Result<TextUnits> {
        match (self.word, self.char) {
            (true, true) => Ok(TextUnits::WordChars),
            (true, false) => Ok(TextUnits::Words),
            (false, true) => Ok(TextUnits::Chars),
            (false, false) => Err(TensorizeError::NoTextGranularity),
        }
    }
}

// ─── DatasetConfig ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub tokenization: Tokenization,
    /// Keep at most this many tokens per sentence
    pub max_tokens: Option<usize>,
    /// Keep at most this many characters per word
    pub max_chars: Option<usize>,
    /// Split parse labels into depth + ancestor tensors
    pub factor_labels: bool,
    pub minibatch_size: usize,
    pub shuffle: bool,
    /// Seed for a reproducible shuffle; fresh entropy when absent
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            tokenization: Tokenization::default(),
            max_tokens: None,
            max_chars: None,
            factor_labels: true,
            minibatch_size: 128,
            shuffle: false,
            seed: None,
        }
    }
}

impl DatasetConfig {
    /// Check the configuration before any data is touched.
    ///
    /// # Errors
    /// `NoTextGranularity` or `InvalidBatchSize`.
    pub fn validate(self) -> Result<Self> {
        self.tokenization.units()?;
        if self.minibatch_size == 0 {
            return Err(TensorizeError::InvalidBatchSize);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DatasetConfig::default();
        assert_eq!(cfg.tokenization.units().unwrap(), TextUnits::WordChars);
        assert!(cfg.factor_labels);
        assert_eq!(cfg.minibatch_size, 128);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg: DatasetConfig = serde_json::from_str(r#"{"minibatch_size": 4, "shuffle": true}"#).unwrap();
        assert_eq!(cfg.minibatch_size, 4);
        assert!(cfg.shuffle);
        assert!(cfg.factor_labels);
    }

    #[test]
    fn test_validate_rejects_no_granularity() {
        let cfg = DatasetConfig {
            tokenization: Tokenization {
                word: false,
                char: false,
            },
            ..DatasetConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(TensorizeError::NoTextGranularity)));
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let cfg = DatasetConfig {
            minibatch_size: 0,
            ..DatasetConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(TensorizeError::InvalidBatchSize)));
    }
}
