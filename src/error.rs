// ============================================================
// Error Types
// ============================================================
// Every failure the tensorization core can raise. All of them
// abort the current operation; the only softened case (OOV
// characters and words mapping to index 0) never reaches here.
//
// The application and CLI layers wrap these in anyhow with
// extra context about which file or split was involved.

use thiserror::Error;

use crate::data::vocab::TableKind;

/// Errors raised while loading, encoding, or decoding parse data.
#[derive(Debug, Error)]
pub enum TensorizeError {
    /// A token line did not split into exactly `word POS label`.
    #[error("line {line}: expected 3 whitespace-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    /// The parallel sequences of one sentence ended up with different lengths.
    #[error(
        "sentence {sentence}: mismatched text and labels ({words} words, {pos} POS labels, {labels} parse labels)"
    )]
    LengthMismatch {
        sentence: usize,
        words: usize,
        pos: usize,
        labels: usize,
    },

    /// A padding alignment name other than `pre` or `post`.
    #[error("padding type \"{0}\" not recognized")]
    UnknownAlignment(String),

    /// A data kind name that no encoder or decoder handles.
    #[error("unrecognized data kind \"{0}\"")]
    UnknownDataKind(String),

    /// Text configured with neither word- nor character-level tokens.
    #[error("text must be tokenized at the word or character level (or both)")]
    NoTextGranularity,

    /// A label missing from a closed label table.
    #[error("{table} table has no entry for \"{label}\"")]
    UnknownLabel { table: TableKind, label: String },

    /// A parse label whose depth field is not an integer.
    #[error("cannot read a depth from parse label \"{0}\"")]
    BadDepth(String),

    /// An integer that does not index into a symbol table.
    #[error("{table} table has no symbol at index {index}")]
    SymbolIndex { table: TableKind, index: i64 },

    /// A split name that was never loaded.
    #[error("no split named \"{0}\"")]
    UnknownSplit(String),

    /// A split that was loaded but has no cached tensors yet.
    #[error("split \"{0}\" has not been tensorized")]
    NotTensorized(String),

    /// Two arrays that must share a shape do not.
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A minibatch size of zero.
    #[error("minibatch size must be greater than 0")]
    InvalidBatchSize,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, TensorizeError>;
