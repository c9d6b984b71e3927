// ============================================================
// parse-tensorizer
// ============================================================
// Layers, outermost first:
//
//   cli          — Layer 1: argument parsing and printing
//   application  — Layer 2: one use case per command
//   domain       — Layer 3: sentences, corpora, parse labels
//   data         — Layer 4: vocabularies, padding, tensors, batches
//   infra        — Layer 6: JSON persistence

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;

pub use data::batcher::{ParseBatcher, ParseItem, ParseTensorBatch, TensorizedSplit};
pub use data::config::{DatasetConfig, Tokenization};
pub use data::dataset::{DataKind, Dataset, SplitTensors, TRAIN};
pub use data::loader::{parse_label_reader, read_parse_label_file, ParseLabelFile};
pub use data::minibatch::{Minibatches, ParseBatch};
pub use data::padding::{pad, pad_with_mask, pad_with_mask_to_rank, Alignment, Nested, PadLayout, Padded};
pub use data::vocab::{SymbolTable, TableKind, Vocabularies};
pub use domain::corpus::{Corpus, Sentence};
pub use domain::traits::CorpusSource;
pub use error::{Result, TensorizeError};
