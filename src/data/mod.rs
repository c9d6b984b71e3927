// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer turns parse-label files into padded integer
// tensors and back again.
//
// The pipeline flows in this order:
//
//   word POS label lines
//       │
//       ▼
//   ParseLabelFile    → reads files into a Corpus
//       │
//       ▼
//   Vocabularies      → one SymbolTable per kind of symbol
//       │
//       ▼
//   Dataset::encode   → symbols → ids → padded arrays + masks
//       │               (uses pad_with_mask_to_rank)
//       ▼
//   SplitTensors      → cached per split
//       │
//       ├──► Minibatches      → fixed-size row slices
//       ├──► TensorizedSplit  → Burn's Dataset trait
//       │     ParseBatcher    → Burn's Batcher trait
//       ▼
//   detensorize /     → ids → symbols → CoNLL-style text
//   render_predictions
//
// Each module is responsible for one step and is tested on
// its own.

/// Dataset options (tokenization, truncation, batching)
pub mod config;

/// Reads whitespace-separated parse-label files
pub mod loader;

/// Symbol ⇄ id tables, built from the training split
pub mod vocab;

/// Nested-sequence padding with per-axis alignment
pub mod padding;

/// Splits, encoding, and the tensor cache
pub mod dataset;

/// Single-pass minibatch iterator
pub mod minibatch;

/// Decoding tensors back into symbols and text
pub mod render;

/// Burn Dataset and Batcher over tensorized splits
pub mod batcher;

/// Sentence-similarity hooks (not implemented)
pub mod sts;
