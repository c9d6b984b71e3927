// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concerns shared by several layers that are not part of the
// tensorization logic itself:
//
//   vocab_store.rs — Vocabulary and config persistence
//                    Writes the symbol tables and the dataset
//                    options as JSON so a later run (or a model
//                    decoding its predictions) uses exactly the
//                    same ids.

/// Vocabulary and dataset-config JSON files
pub mod vocab_store;
