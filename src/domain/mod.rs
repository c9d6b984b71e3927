// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain data types and pure functions: no files, no arrays,
// no framework tensors.
//
//   corpus.rs — Sentence / Corpus with the equal-length invariant
//   label.rs  — parse label ⇄ (depth, ancestor) factorization
//   traits.rs — CorpusSource abstraction over where text comes from

pub mod corpus;

pub mod label;

pub mod traits;
