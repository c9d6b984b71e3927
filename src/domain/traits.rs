// ============================================================
// Layer 3 — Core Traits
// ============================================================
// The Dataset only needs "something that yields a Corpus". The
// label-file reader implements this; tests hand in corpora built
// in memory.

use crate::domain::corpus::Corpus;
use crate::error::Result;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce an annotated corpus.
///
/// Implementations:
///   - ParseLabelFile → reads the `word POS label` format from disk
///   - Corpus         → an already-loaded corpus (cloned)
pub trait CorpusSource {
    /// Load every sentence this source holds.
    fn load_corpus(&self) -> Result<Corpus>;
}

impl CorpusSource for Corpus {
    fn load_corpus(&self) -> Result<Corpus> {
        Ok(self.clone())
    }
}
