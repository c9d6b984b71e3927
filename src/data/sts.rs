// ============================================================
// Layer 4 — Semantic Similarity Extension Points
// ============================================================
// Placeholders for a sentence-pair similarity (STS) data path.
// They are callable so code can be written against them, but they
// load nothing, cache nothing, and decode to nothing. The parsing
// pipeline never depends on them.

use std::path::Path;

use crate::data::dataset::Dataset;
use crate::error::Result;

impl Dataset {
    /// Load an STS file into split `name`. Currently a no-op.
    pub fn load_sts(&mut self, path: impl AsRef<Path>, name: &str) -> Result<()> {
        tracing::debug!(
            "STS loading is not implemented; ignoring '{}' for split '{}'",
            path.as_ref().display(),
            name
        );
        Ok(())
    }

    /// Tensorize the STS data of split `name`. Currently a no-op.
    pub fn tensorize_sts(&mut self, name: &str) -> Result<()> {
        tracing::debug!("STS tensorization is not implemented; split '{}' unchanged", name);
        Ok(())
    }

    /// Decode STS predictions. Currently always empty.
    pub fn detensorize_sts(&self, _scores: &[f32]) -> Vec<String> {
        Vec::new()
    }
}
