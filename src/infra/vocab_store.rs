// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the symbol tables and the dataset options as JSON so
// a later run encodes and decodes with exactly the same ids.
//
// File layout:
//   artifacts/
//     vocabularies.json   ← all five SymbolTables
//     dataset_config.json ← DatasetConfig used to build them
//
// The "" padding sentinel is stored like any other symbol, so
// index 0 survives a round trip. Lookup maps are rebuilt on load.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::config::DatasetConfig;
use crate::data::vocab::Vocabularies;

const VOCAB_FILE: &str = "vocabularies.json";
const CONFIG_FILE: &str = "dataset_config.json";

/// Saves and loads dataset artifacts under one directory.
pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn vocab_path(&self) -> PathBuf {
        self.dir.join(VOCAB_FILE)
    }

    /// Write the vocabularies, creating the directory if needed.
    pub fn save_vocab(&self, vocab: &Vocabularies) -> Result<PathBuf> {
        let path = self.vocab_path();
        self.write_json(&path, vocab)?;
        tracing::info!("Saved vocabularies to '{}'", path.display());
        Ok(path)
    }

    pub fn load_vocab(&self) -> Result<Vocabularies> {
        let path = self.vocab_path();
        let vocab: Vocabularies = read_json(&path).with_context(|| {
            format!("Cannot load vocabularies. Have you run 'vocab --out {}' first?", self.dir.display())
        })?;
        tracing::info!(
            "Loaded vocabularies from '{}' ({} words, {} labels)",
            path.display(),
            vocab.words.len(),
            vocab.labels.len()
        );
        Ok(vocab)
    }

    pub fn save_config(&self, cfg: &DatasetConfig) -> Result<()> {
        let path = self.config_path();
        self.write_json(&path, cfg)?;
        tracing::debug!("Saved dataset config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<DatasetConfig> {
        read_json(&self.config_path())
    }

    /// The stored config, or `None` when this directory has none.
    pub fn stored_config(&self) -> Result<Option<DatasetConfig>> {
        if self.config_path().exists() {
            self.load_config().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create directory '{}'", self.dir.display()))?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json).with_context(|| format!("Cannot write '{}'", path.display()))
    }
}

/// Read and deserialise one JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Malformed JSON in '{}'", path.display()))
}
