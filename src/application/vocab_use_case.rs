// ============================================================
// Layer 2 — VocabUseCase
// ============================================================
// Builds the symbol tables from a training file:
//
//   Step 1: Load the label file       (Layer 4 - data)
//   Step 2: Build all five tables     (Layer 4 - data)
//   Step 3: Optionally save them, and
//           the config they go with   (Layer 6 - infra)

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::{config::DatasetConfig, loader::ParseLabelFile, vocab::Vocabularies};
use crate::domain::traits::CorpusSource;
use crate::infra::vocab_store::{read_json, VocabStore};

#[derive(Debug, Clone)]
pub struct VocabRequest {
    pub train: PathBuf,
    /// JSON dataset config stored next to the vocabularies
    pub config_file: Option<PathBuf>,
    /// Directory to write vocabularies.json and dataset_config.json into
    pub out: Option<PathBuf>,
}

/// Table sizes, each counting the "" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabReport {
    pub sentences: usize,
    pub tokens: usize,
    pub chars: usize,
    pub words: usize,
    pub pos: usize,
    pub labels: usize,
    pub ancestors: usize,
    pub saved_to: Option<PathBuf>,
}

pub struct VocabUseCase {
    request: VocabRequest,
}

impl VocabUseCase {
    pub fn new(request: VocabRequest) -> Self {
        Self { request }
    }

    pub fn execute(&self) -> Result<VocabReport> {
        let req = &self.request;
        let cfg = match &req.config_file {
            Some(path) => read_json::<DatasetConfig>(path)?.validate()?,
            None => DatasetConfig::default(),
        };

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let source = ParseLabelFile::new(&req.train);
        let corpus = source
            .load_corpus()
            .with_context(|| format!("Cannot load training file '{}'", source.path().display()))?;

        // ── Step 2: Build ─────────────────────────────────────────────────────
        let vocab = Vocabularies::build(&corpus, &[]);

        // ── Step 3: Save ──────────────────────────────────────────────────────
        let saved_to = match &req.out {
            Some(dir) => {
                let store = VocabStore::new(dir);
                store.save_config(&cfg)?;
                Some(store.save_vocab(&vocab)?)
            }
            None => None,
        };

        Ok(VocabReport {
            sentences: corpus.len(),
            tokens: corpus.token_count(),
            chars: vocab.chars.len(),
            words: vocab.words.len(),
            pos: vocab.pos.len(),
            labels: vocab.labels.len(),
            ancestors: vocab.ancestors.len(),
            saved_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builds_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train.txt");
        let mut f = std::fs::File::create(&train).unwrap();
        writeln!(f, "The DT 1_NP\ndog NN NONE\n\nRun VB NONE").unwrap();

        let cfg_path = dir.path().join("cfg.json");
        std::fs::write(&cfg_path, r#"{ "max_tokens": 7 }"#).unwrap();

        let report = VocabUseCase::new(VocabRequest {
            train,
            config_file: Some(cfg_path),
            out: Some(dir.path().join("vocab")),
        })
        .execute()
        .unwrap();

        assert_eq!(report.sentences, 2);
        assert_eq!(report.tokens, 3);
        // "", DT, NN, VB
        assert_eq!(report.pos, 4);
        // "", 1_NP, NONE
        assert_eq!(report.labels, 3);
        // "", NP, NONE
        assert_eq!(report.ancestors, 3);
        assert!(report.saved_to.unwrap().exists());

        let stored = VocabStore::new(dir.path().join("vocab")).load_config().unwrap();
        assert_eq!(stored.max_tokens, Some(7));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = VocabUseCase::new(VocabRequest {
            train: PathBuf::from("/nonexistent/train.txt"),
            config_file: None,
            out: None,
        })
        .execute()
        .unwrap_err();
        assert!(err.to_string().contains("train.txt"));
    }
}
