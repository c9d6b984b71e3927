// ============================================================
// Layer 2 — TensorizeUseCase
// ============================================================
// Runs the data pipeline end to end on one training file:
//
//   Step 1: Resolve the dataset config  (file or stored, then CLI overrides)
//   Step 2: Load the training split     (Layer 4 - data)
//   Step 3: Build or reload vocabularies (Layer 4 / Layer 6)
//   Step 4: Tensorize the split         (Layer 4 - data)
//   Step 5: Iterate one minibatch pass  (Layer 4 - data)
//
// The pass only reports batch sizes; nothing is trained here.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};

use crate::data::{
    config::DatasetConfig,
    dataset::{Dataset, TRAIN},
    loader::ParseLabelFile,
};
use crate::domain::traits::CorpusSource;
use crate::infra::vocab_store::{read_json, VocabStore};

/// What to tensorize and how. `None` fields keep the config file's value.
#[derive(Debug, Clone, Default)]
pub struct TensorizeRequest {
    pub train: PathBuf,
    pub config_file: Option<PathBuf>,
    /// Reuse vocabularies saved by an earlier run
    pub vocab_dir: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub no_factor: bool,
}

impl TensorizeRequest {
    /// The dataset config after applying overrides.
    ///
    /// The base is `config_file` if given, else the config stored with
    /// reused vocabularies, else the defaults.
    pub fn resolve_config(&self) -> Result<DatasetConfig> {
        let stored = match (&self.config_file, &self.vocab_dir) {
            (None, Some(dir)) => VocabStore::new(dir).stored_config()?,
            _ => None,
        };
        let mut cfg: DatasetConfig = match (&self.config_file, stored) {
            (Some(path), _) => read_json(path)?,
            (None, Some(stored)) => stored,
            (None, None) => DatasetConfig::default(),
        };
        if let Some(size) = self.batch_size {
            cfg.minibatch_size = size;
        }
        if self.shuffle {
            cfg.shuffle = true;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.no_factor {
            cfg.factor_labels = false;
        }
        Ok(cfg.validate()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorizeReport {
    pub sentences: usize,
    pub text_shape: Vec<usize>,
    pub label_shape: Vec<usize>,
    pub factored: bool,
    /// Rows in each minibatch of the pass, in iteration order
    pub batch_sizes: Vec<usize>,
    /// Sentence order of the pass
    pub order: Vec<usize>,
}

pub struct TensorizeUseCase {
    request: TensorizeRequest,
}

impl TensorizeUseCase {
    pub fn new(request: TensorizeRequest) -> Self {
        Self { request }
    }

    /// Load, build vocabularies, and tensorize the training split.
    pub fn prepare(&self) -> Result<Dataset> {
        let req = &self.request;

        // ── Step 1: Config ────────────────────────────────────────────────────
        let cfg = req.resolve_config()?;

        // ── Step 2: Load ──────────────────────────────────────────────────────
        let source = ParseLabelFile::new(&req.train);
        let corpus = source
            .load_corpus()
            .with_context(|| format!("Cannot load training file '{}'", source.path().display()))?;

        // ── Step 3: Vocabularies ──────────────────────────────────────────────
        let mut dataset = match &req.vocab_dir {
            Some(dir) => {
                let vocab = VocabStore::new(dir).load_vocab()?;
                let mut ds = Dataset::with_vocabularies(Arc::new(vocab), cfg)?;
                ds.insert_split(TRAIN, corpus);
                ds
            }
            None => Dataset::from_corpus(corpus, cfg)?,
        };

        // ── Step 4: Tensorize ─────────────────────────────────────────────────
        let factor = dataset.config().factor_labels;
        dataset
            .tensorize(TRAIN, factor)
            .with_context(|| format!("Cannot tensorize '{}'", req.train.display()))?;
        Ok(dataset)
    }

    pub fn execute(&self) -> Result<TensorizeReport> {
        let dataset = self.prepare()?;
        let cfg = dataset.config();
        let tensors = dataset.tensors(TRAIN)?;

        // ── Step 5: One pass ──────────────────────────────────────────────────
        let batches = match cfg.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                dataset.minibatches_with_rng(TRAIN, cfg.minibatch_size, cfg.shuffle, &mut rng)?
            }
            None => dataset.minibatches(TRAIN, cfg.minibatch_size, cfg.shuffle)?,
        };
        let order = batches.order().to_vec();
        let batch_sizes: Vec<usize> = batches.map(|b| b.len()).collect();

        tracing::info!(
            "Iterated {} minibatches over {} sentences (shuffle={})",
            batch_sizes.len(),
            tensors.len(),
            cfg.shuffle
        );

        Ok(TensorizeReport {
            sentences: tensors.len(),
            text_shape: tensors.text.shape().to_vec(),
            label_shape: tensors.labels.shape().to_vec(),
            factored: tensors.is_factored(),
            batch_sizes,
            order,
        })
    }
}
