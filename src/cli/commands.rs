// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `vocab`, `tensorize` and
// `render`, and all their flags.
//
// clap's derive macros generate --help, error messages for
// missing args, and string → number conversion.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::{tensorize_use_case::TensorizeRequest, vocab_use_case::VocabRequest};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the symbol tables from a training file
    Vocab(VocabArgs),

    /// Tensorize a training file and iterate one minibatch pass
    Tensorize(TensorizeArgs),

    /// Tensorize a training file and print it back, decoded
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct VocabArgs {
    /// Training file: one `word POS label` per line, blank line between sentences
    #[arg(long)]
    pub train: PathBuf,

    /// JSON dataset config, saved next to the vocabularies
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to save vocabularies.json and dataset_config.json into
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl From<VocabArgs> for VocabRequest {
    fn from(a: VocabArgs) -> Self {
        VocabRequest {
            train: a.train,
            config_file: a.config,
            out: a.out,
        }
    }
}

#[derive(Args, Debug)]
pub struct TensorizeArgs {
    #[arg(long)]
    pub train: PathBuf,

    /// JSON dataset config; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory from an earlier `vocab --out`; its stored config is
    /// used when --config is absent
    #[arg(long)]
    pub vocab: Option<PathBuf>,

    /// Sentences per minibatch (config default: 128)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Visit sentences in a random order
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep raw parse labels instead of depth + ancestor tensors
    #[arg(long)]
    pub no_factor: bool,
}

impl From<TensorizeArgs> for TensorizeRequest {
    fn from(a: TensorizeArgs) -> Self {
        TensorizeRequest {
            train: a.train,
            config_file: a.config,
            vocab_dir: a.vocab,
            batch_size: a.batch_size,
            shuffle: a.shuffle,
            seed: a.seed,
            no_factor: a.no_factor,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[arg(long)]
    pub train: PathBuf,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub no_factor: bool,
}

impl From<RenderArgs> for TensorizeRequest {
    fn from(a: RenderArgs) -> Self {
        TensorizeRequest {
            train: a.train,
            config_file: a.config,
            no_factor: a.no_factor,
            ..TensorizeRequest::default()
        }
    }
}
