// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All work is delegated to Layer 2 (application); this layer
// only routes and prints.
//
// Three commands are supported:
//   1. `vocab`     — build (and save) the symbol tables
//   2. `tensorize` — encode a file and iterate its minibatches
//   3. `render`    — encode then decode a file, printing it

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, RenderArgs, TensorizeArgs, VocabArgs};

#[derive(Parser, Debug)]
#[command(
    name = "parse-tensorizer",
    version,
    about = "Turn word/POS/parse-label files into padded tensors, and back."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Vocab(args) => run_vocab(args),
            Commands::Tensorize(args) => run_tensorize(args),
            Commands::Render(args) => run_render(args),
        }
    }
}

fn run_vocab(args: VocabArgs) -> Result<()> {
    use crate::application::vocab_use_case::VocabUseCase;

    tracing::info!("Building vocabularies from: {}", args.train.display());
    let report = VocabUseCase::new(args.into()).execute()?;

    println!("sentences  {}", report.sentences);
    println!("tokens     {}", report.tokens);
    println!("chars      {}", report.chars);
    println!("words      {}", report.words);
    println!("POS        {}", report.pos);
    println!("labels     {}", report.labels);
    println!("ancestors  {}", report.ancestors);
    if let Some(path) = report.saved_to {
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn run_tensorize(args: TensorizeArgs) -> Result<()> {
    use crate::application::tensorize_use_case::TensorizeUseCase;

    let report = TensorizeUseCase::new(args.into()).execute()?;

    println!("sentences  {}", report.sentences);
    println!("text       {:?}", report.text_shape);
    println!(
        "labels     {:?} ({})",
        report.label_shape,
        if report.factored { "ancestors + depth" } else { "raw" }
    );
    println!("batches    {} {:?}", report.batch_sizes.len(), report.batch_sizes);
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<()> {
    use crate::application::render_use_case::RenderUseCase;

    let rendered = RenderUseCase::new(args.into()).execute()?;
    print!("{rendered}");
    Ok(())
}
