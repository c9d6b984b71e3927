// ============================================================
// Layer 4 — Parse Label File Loader
// ============================================================
// Reads the whitespace-separated label format:
//
//   The     DT   1_NP
//   dog     NN   -1_S
//   barks   VBZ  NONE
//                         ← blank line ends the sentence
//   ...
//
// Every non-blank line must split into exactly three fields.
// A sentence still open at end of file is kept, so the trailing
// blank line is optional. Consecutive blank lines do not produce
// empty sentences.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::domain::corpus::{Corpus, Sentence};
use crate::domain::label;
use crate::domain::traits::CorpusSource;
use crate::error::{Result, TensorizeError};

/// A label file on disk.
/// Implements the CorpusSource trait from Layer 3.
#[derive(Debug, Clone)]
pub struct ParseLabelFile {
    path: PathBuf,
}

impl ParseLabelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSource for ParseLabelFile {
    fn load_corpus(&self) -> Result<Corpus> {
        read_parse_label_file(&self.path)
    }
}

/// Read a label file from disk.
pub fn read_parse_label_file(path: impl AsRef<Path>) -> Result<Corpus> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let corpus = parse_label_reader(BufReader::new(file))?;

    tracing::info!(
        "Loaded {} sentences ({} tokens) from '{}'",
        corpus.len(),
        corpus.token_count(),
        path.display()
    );
    Ok(corpus)
}

/// Parse label-file content from any buffered reader.
pub fn parse_label_reader<R: BufRead>(reader: R) -> Result<Corpus> {
    let mut sentences = Vec::new();
    let mut columns = Columns::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            columns.flush_into(&mut sentences)?;
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [word, pos, parse] = fields.as_slice() else {
            return Err(TensorizeError::FieldCount {
                line: i + 1,
                found: fields.len(),
            });
        };

        if !label::is_canonical(parse) {
            tracing::warn!(
                "line {}: parse label '{}' does not survive depth/ancestor factoring",
                i + 1,
                parse
            );
        }

        columns.words.push(word.to_string());
        columns.pos.push(pos.to_string());
        columns.labels.push(parse.to_string());
    }

    // No trailing blank line: the last sentence is still open
    columns.flush_into(&mut sentences)?;

    Ok(Corpus::new(sentences))
}

/// The sentence currently being read.
#[derive(Default)]
struct Columns {
    words: Vec<String>,
    pos: Vec<String>,
    labels: Vec<String>,
}

impl Columns {
    fn flush_into(&mut self, sentences: &mut Vec<Sentence>) -> Result<()> {
        if self.words.is_empty() && self.pos.is_empty() && self.labels.is_empty() {
            return Ok(());
        }
        let sentence = Sentence::from_columns(
            sentences.len(),
            std::mem::take(&mut self.words),
            std::mem::take(&mut self.pos),
            std::mem::take(&mut self.labels),
        )?;
        sentences.push(sentence);
        Ok(())
    }
}
