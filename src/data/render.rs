// ============================================================
// Layer 4 — Detensorization and Prediction Rendering
// ============================================================
// The inverse of tensorization: integer tensors (gold or model
// output) back to symbol sequences.
//
// For each position:
//   1. masked out (mask == 0)  → skipped
//   2. looked up in the table for its DataKind
//   3. empty strings dropped, so padding never reaches the output
//
// Text tensors of rank 3 are joined per word before step 3.
// Joint decoding combines a depth tensor and an ancestor tensor
// into full parse labels.
//
// Rendering keeps every real token instead: one whose symbol is
// empty (all chars unseen, or a predicted padding id) prints as
// UNKNOWN so the word, POS and label columns stay aligned.

use ndarray::{ArrayD, ArrayView2, ArrayView3, Ix2, Ix3};

use crate::data::config::TextUnits;
use crate::data::dataset::{word_mask, DataKind, Dataset};
use crate::data::vocab::SymbolTable;
use crate::domain::label;
use crate::error::{Result, TensorizeError};

/// Printed by `render_predictions` for a real token with no symbol.
pub const UNKNOWN: &str = "<unk>";

/// What to do with a real position whose symbol is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Empties {
    Drop,
    Mark,
}

impl Empties {
    fn push(self, line: &mut Vec<String>, symbol: String) {
        if !symbol.is_empty() {
            line.push(symbol);
        } else if self == Empties::Mark {
            line.push(UNKNOWN.to_string());
        }
    }
}

impl Dataset {
    /// Decode a tensor of `kind` into one list of symbols per sentence.
    ///
    /// `Joint` needs two tensors; use `detensorize_joint` for it.
    pub fn detensorize(
        &self,
        data: &ArrayD<i64>,
        kind: DataKind,
        mask: Option<&ArrayD<u8>>,
    ) -> Result<Vec<Vec<String>>> {
        self.decode(data, kind, mask, Empties::Drop)
    }

    fn decode(
        &self,
        data: &ArrayD<i64>,
        kind: DataKind,
        mask: Option<&ArrayD<u8>>,
        empties: Empties,
    ) -> Result<Vec<Vec<String>>> {
        let vocab = self.vocab();

        match kind {
            DataKind::Text => match self.config().tokenization.units()? {
                TextUnits::WordChars => decode_words(data, mask, empties, lookup(&vocab.chars)),
                TextUnits::Words => decode_rows(data, mask, empties, lookup(&vocab.words)),
                TextUnits::Chars => decode_rows(data, mask, empties, lookup(&vocab.chars)),
            },
            DataKind::Pos => decode_rows(data, mask, empties, lookup(&vocab.pos)),
            DataKind::ParseLabel => decode_rows(data, mask, empties, lookup(&vocab.labels)),
            DataKind::Ancestor => decode_rows(data, mask, empties, lookup(&vocab.ancestors)),
            DataKind::Depth => decode_rows(data, mask, empties, |i| Ok(i.to_string())),
            DataKind::Joint => Err(TensorizeError::UnknownDataKind(kind.to_string())),
        }
    }

    /// Decode depth + ancestor tensors back into parse labels.
    ///
    /// With `depth_on_all` every token is rendered `depth_ancestor`;
    /// otherwise sentinel ancestors are emitted without a depth.
    pub fn detensorize_joint(
        &self,
        depth: &ArrayD<i64>,
        ancestors: &ArrayD<i64>,
        mask: Option<&ArrayD<u8>>,
        depth_on_all: bool,
    ) -> Result<Vec<Vec<String>>> {
        self.decode_joint(depth, ancestors, mask, depth_on_all, Empties::Drop)
    }

    fn decode_joint(
        &self,
        depth: &ArrayD<i64>,
        ancestors: &ArrayD<i64>,
        mask: Option<&ArrayD<u8>>,
        depth_on_all: bool,
        empties: Empties,
    ) -> Result<Vec<Vec<String>>> {
        let depth = as_rank2(depth)?;
        let ancestors = as_rank2(ancestors)?;
        check_shape(ancestors.shape(), depth.shape())?;
        if let Some(m) = mask {
            check_shape(m.shape(), depth.shape())?;
        }

        let table = &self.vocab().ancestors;
        let mut out = Vec::with_capacity(depth.nrows());
        for ((i, d_row), a_row) in depth.outer_iter().enumerate().zip(ancestors.outer_iter()) {
            let mut line = Vec::new();
            for (j, (&d, &a)) in d_row.iter().zip(a_row.iter()).enumerate() {
                if !is_real(mask, &[i, j]) {
                    continue;
                }
                let ancestor = table.to_symbol(a)?;
                let joined = if ancestor.is_empty() {
                    String::new()
                } else if depth_on_all {
                    format!("{d}_{ancestor}")
                } else {
                    label::join(d, ancestor)
                };
                empties.push(&mut line, joined);
            }
            out.push(line);
        }
        Ok(out)
    }

    /// Render predictions as `word\tPOS\tlabel` lines, one blank line
    /// between sentences.
    ///
    /// `mask` is the text mask; the token mask is derived from it.
    /// When `depth` is given, `labels` holds ancestor ids and the two
    /// are joined (no depth on sentinels). With a mask, every real
    /// token gets a line, printing `UNKNOWN` for empty symbols.
    pub fn render_predictions(
        &self,
        text: &ArrayD<i64>,
        pos: &ArrayD<i64>,
        labels: &ArrayD<i64>,
        depth: Option<&ArrayD<i64>>,
        mask: Option<&ArrayD<u8>>,
    ) -> Result<String> {
        let token_mask = mask.map(word_mask);
        // without a mask, padding is indistinguishable from an empty symbol
        let empties = if mask.is_some() { Empties::Mark } else { Empties::Drop };

        let words = self.decode(text, DataKind::Text, mask, empties)?;
        let pos = self.decode(pos, DataKind::Pos, token_mask.as_ref(), empties)?;
        let labels = match depth {
            Some(d) => self.decode_joint(d, labels, token_mask.as_ref(), false, empties)?,
            None => self.decode(labels, DataKind::ParseLabel, token_mask.as_ref(), empties)?,
        };

        let mut out = String::new();
        for ((w, p), l) in words.iter().zip(&pos).zip(&labels) {
            for ((w, p), l) in w.iter().zip(p).zip(l) {
                out.push_str(&format!("{w}\t{p}\t{l}\n"));
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// Join decoded sentences: tokens by spaces, sentences by newlines.
pub fn join_sentences(sentences: &[Vec<String>]) -> String {
    sentences
        .iter()
        .map(|s| s.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn lookup(table: &SymbolTable) -> impl Fn(i64) -> Result<String> + '_ {
    move |i| table.to_symbol(i).map(str::to_string)
}

fn as_rank2(data: &ArrayD<i64>) -> Result<ArrayView2<'_, i64>> {
    data.view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| TensorizeError::ShapeMismatch {
            expected: vec![0, 0],
            found: data.shape().to_vec(),
        })
}

fn as_rank3(data: &ArrayD<i64>) -> Result<ArrayView3<'_, i64>> {
    data.view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| TensorizeError::ShapeMismatch {
            expected: vec![0, 0, 0],
            found: data.shape().to_vec(),
        })
}

fn check_shape(found: &[usize], expected: &[usize]) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(TensorizeError::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        })
    }
}

fn is_real(mask: Option<&ArrayD<u8>>, index: &[usize]) -> bool {
    mask.map_or(true, |m| m[index] != 0)
}

/// sentence × token tensors: one symbol per position.
fn decode_rows<F>(data: &ArrayD<i64>, mask: Option<&ArrayD<u8>>, empties: Empties, f: F) -> Result<Vec<Vec<String>>>
where
    F: Fn(i64) -> Result<String>,
{
    let data = as_rank2(data)?;
    if let Some(m) = mask {
        check_shape(m.shape(), data.shape())?;
    }

    let mut out = Vec::with_capacity(data.nrows());
    for (i, row) in data.outer_iter().enumerate() {
        let mut line = Vec::new();
        for (j, &v) in row.iter().enumerate() {
            if !is_real(mask, &[i, j]) {
                continue;
            }
            empties.push(&mut line, f(v)?);
        }
        out.push(line);
    }
    Ok(out)
}

/// sentence × token × char tensors: chars are joined into words.
fn decode_words<F>(data: &ArrayD<i64>, mask: Option<&ArrayD<u8>>, empties: Empties, f: F) -> Result<Vec<Vec<String>>>
where
    F: Fn(i64) -> Result<String>,
{
    let data = as_rank3(data)?;
    if let Some(m) = mask {
        check_shape(m.shape(), data.shape())?;
    }

    let mut out = Vec::with_capacity(data.len_of(ndarray::Axis(0)));
    for (i, sentence) in data.outer_iter().enumerate() {
        let mut line = Vec::new();
        for (j, token) in sentence.outer_iter().enumerate() {
            let mut word = String::new();
            let mut real = false;
            for (k, &c) in token.iter().enumerate() {
                if is_real(mask, &[i, j, k]) {
                    real = true;
                    word.push_str(&f(c)?);
                }
            }
            if real {
                empties.push(&mut line, word);
            }
        }
        out.push(line);
    }
    Ok(out)
}
