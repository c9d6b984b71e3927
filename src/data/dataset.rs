// ============================================================
// Layer 4 — Parse Dataset
// ============================================================
// Owns the vocabularies and every loaded split, and turns a split
// into padded integer tensors.
//
// Each split moves through three states:
//
//   raw         — Corpus as read from the label file
//       │  tensorize(name, factor_labels)
//       ▼
//   tensorized  — SplitTensors cached under the split name
//       │  minibatches(name, size, shuffle)
//       ▼
//   iterable    — ParseBatch rows drawn from the cache
//
// Re-tensorizing a split replaces its cache as one unit (a new Arc).
//
// Tensors produced for a split:
//   text       i64  [sentences, tokens, chars] (or rank 2, see TextUnits)
//   text_mask  u8   same shape as text
//   pos        i64  [sentences, tokens]
//   labels     i64  [sentences, tokens]  ancestor ids when factored,
//                                         raw parse label ids otherwise
//   depth      i64  [sentences, tokens]  only when factored
//
// Everything is padded with "pre" alignment and fill 0, so each
// sentence's final token sits in the last column. That column of
// the depth tensor is overwritten with minus the sum of the other
// depths, which makes every sentence's depths sum to zero.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use ndarray::{ArrayD, Axis};
use rand::Rng;

use crate::data::config::{DatasetConfig, TextUnits};
use crate::data::minibatch::Minibatches;
use crate::data::padding::{pad_with_mask_to_rank, Alignment, Nested, PadLayout, Padded};
use crate::data::vocab::Vocabularies;
use crate::domain::corpus::Corpus;
use crate::domain::label;
use crate::domain::traits::CorpusSource;
use crate::error::{Result, TensorizeError};

/// Name of the split the vocabularies are built from.
pub const TRAIN: &str = "train";

// ─── DataKind ─────────────────────────────────────────────────────────────────
/// Every kind of data that can be encoded to or decoded from a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Text,
    Pos,
    ParseLabel,
    Depth,
    Ancestor,
    /// Depth + ancestor decoded together back into parse labels.
    /// Decode only.
    Joint,
}

impl FromStr for DataKind {
    type Err = TensorizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "parsing_text" => Ok(DataKind::Text),
            "pos" | "pos_label" => Ok(DataKind::Pos),
            "label" | "parse_label" => Ok(DataKind::ParseLabel),
            "depth" | "parse_depth" => Ok(DataKind::Depth),
            "ancestor" | "parse_ancestor" => Ok(DataKind::Ancestor),
            "joint" | "parse_joint" => Ok(DataKind::Joint),
            _ => Err(TensorizeError::UnknownDataKind(s.to_string())),
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataKind::Text => "parsing_text",
            DataKind::Pos => "pos_label",
            DataKind::ParseLabel => "parse_label",
            DataKind::Depth => "parse_depth",
            DataKind::Ancestor => "parse_ancestor",
            DataKind::Joint => "parse_joint",
        };
        f.write_str(name)
    }
}

// ─── SplitTensors ─────────────────────────────────────────────────────────────
/// The cached numeric form of one split.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitTensors {
    pub text: ArrayD<i64>,
    pub text_mask: ArrayD<u8>,
    pub pos: ArrayD<i64>,
    pub labels: ArrayD<i64>,
    pub depth: Option<ArrayD<i64>>,
}

impl SplitTensors {
    /// Number of sentences
    pub fn len(&self) -> usize {
        self.text.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when labels hold ancestor ids and `depth` is present.
    pub fn is_factored(&self) -> bool {
        self.depth.is_some()
    }
}

/// Token-level mask from a text mask: a token is real if any of its
/// characters is. Rank-2 masks are already token level.
pub fn word_mask(text_mask: &ArrayD<u8>) -> ArrayD<u8> {
    if text_mask.ndim() == 3 {
        text_mask.map_axis(Axis(2), |chars| u8::from(chars.iter().any(|&m| m != 0)))
    } else {
        text_mask.clone()
    }
}

struct Split {
    corpus: Corpus,
    tensors: Option<Arc<SplitTensors>>,
}

// ─── Dataset ──────────────────────────────────────────────────────────────────
pub struct Dataset {
    config: DatasetConfig,
    vocab: Arc<Vocabularies>,
    splits: HashMap<String, Split>,
}

impl Dataset {
    /// Load the training split from `train` and build all vocabularies from it.
    pub fn new(train: &impl CorpusSource, config: DatasetConfig) -> Result<Self> {
        let corpus = train.load_corpus()?;
        Self::from_corpus(corpus, config)
    }

    /// Same as `new`, for a corpus already in memory.
    pub fn from_corpus(corpus: Corpus, config: DatasetConfig) -> Result<Self> {
        // The similarity corpus is not wired up yet, so it adds no text
        let sts_texts: Vec<Vec<String>> = Vec::new();
        let vocab = Vocabularies::build(&corpus, &sts_texts);

        let mut dataset = Self::with_vocabularies(Arc::new(vocab), config)?;
        dataset.insert_split(TRAIN, corpus);
        Ok(dataset)
    }

    /// A dataset with no splits that encodes with existing vocabularies,
    /// e.g. ones reloaded from disk.
    pub fn with_vocabularies(vocab: Arc<Vocabularies>, config: DatasetConfig) -> Result<Self> {
        Ok(Self {
            config: config.validate()?,
            vocab,
            splits: HashMap::new(),
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn vocab(&self) -> &Arc<Vocabularies> {
        &self.vocab
    }

    // ── Splits ────────────────────────────────────────────────────────────────

    /// Load another named split; it is encoded with the existing vocabularies.
    pub fn add_split(&mut self, name: impl Into<String>, source: &impl CorpusSource) -> Result<()> {
        let corpus = source.load_corpus()?;
        self.insert_split(name, corpus);
        Ok(())
    }

    /// Store a raw split, dropping any tensors cached under the same name.
    pub fn insert_split(&mut self, name: impl Into<String>, corpus: Corpus) {
        let name = name.into();
        tracing::debug!("Split '{}' holds {} sentences", name, corpus.len());
        self.splits.insert(
            name,
            Split {
                corpus,
                tensors: None,
            },
        );
    }

    fn split(&self, name: &str) -> Result<&Split> {
        self.splits
            .get(name)
            .ok_or_else(|| TensorizeError::UnknownSplit(name.to_string()))
    }

    pub fn corpus(&self, name: &str) -> Result<&Corpus> {
        Ok(&self.split(name)?.corpus)
    }

    /// Number of sentences in a split
    pub fn len(&self, name: &str) -> Result<usize> {
        Ok(self.split(name)?.corpus.len())
    }

    /// Number of minibatches one pass over `name` yields.
    pub fn minibatch_count(&self, name: &str, size: usize) -> Result<usize> {
        if size == 0 {
            return Err(TensorizeError::InvalidBatchSize);
        }
        Ok(self.len(name)?.div_ceil(size))
    }

    // ── Symbol views ──────────────────────────────────────────────────────────

    /// The string sequences a kind is encoded from.
    ///
    /// Text gives words, Depth gives depth strings (sentinels kept as-is),
    /// Ancestor gives ancestor halves.
    pub fn symbols(&self, name: &str, kind: DataKind) -> Result<Vec<Vec<String>>> {
        let corpus = self.corpus(name)?;
        let column = |f: &dyn Fn(&str) -> String| -> Vec<Vec<String>> {
            corpus
                .iter()
                .map(|s| s.labels().iter().map(|l| f(l.as_str())).collect())
                .collect()
        };

        match kind {
            DataKind::Text => Ok(corpus.texts()),
            DataKind::Pos => Ok(corpus.iter().map(|s| s.pos().to_vec()).collect()),
            DataKind::ParseLabel => Ok(column(&|l: &str| l.to_string())),
            DataKind::Ancestor => Ok(column(&|l: &str| label::ancestor_of(l).to_string())),
            DataKind::Depth => Ok(column(&|l: &str| {
                if label::is_sentinel(l) {
                    l.to_string()
                } else {
                    l.split('_').next().unwrap_or(l).to_string()
                }
            })),
            DataKind::Joint => Err(TensorizeError::UnknownDataKind(kind.to_string())),
        }
    }

    /// Each sentence as a single space-joined string.
    pub fn sentences_as_text(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .corpus(name)?
            .iter()
            .map(|s| s.words().join(" "))
            .collect())
    }

    // ── Encoding ──────────────────────────────────────────────────────────────

    /// Encode one kind of data for a split into a padded tensor and mask.
    pub fn encode(&self, name: &str, kind: DataKind) -> Result<Padded<i64>> {
        let corpus = self.corpus(name)?;
        let layout = PadLayout::uniform(Alignment::Pre);

        let nested = match kind {
            DataKind::Text => self.encode_text(corpus)?,
            DataKind::Pos => self.encode_labels(corpus, |_, p, _| {
                Ok(self.vocab.pos.to_int(p)? as i64)
            })?,
            DataKind::ParseLabel => self.encode_labels(corpus, |_, _, l| {
                Ok(self.vocab.labels.to_int(l)? as i64)
            })?,
            DataKind::Ancestor => self.encode_labels(corpus, |_, _, l| {
                Ok(self.vocab.ancestors.to_int(label::ancestor_of(l))? as i64)
            })?,
            DataKind::Depth => self.encode_labels(corpus, |_, _, l| label::depth_of(l))?,
            DataKind::Joint => return Err(TensorizeError::UnknownDataKind(kind.to_string())),
        };

        let mut padded = pad_with_mask_to_rank(&nested, self.rank_of(kind)?, &layout, 0)?;
        if kind == DataKind::Depth {
            impute_final_depth(&mut padded.values)?;
        }
        Ok(padded)
    }

    /// Axes of the encoded tensor, fixed by kind and tokenization so
    /// empty splits and zero truncation keep their rank.
    fn rank_of(&self, kind: DataKind) -> Result<usize> {
        match kind {
            DataKind::Text => match self.config.tokenization.units()? {
                TextUnits::WordChars => Ok(3),
                TextUnits::Words | TextUnits::Chars => Ok(2),
            },
            _ => Ok(2),
        }
    }

    fn truncate_tokens<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.config.max_tokens {
            Some(n) if n < items.len() => &items[..n],
            _ => items,
        }
    }

    fn char_ids(&self, chars: impl Iterator<Item = char>) -> Vec<i64> {
        chars
            .map(|c| self.vocab.chars.get(c.encode_utf8(&mut [0u8; 4])).unwrap_or(0) as i64)
            .collect()
    }

    fn encode_text(&self, corpus: &Corpus) -> Result<Nested<i64>> {
        let max_chars = self.config.max_chars.unwrap_or(usize::MAX);

        let nested = match self.config.tokenization.units()? {
            TextUnits::WordChars => Nested::from_grid(
                corpus
                    .iter()
                    .map(|s| {
                        self.truncate_tokens(s.words())
                            .iter()
                            .map(|w| self.char_ids(w.chars().take(max_chars)))
                            .collect()
                    })
                    .collect(),
            ),
            TextUnits::Words => Nested::from_rows(
                corpus
                    .iter()
                    .map(|s| {
                        self.truncate_tokens(s.words())
                            .iter()
                            .map(|w| self.vocab.words.get(w).unwrap_or(0) as i64)
                            .collect()
                    })
                    .collect(),
            ),
            TextUnits::Chars => Nested::from_rows(
                corpus
                    .iter()
                    .map(|s| {
                        let text = s.words().join(" ");
                        let limit = self.config.max_tokens.unwrap_or(usize::MAX);
                        self.char_ids(text.chars().take(limit))
                    })
                    .collect(),
            ),
        };
        Ok(nested)
    }

    /// Encode one value per token from its `(word, pos, label)` triple.
    fn encode_labels<F>(&self, corpus: &Corpus, f: F) -> Result<Nested<i64>>
    where
        F: Fn(&str, &str, &str) -> Result<i64>,
    {
        let rows = corpus
            .iter()
            .map(|s| {
                let n = self.truncate_tokens(s.words()).len();
                s.tokens()
                    .take(n)
                    .map(|(w, p, l)| f(w, p, l))
                    .collect::<Result<Vec<i64>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Nested::from_rows(rows))
    }

    // ── Tensorization ─────────────────────────────────────────────────────────

    /// Encode every tensor of a split and cache them under its name.
    ///
    /// With `factor_labels` the labels tensor holds ancestor ids and a
    /// depth tensor is added; otherwise labels hold raw parse label ids.
    pub fn tensorize(&mut self, name: &str, factor_labels: bool) -> Result<Arc<SplitTensors>> {
        let text = self.encode(name, DataKind::Text)?;
        let pos = self.encode(name, DataKind::Pos)?.values;
        let (labels, depth) = if factor_labels {
            let ancestors = self.encode(name, DataKind::Ancestor)?.values;
            let depth = self.encode(name, DataKind::Depth)?.values;
            (ancestors, Some(depth))
        } else {
            (self.encode(name, DataKind::ParseLabel)?.values, None)
        };

        let tensors = Arc::new(SplitTensors {
            text: text.values,
            text_mask: text.mask,
            pos,
            labels,
            depth,
        });

        tracing::info!(
            "Tensorized split '{}': text {:?}, pos {:?}, labels {:?}, factored={}",
            name,
            tensors.text.shape(),
            tensors.pos.shape(),
            tensors.labels.shape(),
            factor_labels
        );

        let split = self
            .splits
            .get_mut(name)
            .ok_or_else(|| TensorizeError::UnknownSplit(name.to_string()))?;
        split.tensors = Some(Arc::clone(&tensors));
        Ok(tensors)
    }

    /// The cached tensors of a split.
    pub fn tensors(&self, name: &str) -> Result<Arc<SplitTensors>> {
        self.split(name)?
            .tensors
            .clone()
            .ok_or_else(|| TensorizeError::NotTensorized(name.to_string()))
    }

    // ── Minibatches ───────────────────────────────────────────────────────────

    /// One pass over a tensorized split in chunks of `size`.
    ///
    /// With `shuffle`, the order is a fresh random permutation per call.
    pub fn minibatches(&self, name: &str, size: usize, shuffle: bool) -> Result<Minibatches> {
        let mut rng = rand::thread_rng();
        self.minibatches_with_rng(name, size, shuffle, &mut rng)
    }

    /// Like `minibatches`, drawing the permutation from `rng`.
    pub fn minibatches_with_rng<R: Rng + ?Sized>(
        &self,
        name: &str,
        size: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Minibatches> {
        let tensors = self.tensors(name)?;
        let batches = if shuffle {
            Minibatches::shuffled(tensors, size, rng)?
        } else {
            Minibatches::in_order(tensors, size)?
        };

        tracing::debug!(
            "Iterating split '{}': {} minibatches of up to {} (shuffle={})",
            name,
            batches.batch_count(),
            size,
            shuffle
        );
        Ok(batches)
    }
}

/// Replace the last column with minus the sum of the others.
///
/// # Errors
/// `BadDepth` when the sum or its negation overflows `i64`.
fn impute_final_depth(depth: &mut ArrayD<i64>) -> Result<()> {
    let Some(last_axis) = depth.ndim().checked_sub(1) else {
        return Ok(());
    };
    let width = depth.len_of(Axis(last_axis));
    if width == 0 {
        return Ok(());
    }
    for mut row in depth.lanes_mut(Axis(last_axis)) {
        let head = row
            .iter()
            .take(width - 1)
            .try_fold(0i64, |acc, &d| acc.checked_add(d))
            .and_then(i64::checked_neg)
            .ok_or_else(|| {
                let depths: Vec<String> = row.iter().map(i64::to_string).collect();
                TensorizeError::BadDepth(format!("depths {} overflow when summed", depths.join(" ")))
            })?;
        row[width - 1] = head;
    }
    Ok(())
}


// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::fixtures::sample_corpus;
    use super::*;
    use crate::data::config::Tokenization;
    use ndarray::{array, IxDyn};

    fn dataset() -> Dataset {
        Dataset::from_corpus(sample_corpus(), DatasetConfig::default()).unwrap()
    }

    #[test]
    fn test_pos_tensor_and_mask_are_pre_aligned() {
        let ds = dataset();
        let pos = ds.encode(TRAIN, DataKind::Pos).unwrap();
        assert_eq!(pos.values.shape(), &[2, 5]);
        assert_eq!(pos.mask, array![[0u8, 0, 1, 1, 1], [1, 1, 1, 1, 1]].into_dyn());

        let dt = ds.vocab().pos.to_int("DT").unwrap() as i64;
        assert_eq!(pos.values[IxDyn(&[0, 2])], dt);
        assert_eq!(pos.values[IxDyn(&[0, 0])], 0);
    }

    #[test]
    fn test_text_tensor_is_char_level() {
        let ds = dataset();
        let text = ds.encode(TRAIN, DataKind::Text).unwrap();
        // 5 tokens, longest word "down" has 4 chars
        assert_eq!(text.values.shape(), &[2, 5, 4]);
        assert_eq!(text.mask.shape(), &[2, 5, 4]);

        // "dog" is the last token of sentence 0, chars right-aligned
        let chars = &ds.vocab().chars;
        let d = chars.to_int("d").unwrap() as i64;
        assert_eq!(text.values[IxDyn(&[0, 4, 1])], d);
        assert_eq!(text.mask[IxDyn(&[0, 4, 0])], 0);
        assert_eq!(text.mask[IxDyn(&[0, 4, 1])], 1);
    }

    #[test]
    fn test_mask_fidelity() {
        let ds = dataset();
        let labels = ds.encode(TRAIN, DataKind::ParseLabel).unwrap();
        let corpus = ds.corpus(TRAIN).unwrap();
        let width = labels.values.shape()[1];

        for (i, sentence) in corpus.iter().enumerate() {
            let offset = width - sentence.len();
            for j in 0..width {
                let m = labels.mask[IxDyn(&[i, j])];
                let v = labels.values[IxDyn(&[i, j])];
                if j < offset {
                    assert_eq!((m, v), (0, 0));
                } else {
                    let expected = ds.vocab().labels.to_int(&sentence.labels()[j - offset]).unwrap();
                    assert_eq!((m, v), (1, expected as i64));
                }
            }
        }
    }

    #[test]
    fn test_depths_sum_to_zero() {
        let mut ds = dataset();
        let tensors = ds.tensorize(TRAIN, true).unwrap();
        let depth = tensors.depth.as_ref().unwrap();

        assert_eq!(depth, &array![[0, 0, 2, 0, -2], [1, -1, 1, -1, 0]].into_dyn());
        for row in depth.outer_iter() {
            assert_eq!(row.sum(), 0);
        }
    }

    #[test]
    fn test_final_depth_overrides_file_value() {
        let mut corpus = sample_corpus();
        corpus.sentences.truncate(1);
        let ds = Dataset::from_corpus(corpus, DatasetConfig::default()).unwrap();
        let depth = ds.encode(TRAIN, DataKind::Depth).unwrap().values;
        // "NONE" reads as depth 0 but the final slot is derived
        assert_eq!(depth, array![[2, 0, -2]].into_dyn());
    }

    #[test]
    fn test_tensorize_unfactored() {
        let mut ds = dataset();
        let tensors = ds.tensorize(TRAIN, false).unwrap();
        assert!(!tensors.is_factored());
        let expected = ds.encode(TRAIN, DataKind::ParseLabel).unwrap().values;
        assert_eq!(tensors.labels, expected);
    }

    #[test]
    fn test_retensorize_replaces_cache() {
        let mut ds = dataset();
        let first = ds.tensorize(TRAIN, true).unwrap();
        let second = ds.tensorize(TRAIN, false).unwrap();
        assert!(first.is_factored());
        assert!(!ds.tensors(TRAIN).unwrap().is_factored());
        assert!(Arc::ptr_eq(&second, &ds.tensors(TRAIN).unwrap()));
    }

    #[test]
    fn test_not_tensorized_and_unknown_split() {
        let ds = dataset();
        assert!(matches!(ds.tensors(TRAIN), Err(TensorizeError::NotTensorized(_))));
        assert!(matches!(ds.len("dev"), Err(TensorizeError::UnknownSplit(_))));
    }

    #[test]
    fn test_word_only_and_char_only_text() {
        let cfg = DatasetConfig {
            tokenization: Tokenization { word: true, char: false },
            ..DatasetConfig::default()
        };
        let ds = Dataset::from_corpus(sample_corpus(), cfg).unwrap();
        let text = ds.encode(TRAIN, DataKind::Text).unwrap();
        assert_eq!(text.values.shape(), &[2, 5]);
        let dog = ds.vocab().words.to_int("dog").unwrap() as i64;
        assert_eq!(text.values[IxDyn(&[0, 4])], dog);

        let cfg = DatasetConfig {
            tokenization: Tokenization { word: false, char: true },
            ..DatasetConfig::default()
        };
        let ds = Dataset::from_corpus(sample_corpus(), cfg).unwrap();
        let text = ds.encode(TRAIN, DataKind::Text).unwrap();
        // "A cat sat down ." is 16 chars
        assert_eq!(text.values.shape(), &[2, 16]);
    }

    #[test]
    fn test_truncation() {
        let cfg = DatasetConfig {
            max_tokens: Some(2),
            max_chars: Some(1),
            ..DatasetConfig::default()
        };
        let ds = Dataset::from_corpus(sample_corpus(), cfg).unwrap();
        assert_eq!(ds.encode(TRAIN, DataKind::Text).unwrap().values.shape(), &[2, 2, 1]);
        assert_eq!(ds.encode(TRAIN, DataKind::Pos).unwrap().values.shape(), &[2, 2]);
    }

    #[test]
    fn test_empty_corpus_keeps_rank() {
        let mut ds = Dataset::from_corpus(Corpus::new(vec![]), DatasetConfig::default()).unwrap();
        let t = ds.tensorize(TRAIN, true).unwrap();
        assert_eq!(t.text.shape(), &[0, 0, 0]);
        assert_eq!(t.text_mask.shape(), &[0, 0, 0]);
        assert_eq!(t.pos.shape(), &[0, 0]);
        assert_eq!(t.labels.shape(), &[0, 0]);
        assert_eq!(t.depth.as_ref().unwrap().shape(), &[0, 0]);
        assert!(t.is_empty());

        let cfg = DatasetConfig {
            tokenization: Tokenization { word: true, char: false },
            ..DatasetConfig::default()
        };
        let ds = Dataset::from_corpus(Corpus::new(vec![]), cfg).unwrap();
        assert_eq!(ds.encode(TRAIN, DataKind::Text).unwrap().values.shape(), &[0, 0]);
    }

    #[test]
    fn test_zero_max_tokens_keeps_rank() {
        let cfg = DatasetConfig {
            max_tokens: Some(0),
            ..DatasetConfig::default()
        };
        let mut ds = Dataset::from_corpus(sample_corpus(), cfg).unwrap();
        let t = ds.tensorize(TRAIN, true).unwrap();
        assert_eq!(t.text.shape(), &[2, 0, 0]);
        assert_eq!(t.pos.shape(), &[2, 0]);
        assert_eq!(t.depth.as_ref().unwrap().shape(), &[2, 0]);
    }

    #[test]
    fn test_depth_overflow_is_error() {
        let mut ds = dataset();
        let big = format!("{}_NP", i64::MAX);
        let dev = Corpus::new(vec![crate::domain::corpus::Sentence::from_columns(
            0,
            vec!["The".into(), "old".into(), "dog".into()],
            vec!["DT".into(), "JJ".into(), "NN".into()],
            vec![big.clone(), big, "NONE".into()],
        )
        .unwrap()]);
        ds.insert_split("dev", dev);
        assert!(matches!(
            ds.encode("dev", DataKind::Depth),
            Err(TensorizeError::BadDepth(_))
        ));
    }

    #[test]
    fn test_every_training_label_recomposes() {
        let ds = dataset();
        let mut checked = 0;
        for l in ds.vocab().labels.symbols() {
            if l.is_empty() || label::is_sentinel(l) {
                continue;
            }
            let depth = label::depth_of(l).unwrap();
            assert_eq!(label::join(depth, label::ancestor_of(l)), *l);
            checked += 1;
        }
        assert_eq!(checked, 6);
    }

    #[test]
    fn test_unseen_word_in_other_split_is_zero() {
        let mut ds = dataset();
        let dev = Corpus::new(vec![crate::domain::corpus::Sentence::from_columns(
            0,
            vec!["zebra".into()],
            vec!["NN".into()],
            vec!["NONE".into()],
        )
        .unwrap()]);
        ds.insert_split("dev", dev);
        let text = ds.encode("dev", DataKind::Text).unwrap();
        // 'z', 'b', 'r' never appear in training text
        let e = ds.vocab().chars.to_int("e").unwrap() as i64;
        let a = ds.vocab().chars.to_int("a").unwrap() as i64;
        assert_eq!(text.values, array![[[0, e, 0, 0, a]]].into_dyn());
    }

    #[test]
    fn test_unseen_label_is_error() {
        let mut ds = dataset();
        let dev = Corpus::new(vec![crate::domain::corpus::Sentence::from_columns(
            0,
            vec!["dog".into()],
            vec!["XX".into()],
            vec!["NONE".into()],
        )
        .unwrap()]);
        ds.insert_split("dev", dev);
        assert!(matches!(
            ds.encode("dev", DataKind::Pos),
            Err(TensorizeError::UnknownLabel { .. })
        ));
    }

    #[test]
    fn test_symbol_views() {
        let ds = dataset();
        let depth = ds.symbols(TRAIN, DataKind::Depth).unwrap();
        assert_eq!(depth[0], ["2", "0", "NONE"]);
        let anc = ds.symbols(TRAIN, DataKind::Ancestor).unwrap();
        assert_eq!(anc[1], ["NP", "S", "VP", "VP", "NONE"]);
        assert_eq!(ds.sentences_as_text(TRAIN).unwrap()[0], "The old dog");
        assert!(ds.symbols(TRAIN, DataKind::Joint).is_err());
    }

    #[test]
    fn test_data_kind_names() {
        assert_eq!("parse_depth".parse::<DataKind>().unwrap(), DataKind::Depth);
        assert_eq!("POS_LABEL".parse::<DataKind>().unwrap(), DataKind::Pos);
        assert!(matches!(
            "sts_label".parse::<DataKind>(),
            Err(TensorizeError::UnknownDataKind(_))
        ));
    }

    #[test]
    fn test_minibatch_count() {
        let ds = dataset();
        assert_eq!(ds.minibatch_count(TRAIN, 1).unwrap(), 2);
        assert_eq!(ds.minibatch_count(TRAIN, 5).unwrap(), 1);
        assert!(ds.minibatch_count(TRAIN, 0).is_err());
    }

    #[test]
    fn test_word_mask_from_char_mask() {
        let m = array![[[0u8, 0], [0, 1]], [[1, 1], [1, 0]]].into_dyn();
        assert_eq!(word_mask(&m), array![[0u8, 1], [1, 1]].into_dyn());
    }
}
