// ============================================================
// Layer 4 — Burn Dataset and Batcher
// ============================================================
// Bridges the cached ndarray tensors to Burn so a split can feed
// a Burn DataLoader directly:
//
//   TensorizedSplit   → implements burn's Dataset trait,
//                       one ParseItem per sentence
//   ParseBatcher      → implements burn's Batcher trait,
//                       stacks ParseItems into ParseTensorBatch
//
// Our own Minibatches iterator can also be converted with
// ParseBatcher::from_minibatch.
//
// All tensors are Int. Text is always rank 3 on the Burn side:
// word-only or char-only text gets a trailing axis of size 1.

use std::sync::Arc;

use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset as BurnDataset},
    prelude::*,
};
use ndarray::{ArrayD, Axis, IxDyn};

use crate::data::dataset::{Dataset, SplitTensors};
use crate::data::minibatch::ParseBatch;
use crate::error::Result;

// ─── ParseItem ────────────────────────────────────────────────────────────────
/// One sentence's rows from every cached tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseItem {
    /// [tokens, chars]
    pub text: ArrayD<i64>,
    pub text_mask: ArrayD<u8>,
    /// [tokens]
    pub pos: ArrayD<i64>,
    pub labels: ArrayD<i64>,
    pub depth: Option<ArrayD<i64>>,
}

/// A tensorized split seen through Burn's Dataset trait.
#[derive(Debug, Clone)]
pub struct TensorizedSplit {
    tensors: Arc<SplitTensors>,
}

impl TensorizedSplit {
    pub fn new(tensors: Arc<SplitTensors>) -> Self {
        Self { tensors }
    }
}

impl Dataset {
    /// The cached tensors of split `name`, ready for a Burn DataLoader.
    pub fn tensorized_split(&self, name: &str) -> Result<TensorizedSplit> {
        self.tensors(name).map(TensorizedSplit::new)
    }
}

impl BurnDataset<ParseItem> for TensorizedSplit {
    fn get(&self, index: usize) -> Option<ParseItem> {
        if index >= self.tensors.len() {
            return None;
        }
        let t = &self.tensors;
        let row = |a: &ArrayD<i64>| a.index_axis(Axis(0), index).to_owned();
        Some(ParseItem {
            text: row(&t.text),
            text_mask: t.text_mask.index_axis(Axis(0), index).to_owned(),
            pos: row(&t.pos),
            labels: row(&t.labels),
            depth: t.depth.as_ref().map(row),
        })
    }

    fn len(&self) -> usize {
        self.tensors.len()
    }
}

// ─── ParseTensorBatch ─────────────────────────────────────────────────────────
/// A minibatch as Burn tensors. Every tensor has batch size first.
#[derive(Debug, Clone)]
pub struct ParseTensorBatch<B: Backend> {
    /// [batch, tokens, chars]
    pub text: Tensor<B, 3, Int>,
    /// [batch, tokens, chars], 1 = real character
    pub text_mask: Tensor<B, 3, Int>,
    /// [batch, tokens]
    pub pos: Tensor<B, 2, Int>,
    /// [batch, tokens] ancestor ids or raw label ids
    pub labels: Tensor<B, 2, Int>,
    /// [batch, tokens]
    pub depth: Option<Tensor<B, 2, Int>>,
}

// ─── ParseBatcher ─────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct ParseBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ParseBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Convert one of our own minibatches.
    pub fn from_minibatch(&self, batch: &ParseBatch) -> ParseTensorBatch<B> {
        ParseTensorBatch {
            text: self.int_tensor(&as_rank3(batch.text.clone())),
            text_mask: self.int_tensor(&as_rank3(batch.text_mask.mapv(i64::from))),
            pos: self.int_tensor(&batch.pos),
            labels: self.int_tensor(&batch.labels),
            depth: batch.depth.as_ref().map(|d| self.int_tensor(d)),
        }
    }

    fn int_tensor<const D: usize>(&self, array: &ArrayD<i64>) -> Tensor<B, D, Int> {
        let data = TensorData::new(array.iter().copied().collect::<Vec<i64>>(), array.shape().to_vec());
        Tensor::<B, D, Int>::from_data(data, &self.device)
    }
}

/// Give word- or char-only text a unit char axis.
fn as_rank3<T>(array: ArrayD<T>) -> ArrayD<T> {
    if array.ndim() == 2 {
        array.insert_axis(Axis(2))
    } else {
        array
    }
}

/// Stack per-sentence rows back into one array with a leading batch axis.
///
/// Rows of one split share a padded shape, so stacking only fails
/// for an empty batch, which yields an empty array of the given rank.
fn stack_rows<T: Clone + Default>(rows: Vec<ArrayD<T>>, empty_rank: usize) -> ArrayD<T> {
    let views: Vec<_> = rows.iter().map(|r| r.view()).collect();
    ndarray::stack(Axis(0), &views).unwrap_or_else(|_| ArrayD::from_elem(IxDyn(&vec![0; empty_rank]), T::default()))
}

impl<B: Backend> Batcher<ParseItem, ParseTensorBatch<B>> for ParseBatcher<B> {
    /// Stack ParseItems fetched by a Burn DataLoader.
    fn batch(&self, items: Vec<ParseItem>) -> ParseTensorBatch<B> {
        let indices = (0..items.len()).collect();
        let has_depth = items.iter().all(|i| i.depth.is_some());

        let mut text = Vec::with_capacity(items.len());
        let mut text_mask = Vec::with_capacity(items.len());
        let mut pos = Vec::with_capacity(items.len());
        let mut labels = Vec::with_capacity(items.len());
        let mut depth = Vec::with_capacity(items.len());
        for item in items {
            text.push(item.text);
            text_mask.push(item.text_mask);
            pos.push(item.pos);
            labels.push(item.labels);
            if let Some(d) = item.depth {
                depth.push(d);
            }
        }

        let text_rank = text.first().map_or(2, |t| t.ndim()) + 1;
        let batch = ParseBatch {
            indices,
            text: stack_rows(text, text_rank),
            text_mask: stack_rows(text_mask, text_rank),
            pos: stack_rows(pos, 2),
            labels: stack_rows(labels, 2),
            depth: has_depth.then(|| stack_rows(depth, 2)),
        };
        self.from_minibatch(&batch)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    use crate::data::config::{DatasetConfig, Tokenization};
    use crate::data::dataset::fixtures::sample_corpus;
    use crate::data::dataset::TRAIN;

    type TestBackend = NdArray;

    fn tensorized(config: DatasetConfig) -> Dataset {
        let mut ds = Dataset::from_corpus(sample_corpus(), config).unwrap();
        ds.tensorize(TRAIN, true).unwrap();
        ds
    }

    #[test]
    fn test_split_items_are_rows() {
        let ds = tensorized(DatasetConfig::default());
        let split = ds.tensorized_split(TRAIN).unwrap();
        assert_eq!(split.len(), 2);
        assert!(split.get(2).is_none());

        let tensors = ds.tensors(TRAIN).unwrap();
        let item = split.get(1).unwrap();
        assert_eq!(item.pos.shape(), &[5]);
        assert_eq!(item.text.shape(), &tensors.text.shape()[1..]);
        assert_eq!(item.depth.unwrap().iter().copied().collect::<Vec<_>>(), vec![1, -1, 1, -1, 0]);
    }

    #[test]
    fn test_unknown_split() {
        let ds = tensorized(DatasetConfig::default());
        assert!(ds.tensorized_split("dev").is_err());
    }

    #[test]
    fn test_batcher_stacks_items() {
        let ds = tensorized(DatasetConfig::default());
        let split = ds.tensorized_split(TRAIN).unwrap();
        let items: Vec<ParseItem> = (0..split.len()).filter_map(|i| split.get(i)).collect();

        let batcher = ParseBatcher::<TestBackend>::new(Default::default());
        let batch = batcher.batch(items);
        let tensors = ds.tensors(TRAIN).unwrap();

        assert_eq!(batch.text.dims().to_vec(), tensors.text.shape().to_vec());
        assert_eq!(batch.pos.dims(), [2, 5]);
        let depth = batch.depth.unwrap().into_data().to_vec::<i64>().unwrap();
        assert_eq!(depth, vec![0, 0, 2, 0, -2, 1, -1, 1, -1, 0]);
    }

    #[test]
    fn test_word_only_text_gets_unit_char_axis() {
        let config = DatasetConfig {
            tokenization: Tokenization { word: true, char: false },
            ..DatasetConfig::default()
        };
        let ds = tensorized(config);
        let batcher = ParseBatcher::<TestBackend>::new(Default::default());
        let batch = ds.minibatches(TRAIN, 2, false).unwrap().next().unwrap();

        let tensors = batcher.from_minibatch(&batch);
        assert_eq!(tensors.text.dims(), [2, 5, 1]);
        assert_eq!(tensors.text_mask.dims(), [2, 5, 1]);
    }

    #[test]
    fn test_unfactored_batch_has_no_depth() {
        let mut ds = Dataset::from_corpus(sample_corpus(), DatasetConfig::default()).unwrap();
        ds.tensorize(TRAIN, false).unwrap();
        let batcher = ParseBatcher::<TestBackend>::new(Default::default());
        let batch = ds.minibatches(TRAIN, 8, false).unwrap().next().unwrap();
        assert!(batcher.from_minibatch(&batch).depth.is_none());
    }
}
