// ============================================================
// Layer 4 — Minibatch Iterator
// ============================================================
// Draws fixed-size row slices out of a tensorized split.
//
// Order:
//   shuffle = false → sentences in file order
//   shuffle = true  → one uniformly random permutation per pass
//                     (Fisher-Yates via rand::seq::SliceRandom),
//                     never reshuffled mid-pass
//
// Batches are contiguous chunks of that order. The last one may
// be short; the pass then ends (no wraparound).
//
//   10 sentences, size 4  →  [4, 4, 2]

use std::sync::Arc;

use ndarray::{ArrayD, Axis};
use rand::{seq::SliceRandom, Rng};

use crate::data::dataset::SplitTensors;
use crate::error::{Result, TensorizeError};

/// One minibatch: the selected rows of every cached tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseBatch {
    /// Positions of these rows in the split, in batch order
    pub indices: Vec<usize>,
    pub text: ArrayD<i64>,
    pub text_mask: ArrayD<u8>,
    pub pos: ArrayD<i64>,
    pub labels: ArrayD<i64>,
    pub depth: Option<ArrayD<i64>>,
}

impl ParseBatch {
    /// Number of sentences in this batch
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A random permutation of `0..n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

/// The permutation that undoes `perm`: `inv[perm[i]] == i`.
pub fn inverse_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inv[p] = i;
    }
    inv
}

// ─── Minibatches ──────────────────────────────────────────────────────────────
/// A finite, single-pass iterator of `ParseBatch`es.
#[derive(Debug, Clone)]
pub struct Minibatches {
    tensors: Arc<SplitTensors>,
    order: Vec<usize>,
    size: usize,
    cursor: usize,
}

impl Minibatches {
    /// Iterate in file order.
    pub fn in_order(tensors: Arc<SplitTensors>, size: usize) -> Result<Self> {
        let order = (0..tensors.len()).collect();
        Self::with_order(tensors, order, size)
    }

    /// Iterate over a fresh random permutation.
    pub fn shuffled<R: Rng + ?Sized>(tensors: Arc<SplitTensors>, size: usize, rng: &mut R) -> Result<Self> {
        let order = random_permutation(tensors.len(), rng);
        Self::with_order(tensors, order, size)
    }

    fn with_order(tensors: Arc<SplitTensors>, order: Vec<usize>, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(TensorizeError::InvalidBatchSize);
        }
        Ok(Self {
            tensors,
            order,
            size,
            cursor: 0,
        })
    }

    /// The full row order of this pass.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Total number of batches in the pass.
    pub fn batch_count(&self) -> usize {
        self.order.len().div_ceil(self.size)
    }
}

impl Iterator for Minibatches {
    type Item = ParseBatch;

    fn next(&mut self) -> Option<ParseBatch> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.size).min(self.order.len());
        let indices = self.order[self.cursor..end].to_vec();
        self.cursor = end;

        let t = &self.tensors;
        let rows = Axis(0);
        Some(ParseBatch {
            text: t.text.select(rows, &indices),
            text_mask: t.text_mask.select(rows, &indices),
            pos: t.pos.select(rows, &indices),
            labels: t.labels.select(rows, &indices),
            depth: t.depth.as_ref().map(|d| d.select(rows, &indices)),
            indices,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.order.len() - self.cursor).div_ceil(self.size);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Minibatches {}
