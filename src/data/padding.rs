// ============================================================
// Layer 4 — Nested-Sequence Padder
// ============================================================
// Turns ragged nested lists into a dense rectangular array plus
// a same-shape 0/1 mask.
//
//   [[a b c]          shape [2, 5], "pre" alignment, fill 0
//    [d e f g h]]  →  [[0 0 a b c]
//                      [d e f g h]]
//
// Steps:
//   1. infer_shape — walk every branch, keep the max length seen
//      at each depth. Shallower branches (e.g. empty lists) are fine.
//   2. pad         — allocate `shape` filled with `fill`, then drop
//      each leaf at its aligned index.
//
// Alignment is set per axis:
//   Pre  → content flush to the end   (left-padded)
//   Post → content flush to the start (right-padded)
// and an axis can be `reversed`, which writes elements back to
// front inside the same occupied span.
//
// Sentence → token → character nesting means the arrays used by the
// Dataset are rank 2 or 3; the routine itself handles any depth.

use std::str::FromStr;

use ndarray::{ArrayD, ArrayViewMutD, Axis, IxDyn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TensorizeError};

// ─── Alignment ────────────────────────────────────────────────────────────────
/// Which end of an axis real content is pushed against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left-pad: the last k slots hold the content.
    #[default]
    Pre,
    /// Right-pad: the first k slots hold the content.
    Post,
}

impl FromStr for Alignment {
    type Err = TensorizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pre" => Ok(Alignment::Pre),
            "post" => Ok(Alignment::Post),
            _ => Err(TensorizeError::UnknownAlignment(s.to_string())),
        }
    }
}

/// Layout of a single axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub alignment: Alignment,
    pub reversed: bool,
}

/// Per-axis layouts. Axes without an explicit entry use `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadLayout {
    pub default: AxisLayout,
    pub axes: Vec<Option<AxisLayout>>,
}

impl PadLayout {
    /// Same alignment on every axis, nothing reversed.
    pub fn uniform(alignment: Alignment) -> Self {
        Self {
            default: AxisLayout {
                alignment,
                reversed: false,
            },
            axes: Vec::new(),
        }
    }

    /// Override the layout of one axis.
    pub fn with_axis(mut self, axis: usize, layout: AxisLayout) -> Self {
        if self.axes.len() <= axis {
            self.axes.resize(axis + 1, None);
        }
        self.axes[axis] = Some(layout);
        self
    }

    /// Reverse element order along `axis`, keeping its alignment.
    pub fn reversed(self, axis: usize) -> Self {
        let mut layout = self.axis(axis);
        layout.reversed = true;
        self.with_axis(axis, layout)
    }

    pub fn axis(&self, axis: usize) -> AxisLayout {
        self.axes
            .get(axis)
            .copied()
            .flatten()
            .unwrap_or(self.default)
    }
}

// ─── Nested ───────────────────────────────────────────────────────────────────
/// A ragged tree of values: either a scalar or a list of subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Leaf(T),
    Seq(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Rank-1 list of scalars.
    pub fn from_row(row: Vec<T>) -> Self {
        Nested::Seq(row.into_iter().map(Nested::Leaf).collect())
    }

    /// Rank-2 ragged rows, e.g. sentence × token.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        Nested::Seq(rows.into_iter().map(Nested::from_row).collect())
    }

    /// Rank-3 ragged grid, e.g. sentence × token × character.
    pub fn from_grid(grid: Vec<Vec<Vec<T>>>) -> Self {
        Nested::Seq(grid.into_iter().map(Nested::from_rows).collect())
    }

    /// Same structure with every leaf passed through `f`.
    pub fn map<U>(&self, f: &impl Fn(&T) -> U) -> Nested<U> {
        match self {
            Nested::Leaf(v) => Nested::Leaf(f(v)),
            Nested::Seq(items) => Nested::Seq(items.iter().map(|x| x.map(f)).collect()),
        }
    }

    /// Max extent at every depth, across all branches.
    pub fn infer_shape(&self) -> Vec<usize> {
        let mut shape = Vec::new();
        self.collect_shape(0, &mut shape);
        shape
    }

    fn collect_shape(&self, depth: usize, shape: &mut Vec<usize>) {
        if let Nested::Seq(items) = self {
            if shape.len() <= depth {
                shape.push(0);
            }
            shape[depth] = shape[depth].max(items.len());
            for item in items {
                item.collect_shape(depth + 1, shape);
            }
        }
    }

    /// Number of axes the padded array will have.
    pub fn rank(&self) -> usize {
        self.infer_shape().len()
    }

    /// `infer_shape`, extended with zero-length axes up to `rank`.
    ///
    /// Empty input has no leaves to reveal its depth, so callers that
    /// know the rank up front pass it here.
    pub fn shape_with_rank(&self, rank: usize) -> Vec<usize> {
        let mut shape = self.infer_shape();
        if shape.len() < rank {
            shape.resize(rank, 0);
        }
        shape
    }
}

// ─── Padding ──────────────────────────────────────────────────────────────────
/// Pad `x` into an array of exactly `shape`.
///
/// A leaf that sits above the deepest level fills its whole sub-slice.
///
/// # Errors
/// `ShapeMismatch` if `x` is deeper than `shape` or longer than it on
/// any axis.
pub fn pad<T: Clone>(x: &Nested<T>, shape: &[usize], layout: &PadLayout, fill: T) -> Result<ArrayD<T>> {
    let mut out = ArrayD::from_elem(IxDyn(shape), fill);
    place(x, out.view_mut(), 0, shape, layout)?;
    Ok(out)
}

fn place<T: Clone>(
    x: &Nested<T>,
    mut view: ArrayViewMutD<'_, T>,
    axis: usize,
    shape: &[usize],
    layout: &PadLayout,
) -> Result<()> {
    match x {
        Nested::Leaf(v) => {
            view.fill(v.clone());
            Ok(())
        }
        Nested::Seq(items) => {
            let extent = match shape.get(axis) {
                Some(&n) if n >= items.len() => n,
                _ => {
                    return Err(TensorizeError::ShapeMismatch {
                        expected: shape.to_vec(),
                        found: x.infer_shape(),
                    })
                }
            };

            let AxisLayout { alignment, reversed } = layout.axis(axis);
            let (start, end) = match alignment {
                Alignment::Post => (0, items.len()),
                Alignment::Pre => (extent - items.len(), extent),
            };

            for (i, item) in items.iter().enumerate() {
                let ix = if reversed { end - 1 - i } else { start + i };
                let sub = view.view_mut().index_axis_move(Axis(0), ix);
                place(item, sub, axis + 1, shape, layout)?;
            }
            Ok(())
        }
    }
}

/// A padded array with its validity mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Padded<T> {
    pub values: ArrayD<T>,
    pub mask: ArrayD<u8>,
}

/// Infer the shape once, then pad both the values and a 1-filled mask.
pub fn pad_with_mask<T: Clone>(x: &Nested<T>, layout: &PadLayout, fill: T) -> Result<Padded<T>> {
    pad_with_mask_to_rank(x, 0, layout, fill)
}

/// Like `pad_with_mask`, but the result has at least `rank` axes.
pub fn pad_with_mask_to_rank<T: Clone>(
    x: &Nested<T>,
    rank: usize,
    layout: &PadLayout,
    fill: T,
) -> Result<Padded<T>> {
    let shape = x.shape_with_rank(rank);
    let values = pad(x, &shape, layout, fill)?;
    let mask = pad(&x.map(&|_| 1u8), &shape, layout, 0u8)?;
    Ok(Padded { values, mask })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, IxDyn};

    fn pre() -> PadLayout {
        PadLayout::uniform(Alignment::Pre)
    }

    #[test]
    fn test_infer_shape_uses_all_branches() {
        let x = Nested::from_grid(vec![
            vec![vec![1, 2], vec![3]],
            vec![vec![4], vec![5, 6, 7], vec![8]],
        ]);
        assert_eq!(x.infer_shape(), vec![2, 3, 3]);
        assert_eq!(x.rank(), 3);
    }

    #[test]
    fn test_infer_shape_with_empty_branch() {
        let x = Nested::from_grid(vec![vec![], vec![vec![1, 2]]]);
        assert_eq!(x.infer_shape(), vec![2, 1, 2]);

        let leaf: Nested<i64> = Nested::Leaf(3);
        assert!(leaf.infer_shape().is_empty());
    }

    #[test]
    fn test_pre_alignment() {
        let x = Nested::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6, 7, 8]]);
        let p = pad_with_mask(&x, &pre(), 0).unwrap();
        assert_eq!(p.values, array![[0, 0, 1, 2, 3], [4, 5, 6, 7, 8]].into_dyn());
        assert_eq!(p.mask, array![[0u8, 0, 1, 1, 1], [1, 1, 1, 1, 1]].into_dyn());
    }

    #[test]
    fn test_post_alignment() {
        let x = Nested::from_rows(vec![vec![1, 2], vec![3, 4, 5, 6]]);
        let out = pad(&x, &[2, 4], &PadLayout::uniform(Alignment::Post), -1).unwrap();
        assert_eq!(out, array![[1, 2, -1, -1], [3, 4, 5, 6]].into_dyn());
    }

    #[test]
    fn test_reversed_axis_keeps_span() {
        let x = Nested::from_rows(vec![vec![1, 2, 3]]);

        let out = pad(&x, &[1, 5], &pre().reversed(1), 0).unwrap();
        assert_eq!(out, array![[0, 0, 3, 2, 1]].into_dyn());

        let post = PadLayout::uniform(Alignment::Post).reversed(1);
        let out = pad(&x, &[1, 5], &post, 0).unwrap();
        assert_eq!(out, array![[3, 2, 1, 0, 0]].into_dyn());
    }

    #[test]
    fn test_mixed_axis_alignment() {
        let layout = pre().with_axis(
            2,
            AxisLayout {
                alignment: Alignment::Post,
                reversed: false,
            },
        );
        let x = Nested::from_grid(vec![vec![vec![1]], vec![vec![2, 3], vec![4]]]);
        let p = pad_with_mask(&x, &layout, 0).unwrap();
        assert_eq!(p.values.shape(), &[2, 2, 2]);
        assert_eq!(
            p.values,
            array![[[0, 0], [1, 0]], [[2, 3], [4, 0]]].into_dyn()
        );
        assert_eq!(
            p.mask,
            array![[[0u8, 0], [1, 0]], [[1, 1], [1, 0]]].into_dyn()
        );
    }

    #[test]
    fn test_empty_input_is_all_fill() {
        let x = Nested::from_grid(vec![vec![], vec![vec![7, 7]]]);
        let p = pad_with_mask(&x, &pre(), 9).unwrap();
        assert_eq!(p.values.shape(), &[2, 1, 2]);
        assert_eq!(p.values[IxDyn(&[0, 0, 0])], 9);
        assert_eq!(p.values[IxDyn(&[0, 0, 1])], 9);
        assert_eq!(p.mask[IxDyn(&[0, 0, 0])], 0);
        assert_eq!(p.mask[IxDyn(&[1, 0, 1])], 1);
    }

    #[test]
    fn test_shallow_leaf_fills_slice() {
        let x = Nested::Seq(vec![Nested::Leaf(5), Nested::from_row(vec![1, 2])]);
        let out = pad(&x, &[2, 2], &pre(), 0).unwrap();
        assert_eq!(out, array![[5, 5], [1, 2]].into_dyn());
    }

    #[test]
    fn test_output_shape_matches_inferred() {
        let x = Nested::from_rows(vec![vec![1], vec![], vec![1, 2, 3, 4]]);
        let shape = x.infer_shape();
        let out = pad(&x, &shape, &pre(), 0).unwrap();
        assert_eq!(out.shape(), shape.as_slice());
    }

    #[test]
    fn test_too_small_shape_is_error() {
        let x = Nested::from_rows(vec![vec![1, 2, 3]]);
        let err = pad(&x, &[1, 2], &pre(), 0).unwrap_err();
        assert!(matches!(err, TensorizeError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_known_rank_survives_empty_input() {
        let empty: Nested<i64> = Nested::from_grid(vec![]);
        assert_eq!(empty.infer_shape(), vec![0]);

        let padded = pad_with_mask_to_rank(&empty, 3, &pre(), 0).unwrap();
        assert_eq!(padded.values.shape(), &[0, 0, 0]);
        assert_eq!(padded.mask.shape(), &[0, 0, 0]);

        // one sentence, no tokens
        let no_tokens: Nested<i64> = Nested::from_grid(vec![vec![]]);
        let padded = pad_with_mask_to_rank(&no_tokens, 3, &pre(), 0).unwrap();
        assert_eq!(padded.values.shape(), &[1, 0, 0]);
    }

    #[test]
    fn test_rank_never_shrinks_inferred_shape() {
        let x = Nested::from_grid(vec![vec![vec![1, 2], vec![3]]]);
        assert_eq!(x.shape_with_rank(2), vec![1, 2, 2]);
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("PRE".parse::<Alignment>().unwrap(), Alignment::Pre);
        assert_eq!("post".parse::<Alignment>().unwrap(), Alignment::Post);
        assert!(matches!(
            "middle".parse::<Alignment>(),
            Err(TensorizeError::UnknownAlignment(_))
        ));
    }
}
