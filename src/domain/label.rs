// ============================================================
// Layer 3 — Parse Label Factorization
// ============================================================
// A parse label packs two things into one string:
//
//   "2_NP"   →  depth 2, ancestor "NP"
//   "-1_S"   →  depth -1, ancestor "S"
//   "NONE"   →  sentinel, depth 0, ancestor "NONE"
//
// Depth is read from the FIRST underscore-delimited field and the
// ancestor is the LAST field. Sentinels pass through untouched in
// both directions.
//
// The two halves are predicted by separate output heads, so
// `join(depth_of(l), ancestor_of(l)) == l` must hold for every
// non-sentinel label a model can emit. Labels that break this
// (e.g. "1_NP_VP", "01_NP") are reported by `is_canonical`.

use crate::error::{Result, TensorizeError};

/// Labels for boundary or absent tokens.
pub const SENTINELS: [&str; 3] = ["NONE", "-BOS-", "-EOS-"];

/// Returns true for `NONE`, `-BOS-` and `-EOS-`.
pub fn is_sentinel(label: &str) -> bool {
    SENTINELS.contains(&label)
}

/// The ancestor half of a label: the text after the final `_`.
pub fn ancestor_of(label: &str) -> &str {
    if is_sentinel(label) {
        return label;
    }
    match label.rfind('_') {
        Some(i) => &label[i + 1..],
        None => label,
    }
}

/// The depth half of a label: the integer before the first `_`.
///
/// # Errors
/// Returns `BadDepth` if the leading field is not an integer.
pub fn depth_of(label: &str) -> Result<i64> {
    if is_sentinel(label) {
        return Ok(0);
    }
    let field = label.split('_').next().unwrap_or(label);
    field
        .parse::<i64>()
        .map_err(|_| TensorizeError::BadDepth(label.to_string()))
}

/// Rebuild a label from its halves. Sentinels never get a depth prefix.
pub fn join(depth: i64, ancestor: &str) -> String {
    if is_sentinel(ancestor) {
        ancestor.to_string()
    } else {
        format!("{depth}_{ancestor}")
    }
}

/// True when the label survives a factor/join round trip unchanged.
pub fn is_canonical(label: &str) -> bool {
    if is_sentinel(label) {
        return true;
    }
    match depth_of(label) {
        Ok(depth) => join(depth, ancestor_of(label)) == label,
        Err(_) => false,
    }
}
