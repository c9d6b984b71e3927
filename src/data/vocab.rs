// ============================================================
// Layer 4 — Symbol Tables
// ============================================================
// Five independent vocabularies are built from the training split:
//
//   chars      — every character of every word
//   words      — every surface word
//   pos        — every POS tag
//   labels     — every raw parse label
//   ancestors  — the ancestor half of every parse label
//
// Each table is the sorted set of distinct symbols with "" at
// index 0. Index 0 doubles as the padding value, so a padded
// position always decodes to the empty string.
//
// Lookups differ by table:
//   chars / words  → unseen symbols map to 0 (open vocabulary)
//   labels         → unseen symbols are an error (closed set)

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::domain::corpus::Corpus;
use crate::domain::label;
use crate::error::{Result, TensorizeError};

/// Which vocabulary a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Char,
    Word,
    Pos,
    ParseLabel,
    Ancestor,
}

impl TableKind {
    /// Open tables fall back to index 0 for unseen symbols.
    pub fn is_open(self) -> bool {
        matches!(self, TableKind::Char | TableKind::Word)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Char => "char",
            TableKind::Word => "word",
            TableKind::Pos => "POS",
            TableKind::ParseLabel => "parse label",
            TableKind::Ancestor => "parse ancestor",
        };
        f.write_str(name)
    }
}

// ─── SymbolTable ──────────────────────────────────────────────────────────────
/// A bijection between a closed, sorted symbol list and `0..len`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "StoredTable")]
pub struct SymbolTable {
    kind: TableKind,
    symbols: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

/// On-disk shape of a table; the lookup map is rebuilt on load.
#[derive(Deserialize)]
struct StoredTable {
    kind: TableKind,
    symbols: Vec<String>,
}

impl From<StoredTable> for SymbolTable {
    fn from(stored: StoredTable) -> Self {
        Self::from_symbols(stored.kind, stored.symbols)
    }
}

impl SymbolTable {
    /// Sort the distinct symbols and put the "" sentinel in front.
    pub fn build<I, S>(kind: TableKind, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = symbols
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut list = Vec::with_capacity(distinct.len() + 1);
        list.push(String::new());
        list.extend(distinct);
        Self::from_symbols(kind, list)
    }

    fn from_symbols(kind: TableKind, symbols: Vec<String>) -> Self {
        let index = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self { kind, symbols, index }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Number of entries, including the sentinel.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Raw lookup with no fallback.
    pub fn get(&self, symbol: &str) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    /// Symbol → index, following the table's OOV policy.
    ///
    /// # Errors
    /// `UnknownLabel` when a closed table misses.
    pub fn to_int(&self, symbol: &str) -> Result<usize> {
        match self.get(symbol) {
            Some(i) => Ok(i),
            None if self.kind.is_open() => Ok(0),
            None => Err(TensorizeError::UnknownLabel {
                table: self.kind,
                label: symbol.to_string(),
            }),
        }
    }

    /// Index → symbol.
    ///
    /// # Errors
    /// `SymbolIndex` when the index is negative or past the end.
    pub fn to_symbol(&self, index: i64) -> Result<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.symbols.get(i))
            .map(String::as_str)
            .ok_or(TensorizeError::SymbolIndex {
                table: self.kind,
                index,
            })
    }
}

impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.symbols == other.symbols
    }
}

impl Eq for SymbolTable {}

// ─── Vocabularies ─────────────────────────────────────────────────────────────
/// All five tables, built together from one training corpus.
///
/// Built once and shared read-only (usually behind an `Arc`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabularies {
    pub chars: SymbolTable,
    pub words: SymbolTable,
    pub pos: SymbolTable,
    pub labels: SymbolTable,
    pub ancestors: SymbolTable,
}

impl Vocabularies {
    /// Build every table from `corpus`.
    ///
    /// `extra_texts` are further tokenized sentences (e.g. from a
    /// similarity corpus) whose words and characters join the word and
    /// char tables. POS and label tables come from `corpus` alone.
    pub fn build(corpus: &Corpus, extra_texts: &[Vec<String>]) -> Self {
        let words: Vec<&str> = corpus
            .iter()
            .flat_map(|s| s.words())
            .chain(extra_texts.iter().flatten())
            .map(String::as_str)
            .collect();

        let chars = SymbolTable::build(
            TableKind::Char,
            words.iter().flat_map(|w| w.chars()).map(String::from),
        );
        let word_table = SymbolTable::build(TableKind::Word, &words);
        let pos = SymbolTable::build(TableKind::Pos, corpus.iter().flat_map(|s| s.pos()));
        let labels = SymbolTable::build(
            TableKind::ParseLabel,
            corpus.iter().flat_map(|s| s.labels()),
        );
        let ancestors = SymbolTable::build(
            TableKind::Ancestor,
            corpus
                .iter()
                .flat_map(|s| s.labels())
                .map(|l| label::ancestor_of(l)),
        );

        let vocab = Self {
            chars,
            words: word_table,
            pos,
            labels,
            ancestors,
        };

        tracing::info!(
            "Built vocabularies: {} chars, {} words, {} POS, {} parse labels, {} ancestors",
            vocab.chars.len(),
            vocab.words.len(),
            vocab.pos.len(),
            vocab.labels.len(),
            vocab.ancestors.len()
        );
        vocab
    }

    pub fn table(&self, kind: TableKind) -> &SymbolTable {
        match kind {
            TableKind::Char => &self.chars,
            TableKind::Word => &self.words,
            TableKind::Pos => &self.pos,
            TableKind::ParseLabel => &self.labels,
            TableKind::Ancestor => &self.ancestors,
        }
    }
}
