//! Output strings and the two edge kinds.
//!
//! - [`Edge`]: a full edge reading one symbol from `(from_exclusive, to_inclusive]`
//!   and emitting `output` with `weight`.
//! - [`Partial`]: output and weight with no input. Used for epsilon edges and
//!   for the subsequential output of accepting states.
//!
//! Both are immutable values; every combinator returns a new edge.

use std::fmt;

use crate::alphabet::{Symbol, Weight, format_range};

/// Output string. A monoid under concatenation with the empty string as neutral.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Output(Vec<Symbol>);

impl Output {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Symbol> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.contains(&symbol)
    }

    pub fn concat(&self, rhs: &Output) -> Output {
        let mut symbols = Vec::with_capacity(self.0.len() + rhs.0.len());
        symbols.extend_from_slice(&self.0);
        symbols.extend_from_slice(&rhs.0);
        Output(symbols)
    }

    /// Decode as text. Symbols that are not chars become U+FFFD.
    pub fn to_text(&self) -> String {
        self.0
            .iter()
            .map(|&s| char::from_u32(s).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

impl From<&str> for Output {
    fn from(text: &str) -> Self {
        Self(text.chars().map(|c| c as Symbol).collect())
    }
}

impl From<Vec<Symbol>> for Output {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl FromIterator<Symbol> for Output {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for &s in &self.0 {
            match char::from_u32(s) {
                Some('"') => f.write_str("\\\"")?,
                Some(c) => write!(f, "{}", c.escape_debug())?,
                None => write!(f, "\\x{{{s:x}}}")?,
            }
        }
        f.write_str("\"")
    }
}

/// Edge without input: an epsilon transition or a final (subsequential) output.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Partial {
    pub output: Output,
    pub weight: Weight,
}

impl Partial {
    pub fn new(output: impl Into<Output>, weight: Weight) -> Self {
        Self {
            output: output.into(),
            weight,
        }
    }

    pub fn neutral() -> Self {
        Self::default()
    }

    /// Monoid product: concatenate outputs, add weights.
    pub fn multiply(&self, rhs: &Partial) -> Partial {
        Partial {
            output: self.output.concat(&rhs.output),
            weight: self.weight.saturating_add(rhs.weight),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.output.is_empty() && self.weight == 0
    }
}

impl fmt::Display for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.output)?;
        if self.weight != 0 {
            write!(f, " w{}", self.weight)?;
        }
        Ok(())
    }
}

/// Transition over the input range `(from_exclusive, to_inclusive]`.
///
/// Field order doubles as the sort order used when hashing and comparing
/// adjacency lists.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Edge {
    pub from_exclusive: Symbol,
    pub to_inclusive: Symbol,
    pub output: Output,
    pub weight: Weight,
}

impl Edge {
    pub fn new(
        from_exclusive: Symbol,
        to_inclusive: Symbol,
        output: impl Into<Output>,
        weight: Weight,
    ) -> Self {
        debug_assert!(from_exclusive < to_inclusive, "empty edge range");
        Self {
            from_exclusive,
            to_inclusive,
            output: output.into(),
            weight,
        }
    }

    /// Edge with empty output and zero weight.
    pub fn neutral(from_exclusive: Symbol, to_inclusive: Symbol) -> Self {
        Self::new(from_exclusive, to_inclusive, Output::empty(), 0)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.from_exclusive < symbol && symbol <= self.to_inclusive
    }

    /// Whether the range holds exactly one symbol.
    pub fn is_single_symbol(&self) -> bool {
        self.from_exclusive + 1 == self.to_inclusive
    }

    /// `lhs · self`: prepend the partial edge's output, add its weight.
    pub fn left_action(&self, lhs: &Partial) -> Edge {
        Edge {
            from_exclusive: self.from_exclusive,
            to_inclusive: self.to_inclusive,
            output: lhs.output.concat(&self.output),
            weight: lhs.weight.saturating_add(self.weight),
        }
    }

    /// `self · rhs`: append the partial edge's output, add its weight.
    pub fn right_action(&self, rhs: &Partial) -> Edge {
        Edge {
            from_exclusive: self.from_exclusive,
            to_inclusive: self.to_inclusive,
            output: self.output.concat(&rhs.output),
            weight: self.weight.saturating_add(rhs.weight),
        }
    }

    /// Same output and weight over a different range.
    pub fn with_range(&self, from_exclusive: Symbol, to_inclusive: Symbol) -> Edge {
        Edge::new(
            from_exclusive,
            to_inclusive,
            self.output.clone(),
            self.weight,
        )
    }

    pub fn partial(&self) -> Partial {
        Partial {
            output: self.output.clone(),
            weight: self.weight,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_range(self.from_exclusive, self.to_inclusive))?;
        if !self.output.is_empty() {
            write!(f, ":{}", self.output)?;
        }
        if self.weight != 0 {
            write!(f, " w{}", self.weight)?;
        }
        Ok(())
    }
}
