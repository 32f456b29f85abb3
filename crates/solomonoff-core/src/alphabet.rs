//! Input symbols, weights and alphabet bounds.

/// Input symbol (a code point for the Unicode alphabet).
pub type Symbol = u32;

/// Edge weight. Higher weight wins when paths compete.
pub type Weight = i32;

/// Bounds of the input alphabet.
///
/// Ranges are half-open `(from_exclusive, to_inclusive]`, so `minimal` is never
/// a member of the language while `maximal` is. The `minimal` symbol doubles as
/// the reflect marker in outputs: it can never be matched, so it is free to mean
/// "copy the matched input symbol here".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Alphabet {
    minimal: Symbol,
    maximal: Symbol,
}

impl Alphabet {
    /// All Unicode scalar values and surrogates: `(0, 0x10FFFF]`.
    pub const UNICODE: Alphabet = Alphabet {
        minimal: 0,
        maximal: 0x10FFFF,
    };

    pub const fn new(minimal: Symbol, maximal: Symbol) -> Self {
        assert!(minimal < maximal, "alphabet must contain at least one symbol");
        Self { minimal, maximal }
    }

    pub fn minimal(&self) -> Symbol {
        self.minimal
    }

    pub fn maximal(&self) -> Symbol {
        self.maximal
    }

    /// The output symbol meaning "echo the input symbol".
    pub fn reflect(&self) -> Symbol {
        self.minimal
    }

    pub fn successor(&self, symbol: Symbol) -> Symbol {
        debug_assert!(symbol < self.maximal);
        symbol + 1
    }

    pub fn predecessor(&self, symbol: Symbol) -> Symbol {
        debug_assert!(symbol > self.minimal);
        symbol - 1
    }

    /// Whether `symbol` can be read as input.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.minimal < symbol && symbol <= self.maximal
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::UNICODE
    }
}

/// Format a symbol as a quoted, escaped character (or hex when not a char).
pub fn format_symbol(symbol: Symbol) -> String {
    match char::from_u32(symbol) {
        Some(c) => format!("'{}'", c.escape_debug()),
        None => format!("{symbol:#x}"),
    }
}

/// Format the half-open range `(from_exclusive, to_inclusive]` as closed bounds.
pub fn format_range(from_exclusive: Symbol, to_inclusive: Symbol) -> String {
    let first = from_exclusive.wrapping_add(1);
    if first == to_inclusive {
        format_symbol(to_inclusive)
    } else {
        format!("{}-{}", format_symbol(first), format_symbol(to_inclusive))
    }
}
