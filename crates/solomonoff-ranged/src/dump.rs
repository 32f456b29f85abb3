//! Dump helpers for ranged graph inspection and testing.

use std::fmt::Write;

use solomonoff_core::format_range;

use crate::graph::{RangedGraph, Trans};

/// Printer for [`RangedGraph`].
///
/// ```text
/// init N0
/// N0:
///   'a' → N1:"x" w2
///   'b'-'\u{10ffff}' → ∅
/// N1 ⊣ "":
///   '\u{1}'-'\u{10ffff}' → ∅
/// ```
pub struct RangedPrinter<'a, V> {
    graph: &'a RangedGraph<V>,
    show_meta: bool,
}

impl<'a, V: std::fmt::Debug> RangedPrinter<'a, V> {
    pub fn new(graph: &'a RangedGraph<V>) -> Self {
        Self {
            graph,
            show_meta: false,
        }
    }

    /// Append each state's metadata to its header.
    pub fn show_meta(mut self, show: bool) -> Self {
        self.show_meta = show;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        let minimal = self.graph.alphabet().minimal();
        writeln!(w, "init N{}", self.graph.initial())?;
        for (id, state) in self.graph.iter() {
            write!(w, "N{}", id)?;
            if let Some(fin) = &state.accepting {
                write!(w, " ⊣ {}", fin)?;
            }
            if self.show_meta {
                write!(w, " {:?}", state.meta)?;
            }
            writeln!(w, ":")?;

            let mut prev = minimal;
            for range in &state.ranges {
                write!(w, "  {} → ", format_range(prev, range.input))?;
                if range.edges.is_empty() {
                    writeln!(w, "∅")?;
                } else {
                    let targets: Vec<_> = range.edges.iter().map(format_trans).collect();
                    writeln!(w, "{}", targets.join(", "))?;
                }
                prev = range.input;
            }
        }
        Ok(())
    }
}

fn format_trans(trans: &Trans) -> String {
    let mut out = format!("N{}", trans.target);
    if !trans.edge.output.is_empty() {
        out.push_str(&format!(":{}", trans.edge.output));
    }
    if trans.edge.weight != 0 {
        out.push_str(&format!(" w{}", trans.edge.weight));
    }
    out
}

impl<V: std::fmt::Debug> RangedGraph<V> {
    pub fn printer(&self) -> RangedPrinter<'_, V> {
        RangedPrinter::new(self)
    }

    pub fn dump(&self) -> String {
        self.printer().dump()
    }
}
