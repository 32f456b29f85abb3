//! Dump helpers for graph inspection and testing.

use std::fmt::Write;

use super::build::Graph;

/// Printer for [`Graph`].
///
/// One line per fact:
/// - `ε <partial>`: the epsilon edge
/// - `→ N<t> <edge>`: an initial edge
/// - `N<s> → N<t> <edge>`: a state-to-state edge
/// - `N<s> ⊣ <partial>`: a final edge
pub struct GraphPrinter<'a, V> {
    graph: &'a Graph<V>,
    show_meta: bool,
}

impl<'a, V: std::fmt::Debug> GraphPrinter<'a, V> {
    pub fn new(graph: &'a Graph<V>) -> Self {
        Self {
            graph,
            show_meta: false,
        }
    }

    /// Print each state's metadata on its own line.
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
        if let Some(eps) = self.graph.epsilon() {
            writeln!(w, "ε {}", eps)?;
        }
        for (edge, target) in self.graph.initial() {
            writeln!(w, "→ N{} {}", target, edge)?;
        }
        for (id, state) in self.graph.iter() {
            if self.show_meta {
                writeln!(w, "N{}: {:?}", id, state.meta)?;
            }
            for (edge, target) in &state.outgoing {
                writeln!(w, "N{} → N{} {}", id, target, edge)?;
            }
            if let Some(fin) = self.graph.final_edge(id) {
                writeln!(w, "N{} ⊣ {}", id, fin)?;
            }
        }
        Ok(())
    }
}

impl<V: std::fmt::Debug> Graph<V> {
    pub fn printer(&self) -> GraphPrinter<'_, V> {
        GraphPrinter::new(self)
    }

    pub fn dump(&self) -> String {
        self.printer().dump()
    }
}
