//! Tracing infrastructure for debugging evaluation.
//!
//! # Design: Zero-Cost Abstraction
//!
//! When `NoopTracer` is used every trait method is an `#[inline(always)]`
//! empty function, so the compiler removes the calls and their arguments.
//! The evaluator keeps no tracing-related state of its own.
//!
//! `PrintTracer` collects human-readable lines, filtered by [`Verbosity`].

use std::fmt::Write as _;

use solomonoff_core::{Symbol, Weight, format_symbol};
use solomonoff_ranged::StateIdx;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Input steps, collisions and the final verdict.
    #[default]
    Default,
    /// Every followed transition as well.
    Verbose,
}

/// Tracer trait for evaluator instrumentation.
///
/// Each method is called at a specific point during evaluation:
/// - `trace_step` - before consuming an input symbol
/// - `trace_transition` - for every transition taken from a live state
/// - `trace_collision` - when two runs reach the same state in one step
/// - `trace_accept` - when the winning accepting state is chosen
/// - `trace_reject` - when no run accepts
pub trait Tracer {
    fn trace_step(&mut self, symbol: Symbol);

    fn trace_transition(&mut self, from: StateIdx, to: StateIdx, weight: Weight);

    fn trace_collision(&mut self, target: StateIdx, kept_weight: Weight, dropped_weight: Weight);

    fn trace_accept(&mut self, state: StateIdx, weight: Weight);

    fn trace_reject(&mut self);
}

/// No-op tracer that gets optimized away.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_step(&mut self, _symbol: Symbol) {}

    #[inline(always)]
    fn trace_transition(&mut self, _from: StateIdx, _to: StateIdx, _weight: Weight) {}

    #[inline(always)]
    fn trace_collision(
        &mut self,
        _target: StateIdx,
        _kept_weight: Weight,
        _dropped_weight: Weight,
    ) {
    }

    #[inline(always)]
    fn trace_accept(&mut self, _state: StateIdx, _weight: Weight) {}

    #[inline(always)]
    fn trace_reject(&mut self) {}
}

/// Tracer that collects an evaluation trace for debugging.
#[derive(Debug, Default)]
pub struct PrintTracer {
    /// Verbosity level for output filtering.
    verbosity: Verbosity,
    /// Collected trace lines.
    lines: Vec<String>,
    /// Number of symbols consumed so far.
    step: usize,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
            step: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All trace lines joined, one per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            writeln!(out, "{line}").expect("String write never fails");
        }
        out
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn add_subline(&mut self, content: String) {
        self.lines.push(format!("    {content}"));
    }
}

impl Tracer for PrintTracer {
    fn trace_step(&mut self, symbol: Symbol) {
        let line = format!("#{} {}", self.step, format_symbol(symbol));
        self.lines.push(line);
        self.step += 1;
    }

    fn trace_transition(&mut self, from: StateIdx, to: StateIdx, weight: Weight) {
        // Transition sub-lines hidden in default verbosity
        if self.verbosity == Verbosity::Default {
            return;
        }
        self.add_subline(format!("N{from} → N{to} w{weight}"));
    }

    fn trace_collision(&mut self, target: StateIdx, kept_weight: Weight, dropped_weight: Weight) {
        self.add_subline(format!(
            "N{target} collision: keep w{kept_weight}, drop w{dropped_weight}"
        ));
    }

    fn trace_accept(&mut self, state: StateIdx, weight: Weight) {
        self.lines.push(format!("accept N{state} w{weight}"));
    }

    fn trace_reject(&mut self) {
        self.lines.push("reject".to_string());
    }
}
