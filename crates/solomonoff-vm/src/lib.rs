#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Runtime for compiled weighted ranged transducers.
//!
//! This crate evaluates a [`solomonoff_ranged::RangedGraph`] against an input
//! word, producing the output of the best-weighted accepting run.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{Evaluator, NoopTracer, PrintTracer, RuntimeError, Tracer, Verbosity};
