//! Query-time evaluation engine.

mod error;
mod eval;
mod trace;

#[cfg(test)]
mod eval_tests;

pub use error::RuntimeError;
pub use eval::Evaluator;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
