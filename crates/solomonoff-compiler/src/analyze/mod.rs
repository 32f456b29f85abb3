//! Analyses over ranged graphs.
//!
//! - `powerset`: subset construction on the acceptor view
//! - `product`: pairwise traversal, subset checks, intersection
//! - `functional`: strong functionality check
//! - `output_subset`: output language containment
//!
//! The checks explore reachable state pairs breadth-first and report a
//! counterexample input word on failure.

mod functional;
mod output_subset;
mod powerset;
mod product;
mod search;

#[cfg(test)]
mod functional_tests;
#[cfg(test)]
mod product_tests;

pub use functional::{FunctionalityCounterexample, is_strongly_functional};
pub use output_subset::{OutputCounterexample, is_output_subset};
pub use powerset::powerset;
pub use product::{
    Pair, SubsetCounterexample, check_subset, intersection, is_subset,
    is_subset_nondeterministic, product,
};
