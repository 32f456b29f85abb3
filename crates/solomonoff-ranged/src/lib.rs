#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled (query-time) representation of weighted ranged transducers.
//!
//! A [`RangedGraph`] is frozen: states are renumbered densely and every state
//! owns a sorted partition of the whole alphabet into [`Range`]s, so the
//! transitions for a symbol are found by binary search. The implicit sink
//! (`None` wherever an `Option<StateIdx>` appears) has no transitions and never
//! accepts.

mod dump;
mod error;
mod graph;
mod zip;


pub use dump::RangedPrinter;
pub use error::{RangedError, Result};
pub use graph::{Range, RangedGraph, RangedState, StateIdx, Trans, range_index, sink_ranges};
pub use zip::{Segment, zip_partitions};
