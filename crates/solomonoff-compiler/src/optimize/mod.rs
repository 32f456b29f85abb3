//! Optimization passes.
//!
//! - `trim`: drop unreachable and unobservable states
//! - `minimize`: heuristic forward/backward state merging
//! - `reduce`: collapse parallel transitions of a ranged graph

mod minimize;
mod reduce;
mod trim;


pub use minimize::{
    MinimizeStats, PseudoMinimize, merge_finals, pseudo_minimize, pseudo_minimize_with,
    same_output,
};
pub use reduce::reduce_edges;
pub use trim::{TrimStats, trim};
