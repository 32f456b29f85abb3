//! Edge reduction on ranged graphs.

use solomonoff_ranged::{RangedGraph, StateIdx, Trans};

use crate::{CompileError, Result};

/// Within each range, keep only the heaviest transition per target.
///
/// Returns the number of transitions removed. Equal weight with different
/// outputs cannot be settled and fails; ranges reduced before the failure stay
/// reduced.
pub fn reduce_edges<V>(graph: &mut RangedGraph<V>) -> Result<usize> {
    let mut removed = 0;
    for (idx, state) in graph.states_mut().iter_mut().enumerate() {
        for range in &mut state.ranges {
            if range.edges.len() < 2 {
                continue;
            }
            let mut kept: Vec<Trans> = Vec::with_capacity(range.edges.len());
            for trans in &range.edges {
                let Some(existing) = kept.iter_mut().find(|k| k.target == trans.target) else {
                    kept.push(trans.clone());
                    continue;
                };
                removed += 1;
                if trans.edge.weight > existing.edge.weight {
                    *existing = trans.clone();
                } else if trans.edge.weight == existing.edge.weight
                    && trans.edge.output != existing.edge.output
                {
                    return Err(CompileError::EdgeReductionNondeterminism {
                        state: idx as StateIdx,
                        target: trans.target,
                        lhs: existing.edge.clone(),
                        rhs: trans.edge.clone(),
                    });
                }
            }
            range.edges = kept;
        }
    }
    tracing::debug!(removed, "reduce edges");
    Ok(removed)
}
