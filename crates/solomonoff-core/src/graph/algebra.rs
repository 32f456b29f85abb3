//! Regular operations on construction graphs.
//!
//! Every splicing operator takes its operands by value: the right-hand graph's
//! states are moved into the left-hand arena, so a spliced operand cannot be
//! observed or mutated afterwards.

use crate::alphabet::Symbol;
use crate::edge::{Edge, Partial};
use crate::error::{AlgebraError, Result};

use super::build::{Graph, StateId};

/// Default epsilon merge for [`Graph::union`]: the heavier epsilon wins.
///
/// Equal weights are only reconcilable when the outputs agree.
pub fn epsilon_union(lhs: Partial, rhs: Partial) -> Result<Partial> {
    if lhs.weight > rhs.weight {
        return Ok(lhs);
    }
    if lhs.weight < rhs.weight {
        return Ok(rhs);
    }
    if lhs.output == rhs.output {
        return Ok(lhs);
    }
    Err(AlgebraError::EpsilonConflict {
        weight: lhs.weight,
        lhs: lhs.output,
        rhs: rhs.output,
    })
}

/// Epsilon of a closure. Repeating a non-empty output zero or more times would
/// yield infinitely many outputs for the empty word.
pub fn epsilon_kleene(epsilon: Partial) -> Result<Partial> {
    if !epsilon.output.is_empty() {
        return Err(AlgebraError::KleeneNonNeutralEpsilon {
            output: epsilon.output,
        });
    }
    Ok(Partial::neutral())
}

impl<V> Graph<V> {
    // ------------------------------------------------------------------------
    // Atomic constructors
    // ------------------------------------------------------------------------

    /// One state reached by a single range, accepting with neutral output.
    pub fn atomic_range(meta: V, from_exclusive: Symbol, to_inclusive: Symbol) -> Result<Self> {
        Self::atomic_ranges(meta, &[(from_exclusive, to_inclusive)])
    }

    /// One state reached by any of `ranges` (a character class).
    pub fn atomic_ranges(meta: V, ranges: &[(Symbol, Symbol)]) -> Result<Self> {
        let mut graph = Self::new();
        let state = graph.add_state(meta);
        for &(from_exclusive, to_inclusive) in ranges {
            if from_exclusive >= to_inclusive {
                return Err(AlgebraError::EmptyRange {
                    from_exclusive,
                    to_inclusive,
                });
            }
            graph.add_initial(Edge::neutral(from_exclusive, to_inclusive), state);
        }
        graph.set_final(state, Partial::neutral());
        Ok(graph)
    }

    /// Graph reading exactly `symbol`.
    pub fn atomic_symbol(meta: V, symbol: Symbol) -> Result<Self> {
        let Some(from_exclusive) = symbol.checked_sub(1) else {
            return Err(AlgebraError::EmptyRange {
                from_exclusive: symbol,
                to_inclusive: symbol,
            });
        };
        Self::atomic_range(meta, from_exclusive, symbol)
    }

    /// Graph accepting only the empty word, emitting `epsilon`.
    pub fn atomic_epsilon(epsilon: Partial) -> Self {
        let mut graph = Self::new();
        graph.set_epsilon(Some(epsilon));
        graph
    }

    /// Graph of the empty language.
    pub fn empty() -> Self {
        Self::new()
    }

    // ------------------------------------------------------------------------
    // Splicing operators
    // ------------------------------------------------------------------------

    /// Language union. `merge_epsilons` reconciles the two epsilons when both
    /// operands accept the empty word (see [`epsilon_union`]).
    pub fn union<F>(mut self, rhs: Graph<V>, merge_epsilons: F) -> Result<Self>
    where
        F: FnOnce(Partial, Partial) -> Result<Partial>,
    {
        let spliced = self.absorb(rhs);
        self.initial_mut().extend(spliced.initial);
        self.finals_mut().extend(spliced.finals);
        let epsilon = match (self.take_epsilon(), spliced.epsilon) {
            (Some(lhs), Some(rhs)) => Some(merge_epsilons(lhs, rhs)?),
            (lhs, rhs) => lhs.or(rhs),
        };
        self.set_epsilon(epsilon);
        Ok(self)
    }

    /// Language concatenation.
    ///
    /// Every final state of `self` is wired to every initial target of `rhs`.
    /// Concatenating with the empty language yields the empty language.
    pub fn concat(mut self, rhs: Graph<V>) -> Self {
        if self.is_empty_language() {
            return self;
        }
        if rhs.is_empty_language() {
            return rhs;
        }

        let spliced = self.absorb(rhs);
        self.cross_link(&spliced.initial);

        if let Some(lhs_eps) = self.epsilon().cloned() {
            for (edge, target) in &spliced.initial {
                self.add_initial(edge.left_action(&lhs_eps), *target);
            }
        }

        let lhs_finals = std::mem::replace(self.finals_mut(), spliced.finals);
        if let Some(rhs_eps) = &spliced.epsilon {
            for (state, fin) in lhs_finals {
                self.set_final(state, fin.multiply(rhs_eps));
            }
        }

        let epsilon = match (self.take_epsilon(), spliced.epsilon) {
            (Some(lhs), Some(rhs)) => Some(lhs.multiply(&rhs)),
            _ => None,
        };
        self.set_epsilon(epsilon);
        self
    }

    /// Kleene star: zero or more repetitions.
    pub fn kleene(mut self) -> Result<Self> {
        let initial = self.initial().to_vec();
        self.cross_link(&initial);
        self.kleene_optional()
    }

    /// Zero or one repetition.
    pub fn kleene_optional(mut self) -> Result<Self> {
        let epsilon = match self.take_epsilon() {
            None => Partial::neutral(),
            Some(eps) => epsilon_kleene(eps)?,
        };
        self.set_epsilon(Some(epsilon));
        Ok(self)
    }

    /// Kleene plus: one or more repetitions.
    pub fn kleene_plus(mut self) -> Result<Self> {
        let initial = self.initial().to_vec();
        self.cross_link(&initial);
        if let Some(eps) = self.take_epsilon() {
            self.set_epsilon(Some(epsilon_kleene(eps)?));
        }
        Ok(self)
    }

    /// Prepend `lhs` to every initial edge and to the epsilon.
    pub fn left_action(mut self, lhs: &Partial) -> Self {
        for (edge, _) in self.initial_mut() {
            *edge = edge.left_action(lhs);
        }
        if let Some(eps) = self.epsilon_mut() {
            *eps = lhs.multiply(eps);
        }
        self
    }

    /// Append `rhs` to every final edge and to the epsilon.
    pub fn right_action(mut self, rhs: &Partial) -> Self {
        for fin in self.finals_mut().values_mut() {
            *fin = fin.multiply(rhs);
        }
        if let Some(eps) = self.epsilon_mut() {
            *eps = eps.multiply(rhs);
        }
        self
    }

    /// Add `fin · init` from every final state to every target in `initial`.
    fn cross_link(&mut self, initial: &[(Edge, StateId)]) {
        let finals: Vec<(StateId, Partial)> = self
            .finals()
            .iter()
            .map(|(&state, fin)| (state, fin.clone()))
            .collect();
        for (state, fin) in &finals {
            for (edge, target) in initial {
                self.connect(*state, edge.left_action(fin), *target);
            }
        }
    }
}
