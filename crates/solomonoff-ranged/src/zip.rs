//! K-way merge of partitions into one common boundary sequence.

use solomonoff_core::Symbol;

use crate::graph::{Range, Trans};

/// A stretch `(from_exclusive, to_inclusive]` on which every zipped partition
/// is constant. `transitions[i]` belongs to the `i`-th input partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub from_exclusive: Symbol,
    pub to_inclusive: Symbol,
    pub transitions: Vec<&'a [Trans]>,
}

/// Zip sorted partitions that all end at the same maximal boundary.
///
/// The output boundaries are the union of all input boundaries, so every
/// segment falls inside exactly one range of each input.
pub fn zip_partitions<'a>(minimal: Symbol, partitions: &[&'a [Range]]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    if partitions.is_empty() {
        return segments;
    }
    debug_assert!(
        partitions
            .windows(2)
            .all(|w| w[0].last().map(|r| r.input) == w[1].last().map(|r| r.input)),
        "partitions must share their last boundary"
    );

    let mut cursors = vec![0usize; partitions.len()];
    let mut prev = minimal;
    while cursors[0] < partitions[0].len() {
        let boundary = partitions
            .iter()
            .zip(&cursors)
            .map(|(ranges, &c)| ranges[c].input)
            .min()
            .unwrap_or(prev);
        let transitions = partitions
            .iter()
            .zip(&cursors)
            .map(|(ranges, &c)| ranges[c].edges.as_slice())
            .collect();
        segments.push(Segment {
            from_exclusive: prev,
            to_inclusive: boundary,
            transitions,
        });
        for (ranges, c) in partitions.iter().zip(cursors.iter_mut()) {
            if ranges[*c].input == boundary {
                *c += 1;
            }
        }
        prev = boundary;
    }
    segments
}
