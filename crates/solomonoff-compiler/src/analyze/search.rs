//! Breadth-first discovery with parent links.

use std::hash::Hash;

use indexmap::IndexMap;
use solomonoff_core::Symbol;

/// Discovered nodes in insertion order, which doubles as the BFS queue.
///
/// Each node remembers the node it was discovered from and the symbol read
/// on the way, so the input word leading to it can be rebuilt.
pub(crate) struct Frontier<K> {
    nodes: IndexMap<K, Option<(usize, Symbol)>>,
}

impl<K: Hash + Eq + Copy> Frontier<K> {
    pub fn new(root: K) -> Self {
        let mut nodes = IndexMap::new();
        nodes.insert(root, None);
        Self { nodes }
    }

    pub fn get(&self, idx: usize) -> Option<K> {
        self.nodes.get_index(idx).map(|(key, _)| *key)
    }

    /// Record `key` as reached from node `parent` by `symbol`, unless known.
    pub fn discover(&mut self, key: K, parent: usize, symbol: Symbol) {
        self.nodes.entry(key).or_insert(Some((parent, symbol)));
    }

    /// Input word leading from the root to node `idx`.
    pub fn word(&self, idx: usize) -> Vec<Symbol> {
        let mut word = Vec::new();
        let mut current = idx;
        while let Some((_, Some((parent, symbol)))) = self.nodes.get_index(current) {
            word.push(*symbol);
            current = *parent;
        }
        word.reverse();
        word
    }
}
