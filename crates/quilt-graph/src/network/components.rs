//! Weakly connected components.

use super::Network;
use crate::vertex::VertexIx;
use std::collections::VecDeque;

/// Weak-component partition, largest component first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    sets: Vec<Vec<VertexIx>>,
    of_vertex: Vec<usize>,
}

impl Components {
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, component: usize) -> Option<&[VertexIx]> {
        self.sets.get(component).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[VertexIx]> {
        self.sets.iter().map(Vec::as_slice)
    }

    pub fn component_of(&self, v: VertexIx) -> Option<usize> {
        self.of_vertex.get(v.index()).copied()
    }
}

pub(super) fn compute(network: &Network) -> Components {
    let n = network.vertex_count();
    let mut seen = vec![false; n];
    let mut sets: Vec<Vec<VertexIx>> = Vec::new();

    for start in network.vertex_ixs() {
        if seen[start.index()] {
            continue;
        }
        seen[start.index()] = true;
        let mut comp: Vec<VertexIx> = Vec::new();
        let mut q: VecDeque<VertexIx> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for w in network.ascendants(v).chain(network.descendants(v)) {
                if !seen[w.index()] {
                    seen[w.index()] = true;
                    q.push_back(w);
                }
            }
        }
        // Members keep insertion order so every later pass over a component is deterministic.
        comp.sort_unstable();
        sets.push(comp);
    }

    // Stable: components of equal size stay ordered by their earliest member.
    sets.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut of_vertex = vec![0usize; n];
    for (i, comp) in sets.iter().enumerate() {
        for v in comp {
            of_vertex[v.index()] = i;
        }
    }
    Components { sets, of_vertex }
}
