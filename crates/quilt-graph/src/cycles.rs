//! Feedback edges: the edges that close a generational loop.
//!
//! Real pedigrees contain loops (data-entry mistakes, or records that make someone their own
//! ancestor). A DFS over the descendant -> ascendant direction records every edge that reaches
//! a vertex still on the DFS stack. Reversing exactly those edges yields a DAG.

use crate::edge::EdgeIx;
use crate::network::Network;
use crate::vertex::VertexIx;
use rustc_hash::FxHashSet as HashSet;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSet {
    edges: BTreeSet<EdgeIx>,
}

impl FeedbackSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, e: EdgeIx) -> bool {
        self.edges.contains(&e)
    }

    pub fn insert(&mut self, e: EdgeIx) -> bool {
        self.edges.insert(e)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeIx> + '_ {
        self.edges.iter().copied()
    }
}

impl Extend<EdgeIx> for FeedbackSet {
    fn extend<I: IntoIterator<Item = EdgeIx>>(&mut self, iter: I) {
        self.edges.extend(iter);
    }
}

impl FromIterator<EdgeIx> for FeedbackSet {
    fn from_iter<I: IntoIterator<Item = EdgeIx>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

/// Finds the feedback edges reachable from `roots` (usually one weak component).
///
/// Roots are visited in the given order. The traversal keeps its own frame stack, so deep
/// pedigrees do not grow the native call stack.
pub fn find_cycles(network: &Network, roots: &[VertexIx]) -> FeedbackSet {
    let mut fas = FeedbackSet::new();
    let mut visited: HashSet<VertexIx> = HashSet::default();
    let mut on_stack: HashSet<VertexIx> = HashSet::default();
    // (vertex, position of the next out-edge to follow)
    let mut stack: Vec<(VertexIx, usize)> = Vec::new();

    for &root in roots {
        if !visited.insert(root) {
            continue;
        }
        on_stack.insert(root);
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let v = frame.0;
            let out = network.out_edges(v);
            let Some(&e) = out.get(frame.1) else {
                on_stack.remove(&v);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let w = network.edge(e).dest();
            if on_stack.contains(&w) {
                fas.insert(e);
            } else if visited.insert(w) {
                on_stack.insert(w);
                stack.push((w, 0));
            }
        }
    }

    fas
}
