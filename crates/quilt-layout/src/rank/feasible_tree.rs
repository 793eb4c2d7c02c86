//! Tight spanning tree over one component, tightening the initial ranking as it grows.

use super::util::slack;
use crate::acyclic::Acyclic;
use crate::error::{Error, Result};
use quilt_graph::{EdgeIx, VertexIx};
use rustc_hash::FxHashSet as HashSet;

/// Grows a tree of zero-slack edges from the first vertex touching one. Whenever the tree stops
/// growing, the non-tree edge with the least slack is made tight by moving the whole tree.
/// Returns the number of such moves.
///
/// Only the frontier (edges with exactly one endpoint in the tree) is scanned between moves,
/// so a move costs the frontier size rather than the component's edge count.
pub fn feasible_tree(
    dag: &Acyclic<'_>,
    component: usize,
    members: &[VertexIx],
    rank_by_ix: &mut [i32],
) -> Result<usize> {
    if members.len() <= 1 {
        return Ok(0);
    }

    let start = members
        .iter()
        .copied()
        .find(|&v| {
            dag.incident_edges(v)
                .any(|e| slack(dag, e, rank_by_ix) == 0)
        })
        .unwrap_or(members[0]);

    let mut in_tree: HashSet<VertexIx> = HashSet::default();
    let mut tree: Vec<VertexIx> = Vec::with_capacity(members.len());
    let mut frontier: Vec<EdgeIx> = Vec::new();
    let mut seeds: Vec<VertexIx> = vec![start];

    let mut shifts = 0usize;
    loop {
        tight_tree(dag, rank_by_ix, seeds, &mut in_tree, &mut tree, &mut frontier);
        if tree.len() >= members.len() {
            break;
        }

        let Some((e, edge_slack)) = find_min_slack_edge(dag, rank_by_ix, &in_tree, &frontier)
        else {
            return Err(Error::SpanningTreeStalled {
                component,
                covered: tree.len(),
                expected: members.len(),
            });
        };
        let delta = if in_tree.contains(&dag.source(e)) {
            -edge_slack
        } else {
            edge_slack
        };
        for v in &tree {
            rank_by_ix[v.index()] += delta;
        }
        shifts += 1;

        seeds = frontier
            .iter()
            .copied()
            .filter(|&e| slack(dag, e, rank_by_ix) == 0)
            .map(|e| outside_end(dag, e, &in_tree))
            .collect();
    }

    tracing::trace!(component, shifts, "feasible tree complete");
    Ok(shifts)
}

/// Adds `seeds` and everything reachable from them over tight edges. Non-tight edges leaving
/// the tree are recorded in `frontier`, which is left holding crossing edges only.
fn tight_tree(
    dag: &Acyclic<'_>,
    rank_by_ix: &[i32],
    mut stack: Vec<VertexIx>,
    in_tree: &mut HashSet<VertexIx>,
    tree: &mut Vec<VertexIx>,
    frontier: &mut Vec<EdgeIx>,
) {
    while let Some(v) = stack.pop() {
        if !in_tree.insert(v) {
            continue;
        }
        tree.push(v);
        for e in dag.incident_edges(v) {
            let w = dag.other(e, v);
            if in_tree.contains(&w) {
                continue;
            }
            if slack(dag, e, rank_by_ix) == 0 {
                stack.push(w);
            } else {
                frontier.push(e);
            }
        }
    }
    frontier.retain(|&e| in_tree.contains(&dag.source(e)) != in_tree.contains(&dag.dest(e)));
}

fn outside_end(dag: &Acyclic<'_>, e: EdgeIx, in_tree: &HashSet<VertexIx>) -> VertexIx {
    let source = dag.source(e);
    if in_tree.contains(&source) {
        dag.dest(e)
    } else {
        source
    }
}

/// Least-slack frontier edge. Ties go to the edge whose ascendant end comes first in the
/// component (members are in index order), then to the first such edge among that vertex's
/// overlay in-edges.
fn find_min_slack_edge(
    dag: &Acyclic<'_>,
    rank_by_ix: &[i32],
    in_tree: &HashSet<VertexIx>,
    frontier: &[EdgeIx],
) -> Option<(EdgeIx, i32)> {
    let (least, head) = frontier
        .iter()
        .map(|&e| (slack(dag, e, rank_by_ix), dag.dest(e)))
        .min_by_key(|&(s, v)| (s, v.index()))?;
    let head_in = in_tree.contains(&head);
    dag.descendant_edges(head)
        .find(|&e| {
            in_tree.contains(&dag.source(e)) != head_in && slack(dag, e, rank_by_ix) == least
        })
        .map(|e| (e, least))
}
