//! Initial feasible ranking: longest path from the orphans outwards.

use crate::acyclic::Acyclic;
use crate::error::{Error, Result};
use quilt_graph::VertexIx;
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;

/// Ranks one component. Orphans start at their type's base layer; every other vertex lands one
/// layer below its deepest ascendant, and is only visited once all of its ascendants are.
pub fn init_rank(
    dag: &Acyclic<'_>,
    component: usize,
    members: &[VertexIx],
    rank_by_ix: &mut [i32],
) -> Result<()> {
    let network = dag.network();
    let mut waiting: HashMap<VertexIx, usize> = HashMap::default();
    let mut queue: VecDeque<VertexIx> = VecDeque::new();

    for &v in members {
        rank_by_ix[v.index()] = network.vertex(v).vertex_type().base_layer();
        match dag.ascendant_count(v) {
            0 => queue.push_back(v),
            n => {
                waiting.insert(v, n);
            }
        }
    }

    let mut ranked = 0usize;
    while let Some(v) = queue.pop_front() {
        ranked += 1;
        let next = rank_by_ix[v.index()] + 1;
        for w in dag.descendants(v) {
            let slot = &mut rank_by_ix[w.index()];
            *slot = (*slot).max(next);
            let ready = match waiting.get_mut(&w) {
                Some(left) => {
                    *left -= 1;
                    *left == 0
                }
                None => false,
            };
            if ready {
                waiting.remove(&w);
                queue.push_back(w);
            }
        }
    }

    if ranked != members.len() {
        return Err(Error::UnrankedVertices {
            component,
            ranked,
            expected: members.len(),
        });
    }
    Ok(())
}
