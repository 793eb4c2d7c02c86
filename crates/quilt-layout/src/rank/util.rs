//! Rank helpers (slack, normalization, parity).

use crate::acyclic::Acyclic;
use quilt_graph::{EdgeIx, VertexIx, VertexType};

/// How far `e` is from tight: `rank(source) - rank(dest) - 1` through the overlay.
pub fn slack(dag: &Acyclic<'_>, e: EdgeIx, rank_by_ix: &[i32]) -> i32 {
    rank_by_ix[dag.source(e).index()] - rank_by_ix[dag.dest(e).index()] - 1
}

/// Shifts `members` so their minimum becomes 0 or 1, subtracting an even amount so that people
/// and unions keep their parity.
pub fn normalize_component(members: &[VertexIx], rank_by_ix: &mut [i32]) {
    let Some(min) = members.iter().map(|v| rank_by_ix[v.index()]).min() else {
        return;
    };
    let delta = min - min.rem_euclid(2);
    if delta == 0 {
        return;
    }
    for v in members {
        rank_by_ix[v.index()] -= delta;
    }
}

/// Every person of `members` on one parity and every union on the other.
pub fn has_consistent_parity(
    members: &[VertexIx],
    rank_by_ix: &[i32],
    vertex_type: impl Fn(VertexIx) -> VertexType,
) -> bool {
    let mut person: Option<i32> = None;
    for &v in members {
        let parity = rank_by_ix[v.index()].rem_euclid(2);
        let person_parity = match vertex_type(v) {
            VertexType::Person => parity,
            VertexType::Union => 1 - parity,
        };
        match person {
            Some(p) if p != person_parity => return false,
            Some(_) => {}
            None => person = Some(person_parity),
        }
    }
    true
}
