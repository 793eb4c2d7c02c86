//! Generation layering.
//!
//! Each weak component is ranked on its own through the [`Acyclic`] overlay: a longest-path
//! pass from the orphans gives a feasible layering, and a tight-tree pass pulls slack edges
//! together. Components are then normalized so the lowest row is 0 (or 1 when that row holds
//! unions), and the whole network is shifted so the global minimum is 0.

pub mod feasible_tree;
pub mod init_rank;
pub mod util;

use crate::acyclic::Acyclic;
use crate::error::Result;
use quilt_graph::Network;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankReport {
    pub components: usize,
    pub feedback_edges: usize,
    /// Tree moves made while tightening, summed over all components.
    pub tree_shifts: usize,
}

/// Assigns a layer to every vertex, overwriting whatever was there.
pub fn rank(network: &mut Network) -> Result<RankReport> {
    let components = network.components().clone();
    let feedback = network.cycles().clone();
    let mut report = RankReport {
        components: components.len(),
        feedback_edges: feedback.len(),
        tree_shifts: 0,
    };
    if network.is_empty() {
        return Ok(report);
    }

    let mut rank_by_ix: Vec<i32> = vec![0; network.vertex_count()];
    {
        let dag = Acyclic::new(network, &feedback);
        for (c, members) in components.iter().enumerate() {
            init_rank::init_rank(&dag, c, members, &mut rank_by_ix)?;
            report.tree_shifts += feasible_tree::feasible_tree(&dag, c, members, &mut rank_by_ix)?;
            util::normalize_component(members, &mut rank_by_ix);
            debug_assert!(
                util::has_consistent_parity(members, &rank_by_ix, |v| network
                    .vertex(v)
                    .vertex_type()),
                "component {c} mixes person and union parities"
            );
        }
    }

    let min = rank_by_ix.iter().copied().min().unwrap_or(0);
    for v in network.vertex_ixs() {
        network.set_layer(v, rank_by_ix[v.index()] - min);
    }

    tracing::debug!(
        components = report.components,
        feedback_edges = report.feedback_edges,
        tree_shifts = report.tree_shifts,
        "ranked network"
    );
    Ok(report)
}
