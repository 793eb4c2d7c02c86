//! Row alignment across weak components.
//!
//! Components are ranked independently, so their bottom rows do not necessarily hold the same
//! kind of vertex. The deepest component is taken as the reference. A freshly ranked component
//! whose deepest vertex is of the other type than the reference's is moved up one layer, which
//! puts every component's bottom row on a layer of the same parity as the reference's bottom
//! row. The check is made on that parity, so a network that is already aligned is left alone.

use quilt_graph::{Network, VertexIx, VertexType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Deepest component, `None` when there was nothing to reconcile.
    pub reference: Option<usize>,
    /// Type of the reference component's deepest vertex.
    pub bottom_row: Option<VertexType>,
    /// Components moved by one layer.
    pub shifted: Vec<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Profile {
    depth: usize,
    deepest_type: VertexType,
    deepest_layer: i32,
}

fn profile(network: &Network, members: &[VertexIx]) -> Option<Profile> {
    let mut min = i32::MAX;
    let mut deepest: Option<(VertexIx, i32)> = None;
    for &v in members {
        let Some(layer) = network.layer(v) else {
            continue;
        };
        min = min.min(layer);
        if deepest.is_none_or(|(_, max)| layer > max) {
            deepest = Some((v, layer));
        }
    }
    let (v, max) = deepest?;
    Some(Profile {
        depth: (max - min + 1) as usize,
        deepest_type: network.vertex(v).vertex_type(),
        deepest_layer: max,
    })
}

pub fn reconcile(network: &mut Network) -> ReconcileReport {
    let components = network.components().clone();
    if components.len() < 2 {
        return ReconcileReport::default();
    }

    let profiles: Vec<Option<Profile>> = components.iter().map(|c| profile(network, c)).collect();
    let mut reference: Option<(usize, Profile)> = None;
    for (c, p) in profiles.iter().enumerate() {
        let Some(p) = p else {
            continue;
        };
        if reference.is_none_or(|(_, r)| p.depth > r.depth) {
            reference = Some((c, *p));
        }
    }
    let Some((reference, ref_profile)) = reference else {
        return ReconcileReport::default();
    };

    let ref_parity = ref_profile.deepest_layer.rem_euclid(2);
    let mut shifted = Vec::new();
    for (c, p) in profiles.iter().enumerate() {
        let Some(p) = p else {
            continue;
        };
        if c == reference {
            continue;
        }
        if p.deepest_layer.rem_euclid(2) != ref_parity {
            if let Some(members) = components.get(c) {
                network.offset_layers(-1, members);
            }
            shifted.push(c);
        }
    }

    if let Some(min) = network.min_layer() {
        network.offset_all_layers(-min);
    }

    tracing::debug!(reference, shifted = shifted.len(), "reconciled component rows");
    ReconcileReport {
        reference: Some(reference),
        bottom_row: Some(ref_profile.deepest_type),
        shifted,
    }
}
