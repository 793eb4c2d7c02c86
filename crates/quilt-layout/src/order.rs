//! In-layer ordering by barycenter sweeps.
//!
//! Every round averages each vertex's neighbours on the adjacent layer (descendants on the way
//! up, ascendants on the way down), re-sorts every layer by `(component, order)` and resets
//! `order` to the integer position. Rounds stop at the first one that leaves every layer
//! unchanged, or when the iteration budget runs out.

pub mod barycenter;
pub mod cross_count;

pub use cross_count::cross_count;

use crate::options::DEFAULT_MAX_ORDER_ITERATIONS;
use quilt_graph::{Network, VertexIx};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderOptions {
    pub max_iterations: usize,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ORDER_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReport {
    pub iterations: usize,
    /// The last round changed nothing.
    pub converged: bool,
}

/// Vertices grouped by layer, each layer in vertex insertion order. Vertices without a layer
/// are left out.
pub fn build_layers(network: &Network) -> Vec<Vec<VertexIx>> {
    let Some(max) = network.max_layer() else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<VertexIx>> = vec![Vec::new(); (max + 1).max(0) as usize];
    for v in network.vertex_ixs() {
        let Some(layer) = network.layer(v) else {
            continue;
        };
        if let Some(slot) = usize::try_from(layer).ok().and_then(|l| layers.get_mut(l)) {
            slot.push(v);
        }
    }
    layers
}

/// Layers sorted by what `order` currently says, without running any sweep.
pub fn layers_by_order(network: &mut Network) -> Vec<Vec<VertexIx>> {
    network.components();
    let mut layers = build_layers(network);
    sort_layers(network, &mut layers);
    layers
}

fn assign_positions(network: &mut Network, layers: &[Vec<VertexIx>]) {
    for layer in layers {
        for (i, &v) in layer.iter().enumerate() {
            network.set_order(v, i as f64);
        }
    }
}

fn compare(network: &Network, a: VertexIx, b: VertexIx) -> Ordering {
    let (va, vb) = (network.vertex(a), network.vertex(b));
    va.component()
        .cmp(&vb.component())
        .then_with(|| va.order().total_cmp(&vb.order()))
}

/// Stable sort of every layer. Returns whether any layer's sequence changed.
fn sort_layers(network: &Network, layers: &mut [Vec<VertexIx>]) -> bool {
    let mut changed = false;
    for layer in layers.iter_mut() {
        let before = layer.clone();
        layer.sort_by(|&a, &b| compare(network, a, b));
        changed |= *layer != before;
    }
    changed
}

pub fn order(network: &mut Network, options: &OrderOptions) -> OrderReport {
    network.components();
    let mut layers = build_layers(network);
    assign_positions(network, &layers);

    let mut report = OrderReport::default();
    while report.iterations < options.max_iterations {
        report.iterations += 1;
        barycenter::sweep_up(network, &layers);
        barycenter::sweep_down(network, &layers);
        let changed = sort_layers(network, &mut layers);
        assign_positions(network, &layers);
        if !changed {
            report.converged = true;
            break;
        }
    }

    tracing::debug!(
        layers = layers.len(),
        iterations = report.iterations,
        converged = report.converged,
        "ordered layers"
    );
    report
}
