//! Barycenter sweeps.

use quilt_graph::{Network, VertexIx};

/// Mean `order` of `neighbours`; `None` for an empty set.
pub fn barycenter(network: &Network, neighbours: impl IntoIterator<Item = VertexIx>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for w in neighbours {
        sum += network.order(w);
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Moves every vertex on layers `0 .. last - 1` to the barycenter of its descendants.
pub fn sweep_up(network: &mut Network, layers: &[Vec<VertexIx>]) {
    let Some(last) = layers.len().checked_sub(1) else {
        return;
    };
    for layer in &layers[..last] {
        for &v in layer {
            if let Some(b) = barycenter(network, network.descendants(v)) {
                network.set_order(v, b);
            }
        }
    }
}

/// Moves every vertex on layers `last` down to `2` to the barycenter of its ascendants.
pub fn sweep_down(network: &mut Network, layers: &[Vec<VertexIx>]) {
    if layers.len() <= 2 {
        return;
    }
    for layer in layers[2..].iter().rev() {
        for &v in layer {
            if let Some(b) = barycenter(network, network.ascendants(v)) {
                network.set_order(v, b);
            }
        }
    }
}
