//! Edge crossings between adjacent layers, counted with an accumulator tree.

use quilt_graph::{Network, VertexIx};
use rustc_hash::FxHashMap as HashMap;

/// Total crossings of the edges joining consecutive layers. Edges spanning more than one layer
/// are not counted.
pub fn cross_count(network: &Network, layers: &[Vec<VertexIx>]) -> usize {
    let mut cc = 0usize;
    for i in 1..layers.len() {
        cc += two_layer_cross_count(network, &layers[i - 1], &layers[i]);
    }
    cc
}

fn two_layer_cross_count(network: &Network, north: &[VertexIx], south: &[VertexIx]) -> usize {
    if south.is_empty() {
        return 0;
    }

    let south_pos: HashMap<VertexIx, usize> =
        south.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let mut south_entries: Vec<usize> = Vec::new();
    for &v in north {
        let mut entries: Vec<usize> = network
            .descendants(v)
            .filter_map(|w| south_pos.get(&w).copied())
            .collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index = 1usize;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc = 0usize;
    for pos in south_entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut weight_sum = 0usize;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }
    cc
}
