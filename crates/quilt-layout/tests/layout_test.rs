use quilt_graph::{Network, VertexType};
use quilt_layout::{LayoutOptions, layout};

/// Deterministic pedigree: `generations` rows of couples, each couple's children marrying into
/// the next row. A small xorshift keeps the shape irregular without pulling in a rng.
fn generated_pedigree(prefix: &str, generations: usize, width: usize, seed: u64) -> Network {
    let mut net = Network::new();
    add_pedigree(&mut net, prefix, generations, width, seed);
    net
}

fn add_pedigree(net: &mut Network, prefix: &str, generations: usize, width: usize, seed: u64) {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut row: Vec<String> = (0..width)
        .map(|i| {
            let id = format!("{prefix}g0p{i}");
            net.add_person(id.as_str()).unwrap();
            id
        })
        .collect();

    for g in 1..generations {
        let mut children: Vec<String> = Vec::new();
        for (f, pair) in row.chunks(2).enumerate() {
            let union = format!("{prefix}g{g}f{f}");
            net.add_union(union.as_str()).unwrap();
            for p in pair {
                net.add_parent(&union, p).unwrap();
            }
            let kids = 1 + (next() % 3) as usize;
            for k in 0..kids {
                let kid = format!("{prefix}g{g}f{f}k{k}");
                net.add_person(kid.as_str()).unwrap();
                net.add_child(&union, &kid).unwrap();
                children.push(kid);
            }
        }
        // Spouses from outside the pedigree keep the rows from shrinking.
        if next() % 2 == 0 {
            let outsider = format!("{prefix}g{g}out");
            net.add_person(outsider.as_str()).unwrap();
            children.push(outsider);
        }
        children.truncate(width.max(2));
        row = children;
    }
}

fn assert_layout_properties(net: &mut Network) {
    assert!(net.is_layer_computed());
    assert_eq!(net.min_layer(), Some(0));
    for v in net.vertices() {
        assert!(v.layer().unwrap() >= 0, "{v}");
    }

    let fas = net.cycles().clone();
    for e in net.edge_ixs() {
        if fas.contains(e) {
            continue;
        }
        let edge = net.edge(e);
        let (s, d) = (net.layer(edge.source()).unwrap(), net.layer(edge.dest()).unwrap());
        assert!(s > d, "{edge}: {s} <= {d}");
    }

    let comps = net.components().clone();
    for comp in comps.iter() {
        let mut parity = None;
        for &v in comp {
            let l = net.layer(v).unwrap().rem_euclid(2);
            let p = match net.vertex(v).vertex_type() {
                VertexType::Person => l,
                VertexType::Union => 1 - l,
            };
            assert_eq!(*parity.get_or_insert(p), p, "{}", net.vertex(v));
        }
    }
}

fn snapshot(net: &Network) -> Vec<(Option<i32>, f64)> {
    net.vertices().map(|v| (v.layer(), v.order())).collect()
}

#[test]
fn simple_pedigree_through_the_pipeline() {
    let mut net = Network::new();
    for id in ["dad", "mom", "kid1", "kid2"] {
        net.add_person(id).unwrap();
    }
    net.add_union("F").unwrap();
    net.add_parent("F", "dad").unwrap();
    net.add_parent("F", "mom").unwrap();
    net.add_child("F", "kid1").unwrap();
    net.add_child("F", "kid2").unwrap();

    let summary = layout(&mut net, &LayoutOptions::default()).unwrap();
    assert_eq!(summary.components, 1);
    assert_eq!(summary.feedback_edges, 0);
    assert_eq!(summary.layer_count, 3);
    assert_eq!(summary.crossings, 0);
    assert!(summary.order_converged);
    assert!(!summary.reused_cached_layers);

    let layer = |id: &str| net.get_vertex(id).unwrap().layer().unwrap();
    assert_eq!(
        [layer("dad"), layer("mom"), layer("F"), layer("kid1"), layer("kid2")],
        [0, 0, 1, 2, 2]
    );
}

#[test]
fn generated_pedigree_satisfies_the_layout_properties() {
    let mut net = generated_pedigree("a", 6, 8, 0x5eed);
    layout(&mut net, &LayoutOptions::default()).unwrap();
    assert_layout_properties(&mut net);
}

#[test]
fn disconnected_pedigrees_with_a_loop_satisfy_the_layout_properties() {
    let mut net = generated_pedigree("a", 5, 6, 7);
    add_pedigree(&mut net, "b", 3, 4, 11);
    net.add_person("solo").unwrap();

    // Make someone their own grandparent.
    net.add_union("loop").unwrap();
    net.add_parent("loop", "ag4f0k0").unwrap();
    net.add_child("loop", "ag0p0").unwrap();

    let summary = layout(&mut net, &LayoutOptions::default()).unwrap();
    assert!(summary.feedback_edges >= 1);
    assert!(summary.components >= 3);
    assert_layout_properties(&mut net);
}

#[test]
fn second_layout_changes_nothing() {
    let mut net = generated_pedigree("a", 5, 6, 42);
    add_pedigree(&mut net, "b", 2, 2, 3);
    let first = layout(&mut net, &LayoutOptions::default()).unwrap();
    let before = snapshot(&net);

    let second = layout(&mut net, &LayoutOptions::default()).unwrap();
    assert_eq!(snapshot(&net), before);
    assert!(second.reused_cached_layers);
    assert!(second.reconcile.shifted.is_empty());
    assert_eq!(second.crossings, first.crossings);
    assert_eq!(second.layer_count, first.layer_count);
}

#[test]
fn reconciliation_can_be_turned_off() {
    let mut net = Network::new();
    add_pedigree(&mut net, "a", 3, 2, 5);
    net.add_union("childless").unwrap();
    net.add_person("x").unwrap();
    net.add_parent("childless", "x").unwrap();

    let options = LayoutOptions {
        reconcile_components: false,
        ..LayoutOptions::default()
    };
    let summary = layout(&mut net, &options).unwrap();
    assert_eq!(summary.reconcile.reference, None);
    assert_eq!(net.get_vertex("x").unwrap().layer(), Some(0));
    assert_eq!(net.get_vertex("childless").unwrap().layer(), Some(1));
}

#[test]
fn empty_network_lays_out_to_nothing() {
    let mut net = Network::new();
    let summary = layout(&mut net, &LayoutOptions::default()).unwrap();
    assert_eq!(summary.components, 0);
    assert_eq!(summary.layer_count, 0);
    assert_eq!(summary.crossings, 0);
}

#[test]
fn version_matches_cargo_pkg_version() {
    assert_eq!(quilt_layout::VERSION, env!("CARGO_PKG_VERSION"));
    assert!(!quilt_layout::VERSION.is_empty());
}
