use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use quilt_graph::Network;
use quilt_layout::{LayoutOptions, layout, rank};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct PedigreeSpec {
    person_ids: Vec<String>,
    /// `(parents, children)` indices into `person_ids`.
    unions: Vec<(Vec<usize>, Vec<usize>)>,
}

impl PedigreeSpec {
    fn build(&self) -> Network {
        let mut net = Network::new();
        for id in &self.person_ids {
            net.add_person(id.as_str()).unwrap();
        }
        for (u, (parents, children)) in self.unions.iter().enumerate() {
            let union = format!("F{u}");
            net.add_union(union.as_str()).unwrap();
            for &p in parents {
                net.add_parent(&union, &self.person_ids[p]).unwrap();
            }
            for &c in children {
                net.add_child(&union, &self.person_ids[c]).unwrap();
            }
        }
        net
    }
}

/// Rows of `width` people; consecutive pairs of a row form a union whose children make up part
/// of the next row, and every sixth person of a row marries into the far end of it.
fn build_pedigree_spec(generations: usize, width: usize) -> PedigreeSpec {
    let mut person_ids: Vec<String> = Vec::new();
    let mut unions: Vec<(Vec<usize>, Vec<usize>)> = Vec::new();

    let mut row: Vec<usize> = Vec::new();
    for i in 0..width {
        person_ids.push(format!("I{i}"));
        row.push(i);
    }

    for g in 1..generations {
        let mut next_row: Vec<usize> = Vec::new();
        for (f, pair) in row.chunks(2).enumerate() {
            let kids = 1 + (f * 7 + g) % 3;
            let mut children = Vec::new();
            for _ in 0..kids {
                if next_row.len() >= width {
                    break;
                }
                let id = person_ids.len();
                person_ids.push(format!("I{id}"));
                children.push(id);
                next_row.push(id);
            }
            unions.push((pair.to_vec(), children));
        }
        // Cross-links between distant branches of the same row.
        for i in (0..row.len()).step_by(6) {
            let far = row.len() - 1 - i;
            if far > i + 1 {
                unions.push((vec![row[i], row[far]], Vec::new()));
            }
        }
        while next_row.len() < width {
            let id = person_ids.len();
            person_ids.push(format!("I{id}"));
            next_row.push(id);
        }
        row = next_row;
    }

    PedigreeSpec { person_ids, unions }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("ped_8x16", 8usize, 16usize),
        ("ped_12x64", 12usize, 64usize),
        ("ped_16x256", 16usize, 256usize),
    ];

    for (name, generations, width) in cases {
        let spec = build_pedigree_spec(generations, width);
        group.bench_with_input(BenchmarkId::new("rank", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |mut net| {
                    rank::rank(black_box(&mut net)).unwrap();
                    black_box(net.max_layer());
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("layout", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |mut net| {
                    let summary = layout(black_box(&mut net), &LayoutOptions::default()).unwrap();
                    black_box(summary.crossings);
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
