use criterion::{Criterion, criterion_group, criterion_main};
use langtree::color::{LeafResult, Scores};
use langtree::layout::{LayoutConfig, layout};
use langtree::newick::parse_str;
use langtree::prune::prune;
use langtree::render::{RenderConfig, render};
use std::hint::black_box;

/// (name, number of leaves, every how many leaves one has a result)
const TREE_SIZES: &[(&str, usize, usize)] = &[
    ("family-n200", 200, 3),
    ("family-n2k", 2_000, 10),
    ("glottolog-n20k", 20_000, 50),
];

/// Builds a Newick string of a caterpillar of cherries with `num_leaves` leaves.
fn cherry_caterpillar(num_leaves: usize) -> String {
    let num_cherries = num_leaves / 2;
    let mut newick = "(".repeat(num_cherries);
    for i in 0..num_cherries {
        if i > 0 {
            newick.push(',');
        }
        newick.push_str(&format!("(l{}:0.1,l{}:0.2):0.3)", 2 * i, 2 * i + 1));
        newick.push_str(":0.05");
    }
    newick.push(';');
    newick
}

fn results(num_leaves: usize, every: usize) -> Vec<LeafResult> {
    (0..num_leaves)
        .step_by(every)
        .map(|i| LeafResult::new(format!("l{i}"), (i % 5) as f64))
        .collect()
}

fn tree_pipeline(c: &mut Criterion) {
    for &(name, num_leaves, every) in TREE_SIZES {
        let newick = cherry_caterpillar(num_leaves);
        let scores = Scores::from_results(&results(num_leaves, every), 4.0);
        let keep = scores.keep_set();

        c.bench_function(&format!("parse/{name}"), |b| {
            b.iter(|| parse_str(black_box(&newick)).unwrap());
        });

        let tree = parse_str(&newick).unwrap();
        c.bench_function(&format!("prune/{name}"), |b| {
            b.iter(|| prune(black_box(&tree), black_box(&keep)).unwrap());
        });

        let pruned = prune(&tree, &keep).unwrap();
        c.bench_function(&format!("layout_render/{name}"), |b| {
            b.iter(|| {
                let layout = layout(black_box(&pruned), &LayoutConfig::default());
                render(&pruned, &layout, &scores, &RenderConfig::default())
            });
        });
    }
}

criterion_group! {
    name = pipeline;
    config = Criterion::default().sample_size(20);
    targets = tree_pipeline
}
criterion_main!(pipeline);
