use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use rbtree_index::red_black_tree::RedBlackTree;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 1_000;

fn keys() -> Vec<u32> {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS).map(|_| rng.next_u32()).collect()
}

fn bench_btreeset_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench btreeset insert", move |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for key in &keys {
                set.insert(*key);
            }
            set
        })
    });
}

fn bench_btreeset_contains(c: &mut Criterion) {
    let keys = keys();
    let set = keys.iter().cloned().collect::<BTreeSet<u32>>();
    c.bench_function("bench btreeset contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(set.contains(key));
            }
        })
    });
}

fn bench_red_black_tree_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench red_black_tree insert", move |b| {
        b.iter(|| {
            let mut tree = RedBlackTree::new();
            for key in &keys {
                tree.insert(*key);
            }
            tree
        })
    });
}

fn bench_red_black_tree_contains(c: &mut Criterion) {
    let keys = keys();
    let tree = keys.iter().cloned().collect::<RedBlackTree<u32>>();
    c.bench_function("bench red_black_tree contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(tree.contains(key));
            }
        })
    });
}

fn bench_red_black_tree_remove(c: &mut Criterion) {
    let keys = keys();
    let tree = keys.iter().cloned().collect::<RedBlackTree<u32>>();
    c.bench_function("bench red_black_tree remove", move |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            for key in &keys {
                black_box(tree.remove(key));
            }
            tree
        })
    });
}

criterion_group!(
    benches,
    bench_btreeset_insert,
    bench_btreeset_contains,
    bench_red_black_tree_insert,
    bench_red_black_tree_contains,
    bench_red_black_tree_remove
);
criterion_main!(benches);
