//! Layout pass benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_core::{Dimension, Insets, LayoutProperties, MeasureSpec, Size};
use tessera_layout::{compute_layout, LayoutOptions, LayoutTree, Leaf, LinearContainer, Node, NodeId, ScrollContainer, TextStyle};

/// A scrolling list of `rows` cards, each a horizontal row of an icon and
/// a wrapped text.
fn build_list(rows: usize) -> (LayoutTree, NodeId) {
    let mut tree = LayoutTree::new();
    let scroll = tree.insert(Node::new(ScrollContainer::vertical().with_fill_content(true)));
    let list = tree.insert(
        Node::new(LinearContainer::vertical().with_padding(Insets::uniform(8.0)))
            .with_properties(LayoutProperties::new().with_width(Dimension::Stretch)),
    );
    tree.append_child(scroll, list).unwrap();

    for index in 0..rows {
        let card = tree.insert(
            Node::new(LinearContainer::horizontal().with_padding(Insets::uniform(4.0))).with_properties(
                LayoutProperties::new()
                    .with_width(Dimension::Stretch)
                    .with_margin(Insets::symmetric(0.0, 4.0)),
            ),
        );
        let icon = tree.insert(Node::new(Leaf::image(32.0, 32.0)));
        let label = tree.insert(
            Node::new(Leaf::text(format!("Item number {index} with a longer description"), TextStyle::default()))
                .with_properties(LayoutProperties::new().with_weight(1.0)),
        );
        tree.append_child(list, card).unwrap();
        tree.append_child(card, icon).unwrap();
        tree.append_child(card, label).unwrap();
    }
    (tree, scroll)
}

fn measure_list(c: &mut Criterion) {
    let (tree, root) = build_list(200);
    c.bench_function("measure_list_200", |b| {
        b.iter(|| {
            tree.measure(
                black_box(root),
                Size::new(360.0, 640.0),
                MeasureSpec::Exact,
                MeasureSpec::Exact,
            )
        })
    });
}

fn full_pass(c: &mut Criterion) {
    let options = LayoutOptions::new(360.0, 640.0);
    c.bench_function("compute_layout_200", |b| {
        b.iter_with_setup(
            || build_list(200),
            |(mut tree, root)| compute_layout(&mut tree, black_box(root), &options),
        )
    });
}

fn clean_pass(c: &mut Criterion) {
    let options = LayoutOptions::new(360.0, 640.0);
    let (mut tree, root) = build_list(200);
    let _ = compute_layout(&mut tree, root, &options);
    c.bench_function("compute_layout_clean_200", |b| {
        b.iter(|| compute_layout(&mut tree, black_box(root), &options))
    });
}

criterion_group!(benches, measure_list, full_pass, clean_pass);
criterion_main!(benches);
