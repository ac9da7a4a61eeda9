//! Time a full fill of a small grid, including the initial propagation

use criterion::{criterion_group, criterion_main, Criterion};
use fillgrid::find_fill;
use fillgrid::grid_config::generate_grid_config_from_template_string;
use fillgrid::word_list::WordList;
use std::hint::black_box;

const WORDS: &[&str] = &[
    "cat", "cub", "toe", "bee", "dog", "ant", "ace", "tab", "eat", "tea", "bat", "act",
    "oat", "ore", "rot", "tor", "arc", "car", "ear", "era", "are", "tar", "art", "rat",
];

fn bench_fill_ring(c: &mut Criterion) {
    let config = generate_grid_config_from_template_string(
        WordList::new(WORDS),
        "___\n_#_\n___\n",
    ).unwrap();

    c.bench_function("fill_ring", |b| {
        b.iter(|| find_fill(black_box(&config)))
    });
}

fn bench_fill_open_square(c: &mut Criterion) {
    let config = generate_grid_config_from_template_string(
        WordList::new(WORDS),
        "___\n___\n___\n",
    ).unwrap();

    c.bench_function("fill_open_square", |b| {
        b.iter(|| find_fill(black_box(&config)))
    });
}

criterion_group!(benches, bench_fill_ring, bench_fill_open_square);
criterion_main!(benches);
