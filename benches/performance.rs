use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use scorewatch::fixtures::game_batch;
use scorewatch::store::SelectionStore;
use scorewatch::types::sort_for_display;

/// Sorting a full merged fetch (a busy evening across all leagues).
fn bench_sort_for_display(c: &mut Criterion) {
    let games = game_batch(40, 160);
    c.bench_function("sort_for_display_200", |b| {
        b.iter_batched(
            || games.clone(),
            |mut games| sort_for_display(black_box(&mut games)),
            BatchSize::SmallInput,
        )
    });
}

/// Reconciling a 20-game selection against a 200-game fetch.
fn bench_reconcile(c: &mut Criterion) {
    let fresh = game_batch(40, 160);
    c.bench_function("reconcile_20_of_200", |b| {
        b.iter_batched(
            || {
                let mut store = SelectionStore::in_memory();
                for game in game_batch(10, 10) {
                    store.add(game);
                }
                store
            },
            |mut store| {
                store.reconcile(black_box(&fresh));
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_sort_for_display, bench_reconcile);
criterion_main!(benches);
