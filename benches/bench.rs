// Criterion benchmarks for League Pairing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use league_pairing::core::{build_history, score, PairingEngine, TierStratifiedPartitioner};
use league_pairing::models::{PastEvent, Player, PlayerId};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn create_roster(count: usize) -> Vec<Player> {
    (0..count)
        .map(|i| Player::new(i.to_string(), (i % 28) as f64).unwrap())
        .collect()
}

/// A season of weekly foursomes drawn in roster order with a rotating offset
fn create_season(count: usize, weeks: usize) -> Vec<PastEvent> {
    (0..weeks)
        .map(|week| {
            let order: Vec<PlayerId> = (0..count)
                .map(|i| PlayerId::from(((i * (week + 1) + week) % count).to_string()))
                .collect();
            PastEvent::new(order.chunks(4).map(<[PlayerId]>::to_vec).collect())
        })
        .collect()
}

fn bench_build_history(c: &mut Criterion) {
    let season = create_season(64, 30);

    c.bench_function("build_history_64_players_30_weeks", |b| {
        b.iter(|| build_history(black_box(&season)));
    });
}

fn bench_initial_partition(c: &mut Criterion) {
    let partitioner = TierStratifiedPartitioner::default();
    let players = create_roster(64);

    c.bench_function("initial_partition_64_players", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            partitioner.initial_partition(black_box(players.clone()), &mut rng)
        });
    });
}

fn bench_score(c: &mut Criterion) {
    let history = build_history(&create_season(64, 30));
    let mut rng = StdRng::seed_from_u64(1);
    let partition = TierStratifiedPartitioner::default().initial_partition(create_roster(64), &mut rng);

    c.bench_function("score_64_players", |b| {
        b.iter(|| score(black_box(&partition), black_box(&history)));
    });
}

fn bench_pairing(c: &mut Criterion) {
    let engine = PairingEngine::default();

    let mut group = c.benchmark_group("pairing");

    for player_count in [8, 16, 32, 64, 128].iter() {
        let players = create_roster(*player_count);
        let season = create_season(*player_count, 20);

        group.bench_with_input(
            BenchmarkId::new("generate", player_count),
            player_count,
            |b, _| {
                b.iter(|| {
                    engine.generate_seeded(
                        black_box(players.clone()),
                        black_box(&season),
                        black_box(7),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_history,
    bench_initial_partition,
    bench_score,
    bench_pairing
);

criterion_main!(benches);
