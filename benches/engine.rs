use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_match3::core::{
    find_hint, find_matches, init_grid, resolve, EngineConfig, Grid, ScoreBoard, SimpleRng,
};

fn bench_init_grid(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("init_grid_8x8", |b| {
        b.iter(|| init_grid(black_box(&config), &mut rng))
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let config = EngineConfig::default();
    let grid = init_grid(&config, &mut SimpleRng::new(12345));

    c.bench_function("find_matches_8x8", |b| {
        b.iter(|| find_matches(black_box(&grid), config.min_run))
    });
}

fn bench_find_hint(c: &mut Criterion) {
    let config = EngineConfig::default();
    let grid = init_grid(&config, &mut SimpleRng::new(12345));

    c.bench_function("find_hint_8x8", |b| {
        b.iter(|| find_hint(black_box(&grid), config.min_run))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let config = EngineConfig::default().with_grid_size(4);
    let start = Grid::parse("BSAK/SBKA/LLLB/AKSL").unwrap();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("resolve_cascade", |b| {
        b.iter(|| {
            let mut grid = start.clone();
            let mut ledger = ScoreBoard::new();
            resolve(&mut grid, &mut rng, &mut ledger, config).finish()
        })
    });
}

criterion_group!(
    benches,
    bench_init_grid,
    bench_find_matches,
    bench_find_hint,
    bench_resolve
);
criterion_main!(benches);
