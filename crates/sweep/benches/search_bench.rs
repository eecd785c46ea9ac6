//! Criterion benches for the routing pipeline.
//!
//! - Graph build + eulerization on sampled 8x8 grids.
//! - Full search on small two-way and mixed grids, both coverage modes.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use sweep::api::{
    draw_grid, eulerize, solve_with_defaults, Coord, CoverageMode, Graph, Grid, GridSampleCfg,
    Link, ReplayToken, RouteCfg,
};

fn bench_eulerize(c: &mut Criterion) {
    let mut group = c.benchmark_group("eulerize");
    let cfg = GridSampleCfg {
        streets: 8,
        avenues: 8,
        two_way: 0.7,
        one_way: 0.3,
    };
    group.bench_function(BenchmarkId::new("build_and_balance", "8x8"), |b| {
        b.iter_batched(
            || ReplayToken { seed: 42, index: 0 },
            |mut tok| {
                tok.index = tok.index.wrapping_add(1);
                let grid = draw_grid(cfg, tok);
                if let Ok(mut graph) = Graph::from_grid(&grid) {
                    let _ = eulerize(&mut graph);
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(20);
    let mixed = Grid::parse("o - o > o\n|   v   |\no < o - o\n|   |   ^\no - o - o\n")
        .expect("bench grid parses");
    let cases = [
        ("two-way-2x2", Grid::filled(2, 2, Link::TwoWay)),
        ("two-way-2x3", Grid::filled(2, 3, Link::TwoWay)),
        ("mixed-3x3", mixed),
    ];
    for (name, grid) in &cases {
        for coverage in [CoverageMode::EitherDirection, CoverageMode::EveryDirection] {
            let cfg = RouteCfg::new(Coord::new(1, 1)).with_coverage(coverage);
            let id = BenchmarkId::new(format!("{coverage:?}"), name);
            group.bench_with_input(id, grid, |b, grid| {
                b.iter(|| solve_with_defaults(grid, &cfg).expect("bench grid balances"))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_eulerize, bench_search);
criterion_main!(benches);
