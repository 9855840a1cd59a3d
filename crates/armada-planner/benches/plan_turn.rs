use std::hint::black_box;

use armada_forecast::TimelineEngine;
use armada_planner::{InvasionPlanner, PlannerConfig, TurnClock};
use armada_world::GameMap;
use criterion::{criterion_group, criterion_main, Criterion};

const STATE: &str = "\
P 0.0 0.0 1 100 5
P 24.0 18.0 2 100 5
P 4.0 3.0 0 20 3
P 20.0 15.0 0 20 3
P 12.0 9.0 0 55 8
P 2.0 14.0 0 33 4
P 22.0 4.0 0 33 4
P 8.0 16.0 0 12 2
P 16.0 2.0 0 12 2
go
";

fn bench_plan_turn(c: &mut Criterion) {
    let map = GameMap::parse(STATE).unwrap();

    c.bench_function("plan_turn/9_planets", |b| {
        b.iter(|| {
            let mut engine = TimelineEngine::new(&map);
            let mut planner = InvasionPlanner::new(PlannerConfig::default());
            let clock = TurnClock::start(60_000);
            black_box(planner.plan_turn(&map, &mut engine, &clock))
        })
    });

    c.bench_function("forecast/rebuild", |b| {
        b.iter(|| black_box(TimelineEngine::new(&map)))
    });
}

criterion_group!(benches, bench_plan_turn);
criterion_main!(benches);
