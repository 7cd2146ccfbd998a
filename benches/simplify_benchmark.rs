use criterion::{black_box, criterion_group, criterion_main, Criterion};
use splitledger::core::config::EngineConfig;
use splitledger::optimization::report::compute_group_debts;
use splitledger::simulation::random_group::{generate_random_group, GroupConfig};

fn bench_group(c: &mut Criterion, name: &str, member_count: usize, expense_count: usize) {
    let config = GroupConfig {
        member_count,
        expense_count,
        settlement_count: expense_count / 10,
        seed: Some(1),
        ..Default::default()
    };
    let group = generate_random_group(&config);
    let engine_config = EngineConfig::default();

    c.bench_function(name, |b| {
        b.iter(|| {
            compute_group_debts(
                black_box(&group.members),
                black_box(&group.expenses),
                black_box(&group.settlements),
                &engine_config,
            )
        })
    });
}

fn bench_small_group(c: &mut Criterion) {
    bench_group(c, "group_debts_5_members", 5, 50);
}

fn bench_club(c: &mut Criterion) {
    bench_group(c, "group_debts_50_members", 50, 1_000);
}

fn bench_large_group(c: &mut Criterion) {
    bench_group(c, "group_debts_500_members", 500, 10_000);
}

criterion_group!(benches, bench_small_group, bench_club, bench_large_group);
criterion_main!(benches);
