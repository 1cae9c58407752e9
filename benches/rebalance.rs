//! Rebalance benchmarks: account construction and trade computation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nanobalance::{Account, Asset, AssetMap, Decimal};

/// Deterministic universe of `n_assets` with prices, holdings for every
/// other asset and an equal-weight index (n must divide 100).
fn generate_universe(n_assets: usize) -> (AssetMap, AssetMap, AssetMap) {
    // Simple deterministic PRNG (xorshift32)
    let mut rng_state: u32 = 42;
    let mut next = || {
        rng_state ^= rng_state << 13;
        rng_state ^= rng_state >> 17;
        rng_state ^= rng_state << 5;
        rng_state
    };

    let assets: Vec<Asset> = (0..n_assets).map(|i| Asset::new(format!("S{i:03}"))).collect();

    let prices: AssetMap = assets
        .iter()
        .map(|a| (a.clone(), Decimal::new(i64::from(next() % 100_000) + 1, 2)))
        .collect();

    let holdings: AssetMap = assets
        .iter()
        .step_by(2)
        .map(|a| (a.clone(), Decimal::new(i64::from(next() % 1_000_000) + 1, 3)))
        .collect();

    let weight = Decimal::ONE / Decimal::from(n_assets as u64);
    let index: AssetMap = assets.iter().map(|a| (a.clone(), weight)).collect();

    (prices, holdings, index)
}

fn bench_account_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("account/new");

    for n in [10, 50, 100] {
        let (prices, holdings, _) = generate_universe(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(Account::new(holdings.clone(), prices.clone()).unwrap()))
        });
    }

    group.finish();
}

fn bench_rebalance(c: &mut Criterion) {
    let mut group = c.benchmark_group("account/rebalance");

    for n in [10, 50, 100] {
        let (prices, holdings, index) = generate_universe(n);
        let account = Account::new(holdings, prices).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(account.rebalance(index.clone()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_account_new, bench_rebalance);
criterion_main!(benches);
