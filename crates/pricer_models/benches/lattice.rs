//! Benchmarks for the Hull-White lattice and swaption pricing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::{CurveInterpolation, DiscountCurve};
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::instruments::rates::{
    price_bermudan_swaption, price_european_swaption, BermudanSwaption, EuropeanSwaption,
    InterestRateSwap, SwapBuilder,
};
use pricer_models::models::rates::{HullWhiteParams, HullWhiteTree, LatticeConfig, TimeGrid};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn curve() -> DiscountCurve<f64> {
    let dates = (2026..=2035).map(|y| date(y, 1, 2)).collect::<Vec<_>>();
    let dfs = (1..=10).map(|i| (-0.045 * i as f64).exp()).collect();
    DiscountCurve::new(
        date(2025, 1, 2),
        DayCountConvention::Actual360,
        dates,
        dfs,
        CurveInterpolation::LogLinear,
    )
    .unwrap()
}

fn forward_swap() -> InterestRateSwap<f64> {
    SwapBuilder::new()
        .start(date(2026, 1, 2))
        .maturity(date(2030, 1, 2))
        .fixed_rate(0.03)
        .build()
        .unwrap()
}

fn benchmark_tree_build(c: &mut Criterion) {
    let curve = curve();
    let mut group = c.benchmark_group("hull_white_tree_build");

    for steps in [50, 200, 800] {
        let config = LatticeConfig {
            steps,
            ..LatticeConfig::default()
        };
        let grid = TimeGrid::new(&[5.0], &config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(steps), &grid, |b, grid| {
            b.iter(|| HullWhiteTree::build(HullWhiteParams::default(), black_box(grid.clone()), &curve))
        });
    }

    group.finish();
}

fn benchmark_swaptions(c: &mut Criterion) {
    let curve = curve();
    let european = EuropeanSwaption::new(forward_swap(), date(2026, 1, 2), 0.2).unwrap();
    let bermudan = BermudanSwaption::new(
        forward_swap(),
        vec![date(2026, 1, 2), date(2027, 1, 4), date(2028, 1, 3), date(2029, 1, 2)],
        HullWhiteParams::default(),
        LatticeConfig::default(),
    )
    .unwrap();

    c.bench_function("european_swaption_black", |b| {
        b.iter(|| price_european_swaption(black_box(&european), &curve))
    });
    c.bench_function("bermudan_swaption_lattice", |b| {
        b.iter(|| price_bermudan_swaption(black_box(&bermudan), &curve))
    });
}

criterion_group!(benches, benchmark_tree_build, benchmark_swaptions);
criterion_main!(benches);
