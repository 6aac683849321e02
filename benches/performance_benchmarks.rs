use criterion::{black_box, criterion_group, criterion_main, Criterion};

use finlead::emi;
use finlead::slug::generate_slug;

fn benchmark_emi_formula(c: &mut Criterion) {
    c.bench_function("emi_typical_home_loan", |b| {
        b.iter(|| emi::calculate(black_box(2_500_000.0), black_box(8.35), black_box(240)))
    });

    c.bench_function("emi_long_tenure", |b| {
        b.iter(|| emi::calculate(black_box(500_000.0), black_box(10.5), black_box(480)))
    });
}

fn benchmark_slug_generation(c: &mut Criterion) {
    c.bench_function("slug_clean_title", |b| {
        b.iter(|| generate_slug(black_box("understanding home loan interest rates")))
    });

    c.bench_function("slug_messy_title", |b| {
        b.iter(|| {
            generate_slug(black_box(
                "  Top 10 -- Tips!! (for First-Time Buyers) @2025  ",
            ))
        })
    });
}

criterion_group!(benches, benchmark_emi_formula, benchmark_slug_generation);
criterion_main!(benches);
