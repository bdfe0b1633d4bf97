use criterion::{criterion_group, criterion_main, Criterion};
use core_benchmarks::{geometry::*, transfer::*};

mod common;
mod core_benchmarks;

criterion_group! {
    name = transfer_function;
    config = Criterion::default().significance_level(0.1);
    targets = opacity_lut_default, opacity_lut_dense, lookup_table_hot
}

criterion_group! {
    name = slicing;
    config = Criterion::default().significance_level(0.1);
    targets = intersect_axis_aligned, intersect_rotating
}

criterion_main!(transfer_function, slicing);
