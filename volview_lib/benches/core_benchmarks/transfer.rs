use criterion::{black_box, Criterion};

use crate::common::{dense_curve, ColorMapStore, ControlPointCurve, PremadeColorMaps};

pub fn opacity_lut_default(c: &mut Criterion) {
    let curve = ControlPointCurve::new();

    c.bench_function("opacity lut, boundary points only", |b| {
        b.iter(|| black_box(curve.opacity_lut()))
    });
}

pub fn opacity_lut_dense(c: &mut Criterion) {
    let curve = dense_curve(16);

    c.bench_function("opacity lut, 255 control points", |b| {
        b.iter(|| black_box(curve.opacity_lut()))
    });
}

pub fn lookup_table_hot(c: &mut Criterion) {
    let curve = dense_curve(256);
    let store = PremadeColorMaps::new();
    let hot = match store.color_map("hot") {
        Some(map) => map,
        None => return,
    };

    c.bench_function("rgba lookup table, hot", |b| {
        b.iter(|| black_box(curve.apply_transfer_function(hot)))
    });
}
