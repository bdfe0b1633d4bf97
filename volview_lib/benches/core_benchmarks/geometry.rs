use criterion::{black_box, Criterion};

use crate::common::{normals, vector, CubePlaneIntersection, Plane};

pub fn intersect_axis_aligned(c: &mut Criterion) {
    let plane = Plane::default();

    c.bench_function("intersection, horizontal plane", |b| {
        b.iter(|| black_box(CubePlaneIntersection::new(black_box(plane))))
    });
}

pub fn intersect_rotating(c: &mut Criterion) {
    let planes: Vec<Plane> = normals(64)
        .into_iter()
        .filter_map(|n| Plane::new(n, 0.1))
        .collect();
    let mut intersection = CubePlaneIntersection::new(Plane::new(vector![1.0, 1.0, 1.0], 0.0).unwrap_or_default());

    c.bench_function("intersection, 64 oblique planes", |b| {
        b.iter(|| {
            for plane in &planes {
                intersection.change_plane(*plane);
                black_box(intersection.len());
            }
        })
    });
}
