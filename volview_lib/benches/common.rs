pub use nalgebra::{point, vector, Vector3};
pub use volview_lib::{
    geometry::{CubePlaneIntersection, Plane},
    premade::PremadeColorMaps,
    transfer::{ColorMapStore, ControlPointCurve},
};

/// Curve with a control point every `step` sample values
pub fn dense_curve(step: usize) -> ControlPointCurve {
    let points = (step..4095)
        .step_by(step)
        .map(|x| point![x as f32, ((x as f32) * 0.01).sin().abs()]);
    ControlPointCurve::from_points(points)
}

/// Plane normals spread over the sphere
pub fn normals(count: usize) -> Vec<Vector3<f32>> {
    (0..count)
        .map(|i| {
            let theta = i as f32 * 0.7;
            let phi = i as f32 * 0.3 + 0.1;
            vector![phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()]
        })
        .collect()
}
