//! Cameras of the ray casting and slice views
//!
//! Both cameras only produce a model-view matrix, the projection
//! is chosen separately, see [`Projection`].

use nalgebra::Matrix4;

mod arcball;
mod oblique;
mod projection;

pub use arcball::{arcball_rotation, arcball_vector, ArcballCamera, INITIAL_DISTANCE};
pub use oblique::ObliqueCamera;
pub use projection::{Projection, FAR_PLANE, FOV_DEGREES, NEAR_PLANE};

/// Scale change of one wheel step
pub const ZOOM_STEP: f32 = 1.1;

pub trait Camera {
    /// Matrix `M`, `M * model_space = view_space`
    fn model_view_matrix(&self) -> Matrix4<f32>;

    /// Scale the scene uniformly
    ///
    /// Returns `false` and does nothing for non-positive or non-finite factors.
    fn zoom(&mut self, factor: f32) -> bool;
}

/// Zoom factor of a wheel event
///
/// Scrolling away from the user zooms in by [`ZOOM_STEP`], towards the user zooms out.
pub fn zoom_factor_from_wheel(delta_y: f32) -> f32 {
    if delta_y > 0.0 {
        ZOOM_STEP
    } else if delta_y < 0.0 {
        1.0 / ZOOM_STEP
    } else {
        1.0
    }
}

/// Uniform scaling right-multiplied onto `matrix`
pub(crate) fn apply_zoom(matrix: &mut Matrix4<f32>, factor: f32) -> bool {
    if !factor.is_finite() || factor <= 0.0 {
        tracing::warn!(factor, "Rejected zoom factor");
        return false;
    }
    *matrix *= Matrix4::new_scaling(factor);
    true
}

/// Length of the transformed x axis, the uniform scale of an unsheared matrix
pub(crate) fn matrix_scale(matrix: &Matrix4<f32>) -> f32 {
    nalgebra::vector![matrix[(0, 0)], matrix[(1, 0)], matrix[(2, 0)]].magnitude()
}
