use nalgebra::{vector, Matrix4, Point2, Rotation3, Unit, Vector3};

use crate::common::Viewport;

use super::{apply_zoom, matrix_scale, Camera};

/// Distance of the camera from the volume center, the unit cube fits the view
pub const INITIAL_DISTANCE: f32 = 2.0 * 1.732_050_8;

/// Project pointer position onto the arcball
///
/// Position is mapped to `[-1,1]^2`, inside the unit disk it is lifted onto
/// the hemisphere, outside it is pushed to the disk edge.
pub fn arcball_vector(position: Point2<f32>, viewport: &Viewport) -> Vector3<f32> {
    let ndc = viewport.to_ndc(position.x, position.y);
    let length2 = ndc.x * ndc.x + ndc.y * ndc.y;

    if length2 < 1.0 {
        vector![ndc.x, ndc.y, (1.0 - length2).sqrt()]
    } else {
        vector![ndc.x, ndc.y, 0.0].normalize()
    }
}

/// Rotation taking arcball vector `va` to `vb`, as `(angle, axis)`
///
/// `None` if the vectors are equal or parallel.
pub fn arcball_rotation(va: Vector3<f32>, vb: Vector3<f32>) -> Option<(f32, Vector3<f32>)> {
    if va == vb {
        return None;
    }
    let angle = va.dot(&vb).clamp(-1.0, 1.0).acos();
    let axis = va.cross(&vb);
    if axis.magnitude_squared() <= f32::EPSILON * f32::EPSILON {
        return None;
    }
    Some((angle, axis))
}

/// Camera of the ray casting view
///
/// Rotates the volume around its center in response to pointer drags.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcballCamera {
    model_view: Matrix4<f32>,
    initial_zoom: f32,
}

impl ArcballCamera {
    /// Camera looking at the volume from [`INITIAL_DISTANCE`], scaled by `zoom`
    pub fn new(zoom: f32) -> ArcballCamera {
        let mut camera = ArcballCamera {
            model_view: Matrix4::identity(),
            initial_zoom: zoom,
        };
        camera.reset();
        camera
    }

    /// Back to the initial position and zoom
    pub fn reset(&mut self) {
        self.model_view = Matrix4::new_translation(&vector![0.0, 0.0, -INITIAL_DISTANCE]);
        apply_zoom(&mut self.model_view, self.initial_zoom);
    }

    /// Rotate by `angle` (radians) around `axis` given in view space
    ///
    /// Axis is moved to model space by the inverse model-view, so the rotation
    /// appears to happen around the screen axis whatever the current orientation.
    /// Returns `false` if nothing was rotated.
    pub fn rotate(&mut self, angle: f32, axis: Vector3<f32>) -> bool {
        let inverse = match self.model_view.try_inverse() {
            Some(inverse) => inverse,
            None => {
                tracing::warn!("Model-view matrix is singular, rotation skipped");
                return false;
            }
        };

        let transformed = inverse * axis.push(0.0);
        let axis = match Unit::try_new(transformed.xyz(), f32::EPSILON) {
            Some(axis) => axis,
            None => return false,
        };

        self.model_view *= Rotation3::from_axis_angle(&axis, angle).to_homogeneous();
        true
    }

    /// Rotate by a pointer drag from `from` to `to`, in widget pixels
    pub fn drag(&mut self, from: Point2<f32>, to: Point2<f32>, viewport: &Viewport) -> bool {
        let va = arcball_vector(from, viewport);
        let vb = arcball_vector(to, viewport);

        match arcball_rotation(va, vb) {
            Some((angle, axis)) => self.rotate(angle, axis),
            None => false,
        }
    }

    /// Current uniform scale
    pub fn scale(&self) -> f32 {
        matrix_scale(&self.model_view)
    }
}

impl Default for ArcballCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Camera for ArcballCamera {
    fn model_view_matrix(&self) -> Matrix4<f32> {
        self.model_view
    }

    fn zoom(&mut self, factor: f32) -> bool {
        apply_zoom(&mut self.model_view, factor)
    }
}
