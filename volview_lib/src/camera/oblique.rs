use nalgebra::{vector, Matrix4, Rotation3, Vector3};

use super::{apply_zoom, matrix_scale, Camera};

/// Camera of the oblique slice view
///
/// The slice is always seen face on, the camera only turns it around the view
/// axis (dial, degrees) and mirrors it. Flips are applied in the unrotated frame,
/// so flipping and rotating commute.
#[derive(Debug, Clone, PartialEq)]
pub struct ObliqueCamera {
    model_view: Matrix4<f32>,
    rotation: f32,
    horizontal_flipped: bool,
    vertical_flipped: bool,
}

impl ObliqueCamera {
    /// Slice of the unit cube fits the view whatever the plane orientation
    pub fn new() -> ObliqueCamera {
        ObliqueCamera {
            model_view: Matrix4::new_scaling(1.0 / 3.0_f32.sqrt()),
            rotation: 0.0,
            horizontal_flipped: false,
            vertical_flipped: false,
        }
    }

    /// Turn slice to `degrees`, replacing the previous angle
    pub fn rotate(&mut self, degrees: f32) {
        self.model_view *= rotation_z(self.rotation) * rotation_z(-degrees);
        self.rotation = degrees;
    }

    /// Current dial angle in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Mirror horizontally when `flip` is set
    ///
    /// Every call with `true` toggles, two calls restore the original image.
    pub fn flip_horizontal(&mut self, flip: bool) {
        if flip {
            self.mirror(vector![-1.0, 1.0, 1.0]);
            self.horizontal_flipped = !self.horizontal_flipped;
        }
    }

    /// Mirror vertically when `flip` is set, see [`flip_horizontal`](Self::flip_horizontal)
    pub fn flip_vertical(&mut self, flip: bool) {
        if flip {
            self.mirror(vector![1.0, -1.0, 1.0]);
            self.vertical_flipped = !self.vertical_flipped;
        }
    }

    /// Checkbox state, repeated calls with the same value do nothing
    pub fn set_horizontal_flipped(&mut self, flipped: bool) {
        self.flip_horizontal(flipped != self.horizontal_flipped);
    }

    pub fn set_vertical_flipped(&mut self, flipped: bool) {
        self.flip_vertical(flipped != self.vertical_flipped);
    }

    pub fn is_horizontal_flipped(&self) -> bool {
        self.horizontal_flipped
    }

    pub fn is_vertical_flipped(&self) -> bool {
        self.vertical_flipped
    }

    pub fn scale(&self) -> f32 {
        matrix_scale(&self.model_view)
    }

    /// Undo rotation, scale axes by `mirror`, rotate back
    fn mirror(&mut self, mirror: Vector3<f32>) {
        let rotation = self.rotation;
        self.rotate(0.0);
        self.model_view *= Matrix4::new_nonuniform_scaling(&mirror);
        self.rotate(rotation);
    }
}

impl Default for ObliqueCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for ObliqueCamera {
    fn model_view_matrix(&self) -> Matrix4<f32> {
        self.model_view
    }

    fn zoom(&mut self, factor: f32) -> bool {
        apply_zoom(&mut self.model_view, factor)
    }
}

fn rotation_z(degrees: f32) -> Matrix4<f32> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.to_radians()).to_homogeneous()
}

#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use nalgebra::point;

    use super::*;

    #[test]
    fn starts_scaled_to_fit() {
        let camera = ObliqueCamera::new();

        assert_relative_eq!(camera.scale(), 1.0 / 3.0_f32.sqrt(), epsilon = 1e-6);
        assert_eq!(camera.rotation(), 0.0);
    }

    #[test]
    fn rotation_replaces_previous_angle() {
        let mut a = ObliqueCamera::new();
        a.rotate(30.0);
        a.rotate(90.0);

        let mut b = ObliqueCamera::new();
        b.rotate(90.0);

        assert_relative_eq!(a.model_view_matrix(), b.model_view_matrix(), epsilon = 1e-6);
        // dial turns the image clockwise
        let x = b.model_view_matrix().transform_point(&point![1.0, 0.0, 0.0]);
        assert!(x.y < -0.5);
    }

    #[test]
    fn double_flip_restores() {
        let mut camera = ObliqueCamera::new();
        camera.rotate(40.0);
        let before = camera.model_view_matrix();

        camera.flip_horizontal(true);
        assert!(camera.is_horizontal_flipped());
        camera.flip_horizontal(true);

        assert!(!camera.is_horizontal_flipped());
        assert_eq!(camera.rotation(), 40.0);
        assert_relative_eq!(camera.model_view_matrix(), before, epsilon = 1e-6);
        assert_relative_eq!(camera.scale(), 1.0 / 3.0_f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn flip_false_is_noop() {
        let mut camera = ObliqueCamera::new();
        camera.flip_vertical(false);

        assert_eq!(camera, ObliqueCamera::new());
    }

    #[test]
    fn flip_commutes_with_rotation() {
        let mut a = ObliqueCamera::new();
        a.rotate(25.0);
        a.flip_vertical(true);

        let mut b = ObliqueCamera::new();
        b.flip_vertical(true);
        b.rotate(25.0);

        assert_relative_eq!(a.model_view_matrix(), b.model_view_matrix(), epsilon = 1e-6);
    }

    #[test]
    fn flip_mirrors_unrotated_axis() {
        let mut camera = ObliqueCamera::new();
        camera.rotate(90.0);
        camera.flip_horizontal(true);
        camera.rotate(0.0);

        let x = camera.model_view_matrix().transform_point(&point![1.0, 0.0, 0.0]);
        assert!(x.x < 0.0);
    }

    #[test]
    fn checkbox_setters_are_idempotent() {
        let mut camera = ObliqueCamera::new();

        camera.set_horizontal_flipped(true);
        let flipped = camera.model_view_matrix();
        camera.set_horizontal_flipped(true);

        assert_eq!(camera.model_view_matrix(), flipped);
        assert!(camera.is_horizontal_flipped());

        camera.set_horizontal_flipped(false);
        assert_relative_eq!(
            camera.model_view_matrix(),
            ObliqueCamera::new().model_view_matrix(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn zoom_rejects_invalid() {
        let mut camera = ObliqueCamera::new();

        assert!(!camera.zoom(0.0));
        assert!(camera.zoom(2.0));
        assert_relative_eq!(camera.scale(), 2.0 / 3.0_f32.sqrt(), epsilon = 1e-6);
    }
}
