use nalgebra::{point, vector, Point3, Vector3};

/// Corner index pairs of the 12 box edges.
/// Indices follow the order of [`BoundBoxIterator`].
pub const CUBE_EDGES: [(usize, usize); 12] = [
    // bottom face
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    // top face
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    // vertical edges
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Axis aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    /// Unit cube centered at origin, `[-0.5,0.5]^3`
    ///
    /// Model space of the rendered volume, clipping planes are expressed in it.
    pub fn centered_unit() -> BoundBox {
        BoundBox {
            lower: point![-0.5, -0.5, -0.5],
            upper: point![0.5, 0.5, 0.5],
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.lower, &self.upper)
    }

    /// Radius of the bounding sphere
    pub fn circumradius(&self) -> f32 {
        0.5 * self.dims().magnitude()
    }

    /// All 8 corners
    pub fn corners(&self) -> [Point3<f32>; 8] {
        let mut corners = [self.lower; 8];
        for (slot, corner) in corners.iter_mut().zip(self.into_iter()) {
            *slot = corner;
        }
        corners
    }

    /// Endpoints of all 12 edges
    pub fn edges(&self) -> [(Point3<f32>, Point3<f32>); 12] {
        let corners = self.corners();
        CUBE_EDGES.map(|(a, b)| (corners[a], corners[b]))
    }

    /// Map a point of this box into `[0,1]^3`
    pub fn to_unit_coords(&self, pos: &Point3<f32>) -> Point3<f32> {
        let rel = (pos - self.lower).component_div(&self.dims());
        point![rel.x, rel.y, rel.z]
    }

    /// Scale that fits a volume of `dims` voxels into this box,
    /// keeping aspect ratio. Longest side is scaled to `1.0`.
    ///
    /// Zero sized volume yields identity scale.
    pub fn fit_scale(dims: Vector3<f32>) -> Vector3<f32> {
        let max_dim = dims.x.max(dims.y).max(dims.z);
        if max_dim > 0.0 {
            dims / max_dim
        } else {
            vector![1.0, 1.0, 1.0]
        }
    }
}

pub struct BoundBoxIterator {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
    state: u8,
}

impl Iterator for BoundBoxIterator {
    type Item = Point3<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        let p = match self.state {
            0 => self.lower,
            1 => point![self.upper.x, self.lower.y, self.lower.z],
            2 => point![self.upper.x, self.upper.y, self.lower.z],
            3 => point![self.lower.x, self.upper.y, self.lower.z],
            4 => point![self.lower.x, self.lower.y, self.upper.z],
            5 => point![self.upper.x, self.lower.y, self.upper.z],
            6 => self.upper,
            7 => point![self.lower.x, self.upper.y, self.upper.z],
            _ => return None,
        };
        self.state += 1;
        Some(p)
    }
}

impl IntoIterator for BoundBox {
    type Item = Point3<f32>;

    type IntoIter = BoundBoxIterator;

    fn into_iter(self) -> Self::IntoIter {
        BoundBoxIterator {
            lower: self.lower,
            upper: self.upper,
            state: 0,
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn edges_connect_neighbouring_corners() {
        let cube = BoundBox::centered_unit();
        for (a, b) in cube.edges() {
            // neighbours differ in exactly one coordinate
            let diff = b - a;
            let changed = diff.iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(changed, 1);
            assert_eq!(diff.magnitude(), 1.0);
        }
    }

    #[test]
    fn unit_coords() {
        let cube = BoundBox::centered_unit();

        assert_eq!(cube.to_unit_coords(&point![0.0, 0.0, 0.0]), point![0.5, 0.5, 0.5]);
        assert_eq!(cube.to_unit_coords(&cube.lower), point![0.0, 0.0, 0.0]);
        assert_eq!(cube.to_unit_coords(&cube.upper), point![1.0, 1.0, 1.0]);
    }

    #[test]
    fn corners_in_order() {
        let cube = BoundBox::centered_unit();
        let corners = cube.corners();

        assert_eq!(corners[0], point![-0.5, -0.5, -0.5]);
        assert_eq!(corners[6], point![0.5, 0.5, 0.5]);
        assert_eq!(corners[7], point![-0.5, 0.5, 0.5]);
        assert_eq!(cube.into_iter().count(), 8);
    }

    #[test]
    fn bounding_sphere() {
        let cube = BoundBox::centered_unit();

        assert_eq!(cube.center(), point![0.0, 0.0, 0.0]);
        assert_eq!(cube.circumradius(), 0.5 * 3.0_f32.sqrt());
    }

    #[test]
    fn fit_scale_keeps_aspect() {
        let scale = BoundBox::fit_scale(vector![256.0, 128.0, 64.0]);
        assert_eq!(scale, vector![1.0, 0.5, 0.25]);

        let scale = BoundBox::fit_scale(vector![0.0, 0.0, 0.0]);
        assert_eq!(scale, vector![1.0, 1.0, 1.0]);
    }
}
