use nalgebra::{point, vector, Point2, Point3, Unit, Vector3, Vector4};

/// Plane `dot(normal, p) + distance = 0`
///
/// Points with positive signed distance are on the kept side,
/// the same test the ray caster does with `gl_ClipDistance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Unit<Vector3<f32>>,
    distance: f32,
}

impl Plane {
    /// Construct plane from a normal and signed distance
    ///
    /// Normal is normalized, returns `None` for zero or non-finite normal.
    pub fn new(normal: Vector3<f32>, distance: f32) -> Option<Plane> {
        if !distance.is_finite() || normal.iter().any(|c| !c.is_finite()) {
            return None;
        }
        let normal = Unit::try_new(normal, f32::EPSILON)?;
        Some(Plane { normal, distance })
    }

    /// Construct plane from homogeneous equation `(a, b, c, d)`
    ///
    /// The equation does not have to be normalized.
    pub fn from_equation(equation: Vector4<f32>) -> Option<Plane> {
        let normal = equation.xyz();
        let length = normal.magnitude();
        if length <= f32::EPSILON {
            return None;
        }
        Plane::new(normal / length, equation.w / length)
    }

    /// Plane through `point` with `normal`
    pub fn from_point_normal(point: Point3<f32>, normal: Vector3<f32>) -> Option<Plane> {
        let normal = Unit::try_new(normal, f32::EPSILON)?;
        Plane::new(normal.into_inner(), -normal.dot(&point.coords))
    }

    pub fn normal(&self) -> Vector3<f32> {
        self.normal.into_inner()
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// `(a, b, c, d)` with unit `(a, b, c)`, value of the `clippingPlaneEquation` uniform
    pub fn equation(&self) -> Vector4<f32> {
        vector![self.normal.x, self.normal.y, self.normal.z, self.distance]
    }

    /// Positive on the kept side
    pub fn signed_distance(&self, point: &Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) + self.distance
    }

    /// Point of the plane closest to the origin
    pub fn origin(&self) -> Point3<f32> {
        Point3::from(-self.distance * self.normal.into_inner())
    }

    /// Same plane, other side kept
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: Unit::new_unchecked(-self.normal.into_inner()),
            distance: -self.distance,
        }
    }

    /// Same normal, moved to `distance`
    pub fn with_distance(&self, distance: f32) -> Plane {
        Plane {
            normal: self.normal,
            distance,
        }
    }

    /// Orthonormal in-plane axes `(u, v)` with `u x v = normal`
    ///
    /// `u` is derived from the world axis least aligned with the normal,
    /// so the basis changes continuously while the normal moves within one octant.
    pub fn basis(&self) -> (Vector3<f32>, Vector3<f32>) {
        let n = self.normal.into_inner();
        let abs = n.abs();
        let helper = if abs.x <= abs.y && abs.x <= abs.z {
            Vector3::x()
        } else if abs.y <= abs.z {
            Vector3::y()
        } else {
            Vector3::z()
        };

        let u = (helper - n * n.dot(&helper)).normalize();
        let v = n.cross(&u);
        (u, v)
    }

    /// Coordinates of `point` projected onto the plane, in the [`basis`](Plane::basis)
    pub fn project(&self, point: &Point3<f32>) -> Point2<f32> {
        let (u, v) = self.basis();
        point![u.dot(&point.coords), v.dot(&point.coords)]
    }
}

impl Default for Plane {
    /// Horizontal plane through the volume center, keeps the upper half
    fn default() -> Self {
        Plane {
            normal: Vector3::z_axis(),
            distance: 0.0,
        }
    }
}
