use std::cell::Cell;

use nalgebra::Vector4;

use crate::geometry::Plane;

use super::{Signal, Subscription};

/// Observable clipping plane
pub struct ClippingPlaneProperty {
    plane: Cell<Plane>,
    changed: Signal<Plane>,
}

impl ClippingPlaneProperty {
    pub fn new(plane: Plane) -> Self {
        Self {
            plane: Cell::new(plane),
            changed: Signal::new(),
        }
    }

    pub fn plane(&self) -> Plane {
        self.plane.get()
    }

    /// Homogeneous equation of the current plane
    pub fn equation(&self) -> Vector4<f32> {
        self.plane.get().equation()
    }

    /// Set plane and notify subscribers
    ///
    /// Returns `false` (and stays silent) if the plane did not change.
    pub fn set_plane(&self, plane: Plane) -> bool {
        if self.plane.get() == plane {
            return false;
        }
        self.plane.set(plane);
        tracing::debug!(equation = ?plane.equation(), "Clipping plane changed");
        self.changed.emit(&plane);
        true
    }

    /// Set plane from a homogeneous equation
    ///
    /// Degenerate equations are rejected.
    pub fn set_equation(&self, equation: Vector4<f32>) -> bool {
        match Plane::from_equation(equation) {
            Some(plane) => self.set_plane(plane),
            None => {
                tracing::warn!(?equation, "Rejected degenerate plane equation");
                false
            }
        }
    }

    /// Move the plane along its normal
    pub fn set_distance(&self, distance: f32) -> bool {
        if !distance.is_finite() {
            tracing::warn!(distance, "Rejected plane distance");
            return false;
        }
        self.set_plane(self.plane.get().with_distance(distance))
    }

    pub fn on_changed<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&Plane) + 'static,
    {
        self.changed.connect(callback)
    }
}

impl Default for ClippingPlaneProperty {
    fn default() -> Self {
        Self::new(Plane::default())
    }
}
