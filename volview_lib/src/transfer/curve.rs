use nalgebra::{point, vector, Point2};

use crate::{color::RGBA, common::ValueRange};

use super::{ColorMap, MAX_SAMPLE_VALUE, TF_SAMPLES};

/// Point of the opacity curve
///
/// `x` is a sample value <0;4095>, `y` is opacity <0;1>
pub type ControlPoint = Point2<f32>;

/// Fixed first point of every curve, only `y` can change
pub const START_POINT: ControlPoint = point![0.0, 0.0];
/// Fixed last point of every curve, only `y` can change
pub const END_POINT: ControlPoint = point![MAX_SAMPLE_VALUE, 1.0];

const SAMPLE_DOMAIN: ValueRange = ValueRange::new(0.0, MAX_SAMPLE_VALUE);
const OPACITY_DOMAIN: ValueRange = ValueRange::new(0.0, 1.0);

/// Piecewise linear opacity curve defined by control points
///
/// Invariants:
/// * points are sorted by `x`, no two points share `x`
/// * first point has `x = 0`, last point has `x = 4095`
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointCurve {
    points: Vec<ControlPoint>,
}

impl ControlPointCurve {
    /// Curve with the two boundary points only, a linear ramp
    pub fn new() -> ControlPointCurve {
        ControlPointCurve {
            points: vec![START_POINT, END_POINT],
        }
    }

    /// Curve through `points`
    ///
    /// Boundary points are always present, points that cannot be added
    /// (duplicate `x`) are skipped.
    pub fn from_points(points: impl IntoIterator<Item = ControlPoint>) -> ControlPointCurve {
        let mut curve = ControlPointCurve::new();
        for point in points {
            let point = clamp_to_domain(point);
            if is_boundary_x(point.x) {
                let index = if point.x == START_POINT.x {
                    0
                } else {
                    curve.points.len() - 1
                };
                curve.replace(index, point);
            } else {
                curve.add_control_point(point);
            }
        }
        curve
    }

    /// Insert new point, clamped into the domain
    ///
    /// Returns `false` if a point with the same `x` already exists.
    pub fn add_control_point(&mut self, point: ControlPoint) -> bool {
        let point = clamp_to_domain(point);
        if self.points.iter().any(|p| p.x == point.x) {
            return false;
        }

        let index = self.points.partition_point(|p| p.x < point.x);
        self.points.insert(index, point);
        true
    }

    /// Remove point equal to `point`
    ///
    /// Boundary points are never removed. Returns `false` if nothing was removed.
    pub fn remove_control_point(&mut self, point: ControlPoint) -> bool {
        if is_boundary_x(point.x) {
            return false;
        }
        match self.index_of(point) {
            Some(index) => {
                self.points.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove point at `index`
    ///
    /// Returns removed point, `None` for boundary points and bad indices.
    pub fn remove_at(&mut self, index: usize) -> Option<ControlPoint> {
        if index == 0 || index + 1 >= self.points.len() {
            return None;
        }
        Some(self.points.remove(index))
    }

    /// Move point at `index` to `point`
    ///
    /// Boundary points keep their `x`, only `y` is taken.
    /// Other points are clamped into the domain and moved to their sorted position.
    ///
    /// Returns the new index of the point. `None` if `index` is out of range
    /// or the new `x` collides with another point.
    pub fn replace(&mut self, index: usize, point: ControlPoint) -> Option<usize> {
        let last = self.points.len().checked_sub(1)?;
        if index > last {
            return None;
        }

        let point = clamp_to_domain(point);

        if index == 0 || index == last {
            self.points[index].y = point.y;
            return Some(index);
        }

        let collides = self
            .points
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && p.x == point.x);
        if collides {
            return None;
        }

        self.points.remove(index);
        let new_index = self.points.partition_point(|p| p.x < point.x);
        self.points.insert(new_index, point);
        Some(new_index)
    }

    /// Back to the two boundary points
    pub fn reset(&mut self) {
        self.points.clear();
        self.points.push(START_POINT);
        self.points.push(END_POINT);
    }

    /// Ordered control points
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn index_of(&self, point: ControlPoint) -> Option<usize> {
        self.points.iter().position(|p| *p == point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`, boundary points cannot be removed
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Opacity at sample value `x`, `x` is clamped into the domain
    pub fn value_at(&self, x: f32) -> f32 {
        let x = SAMPLE_DOMAIN.clamp(x);
        let upper = self
            .points
            .partition_point(|p| p.x < x)
            .clamp(1, self.points.len() - 1);
        interpolate(self.points[upper - 1], self.points[upper], x)
    }

    /// Opacity for every sample value <0;4095>
    pub fn opacity_lut(&self) -> Vec<f32> {
        let mut lut = Vec::with_capacity(TF_SAMPLES);
        let mut upper = 1;

        for t in 0..TF_SAMPLES {
            let t = t as f32;
            while upper < self.points.len() - 1 && self.points[upper].x < t {
                upper += 1;
            }
            lut.push(interpolate(self.points[upper - 1], self.points[upper], t));
        }
        lut
    }

    /// Combine base colors with the opacity curve
    ///
    /// Color channels come from `color_map`, alpha from the curve.
    /// Result has [`TF_SAMPLES`] entries and is the content of the transfer texture.
    pub fn apply_transfer_function(&self, color_map: &ColorMap) -> Vec<RGBA> {
        color_map
            .samples()
            .iter()
            .zip(self.opacity_lut())
            .map(|(color, alpha)| vector![color.x, color.y, color.z, alpha])
            .collect()
    }
}

impl Default for ControlPointCurve {
    fn default() -> Self {
        Self::new()
    }
}

fn is_boundary_x(x: f32) -> bool {
    x == START_POINT.x || x == END_POINT.x
}

fn clamp_to_domain(point: ControlPoint) -> ControlPoint {
    point![SAMPLE_DOMAIN.clamp(point.x), OPACITY_DOMAIN.clamp(point.y)]
}

/// Line equation `y = mx + b` between `p0` and `p1`, evaluated at `t`
fn interpolate(p0: ControlPoint, p1: ControlPoint, t: f32) -> f32 {
    if t <= p0.x {
        return p0.y;
    }
    if t >= p1.x {
        return p1.y;
    }
    let m = (p1.y - p0.y) / (p1.x - p0.x);
    m * (t - p0.x) + p0.y
}
