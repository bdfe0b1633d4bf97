use nalgebra::{Point2, Point3, Vector3};

use crate::common::BoundBox;

use super::Plane;

/// Points closer than this are merged, happens when the plane
/// passes through a cube corner shared by several edges
const MERGE_EPSILON: f32 = 1e-5;

/// Vertex of the slice polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceVertex {
    /// Position in the centered cube `[-0.5,0.5]^3`
    pub position: Point3<f32>,
    /// Sampling position in the volume texture, `[0,1]^3`
    pub tex_coord: Point3<f32>,
    /// Position in the plane's own basis, see [`Plane::basis`]
    pub plane_coord: Point2<f32>,
}

/// Polygon cut out of the volume cube by a plane
///
/// Pure function of the plane, recomputed on every [`change_plane`](CubePlaneIntersection::change_plane).
/// Vertices are ordered counter-clockwise when looking against the plane normal,
/// so they can be drawn as a triangle fan.
#[derive(Debug, Clone, PartialEq)]
pub struct CubePlaneIntersection {
    plane: Plane,
    cube: BoundBox,
    vertices: Vec<SliceVertex>,
}

impl CubePlaneIntersection {
    pub fn new(plane: Plane) -> Self {
        let cube = BoundBox::centered_unit();
        let vertices = intersect(&plane, &cube);
        Self {
            plane,
            cube,
            vertices,
        }
    }

    /// Recompute polygon for a new plane
    pub fn change_plane(&mut self, plane: Plane) {
        self.plane = plane;
        self.vertices = intersect(&self.plane, &self.cube);
        tracing::trace!(vertices = self.vertices.len(), "Slice polygon recomputed");
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Ordered polygon, empty if the plane misses the cube
    pub fn vertices(&self) -> &[SliceVertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn positions(&self) -> Vec<Point3<f32>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn tex_coords(&self) -> Vec<Point3<f32>> {
        self.vertices.iter().map(|v| v.tex_coord).collect()
    }

    pub fn plane_coords(&self) -> Vec<Point2<f32>> {
        self.vertices.iter().map(|v| v.plane_coord).collect()
    }

    /// Triangles of the fan around the first vertex
    pub fn fan_triangles(&self) -> Vec<[usize; 3]> {
        (1..self.vertices.len().saturating_sub(1))
            .map(|i| [0, i, i + 1])
            .collect()
    }
}

/// Intersect `plane` with the edges of `cube`
///
/// Returns 3 to 6 ordered vertices, or nothing.
fn intersect(plane: &Plane, cube: &BoundBox) -> Vec<SliceVertex> {
    // Plane misses the bounding sphere
    if plane.signed_distance(&cube.center()).abs() > cube.circumradius() {
        return Vec::new();
    }

    let mut points: Vec<Point3<f32>> = Vec::with_capacity(6);

    for (p0, p1) in cube.edges() {
        let d0 = plane.signed_distance(&p0);
        let d1 = plane.signed_distance(&p1);

        if d0 == 0.0 {
            push_unique(&mut points, p0);
        }
        if d1 == 0.0 {
            push_unique(&mut points, p1);
        }
        if d0 * d1 < 0.0 {
            let t = d0 / (d0 - d1);
            push_unique(&mut points, p0 + (p1 - p0) * t);
        }
    }

    // Touching a corner or an edge does not make a polygon
    if points.len() < 3 {
        return Vec::new();
    }

    let (u, v) = plane.basis();
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    let centroid = Point3::from(sum / points.len() as f32);

    let mut vertices: Vec<(f32, SliceVertex)> = points
        .into_iter()
        .map(|p| {
            let rel = p - centroid;
            let angle = rel.dot(&v).atan2(rel.dot(&u));
            let vertex = SliceVertex {
                position: p,
                tex_coord: cube.to_unit_coords(&p),
                plane_coord: plane.project(&p),
            };
            (angle, vertex)
        })
        .collect();

    vertices.sort_by(|a, b| a.0.total_cmp(&b.0));
    vertices.into_iter().map(|(_, vertex)| vertex).collect()
}

fn push_unique(points: &mut Vec<Point3<f32>>, point: Point3<f32>) {
    let duplicate = points
        .iter()
        .any(|p| (p - point).magnitude_squared() < MERGE_EPSILON * MERGE_EPSILON);
    if !duplicate {
        points.push(point);
    }
}
