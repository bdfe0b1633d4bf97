//! Clipping plane and the geometry derived from it

mod cube;
mod intersection;
mod plane;

pub use cube::CubeGeometry;
pub use intersection::{CubePlaneIntersection, SliceVertex};
pub use plane::Plane;
