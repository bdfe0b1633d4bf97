use std::sync::OnceLock;

use nalgebra::Point3;

use crate::common::BoundBox;

/// Corner indices of the six faces, counter-clockwise seen from outside
const FACES: [[u16; 4]; 6] = [
    [0, 3, 2, 1], // z-
    [4, 5, 6, 7], // z+
    [0, 1, 5, 4], // y-
    [3, 7, 6, 2], // y+
    [0, 4, 7, 3], // x-
    [1, 2, 6, 5], // x+
];

/// Mesh of the volume bounding cube
///
/// Front faces of this mesh start the rays of the ray caster.
/// One instance per process, built on first use and never modified.
#[derive(Debug)]
pub struct CubeGeometry {
    vertices: [Point3<f32>; 8],
    indices: Vec<u16>,
}

impl CubeGeometry {
    /// Shared instance
    pub fn instance() -> &'static CubeGeometry {
        static INSTANCE: OnceLock<CubeGeometry> = OnceLock::new();
        INSTANCE.get_or_init(CubeGeometry::build)
    }

    fn build() -> CubeGeometry {
        let vertices = BoundBox::centered_unit().corners();
        let indices = FACES
            .iter()
            .flat_map(|[a, b, c, d]| [*a, *b, *c, *a, *c, *d])
            .collect();
        tracing::debug!("Cube geometry initialized");
        CubeGeometry { vertices, indices }
    }

    /// Corners of the centered unit cube
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Triangle list, 12 triangles
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}
