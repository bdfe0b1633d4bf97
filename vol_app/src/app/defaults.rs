//! # Default values
//!
//! Used when an argument is left out.

use nalgebra::{vector, Vector3, Vector4};
use volview_lib::{GradientMethod, Projection};

// Widget size, shared by all three widgets
pub const VIEWPORT_WIDTH: u32 = 512;
pub const VIEWPORT_HEIGHT: u32 = 512;

/// Same size as a 12 bit CT scan
pub const VOLUME_DIMS: Vector3<u32> = vector![256, 256, 113];

/// Scale of the volume in the ray casting view
pub const INITIAL_ZOOM: f32 = 1.0;
pub const PROJECTION: Projection = Projection::Perspective;
pub const GRADIENT_METHOD: GradientMethod = GradientMethod::CentralDifference;
pub const COLOR_MAP: &str = volview_lib::properties::DEFAULT_COLOR_MAP;

/// Horizontal plane through the volume center
pub const PLANE_EQUATION: Vector4<f32> = vector![0.0, 0.0, 1.0, 0.0];

/// Played when no script file is given
pub const DEMO_SCRIPT: &str = "\
# rotate the volume a bit
raycast press 256 256 primary
raycast move 300 220
raycast release 300 220 primary
raycast wheel 1

# tilt the clipping plane and look at the slice
plane 0.3 0 1 -0.1
slice dial 30
slice flip-horizontal on

# make mid values visible
editor press 256 50 primary
editor move 256 20
editor release 256 20 primary
colormap bone
gradient sobel
";
