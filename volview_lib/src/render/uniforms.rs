//! Names shared with the shader programs
//!
//! Must match the GLSL sources exactly.

pub const CLIPPING_PLANE_EQUATION: &str = "clippingPlaneEquation";
pub const MODEL_VIEW_PROJECTION_MATRIX: &str = "modelViewProjectionMatrix";
pub const MODEL_VIEW_MATRIX: &str = "modelViewMatrix";
pub const GRADIENT_METHOD: &str = "gradientMethod";
pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const DEPTH: &str = "depth";
pub const VOLUME_TEXTURE: &str = "volumeTexture";
pub const TRANSFER_FUNCTION: &str = "transferFunction";

/// Texture unit of the volume
pub const VOLUME_TEXTURE_UNIT: u32 = 0;
/// Texture unit of the transfer function lookup table
pub const TRANSFER_FUNCTION_UNIT: u32 = 1;

// Vertex attributes
pub const VERTEX_POSITION: &str = "vertexPosition";
pub const TEX_COORD: &str = "texCoord";
