//! Boundary to the graphics API
//!
//! Implemented by the windowing layer (or by mocks in tests).
//! Views call these in the same order a GL program would.

use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

use crate::{color::RGBA, error::GpuError};

/// Value of a shader uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
}

/// Per-vertex data of a shader attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
    Vec2(Vec<Point2<f32>>),
    Vec3(Vec<Point3<f32>>),
}

impl AttributeData {
    pub fn len(&self) -> usize {
        match self {
            AttributeData::Vec2(v) => v.len(),
            AttributeData::Vec3(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components per vertex
    pub fn components(&self) -> usize {
        match self {
            AttributeData::Vec2(_) => 2,
            AttributeData::Vec3(_) => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    TriangleFan,
}

/// One draw submission
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub vertex_count: usize,
    /// Indexed drawing if present
    pub indices: Option<Vec<u16>>,
}

/// Paths of the two stages of a shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource {
    pub name: &'static str,
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// Linked shader program
pub trait ShaderProgram {
    fn name(&self) -> &str;

    fn bind(&mut self);

    fn release(&mut self);

    /// Program must be bound
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Program must be bound
    fn set_attribute(&mut self, name: &str, data: AttributeData);
}

/// Graphics API of one surface
pub trait GraphicsContext {
    /// Compile and link `source`
    fn create_program(&mut self, source: &ShaderSource) -> Result<Box<dyn ShaderProgram>, GpuError>;

    fn clear(&mut self, color: RGBA);

    /// Alpha blending `src_alpha, 1 - src_alpha`
    fn enable_blending(&mut self);

    /// Enable `gl_ClipDistance[index]`
    fn enable_clip_distance(&mut self, index: u32);

    fn active_texture(&mut self, unit: u32);

    /// Draw with the bound `program`
    fn draw(&mut self, program: &mut dyn ShaderProgram, call: &DrawCall);
}

pub trait Texture {
    /// Bind to the active texture unit
    fn bind(&self);

    fn release(&self);
}

/// 3D texture of the volume samples
pub trait VolumeTexture: Texture {
    /// Sample count along each axis, zero if no volume is loaded
    fn dimensions(&self) -> Vector3<u32>;
}

/// 1D lookup table texture
pub trait TransferTexture: Texture {
    /// Replace content with `lut`
    fn upload(&self, lut: &[RGBA]);
}

/// Textures shared by all views of a session
pub trait TextureStore {
    fn volume(&self) -> &dyn VolumeTexture;

    fn transfer_function(&self) -> &dyn TransferTexture;
}
