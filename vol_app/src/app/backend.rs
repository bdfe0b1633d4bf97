//! Graphics backend without a window
//!
//! Accepts everything a view submits and logs it, the draw stream
//! is the output of a session.

use std::cell::{Cell, RefCell};

use nalgebra::Vector3;
use volview_lib::{
    color::{self, RGBA},
    error::GpuError,
    render::gpu::{
        AttributeData, DrawCall, GraphicsContext, ShaderProgram, ShaderSource, Texture,
        TextureStore, TransferTexture, UniformValue, VolumeTexture,
    },
};

#[derive(Debug, Default)]
pub struct HeadlessContext {
    programs: usize,
    draws: u64,
    vertices: u64,
}

impl HeadlessContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_count(&self) -> usize {
        self.programs
    }

    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Vertices submitted by all draws
    pub fn vertex_count(&self) -> u64 {
        self.vertices
    }
}

impl GraphicsContext for HeadlessContext {
    fn create_program(&mut self, source: &ShaderSource) -> Result<Box<dyn ShaderProgram>, GpuError> {
        self.programs += 1;
        tracing::info!(
            program = source.name,
            vertex = source.vertex,
            fragment = source.fragment,
            "Shader program linked"
        );
        Ok(Box::new(HeadlessProgram {
            name: source.name.to_string(),
            uniforms: 0,
        }))
    }

    fn clear(&mut self, color: RGBA) {
        tracing::trace!(?color, "Clear");
    }

    fn enable_blending(&mut self) {}

    fn enable_clip_distance(&mut self, index: u32) {
        tracing::debug!(index, "Clip distance enabled");
    }

    fn active_texture(&mut self, _unit: u32) {}

    fn draw(&mut self, program: &mut dyn ShaderProgram, call: &DrawCall) {
        self.draws += 1;
        self.vertices += call.vertex_count as u64;
        tracing::info!(
            program = program.name(),
            primitive = ?call.primitive,
            vertices = call.vertex_count,
            indexed = call.indices.is_some(),
            "Draw"
        );
    }
}

struct HeadlessProgram {
    name: String,
    uniforms: usize,
}

impl ShaderProgram for HeadlessProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&mut self) {
        self.uniforms = 0;
    }

    fn release(&mut self) {
        tracing::trace!(program = %self.name, uniforms = self.uniforms, "Program released");
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms += 1;
        match value {
            UniformValue::Mat4(_) => tracing::trace!(program = %self.name, name, "Uniform mat4"),
            other => tracing::trace!(program = %self.name, name, value = ?other, "Uniform"),
        }
    }

    fn set_attribute(&mut self, name: &str, data: AttributeData) {
        tracing::trace!(
            program = %self.name,
            name,
            vertices = data.len(),
            components = data.components(),
            "Attribute"
        );
    }
}

struct HeadlessVolume {
    dimensions: Cell<Vector3<u32>>,
}

impl Texture for HeadlessVolume {
    fn bind(&self) {}

    fn release(&self) {}
}

impl VolumeTexture for HeadlessVolume {
    fn dimensions(&self) -> Vector3<u32> {
        self.dimensions.get()
    }
}

/// Texels as they would be sent with `glTexImage1D`
struct HeadlessTransfer {
    texels: RefCell<Vec<f32>>,
    uploads: Cell<u64>,
}

impl Texture for HeadlessTransfer {
    fn bind(&self) {}

    fn release(&self) {}
}

impl TransferTexture for HeadlessTransfer {
    fn upload(&self, lut: &[RGBA]) {
        let texels = color::flatten(lut);
        tracing::debug!(entries = lut.len(), floats = texels.len(), "Transfer texture uploaded");
        *self.texels.borrow_mut() = texels;
        self.uploads.set(self.uploads.get() + 1);
    }
}

/// Volume and transfer function textures
pub struct HeadlessTextures {
    volume: HeadlessVolume,
    transfer: HeadlessTransfer,
}

impl HeadlessTextures {
    pub fn new(dimensions: Vector3<u32>) -> Self {
        Self {
            volume: HeadlessVolume {
                dimensions: Cell::new(dimensions),
            },
            transfer: HeadlessTransfer {
                texels: RefCell::new(Vec::new()),
                uploads: Cell::new(0),
            },
        }
    }

    /// Replace volume, views have to be told with `volume_dimensions_changed`
    pub fn load_volume(&self, dimensions: Vector3<u32>) {
        tracing::info!(?dimensions, "Volume loaded");
        self.volume.dimensions.set(dimensions);
    }

    pub fn upload_count(&self) -> u64 {
        self.transfer.uploads.get()
    }

    /// RGBA of one transfer texture entry
    pub fn transfer_texel(&self, index: usize) -> Option<RGBA> {
        let texels = self.transfer.texels.borrow();
        let start = index * 4;
        texels
            .get(start..start + 4)
            .map(|t| color::new(t[0], t[1], t[2], t[3]))
    }
}

impl TextureStore for HeadlessTextures {
    fn volume(&self) -> &dyn VolumeTexture {
        &self.volume
    }

    fn transfer_function(&self) -> &dyn TransferTexture {
        &self.transfer
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;
    use volview_lib::render::gpu::Primitive;

    use super::*;

    #[test]
    fn counts_draws() {
        let mut gl = HeadlessContext::new();
        let source = ShaderSource {
            name: "test",
            vertex: "a.glsl",
            fragment: "b.glsl",
        };
        let mut program = gl.create_program(&source).unwrap();
        let call = DrawCall {
            primitive: Primitive::TriangleFan,
            vertex_count: 5,
            indices: None,
        };

        gl.draw(&mut *program, &call);
        gl.draw(&mut *program, &call);

        assert_eq!(gl.draw_count(), 2);
        assert_eq!(gl.vertex_count(), 10);
    }

    #[test]
    fn upload_keeps_flat_texels() {
        let textures = HeadlessTextures::new(vector![8, 8, 8]);
        assert_eq!(textures.transfer_texel(0), None);

        textures
            .transfer_function()
            .upload(&[color::new(0.1, 0.2, 0.3, 0.4), color::new(1.0, 1.0, 1.0, 1.0)]);

        assert_eq!(textures.upload_count(), 1);
        assert_eq!(textures.transfer_texel(0), Some(color::new(0.1, 0.2, 0.3, 0.4)));
        assert_eq!(textures.transfer_texel(2), None);
    }

    #[test]
    fn volume_reload() {
        let textures = HeadlessTextures::new(vector![8, 8, 8]);
        textures.load_volume(vector![16, 8, 4]);
        assert_eq!(textures.volume().dimensions(), vector![16, 8, 4]);
    }
}
