//! Module with helper types
//! Stand-ins for the graphics API, used by unit and integration tests

use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
};

use nalgebra::Vector3;

use crate::{
    color::RGBA,
    error::{GpuError, ShaderStage},
    render::gpu::{
        AttributeData, DrawCall, GraphicsContext, ShaderProgram, ShaderSource, Texture,
        TextureStore, TransferTexture, UniformValue, VolumeTexture,
    },
};

/// Everything a view asked the GPU to do
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    CreateProgram(String),
    Clear(RGBA),
    EnableBlending,
    EnableClipDistance(u32),
    ActiveTexture(u32),
    BindProgram(String),
    ReleaseProgram(String),
    Uniform {
        program: String,
        name: String,
        value: UniformValue,
    },
    Attribute {
        program: String,
        name: String,
        data: AttributeData,
    },
    Draw {
        program: String,
        call: DrawCall,
    },
    BindVolume,
    ReleaseVolume,
    BindTransfer,
    ReleaseTransfer,
    UploadTransfer(Vec<RGBA>),
}

pub type GpuLog = Rc<RefCell<Vec<GpuCommand>>>;

/// Graphics context writing every call into a log
#[derive(Default)]
pub struct RecordingContext {
    log: GpuLog,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share log with other mocks, to see the order of all calls
    pub fn with_log(log: GpuLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> Ref<'_, Vec<GpuCommand>> {
        self.log.borrow()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn draw_count(&self) -> usize {
        self.draws().len()
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                GpuCommand::Draw { call, .. } => Some(call.clone()),
                _ => None,
            })
            .collect()
    }

    /// Last value set to uniform `name`
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.log.borrow().iter().rev().find_map(|c| match c {
            GpuCommand::Uniform { name: n, value, .. } if n == name => Some(value.clone()),
            _ => None,
        })
    }

    /// Last data set to attribute `name`
    pub fn attribute(&self, name: &str) -> Option<AttributeData> {
        self.log.borrow().iter().rev().find_map(|c| match c {
            GpuCommand::Attribute { name: n, data, .. } if n == name => Some(data.clone()),
            _ => None,
        })
    }

    fn push(&self, command: GpuCommand) {
        self.log.borrow_mut().push(command);
    }
}

impl GraphicsContext for RecordingContext {
    fn create_program(&mut self, source: &ShaderSource) -> Result<Box<dyn ShaderProgram>, GpuError> {
        self.push(GpuCommand::CreateProgram(source.name.to_string()));
        Ok(Box::new(RecordingProgram {
            name: source.name.to_string(),
            log: self.log.clone(),
        }))
    }

    fn clear(&mut self, color: RGBA) {
        self.push(GpuCommand::Clear(color));
    }

    fn enable_blending(&mut self) {
        self.push(GpuCommand::EnableBlending);
    }

    fn enable_clip_distance(&mut self, index: u32) {
        self.push(GpuCommand::EnableClipDistance(index));
    }

    fn active_texture(&mut self, unit: u32) {
        self.push(GpuCommand::ActiveTexture(unit));
    }

    fn draw(&mut self, program: &mut dyn ShaderProgram, call: &DrawCall) {
        self.push(GpuCommand::Draw {
            program: program.name().to_string(),
            call: call.clone(),
        });
    }
}

pub struct RecordingProgram {
    name: String,
    log: GpuLog,
}

impl ShaderProgram for RecordingProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&mut self) {
        self.log
            .borrow_mut()
            .push(GpuCommand::BindProgram(self.name.clone()));
    }

    fn release(&mut self) {
        self.log
            .borrow_mut()
            .push(GpuCommand::ReleaseProgram(self.name.clone()));
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.log.borrow_mut().push(GpuCommand::Uniform {
            program: self.name.clone(),
            name: name.to_string(),
            value,
        });
    }

    fn set_attribute(&mut self, name: &str, data: AttributeData) {
        self.log.borrow_mut().push(GpuCommand::Attribute {
            program: self.name.clone(),
            name: name.to_string(),
            data,
        });
    }
}

/// Context where no shader compiles
#[derive(Default)]
pub struct FailingContext {
    inner: RecordingContext,
}

impl FailingContext {
    pub fn draw_count(&self) -> usize {
        self.inner.draw_count()
    }
}

impl GraphicsContext for FailingContext {
    fn create_program(&mut self, source: &ShaderSource) -> Result<Box<dyn ShaderProgram>, GpuError> {
        Err(GpuError::Compile {
            stage: ShaderStage::Vertex,
            path: source.vertex.to_string(),
            log: "0:1: syntax error".to_string(),
        })
    }

    fn clear(&mut self, color: RGBA) {
        self.inner.clear(color)
    }

    fn enable_blending(&mut self) {
        self.inner.enable_blending()
    }

    fn enable_clip_distance(&mut self, index: u32) {
        self.inner.enable_clip_distance(index)
    }

    fn active_texture(&mut self, unit: u32) {
        self.inner.active_texture(unit)
    }

    fn draw(&mut self, program: &mut dyn ShaderProgram, call: &DrawCall) {
        self.inner.draw(program, call)
    }
}

pub struct MockVolume {
    dimensions: Cell<Vector3<u32>>,
    log: GpuLog,
}

impl Texture for MockVolume {
    fn bind(&self) {
        self.log.borrow_mut().push(GpuCommand::BindVolume);
    }

    fn release(&self) {
        self.log.borrow_mut().push(GpuCommand::ReleaseVolume);
    }
}

impl VolumeTexture for MockVolume {
    fn dimensions(&self) -> Vector3<u32> {
        self.dimensions.get()
    }
}

pub struct MockTransfer {
    log: GpuLog,
}

impl Texture for MockTransfer {
    fn bind(&self) {
        self.log.borrow_mut().push(GpuCommand::BindTransfer);
    }

    fn release(&self) {
        self.log.borrow_mut().push(GpuCommand::ReleaseTransfer);
    }
}

impl TransferTexture for MockTransfer {
    fn upload(&self, lut: &[RGBA]) {
        self.log
            .borrow_mut()
            .push(GpuCommand::UploadTransfer(lut.to_vec()));
    }
}

/// Texture store logging binds and uploads
pub struct MockTextures {
    volume: MockVolume,
    transfer: MockTransfer,
    log: GpuLog,
}

impl MockTextures {
    pub fn new(dimensions: Vector3<u32>) -> Self {
        Self::with_log(dimensions, GpuLog::default())
    }

    pub fn with_log(dimensions: Vector3<u32>, log: GpuLog) -> Self {
        Self {
            volume: MockVolume {
                dimensions: Cell::new(dimensions),
                log: log.clone(),
            },
            transfer: MockTransfer { log: log.clone() },
            log,
        }
    }

    pub fn set_dimensions(&self, dimensions: Vector3<u32>) {
        self.volume.dimensions.set(dimensions);
    }

    pub fn log(&self) -> Ref<'_, Vec<GpuCommand>> {
        self.log.borrow()
    }

    /// Content of the last upload
    pub fn last_upload(&self) -> Option<Vec<RGBA>> {
        self.log.borrow().iter().rev().find_map(|c| match c {
            GpuCommand::UploadTransfer(lut) => Some(lut.clone()),
            _ => None,
        })
    }
}

impl TextureStore for MockTextures {
    fn volume(&self) -> &dyn VolumeTexture {
        &self.volume
    }

    fn transfer_function(&self) -> &dyn TransferTexture {
        &self.transfer
    }
}
