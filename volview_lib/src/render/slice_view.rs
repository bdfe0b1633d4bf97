use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
};

use crate::{
    camera::{Camera, ObliqueCamera},
    color,
    common::Viewport,
    geometry::{CubeGeometry, CubePlaneIntersection},
    properties::{HubRef, Subscription},
};

use super::{
    gpu::{
        AttributeData, DrawCall, GraphicsContext, Primitive, ShaderProgram, ShaderSource,
        TextureStore, UniformValue,
    },
    uniforms, CameraSurface, Surface,
};

pub const SLICE_SHADER: ShaderSource = ShaderSource {
    name: "slice",
    vertex: "shaders/slice-vs.glsl",
    fragment: "shaders/slice-fs.glsl",
};

/// Oblique slice view
///
/// Shows the volume samples on the clipping plane, face on.
/// The slice polygon is recomputed whenever the hub plane changes.
pub struct SliceView {
    textures: Rc<dyn TextureStore>,
    camera: ObliqueCamera,
    viewport: Viewport,
    program: Option<Box<dyn ShaderProgram>>,
    intersection: Rc<RefCell<CubePlaneIntersection>>,
    dirty: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl SliceView {
    pub fn new(hub: &HubRef, textures: Rc<dyn TextureStore>) -> SliceView {
        let intersection = Rc::new(RefCell::new(CubePlaneIntersection::new(
            hub.clipping_plane().plane(),
        )));
        let dirty = Rc::new(Cell::new(true));

        let subscription = {
            let intersection = intersection.clone();
            let dirty = dirty.clone();
            hub.clipping_plane().on_changed(move |plane| {
                intersection.borrow_mut().change_plane(*plane);
                dirty.set(true);
            })
        };

        SliceView {
            textures,
            camera: ObliqueCamera::new(),
            viewport: Viewport::default(),
            program: None,
            intersection,
            dirty,
            _subscription: subscription,
        }
    }

    /// Current slice polygon
    pub fn intersection(&self) -> Ref<'_, CubePlaneIntersection> {
        self.intersection.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.program.is_some()
    }
}

impl Surface for SliceView {
    fn initialize(&mut self, gl: &mut dyn GraphicsContext) {
        CubeGeometry::instance();

        match gl.create_program(&SLICE_SHADER) {
            Ok(program) => self.program = Some(program),
            Err(e) => {
                tracing::error!("Slice view disabled: {e}");
                self.program = None;
            }
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.dirty.set(true);
    }

    fn paint(&mut self, gl: &mut dyn GraphicsContext) {
        let program = match self.program.as_mut() {
            Some(program) => program,
            None => return,
        };

        gl.clear(color::new(0.1, 0.1, 0.1, 1.0));
        self.dirty.set(false);

        let intersection = self.intersection.borrow();
        if intersection.is_empty() {
            tracing::debug!("Plane misses the volume, nothing to draw");
            return;
        }

        program.bind();
        program.set_uniform(
            uniforms::MODEL_VIEW_MATRIX,
            UniformValue::Mat4(self.camera.model_view_matrix()),
        );

        let volume = self.textures.volume();
        gl.active_texture(uniforms::VOLUME_TEXTURE_UNIT);
        program.set_uniform(
            uniforms::VOLUME_TEXTURE,
            UniformValue::Int(uniforms::VOLUME_TEXTURE_UNIT as i32),
        );
        volume.bind();

        program.set_attribute(
            uniforms::VERTEX_POSITION,
            AttributeData::Vec2(intersection.plane_coords()),
        );
        program.set_attribute(
            uniforms::TEX_COORD,
            AttributeData::Vec3(intersection.tex_coords()),
        );
        gl.draw(
            &mut **program,
            &DrawCall {
                primitive: Primitive::TriangleFan,
                vertex_count: intersection.len(),
                indices: None,
            },
        );

        gl.active_texture(uniforms::VOLUME_TEXTURE_UNIT);
        volume.release();
        program.release();
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn needs_redraw(&self) -> bool {
        self.dirty.get()
    }

    fn request_redraw(&mut self) {
        self.dirty.set(true);
    }
}

impl CameraSurface for SliceView {
    type Camera = ObliqueCamera;

    fn camera(&self) -> &ObliqueCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut ObliqueCamera {
        &mut self.camera
    }
}
