use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use nalgebra::{Matrix4, Vector3, Vector4};

use crate::{
    camera::{ArcballCamera, Camera, Projection},
    color,
    common::{BoundBox, Viewport},
    geometry::CubeGeometry,
    properties::{GradientMethod, HubRef, Subscription},
};

use super::{
    gpu::{
        AttributeData, DrawCall, GraphicsContext, Primitive, ShaderProgram, ShaderSource,
        TextureStore, UniformValue,
    },
    uniforms, CameraSurface, Surface,
};

pub const CUBE_SHADER: ShaderSource = ShaderSource {
    name: "cube",
    vertex: "shaders/cube-vs.glsl",
    fragment: "shaders/cube-fs.glsl",
};

/// Initial settings of a [`RayCastView`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderProperties {
    pub zoom_factor: f32,
    pub projection: Projection,
}

impl Default for RenderProperties {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            projection: Projection::Perspective,
        }
    }
}

/// Hub derived state, written by signal callbacks
struct HubState {
    clip_equation: Cell<Vector4<f32>>,
    gradient_method: Cell<GradientMethod>,
    color_map: RefCell<String>,
    dirty: Cell<bool>,
}

/// Ray casting view of the whole volume
///
/// Draws the front faces of the volume cube, the fragment shader marches
/// through the volume. Parts on the negative side of the clipping plane are
/// cut away with `gl_ClipDistance`.
pub struct RayCastView {
    textures: Rc<dyn TextureStore>,
    camera: ArcballCamera,
    projection: Projection,
    projection_matrix: Matrix4<f32>,
    box_scaling: Matrix4<f32>,
    viewport: Viewport,
    program: Option<Box<dyn ShaderProgram>>,
    state: Rc<HubState>,
    _subscriptions: Vec<Subscription>,
}

impl RayCastView {
    pub fn new(
        hub: &HubRef,
        textures: Rc<dyn TextureStore>,
        properties: RenderProperties,
    ) -> RayCastView {
        let state = Rc::new(HubState {
            clip_equation: Cell::new(hub.clipping_plane().equation()),
            gradient_method: Cell::new(hub.gradient().method()),
            color_map: RefCell::new(hub.transfer_function().color_map_name()),
            dirty: Cell::new(true),
        });

        let subscriptions = vec![
            {
                let state = state.clone();
                hub.clipping_plane().on_changed(move |plane| {
                    state.clip_equation.set(plane.equation());
                    state.dirty.set(true);
                })
            },
            {
                let state = state.clone();
                hub.gradient().on_changed(move |method| {
                    state.gradient_method.set(*method);
                    state.dirty.set(true);
                })
            },
            {
                let state = state.clone();
                hub.transfer_function()
                    .on_transfer_function_changed(move |_| state.dirty.set(true))
            },
            {
                let state = state.clone();
                hub.transfer_function().on_color_map_changed(move |name| {
                    *state.color_map.borrow_mut() = name.clone();
                    state.dirty.set(true);
                })
            },
        ];

        let viewport = Viewport::default();
        let mut view = RayCastView {
            textures,
            camera: ArcballCamera::new(properties.zoom_factor),
            projection: properties.projection,
            projection_matrix: Matrix4::identity(),
            box_scaling: Matrix4::identity(),
            viewport,
            program: None,
            state,
            _subscriptions: subscriptions,
        };
        view.resize(viewport);
        let dimensions = view.textures.volume().dimensions().cast::<f32>();
        view.volume_dimensions_changed(dimensions);
        view
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.update_projection();
    }

    /// Keep aspect ratio of the volume, the longest side spans the unit cube
    pub fn volume_dimensions_changed(&mut self, dimensions: Vector3<f32>) {
        self.box_scaling = Matrix4::new_nonuniform_scaling(&BoundBox::fit_scale(dimensions));
        tracing::debug!(?dimensions, "Box scaling updated");
        self.state.dirty.set(true);
    }

    pub fn volume_loaded(&mut self) {
        self.state.dirty.set(true);
    }

    /// Equation last received from the hub
    pub fn clip_equation(&self) -> Vector4<f32> {
        self.state.clip_equation.get()
    }

    pub fn gradient_method(&self) -> GradientMethod {
        self.state.gradient_method.get()
    }

    /// Name of the color map the transfer texture currently holds
    pub fn color_map(&self) -> String {
        self.state.color_map.borrow().clone()
    }

    pub fn box_scaling(&self) -> Matrix4<f32> {
        self.box_scaling
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    /// `projection * model_view * box_scaling`
    pub fn model_view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix * self.camera.model_view_matrix() * self.box_scaling
    }

    /// Was the shader program created
    pub fn is_ready(&self) -> bool {
        self.program.is_some()
    }

    fn update_projection(&mut self) {
        self.projection_matrix = self.projection.matrix(self.viewport.aspect());
        self.state.dirty.set(true);
    }
}

impl Surface for RayCastView {
    fn initialize(&mut self, gl: &mut dyn GraphicsContext) {
        gl.enable_clip_distance(0);
        CubeGeometry::instance();

        match gl.create_program(&CUBE_SHADER) {
            Ok(program) => self.program = Some(program),
            Err(e) => {
                tracing::error!("Ray casting disabled: {e}");
                self.program = None;
            }
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.update_projection();
    }

    fn paint(&mut self, gl: &mut dyn GraphicsContext) {
        let mvp = self.model_view_projection();
        let model_view = self.camera.model_view_matrix();
        let program = match self.program.as_mut() {
            Some(program) => program,
            None => return,
        };

        gl.clear(color::new(0.95, 0.95, 0.95, 1.0));
        gl.enable_blending();

        program.bind();
        program.set_uniform(
            uniforms::CLIPPING_PLANE_EQUATION,
            UniformValue::Vec4(self.state.clip_equation.get()),
        );
        program.set_uniform(uniforms::MODEL_VIEW_PROJECTION_MATRIX, UniformValue::Mat4(mvp));
        program.set_uniform(uniforms::MODEL_VIEW_MATRIX, UniformValue::Mat4(model_view));
        program.set_uniform(
            uniforms::GRADIENT_METHOD,
            UniformValue::Int(self.state.gradient_method.get().code()),
        );

        let volume = self.textures.volume();
        let transfer_function = self.textures.transfer_function();
        let dims = volume.dimensions();
        program.set_uniform(uniforms::WIDTH, UniformValue::Int(dims.x as i32));
        program.set_uniform(uniforms::HEIGHT, UniformValue::Int(dims.y as i32));
        program.set_uniform(uniforms::DEPTH, UniformValue::Int(dims.z as i32));

        gl.active_texture(uniforms::VOLUME_TEXTURE_UNIT);
        program.set_uniform(
            uniforms::VOLUME_TEXTURE,
            UniformValue::Int(uniforms::VOLUME_TEXTURE_UNIT as i32),
        );
        volume.bind();

        gl.active_texture(uniforms::TRANSFER_FUNCTION_UNIT);
        program.set_uniform(
            uniforms::TRANSFER_FUNCTION,
            UniformValue::Int(uniforms::TRANSFER_FUNCTION_UNIT as i32),
        );
        transfer_function.bind();

        let cube = CubeGeometry::instance();
        program.set_attribute(
            uniforms::VERTEX_POSITION,
            AttributeData::Vec3(cube.vertices().to_vec()),
        );
        gl.draw(
            &mut **program,
            &DrawCall {
                primitive: Primitive::Triangles,
                vertex_count: cube.indices().len(),
                indices: Some(cube.indices().to_vec()),
            },
        );

        gl.active_texture(uniforms::TRANSFER_FUNCTION_UNIT);
        transfer_function.release();
        gl.active_texture(uniforms::VOLUME_TEXTURE_UNIT);
        volume.release();
        program.release();

        self.state.dirty.set(false);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn needs_redraw(&self) -> bool {
        self.state.dirty.get()
    }

    fn request_redraw(&mut self) {
        self.state.dirty.set(true);
    }
}

impl CameraSurface for RayCastView {
    type Camera = ArcballCamera;

    fn camera(&self) -> &ArcballCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut ArcballCamera {
        &mut self.camera
    }
}
