use crate::{
    camera::Camera,
    common::{InputEvent, Viewport},
};

use super::gpu::GraphicsContext;

/// Something drawn into a window area
///
/// Call order follows the usual GL widget life cycle:
/// `initialize` once, then any mix of `resize` and `paint`.
pub trait Surface {
    /// Create GPU resources
    fn initialize(&mut self, gl: &mut dyn GraphicsContext);

    fn resize(&mut self, viewport: Viewport);

    /// Draw one frame, clears the redraw request
    fn paint(&mut self, gl: &mut dyn GraphicsContext);

    fn viewport(&self) -> Viewport;

    /// Has anything changed since the last paint
    fn needs_redraw(&self) -> bool;

    fn request_redraw(&mut self);
}

/// Surface viewed through a camera
pub trait CameraSurface: Surface {
    type Camera: Camera;

    fn camera(&self) -> &Self::Camera;

    fn camera_mut(&mut self) -> &mut Self::Camera;
}

/// Turns input events into surface changes
pub trait Interactor<S: Surface> {
    /// Returns `true` if the surface changed
    fn handle_event(&mut self, surface: &mut S, event: &InputEvent) -> bool;
}

/// Surface with an input strategy attached
pub struct Interactive<S, I> {
    surface: S,
    interactor: I,
}

impl<S, I> Interactive<S, I>
where
    S: Surface,
    I: Interactor<S>,
{
    pub fn new(surface: S, interactor: I) -> Self {
        Self {
            surface,
            interactor,
        }
    }

    /// Forward event to the interactor, request a redraw if it changed something
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        let changed = self.interactor.handle_event(&mut self.surface, event);
        if changed {
            self.surface.request_redraw();
        }
        changed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn interactor(&self) -> &I {
        &self.interactor
    }
}

impl<S, I> Surface for Interactive<S, I>
where
    S: Surface,
    I: Interactor<S>,
{
    fn initialize(&mut self, gl: &mut dyn GraphicsContext) {
        self.surface.initialize(gl)
    }

    fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport)
    }

    fn paint(&mut self, gl: &mut dyn GraphicsContext) {
        self.surface.paint(gl)
    }

    fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    fn needs_redraw(&self) -> bool {
        self.surface.needs_redraw()
    }

    fn request_redraw(&mut self) {
        self.surface.request_redraw()
    }
}
