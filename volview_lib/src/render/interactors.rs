use nalgebra::Point2;

use crate::{
    camera::{zoom_factor_from_wheel, ArcballCamera, Camera, ObliqueCamera},
    common::{InputEvent, PointerButton},
};

use super::{CameraSurface, Interactor};

/// Rotate with primary drag, zoom with the wheel
#[derive(Debug, Default)]
pub struct ArcballInteractor {
    previous: Option<Point2<f32>>,
}

impl ArcballInteractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> Interactor<S> for ArcballInteractor
where
    S: CameraSurface<Camera = ArcballCamera>,
{
    fn handle_event(&mut self, surface: &mut S, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerPressed { position, .. } => {
                self.previous = Some(position);
                false
            }
            InputEvent::PointerMoved {
                position,
                primary_held,
            } => {
                // Newer sample supersedes the previous one
                let previous = self.previous.replace(position);
                match previous {
                    Some(previous) if primary_held && previous != position => {
                        let viewport = surface.viewport();
                        surface.camera_mut().drag(previous, position, &viewport)
                    }
                    _ => false,
                }
            }
            InputEvent::PointerReleased {
                button: PointerButton::Primary,
                ..
            } => {
                self.previous = None;
                false
            }
            InputEvent::Wheel { delta_y } => {
                surface.camera_mut().zoom(zoom_factor_from_wheel(delta_y))
            }
            _ => false,
        }
    }
}

/// Dial rotation, flip checkboxes and wheel zoom of the slice view
#[derive(Debug, Default)]
pub struct ObliqueInteractor;

impl<S> Interactor<S> for ObliqueInteractor
where
    S: CameraSurface<Camera = ObliqueCamera>,
{
    fn handle_event(&mut self, surface: &mut S, event: &InputEvent) -> bool {
        let camera = surface.camera_mut();
        match *event {
            InputEvent::Dial { degrees } => {
                camera.rotate(degrees.rem_euclid(360) as f32);
                true
            }
            InputEvent::FlipHorizontal(flipped) => {
                let changed = camera.is_horizontal_flipped() != flipped;
                camera.set_horizontal_flipped(flipped);
                changed
            }
            InputEvent::FlipVertical(flipped) => {
                let changed = camera.is_vertical_flipped() != flipped;
                camera.set_vertical_flipped(flipped);
                changed
            }
            InputEvent::Wheel { delta_y } => camera.zoom(zoom_factor_from_wheel(delta_y)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {

    use std::rc::Rc;

    use approx::assert_relative_eq;
    use nalgebra::{point, vector};

    use crate::{
        common::Viewport,
        properties::HubRef,
        render::{Interactive, RayCastView, RenderProperties, SliceView, Surface},
        test_helpers::MockTextures,
    };

    use super::*;

    fn raycast() -> (HubRef, Interactive<RayCastView, ArcballInteractor>) {
        let hub = HubRef::default();
        let textures = Rc::new(MockTextures::new(vector![2, 2, 2]));
        let mut view = RayCastView::new(&hub, textures, RenderProperties::default());
        view.resize(Viewport::new(100, 100));
        (hub, Interactive::new(view, ArcballInteractor::new()))
    }

    #[test]
    fn drag_rotates_camera() {
        let (_hub, mut view) = raycast();
        let before = view.surface().camera().model_view_matrix();

        view.handle_event(&InputEvent::PointerPressed {
            position: point![50.0, 50.0],
            button: PointerButton::Primary,
        });
        let changed = view.handle_event(&InputEvent::PointerMoved {
            position: point![70.0, 50.0],
            primary_held: true,
        });

        assert!(changed);
        assert!(view.needs_redraw());
        assert_ne!(view.surface().camera().model_view_matrix(), before);
    }

    #[test]
    fn move_without_button_does_nothing() {
        let (_hub, mut view) = raycast();
        let before = view.surface().camera().model_view_matrix();

        view.handle_event(&InputEvent::PointerMoved {
            position: point![10.0, 10.0],
            primary_held: false,
        });
        view.handle_event(&InputEvent::PointerMoved {
            position: point![90.0, 10.0],
            primary_held: false,
        });

        assert_eq!(view.surface().camera().model_view_matrix(), before);
    }

    #[test]
    fn wheel_zooms() {
        let (_hub, mut view) = raycast();

        view.handle_event(&InputEvent::Wheel { delta_y: 120.0 });
        assert_relative_eq!(view.surface().camera().scale(), 1.1, epsilon = 1e-6);

        view.handle_event(&InputEvent::Wheel { delta_y: -120.0 });
        assert_relative_eq!(view.surface().camera().scale(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn oblique_dial_and_flip() {
        let hub = HubRef::default();
        let view = SliceView::new(&hub, Rc::new(MockTextures::new(vector![2, 2, 2])));
        let mut view = Interactive::new(view, ObliqueInteractor);

        assert!(view.handle_event(&InputEvent::Dial { degrees: 370 }));
        assert_eq!(view.surface().camera().rotation(), 10.0);

        assert!(view.handle_event(&InputEvent::FlipVertical(true)));
        assert!(!view.handle_event(&InputEvent::FlipVertical(true)));
        assert!(view.surface().camera().is_vertical_flipped());
        assert_eq!(view.surface().camera().rotation(), 10.0);
    }
}
