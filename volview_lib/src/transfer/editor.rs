use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use nalgebra::{point, Point2};

use crate::{
    common::{InputEvent, PointerButton, ValueRange, Viewport},
    properties::{HubRef, Subscription},
};

use super::{ControlPoint, Histogram, MAX_SAMPLE_VALUE};

/// Pointer must be this close (in pixels) to grab a control point
const HIT_RADIUS: f32 = 6.0;

const SAMPLE_DOMAIN: ValueRange = ValueRange::new(0.0, MAX_SAMPLE_VALUE);
const OPACITY_DOMAIN: ValueRange = ValueRange::new(0.0, 1.0);

/// What the transfer function chart shows
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    /// Copy of the hub curve, refreshed on every change
    pub points: Vec<ControlPoint>,
    /// Point being dragged
    pub selected: Option<usize>,
    /// Histogram line drawn under the curve
    pub histogram: Vec<Point2<f32>>,
}

/// Interaction model of the transfer function chart
///
/// Primary click grabs the nearest point or adds a new one, dragging moves
/// the grabbed point, secondary click removes a point.
/// All edits go through the hub, the editor only mirrors its curve.
pub struct TransferEditor {
    hub: HubRef,
    viewport: Viewport,
    state: Rc<RefCell<EditorState>>,
    _subscription: Subscription,
}

impl TransferEditor {
    pub fn new(hub: HubRef, viewport: Viewport) -> TransferEditor {
        let state = Rc::new(RefCell::new(EditorState {
            points: hub.transfer_function().control_points(),
            selected: None,
            histogram: Histogram::new().series(),
        }));

        let weak_hub = hub.downgrade();
        let weak_state = Rc::downgrade(&state);
        let subscription = hub.transfer_function().on_transfer_function_changed(move |_| {
            if let (Some(hub), Some(state)) = (weak_hub.upgrade(), weak_state.upgrade()) {
                let mut state = state.borrow_mut();
                state.points = hub.transfer_function().control_points();
                if matches!(state.selected, Some(i) if i >= state.points.len()) {
                    state.selected = None;
                }
            }
        });

        TransferEditor {
            hub,
            viewport,
            state,
            _subscription: subscription,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_histogram(&mut self, histogram: &Histogram) {
        self.state.borrow_mut().histogram = histogram.series();
    }

    pub fn state(&self) -> Ref<'_, EditorState> {
        self.state.borrow()
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.borrow().selected
    }

    /// React to pointer input
    ///
    /// Returns `true` if the chart needs a repaint.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerPressed {
                position,
                button: PointerButton::Primary,
            } => self.grab_or_add(position),
            InputEvent::PointerPressed {
                position,
                button: PointerButton::Secondary,
            } => self.remove(position),
            InputEvent::PointerMoved {
                position,
                primary_held: true,
            } => self.drag(position),
            InputEvent::PointerReleased {
                button: PointerButton::Primary,
                ..
            } => self.state.borrow_mut().selected.take().is_some(),
            _ => false,
        }
    }

    /// Chart pixel to curve coordinates, clamped to the domain
    pub fn to_curve(&self, position: Point2<f32>) -> ControlPoint {
        let width = self.viewport.width.max(1) as f32;
        let height = self.viewport.height.max(1) as f32;
        point![
            SAMPLE_DOMAIN.clamp(position.x * MAX_SAMPLE_VALUE / width),
            OPACITY_DOMAIN.clamp(1.0 - position.y / height)
        ]
    }

    /// Curve coordinates to chart pixel
    pub fn to_chart(&self, point: ControlPoint) -> Point2<f32> {
        let width = self.viewport.width.max(1) as f32;
        let height = self.viewport.height.max(1) as f32;
        point![point.x * width / MAX_SAMPLE_VALUE, (1.0 - point.y) * height]
    }

    /// Index of the point nearest to `position`, if close enough
    fn hit_test(&self, position: Point2<f32>) -> Option<usize> {
        let state = self.state.borrow();
        state
            .points
            .iter()
            .map(|p| (self.to_chart(*p) - position).magnitude())
            .enumerate()
            .filter(|(_, distance)| *distance <= HIT_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn grab_or_add(&mut self, position: Point2<f32>) -> bool {
        if let Some(index) = self.hit_test(position) {
            self.state.borrow_mut().selected = Some(index);
            return true;
        }

        let point = self.to_curve(position);
        // State is refreshed by the hub notification, no borrow may be held here
        if !self.hub.transfer_function().add_control_point(point) {
            return false;
        }
        let index = self.hub.transfer_function().index_of(point);
        self.state.borrow_mut().selected = index;
        true
    }

    fn remove(&mut self, position: Point2<f32>) -> bool {
        let index = match self.hit_test(position) {
            Some(index) => index,
            None => return false,
        };
        self.state.borrow_mut().selected = None;
        self.hub.transfer_function().remove_at(index).is_some()
    }

    fn drag(&mut self, position: Point2<f32>) -> bool {
        let index = match self.state.borrow().selected {
            Some(index) => index,
            None => return false,
        };

        let point = self.to_curve(position);
        match self.hub.transfer_function().replace(index, point) {
            Some(new_index) => {
                self.state.borrow_mut().selected = Some(new_index);
                true
            }
            None => {
                tracing::trace!(index, x = point.x, "Drag rejected");
                false
            }
        }
    }
}

#[cfg(test)]
mod test {

    use crate::transfer::{END_POINT, START_POINT};

    use super::*;

    // One pixel per sample value, 100 px of opacity
    fn editor() -> (HubRef, TransferEditor) {
        let hub = HubRef::default();
        let editor = TransferEditor::new(hub.clone(), Viewport::new(4095, 100));
        (hub, editor)
    }

    fn press(x: f32, y: f32, button: PointerButton) -> InputEvent {
        InputEvent::PointerPressed {
            position: point![x, y],
            button,
        }
    }

    fn drag_to(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved {
            position: point![x, y],
            primary_held: true,
        }
    }

    #[test]
    fn click_adds_and_selects() {
        let (hub, mut editor) = editor();

        assert!(editor.handle_event(&press(2048.0, 50.0, PointerButton::Primary)));

        let expected = vec![START_POINT, point![2048.0, 0.5], END_POINT];
        assert_eq!(hub.transfer_function().control_points(), expected);
        assert_eq!(editor.state().points, expected);
        assert_eq!(editor.selected(), Some(1));
    }

    #[test]
    fn drag_past_neighbour_retargets_selection() {
        let (hub, mut editor) = editor();
        editor.handle_event(&press(1000.0, 50.0, PointerButton::Primary));
        editor.handle_event(&InputEvent::PointerReleased {
            position: point![1000.0, 50.0],
            button: PointerButton::Primary,
        });
        editor.handle_event(&press(3000.0, 25.0, PointerButton::Primary));
        assert_eq!(editor.selected(), Some(2));

        assert!(editor.handle_event(&drag_to(500.0, 25.0)));

        assert_eq!(editor.selected(), Some(1));
        assert_eq!(
            hub.transfer_function().control_points(),
            vec![START_POINT, point![500.0, 0.75], point![1000.0, 0.5], END_POINT]
        );
    }

    #[test]
    fn click_near_point_grabs_it() {
        let (hub, mut editor) = editor();
        hub.transfer_function().add_control_point(point![2000.0, 0.5]);

        editor.handle_event(&press(2003.0, 52.0, PointerButton::Primary));

        assert_eq!(editor.selected(), Some(1));
        assert_eq!(hub.transfer_function().control_points().len(), 3);
    }

    #[test]
    fn boundary_point_moves_only_vertically() {
        let (hub, mut editor) = editor();

        editor.handle_event(&press(0.0, 100.0, PointerButton::Primary));
        assert_eq!(editor.selected(), Some(0));
        editor.handle_event(&drag_to(300.0, 50.0));

        assert_eq!(hub.transfer_function().control_points()[0], point![0.0, 0.5]);
        assert_eq!(editor.selected(), Some(0));
    }

    #[test]
    fn secondary_click_removes() {
        let (hub, mut editor) = editor();
        hub.transfer_function().add_control_point(point![2000.0, 0.5]);

        assert!(editor.handle_event(&press(2000.0, 50.0, PointerButton::Secondary)));
        assert_eq!(editor.state().points, vec![START_POINT, END_POINT]);

        // Boundary points stay
        assert!(!editor.handle_event(&press(0.0, 100.0, PointerButton::Secondary)));
        assert_eq!(hub.transfer_function().control_points().len(), 2);
    }

    #[test]
    fn external_reset_clears_stale_selection() {
        let (hub, mut editor) = editor();
        editor.handle_event(&press(1000.0, 50.0, PointerButton::Primary));
        editor.handle_event(&press(2000.0, 50.0, PointerButton::Primary));
        assert_eq!(editor.selected(), Some(2));

        hub.transfer_function().reset();

        assert_eq!(editor.state().points.len(), 2);
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn histogram_series() {
        let (_hub, mut editor) = editor();
        editor.set_histogram(&Histogram::from_samples([7, 7, 9]));

        let state = editor.state();
        assert_eq!(state.histogram[7], point![7.0, 1.0]);
        assert_eq!(state.histogram[9], point![9.0, 0.5]);
    }
}
