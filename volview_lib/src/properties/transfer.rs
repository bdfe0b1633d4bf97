use std::cell::RefCell;

use crate::{
    color::RGBA,
    transfer::{ColorMapStore, ControlPoint, ControlPointCurve},
};

use super::{Signal, Subscription};

/// Observable transfer function state
///
/// Color map selection plus the opacity curve.
/// Curve edits fire `transfer function changed`, selecting another color map
/// fires `color map changed` with the new name.
pub struct TransferProperty {
    color_map: RefCell<String>,
    curve: RefCell<ControlPointCurve>,
    transfer_function_changed: Signal<()>,
    color_map_changed: Signal<String>,
}

impl TransferProperty {
    pub fn new(color_map: impl Into<String>) -> Self {
        Self {
            color_map: RefCell::new(color_map.into()),
            curve: RefCell::new(ControlPointCurve::new()),
            transfer_function_changed: Signal::new(),
            color_map_changed: Signal::new(),
        }
    }

    pub fn color_map_name(&self) -> String {
        self.color_map.borrow().clone()
    }

    /// Select base color map by name
    ///
    /// Name is not checked against any store, see [`lookup_table`](Self::lookup_table).
    pub fn set_color_map(&self, name: &str) -> bool {
        {
            let mut current = self.color_map.borrow_mut();
            if *current == name {
                return false;
            }
            *current = name.to_string();
        }
        tracing::debug!(name, "Color map changed");
        self.color_map_changed.emit(&name.to_string());
        true
    }

    pub fn add_control_point(&self, point: ControlPoint) -> bool {
        let added = self.curve.borrow_mut().add_control_point(point);
        if added {
            self.notify_curve_changed();
        } else {
            tracing::debug!(x = point.x, "Control point not added, x already taken");
        }
        added
    }

    pub fn remove_control_point(&self, point: ControlPoint) -> bool {
        let removed = self.curve.borrow_mut().remove_control_point(point);
        if removed {
            self.notify_curve_changed();
        }
        removed
    }

    pub fn remove_at(&self, index: usize) -> Option<ControlPoint> {
        let removed = self.curve.borrow_mut().remove_at(index);
        if removed.is_some() {
            self.notify_curve_changed();
        }
        removed
    }

    /// Move point, returns its new index
    ///
    /// Subscribers are notified only if the curve actually changed.
    pub fn replace(&self, index: usize, point: ControlPoint) -> Option<usize> {
        let (result, changed) = {
            let mut curve = self.curve.borrow_mut();
            let before = curve.control_points().get(index).copied();
            let result = curve.replace(index, point);
            let changed = match result {
                Some(new_index) => {
                    new_index != index || before != curve.control_points().get(index).copied()
                }
                None => false,
            };
            (result, changed)
        };

        if changed {
            self.notify_curve_changed();
        }
        result
    }

    pub fn reset(&self) {
        let changed = {
            let mut curve = self.curve.borrow_mut();
            let changed = *curve != ControlPointCurve::new();
            curve.reset();
            changed
        };
        if changed {
            self.notify_curve_changed();
        }
    }

    /// Copy of the ordered control points
    pub fn control_points(&self) -> Vec<ControlPoint> {
        self.curve.borrow().control_points().to_vec()
    }

    pub fn index_of(&self, point: ControlPoint) -> Option<usize> {
        self.curve.borrow().index_of(point)
    }

    pub fn curve(&self) -> ControlPointCurve {
        self.curve.borrow().clone()
    }

    pub fn opacity_lut(&self) -> Vec<f32> {
        self.curve.borrow().opacity_lut()
    }

    /// Full RGBA lookup table of the current state
    ///
    /// `None` if `store` has no color map of the selected name.
    pub fn lookup_table(&self, store: &dyn ColorMapStore) -> Option<Vec<RGBA>> {
        let name = self.color_map.borrow();
        match store.color_map(&name) {
            Some(color_map) => Some(self.curve.borrow().apply_transfer_function(color_map)),
            None => {
                tracing::warn!(name = name.as_str(), "Unknown color map");
                None
            }
        }
    }

    pub fn on_transfer_function_changed<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&()) + 'static,
    {
        self.transfer_function_changed.connect(callback)
    }

    pub fn on_color_map_changed<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&String) + 'static,
    {
        self.color_map_changed.connect(callback)
    }

    fn notify_curve_changed(&self) {
        tracing::trace!("Transfer function changed");
        self.transfer_function_changed.emit(&());
    }
}

#[cfg(test)]
mod test {

    use std::{cell::Cell, rc::Rc};

    use nalgebra::point;

    use crate::transfer::{ColorMap, END_POINT, START_POINT};

    use super::*;

    struct SingleMap(ColorMap);

    impl ColorMapStore for SingleMap {
        fn names(&self) -> Vec<String> {
            vec![self.0.name().to_string()]
        }

        fn color_map(&self, name: &str) -> Option<&ColorMap> {
            (name == self.0.name()).then(|| &self.0)
        }
    }

    fn counting(property: &TransferProperty) -> (Rc<Cell<u32>>, Subscription) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let subscription = property
            .on_transfer_function_changed(move |_| count_clone.set(count_clone.get() + 1));
        (count, subscription)
    }

    #[test]
    fn edits_notify_once() {
        let property = TransferProperty::new("gray");
        let (count, _s) = counting(&property);

        assert!(property.add_control_point(point![2048.0, 0.5]));
        assert!(!property.add_control_point(point![2048.0, 0.1]));
        assert_eq!(property.replace(1, point![1000.0, 0.2]), Some(1));
        assert!(!property.remove_control_point(START_POINT));
        assert_eq!(property.remove_at(1), Some(point![1000.0, 0.2]));

        assert_eq!(count.get(), 3);
        assert_eq!(property.control_points(), vec![START_POINT, END_POINT]);
    }

    #[test]
    fn unchanged_replace_is_silent() {
        let property = TransferProperty::new("gray");
        let (count, _s) = counting(&property);

        assert_eq!(property.replace(0, point![10.0, 0.0]), Some(0));
        assert_eq!(property.replace(5, point![10.0, 0.0]), None);
        property.reset();

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn reset_notifies() {
        let property = TransferProperty::new("gray");
        property.add_control_point(point![100.0, 0.9]);
        let (count, _s) = counting(&property);

        property.reset();

        assert_eq!(count.get(), 1);
        assert_eq!(property.control_points().len(), 2);
    }

    #[test]
    fn color_map_change() {
        let property = TransferProperty::new("gray");
        let names = Rc::new(RefCell::new(Vec::new()));
        let names_clone = names.clone();
        let _s = property.on_color_map_changed(move |name| names_clone.borrow_mut().push(name.clone()));

        assert!(!property.set_color_map("gray"));
        assert!(property.set_color_map("hot"));

        assert_eq!(*names.borrow(), vec!["hot".to_string()]);
        assert_eq!(property.color_map_name(), "hot");
    }

    #[test]
    fn lookup_table_uses_selected_map() {
        let property = TransferProperty::new("red");
        let store = SingleMap(ColorMap::uniform("red", crate::color::new(1.0, 0.0, 0.0, 1.0)).unwrap());

        let lut = property.lookup_table(&store).unwrap();
        assert_eq!(lut.len(), 4096);
        assert_eq!(lut[4095], crate::color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(lut[0], crate::color::new(1.0, 0.0, 0.0, 0.0));

        property.set_color_map("blue");
        assert!(property.lookup_table(&store).is_none());
    }
}
