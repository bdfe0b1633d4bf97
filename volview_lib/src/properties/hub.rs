use std::{
    ops::Deref,
    rc::{Rc, Weak},
};

use crate::geometry::Plane;

use super::{ClippingPlaneProperty, GradientMethod, GradientProperty, HubSnapshot, TransferProperty};

/// Color map selected in a new session
pub const DEFAULT_COLOR_MAP: &str = "gray";

/// State shared by all views of one session
///
/// Single source of truth. Every mutation notifies subscribers synchronously,
/// the hub itself knows nothing about who listens.
pub struct PropertyHub {
    clipping_plane: ClippingPlaneProperty,
    transfer_function: TransferProperty,
    gradient: GradientProperty,
}

impl PropertyHub {
    pub fn new(plane: Plane, color_map: &str, gradient_method: GradientMethod) -> PropertyHub {
        PropertyHub {
            clipping_plane: ClippingPlaneProperty::new(plane),
            transfer_function: TransferProperty::new(color_map),
            gradient: GradientProperty::new(gradient_method),
        }
    }

    /// Horizontal plane through the center, gray color map, linear ramp
    pub fn with_defaults() -> PropertyHub {
        PropertyHub::new(Plane::default(), DEFAULT_COLOR_MAP, GradientMethod::default())
    }

    pub fn clipping_plane(&self) -> &ClippingPlaneProperty {
        &self.clipping_plane
    }

    pub fn transfer_function(&self) -> &TransferProperty {
        &self.transfer_function
    }

    pub fn gradient(&self) -> &GradientProperty {
        &self.gradient
    }

    /// Immutable copy of the whole state
    pub fn snapshot(&self, revision: u64) -> HubSnapshot {
        HubSnapshot {
            revision,
            plane: self.clipping_plane.plane(),
            gradient_method: self.gradient.method(),
            color_map: self.transfer_function.color_map_name(),
            control_points: self.transfer_function.control_points(),
        }
    }
}

impl Default for PropertyHub {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Shared counted reference to [`PropertyHub`]
///
/// Owned by the session, cloned into every view.
/// Callbacks registered on the hub should capture [`HubRef::downgrade`]
/// instead, otherwise the hub keeps itself alive.
#[derive(Clone)]
pub struct HubRef(Rc<PropertyHub>);

impl Deref for HubRef {
    type Target = PropertyHub;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl HubRef {
    /// Wrap hub in Newtype
    pub fn new(hub: PropertyHub) -> HubRef {
        HubRef(Rc::new(hub))
    }

    pub fn downgrade(&self) -> Weak<PropertyHub> {
        Rc::downgrade(&self.0)
    }

    /// Handles point to the same hub
    pub fn ptr_eq(&self, other: &HubRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for HubRef {
    fn default() -> Self {
        HubRef::new(PropertyHub::with_defaults())
    }
}

#[cfg(test)]
mod test {

    use std::{cell::RefCell, rc::Rc};

    use nalgebra::point;

    use crate::transfer::{END_POINT, START_POINT};

    use super::*;

    #[test]
    fn defaults() {
        let hub = PropertyHub::with_defaults();

        assert_eq!(hub.clipping_plane().plane(), Plane::default());
        assert_eq!(hub.transfer_function().color_map_name(), DEFAULT_COLOR_MAP);
        assert_eq!(hub.gradient().method(), GradientMethod::CentralDifference);
        assert_eq!(hub.transfer_function().control_points(), vec![START_POINT, END_POINT]);
    }

    #[test]
    fn weak_callbacks_do_not_leak() {
        let hub = HubRef::default();
        let weak = hub.downgrade();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let callback_hub = hub.downgrade();
        hub.transfer_function()
            .on_transfer_function_changed(move |_| {
                if let Some(hub) = callback_hub.upgrade() {
                    seen_clone
                        .borrow_mut()
                        .push(hub.transfer_function().control_points().len());
                }
            })
            .detach();

        hub.transfer_function().add_control_point(point![5.0, 0.5]);
        assert_eq!(*seen.borrow(), vec![3]);

        drop(hub);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn snapshot_copies_state() {
        let hub = HubRef::default();
        hub.gradient().set_method(GradientMethod::Sobel);
        hub.transfer_function().set_color_map("hot");

        let snapshot = hub.snapshot(4);

        assert_eq!(snapshot.revision, 4);
        assert_eq!(snapshot.gradient_method, GradientMethod::Sobel);
        assert_eq!(snapshot.color_map, "hot");
        assert_eq!(snapshot.control_points.len(), 2);

        let clone = hub.clone();
        assert!(clone.ptr_eq(&hub));
    }
}
