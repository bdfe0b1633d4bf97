//! Shared view properties
//!
//! [`PropertyHub`] holds the state every view of a session agrees on:
//! the clipping plane, the transfer function and the gradient method.
//! Views subscribe to change [`Signal`]s and recompute their derived state
//! when notified.

mod clipping_plane;
mod gradient;
mod hub;
mod signal;
mod snapshot;
mod transfer;

pub use clipping_plane::ClippingPlaneProperty;
pub use gradient::{GradientMethod, GradientProperty};
pub use hub::{HubRef, PropertyHub, DEFAULT_COLOR_MAP};
pub use signal::{Signal, Subscription};
pub use snapshot::{HubSnapshot, SnapshotPublisher, SnapshotReader};
pub use transfer::TransferProperty;
