//! Core of an interactive direct volume rendering viewer.
//!
//! Holds the parts of the viewer that decide what ends up on screen:
//! the transfer function curve, clipping plane geometry, camera math
//! and the property hub that keeps all views in sync.
//! GPU access goes through the traits in [`render::gpu`].

pub mod camera;
pub mod color;
pub mod common;
pub mod error;
pub mod geometry;
pub mod premade;
pub mod properties;
pub mod render;
pub mod test_helpers;
pub mod transfer;

pub use camera::{ArcballCamera, Camera, ObliqueCamera, Projection};
pub use geometry::{CubePlaneIntersection, Plane};
pub use properties::{GradientMethod, HubRef, PropertyHub};
pub use transfer::{ColorMap, ColorMapStore, ControlPoint, ControlPointCurve};
