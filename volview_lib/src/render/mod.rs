//! Views drawing through the GPU boundary
//!
//! The views never talk to a graphics API directly, everything goes through
//! the traits in [`gpu`]. Hub state reaches the views through signals.

pub mod gpu;
mod interactors;
mod raycast_view;
mod slice_view;
mod surface;
mod transfer_sync;
pub mod uniforms;

pub use interactors::{ArcballInteractor, ObliqueInteractor};
pub use raycast_view::{RayCastView, RenderProperties, CUBE_SHADER};
pub use slice_view::{SliceView, SLICE_SHADER};
pub use surface::{CameraSurface, Interactive, Interactor, Surface};
pub use transfer_sync::TransferTextureSync;
