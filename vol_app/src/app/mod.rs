//! Viewer session without a window

pub mod backend;
pub mod defaults;
mod phantom;
pub mod script;
mod session;

pub use session::{Session, SessionSummary};
