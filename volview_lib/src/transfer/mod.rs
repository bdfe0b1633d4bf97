//! Transfer function
//!
//! Maps 12 bit sample values to color and opacity.
//! Opacity comes from a user edited [`ControlPointCurve`], color from a named [`ColorMap`].

mod color_map;
mod curve;
mod editor;
mod histogram;

pub use color_map::{ColorMap, ColorMapStore};
pub use curve::{ControlPoint, ControlPointCurve, END_POINT, START_POINT};
pub use editor::{EditorState, TransferEditor};
pub use histogram::{Histogram, HISTOGRAM_X_RANGE, HISTOGRAM_Y_RANGE};

/// Length of the lookup table, one entry per 12 bit sample value
pub const TF_SAMPLES: usize = 4096;

/// Highest sample value, x coordinate of the last control point
pub const MAX_SAMPLE_VALUE: f32 = (TF_SAMPLES - 1) as f32;
