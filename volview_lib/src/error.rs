//! Error types of the library
//!
//! Expected edge cases (rejected control points, empty slices, ...) are
//! not errors, those are reported by return values.

use std::fmt::Display;

/// Programmable stage of a shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Failure to set up GPU resources
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("Could not load {stage} shader `{path}`: {log}")]
    Compile {
        stage: ShaderStage,
        path: String,
        log: String,
    },
    #[error("Could not link shader program `{name}`: {log}")]
    Link { name: String, log: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ColorMapError {
    #[error("Parse error in color map on line {line}")]
    Parse { line: usize },
    #[error("Color map `{0}` has no samples")]
    Empty(String),
    #[error("Sample {index} of color map `{name}` is outside of <0;1>")]
    OutOfRange { name: String, index: usize },
    #[error("Cannot read color map file")]
    Io(#[from] std::io::Error),
}
