use std::{fmt::Display, str::FromStr};

use nalgebra::Matrix4;

/// Vertical field of view of the perspective projection
pub const FOV_DEGREES: f32 = 60.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Projection of the ray casting view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    /// View volume `[-aspect, aspect] x [-1, 1]`
    Orthographic,
}

impl Projection {
    /// Projection matrix for a viewport of `aspect` (width / height)
    pub fn matrix(&self, aspect: f32) -> Matrix4<f32> {
        match self {
            Projection::Perspective => {
                Matrix4::new_perspective(aspect, FOV_DEGREES.to_radians(), NEAR_PLANE, FAR_PLANE)
            }
            Projection::Orthographic => {
                Matrix4::new_orthographic(-aspect, aspect, -1.0, 1.0, NEAR_PLANE, FAR_PLANE)
            }
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Projection::Perspective => "perspective",
            Projection::Orthographic => "orthographic",
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective
    }
}

impl Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_name())
    }
}

impl FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "perspective" | "p" => Ok(Projection::Perspective),
            "orthographic" | "ortho" | "o" => Ok(Projection::Orthographic),
            _ => Err(format!("Unknown projection '{s}'")),
        }
    }
}
