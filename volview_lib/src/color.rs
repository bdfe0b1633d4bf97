use nalgebra::{vector, Vector4};

pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Same color, different opacity
pub fn with_alpha(color: RGBA, alpha: f32) -> RGBA {
    vector![color.x, color.y, color.z, alpha]
}

/// Linear blend, `t = 0` gives `a`
pub fn lerp(a: &RGBA, b: &RGBA, t: f32) -> RGBA {
    a + (b - a) * t
}

/// Interleave colors into `RGBARGBA...` floats, the layout of a transfer texture
pub fn flatten(colors: &[RGBA]) -> Vec<f32> {
    colors.iter().flat_map(|c| c.iter().copied()).collect()
}
