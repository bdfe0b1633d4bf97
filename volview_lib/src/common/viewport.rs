use nalgebra::{point, Point2};

/// Pixel size of a rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, `1.0` for degenerate viewport
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Map widget pixel coordinates to `[-1,1]x[-1,1]`.
    /// Screen `y` grows downwards, the result `y` grows upwards.
    pub fn to_ndc(&self, x: f32, y: f32) -> Point2<f32> {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        point![2.0 * x / w - 1.0, -2.0 * y / h + 1.0]
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn ndc_corners() {
        let vp = Viewport::new(200, 100);

        assert_eq!(vp.to_ndc(0.0, 0.0), point![-1.0, 1.0]);
        assert_eq!(vp.to_ndc(200.0, 100.0), point![1.0, -1.0]);
        assert_eq!(vp.to_ndc(100.0, 50.0), point![0.0, 0.0]);
        assert_eq!(vp.aspect(), 2.0);
    }
}
