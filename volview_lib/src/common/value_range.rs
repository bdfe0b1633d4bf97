/// Closed range of floating-point values.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound
    pub low: f32,
    /// Upper bound
    pub high: f32,
}

impl ValueRange {
    /// Constructs new range, bounds are inclusive.
    pub const fn new(low: f32, high: f32) -> ValueRange {
        ValueRange { low, high }
    }

    /// Check if value is inside the range.
    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val <= self.high
    }

    /// Clamp value into the range.
    /// NaN maps to the lower bound.
    pub fn clamp(&self, val: f32) -> f32 {
        if val.is_nan() {
            return self.low;
        }
        val.max(self.low).min(self.high)
    }

    pub fn span(&self) -> f32 {
        self.high - self.low
    }

    /// Map value from this range onto `[0,1]`.
    /// Degenerate (single value) range maps everything to `0.0`.
    pub fn normalize(&self, val: f32) -> f32 {
        let span = self.span();
        if span > 0.0 {
            (val - self.low) / span
        } else {
            0.0
        }
    }
}
