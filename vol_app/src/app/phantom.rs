//! Stand-in volume data
//!
//! The headless session has no volume files, samples come from a
//! generated phantom of the loaded dimensions.

use nalgebra::{vector, Vector3};
use volview_lib::transfer::{Histogram, MAX_SAMPLE_VALUE};

/// Samples taken along each axis at most
const MAX_SAMPLES_PER_AXIS: u32 = 64;

/// Sphere filling the volume, densest in the middle
pub struct SphereGenerator {
    dims: Vector3<u32>,
}

impl SphereGenerator {
    pub fn new(dims: Vector3<u32>) -> SphereGenerator {
        SphereGenerator { dims }
    }

    /// 12 bit sample, 0 outside the sphere
    pub fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        let half = self.dims.cast::<f32>() * 0.5;
        let rel = (coords.cast::<f32>() + vector![0.5, 0.5, 0.5] - half).component_div(&half);
        let r = rel.magnitude();
        if r >= 1.0 {
            0
        } else {
            ((1.0 - r) * MAX_SAMPLE_VALUE).round() as u16
        }
    }

    /// Histogram of a regular subsample of the volume
    pub fn histogram(&self) -> Histogram {
        let step = self.dims.map(|d| (d / MAX_SAMPLES_PER_AXIS).max(1));
        let mut histogram = Histogram::new();
        for z in (0..self.dims.z).step_by(step.z as usize) {
            for y in (0..self.dims.y).step_by(step.y as usize) {
                for x in (0..self.dims.x).step_by(step.x as usize) {
                    histogram.add(self.sample_at(vector![x, y, z]));
                }
            }
        }
        histogram
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn center_is_densest() {
        let generator = SphereGenerator::new(vector![16, 16, 16]);

        assert_eq!(generator.sample_at(vector![0, 0, 0]), 0);
        assert!(generator.sample_at(vector![8, 8, 8]) > 3500);
        assert!(generator.sample_at(vector![8, 8, 8]) > generator.sample_at(vector![12, 8, 8]));
    }

    #[test]
    fn histogram_counts_subsample() {
        let histogram = SphereGenerator::new(vector![128, 64, 8]).histogram();
        let total: u32 = histogram.bins().iter().sum();

        // every other sample along x
        assert_eq!(total, 64 * 64 * 8);
        assert!(histogram.bins()[0] > 0);
    }
}
