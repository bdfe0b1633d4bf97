use nalgebra::{point, Point2};

use crate::common::ValueRange;

use super::TF_SAMPLES;

/// Horizontal axis range of the histogram chart
pub const HISTOGRAM_X_RANGE: ValueRange = ValueRange::new(0.0, TF_SAMPLES as f32);
/// Vertical axis range of the histogram chart
pub const HISTOGRAM_Y_RANGE: ValueRange = ValueRange::new(0.0, 1.0);

/// Sample value histogram of a 12 bit volume
///
/// One bin per sample value, the same domain as the transfer function.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<u32>,
}

impl Histogram {
    pub fn new() -> Histogram {
        Histogram {
            bins: vec![0; TF_SAMPLES],
        }
    }

    /// Count samples, values above 4095 go to the last bin
    pub fn from_samples(samples: impl IntoIterator<Item = u16>) -> Histogram {
        let mut histogram = Histogram::new();
        for sample in samples {
            histogram.add(sample);
        }
        histogram
    }

    pub fn add(&mut self, sample: u16) {
        let bin = (sample as usize).min(TF_SAMPLES - 1);
        self.bins[bin] = self.bins[bin].saturating_add(1);
    }

    pub fn bins(&self) -> &[u32] {
        &self.bins
    }

    /// Bin counts divided by the largest bin
    ///
    /// Empty histogram is all zeros.
    pub fn normalized(&self) -> Vec<f32> {
        let range = ValueRange::new(0.0, self.max_count() as f32);
        self.bins
            .iter()
            .map(|&count| range.normalize(count as f32))
            .collect()
    }

    /// Points of the chart line, `(bin, normalized count)`
    pub fn series(&self) -> Vec<Point2<f32>> {
        self.normalized()
            .into_iter()
            .enumerate()
            .map(|(i, v)| point![i as f32, v])
            .collect()
    }

    fn max_count(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn normalized_by_peak() {
        let histogram = Histogram::from_samples([0, 10, 10, 10, 10, 4095, 60000]);
        let normalized = histogram.normalized();

        assert_eq!(normalized.len(), TF_SAMPLES);
        assert_eq!(normalized[10], 1.0);
        assert_eq!(normalized[0], 0.25);
        // 4095 and the clamped sample share the last bin
        assert_eq!(normalized[4095], 0.5);
        assert_eq!(normalized[11], 0.0);
    }

    #[test]
    fn empty_histogram() {
        let series = Histogram::new().series();

        assert_eq!(series.len(), TF_SAMPLES);
        assert!(series.iter().all(|p| p.y == 0.0));
        assert_eq!(series[7], point![7.0, 0.0]);
        assert!(series.iter().all(|p| HISTOGRAM_X_RANGE.contains(p.x)));
    }
}
