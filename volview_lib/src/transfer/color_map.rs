use crate::{
    color::{self, RGBA},
    common::ValueRange,
    error::ColorMapError,
};

use super::TF_SAMPLES;

const CHANNEL_RANGE: ValueRange = ValueRange::new(0.0, 1.0);

/// Named table of base colors
///
/// Always holds exactly [`TF_SAMPLES`] samples, inputs of other lengths
/// are resampled linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    name: String,
    samples: Vec<RGBA>,
}

impl ColorMap {
    /// Construct color map from samples
    ///
    /// Every channel must be inside <0;1>.
    pub fn new(name: impl Into<String>, samples: &[RGBA]) -> Result<ColorMap, ColorMapError> {
        let name = name.into();
        if samples.is_empty() {
            return Err(ColorMapError::Empty(name));
        }
        if let Some(index) = samples
            .iter()
            .position(|s| s.iter().any(|c| !CHANNEL_RANGE.contains(*c)))
        {
            return Err(ColorMapError::OutOfRange { name, index });
        }

        Ok(ColorMap {
            name,
            samples: resample(samples, TF_SAMPLES),
        })
    }

    /// Color map made of linear gradients between `stops`
    ///
    /// Stop positions are in <0;1> and must be ascending.
    pub fn from_stops(
        name: impl Into<String>,
        stops: &[(f32, RGBA)],
    ) -> Result<ColorMap, ColorMapError> {
        let name = name.into();
        if stops.is_empty() {
            return Err(ColorMapError::Empty(name));
        }

        let last = (TF_SAMPLES - 1) as f32;
        let samples: Vec<RGBA> = (0..TF_SAMPLES)
            .map(|i| {
                let t = i as f32 / last;
                let upper = stops.partition_point(|(pos, _)| *pos < t);
                match upper {
                    0 => stops[0].1,
                    u if u == stops.len() => stops[u - 1].1,
                    u => {
                        let (p0, c0) = stops[u - 1];
                        let (p1, c1) = stops[u];
                        if p1 > p0 {
                            color::lerp(&c0, &c1, (t - p0) / (p1 - p0))
                        } else {
                            c1
                        }
                    }
                }
            })
            .collect();

        ColorMap::new(name, &samples)
    }

    /// Single color everywhere, channels checked like in [`ColorMap::new`]
    pub fn uniform(name: impl Into<String>, color: RGBA) -> Result<ColorMap, ColorMapError> {
        ColorMap::new(name, &[color])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[RGBA] {
        &self.samples
    }
}

/// Read-only collection of named color maps
pub trait ColorMapStore {
    /// Names of all color maps, sorted
    fn names(&self) -> Vec<String>;

    fn color_map(&self, name: &str) -> Option<&ColorMap>;

    fn contains(&self, name: &str) -> bool {
        self.color_map(name).is_some()
    }
}

/// Linear resampling of `samples` to `len` entries
fn resample(samples: &[RGBA], len: usize) -> Vec<RGBA> {
    if samples.len() == len {
        return samples.to_vec();
    }
    if samples.len() == 1 || len < 2 {
        return vec![samples[0]; len];
    }

    let scale = (samples.len() - 1) as f32 / (len - 1) as f32;
    (0..len)
        .map(|i| {
            if i == len - 1 {
                return samples[samples.len() - 1];
            }
            let pos = i as f32 * scale;
            let lower = (pos.floor() as usize).min(samples.len() - 1);
            let upper = (lower + 1).min(samples.len() - 1);
            color::lerp(&samples[lower], &samples[upper], pos - lower as f32)
        })
        .collect()
}
