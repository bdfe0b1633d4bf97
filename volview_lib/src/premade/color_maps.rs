use std::{collections::BTreeMap, path::Path};

use crate::{
    color::{self, RGBA},
    error::ColorMapError,
    transfer::{ColorMap, ColorMapStore},
};

use super::parse;

/// Names of the built-in color maps
pub const PREMADE_NAMES: [&str; 5] = ["bone", "cool", "gray", "hot", "rainbow"];

/// Color map store with the built-in maps
///
/// More maps can be added at runtime, a map of an existing name replaces it.
#[derive(Debug, Clone)]
pub struct PremadeColorMaps {
    maps: BTreeMap<String, ColorMap>,
}

impl PremadeColorMaps {
    pub fn new() -> PremadeColorMaps {
        let mut maps = BTreeMap::new();
        for name in PREMADE_NAMES {
            match ColorMap::from_stops(name, &stops(name)) {
                Ok(map) => {
                    maps.insert(name.to_string(), map);
                }
                Err(e) => tracing::error!("Built-in color map skipped: {e}"),
            }
        }
        PremadeColorMaps { maps }
    }

    /// Add or replace a color map, returns the replaced one
    pub fn insert(&mut self, map: ColorMap) -> Option<ColorMap> {
        tracing::debug!(name = map.name(), "Color map added");
        self.maps.insert(map.name().to_string(), map)
    }

    /// Read a color map file and add it, returns the name of the new map
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String, ColorMapError> {
        let map = parse::from_file(path)?;
        let name = map.name().to_string();
        self.insert(map);
        Ok(name)
    }
}

impl Default for PremadeColorMaps {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorMapStore for PremadeColorMaps {
    fn names(&self) -> Vec<String> {
        self.maps.keys().cloned().collect()
    }

    fn color_map(&self, name: &str) -> Option<&ColorMap> {
        self.maps.get(name)
    }
}

fn rgb(r: f32, g: f32, b: f32) -> RGBA {
    color::new(r, g, b, 1.0)
}

fn stops(name: &str) -> Vec<(f32, RGBA)> {
    match name {
        "gray" => vec![(0.0, rgb(0.0, 0.0, 0.0)), (1.0, rgb(1.0, 1.0, 1.0))],
        "hot" => vec![
            (0.0, rgb(0.0, 0.0, 0.0)),
            (0.375, rgb(1.0, 0.0, 0.0)),
            (0.75, rgb(1.0, 1.0, 0.0)),
            (1.0, rgb(1.0, 1.0, 1.0)),
        ],
        "cool" => vec![(0.0, rgb(0.0, 1.0, 1.0)), (1.0, rgb(1.0, 0.0, 1.0))],
        "rainbow" => vec![
            (0.0, rgb(0.0, 0.0, 1.0)),
            (0.25, rgb(0.0, 1.0, 1.0)),
            (0.5, rgb(0.0, 1.0, 0.0)),
            (0.75, rgb(1.0, 1.0, 0.0)),
            (1.0, rgb(1.0, 0.0, 0.0)),
        ],
        "bone" => vec![
            (0.0, rgb(0.0, 0.0, 0.0)),
            (0.375, rgb(0.32, 0.32, 0.45)),
            (0.75, rgb(0.66, 0.78, 0.78)),
            (1.0, rgb(1.0, 1.0, 1.0)),
        ],
        _ => Vec::new(),
    }
}
