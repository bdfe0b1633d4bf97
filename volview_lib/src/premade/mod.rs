// Built-in color maps and a reader for user supplied ones.

mod color_maps;
pub mod parse;

pub use color_maps::{PremadeColorMaps, PREMADE_NAMES};
