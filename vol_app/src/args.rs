//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_positive_float(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0.0".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_float_number(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => Err("Finite number required".into()),
    }
}

const PROJECTION_NAMES: &[&str] = &["perspective", "orthographic"];
const GRADIENT_NAMES: &[&str] = &["none", "central", "forward", "sobel"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-app")
        .version("0.2.0")
        .about("Headless volume viewer session, replays an interaction script")
        .arg(
            Arg::new("viewport")
                .help("Size of each widget in pixels")
                .long("viewport")
                .number_of_values(2)
                .value_names(&["WIDTH", "HEIGHT"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("dims")
                .help("Dimensions of the loaded volume")
                .long("dims")
                .short('d')
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("zoom")
                .help("Initial zoom of the ray casting view")
                .long("zoom")
                .short('z')
                .value_name("FACTOR")
                .validator(is_positive_float),
        )
        .arg(
            Arg::new("projection")
                .help("Projection of the ray casting view")
                .long("projection")
                .short('p')
                .value_name("NAME")
                .possible_values(PROJECTION_NAMES),
        )
        .arg(
            Arg::new("gradient")
                .help("Gradient estimation used for shading")
                .long("gradient")
                .short('g')
                .value_name("NAME")
                .possible_values(GRADIENT_NAMES),
        )
        .arg(
            Arg::new("color-map")
                .help("Name of the initial color map, built-in or from a color map file")
                .long("color-map")
                .short('c')
                .value_name("NAME"),
        )
        .arg(
            Arg::new("color-map-file")
                .help("Extra color map files, `name: X` line followed by `r g b [a]` rows")
                .long("color-map-file")
                .value_name("FILE")
                .multiple_occurrences(true)
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("plane")
                .help("Initial clipping plane equation a*x + b*y + c*z + d = 0")
                .long("plane")
                .number_of_values(4)
                .value_names(&["A", "B", "C", "D"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .allow_hyphen_values(true)
                .validator(is_float_number),
        )
        .arg(
            Arg::new("script")
                .help("Interaction script to replay, demo script if left out")
                .long("script")
                .short('s')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .help("More logging, repeat for even more")
                .long("verbose")
                .short('v')
                .multiple_occurrences(true),
        )
}

/// Printable name of the replayed script
pub fn script_name(path: Option<&OsStr>) -> String {
    match path {
        Some(p) => p.to_string_lossy().into_owned(),
        None => "<demo>".into(),
    }
}
