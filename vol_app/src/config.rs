use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use nalgebra::{vector, Vector3};
use volview_lib::{
    common::Viewport, render::RenderProperties, GradientMethod, Plane, Projection,
};

use crate::app::defaults;

/// Parse all values of a multi value argument, `None` if the argument is missing
fn parse_values<T>(args: &ArgMatches, key: &str) -> Result<Option<Vec<T>>>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let values = match args.values_of(key) {
        Some(v) => v,
        None => return Ok(None),
    };
    values
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| anyhow!("Argument {key}, value '{v}': {e}"))
        })
        .collect::<Result<Vec<T>>>()
        .map(Some)
}

fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    args.value_of(key)
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| anyhow!("Argument {key}, value '{v}': {e}"))
        })
        .transpose()
}

/// App configuration
/// Config is built from args parsed by `clap`, missing args take values from [`defaults`]
#[derive(Debug, Clone)]
pub struct Config {
    /// Size of each widget
    pub viewport: Viewport,
    /// Dimensions of the loaded volume
    pub volume_dims: Vector3<u32>,
    /// Zoom and projection of the ray casting view
    pub render: RenderProperties,
    pub gradient_method: GradientMethod,
    pub color_map: String,
    /// Loaded before the session starts
    pub color_map_files: Vec<PathBuf>,
    pub plane: Plane,
    /// Interaction script, `None` plays [`defaults::DEMO_SCRIPT`]
    pub script: Option<PathBuf>,
    /// Number of `-v` flags
    pub verbosity: u64,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config> {
        let viewport = match parse_values::<u32>(args, "viewport")? {
            Some(v) => Viewport::new(v[0], v[1]),
            None => Viewport::new(defaults::VIEWPORT_WIDTH, defaults::VIEWPORT_HEIGHT),
        };

        let volume_dims = match parse_values::<u32>(args, "dims")? {
            Some(v) => vector![v[0], v[1], v[2]],
            None => defaults::VOLUME_DIMS,
        };

        let render = RenderProperties {
            zoom_factor: parse_value(args, "zoom")?.unwrap_or(defaults::INITIAL_ZOOM),
            projection: parse_value::<Projection>(args, "projection")?
                .unwrap_or(defaults::PROJECTION),
        };

        let gradient_method =
            parse_value(args, "gradient")?.unwrap_or(defaults::GRADIENT_METHOD);

        let color_map = args
            .value_of("color-map")
            .unwrap_or(defaults::COLOR_MAP)
            .to_string();

        let color_map_files = args
            .values_of_os("color-map-file")
            .map(|files| files.map(PathBuf::from).collect())
            .unwrap_or_default();

        let equation = match parse_values::<f32>(args, "plane")? {
            Some(v) => vector![v[0], v[1], v[2], v[3]],
            None => defaults::PLANE_EQUATION,
        };
        let plane = Plane::from_equation(equation)
            .with_context(|| format!("Clipping plane {:?} has no normal", equation.as_slice()))?;

        let script = args.value_of_os("script").map(PathBuf::from);

        Ok(Config {
            viewport,
            volume_dims,
            render,
            gradient_method,
            color_map,
            color_map_files,
            plane,
            script,
            verbosity: args.occurrences_of("verbose"),
        })
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::args::get_command;

    fn config(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["vol_app"];
        argv.extend_from_slice(args);
        let matches = get_command().try_get_matches_from(argv)?;
        Config::from_args(&matches)
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();

        assert_eq!(cfg.viewport, Viewport::new(512, 512));
        assert_eq!(cfg.volume_dims, defaults::VOLUME_DIMS);
        assert_eq!(cfg.render.projection, Projection::Perspective);
        assert_eq!(cfg.gradient_method, GradientMethod::CentralDifference);
        assert_eq!(cfg.color_map, "gray");
        assert_eq!(cfg.plane, Plane::default());
        assert!(cfg.script.is_none());
        assert!(cfg.color_map_files.is_empty());
    }

    #[test]
    fn explicit_values() {
        let cfg = config(&[
            "--viewport=640,480",
            "--dims=64,64,32",
            "-z",
            "2.5",
            "--projection",
            "orthographic",
            "-g",
            "sobel",
            "--plane=0,0,2,-1",
            "--color-map-file",
            "a.txt",
            "--color-map-file",
            "b.txt",
            "-v",
        ])
        .unwrap();

        assert_eq!(cfg.viewport, Viewport::new(640, 480));
        assert_eq!(cfg.volume_dims, vector![64, 64, 32]);
        assert_eq!(cfg.render.zoom_factor, 2.5);
        assert_eq!(cfg.render.projection, Projection::Orthographic);
        assert_eq!(cfg.gradient_method, GradientMethod::Sobel);
        assert_eq!(cfg.plane.equation(), vector![0.0, 0.0, 1.0, -0.5]);
        assert_eq!(cfg.color_map_files.len(), 2);
        assert_eq!(cfg.verbosity, 1);
    }

    #[test]
    fn degenerate_plane_is_error() {
        assert!(config(&["--plane=0,0,0,1"]).is_err());
    }
}
