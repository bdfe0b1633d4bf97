//! Interaction scripts
//!
//! One command per line, `#` starts a comment line.
//!
//! ```text
//! raycast press 10 20 primary      # input event for a widget
//! raycast move 30 20               # move with primary button held
//! slice hover 30 20                # move, no button
//! slice dial 45
//! slice flip-vertical on
//! editor wheel -1
//! plane 0 0 1 -0.2                 # clipping plane equation
//! distance 0.1                     # move clipping plane
//! gradient sobel
//! colormap hot
//! point 1024 0.5                   # add control point
//! unpoint 1024 0.5                 # remove control point
//! reset
//! projection orthographic
//! volume 128 128 64                # new volume loaded
//! resize 640 480
//! paint
//! ```

use anyhow::{anyhow, Result};
use nalgebra::{point, vector, Vector3, Vector4};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, i32 as int32, space0, space1, u32 as uint32},
    combinator::{all_consuming, map, map_res, opt, value},
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use volview_lib::{
    common::{InputEvent, PointerButton, Viewport},
    ControlPoint, GradientMethod, Projection,
};

/// Widget receiving an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    RayCast,
    Slice,
    Editor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Input { target: Target, event: InputEvent },
    Plane(Vector4<f32>),
    Distance(f32),
    Gradient(GradientMethod),
    ColorMap(String),
    AddPoint(ControlPoint),
    RemovePoint(ControlPoint),
    ResetCurve,
    Projection(Projection),
    Volume(Vector3<u32>),
    Resize(Viewport),
    Paint,
}

/// Parse whole script
///
/// Errors name the 1-based line.
pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = match line.find(" #") {
            Some(comment) => line[..comment].trim_end(),
            None => line,
        };

        let (_, cmd) = all_consuming(terminated(command, space0))(line)
            .map_err(|_| anyhow!("Script line {}: cannot parse '{}'", index + 1, line))?;
        commands.push(cmd);
    }
    Ok(commands)
}

fn command(s: &str) -> IResult<&str, Command> {
    alt((
        input_command,
        map(preceded(tag("plane"), vec4), Command::Plane),
        map(preceded(tag("distance"), number), Command::Distance),
        map(
            preceded(
                tuple((tag("gradient"), space1)),
                map_res(alpha1, str::parse::<GradientMethod>),
            ),
            Command::Gradient,
        ),
        map(preceded(tuple((tag("colormap"), space1)), word), |name| {
            Command::ColorMap(name.to_string())
        }),
        map(preceded(tag("unpoint"), pair), |(x, y)| {
            Command::RemovePoint(point![x, y])
        }),
        map(preceded(tag("point"), pair), |(x, y)| {
            Command::AddPoint(point![x, y])
        }),
        value(Command::ResetCurve, tag("reset")),
        map(
            preceded(
                tuple((tag("projection"), space1)),
                map_res(alpha1, str::parse::<Projection>),
            ),
            Command::Projection,
        ),
        map(
            preceded(tag("volume"), tuple((unsigned, unsigned, unsigned))),
            |(x, y, z)| Command::Volume(vector![x, y, z]),
        ),
        map(preceded(tag("resize"), tuple((unsigned, unsigned))), |(w, h)| {
            Command::Resize(Viewport::new(w, h))
        }),
        value(Command::Paint, tag("paint")),
    ))(s)
}

fn input_command(s: &str) -> IResult<&str, Command> {
    let (s, target) = alt((
        value(Target::RayCast, tag("raycast")),
        value(Target::Slice, tag("slice")),
        value(Target::Editor, tag("editor")),
    ))(s)?;
    let (s, event) = preceded(space1, event)(s)?;
    Ok((s, Command::Input { target, event }))
}

fn event(s: &str) -> IResult<&str, InputEvent> {
    alt((
        map(
            preceded(tag("press"), tuple((pair, opt(button)))),
            |((x, y), button)| InputEvent::PointerPressed {
                position: point![x, y],
                button: button.unwrap_or(PointerButton::Primary),
            },
        ),
        map(
            preceded(tag("release"), tuple((pair, opt(button)))),
            |((x, y), button)| InputEvent::PointerReleased {
                position: point![x, y],
                button: button.unwrap_or(PointerButton::Primary),
            },
        ),
        map(preceded(tag("move"), pair), |(x, y)| InputEvent::PointerMoved {
            position: point![x, y],
            primary_held: true,
        }),
        map(preceded(tag("hover"), pair), |(x, y)| InputEvent::PointerMoved {
            position: point![x, y],
            primary_held: false,
        }),
        map(preceded(tag("wheel"), number), |delta_y| InputEvent::Wheel {
            delta_y,
        }),
        map(preceded(tuple((tag("dial"), space1)), int32), |degrees| {
            InputEvent::Dial { degrees }
        }),
        map(preceded(tag("flip-horizontal"), switch), InputEvent::FlipHorizontal),
        map(preceded(tag("flip-vertical"), switch), InputEvent::FlipVertical),
    ))(s)
}

fn button(s: &str) -> IResult<&str, PointerButton> {
    preceded(
        space1,
        alt((
            value(PointerButton::Primary, tag("primary")),
            value(PointerButton::Secondary, tag("secondary")),
            value(PointerButton::Middle, tag("middle")),
        )),
    )(s)
}

fn switch(s: &str) -> IResult<&str, bool> {
    preceded(space1, alt((value(true, tag("on")), value(false, tag("off")))))(s)
}

fn word(s: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-')(s)
}

fn number(s: &str) -> IResult<&str, f32> {
    preceded(space1, float)(s)
}

fn unsigned(s: &str) -> IResult<&str, u32> {
    preceded(space1, uint32)(s)
}

fn pair(s: &str) -> IResult<&str, (f32, f32)> {
    tuple((number, number))(s)
}

fn vec4(s: &str) -> IResult<&str, Vector4<f32>> {
    map(tuple((number, number, number, number)), |(a, b, c, d)| {
        vector![a, b, c, d]
    })(s)
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::app::defaults::DEMO_SCRIPT;

    #[test]
    fn input_events() {
        let commands = parse_script(
            "raycast press 10 20\n\
             slice release 1.5 2 secondary\n\
             editor move 3 4\n\
             editor hover 3 4\n\
             raycast wheel -1\n\
             slice dial 370\n\
             slice flip-vertical off",
        )
        .unwrap();

        assert_eq!(
            commands,
            vec![
                Command::Input {
                    target: Target::RayCast,
                    event: InputEvent::PointerPressed {
                        position: point![10.0, 20.0],
                        button: PointerButton::Primary
                    }
                },
                Command::Input {
                    target: Target::Slice,
                    event: InputEvent::PointerReleased {
                        position: point![1.5, 2.0],
                        button: PointerButton::Secondary
                    }
                },
                Command::Input {
                    target: Target::Editor,
                    event: InputEvent::PointerMoved {
                        position: point![3.0, 4.0],
                        primary_held: true
                    }
                },
                Command::Input {
                    target: Target::Editor,
                    event: InputEvent::PointerMoved {
                        position: point![3.0, 4.0],
                        primary_held: false
                    }
                },
                Command::Input {
                    target: Target::RayCast,
                    event: InputEvent::Wheel { delta_y: -1.0 }
                },
                Command::Input {
                    target: Target::Slice,
                    event: InputEvent::Dial { degrees: 370 }
                },
                Command::Input {
                    target: Target::Slice,
                    event: InputEvent::FlipVertical(false)
                },
            ]
        );
    }

    #[test]
    fn property_commands() {
        let commands = parse_script(
            "# setup\n\
             plane 0 0 1 -0.25   # lower half\n\
             distance 0.1\n\
             gradient Sobel\n\
             colormap my-map\n\
             point 1024 0.5\n\
             unpoint 1024 0.5\n\
             reset\n\
             projection ortho\n\
             volume 64 64 32\n\
             resize 640 480\n\
             \n\
             paint",
        )
        .unwrap();

        assert_eq!(
            commands,
            vec![
                Command::Plane(vector![0.0, 0.0, 1.0, -0.25]),
                Command::Distance(0.1),
                Command::Gradient(GradientMethod::Sobel),
                Command::ColorMap("my-map".into()),
                Command::AddPoint(point![1024.0, 0.5]),
                Command::RemovePoint(point![1024.0, 0.5]),
                Command::ResetCurve,
                Command::Projection(Projection::Orthographic),
                Command::Volume(vector![64, 64, 32]),
                Command::Resize(Viewport::new(640, 480)),
                Command::Paint,
            ]
        );
    }

    #[test]
    fn error_names_line() {
        let error = parse_script("paint\n\nslice spin 4\n").unwrap_err();
        assert!(error.to_string().contains("line 3"), "{error}");

        assert!(parse_script("gradient laplace").is_err());
        assert!(parse_script("paint now").is_err());
        assert!(parse_script("volume 1 2").is_err());
    }

    #[test]
    fn demo_script_parses() {
        let commands = parse_script(DEMO_SCRIPT).unwrap();
        assert!(commands.len() > 10);
    }
}
