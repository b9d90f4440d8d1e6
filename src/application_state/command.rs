//! # Commands
//!
//! Text commands accepted by the headless session, one per line:
//!
//! ```text
//! select <1-4>
//! place <ox> <oy> <oz> <dx> <dy> <dz>
//! break <ox> <oy> <oz> <dx> <dy> <dz>
//! set <x> <y> <z>
//! remove <x> <y> <z>
//! get <x> <y> <z>
//! info
//! ```
//!
//! `place` and `break` take a ray (eye position and look direction) and act
//! on whatever it hits, the way mouse clicks do in an interactive client.

use std::str::FromStr;

use cgmath::{Point3, Vector3};
use thiserror::Error;

/// Errors raised while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error("{command} takes {expected} arguments, got {got}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{0:?} is not a number")]
    InvalidNumber(String),
}

/// A parsed session command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Select a hotbar slot by its number key.
    Select(String),
    /// Place the selected block against whatever the ray hits.
    Place {
        origin: Point3<f32>,
        direction: Vector3<f32>,
    },
    /// Break whatever the ray hits.
    Break {
        origin: Point3<f32>,
        direction: Vector3<f32>,
    },
    /// Place the selected block at an explicit coordinate.
    Set(Point3<i32>),
    /// Remove the block at an explicit coordinate.
    Remove(Point3<i32>),
    /// Query the block at an explicit coordinate.
    Get(Point3<i32>),
    /// Report world statistics.
    Info,
}

fn expect_arity(command: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::WrongArity {
            command,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn parse_number<T: FromStr>(arg: &str) -> Result<T, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

fn parse_coordinate(command: &'static str, args: &[&str]) -> Result<Point3<i32>, CommandError> {
    expect_arity(command, args, 3)?;
    Ok(Point3::new(
        parse_number(args[0])?,
        parse_number(args[1])?,
        parse_number(args[2])?,
    ))
}

fn parse_ray(
    command: &'static str,
    args: &[&str],
) -> Result<(Point3<f32>, Vector3<f32>), CommandError> {
    expect_arity(command, args, 6)?;
    let values = args
        .iter()
        .map(|arg| parse_number::<f32>(arg))
        .collect::<Result<Vec<f32>, _>>()?;
    Ok((
        Point3::new(values[0], values[1], values[2]),
        Vector3::new(values[3], values[4], values[5]),
    ))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match name.to_ascii_lowercase().as_str() {
            "select" => {
                expect_arity("select", &args, 1)?;
                Ok(Command::Select(args[0].to_string()))
            }
            "place" => {
                let (origin, direction) = parse_ray("place", &args)?;
                Ok(Command::Place { origin, direction })
            }
            "break" => {
                let (origin, direction) = parse_ray("break", &args)?;
                Ok(Command::Break { origin, direction })
            }
            "set" => Ok(Command::Set(parse_coordinate("set", &args)?)),
            "remove" => Ok(Command::Remove(parse_coordinate("remove", &args)?)),
            "get" => Ok(Command::Get(parse_coordinate("get", &args)?)),
            "info" => {
                expect_arity("info", &args, 0)?;
                Ok(Command::Info)
            }
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}
