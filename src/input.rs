use sodium::Stream;

use crate::board::CELLS;
use crate::game::Intent;
use crate::Error;

/// Splits raw input lines into well-formed intents and parse errors.
pub struct IntentParser {
    pub intents: Stream<Intent>,
    pub error: Stream<Error>,
}

impl IntentParser {
    pub fn new(input_stream: &Stream<String>) -> IntentParser {
        let (intents, error) = input_stream
            .filter(|line: &String| !line.trim().is_empty())
            .map(|line: &String| parse_intent(line))
            .split_res();

        IntentParser { intents, error }
    }
}

/// Parses one command line.
///
/// Cells are numbered 1-9 row-major, steps are 0-based history indices.
/// A bare number is shorthand for `place`.
pub fn parse_intent(line: &str) -> Result<Intent, Error> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let argument = words.next();
    if words.next().is_some() {
        return Err(Error::InvalidCommand(line.trim().to_string()));
    }

    match (command.as_str(), argument) {
        ("place", Some(cell)) => place(cell),
        ("jump", Some(step)) => Ok(Intent::JumpTo(number(step)?)),
        ("hover", Some(step)) => Ok(Intent::SetHover(number(step)?)),
        ("unhover", None) => Ok(Intent::ClearHover),
        ("new", None) => Ok(Intent::NewGame),
        (cell, None) if cell.starts_with(|c: char| c.is_ascii_digit()) => place(cell),
        _ => Err(Error::InvalidCommand(line.trim().to_string())),
    }
}

fn place(cell: &str) -> Result<Intent, Error> {
    let cell = number(cell)?;
    if (1..=CELLS).contains(&cell) {
        Ok(Intent::PlaceMark(cell - 1))
    } else {
        Err(Error::InvalidIndex(cell))
    }
}

fn number(word: &str) -> Result<usize, Error> {
    word.parse::<usize>().map_err(Error::InvalidInteger)
}
