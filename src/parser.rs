use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, value},
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::{
    ast::{Command::*, *},
    error::{Error, TranslateError},
};

/// Largest value an A-instruction can load.
pub const MAX_INDEX: u16 = 0x7fff;

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_ascii_whitespace())(input)
}

// Operands of push/pop: segment name and index, nothing trailing.
fn operands(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(terminated(
        tuple((preceded(space1, word), preceded(space1, digit1))),
        space0,
    ))(input)
}

#[test]
fn test_operands() {
    assert_eq!(operands("  pointer  32"), Ok(("", ("pointer", "32"))));
    assert!(operands(" local").is_err());
    assert!(operands(" local 1 2").is_err());
    assert_eq!(operands(" local_2 1"), Ok(("", ("local_2", "1"))));
}

fn prim(input: &str) -> IResult<&str, Command> {
    all_consuming(alt((
        value(Add, tag("add")),
        value(Sub, tag("sub")),
        value(Neg, tag("neg")),
        value(Eq, tag("eq")),
        value(Gt, tag("gt")),
        value(Lt, tag("lt")),
        value(And, tag("and")),
        value(Or, tag("or")),
        value(Not, tag("not")),
    )))(input)
}

#[test]
fn test_prim() {
    assert_eq!(prim("neg"), Ok(("", Neg)));
    assert!(prim("negate").is_err());
}

fn index(text: &str, line: &str) -> Result<u16, TranslateError> {
    text.parse::<u16>()
        .ok()
        .filter(|arg| *arg <= MAX_INDEX)
        .ok_or_else(|| TranslateError::InvalidCommand(format!("index out of range in '{}'", line)))
}

/// Parses one non-empty, comment-free line.
pub fn parse_line(line: &str, file: &str) -> Result<Command, TranslateError> {
    let malformed = || TranslateError::InvalidCommand(line.to_string());
    let (rest, op) = word(line).map_err(|_| malformed())?;

    match op {
        "push" | "pop" => {
            let (_, (seg, arg)) = operands(rest).map_err(|_| malformed())?;
            let segment = Segment::resolve(seg)?;
            let arg = index(arg, line)?;
            Ok(if op == "push" {
                Push(segment, arg, file.to_string())
            } else {
                Pop(segment, arg, file.to_string())
            })
        }
        _ => match prim(op) {
            Ok((_, command)) => {
                all_consuming(space0::<_, nom::error::Error<&str>>)(rest)
                    .map_err(|_| malformed())?;
                Ok(command)
            }
            Err(_) => Err(TranslateError::UnsupportedInstruction(op.to_string())),
        },
    }
}

#[test]
fn test_push() {
    assert_eq!(
        parse_line("push  pointer  32", "Foo"),
        Ok(Push(Segment::Pointer, 32, "Foo".to_string()))
    );
}

/// Parses a whole `.vm` source. `file` is the base name of the source, used
/// for static symbols and error reports.
pub fn parse(input: &str, file: &str) -> Result<Vec<Command>, Error> {
    let mut commands = vec![];

    for (number, line) in input.lines().enumerate() {
        let line = line.split_once("//").map(|(s, _)| s).unwrap_or(line).trim();
        if line.is_empty() {
            continue;
        }

        let command = parse_line(line, file).map_err(|source| Error::Parse {
            file: file.to_string(),
            line: number + 1,
            source,
        })?;
        commands.push(command);
    }

    Ok(commands)
}
