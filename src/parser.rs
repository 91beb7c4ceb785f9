use nom::{
    branch::alt,
    bytes::complete::{is_a, tag},
    character::{
        complete::{digit1, space1},
        is_digit,
    },
    combinator::{all_consuming, map, map_res, value, verify},
    sequence::tuple,
    IResult,
};

use crate::asm::{immediate, FRAME_SIZE};
use crate::ast::{Command::*, Segment::*, *};
use crate::error::{ParseError, ParseErrorKind};

const KEYWORDS: [&str; 17] = [
    "push", "pop", "add", "sub", "neg", "eq", "gt", "lt", "and", "or", "not", "label", "goto",
    "if-goto", "function", "call", "return",
];

fn integer(input: &str) -> IResult<&str, u16> {
    map_res(digit1, |c: &str| c.parse())(input)
}

fn segment(input: &str) -> IResult<&str, Segment> {
    alt((
        value(Constant, tag("constant")),
        value(Local, tag("local")),
        value(Static, tag("static")),
        value(Argument, tag("argument")),
        value(This, tag("this")),
        value(That, tag("that")),
        value(Pointer, tag("pointer")),
        value(Temp, tag("temp")),
    ))(input)
}

fn push(input: &str) -> IResult<&str, Command> {
    map(
        tuple((tag("push"), space1, segment, space1, integer)),
        |(_, _, segment, _, arg)| Push(segment, arg),
    )(input)
}

fn pop(input: &str) -> IResult<&str, Command> {
    map(
        tuple((tag("pop"), space1, segment, space1, integer)),
        |(_, _, segment, _, arg)| Pop(segment, arg),
    )(input)
}

fn prim(input: &str) -> IResult<&str, Command> {
    alt((
        value(Binary(BinaryOp::Add), tag("add")),
        value(Binary(BinaryOp::Sub), tag("sub")),
        value(Unary(UnaryOp::Neg), tag("neg")),
        value(Compare(CompareOp::Eq), tag("eq")),
        value(Compare(CompareOp::Gt), tag("gt")),
        value(Compare(CompareOp::Lt), tag("lt")),
        value(Binary(BinaryOp::And), tag("and")),
        value(Binary(BinaryOp::Or), tag("or")),
        value(Unary(UnaryOp::Not), tag("not")),
        value(Return, tag("return")),
    ))(input)
}

fn symbol(input: &str) -> IResult<&str, String> {
    map(
        verify(
            is_a("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_.$:0123456789"),
            |c: &str| !is_digit(c.as_bytes()[0]),
        ),
        |sym: &str| sym.to_string(),
    )(input)
}

fn branching(input: &str) -> IResult<&str, Command> {
    map(
        tuple((
            alt((tag("label"), tag("goto"), tag("if-goto"))),
            space1,
            symbol,
        )),
        |(op, _, sym)| match op {
            "label" => Label(sym),
            "goto" => Goto(sym),
            _ => IfGoto(sym),
        },
    )(input)
}

fn function(input: &str) -> IResult<&str, Command> {
    map(
        tuple((
            alt((tag("function"), tag("call"))),
            space1,
            symbol,
            space1,
            integer,
        )),
        |(op, _, name, _, n)| match op {
            "function" => Function(name, n),
            _ => Call(name, n),
        },
    )(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    all_consuming(alt((push, pop, function, branching, prim)))(input)
}

/// Works out why `line` failed to parse.
fn diagnose(line: &str) -> ParseErrorKind {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    match head {
        "push" | "pop" => match words.next() {
            Some(seg) if all_consuming(segment)(seg).is_err() => {
                ParseErrorKind::UnrecognizedSegment(seg.to_string())
            }
            _ => ParseErrorKind::MalformedCommand(line.to_string()),
        },
        _ if KEYWORDS.contains(&head) => ParseErrorKind::MalformedCommand(line.to_string()),
        _ => ParseErrorKind::UnrecognizedCommand(head.to_string()),
    }
}

/// Rejects operands whose emitted A-instruction value would not fit.
fn check_range(command: &Command) -> Result<(), ParseErrorKind> {
    match command {
        Push(Constant, n) => immediate(0, *n)
            .map(drop)
            .ok_or(ParseErrorKind::ConstantOutOfRange(*n)),
        // Static indices only appear in symbol names
        Push(Static, _) | Pop(Static, _) => Ok(()),
        Push(seg, n) | Pop(seg, n) => immediate(seg.base().unwrap_or(0), *n)
            .map(drop)
            .ok_or(ParseErrorKind::IndexOutOfRange(seg.name(), *n)),
        Call(_, n) => immediate(FRAME_SIZE, *n)
            .map(drop)
            .ok_or(ParseErrorKind::ArgumentCountOutOfRange(*n)),
        _ => Ok(()),
    }
}

/// Parses one source line. Comment-only and blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseErrorKind> {
    let line = line.split_once("//").map(|(s, _)| s).unwrap_or(line).trim();
    if line.is_empty() {
        return Ok(None);
    }

    match command(line) {
        Ok((_, Pop(Constant, _))) => Err(ParseErrorKind::PopConstant),
        Ok((_, command)) => {
            check_range(&command)?;
            Ok(Some(command))
        }
        Err(_) => Err(diagnose(line)),
    }
}

/// Parses a whole source file, stopping at the first bad line.
pub fn parse(input: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = vec![];

    for (n, line) in input.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(kind) => return Err(ParseError { line: n + 1, kind }),
        }
    }

    Ok(commands)
}
