use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ast::Command;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unrecognized command `{0}`")]
    UnrecognizedCommand(String),
    #[error("unrecognized segment `{0}`")]
    UnrecognizedSegment(String),
    #[error("malformed command `{0}`")]
    MalformedCommand(String),
    #[error("cannot pop into the constant segment")]
    PopConstant,
    #[error("constant {0} does not fit in an A-instruction")]
    ConstantOutOfRange(u16),
    #[error("{0} {1} is outside the addressable range")]
    IndexOutOfRange(&'static str, u16),
    #[error("call with {0} arguments is outside the addressable range")]
    ArgumentCountOutOfRange(u16),
}

/// A rejected source line. `line` is 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing input path")]
    MissingInputPath,
    #[error("invalid input path: {}", .0.display())]
    InvalidInputPath(PathBuf),
    #[error("cannot access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to translate {file}")]
    Parse {
        file: String,
        #[source]
        source: ParseError,
    },
    #[error("cannot translate `{0}`")]
    Untranslatable(Command),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
