//! Translator from the stack-based VM language to Hack assembly.

pub mod asm;
pub mod ast;
pub mod context;
pub mod driver;
pub mod error;
pub mod parser;
pub mod translator;

pub use error::{Error, ParseError, ParseErrorKind};
pub use translator::{Options, Translator};
