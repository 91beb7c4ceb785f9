//! Structured Hack assembly output.
//!
//! Generators push [`Asm`] lines into a [`Code`] buffer; text only appears
//! when the buffer is rendered at the output boundary.

use std::fmt;

/// Scratch register used to hold an address or value across stack access.
pub const SCRATCH: &str = "R13";

/// Stack base address set up by the bootstrap.
pub const STACK_BASE: u16 = 256;

/// Largest value an A-instruction can carry.
pub const MAX_IMMEDIATE: u16 = 0x7fff;

/// Words a call pushes below the callee's locals: return address plus saved
/// LCL, ARG, THIS and THAT.
pub const FRAME_SIZE: u16 = 5;

/// `base + offset` if it fits in an A-instruction.
pub fn immediate(base: u16, offset: u16) -> Option<u16> {
    base.checked_add(offset).filter(|&v| v <= MAX_IMMEDIATE)
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Address {
    Constant(u16),
    Symbol(String),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Asm {
    /// `@address`
    A(Address),
    /// `dest=comp;jump`, stored as written.
    C(&'static str),
    /// `(LABEL)`
    Label(String),
    /// `// text`
    Comment(String),
}

impl fmt::Display for Asm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Asm::A(Address::Constant(n)) => write!(f, "@{}", n),
            Asm::A(Address::Symbol(s)) => write!(f, "@{}", s),
            Asm::C(c) => f.write_str(c),
            Asm::Label(l) => write!(f, "({})", l),
            Asm::Comment(c) => write!(f, "// {}", c),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Code {
    lines: Vec<Asm>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(&mut self, symbol: impl Into<String>) -> &mut Self {
        self.lines.push(Asm::A(Address::Symbol(symbol.into())));
        self
    }

    pub fn at_const(&mut self, value: u16) -> &mut Self {
        self.at_address(Address::Constant(value))
    }

    pub fn at_address(&mut self, address: Address) -> &mut Self {
        self.lines.push(Asm::A(address));
        self
    }

    /// Appends C-instructions in order.
    pub fn c(&mut self, comps: &[&'static str]) -> &mut Self {
        self.lines.extend(comps.iter().map(|&c| Asm::C(c)));
        self
    }

    pub fn label(&mut self, name: impl Into<String>) -> &mut Self {
        self.lines.push(Asm::Label(name.into()));
        self
    }

    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Asm::Comment(text.into()));
        self
    }

    pub fn lines(&self) -> &[Asm] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders one instruction per line, newline-terminated.
    pub fn render(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }
}

// Generated symbol names. Every synthetic name carries a prefix so it can
// never collide with another kind.

pub fn label_symbol(function: Option<&str>, name: &str) -> String {
    match function {
        Some(function) => format!("l_{}${}", function, name),
        None => format!("g_{}", name),
    }
}

pub fn function_symbol(name: &str) -> String {
    format!("f_{}", name)
}

pub fn compare_symbols(id: usize) -> (String, String) {
    (format!("h_true.{}", id), format!("h_finish.{}", id))
}

pub fn return_symbol(id: usize) -> String {
    format!("h_return.{}", id)
}

pub fn static_symbol(file: &str, index: u16) -> String {
    format!("s_{}.{}", file, index)
}
