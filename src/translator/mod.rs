use log::{debug, trace};

use crate::asm::Code;
use crate::ast::{Command::*, *};
use crate::context::TranslationContext;
use crate::error::Error;
use crate::parser;

pub mod arithmetic;
pub mod bootstrap;
pub mod flow;
pub mod memory;

/// Session-wide output switches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Start the output with the SP setup and `call Sys.init 0`.
    pub include_bootstrap: bool,
    /// Precede every command's code with a `// <command>` comment.
    pub echo_source: bool,
}

/// One translation session: a single file, or every file of a directory
/// concatenated into one output.
pub struct Translator {
    options: Options,
    ctx: TranslationContext,
    code: Code,
}

impl Translator {
    pub fn new(options: Options) -> Self {
        debug!("new session: {:?}", options);
        let mut translator = Translator {
            options,
            ctx: TranslationContext::new(),
            code: Code::new(),
        };
        if options.include_bootstrap {
            if options.echo_source {
                translator.code.comment("bootstrap");
            }
            bootstrap::bootstrap(&mut translator.code, &mut translator.ctx);
        }
        translator
    }

    /// Switches the static namespace to the file named `stem`.
    pub fn begin_file(&mut self, stem: &str) {
        debug!("translating file {}", stem);
        self.ctx.enter_file(stem);
    }

    pub fn translate_command(&mut self, command: &Command) -> Result<(), Error> {
        trace!("{}", command);
        if self.options.echo_source {
            self.code.comment(command.to_string());
        }

        let code = &mut self.code;
        let ctx = &mut self.ctx;
        match command {
            Push(seg, arg) => memory::push(code, ctx, *seg, *arg)?,
            Pop(seg, arg) => memory::pop(code, ctx, *seg, *arg)?,
            Unary(op) => arithmetic::unary_op(code, *op),
            Binary(op) => arithmetic::binary_op(code, *op),
            Compare(op) => arithmetic::compare(code, ctx, *op),
            Label(sym) => flow::label(code, ctx, sym),
            Goto(sym) => flow::goto(code, ctx, sym),
            IfGoto(sym) => flow::if_goto(code, ctx, sym),
            Function(name, locals) => {
                debug!("entering function {}", name);
                flow::function(code, ctx, name, *locals)
            }
            Call(name, args) => flow::call(code, ctx, name, *args)?,
            Return => flow::ret(code),
        }

        Ok(())
    }

    pub fn translate(&mut self, commands: &[Command]) -> Result<(), Error> {
        for command in commands {
            self.translate_command(command)?;
        }
        Ok(())
    }

    /// Parses and translates the text of the file named `stem`.
    pub fn translate_source(&mut self, stem: &str, source: &str) -> Result<(), Error> {
        let commands = parser::parse(source).map_err(|source| Error::Parse {
            file: stem.to_string(),
            source,
        })?;
        self.begin_file(stem);
        self.translate(&commands)
    }

    pub fn finish(self) -> Code {
        self.code
    }
}
