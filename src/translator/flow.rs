//! Branching and the function calling convention.
//!
//! A call frame, from the caller's pushed arguments upward:
//!
//! ```text
//! ARG ->  argument 0 .. argument n-1
//!         return address
//!         saved LCL, ARG, THIS, THAT
//! LCL ->  local 0 .. local k-1
//! ```

use crate::asm::{
    function_symbol, immediate, label_symbol, return_symbol, Code, FRAME_SIZE, SCRATCH,
};
use crate::ast::Command;
use crate::context::TranslationContext;
use crate::error::Error;

/// Saved pointers in push order. `return` restores them in reverse.
const FRAME: [&str; 4] = ["LCL", "ARG", "THIS", "THAT"];

pub fn label(code: &mut Code, ctx: &TranslationContext, name: &str) {
    code.label(label_symbol(ctx.function(), name));
}

pub fn goto(code: &mut Code, ctx: &TranslationContext, name: &str) {
    code.at(label_symbol(ctx.function(), name)).c(&["0;JMP"]);
}

pub fn if_goto(code: &mut Code, ctx: &TranslationContext, name: &str) {
    code.at("SP")
        .c(&["AM=M-1", "D=M"]) // Stack popped into D
        .at(label_symbol(ctx.function(), name))
        .c(&["D;JNE"]); // False is 0
}

pub fn call(
    code: &mut Code,
    ctx: &mut TranslationContext,
    function: &str,
    args: u16,
) -> Result<(), Error> {
    let arg_offset = immediate(FRAME_SIZE, args)
        .ok_or_else(|| Error::Untranslatable(Command::Call(function.to_string(), args)))?;
    call_frame(code, ctx, function, arg_offset);
    Ok(())
}

/// Call sequence with ARG placed `arg_offset` words below the new SP.
pub(crate) fn call_frame(
    code: &mut Code,
    ctx: &mut TranslationContext,
    function: &str,
    arg_offset: u16,
) {
    let ret = return_symbol(ctx.next_return_id());

    code.at(ret.as_str()).c(&["D=A"]);
    super::memory::push_d(code);
    for pointer in FRAME {
        code.at(pointer).c(&["D=M"]);
        super::memory::push_d(code);
    }

    // LCL = SP, ARG = SP - args - 5
    code.at("SP")
        .c(&["D=M"])
        .at("LCL")
        .c(&["M=D"])
        .at_const(arg_offset)
        .c(&["D=D-A"])
        .at("ARG")
        .c(&["M=D"])
        .at(function_symbol(function))
        .c(&["0;JMP"])
        .label(ret);
}

pub fn function(code: &mut Code, ctx: &mut TranslationContext, name: &str, locals: u16) {
    ctx.enter_function(name);
    code.label(function_symbol(name));
    for _ in 0..locals {
        code.at("SP").c(&["M=M+1", "A=M-1", "M=0"]);
    }
}

pub fn ret(code: &mut Code) {
    // Return address first: with no arguments the return value overwrites it
    code.at("LCL")
        .c(&["D=M"])
        .at_const(FRAME_SIZE)
        .c(&["A=D-A", "D=M"])
        .at(SCRATCH)
        .c(&["M=D"]);

    // *ARG = pop(), SP = ARG + 1
    code.at("SP")
        .c(&["AM=M-1", "D=M"])
        .at("ARG")
        .c(&["A=M", "M=D", "D=A"])
        .at("SP")
        .c(&["M=D+1"]);

    // THAT, THIS, ARG, then LCL last since it is the reference for the rest
    for (offset, pointer) in (1..).zip(FRAME.iter().rev()) {
        code.at("LCL")
            .c(&["D=M"])
            .at_const(offset)
            .c(&["A=D-A", "D=M"])
            .at(*pointer)
            .c(&["M=D"]);
    }

    code.at(SCRATCH).c(&["A=M", "0;JMP"]);
}
