use crate::asm::{Code, FRAME_SIZE, STACK_BASE};
use crate::context::TranslationContext;

use super::flow;

/// Function the bootstrap hands control to.
pub const ENTRY_FUNCTION: &str = "Sys.init";

/// SP = 256, then `call Sys.init 0`.
pub fn bootstrap(code: &mut Code, ctx: &mut TranslationContext) {
    code.at_const(STACK_BASE).c(&["D=A"]).at("SP").c(&["M=D"]);
    flow::call_frame(code, ctx, ENTRY_FUNCTION, FRAME_SIZE);
}
