use crate::asm::{immediate, static_symbol, Address, Code, SCRATCH};
use crate::ast::{Command, Segment};
use crate::context::TranslationContext;
use crate::error::Error;

/// Where a segment's cells live.
enum Location {
    /// Base address held in the named register.
    Indirect(&'static str),
    /// Fixed address known at translation time.
    Direct(Address),
    Immediate,
}

fn locate(ctx: &TranslationContext, segment: Segment, index: u16) -> Option<Location> {
    let location = match segment {
        Segment::Local => Location::Indirect("LCL"),
        Segment::Argument => Location::Indirect("ARG"),
        Segment::This => Location::Indirect("THIS"),
        Segment::That => Location::Indirect("THAT"),
        Segment::Pointer | Segment::Temp => {
            let base = segment.base()?;
            Location::Direct(Address::Constant(immediate(base, index)?))
        }
        Segment::Static => Location::Direct(Address::Symbol(static_symbol(ctx.file(), index))),
        Segment::Constant => Location::Immediate,
    };
    // Indirect and immediate accesses emit the index itself
    match location {
        Location::Indirect(_) | Location::Immediate => immediate(0, index).map(|_| location),
        direct => Some(direct),
    }
}

/// Pushes D onto the stack.
pub(crate) fn push_d(code: &mut Code) {
    code.at("SP").c(&[
        "M=M+1",
        "A=M-1", // Don't need to refetch SP; this is safe
        "M=D",
    ]);
}

pub fn push(
    code: &mut Code,
    ctx: &TranslationContext,
    segment: Segment,
    index: u16,
) -> Result<(), Error> {
    let location = locate(ctx, segment, index)
        .ok_or_else(|| Error::Untranslatable(Command::Push(segment, index)))?;
    match location {
        Location::Indirect(base) => {
            code.at(base)
                .c(&["D=M"])
                .at_const(index)
                .c(&["A=D+A", "D=M"]);
        }
        Location::Direct(address) => {
            code.at_address(address).c(&["D=M"]);
        }
        Location::Immediate => {
            code.at_const(index).c(&["D=A"]);
        }
    }
    push_d(code);
    Ok(())
}

/// Pops the stack top into `segment[index]`. The constant segment has no
/// storage and is refused.
pub fn pop(
    code: &mut Code,
    ctx: &TranslationContext,
    segment: Segment,
    index: u16,
) -> Result<(), Error> {
    let untranslatable = || Error::Untranslatable(Command::Pop(segment, index));
    match locate(ctx, segment, index).ok_or_else(untranslatable)? {
        Location::Indirect(base) => {
            // Target address goes to scratch before the stack is touched
            code.at(base)
                .c(&["D=M"])
                .at_const(index)
                .c(&["D=D+A"])
                .at(SCRATCH)
                .c(&["M=D"])
                .at("SP")
                .c(&["AM=M-1", "D=M"])
                .at(SCRATCH)
                .c(&["A=M", "M=D"]);
        }
        Location::Direct(address) => {
            code.at("SP").c(&["AM=M-1", "D=M"]).at_address(address).c(&["M=D"]);
        }
        Location::Immediate => return Err(untranslatable()),
    }
    Ok(())
}
