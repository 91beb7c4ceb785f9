use crate::asm::{compare_symbols, Code};
use crate::ast::{BinaryOp, CompareOp, UnaryOp};
use crate::context::TranslationContext;

/// Points A at the stack top, then runs `body` on it in place.
fn unary(code: &mut Code, body: impl FnOnce(&mut Code)) {
    code.at("SP").c(&["A=M-1"]);
    body(code);
}

// Pops the right operand into D and points A at the left one, which `body`
// overwrites with the result.
fn binary(code: &mut Code, body: impl FnOnce(&mut Code)) {
    code.at("SP").c(&[
        "AM=M-1", // SP--, looking at top of stack now
        "D=M",    // Right arg in D
        "A=A-1",  // Looking at second arg of stack, will overwrite
    ]);
    body(code);
}

pub fn unary_op(code: &mut Code, op: UnaryOp) {
    let comp = match op {
        UnaryOp::Neg => "M=-M",
        UnaryOp::Not => "M=!M",
    };
    unary(code, |code| {
        code.c(&[comp]);
    });
}

pub fn binary_op(code: &mut Code, op: BinaryOp) {
    let comp = match op {
        BinaryOp::Add => "M=D+M",
        BinaryOp::Sub => "M=M-D",
        BinaryOp::And => "M=D&M",
        BinaryOp::Or => "M=D|M",
    };
    binary(code, |code| {
        code.c(&[comp]);
    });
}

/// Replaces the top two slots with -1 if `left op right` holds, else 0.
pub fn compare(code: &mut Code, ctx: &mut TranslationContext, op: CompareOp) {
    let jump = match op {
        CompareOp::Eq => "D;JEQ",
        CompareOp::Gt => "D;JGT",
        CompareOp::Lt => "D;JLT",
    };
    let (is_true, finish) = compare_symbols(ctx.next_compare_id());

    binary(code, |code| {
        code.c(&["D=M-D"])
            .at(is_true.as_str())
            .c(&[jump, "D=0"])
            .at(finish.as_str())
            .c(&["0;JMP"])
            .label(is_true.as_str())
            .c(&["D=-1"])
            .label(finish.as_str())
            .at("SP")
            .c(&["A=M-1", "M=D"]);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::Asm;
    use test_log::test;

    fn labels(code: &Code) -> Vec<String> {
        code.lines()
            .iter()
            .filter_map(|l| match l {
                Asm::Label(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sub_uses_first_popped_as_right_operand() {
        let mut code = Code::new();
        binary_op(&mut code, BinaryOp::Sub);
        assert_eq!(code.render(), "@SP\nAM=M-1\nD=M\nA=A-1\nM=M-D\n");
    }

    #[test]
    fn unary_keeps_stack_height() {
        let mut code = Code::new();
        unary_op(&mut code, UnaryOp::Not);
        assert_eq!(code.render(), "@SP\nA=M-1\nM=!M\n");
    }

    #[test]
    fn repeated_comparisons_get_fresh_labels() {
        let mut ctx = TranslationContext::new();
        let mut first = Code::new();
        let mut second = Code::new();
        compare(&mut first, &mut ctx, CompareOp::Eq);
        compare(&mut second, &mut ctx, CompareOp::Eq);

        let first = labels(&first);
        let second = labels(&second);
        assert_eq!(first.len(), 2);
        assert_ne!(first[0], first[1]);
        assert!(first.iter().all(|l| !second.contains(l)));
    }

    #[test]
    fn comparison_jump_matches_operator() {
        let mut ctx = TranslationContext::new();
        let mut code = Code::new();
        compare(&mut code, &mut ctx, CompareOp::Gt);
        assert!(code.lines().contains(&Asm::C("D;JGT")));
    }
}
