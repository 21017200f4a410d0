//! fax-gen - Stack-machine assembly emitter.
//!
//! Walks a fully resolved `fax_ast::Ast` and writes line-oriented textual
//! assembly over the abstract stack machine described in `SPEC_FULL.md`
//! §4.3: a data stack, registers `A0`/`SP`, and addressable stack memory
//! `[SP±k]`. The generator assumes the tree is well-formed; see `asm.rs`
//! for the invariants it leans on via `debug_assert!` rather than `Result`.

mod asm;
mod error;
mod frame;

use std::io::Write;

use fax_ast::Ast;

pub use error::GenError;

/// Emits assembly for `ast` to `out`. The only real failure mode left once
/// the tree is well-formed is the writer itself refusing the bytes.
pub fn emit(ast: &Ast<'_>, out: &mut impl Write) -> Result<(), GenError> {
    let text = asm::AsmGenerator::new(ast).generate();
    out.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(src: &str) -> String {
        let (tokens, idents) = fax_lex::lex(src).expect("fixture should lex");
        let ast = fax_par::parse(tokens, idents).expect("fixture should parse");
        let mut buf = Vec::new();
        emit(&ast, &mut buf).expect("fixture should generate");
        String::from_utf8(buf).expect("assembly is ASCII")
    }

    #[test]
    fn program_prologue_calls_main_and_halts() {
        let asm = generate("defun main() { return 0; }");
        assert!(asm.starts_with("CALL :func_main\nPUSHR A0\nOUT\nHLT\n"));
        assert!(asm.contains(":func_main\n"));
    }

    /// S1: `out 2 + 3 * 4;` respects `*` binding tighter than `+`.
    #[test]
    fn s1_arithmetic_precedence_multiplies_before_adding() {
        let asm = generate("defun main() { out 2 + 3 * 4; return 0; }");
        let mul_pos = asm.find("MUL").unwrap();
        let add_pos = asm.find("ADD").unwrap();
        assert!(mul_pos < add_pos);
        assert!(asm.contains("PUSH 2\n"));
        assert!(asm.contains("PUSH 3\n"));
        assert!(asm.contains("PUSH 4\n"));
        assert!(asm.contains("OUT\n"));
    }

    /// S2: `if x > 3 {..} else {..}` uses the `JA` comparison idiom and an
    /// `:else_<id>` / `JMP :endif_<id>` pair.
    #[test]
    fn s2_if_else_uses_greater_than_idiom_and_else_label() {
        let src = "defun main() { x = 5; if x > 3 { out 1; } else { out 0; } return 0; }";
        let asm = generate(src);
        assert!(asm.contains("JA :gt_true_"));
        assert!(asm.contains(":else_"));
        assert!(asm.contains("JMP :endif_"));
    }

    /// S3: `while i < 5 {..}` uses the `beginwhile`/`endwhile` label pair
    /// and the `JB` comparison idiom, with a conditional `JE` guarding exit.
    #[test]
    fn s3_while_loop_uses_begin_end_labels_and_less_than_idiom() {
        let src = "defun main() { i = 0; while i < 5 { out i; i = i + 1; } return 0; }";
        let asm = generate(src);
        assert!(asm.contains(":beginwhile_"));
        assert!(asm.contains(":endwhile_"));
        assert!(asm.contains("JB :lt_true_"));
        assert!(asm.contains("JE :endwhile_"));
    }

    /// S4: calling `add(7, 35)` writes both arguments into the callee's
    /// frame before `CALL`, then surfaces `A0` on the data stack.
    #[test]
    fn s4_call_writes_arguments_into_callee_frame_in_order() {
        let src = "defun add(a,b) { return a + b; } defun main() { out add(7, 35); return 0; }";
        let asm = generate(src);
        assert!(asm.contains("PUSH 7\n"));
        assert!(asm.contains("POPM [SP+2]\n"));
        assert!(asm.contains("PUSH 35\n"));
        assert!(asm.contains("POPM [SP+1]\n"));
        assert!(asm.contains("CALL :func_add\n"));
        assert!(asm.contains("PUSHR A0\n"));
    }

    #[test]
    fn every_label_emitted_is_unique() {
        let src = "defun main() { \
            i = 0; \
            while i < 5 { if i == 2 { out 1; } else { out 0; } i = i + 1; } \
            return 0; }";
        let asm = generate(src);
        let labels: Vec<&str> = asm
            .lines()
            .filter(|l| l.starts_with(':'))
            .collect();
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(labels.len(), unique.len());
    }

    #[test]
    fn return_epilogue_restores_the_stack_pointer_by_the_frame_size() {
        let asm = generate("defun main(a) { return a; }");
        // N = 1 parameter.
        assert!(asm.contains("PUSH 1\n"));
        assert!(asm.contains("POPR A0\nPUSHR SP\nPUSH 1\nSUB\nPOPR SP\nRET\n"));
    }
}
