//! Stack-machine assembly emission (`SPEC_FULL.md` §4.3).
//!
//! One generator instance owns the whole program: a text buffer and a
//! monotonic label-id counter that is never reset or reused, which is what
//! gives every emitted label its uniqueness (Testable Property 5).

use fax_ast::{Ast, IdentRef, NodeArena, NodeId, NodeToken, ScopeTable, SymbolKind};
use fax_lex::{Kw, Op, Sep};

use crate::frame;

pub(crate) struct AsmGenerator<'g, 'a> {
    arena: &'g NodeArena<'a>,
    scopes: &'g ScopeTable<'a>,
    root: NodeId,
    out: String,
    next_label: u32,
    current_frame_size: u32,
}

impl<'g, 'a> AsmGenerator<'g, 'a> {
    pub(crate) fn new(ast: &'g Ast<'a>) -> Self {
        Self {
            arena: &ast.arena,
            scopes: &ast.scopes,
            root: ast.root,
            out: String::new(),
            next_label: 0,
            current_frame_size: 0,
        }
    }

    pub(crate) fn generate(mut self) -> String {
        self.line("CALL :func_main");
        self.line("PUSHR A0");
        self.line("OUT");
        self.line("HLT");
        if let Some(program) = self.arena.get(self.root).left {
            self.generate_program(program);
        }
        self.out
    }

    // ---- output helpers ----------------------------------------------

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn label(&mut self, name: &str) {
        self.out.push(':');
        self.out.push_str(name);
        self.out.push('\n');
    }

    fn fresh_label(&mut self) -> u32 {
        let id = self.next_label;
        self.next_label += 1;
        id
    }

    // ---- top level ------------------------------------------------------

    /// Walks the left-associative `{` fold `parse_program` built, emitting
    /// one function per leaf.
    fn generate_program(&mut self, id: NodeId) {
        let node = *self.arena.get(id);
        match node.token {
            NodeToken::Separator(Sep::LBrace) => {
                if let Some(l) = node.left {
                    self.generate_program(l);
                }
                if let Some(r) = node.right {
                    self.generate_program(r);
                }
            }
            NodeToken::Identifier(ident) if ident.kind == SymbolKind::Function => {
                self.generate_function(ident, node.right);
            }
            other => debug_assert!(false, "unexpected program node {other:?}"),
        }
    }

    fn generate_function(&mut self, ident: IdentRef<'a>, body: Option<NodeId>) {
        let n = frame::slot_count(self.scopes, ident.scope_id);
        self.current_frame_size = n;

        self.label(&format!("func_{}", ident.name));
        self.line(&format!("PUSH {n}"));
        self.line("PUSHR SP");
        self.line("ADD");
        self.line("POPR SP");

        self.generate_block(body);
    }

    /// Walks the right-leaning `;` spine a block parses into.
    fn generate_block(&mut self, mut head: Option<NodeId>) {
        while let Some(id) = head {
            let node = *self.arena.get(id);
            debug_assert!(matches!(node.token, NodeToken::Separator(Sep::Semicolon)));
            if let Some(stmt) = node.left {
                self.generate_statement(stmt);
            }
            head = node.right;
        }
    }

    // ---- statements -------------------------------------------------

    fn generate_statement(&mut self, id: NodeId) {
        let node = *self.arena.get(id);
        match node.token {
            NodeToken::Keyword(Kw::Return) => match node.left {
                Some(expr) => {
                    self.generate_expr(expr);
                    self.line("POPR A0");
                    self.line("PUSHR SP");
                    self.line(&format!("PUSH {}", self.current_frame_size));
                    self.line("SUB");
                    self.line("POPR SP");
                    self.line("RET");
                }
                None => debug_assert!(false, "return must carry an expression"),
            },
            NodeToken::Keyword(Kw::While) => match node.left {
                Some(cond) => self.generate_while(cond, node.right),
                None => debug_assert!(false, "while must carry a condition"),
            },
            NodeToken::Keyword(Kw::If) => match node.left {
                Some(cond) => self.generate_if(cond, node.right),
                None => debug_assert!(false, "if must carry a condition"),
            },
            NodeToken::Operator(Op::Assign) => match (node.left, node.right) {
                (Some(target), Some(rhs)) => {
                    self.generate_expr(rhs);
                    self.store(target);
                }
                _ => debug_assert!(false, "assignment must carry a target and a right-hand side"),
            },
            NodeToken::Keyword(Kw::In) => match node.left {
                Some(target) => {
                    self.line("IN");
                    self.store(target);
                }
                None => debug_assert!(false, "`in` must carry a target"),
            },
            NodeToken::Keyword(Kw::Out) => match node.left {
                Some(expr) => {
                    self.generate_expr(expr);
                    self.line("OUT");
                }
                None => debug_assert!(false, "`out` must carry an expression"),
            },
            // A bare expression statement: its value is left on the data
            // stack. The instruction set has no drop-top-of-stack opcode,
            // so this is accepted as a limitation rather than worked around.
            _ => self.generate_expr(id),
        }
    }

    fn generate_while(&mut self, cond: NodeId, body: Option<NodeId>) {
        let id = self.fresh_label();
        self.label(&format!("beginwhile_{id}"));
        self.generate_expr(cond);
        self.line("PUSH 0");
        self.line(&format!("JE :endwhile_{id}"));
        self.generate_block(body);
        self.line(&format!("JMP :beginwhile_{id}"));
        self.label(&format!("endwhile_{id}"));
    }

    /// `right` is either the plain then-block chain head (no `else`) or a
    /// synthetic `Keyword(Else)` wrapper node (`left` = then, `right` =
    /// else) — see `DESIGN.md`'s Open Question decisions. A real then-block
    /// chain head is always `Separator(Semicolon)`, never `Keyword(Else)`,
    /// so checking the token tag disambiguates the two shapes.
    fn generate_if(&mut self, cond: NodeId, right: Option<NodeId>) {
        let id = self.fresh_label();
        let wrapper = right.filter(|r| matches!(self.arena.get(*r).token, NodeToken::Keyword(Kw::Else)));

        match wrapper {
            Some(w) => {
                let w = *self.arena.get(w);
                self.generate_expr(cond);
                self.line("PUSH 0");
                self.line(&format!("JE :else_{id}"));
                self.generate_block(w.left);
                self.line(&format!("JMP :endif_{id}"));
                self.label(&format!("else_{id}"));
                self.generate_block(w.right);
                self.label(&format!("endif_{id}"));
            }
            None => {
                self.generate_expr(cond);
                self.line("PUSH 0");
                self.line(&format!("JE :endif_{id}"));
                self.generate_block(right);
                self.label(&format!("endif_{id}"));
            }
        }
    }

    fn store(&mut self, target: NodeId) {
        match self.arena.get(target).token {
            NodeToken::Identifier(ident) => {
                self.line(&format!("POPM {}", frame::addr(frame::local_offset(ident.inner_id))));
            }
            other => debug_assert!(false, "assignment target must be an identifier, got {other:?}"),
        }
    }

    // ---- expressions --------------------------------------------------

    fn generate_expr(&mut self, id: NodeId) {
        let node = *self.arena.get(id);
        match node.token {
            NodeToken::NumLiteral(n) => self.line(&format!("PUSH {n}")),
            NodeToken::Identifier(ident) => self.load(ident),
            NodeToken::Operator(op) if is_comparison(op) => match (node.left, node.right) {
                (Some(l), Some(r)) => self.generate_comparison(op, l, r),
                _ => debug_assert!(false, "comparison operator must carry both operands"),
            },
            NodeToken::Operator(op) => match (node.left, node.right) {
                (Some(l), Some(r)) => {
                    self.generate_expr(l);
                    self.generate_expr(r);
                    self.line(op.mnemonic());
                }
                _ => debug_assert!(false, "binary operator must carry both operands"),
            },
            NodeToken::Call => match node.left {
                Some(callee) => self.generate_call(callee, node.right),
                None => debug_assert!(false, "call must carry a callee"),
            },
            other => debug_assert!(false, "unexpected expression node {other:?}"),
        }
    }

    fn load(&mut self, ident: IdentRef<'a>) {
        match ident.kind {
            SymbolKind::Variable | SymbolKind::Parameter => {
                self.line(&format!("PUSHM {}", frame::addr(frame::local_offset(ident.inner_id))));
            }
            SymbolKind::Function => debug_assert!(false, "a function name used outside a call"),
        }
    }

    /// Materializes a comparison's 0/1 result with a fresh label-id pair
    /// per occurrence, per the conditional-jump idiom.
    fn generate_comparison(&mut self, op: Op, left: NodeId, right: NodeId) {
        let id = self.fresh_label();
        let mnem = op.mnemonic().to_lowercase();

        self.generate_expr(left);
        self.generate_expr(right);
        self.line("SUB");
        self.line("PUSH 0");
        self.line(&format!("{} :{mnem}_true_{id}", jump_mnemonic(op)));
        self.line("PUSH 0");
        self.line(&format!("JMP :{mnem}_false_{id}"));
        self.label(&format!("{mnem}_true_{id}"));
        self.line("PUSH 1");
        self.label(&format!("{mnem}_false_{id}"));
    }

    fn generate_call(&mut self, callee: NodeId, args: Option<NodeId>) {
        let callee_ident = match self.arena.get(callee).token {
            NodeToken::Identifier(ident) => ident,
            other => {
                debug_assert!(false, "call target must be an identifier, got {other:?}");
                return;
            }
        };
        let Some(callee_scope) = self.scopes.function_scope(callee_ident.name) else {
            debug_assert!(false, "a resolved call target must own a scope");
            return;
        };
        let n = frame::slot_count(self.scopes, callee_scope);

        let mut arg_exprs = Vec::new();
        flatten_args(self.arena, args, &mut arg_exprs);
        for (i, arg) in arg_exprs.iter().enumerate() {
            self.generate_expr(*arg);
            self.line(&format!("POPM {}", frame::addr(frame::arg_offset(n, i as u32))));
        }

        self.line(&format!("CALL :func_{}", callee_ident.name));
        self.line("PUSHR A0");
    }
}

fn is_comparison(op: Op) -> bool {
    matches!(op, Op::Eq | Op::Neq | Op::Gt | Op::Lt | Op::Geq | Op::Leq)
}

fn jump_mnemonic(op: Op) -> &'static str {
    match op {
        Op::Eq => "JE",
        Op::Neq => "JNE",
        Op::Gt => "JA",
        Op::Lt => "JB",
        Op::Geq => "JAE",
        Op::Leq => "JBE",
        _ => unreachable!("not a comparison operator"),
    }
}

/// Flattens the left-leaning `,` chain `parse_arg_list` builds into
/// left-to-right evaluation order.
fn flatten_args<'a>(arena: &NodeArena<'a>, args: Option<NodeId>, out: &mut Vec<NodeId>) {
    let Some(id) = args else { return };
    let node = arena.get(id);
    if matches!(node.token, NodeToken::Separator(Sep::Comma)) {
        flatten_args(arena, node.left, out);
        match node.right {
            Some(arg) => out.push(arg),
            None => debug_assert!(false, "comma node must carry a right argument"),
        }
    } else {
        out.push(id);
    }
}
