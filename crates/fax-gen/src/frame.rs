//! Stack-frame addressing (`SPEC_FULL.md` §4.3, Open Question decision 3).
//!
//! There is one fixed sign convention for the whole generator: inside a
//! function body a slot is read/written relative to `SP` by its own
//! `inner_id`; at a call site, arguments are written into the callee's
//! future frame measured from the *caller's* stack pointer.

use fax_ast::{ScopeId, ScopeTable};

/// Number of parameter/local slots in a function's scope, excluding the
/// function's own self-entry at `inner_id` 0.
pub fn slot_count(scopes: &ScopeTable<'_>, scope: ScopeId) -> u32 {
    scopes.scope(scope).len() as u32 - 1
}

/// `[SP - (k - 1)]` for a parameter/local with `inner_id = k`, read or
/// written from inside its own function.
pub fn local_offset(inner_id: u32) -> i32 {
    -(inner_id as i32 - 1)
}

/// `[SP + (N - i)]` for the i-th (0-based) positional argument at a call
/// site, where `N` is the callee's slot count.
pub fn arg_offset(callee_slot_count: u32, arg_index: u32) -> i32 {
    callee_slot_count as i32 - arg_index as i32
}

/// Renders a signed `SP` offset as the `[SP±k]` addressing text.
pub fn addr(offset: i32) -> String {
    match offset.cmp(&0) {
        std::cmp::Ordering::Equal => "[SP]".to_string(),
        std::cmp::Ordering::Greater => format!("[SP+{offset}]"),
        std::cmp::Ordering::Less => format!("[SP-{}]", -offset),
    }
}
