//! The instruction program (§3, "Instruction program"): a logically
//! ordered sequence of already-formatted instruction lines.
//!
//! Built on `ifjc_util::IndexVec` instead of a pointer-linked list —
//! safe Rust has no ergonomic doubly-linked list, and every operation
//! this program needs (append, insert-before, insert-after, splice a
//! subrange, append one whole program onto another) is a direct
//! `Vec`/`IndexVec` primitive. See DESIGN.md for this deviation.

use ifjc_util::{Idx, IndexVec, IndexVecError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstrId(u32);

impl Idx for InstrId {
    fn from_usize(idx: usize) -> Self {
        InstrId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// An ordered buffer of formatted instruction lines.
///
/// The expression parser builds short-lived sub-programs on a *program
/// stack* (a plain `Vec<Program>` owned by the parser) to defer
/// emission until operator precedence/associativity has been resolved,
/// then splices or appends them into the function's running program —
/// see `ifjc-parse::expr`.
#[derive(Clone, Debug, Default)]
pub struct Program {
    instructions: IndexVec<InstrId, String>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            instructions: IndexVec::new(),
        }
    }

    pub fn append(&mut self, line: impl Into<String>) -> InstrId {
        self.instructions.push(line.into())
    }

    pub fn insert_before(&mut self, at: InstrId, line: impl Into<String>) {
        self.instructions.insert_before(at, line.into());
    }

    pub fn insert_after(&mut self, at: InstrId, line: impl Into<String>) {
        self.instructions.insert_after(at, line.into());
    }

    /// Append every line of `other` onto the end of `self`, draining it.
    pub fn append_program(&mut self, other: &mut Program) {
        let mut lines = std::mem::take(&mut other.instructions).into_vec();
        self.instructions.append_all(&mut lines);
    }

    /// Replace the `start..end` range of already-appended lines with
    /// `replacement`, in order. Used when the expression parser has to
    /// re-emit a sub-expression after discovering its result type late
    /// (e.g. an implicit Int→Num coercion inserted once both operand
    /// types are known).
    ///
    /// A `start..end` range that doesn't fit the program's current
    /// length is an internal invariant violation (some earlier splice
    /// or append lost track of an `InstrId`), not a user-facing
    /// diagnostic — it surfaces as [`IndexVecError`]/exit code 99 rather
    /// than a panic.
    pub fn splice_subrange(&mut self, start: InstrId, end: InstrId, replacement: Vec<String>) -> Result<(), IndexVecError> {
        let range = self.instructions.checked_range(start, end)?;
        let mut raw = std::mem::take(&mut self.instructions).into_vec();
        raw.splice(range, replacement);
        self.instructions = raw.into_iter().collect();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().map(String::as_str)
    }

    pub fn render(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_render_preserves_order() {
        let mut p = Program::new();
        p.append("DEFVAR LF@x");
        p.append("MOVE LF@x int@1");
        assert_eq!(p.render(), "DEFVAR LF@x\nMOVE LF@x int@1");
    }

    #[test]
    fn insert_before_shifts_subsequent_lines() {
        let mut p = Program::new();
        p.append("LABEL start");
        let second = p.append("JUMP end");
        p.insert_before(second, "PUSHS int@0");
        let rendered: Vec<_> = p.lines().collect();
        assert_eq!(rendered, vec!["LABEL start", "PUSHS int@0", "JUMP end"]);
    }

    #[test]
    fn append_program_drains_the_source() {
        let mut main = Program::new();
        main.append("DEFVAR GF@result");

        let mut sub = Program::new();
        sub.append("PUSHS int@1");
        sub.append("PUSHS int@2");
        sub.append("ADDS");

        main.append_program(&mut sub);
        assert!(sub.is_empty());
        assert_eq!(main.len(), 4);
    }

    #[test]
    fn splice_subrange_replaces_in_place() {
        let mut p = Program::new();
        p.append("PUSHS int@1");
        let second = p.append("PUSHS int@2");
        p.append("ADDS");

        p.splice_subrange(second, InstrId::from_usize(3), vec!["PUSHS float@2.0".into()])
            .expect("range is in bounds");
        let rendered: Vec<_> = p.lines().collect();
        assert_eq!(rendered, vec!["PUSHS int@1", "PUSHS float@2.0"]);
    }

    #[test]
    fn splice_subrange_rejects_out_of_range_end() {
        let mut p = Program::new();
        let first = p.append("PUSHS int@1");
        let err = p
            .splice_subrange(first, InstrId::from_usize(5), vec![])
            .expect_err("end past the program's length must be rejected");
        assert!(matches!(err, ifjc_util::IndexVecError::OutOfBounds { .. }));
    }
}
