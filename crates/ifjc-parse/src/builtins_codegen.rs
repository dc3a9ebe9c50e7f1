//! Trailer emission for the eight builtin functions (§3, "Builtin
//! functions"; §4.5A's final-pass note).
//!
//! The rest of this compiler treats a builtin exactly like any other
//! callable — `parse_call` emits the same `CREATEFRAME`/positional-
//! argument/`PUSHFRAME`/`CALL` sequence regardless of callee — so every
//! builtin actually used somewhere needs a real `LABEL`+body+`RETURN`
//! definition appended to the program, generated here from nothing but
//! primitive IFJ-code instructions (no native "call a builtin" opcode
//! exists in this target). The caller's own `PUSHFRAME` (see
//! `expr::emit_positional_call`/`emit_single_arg_call`) already turned
//! the argument frame into this call's local frame by the time `CALL`
//! lands here, so every body below reads its arguments as `LF@%1..`,
//! not `TF@%1..`, and never pushes a frame of its own.
//!
//! Only a builtin whose [`ifjc_sym::Symbol::was_used`] flag got set by
//! an actual call site is emitted, keeping the trailer proportional to
//! what the source program actually uses.

use crate::parser::Parser;
use ifjc_code::{emit, Operand, Program};

const BUILTIN_NAMES: &[&str] = &["chr", "ord", "readi", "readn", "reads", "substr", "tointeger", "write"];

pub fn emit_used_builtins(p: &Parser, prog: &mut Program) {
    for name in BUILTIN_NAMES {
        let used = p.symbols.global().get(name).map(|s| s.was_used).unwrap_or(false);
        if used {
            emit_body(name, prog);
        }
    }
}

fn emit_body(name: &str, prog: &mut Program) {
    match name {
        "chr" => emit_chr(prog),
        "ord" => emit_ord(prog),
        "readi" => emit_read(prog, "int"),
        "readn" => emit_read(prog, "float"),
        "reads" => emit_read(prog, "string"),
        "substr" => emit_substr(prog),
        "tointeger" => emit_tointeger(prog),
        "write" => emit_write(prog),
        _ => unreachable!("not one of the eight builtins"),
    }
}

fn emit_chr(prog: &mut Program) {
    prog.append(emit::label("chr"));
    let r = Operand::local("$r");
    prog.append(emit::defvar(&r));
    prog.append(emit::int2char(&r, &Operand::local("%1")));
    prog.append(emit::pushs(&r));
    prog.append(emit::popframe());
    prog.append(emit::returns());
}

fn emit_ord(prog: &mut Program) {
    prog.append(emit::label("ord"));
    let r = Operand::local("$r");
    prog.append(emit::defvar(&r));
    prog.append(emit::stri2int(&r, &Operand::local("%1"), &Operand::local("%2")));
    prog.append(emit::pushs(&r));
    prog.append(emit::popframe());
    prog.append(emit::returns());
}

fn emit_read(prog: &mut Program, type_code: &str) {
    prog.append(emit::label(name_for_read(type_code)));
    let r = Operand::local("$r");
    prog.append(emit::defvar(&r));
    prog.append(emit::read(&r, type_code));
    prog.append(emit::pushs(&r));
    prog.append(emit::popframe());
    prog.append(emit::returns());
}

fn name_for_read(type_code: &str) -> &'static str {
    match type_code {
        "int" => "readi",
        "float" => "readn",
        "string" => "reads",
        _ => unreachable!(),
    }
}

fn emit_tointeger(prog: &mut Program) {
    prog.append(emit::label("tointeger"));
    let r = Operand::local("$r");
    prog.append(emit::defvar(&r));
    prog.append(emit::pushs(&Operand::local("%1")));
    prog.append(emit::float2ints());
    prog.append(emit::pops(&r));
    prog.append(emit::pushs(&r));
    prog.append(emit::popframe());
    prog.append(emit::returns());
}

fn emit_write(prog: &mut Program) {
    prog.append(emit::label("write"));
    prog.append(emit::write(&Operand::local("%1")));
    prog.append(emit::popframe());
    prog.append(emit::returns());
}

/// `substr(s, i, j)`: the 1-based, inclusive substring of `s` from
/// index `i` to `j`. IFJ-code has no substring opcode, so this walks
/// the source string one `GETCHAR` at a time, exactly as a hand-written
/// IFJ-code program would.
fn emit_substr(prog: &mut Program) {
    prog.append(emit::label("substr"));

    let s = Operand::local("$s");
    let idx = Operand::local("$idx");
    let last = Operand::local("$last");
    let result = Operand::local("$result");
    let ch = Operand::local("$ch");

    prog.append(emit::defvar(&s));
    prog.append(emit::mov(&s, &Operand::local("%1")));
    prog.append(emit::defvar(&idx));
    prog.append(emit::mov(&idx, &Operand::local("%2")));
    prog.append(emit::defvar(&last));
    prog.append(emit::mov(&last, &Operand::local("%3")));
    prog.append(emit::defvar(&result));
    prog.append(emit::mov(&result, &Operand::string("")));
    prog.append(emit::defvar(&ch));

    prog.append(emit::label("substr$loop"));
    prog.append(emit::pushs(&idx));
    prog.append(emit::pushs(&last));
    prog.append(emit::gts());
    prog.append(emit::pushs(&Operand::bool(true)));
    prog.append(emit::jumpifeqs("substr$end"));

    prog.append(emit::getchar(&ch, &s, &idx));
    prog.append(emit::pushs(&result));
    prog.append(emit::pushs(&ch));
    prog.append(emit::concats());
    prog.append(emit::pops(&result));

    prog.append(emit::pushs(&idx));
    prog.append(emit::pushs(&Operand::int(1)));
    prog.append(emit::adds());
    prog.append(emit::pops(&idx));
    prog.append(emit::jump("substr$loop"));

    prog.append(emit::label("substr$end"));
    prog.append(emit::pushs(&result));
    prog.append(emit::popframe());
    prog.append(emit::returns());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifjc_util::Handler;

    #[test]
    fn only_used_builtins_are_emitted() {
        let mut handler = Handler::new();
        let parser = Parser::new("require \"ifj21\"\n", &mut handler);
        let mut prog = Program::new();
        emit_used_builtins(&parser, &mut prog);
        assert!(prog.is_empty());
    }

    #[test]
    fn write_body_never_pushes_a_second_frame() {
        let mut prog = Program::new();
        emit_write(&mut prog);
        let lines: Vec<_> = prog.lines().collect();
        assert_eq!(lines[0], "LABEL write");
        assert!(!lines.contains(&"PUSHFRAME"));
        assert_eq!(lines.last(), Some(&"RETURN"));
    }
}
