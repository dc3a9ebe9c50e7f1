//! One typed constructor function per IFJ-code mnemonic family (§4.5A),
//! so the parser never hand-formats an instruction line with `format!`
//! scattered through its statement/expression handling.

use crate::operand::Operand;

/// Fixed first line of every emitted program.
pub const HEADER: &str = ".IFJcode21";

pub fn defvar(var: &Operand) -> String {
    format!("DEFVAR {var}")
}

pub fn mov(dst: &Operand, src: &Operand) -> String {
    format!("MOVE {dst} {src}")
}

pub fn pushframe() -> String {
    "PUSHFRAME".into()
}

pub fn popframe() -> String {
    "POPFRAME".into()
}

pub fn createframe() -> String {
    "CREATEFRAME".into()
}

pub fn pushs(op: &Operand) -> String {
    format!("PUSHS {op}")
}

pub fn pops(var: &Operand) -> String {
    format!("POPS {var}")
}

pub fn clears() -> String {
    "CLEARS".into()
}

macro_rules! nullary {
    ($name:ident, $mnemonic:literal) => {
        pub fn $name() -> String {
            $mnemonic.into()
        }
    };
}

nullary!(adds, "ADDS");
nullary!(subs, "SUBS");
nullary!(muls, "MULS");
nullary!(divs, "DIVS");
nullary!(idivs, "IDIVS");
nullary!(concats, "CONCATS");
nullary!(int2floats, "INT2FLOATS");
nullary!(float2ints, "FLOAT2INTS");
nullary!(lts, "LTS");
nullary!(gts, "GTS");
nullary!(eqs, "EQS");
nullary!(returns, "RETURN");
// Stack-form remainder, power, and boolean negation: the source
// language's operator set (§4.4) needs these three beyond the core
// arithmetic/relational family, added here in the same `FOOS`
// stack-instruction naming convention rather than inventing a
// differently-shaped mnemonic.
nullary!(mods, "MODS");
nullary!(pows, "POWS");
nullary!(nots, "NOTS");

pub fn jumpifeqs(label: &str) -> String {
    format!("JUMPIFEQS {label}")
}

pub fn jumpifneqs(label: &str) -> String {
    format!("JUMPIFNEQS {label}")
}

pub fn label(name: &str) -> String {
    format!("LABEL {name}")
}

pub fn jump(label: &str) -> String {
    format!("JUMP {label}")
}

pub fn jumpifeq(label: &str, a: &Operand, b: &Operand) -> String {
    format!("JUMPIFEQ {label} {a} {b}")
}

pub fn jumpifneq(label: &str, a: &Operand, b: &Operand) -> String {
    format!("JUMPIFNEQ {label} {a} {b}")
}

pub fn call(name: &str) -> String {
    format!("CALL {name}")
}

pub fn read(dst: &Operand, type_code: &str) -> String {
    format!("READ {dst} {type_code}")
}

pub fn write(op: &Operand) -> String {
    format!("WRITE {op}")
}

pub fn strlen(dst: &Operand, src: &Operand) -> String {
    format!("STRLEN {dst} {src}")
}

pub fn getchar(dst: &Operand, s: &Operand, i: &Operand) -> String {
    format!("GETCHAR {dst} {s} {i}")
}

pub fn setchar(dst: &Operand, i: &Operand, c: &Operand) -> String {
    format!("SETCHAR {dst} {i} {c}")
}

pub fn int2char(dst: &Operand, src: &Operand) -> String {
    format!("INT2CHAR {dst} {src}")
}

pub fn stri2int(dst: &Operand, s: &Operand, i: &Operand) -> String {
    format!("STRI2INT {dst} {s} {i}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defvar_and_move_render_expected_syntax() {
        let x = Operand::local("x$0");
        assert_eq!(defvar(&x), "DEFVAR LF@x$0");
        assert_eq!(mov(&x, &Operand::int(1)), "MOVE LF@x$0 int@1");
    }

    #[test]
    fn nullary_family_has_no_operands() {
        assert_eq!(adds(), "ADDS");
        assert_eq!(concats(), "CONCATS");
    }

    #[test]
    fn control_flow_mnemonics_take_a_label() {
        assert_eq!(label("else_0"), "LABEL else_0");
        assert_eq!(jump("end_0"), "JUMP end_0");
    }

    #[test]
    fn write_takes_a_single_operand() {
        assert_eq!(write(&Operand::string("hi")), "WRITE string@hi");
    }
}
