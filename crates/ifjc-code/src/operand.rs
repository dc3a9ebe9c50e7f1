//! IFJ-code operand syntax: literals (`int@`, `float@`, `string@`,
//! `bool@`, `nil@`) and frame-qualified variable references (`LF@`,
//! `TF@`, `GF@`).

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    Local,
    Temp,
    Global,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Frame::Local => "LF",
            Frame::Temp => "TF",
            Frame::Global => "GF",
        };
        write!(f, "{prefix}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Int(i64),
    /// Stored pre-formatted (decimal or hex-float) so callers control
    /// precision; IFJ-code accepts either notation for `float@`.
    Float(String),
    Str(String),
    Bool(bool),
    Nil,
    Var(Frame, String),
}

impl Operand {
    pub fn int(value: i64) -> Self {
        Operand::Int(value)
    }

    pub fn float(value: f64) -> Self {
        Operand::Float(format!("{value:?}"))
    }

    /// Escape a decoded string value back into IFJ-code's `string@`
    /// syntax: backslash, whitespace control characters, and `#` must
    /// be written as `\DDD` three-digit decimal escapes.
    pub fn string(value: impl AsRef<str>) -> Self {
        let mut escaped = String::new();
        for byte in value.as_ref().bytes() {
            match byte {
                b' '..=b'!' | b'$'..=b'[' | b']'..=b'~' => escaped.push(byte as char),
                _ => escaped.push_str(&format!("\\{byte:03}")),
            }
        }
        Operand::Str(escaped)
    }

    pub fn bool(value: bool) -> Self {
        Operand::Bool(value)
    }

    pub fn nil() -> Self {
        Operand::Nil
    }

    pub fn local(name: impl Into<String>) -> Self {
        Operand::Var(Frame::Local, name.into())
    }

    pub fn temp(name: impl Into<String>) -> Self {
        Operand::Var(Frame::Temp, name.into())
    }

    pub fn global(name: impl Into<String>) -> Self {
        Operand::Var(Frame::Global, name.into())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(v) => write!(f, "int@{v}"),
            Operand::Float(v) => write!(f, "float@{v}"),
            Operand::Str(v) => write!(f, "string@{v}"),
            Operand::Bool(true) => write!(f, "bool@true"),
            Operand::Bool(false) => write!(f, "bool@false"),
            Operand::Nil => write!(f, "nil@nil"),
            Operand::Var(frame, name) => write!(f, "{frame}@{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_renders_with_frame_prefix() {
        assert_eq!(Operand::local("x$0").to_string(), "LF@x$0");
        assert_eq!(Operand::global("result").to_string(), "GF@result");
        assert_eq!(Operand::temp("t0").to_string(), "TF@t0");
    }

    #[test]
    fn string_escapes_control_and_special_bytes() {
        let op = Operand::string("a\nb#c");
        assert_eq!(op.to_string(), "string@a\\010b\\035c");
    }

    #[test]
    fn literal_renders_match_grammar() {
        assert_eq!(Operand::int(-7).to_string(), "int@-7");
        assert_eq!(Operand::bool(true).to_string(), "bool@true");
        assert_eq!(Operand::nil().to_string(), "nil@nil");
    }
}
