//! Diagnostics — this crate's stand-in for a logging layer.
//!
//! No `log`/`tracing` dependency: every user-visible report goes through
//! the `Diagnostic`/`Handler` pair below, generalized to the fixed
//! classification codes this compiler returns as its own process exit
//! status.

use crate::position::Position;
use std::fmt;

/// The compiler's classification codes, in the precedence order used to
/// pick the "strongest applicable code" when more than one could apply.
///
/// Ordering (strongest first): `Internal` > `Lexical` > `Syntax` >
/// semantic (`Definition`..`OtherSemantic`) > runtime (`NilUse`,
/// `DivByZero`) > `Success`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Lexical = 1,
    Syntax = 2,
    Definition = 3,
    Assignment = 4,
    Parameter = 5,
    ExprSemantic = 6,
    OtherSemantic = 7,
    NilUse = 8,
    DivByZero = 9,
    Internal = 99,
}

impl ExitCode {
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Rank used to decide which of two simultaneously-applicable codes
    /// is "stronger" and should win. Higher rank wins.
    fn rank(self) -> u8 {
        match self {
            ExitCode::Internal => 100,
            ExitCode::Lexical => 90,
            ExitCode::Syntax => 80,
            ExitCode::Definition
            | ExitCode::Assignment
            | ExitCode::Parameter
            | ExitCode::ExprSemantic
            | ExitCode::OtherSemantic => 70,
            ExitCode::NilUse | ExitCode::DivByZero => 60,
            ExitCode::Success => 0,
        }
    }

    /// Combine two codes, keeping the first error encountered unless a
    /// stronger-precedence code supersedes it (per §4.3's error-recovery
    /// rule: "internal error codes override already-set codes only when
    /// they indicate resource failure").
    pub fn combine(self, other: ExitCode) -> ExitCode {
        if other == ExitCode::Success {
            return self;
        }
        if self == ExitCode::Success {
            return other;
        }
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }

    fn ansi_color(self) -> &'static str {
        match self {
            Level::Error => "\x1b[1;31m",  // bold red
            Level::Warning => "\x1b[1;33m", // bold yellow
        }
    }
}

/// A single positioned diagnostic.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub category: String,
    pub message: String,
    pub pos: Position,
}

impl Diagnostic {
    pub fn error(category: impl Into<String>, message: impl Into<String>, pos: Position) -> Self {
        Self {
            level: Level::Error,
            category: category.into(),
            message: message.into(),
            pos,
        }
    }

    pub fn warning(category: impl Into<String>, message: impl Into<String>, pos: Position) -> Self {
        Self {
            level: Level::Warning,
            category: category.into(),
            message: message.into(),
            pos,
        }
    }

    /// Render per §7: `(ROW:COL)\t| <category>: <message>\n`, ANSI-colorized.
    pub fn render(&self, color: bool) -> String {
        if color {
            format!(
                "({}:{})\t| {}{}\x1b[0m: {}",
                self.pos.row,
                self.pos.col,
                self.level.ansi_color(),
                self.category,
                self.message
            )
        } else {
            format!(
                "({}:{})\t| {}: {}",
                self.pos.row, self.pos.col, self.category, self.message
            )
        }
    }
}

/// Collects diagnostics for a single compilation and tracks the strongest
/// applicable exit code seen so far.
///
/// This is this compiler's "logging" sink: every error and warning path
/// goes through a `Handler`, never a bare `eprintln!`.
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
    code: ExitCode,
    color: bool,
    warnings_enabled: bool,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            code: ExitCode::Success,
            color: true,
            warnings_enabled: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_warnings(mut self, enabled: bool) -> Self {
        self.warnings_enabled = enabled;
        self
    }

    /// Report an error, folding its code into the running classification.
    pub fn error(&mut self, code: ExitCode, category: impl Into<String>, message: impl Into<String>, pos: Position) {
        self.diagnostics.push(Diagnostic::error(category, message, pos));
        self.code = self.code.combine(code);
    }

    /// Report a warning. Does not affect the exit code. Suppressed
    /// entirely when warnings are disabled (the "compile-time switch" of
    /// §7, exposed here as a runtime flag — see `--no-warn` in
    /// `ifjc-drv`).
    pub fn warn(&mut self, category: impl Into<String>, message: impl Into<String>, pos: Position) {
        if self.warnings_enabled {
            self.diagnostics.push(Diagnostic::warning(category, message, pos));
        }
    }

    pub fn has_errors(&self) -> bool {
        self.code != ExitCode::Success
    }

    pub fn code(&self) -> ExitCode {
        self.code
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render every collected diagnostic, one per line, in report order.
    pub fn render_all(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.render(self.color))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_keeps_first_error_without_stronger_code() {
        let a = ExitCode::Definition;
        let b = ExitCode::Parameter;
        assert_eq!(a.combine(b), a);
    }

    #[test]
    fn combine_promotes_internal_over_anything() {
        let a = ExitCode::Syntax;
        assert_eq!(a.combine(ExitCode::Internal), ExitCode::Internal);
    }

    #[test]
    fn combine_lexical_beats_syntax() {
        assert_eq!(ExitCode::Syntax.combine(ExitCode::Lexical), ExitCode::Lexical);
        assert_eq!(ExitCode::Lexical.combine(ExitCode::Syntax), ExitCode::Lexical);
    }

    #[test]
    fn success_is_identity() {
        assert_eq!(ExitCode::Success.combine(ExitCode::DivByZero), ExitCode::DivByZero);
        assert_eq!(ExitCode::DivByZero.combine(ExitCode::Success), ExitCode::DivByZero);
    }

    #[test]
    fn warnings_can_be_suppressed() {
        let mut h = Handler::new().with_warnings(false);
        h.warn("unused", "function `f` is never used", Position::START);
        assert!(h.diagnostics().is_empty());
        assert!(!h.has_errors());
    }

    #[test]
    fn render_contains_row_col_and_category() {
        let d = Diagnostic::error("syntax", "unexpected token", Position::new(3, 7));
        let rendered = d.render(false);
        assert_eq!(rendered, "(3:7)\t| syntax: unexpected token");
    }
}
