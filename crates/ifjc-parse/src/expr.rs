//! The operator-precedence expression parser (§4.4).
//!
//! Reaches this language's full operator set through precedence-
//! climbing over [`crate::bp`]'s binding powers rather than a literal
//! shift/reduce table — see `bp`'s doc comment for why. Each
//! call emits directly into the caller-supplied [`Program`], so nested
//! calls (parenthesized sub-expressions, call arguments) naturally
//! build up one linear instruction sequence in evaluation order.

use crate::bp;
use crate::parser::Parser;
use ifjc_code::{emit, Operand, Program};
use ifjc_lex::TokenKind;
use ifjc_sym::{DataType, PendingDecl, Status, Symbol, SymbolKind, VARIADIC};
use ifjc_util::{ExitCode, Position};

/// The statically-known outcome of parsing one (sub-)expression.
#[derive(Clone, Copy, Debug)]
pub struct ExprResult {
    pub data_type: DataType,
    /// Conservative "this value is provably the literal zero" flag —
    /// the zero-propagation analysis of §4.4, narrowed to the one case
    /// that matters in practice: detecting division by a literal zero
    /// at compile time (S3).
    pub provably_zero: bool,
    /// True only when the whole expression this result came from was
    /// exactly one function call with no surrounding operator — the
    /// `only_f_was_called` flag that legalizes multi-return
    /// destructuring in the caller (assignment/return handling).
    pub only_call: bool,
    /// Set when `only_call` is true: the callee's full return-type
    /// string, so the caller can destructure beyond the first value.
    pub call_return_types: Option<String>,
}

impl ExprResult {
    fn value(data_type: DataType, provably_zero: bool) -> Self {
        ExprResult {
            data_type,
            provably_zero,
            only_call: false,
            call_return_types: None,
        }
    }
}

pub fn parse_expr(p: &mut Parser, prog: &mut Program) -> Result<ExprResult, ExitCode> {
    parse_bp(p, prog, bp::MIN)
}

/// Like [`parse_expr`], but guarantees the caller gets back a single
/// concrete value: a bare multi-return call is truncated to its first
/// result. Everywhere an expression feeds something other than a
/// trailing assignment/return target — call arguments, unary operands,
/// parenthesized sub-expressions, conditions — goes through this
/// instead of `parse_expr` directly.
pub fn parse_value(p: &mut Parser, prog: &mut Program, min_bp: u8) -> Result<ExprResult, ExitCode> {
    let result = parse_bp(p, prog, min_bp)?;
    Ok(to_single_value(p, prog, result))
}

fn parse_bp(p: &mut Parser, prog: &mut Program, min_bp: u8) -> Result<ExprResult, ExitCode> {
    let mut lhs = parse_prefix(p, prog)?;

    loop {
        let op = match p.peek().kind {
            TokenKind::Operator => p.peek().attr.clone(),
            _ => break,
        };
        let Some((lbp, rbp)) = bp::infix_bp(&op) else {
            break;
        };
        if lbp < min_bp {
            break;
        }
        p.advance();
        // Only finalize right before two operands actually combine —
        // a call left untouched by any operator stays `only_call` all
        // the way back up to the assignment/return handler that may
        // still want to destructure it.
        lhs = to_single_value(p, prog, lhs);
        let rhs = parse_bp(p, prog, rbp)?;
        let rhs = to_single_value(p, prog, rhs);
        lhs = reduce_binary(p, prog, &op, lhs, rhs)?;
    }

    Ok(lhs)
}

/// Collapse a bare multi-return call down to its first value, popping
/// the rest off the data stack. A no-op for anything that isn't
/// `only_call`, so it is safe to call unconditionally at every point
/// an expression is about to be used as a single value.
pub(crate) fn to_single_value(p: &mut Parser, prog: &mut Program, mut result: ExprResult) -> ExprResult {
    if let Some(return_types) = result.call_return_types.take() {
        let extra = return_types.chars().count().saturating_sub(1);
        if extra > 0 {
            let keep = p.fresh_temp();
            prog.append(emit::defvar(&Operand::global(keep.clone())));
            prog.append(emit::pops(&Operand::global(keep.clone())));
            let discard = p.fresh_temp();
            prog.append(emit::defvar(&Operand::global(discard.clone())));
            for _ in 0..extra {
                prog.append(emit::pops(&Operand::global(discard.clone())));
            }
            prog.append(emit::pushs(&Operand::global(keep)));
        }
    }
    result.only_call = false;
    result.call_return_types = None;
    result
}

fn parse_prefix(p: &mut Parser, prog: &mut Program) -> Result<ExprResult, ExitCode> {
    let tok = p.peek().clone();
    match tok.kind {
        TokenKind::Integer => {
            p.advance();
            let value: i64 = tok
                .attr
                .parse()
                .map_err(|_| p.report(ExitCode::Internal, "internal", "malformed integer literal"))?;
            prog.append(emit::pushs(&Operand::int(value)));
            Ok(ExprResult::value(DataType::Int, value == 0))
        }
        TokenKind::Number => {
            p.advance();
            let value: f64 = tok
                .attr
                .parse()
                .map_err(|_| p.report(ExitCode::Internal, "internal", "malformed number literal"))?;
            prog.append(emit::pushs(&Operand::float(value)));
            Ok(ExprResult::value(DataType::Num, value == 0.0))
        }
        TokenKind::String => {
            p.advance();
            let raw = strip_quotes(&tok.attr);
            prog.append(emit::pushs(&Operand::string(raw)));
            Ok(ExprResult::value(DataType::Str, false))
        }
        TokenKind::Keyword if tok.attr == "nil" => {
            p.advance();
            prog.append(emit::pushs(&Operand::nil()));
            Ok(ExprResult::value(DataType::Nil, false))
        }
        TokenKind::Separator if tok.attr == "(" => {
            p.advance();
            let inner = parse_bp(p, prog, bp::MIN)?;
            p.expect_separator(")")?;
            // A parenthesized call is always truncated to one value,
            // same as Lua's `(f())`.
            Ok(to_single_value(p, prog, inner))
        }
        TokenKind::Operator if tok.attr == "-" => {
            p.advance();
            parse_unary_minus(p, prog)
        }
        TokenKind::Operator if tok.attr == "#" => {
            p.advance();
            parse_length(p, prog)
        }
        TokenKind::Identifier => {
            let name = tok.attr;
            p.advance();
            if p.is_separator("(") {
                parse_call(p, prog, &name, tok.pos)
            } else {
                parse_variable(p, prog, &name, tok.pos)
            }
        }
        _ => Err(p.syntax_error("expected an expression")),
    }
}

fn strip_quotes(attr: &str) -> &str {
    attr.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(attr)
}

fn parse_unary_minus(p: &mut Parser, prog: &mut Program) -> Result<ExprResult, ExitCode> {
    let mut operand_prog = Program::new();
    let operand = parse_value(p, &mut operand_prog, bp::UNARY)?;
    if !operand.data_type.is_numeric() {
        return Err(p.report(ExitCode::ExprSemantic, "expression", "unary '-' requires a numeric operand"));
    }
    let zero = match operand.data_type {
        DataType::Int => Operand::int(0),
        _ => Operand::float(0.0),
    };
    prog.append(emit::pushs(&zero));
    prog.append_program(&mut operand_prog);
    prog.append(emit::subs());
    Ok(ExprResult::value(operand.data_type, operand.provably_zero))
}

fn parse_length(p: &mut Parser, prog: &mut Program) -> Result<ExprResult, ExitCode> {
    let mut operand_prog = Program::new();
    let operand = parse_value(p, &mut operand_prog, bp::UNARY)?;
    if operand.data_type != DataType::Str {
        return Err(p.report(ExitCode::ExprSemantic, "expression", "'#' requires a string operand"));
    }
    let src = p.fresh_temp();
    let dst = p.fresh_temp();
    prog.append_program(&mut operand_prog);
    prog.append(emit::defvar(&Operand::global(src.clone())));
    prog.append(emit::pops(&Operand::global(src.clone())));
    prog.append(emit::defvar(&Operand::global(dst.clone())));
    prog.append(emit::strlen(&Operand::global(dst.clone()), &Operand::global(src)));
    prog.append(emit::pushs(&Operand::global(dst)));
    Ok(ExprResult::value(DataType::Int, false))
}

fn parse_variable(p: &mut Parser, prog: &mut Program, name: &str, pos: Position) -> Result<ExprResult, ExitCode> {
    let Some((is_global, sym)) = p.symbols.resolve(name) else {
        return Err(p.report_at(ExitCode::Definition, "definition", format!("undefined variable '{name}'"), pos));
    };
    if sym.kind != SymbolKind::Var {
        let msg = format!("'{name}' names a function, not a variable");
        return Err(p.report_at(ExitCode::Definition, "definition", msg, pos));
    }
    if sym.status == Status::Declared {
        p.warn("uninitialized", format!("'{name}' is used before being defined"));
    }
    let operand = if is_global {
        Operand::global(sym.unique_name)
    } else {
        Operand::local(sym.unique_name)
    };
    prog.append(emit::pushs(&operand));
    Ok(ExprResult::value(sym.data_type, false))
}

/// What's known about a callee at the point its `(` has just been
/// consumed: its declared parameter/return type strings, and whether
/// it is only a placeholder stub materialized by this very call.
struct Callee {
    param_types: String,
    return_types: String,
    is_stub: bool,
}

/// Resolve `name` as something callable, creating a forward-reference
/// stub and deferring the "undefined function" diagnosis to program
/// end (§4.3) when the name hasn't been seen as a `global`/`function`
/// or builtin yet.
fn resolve_callee(p: &mut Parser, name: &str, pos: Position) -> Result<Callee, ExitCode> {
    if let Some((_, sym)) = p.symbols.resolve(name) {
        if sym.kind != SymbolKind::Func {
            return Err(p.report_at(ExitCode::Definition, "definition", format!("'{name}' is not callable"), pos));
        }
        return Ok(Callee {
            param_types: sym.param_types,
            return_types: sym.return_types,
            is_stub: sym.from_call_stub,
        });
    }
    if p.symbols.check_builtin(name) {
        let (_, sym) = p.symbols.resolve(name).expect("check_builtin just installed it");
        return Ok(Callee {
            param_types: sym.param_types,
            return_types: sym.return_types,
            is_stub: false,
        });
    }
    p.symbols.insert_global(Symbol::new_call_stub(name));
    p.symbols.push_pending(PendingDecl { name: name.to_string(), pos });
    Ok(Callee {
        param_types: String::new(),
        return_types: String::new(),
        is_stub: true,
    })
}

fn check_argument_type(
    p: &mut Parser,
    name: &str,
    expected: &[char],
    index: usize,
    actual: DataType,
    pos: Position,
) -> Result<(), ExitCode> {
    match expected.get(index) {
        Some(&want) => {
            let want_ty = DataType::from_char(want);
            if want_ty != Some(actual) && !(want_ty == Some(DataType::Num) && actual == DataType::Int) {
                Err(p.report_at(
                    ExitCode::Parameter,
                    "parameter",
                    format!("argument {} to '{name}' has the wrong type", index + 1),
                    pos,
                ))
            } else {
                Ok(())
            }
        }
        None => Err(p.report_at(ExitCode::Parameter, "parameter", format!("too many arguments to '{name}'"), pos)),
    }
}

/// Parse `(arg, arg, …)` immediately following an already-consumed
/// callee name and emit a call.
///
/// Every non-variadic call site shares one calling convention (see
/// DESIGN.md): evaluate every argument onto the data stack first (so a
/// nested call's own `CREATEFRAME`/`PUSHFRAME` never races a pending
/// one of ours), then `CREATEFRAME` once, pop the arguments off in
/// reverse — the last one pushed comes off first — into positional
/// `TF@%1.."TF@%n"` slots, `PUSHFRAME`, `CALL`. The variadic builtin
/// `write` instead completes one whole
/// `CREATEFRAME`/`TF@%1`/`PUSHFRAME`/`CALL` cycle per argument,
/// immediately after evaluating it, so output order matches argument
/// order.
pub(crate) fn parse_call(p: &mut Parser, prog: &mut Program, name: &str, pos: Position) -> Result<ExprResult, ExitCode> {
    let callee = resolve_callee(p, name, pos)?;
    p.expect_separator("(")?;
    let variadic = !callee.is_stub && callee.param_types.starts_with(VARIADIC);
    let expected: Vec<char> = if callee.is_stub || variadic {
        Vec::new()
    } else {
        callee.param_types.chars().collect()
    };

    if variadic {
        if !p.is_separator(")") {
            loop {
                parse_value(p, prog, bp::MIN)?;
                emit_single_arg_call(prog, name);
                if p.is_separator(",") {
                    p.advance();
                    continue;
                }
                break;
            }
        }
        p.expect_separator(")")?;
        mark_function_used(p, name);
        return Ok(ExprResult::value(DataType::Undefined, false));
    }

    let mut arg_types: Vec<DataType> = Vec::new();
    if !p.is_separator(")") {
        loop {
            let arg_pos = p.pos();
            let arg = parse_value(p, prog, bp::MIN)?;
            if !callee.is_stub {
                check_argument_type(p, name, &expected, arg_types.len(), arg.data_type, arg_pos)?;
            }
            arg_types.push(arg.data_type);
            if p.is_separator(",") {
                p.advance();
                continue;
            }
            break;
        }
    }
    p.expect_separator(")")?;

    if !callee.is_stub && arg_types.len() < expected.len() {
        return Err(p.report(ExitCode::Parameter, "parameter", format!("too few arguments to '{name}'")));
    }

    emit_positional_call(prog, name, arg_types.len());
    mark_function_used(p, name);

    let result_type = callee
        .return_types
        .chars()
        .next()
        .and_then(DataType::from_char)
        .unwrap_or(DataType::Undefined);
    let mut result = ExprResult::value(result_type, false);
    if !callee.return_types.is_empty() {
        result.only_call = true;
        result.call_return_types = Some(callee.return_types);
    }
    Ok(result)
}

/// Pop `argc` already-evaluated arguments off the data stack (last
/// pushed first) into a fresh temporary frame's positional slots, then
/// call.
fn emit_positional_call(prog: &mut Program, name: &str, argc: usize) {
    prog.append(emit::createframe());
    for i in (1..=argc).rev() {
        let slot = Operand::temp(format!("%{i}"));
        prog.append(emit::defvar(&slot));
        prog.append(emit::pops(&slot));
    }
    prog.append(emit::pushframe());
    prog.append(emit::call(name));
}

/// One whole call cycle for a single already-evaluated variadic
/// argument (just popped to the top of the data stack).
fn emit_single_arg_call(prog: &mut Program, name: &str) {
    prog.append(emit::createframe());
    let slot = Operand::temp("%1");
    prog.append(emit::defvar(&slot));
    prog.append(emit::pops(&slot));
    prog.append(emit::pushframe());
    prog.append(emit::call(name));
}

fn mark_function_used(p: &mut Parser, name: &str) {
    if let Some(sym) = p.symbols.global_mut().get_mut(name) {
        sym.mark_used();
    }
}

/// Pop every return value of a call used as a whole statement — unlike
/// [`to_single_value`], which keeps the first, a call-statement's
/// result is entirely discarded (it has no target to receive it).
pub(crate) fn discard_call_results(p: &mut Parser, prog: &mut Program, result: &ExprResult) {
    let Some(return_types) = &result.call_return_types else {
        return;
    };
    let count = return_types.chars().count();
    if count == 0 {
        return;
    }
    let discard = p.fresh_temp();
    prog.append(emit::defvar(&Operand::global(discard.clone())));
    for _ in 0..count {
        prog.append(emit::pops(&Operand::global(discard.clone())));
    }
}

fn reduce_binary(p: &mut Parser, prog: &mut Program, op: &str, lhs: ExprResult, rhs: ExprResult) -> Result<ExprResult, ExitCode> {
    let involves_nil = lhs.data_type == DataType::Nil || rhs.data_type == DataType::Nil;
    let equality_op = matches!(op, "==" | "~=");
    if involves_nil && !equality_op {
        return Err(p.report(ExitCode::NilUse, "nil", format!("operator '{op}' cannot be applied to nil")));
    }

    match op {
        "+" | "-" | "*" | "/" | "//" | "%" | "^" => reduce_arith(p, prog, op, lhs, rhs),
        ".." => reduce_concat(p, prog, lhs, rhs),
        "==" | "~=" | "<" | "<=" | ">" | ">=" => reduce_relational(p, prog, op, lhs, rhs),
        _ => Err(p.syntax_error(format!("unsupported operator '{op}'"))),
    }
}

/// When exactly one side of a numeric binary operator is `Int` and the
/// other `Num`, the `Int` side is widened in place. The rhs is always
/// on top of the VM stack at this point; if the lhs needs widening
/// instead, the rhs is parked in a temporary while `INT2FLOATS` reaches
/// underneath it.
fn coerce_mixed_numeric(p: &mut Parser, prog: &mut Program, lhs_ty: DataType, rhs_ty: DataType) {
    if lhs_ty == rhs_ty {
        return;
    }
    if rhs_ty == DataType::Int {
        prog.append(emit::int2floats());
    } else {
        let tmp = p.fresh_temp();
        prog.append(emit::defvar(&Operand::global(tmp.clone())));
        prog.append(emit::pops(&Operand::global(tmp.clone())));
        prog.append(emit::int2floats());
        prog.append(emit::pushs(&Operand::global(tmp)));
    }
}

fn reduce_arith(p: &mut Parser, prog: &mut Program, op: &str, lhs: ExprResult, rhs: ExprResult) -> Result<ExprResult, ExitCode> {
    if !lhs.data_type.is_numeric() || !rhs.data_type.is_numeric() {
        return Err(p.report(ExitCode::ExprSemantic, "expression", format!("operator '{op}' requires numeric operands")));
    }

    if matches!(op, "/" | "//" | "%") && rhs.provably_zero {
        return Err(p.report(ExitCode::DivByZero, "arithmetic", "division by a literal zero"));
    }

    coerce_mixed_numeric(p, prog, lhs.data_type, rhs.data_type);

    let result_type = match op {
        "/" | "^" => DataType::Num,
        "//" | "%" => DataType::Int,
        _ => lhs.data_type.widen_numeric(rhs.data_type),
    };

    match op {
        "+" => prog.append(emit::adds()),
        "-" => prog.append(emit::subs()),
        "*" => prog.append(emit::muls()),
        "/" => prog.append(emit::divs()),
        "//" => prog.append(emit::idivs()),
        "%" => prog.append(emit::mods()),
        "^" => prog.append(emit::pows()),
        _ => unreachable!("reduce_arith only sees arithmetic operators"),
    };

    let provably_zero = match op {
        "+" => lhs.provably_zero && rhs.provably_zero,
        "*" | "%" => lhs.provably_zero || rhs.provably_zero,
        _ => false,
    };
    Ok(ExprResult::value(result_type, provably_zero))
}

fn reduce_concat(p: &mut Parser, prog: &mut Program, lhs: ExprResult, rhs: ExprResult) -> Result<ExprResult, ExitCode> {
    if lhs.data_type != DataType::Str || rhs.data_type != DataType::Str {
        return Err(p.report(ExitCode::ExprSemantic, "expression", "'..' requires string operands"));
    }
    prog.append(emit::concats());
    Ok(ExprResult::value(DataType::Str, false))
}

fn reduce_relational(p: &mut Parser, prog: &mut Program, op: &str, lhs: ExprResult, rhs: ExprResult) -> Result<ExprResult, ExitCode> {
    let equality_op = matches!(op, "==" | "~=");
    let same_numeric = lhs.data_type.is_numeric() && rhs.data_type.is_numeric();
    let same_string = lhs.data_type == DataType::Str && rhs.data_type == DataType::Str;
    let nil_compatible = equality_op && (lhs.data_type == DataType::Nil || rhs.data_type == DataType::Nil);

    if !(same_numeric || same_string || nil_compatible) {
        return Err(p.report(
            ExitCode::ExprSemantic,
            "expression",
            format!("operator '{op}' requires operands of compatible type"),
        ));
    }

    if same_numeric {
        coerce_mixed_numeric(p, prog, lhs.data_type, rhs.data_type);
    }

    match op {
        "==" => prog.append(emit::eqs()),
        "~=" => {
            prog.append(emit::eqs());
            prog.append(emit::nots())
        }
        "<" => prog.append(emit::lts()),
        "<=" => {
            prog.append(emit::gts());
            prog.append(emit::nots())
        }
        ">" => prog.append(emit::gts()),
        ">=" => {
            prog.append(emit::lts());
            prog.append(emit::nots())
        }
        _ => unreachable!("reduce_relational only sees relational operators"),
    };

    Ok(ExprResult::value(DataType::Bool, false))
}
