//! The top-down statement parser (§4.3): drives the symbol-table stack
//! directly as it recognizes the grammar, with no intervening AST.
//!
//! `parse_program` is the crate's single public entry point. Everything
//! else here is a recursive-descent rule, one function per production,
//! dispatched on the current token between the top-level (`global`/
//! `function`/call-statement) and in-function rule sets.

use crate::bp;
use crate::context::FunctionCtx;
use crate::expr;
use crate::parser::Parser;
use ifjc_code::{emit, Operand, Program};
use ifjc_lex::TokenKind;
use ifjc_sym::{DataType, Status, Symbol, SymbolKind};
use ifjc_util::{ExitCode, Handler, Position};

/// Label the assembled program jumps to past every function body, so
/// top-level statements execute without falling into one.
const MAIN_LABEL: &str = "$$main";

/// Compile one source file end to end: lex, parse, and (on success)
/// render the finished IFJ-code program.
///
/// Returns the strongest diagnostic code observed (`Success` if none)
/// and the rendered program, which is only `Some` when nothing above
/// `Success` was ever reported — a partially emitted program is never
/// handed back, matching §4.3's "abort emission, not partial output"
/// rule.
pub fn compile(source: &str, handler: &mut Handler) -> (ExitCode, Option<String>) {
    let mut parser = Parser::new(source, handler);
    // Every `Err` returned by a parse rule was raised via `report`/
    // `report_at`, which already folds its code into the handler's
    // running classification — so the handler's own code is always the
    // authoritative answer, whether or not `parse_program` itself
    // returned early.
    let _ = parse_program(&mut parser);
    let code = parser.exit_code();
    if code != ExitCode::Success {
        return (code, None);
    }
    (code, Some(assemble(&mut parser)))
}

fn assemble(p: &mut Parser) -> String {
    let mut out = Program::new();
    out.append(emit::HEADER);
    out.append(emit::jump(MAIN_LABEL));
    out.append_program(&mut p.functions);
    out.append(emit::label(MAIN_LABEL));
    out.append_program(&mut p.main);
    crate::builtins_codegen::emit_used_builtins(p, &mut out);
    out.render()
}

pub fn parse_program(p: &mut Parser) -> Result<(), ExitCode> {
    parse_prolog(p)?;
    while !p.is_eof() {
        if p.is_keyword("global") {
            parse_global_decl(p)?;
        } else if p.is_keyword("function") {
            parse_function_def(p)?;
        } else if p.is_identifier() {
            let pos = p.pos();
            let name = p.advance().attr;
            let mut stmt_prog = Program::new();
            parse_call_statement(p, &mut stmt_prog, name, pos)?;
            p.main.append_program(&mut stmt_prog);
        } else {
            return Err(p.syntax_error("expected a global declaration, function definition, or statement"));
        }
    }
    check_unresolved_functions(p);
    Ok(())
}

/// `require "ifj21"`, required verbatim as the file's first two tokens.
fn parse_prolog(p: &mut Parser) -> Result<(), ExitCode> {
    if !p.is_keyword("require") {
        return Err(p.report(ExitCode::OtherSemantic, "prolog", "missing 'require \"ifj21\"' header"));
    }
    p.advance();
    if p.peek().kind != TokenKind::String || p.peek().attr != "\"ifj21\"" {
        return Err(p.report(ExitCode::OtherSemantic, "prolog", "expected the literal string \"ifj21\""));
    }
    p.advance();
    Ok(())
}

fn parse_type_keyword(p: &mut Parser) -> Result<DataType, ExitCode> {
    let tok = p.peek().clone();
    if tok.kind != TokenKind::Keyword {
        return Err(p.syntax_error("expected a type name"));
    }
    let ty = match tok.attr.as_str() {
        "integer" => DataType::Int,
        "number" => DataType::Num,
        "string" => DataType::Str,
        "boolean" => DataType::Bool,
        "nil" => DataType::Nil,
        _ => return Err(p.syntax_error("expected a type name")),
    };
    p.advance();
    Ok(ty)
}

/// `()`-delimited, comma-separated type list, e.g. a parameter or
/// return-type list in a `global` forward declaration.
fn parse_type_list(p: &mut Parser) -> Result<String, ExitCode> {
    let mut s = String::new();
    if !p.is_separator(")") {
        loop {
            s.push(parse_type_keyword(p)?.to_char());
            if p.is_separator(",") {
                p.advance();
                continue;
            }
            break;
        }
    }
    Ok(s)
}

/// `global <id> : function(<types>) [: <types>]`
fn parse_global_decl(p: &mut Parser) -> Result<(), ExitCode> {
    p.advance(); // 'global'
    let pos = p.pos();
    let name = p.expect_identifier()?;
    p.expect_separator(":")?;
    p.expect_keyword("function")?;
    p.expect_separator("(")?;
    let param_types = parse_type_list(p)?;
    p.expect_separator(")")?;
    let return_types = if p.is_separator(":") {
        p.advance();
        p.expect_separator("(")?;
        let types = parse_type_list(p)?;
        p.expect_separator(")")?;
        types
    } else {
        String::new()
    };

    match p.symbols.lookup_global(&name).cloned() {
        Some(existing) if existing.kind == SymbolKind::Func && existing.from_call_stub => {
            let mut sym = Symbol::new_func(&name, param_types, return_types, Status::Declared);
            sym.was_used = existing.was_used;
            p.symbols.insert_global(sym);
        }
        Some(_) => {
            return Err(p.report_at(ExitCode::Definition, "definition", format!("'{name}' is already declared"), pos));
        }
        None => {
            p.symbols.insert_global(Symbol::new_func(&name, param_types, return_types, Status::Declared));
        }
    }
    p.symbols.clear_pending(&name);
    Ok(())
}

/// Reconcile a `function` definition's own signature against whatever
/// the global table already holds for this name: a matching forward
/// `global` declaration is fine (definition fills it in), a call stub
/// is simply overwritten (its placeholder signature never constrained
/// anything), and anything else with the same name is a redefinition.
fn reconcile_function_signature(
    p: &mut Parser,
    name: &str,
    pos: Position,
    param_types: &str,
    return_types: &str,
) -> Result<(), ExitCode> {
    match p.symbols.lookup_global(name) {
        None => Ok(()),
        Some(existing) if existing.kind != SymbolKind::Func => {
            Err(p.report_at(ExitCode::Definition, "definition", format!("'{name}' is already declared"), pos))
        }
        Some(existing) if existing.from_call_stub => Ok(()),
        Some(existing) if existing.status == Status::Declared => {
            if existing.param_types != param_types || existing.return_types != return_types {
                Err(p.report_at(
                    ExitCode::Definition,
                    "definition",
                    format!("'{name}' does not match its forward declaration"),
                    pos,
                ))
            } else {
                Ok(())
            }
        }
        Some(_) => Err(p.report_at(ExitCode::Definition, "definition", format!("'{name}' is already defined"), pos)),
    }
}

/// `function <id> ( <id> : <type>, … ) [: (<types>)] <block> end`
fn parse_function_def(p: &mut Parser) -> Result<(), ExitCode> {
    p.advance(); // 'function'
    let pos = p.pos();
    let name = p.expect_identifier()?;
    p.expect_separator("(")?;

    let mut params: Vec<(String, DataType)> = Vec::new();
    if !p.is_separator(")") {
        loop {
            let pname = p.expect_identifier()?;
            p.expect_separator(":")?;
            let pty = parse_type_keyword(p)?;
            params.push((pname, pty));
            if p.is_separator(",") {
                p.advance();
                continue;
            }
            break;
        }
    }
    p.expect_separator(")")?;

    let return_types = if p.is_separator(":") {
        p.advance();
        p.expect_separator("(")?;
        let types = parse_type_list(p)?;
        p.expect_separator(")")?;
        types
    } else {
        String::new()
    };

    let param_types: String = params.iter().map(|(_, ty)| ty.to_char()).collect();
    reconcile_function_signature(p, &name, pos, &param_types, &return_types)?;

    let was_used = p.symbols.lookup_global(&name).map(|s| s.was_used).unwrap_or(false);
    let mut sym = Symbol::new_func(&name, param_types.clone(), return_types.clone(), Status::Defined);
    sym.was_used = was_used;
    p.symbols.insert_global(sym);
    p.symbols.clear_pending(&name);

    // The caller already turned its temporary frame into this call's
    // local frame via its own `PUSHFRAME` (see `expr::emit_positional_call`)
    // before `CALL` landed here, so parameters arrive as `LF@%1..%n`,
    // not `TF@%1..%n` — no second `PUSHFRAME` belongs on this side.
    let mut body = Program::new();
    body.append(emit::label(&name));

    let saved_fn = p.current_fn.replace(FunctionCtx::new(&name, param_types, return_types.clone()));
    for (i, (pname, pty)) in params.iter().enumerate() {
        let unique = p.unique_name(pname);
        body.append(emit::defvar(&Operand::local(unique.clone())));
        body.append(emit::mov(&Operand::local(unique.clone()), &Operand::local(format!("%{}", i + 1))));
        let mut vsym = Symbol::new_var(pname, *pty, unique);
        vsym.status = Status::Defined;
        p.symbols.insert_local(vsym);
    }

    let found_return = parse_block(p, &mut body, &["end"])?;
    p.expect_keyword("end")?;

    if !return_types.is_empty() && !found_return {
        p.warn("return", format!("function '{name}' may fall off its end without returning"));
    }

    // Implicit trailing return: pad missing values with nil, declaration
    // order topmost (matches the explicit-`return` convention).
    for ty_char in return_types.chars().rev() {
        let _ = ty_char;
        body.append(emit::pushs(&Operand::nil()));
    }
    body.append(emit::popframe());
    body.append(emit::returns());

    p.current_fn = saved_fn;
    *p.symbols.local_mut() = Default::default();
    p.functions.append_program(&mut body);
    Ok(())
}

/// A function body's `LABEL`/parameter-binding prologue is pushed
/// directly above; everything else in the block shares this dispatch.
fn parse_block(p: &mut Parser, prog: &mut Program, stop: &[&str]) -> Result<bool, ExitCode> {
    p.symbols.enter_scope();
    let result = parse_block_inner(p, prog, stop);
    p.symbols.leave_scope();
    result
}

fn parse_block_inner(p: &mut Parser, prog: &mut Program, stop: &[&str]) -> Result<bool, ExitCode> {
    let mut found = false;
    loop {
        if p.is_eof() {
            return Err(p.syntax_error("unexpected end of input inside a block"));
        }
        if stop.iter().any(|kw| p.is_keyword(kw)) {
            break;
        }
        let stmt_found = parse_in_function_statement(p, prog)?;
        found = found || stmt_found;
    }
    Ok(found)
}

/// Dispatch one statement inside a function body. Returns whether this
/// statement unconditionally returns (only ever true for `return`
/// itself or an `if`/`else` whose every branch does).
fn parse_in_function_statement(p: &mut Parser, prog: &mut Program) -> Result<bool, ExitCode> {
    if p.is_keyword("local") {
        parse_local_decl(p, prog)?;
        Ok(false)
    } else if p.is_keyword("if") {
        parse_if(p, prog)
    } else if p.is_keyword("while") {
        parse_while(p, prog)
    } else if p.is_keyword("return") {
        parse_return(p, prog)
    } else if p.is_identifier() {
        let pos = p.pos();
        let name = p.advance().attr;
        if p.is_separator("(") || p.is_separator(",") || p.is_operator("=") {
            if p.is_separator("(") {
                parse_call_statement(p, prog, name, pos)?;
            } else {
                parse_assignment(p, prog, name, pos)?;
            }
            Ok(false)
        } else {
            Err(p.syntax_error("expected '(' or an assignment after identifier"))
        }
    } else {
        Err(p.syntax_error("expected a statement"))
    }
}

fn parse_call_statement(p: &mut Parser, prog: &mut Program, name: String, pos: Position) -> Result<(), ExitCode> {
    let result = expr::parse_call(p, prog, &name, pos)?;
    expr::discard_call_results(p, prog, &result);
    Ok(())
}

/// `local <id> : <type> [= <expr>]`
///
/// The initializer, if present, is parsed with the declared local
/// temporarily removed from the table (the "delete-then-reinsert"
/// trick of §4.3) so `local x : integer = x` sees the *outer* `x`,
/// never the one being declared.
fn parse_local_decl(p: &mut Parser, prog: &mut Program) -> Result<(), ExitCode> {
    p.advance(); // 'local'
    let pos = p.pos();
    let name = p.expect_identifier()?;
    p.expect_separator(":")?;
    let ty = parse_type_keyword(p)?;

    if p.symbols.lookup_local(&name).is_some() {
        return Err(p.report_at(ExitCode::Definition, "definition", format!("'{name}' is already declared in this scope"), pos));
    }
    if p.symbols.lookup_global(&name).is_some() {
        return Err(p.report_at(
            ExitCode::Definition,
            "definition",
            format!("'{name}' collides with a function name"),
            pos,
        ));
    }

    let unique = p.unique_name(&name);
    let mut declared = Symbol::new_var(&name, ty, unique.clone());
    declared.status = Status::Declared;
    p.symbols.insert_local(declared);
    prog.append(emit::defvar(&Operand::local(unique.clone())));

    if p.is_operator("=") {
        p.advance();
        p.symbols.remove_local(&name);
        let init_pos = p.pos();
        let result = expr::parse_value(p, prog, bp::MIN)?;
        if result.data_type != ty {
            if ty == DataType::Num && result.data_type == DataType::Int {
                prog.append(emit::int2floats());
            } else {
                return Err(p.report_at(
                    ExitCode::Assignment,
                    "assignment",
                    format!("cannot initialize '{name}' ({ty:?}) with a value of type {:?}", result.data_type),
                    init_pos,
                ));
            }
        }
        prog.append(emit::pops(&Operand::local(unique.clone())));
        let mut defined = Symbol::new_var(&name, ty, unique);
        defined.status = Status::Defined;
        p.symbols.insert_local(defined);
    }
    Ok(())
}

struct AssignTarget {
    name: String,
    ty: DataType,
    operand: Operand,
    pos: Position,
}

fn resolve_assign_target(p: &mut Parser, name: String, pos: Position) -> Result<AssignTarget, ExitCode> {
    let Some((is_global, sym)) = p.symbols.resolve(&name) else {
        return Err(p.report_at(ExitCode::Definition, "definition", format!("undefined variable '{name}'"), pos));
    };
    if sym.kind != SymbolKind::Var {
        return Err(p.report_at(ExitCode::Definition, "definition", format!("'{name}' is not a variable"), pos));
    }
    let operand = if is_global {
        Operand::global(sym.unique_name)
    } else {
        Operand::local(sym.unique_name)
    };
    Ok(AssignTarget {
        name,
        ty: sym.data_type,
        operand,
        pos,
    })
}

/// `<id> [, <id>]* = <expr> [, <expr>]*`
///
/// The stack-ordering contract: each right-hand-side expression other
/// than a trailing bare call is emitted in source order, giving the
/// natural LIFO layout where the last value pushed ends up on top.
/// Targets are then popped in *reverse* declaration order, so the
/// rightmost target receives the topmost (= last-evaluated) value —
/// "assignment happens right to left" with left-to-right evaluation,
/// exactly as §4.3 specifies. A trailing multi-return call that must
/// supply more than one remaining target is truncated by
/// [`assign_truncate_call`], which preserves that same alignment.
fn parse_assignment(p: &mut Parser, prog: &mut Program, first_name: String, first_pos: Position) -> Result<(), ExitCode> {
    let mut targets = vec![resolve_assign_target(p, first_name, first_pos)?];
    while p.is_separator(",") {
        p.advance();
        let pos = p.pos();
        let name = p.expect_identifier()?;
        targets.push(resolve_assign_target(p, name, pos)?);
    }
    p.expect_operator("=")?;

    let mut simple_progs: Vec<Program> = Vec::new();
    let mut simple_types: Vec<DataType> = Vec::new();
    let mut trailing: Option<(Program, String)> = None;

    loop {
        let mut sub = Program::new();
        let result = expr::parse_expr(p, &mut sub)?;
        let has_more = p.is_separator(",");
        if result.only_call && !has_more {
            let rt = result.call_return_types.clone().unwrap_or_default();
            trailing = Some((sub, rt));
        } else {
            let single = expr::to_single_value(p, &mut sub, result);
            simple_types.push(single.data_type);
            simple_progs.push(sub);
        }
        if has_more {
            p.advance();
            continue;
        }
        break;
    }

    let n_targets = targets.len();
    let n_simple = simple_types.len();
    if n_simple > n_targets {
        return Err(p.report(ExitCode::Assignment, "assignment", "too many values on the right-hand side of the assignment"));
    }

    let mut call_emission: Option<Program> = None;
    if let Some((mut call_prog, return_types)) = trailing {
        let total = return_types.chars().count();
        let keep_n = n_targets - n_simple;
        if keep_n > total {
            return Err(p.report(
                ExitCode::Parameter,
                "parameter",
                "function call does not return enough values for this assignment",
            ));
        }
        let mut coerce = Vec::with_capacity(keep_n);
        for (i, c) in return_types.chars().take(keep_n).enumerate() {
            let from = DataType::from_char(c).unwrap_or(DataType::Undefined);
            let target = &targets[n_simple + i];
            if from == target.ty {
                coerce.push(false);
            } else if target.ty == DataType::Num && from == DataType::Int {
                coerce.push(true);
            } else {
                return Err(p.report_at(
                    ExitCode::Assignment,
                    "assignment",
                    format!("cannot assign to '{}': incompatible type", target.name),
                    target.pos,
                ));
            }
        }
        assign_truncate_call(p, &mut call_prog, keep_n, total, &coerce);
        call_emission = Some(call_prog);
    } else if n_simple != n_targets {
        return Err(p.report(
            ExitCode::Assignment,
            "assignment",
            "wrong number of values on the right-hand side of the assignment",
        ));
    }

    for (i, sub) in simple_progs.iter_mut().enumerate() {
        let target = &targets[i];
        let rty = simple_types[i];
        if rty != target.ty {
            if target.ty == DataType::Num && rty == DataType::Int {
                sub.append(emit::int2floats());
            } else {
                return Err(p.report_at(
                    ExitCode::Assignment,
                    "assignment",
                    format!("cannot assign to '{}': incompatible type", target.name),
                    target.pos,
                ));
            }
        }
        prog.append_program(sub);
    }
    if let Some(mut call_prog) = call_emission {
        prog.append_program(&mut call_prog);
    }

    for target in targets.iter().rev() {
        prog.append(emit::pops(&target.operand));
    }
    Ok(())
}

/// Pop the top `keep_n` of a just-finished call's `total` return values
/// off the stack (in the order the callee pushed them, first return
/// value on top) and push exactly those back — in that *same* order,
/// not reversed, so the first one ends up deepest and the last one
/// ends up on top. That is the opposite of [`expr::to_single_value`]'s
/// restore order, because here the kept values feed several distinct
/// assignment targets in declaration order rather than collapsing to
/// one value: the caller always pops its targets back-to-front, so the
/// value meant for the *last* extra target must be the one left on top.
fn assign_truncate_call(p: &mut Parser, prog: &mut Program, keep_n: usize, total: usize, coerce: &[bool]) {
    let mut keeps = Vec::with_capacity(keep_n);
    for _ in 0..keep_n {
        let t = p.fresh_temp();
        prog.append(emit::defvar(&Operand::global(t.clone())));
        prog.append(emit::pops(&Operand::global(t.clone())));
        keeps.push(t);
    }
    let discard_n = total - keep_n;
    if discard_n > 0 {
        let d = p.fresh_temp();
        prog.append(emit::defvar(&Operand::global(d.clone())));
        for _ in 0..discard_n {
            prog.append(emit::pops(&Operand::global(d.clone())));
        }
    }
    for (i, t) in keeps.iter().enumerate() {
        if coerce[i] {
            prog.append(emit::pushs(&Operand::global(t.clone())));
            prog.append(emit::int2floats());
            prog.append(emit::pops(&Operand::global(t.clone())));
        }
    }
    for t in &keeps {
        prog.append(emit::pushs(&Operand::global(t.clone())));
    }
}

/// True when the current token can begin a `return` expression list.
fn starts_return_expr(p: &Parser) -> bool {
    let tok = p.peek();
    match tok.kind {
        TokenKind::Identifier | TokenKind::Integer | TokenKind::Number | TokenKind::String => true,
        TokenKind::Keyword => tok.attr == "nil",
        TokenKind::Separator => tok.attr == "(",
        TokenKind::Operator => tok.attr == "-" || tok.attr == "#",
        TokenKind::Eof | TokenKind::Error | TokenKind::Unknown => false,
    }
}

/// `return [<expr> [, <expr>]*]`
///
/// Declared return values beyond what was actually written are padded
/// with `nil` and draw a warning; more than declared is a code-5
/// error. Sub-programs are appended in *reverse* so the first declared
/// return value ends up on top of the stack, matching the function
/// epilogue's own nil-padding order.
fn parse_return(p: &mut Parser, prog: &mut Program) -> Result<bool, ExitCode> {
    p.advance(); // 'return'
    let expected: Vec<char> = p.current_fn.as_ref().map(|f| f.return_types.chars().collect()).unwrap_or_default();

    let mut exprs: Vec<Program> = Vec::new();
    let mut types: Vec<DataType> = Vec::new();
    if starts_return_expr(p) {
        loop {
            let mut sub = Program::new();
            let v = expr::parse_value(p, &mut sub, bp::MIN)?;
            types.push(v.data_type);
            exprs.push(sub);
            if p.is_separator(",") {
                p.advance();
                continue;
            }
            break;
        }
    }

    if types.len() > expected.len() {
        return Err(p.report(ExitCode::Parameter, "parameter", "too many return values"));
    }
    for (i, exp_c) in expected.iter().enumerate() {
        let want = DataType::from_char(*exp_c);
        if i < types.len() {
            if want != Some(types[i]) {
                if want == Some(DataType::Num) && types[i] == DataType::Int {
                    exprs[i].append(emit::int2floats());
                } else {
                    return Err(p.report(ExitCode::Parameter, "parameter", "return value type mismatch"));
                }
            }
        } else {
            p.warn("return", "missing return value padded with nil");
            let mut sub = Program::new();
            sub.append(emit::pushs(&Operand::nil()));
            exprs.push(sub);
        }
    }

    for sub in exprs.iter_mut().rev() {
        prog.append_program(sub);
    }
    // Every `return`, not just the implicit fall-off-the-end epilogue,
    // must restore the caller's frame before leaving.
    prog.append(emit::popframe());
    prog.append(emit::returns());
    if let Some(ctx) = p.current_fn.as_mut() {
        ctx.found_return = true;
    }
    Ok(true)
}

/// `if <expr> then <block> [else <block>] end`
fn parse_if(p: &mut Parser, prog: &mut Program) -> Result<bool, ExitCode> {
    p.advance(); // 'if'
    let cond_pos = p.pos();
    let mut cond_prog = Program::new();
    let cond = expr::parse_value(p, &mut cond_prog, bp::MIN)?;
    if cond.data_type != DataType::Bool {
        return Err(p.report_at(ExitCode::ExprSemantic, "expression", "'if' condition must be a boolean expression", cond_pos));
    }
    p.expect_keyword("then")?;

    let (else_label, end_label) = p.labels.next_cond();
    prog.append_program(&mut cond_prog);
    prog.append(emit::pushs(&Operand::bool(false)));
    prog.append(emit::jumpifeqs(&else_label));

    let then_found = parse_block(p, prog, &["else", "end"])?;
    prog.append(emit::jump(&end_label));
    prog.append(emit::label(&else_label));

    let else_found = if p.is_keyword("else") {
        p.advance();
        parse_block(p, prog, &["end"])?
    } else {
        false
    };
    prog.append(emit::label(&end_label));
    p.expect_keyword("end")?;
    Ok(then_found && else_found)
}

/// `while <expr> do <block> end`
fn parse_while(p: &mut Parser, prog: &mut Program) -> Result<bool, ExitCode> {
    p.advance(); // 'while'
    let (start_label, end_label) = p.labels.next_loop();
    prog.append(emit::label(&start_label));

    let cond_pos = p.pos();
    let cond = expr::parse_value(p, prog, bp::MIN)?;
    if cond.data_type != DataType::Bool {
        return Err(p.report_at(ExitCode::ExprSemantic, "expression", "'while' condition must be a boolean expression", cond_pos));
    }
    p.expect_keyword("do")?;
    prog.append(emit::pushs(&Operand::bool(false)));
    prog.append(emit::jumpifeqs(&end_label));

    parse_block(p, prog, &["end"])?;
    prog.append(emit::jump(&start_label));
    prog.append(emit::label(&end_label));
    p.expect_keyword("end")?;
    // A loop body may execute zero times, so it never guarantees a
    // return on its own.
    Ok(false)
}

/// End-of-program consistency check (§4.3): a name still awaiting its
/// definition — whether it only ever reached a call-stub or got as far
/// as a `global` forward declaration and no further — is a code-3
/// error; a defined-but-never-called function is merely an unused-
/// function warning.
fn check_unresolved_functions(p: &mut Parser) {
    let pending_pos: std::collections::HashMap<String, Position> =
        p.symbols.pending().iter().map(|d| (d.name.clone(), d.pos)).collect();
    let eof_pos = p.pos();

    // Anything still `Declared` at program end never got a matching
    // `function` body, whether it arrived as a call-stub placeholder or
    // as a `global` forward declaration nobody followed up on.
    let unresolved: Vec<(String, Position)> = p
        .symbols
        .global()
        .values()
        .filter(|s| s.kind == SymbolKind::Func && s.status == Status::Declared)
        .map(|s| (s.name.clone(), pending_pos.get(&s.name).copied().unwrap_or(eof_pos)))
        .collect();
    for (name, pos) in unresolved {
        p.report_at(ExitCode::Definition, "definition", format!("'{name}' is declared but never defined"), pos);
    }

    let unused: Vec<String> = p
        .symbols
        .global()
        .values()
        .filter(|s| s.kind == SymbolKind::Func && !s.was_used && s.status == Status::Defined && !s.from_call_stub)
        .map(|s| s.name.clone())
        .collect();
    for name in unused {
        p.warn("unused", format!("function '{name}' is never called"));
    }
}

/// Re-tokenizing convenience used by tests and by `ifjc-drv`: build a
/// fresh [`Parser`] and run it to completion without going through
/// [`compile`]'s render step.
#[cfg(test)]
fn parse(source: &str) -> (Result<(), ExitCode>, ifjc_util::Handler) {
    let mut handler = Handler::new();
    let result = {
        let mut parser = Parser::new(source, &mut handler);
        parse_program(&mut parser)
    };
    (result, handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROLOG: &str = "require \"ifj21\"\n";

    #[test]
    fn prolog_is_required() {
        let (result, _h) = parse("global f : function()\nend\n");
        assert_eq!(result.unwrap_err(), ExitCode::OtherSemantic);
    }

    #[test]
    fn empty_program_after_prolog_is_fine() {
        let (result, handler) = parse(PROLOG);
        assert!(result.is_ok());
        assert_eq!(handler.code(), ExitCode::Success);
    }

    #[test]
    fn function_definition_emits_label_and_return() {
        let src = format!("{PROLOG}function f() : (integer)\n    return 1\nend\n");
        let mut handler = Handler::new();
        let mut parser = Parser::new(&src, &mut handler);
        parse_program(&mut parser).expect("should parse");
        let lines: Vec<_> = parser.functions.lines().collect();
        assert_eq!(lines[0], "LABEL f");
        assert!(lines.contains(&"RETURN"));
    }

    #[test]
    fn forward_declaration_matching_definition_is_accepted() {
        let src = format!("{PROLOG}global f : function() : (integer)\nfunction f() : (integer)\n    return 1\nend\n");
        let (result, _h) = parse(&src);
        assert!(result.is_ok());
    }

    #[test]
    fn forward_declaration_mismatch_is_definition_error() {
        let src = format!("{PROLOG}global f : function() : (integer)\nfunction f() : (string)\n    return \"x\"\nend\n");
        let (result, _h) = parse(&src);
        assert_eq!(result.unwrap_err(), ExitCode::Definition);
    }

    #[test]
    fn call_before_definition_is_resolved_at_end_of_program() {
        let src = format!("{PROLOG}function main()\n    foo()\nend\nfunction foo()\nend\n");
        let (result, handler) = parse(&src);
        assert!(result.is_ok());
        assert_eq!(handler.code(), ExitCode::Success);
    }

    #[test]
    fn call_to_name_never_defined_is_code_three() {
        let src = format!("{PROLOG}function main()\n    foo()\nend\n");
        let (result, handler) = parse(&src);
        assert!(result.is_ok());
        assert_eq!(handler.code(), ExitCode::Definition);
    }

    #[test]
    fn local_declaration_with_initializer_uses_delete_then_reinsert() {
        let src = format!("{PROLOG}function f()\n    local x : integer = 1\n    local x : integer = x + 1\nend\n");
        // The second `local x` redeclares in the same scope - this must
        // be rejected, since shadowing only happens across *block*
        // scopes, not repeated `local` statements in one block.
        let (result, _h) = parse(&src);
        assert_eq!(result.unwrap_err(), ExitCode::Definition);
    }

    #[test]
    fn assignment_type_mismatch_is_reported() {
        let src = format!("{PROLOG}function f()\n    local x : integer\n    x = \"s\"\nend\n");
        let (result, _h) = parse(&src);
        assert_eq!(result.unwrap_err(), ExitCode::Assignment);
    }

    #[test]
    fn int_to_num_coercion_on_assignment_is_allowed() {
        let src = format!("{PROLOG}function f()\n    local x : number\n    x = 1\nend\n");
        let (result, _h) = parse(&src);
        assert!(result.is_ok());
    }

    #[test]
    fn multi_target_assignment_from_trailing_call_splits_correctly() {
        let src = format!("{PROLOG}global pair : function() : (integer, integer)\nfunction f()\n    local a : integer\n    local b : integer\n    a, b = pair()\nend\nfunction pair() : (integer, integer)\n    return 1, 2\nend\n");
        let (result, handler) = parse(&src);
        assert!(result.is_ok(), "{:?}", handler.diagnostics());
    }

    #[test]
    fn excess_values_from_trailing_call_is_parameter_error() {
        let src = format!(
            "{PROLOG}global trio : function() : (integer, integer, integer)\nfunction f()\n    local a : integer\n    a = trio()\nend\n"
        );
        let (result, _h) = parse(&src);
        // A single target only needs the first of the call's three
        // return values; `assign_truncate_call` discards the other two
        // without error.
        assert!(result.is_ok());
    }

    #[test]
    fn if_else_both_returning_satisfies_missing_return_check() {
        let src = format!(
            "{PROLOG}function f() : (integer)\n    if 1 == 1 then\n        return 1\n    else\n        return 2\n    end\nend\n"
        );
        let (result, handler) = parse(&src);
        assert!(result.is_ok());
        assert_eq!(handler.code(), ExitCode::Success);
    }

    #[test]
    fn if_without_else_does_not_satisfy_missing_return_check() {
        let src = format!("{PROLOG}function f() : (integer)\n    if 1 == 1 then\n        return 1\n    end\nend\n");
        let (result, handler) = parse(&src);
        assert!(result.is_ok());
        assert!(handler.diagnostics().iter().any(|d| d.category == "return"));
    }

    #[test]
    fn while_loop_emits_label_guard_and_jump_back() {
        let src = format!("{PROLOG}function f()\n    while 1 == 1 do\n        local x : integer = 1\n    end\nend\n");
        let mut handler = Handler::new();
        let mut parser = Parser::new(&src, &mut handler);
        parse_program(&mut parser).expect("should parse");
        let lines: Vec<_> = parser.functions.lines().collect();
        assert!(lines.iter().any(|l| l.starts_with("LABEL $loop")));
        assert!(lines.iter().any(|l| l.starts_with("JUMP $loop")));
    }

    #[test]
    fn unused_function_is_only_a_warning() {
        let src = format!("{PROLOG}function f()\nend\n");
        let (result, handler) = parse(&src);
        assert!(result.is_ok());
        assert_eq!(handler.code(), ExitCode::Success);
        assert!(handler.diagnostics().iter().any(|d| d.category == "unused"));
    }

    #[test]
    fn full_program_assembles_with_jump_over_functions() {
        let src = format!("{PROLOG}function f()\nend\nf()\n");
        let (code, rendered) = compile(&src, &mut Handler::new());
        let _ = code;
        let rendered = rendered.expect("should compile");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], ".IFJcode21");
        assert_eq!(lines[1], "JUMP $$main");
        assert!(lines.contains(&"LABEL $$main"));
    }
}
