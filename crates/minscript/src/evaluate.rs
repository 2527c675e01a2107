//! Tree-walking evaluator.
//!
//! Three mutually recursive entry points walk the AST directly: blocks,
//! statements and expressions. Statement execution is strictly sequential and
//! expression evaluation strictly left-to-right; `print` side effects observe
//! that ordering. Once the return-pending flag is set in a context, enclosing
//! blocks and loops unwind without further effect until the call returns.

use std::str::FromStr;

use strum::EnumString;

use crate::arena::{Arena, NodeId};
use crate::ast::Node;
use crate::context::{Context, FunctionDef};
use crate::io::PrintWriter;
use crate::limits::RunResult;
use crate::value::Value;

/// Function names the evaluator intercepts before consulting the user
/// function table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Builtin {
    Print,
}

/// Executes `root` (normally the parser's `Program` node) in `ctx` and
/// returns the value of the last executed statement.
///
/// A top-level `return` sets the return flag on `ctx` and halts the program;
/// its value becomes the result.
pub fn interpret(
    root: NodeId,
    arena: &mut Arena,
    ctx: &mut Context,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    execute_statement(root, arena, ctx, print)
}

fn execute_block(
    statements: &[NodeId],
    arena: &mut Arena,
    ctx: &mut Context,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    let mut last = Value::Undefined;
    for &stmt in statements {
        last = execute_statement(stmt, arena, ctx, print)?;
        if ctx.return_pending() {
            break;
        }
    }
    Ok(last)
}

fn execute_statement(
    stmt: NodeId,
    arena: &mut Arena,
    ctx: &mut Context,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    let node = arena.node(stmt).clone();
    match node {
        Node::Program(statements) | Node::Block(statements) => {
            execute_block(&statements, arena, ctx, print)
        }
        Node::VarDecl { name, init } => {
            let value = match init {
                Some(expr) => evaluate_expression(expr, arena, ctx, print)?,
                None => Value::Undefined,
            };
            ctx.set_variable(name, value)?;
            Ok(Value::Undefined)
        }
        Node::FuncDecl { name, params, body } => {
            ctx.register_function(FunctionDef { name, params, body })?;
            Ok(Value::Undefined)
        }
        Node::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let condition = evaluate_expression(condition, arena, ctx, print)?;
            if condition.is_truthy(arena) {
                execute_statement(then_branch, arena, ctx, print)
            } else if let Some(else_branch) = else_branch {
                execute_statement(else_branch, arena, ctx, print)
            } else {
                Ok(Value::Undefined)
            }
        }
        Node::While { condition, body } => {
            let mut last = Value::Undefined;
            loop {
                let test = evaluate_expression(condition, arena, ctx, print)?;
                if !test.is_truthy(arena) {
                    break;
                }
                last = execute_statement(body, arena, ctx, print)?;
                if ctx.return_pending() {
                    break;
                }
            }
            Ok(last)
        }
        Node::Return(value) => {
            let value = match value {
                Some(expr) => evaluate_expression(expr, arena, ctx, print)?,
                None => Value::Undefined,
            };
            ctx.set_return(value);
            Ok(value)
        }
        _ => evaluate_expression(stmt, arena, ctx, print),
    }
}

fn evaluate_expression(
    expr: NodeId,
    arena: &mut Arena,
    ctx: &mut Context,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    let node = arena.node(expr).clone();
    match node {
        Node::Number(n) => Ok(Value::Number(n)),
        Node::Str(id) => Ok(Value::Str(id)),
        Node::Identifier(name) => Ok(ctx.get_variable(name)),
        Node::Binary { op, left, right } => {
            let left = evaluate_expression(left, arena, ctx, print)?;
            let right = evaluate_expression(right, arena, ctx, print)?;
            Value::binary(op, left, right, arena)
        }
        Node::Unary { op, operand } => {
            let operand = evaluate_expression(operand, arena, ctx, print)?;
            Ok(Value::unary(op, operand, arena))
        }
        Node::Assign { target, value } => {
            // Only assignment to a bare identifier is supported.
            let Node::Identifier(name) = *arena.node(target) else {
                return Ok(Value::Undefined);
            };
            let value = evaluate_expression(value, arena, ctx, print)?;
            ctx.set_variable(name, value)?;
            Ok(value)
        }
        Node::Call { callee, args } => evaluate_call(callee, &args, arena, ctx, print),
        // Statement nodes in expression position and reserved nodes (For).
        _ => Ok(Value::Undefined),
    }
}

fn evaluate_call(
    callee: NodeId,
    args: &[NodeId],
    arena: &mut Arena,
    ctx: &mut Context,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    // Only identifier callees are callable; arguments of anything else are
    // never evaluated.
    let Node::Identifier(name) = *arena.node(callee) else {
        return Ok(Value::Undefined);
    };

    if let Ok(builtin) = Builtin::from_str(arena.get_str(name)) {
        return match builtin {
            Builtin::Print => builtin_print(args, arena, ctx, print),
        };
    }

    let Some(def) = ctx.function(name).cloned() else {
        return Ok(Value::Undefined);
    };
    call_function(&def, args, arena, ctx, print)
}

/// Evaluates all arguments left-to-right and prints them separated by single
/// spaces, one `\n`-terminated line per invocation. Returns undefined.
fn builtin_print(
    args: &[NodeId],
    arena: &mut Arena,
    ctx: &mut Context,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    let mut line = String::new();
    for (i, &arg) in args.iter().enumerate() {
        let value = evaluate_expression(arg, arena, ctx, print)?;
        if i > 0 {
            line.push(' ');
        }
        let _ = value.write_display(&mut line, arena);
    }
    print.write_line(&line);
    Ok(Value::Undefined)
}

/// Calls a user-defined function: arguments are evaluated in the caller's
/// context and bound by position in a fresh callee context whose function
/// table is copied from the caller's. Arguments beyond the parameter list are
/// not evaluated; unbound parameters read as undefined.
fn call_function(
    def: &FunctionDef,
    args: &[NodeId],
    arena: &mut Arena,
    caller: &mut Context,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    let mut callee = caller.child()?;

    for (&param, &arg) in def.params.iter().zip(args) {
        let value = evaluate_expression(arg, arena, caller, print)?;
        callee.set_variable(param, value)?;
    }

    execute_statement(def.body, arena, &mut callee, print)?;

    if callee.return_pending() {
        Ok(callee.return_value())
    } else {
        Ok(Value::Undefined)
    }
}
