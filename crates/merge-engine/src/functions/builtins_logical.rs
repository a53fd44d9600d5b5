//! Logic and comparison built-ins: `Not`, `And`, `Or`, `IsNull`, `If`,
//! `IsEqual`.

use std::rc::Rc;

use crate::error::FormulaError;
use crate::eval::{EvalContext, Thunk};
use crate::functions::{expect_arity, force_bool};
use crate::value::Value;

pub(super) fn not_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    expect_arity("Not", args, 1)?;
    let operand = force_bool(ctx, "Not", &args[0])?;
    Ok(Thunk::constant(Value::Bool(!operand)))
}

pub(super) fn and_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    expect_arity("And", args, 2)?;
    // Both operands are forced left to right; `And` does not short-circuit.
    let left = force_bool(ctx, "And", &args[0])?;
    let right = force_bool(ctx, "And", &args[1])?;
    Ok(Thunk::constant(Value::Bool(left && right)))
}

pub(super) fn or_fn(ctx: &EvalContext<'_>, args: &[Rc<Thunk>]) -> Result<Rc<Thunk>, FormulaError> {
    expect_arity("Or", args, 2)?;
    let left = force_bool(ctx, "Or", &args[0])?;
    let right = force_bool(ctx, "Or", &args[1])?;
    Ok(Thunk::constant(Value::Bool(left || right)))
}

pub(super) fn isnull_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    expect_arity("IsNull", args, 1)?;
    let forced = args[0].force(ctx)?;
    Ok(Thunk::constant(Value::Bool(forced.value.is_null())))
}

pub(super) fn if_fn(ctx: &EvalContext<'_>, args: &[Rc<Thunk>]) -> Result<Rc<Thunk>, FormulaError> {
    expect_arity("If", args, 3)?;
    let condition = force_bool(ctx, "If", &args[0])?;
    let branch = if condition { &args[1] } else { &args[2] };
    // Hand the selected branch back unevaluated. The untaken branch is never
    // forced, so an unknown function inside it never reaches the registry.
    Ok(Thunk::defer(Rc::clone(branch)))
}

pub(super) fn isequal_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    expect_arity("IsEqual", args, 2)?;
    let left = args[0].force(ctx)?.value.clone();
    let right = &args[1].force(ctx)?.value;
    let equal = match (&left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (a, b) => match (a.numeric_code(), b.numeric_code()) {
            // Numeric compatibility rule: plain integers and enumeration-like
            // handles compare by their reduced integer codes.
            (Some(x), Some(y)) => x == y,
            _ => match (a, b) {
                (Value::Bool(x), Value::Bool(y)) => x == y,
                (Value::Text(x), Value::Text(y)) => x == y,
                (Value::List(x), Value::List(y)) => x == y,
                _ => {
                    return Err(FormulaError::IncompatibleComparison {
                        left: a.type_name().to_string(),
                        right: b.type_name().to_string(),
                    })
                }
            },
        },
    };
    Ok(Thunk::constant(Value::Bool(equal)))
}
