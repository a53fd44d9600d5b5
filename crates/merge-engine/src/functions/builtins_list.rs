//! List built-ins: `First`, `Last`.

use std::rc::Rc;

use crate::error::FormulaError;
use crate::eval::{EvalContext, Thunk};
use crate::functions::expect_arity;
use crate::value::Value;

fn pick_fn(
    ctx: &EvalContext<'_>,
    function: &str,
    args: &[Rc<Thunk>],
    pick: fn(&[Value]) -> Option<&Value>,
) -> Result<Rc<Thunk>, FormulaError> {
    expect_arity(function, args, 1)?;
    let forced = args[0].force(ctx)?;
    match &forced.value {
        Value::List(items) => Ok(Thunk::constant(
            pick(items).cloned().unwrap_or(Value::Null),
        )),
        other => Err(FormulaError::type_error(
            function,
            "a list",
            other.type_name(),
        )),
    }
}

pub(super) fn first_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    pick_fn(ctx, "First", args, <[Value]>::first)
}

pub(super) fn last_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    pick_fn(ctx, "Last", args, <[Value]>::last)
}
