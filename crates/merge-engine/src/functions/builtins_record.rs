//! Record built-ins: `PrimaryRecord`, `Value`, `Text`.
//!
//! `Value` and `Text` are the engine's only data-accessing built-ins. The
//! host read behind them happens when their argument thunks are forced, not
//! before, so a `Value(...)` inside an untaken `If` branch never touches the
//! record store.

use std::rc::Rc;

use crate::error::FormulaError;
use crate::eval::{EvalContext, Thunk};
use crate::functions::{expect_arity, expect_arity_range};
use crate::value::{RecordRef, Value};

pub(super) fn primary_record_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    expect_arity("PrimaryRecord", args, 0)?;
    Ok(Thunk::constant(match &ctx.primary {
        Some(record) => Value::Record(Rc::clone(record)),
        None => Value::Null,
    }))
}

/// Shared argument handling for `Value`/`Text`: a string field path, then an
/// optional explicit record (defaulting to the context's primary record).
fn field_args(
    ctx: &EvalContext<'_>,
    function: &str,
    args: &[Rc<Thunk>],
) -> Result<(String, Option<RecordRef>), FormulaError> {
    expect_arity_range(function, args, 1, 2)?;
    let path = match &args[0].force(ctx)?.value {
        Value::Text(path) => path.clone(),
        other => {
            return Err(FormulaError::type_error(
                function,
                "a string field path",
                other.type_name(),
            ))
        }
    };
    let record = match args.get(1) {
        Some(arg) => match &arg.force(ctx)?.value {
            Value::Record(record) => Some(Rc::clone(record)),
            Value::Null => None,
            other => {
                return Err(FormulaError::type_error(
                    function,
                    "a record or null",
                    other.type_name(),
                ))
            }
        },
        None => ctx.primary.clone(),
    };
    Ok((path, record))
}

pub(super) fn value_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    let (path, record) = field_args(ctx, "Value", args)?;
    let value = match record {
        Some(record) => ctx.fields.resolve_field(&record, &path)?,
        // No record to read from: yield null without consulting the provider.
        None => Value::Null,
    };
    Ok(Thunk::constant(value))
}

pub(super) fn text_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    let (path, record) = field_args(ctx, "Text", args)?;
    let value = match record {
        Some(record) => Value::Text(ctx.fields.resolve_field_text(&record, &path)?),
        None => Value::Null,
    };
    Ok(Thunk::constant(value))
}
