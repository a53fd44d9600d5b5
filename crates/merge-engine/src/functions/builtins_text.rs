//! Text built-ins: `Concat`.

use std::rc::Rc;

use crate::error::FormulaError;
use crate::eval::{EvalContext, Thunk};
use crate::value::Value;

pub(super) fn concat_fn(
    ctx: &EvalContext<'_>,
    args: &[Rc<Thunk>],
) -> Result<Rc<Thunk>, FormulaError> {
    // All arguments are forced, left to right; the ordering is observable
    // through trace output and host field reads.
    let mut out = String::new();
    for arg in args {
        out.push_str(&arg.force(ctx)?.text);
    }
    Ok(Thunk::constant(Value::Text(out)))
}
