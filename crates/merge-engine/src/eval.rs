//! Deferred evaluation: thunks, the force/memoize protocol, and call-site
//! dispatch against the function registry.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::error::FormulaError;
use crate::functions::FunctionRegistry;
use crate::host::{FieldProvider, TraceSink};
use crate::value::{RecordRef, Value};

/// Everything a handler can reach during one evaluation.
///
/// Built fresh per `produce` call; the registry is borrowed read-only, so a
/// single registry can back concurrent evaluations on separate threads.
pub struct EvalContext<'a> {
    pub registry: &'a FunctionRegistry,
    pub fields: &'a dyn FieldProvider,
    pub trace: &'a dyn TraceSink,
    /// The host's "current record", surfaced by `PrimaryRecord` and used as
    /// the implicit record for single-argument `Value`/`Text` calls.
    pub primary: Option<RecordRef>,
}

/// The result of forcing a thunk: a typed value and its canonical text.
#[derive(Debug, Clone, PartialEq)]
pub struct Forced {
    pub text: String,
    pub value: Value,
}

impl Forced {
    fn of(value: Value) -> Self {
        Forced {
            text: value.render(),
            value,
        }
    }
}

#[derive(Debug)]
enum Compute {
    /// A constant; forcing is free and referentially transparent.
    Literal(Forced),
    /// A call site. The name is resolved against the registry only when the
    /// thunk is forced, never at construction time.
    Call { name: String, args: Vec<Rc<Thunk>> },
    /// Pass-through: forcing forces the inner thunk. Used when a handler
    /// hands back one of its argument thunks unevaluated (e.g. the branch an
    /// `If` selects).
    Defer(Rc<Thunk>),
}

/// A memoized deferred computation yielding a [`Forced`].
///
/// A thunk runs its computation at most once; every later access returns the
/// cached result. Side effects of the computation (trace lines, host field
/// reads) therefore happen only if and when the thunk is forced. The memo
/// cell is never filled on error: an error aborts the whole evaluation, so
/// nothing re-forces after a failure.
#[derive(Debug)]
pub struct Thunk {
    compute: Compute,
    forced: OnceCell<Forced>,
}

impl Thunk {
    /// Constant thunk whose text is the value's canonical rendering.
    pub fn constant(value: Value) -> Rc<Self> {
        Rc::new(Thunk {
            compute: Compute::Literal(Forced::of(value)),
            forced: OnceCell::new(),
        })
    }

    /// Constant thunk with an explicit text rendering.
    pub fn literal(text: impl Into<String>, value: Value) -> Rc<Self> {
        Rc::new(Thunk {
            compute: Compute::Literal(Forced {
                text: text.into(),
                value,
            }),
            forced: OnceCell::new(),
        })
    }

    /// Deferred call site: `name` is looked up and invoked when forced.
    pub fn call(name: impl Into<String>, args: Vec<Rc<Thunk>>) -> Rc<Self> {
        Rc::new(Thunk {
            compute: Compute::Call {
                name: name.into(),
                args,
            },
            forced: OnceCell::new(),
        })
    }

    /// Pass-through thunk that forwards forcing to `inner`.
    pub fn defer(inner: Rc<Thunk>) -> Rc<Self> {
        Rc::new(Thunk {
            compute: Compute::Defer(inner),
            forced: OnceCell::new(),
        })
    }

    /// Force this thunk: return the cached result, or run the computation and
    /// cache it.
    pub fn force(&self, ctx: &EvalContext<'_>) -> Result<&Forced, FormulaError> {
        if let Some(forced) = self.forced.get() {
            return Ok(forced);
        }
        let computed = match &self.compute {
            Compute::Literal(forced) => forced.clone(),
            Compute::Defer(inner) => inner.force(ctx)?.clone(),
            Compute::Call { name, args } => {
                let handler = ctx
                    .registry
                    .resolve(name)
                    .ok_or_else(|| FormulaError::UnknownFunction(name.clone()))?;
                // Exactly one begin/end pair per forced call site; calls that
                // parse but never force emit nothing.
                ctx.trace.trace(&format!("invoking `{name}`"));
                let result = handler(ctx, args);
                ctx.trace.trace(&format!("finished `{name}`"));
                result?.force(ctx)?.clone()
            }
        };
        Ok(self.forced.get_or_init(|| computed))
    }
}
