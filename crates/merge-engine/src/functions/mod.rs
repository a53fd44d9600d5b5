//! Function registry, dispatch types, and built-in handlers.
//!
//! Built-ins live in dedicated `builtins_*` modules. The registry is an
//! explicit, constructed-once table owned by the [`Engine`](crate::Engine) —
//! not global state — so hosts can register extra handlers before first use
//! and share one registry across evaluations by reference.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::FormulaError;
use crate::eval::{EvalContext, Thunk};
use crate::value::Value;

mod builtins_list;
mod builtins_logical;
mod builtins_record;
mod builtins_text;

/// The implementation behind one registered function name.
///
/// Handlers receive their arguments as unforced thunks and decide which to
/// force; that choice is what gives `If` and friends their short-circuit
/// behavior. The returned thunk becomes the call site's result (the call site
/// forces it once the handler returns).
pub type Handler = Arc<
    dyn Fn(&EvalContext<'_>, &[Rc<Thunk>]) -> Result<Rc<Thunk>, FormulaError> + Send + Sync,
>;

type BuiltinFn = fn(&EvalContext<'_>, &[Rc<Thunk>]) -> Result<Rc<Thunk>, FormulaError>;

/// Case-sensitive name → handler table.
pub struct FunctionRegistry {
    handlers: HashMap<String, Handler>,
}

impl FunctionRegistry {
    /// Registry with no functions at all.
    pub fn empty() -> Self {
        FunctionRegistry {
            handlers: HashMap::new(),
        }
    }

    /// Registry pre-populated with every built-in of the formula language.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (name, handler) in BUILTINS {
            registry.handlers.insert((*name).to_string(), Arc::new(*handler));
        }
        registry
    }

    /// Register (or replace) a handler. Intended for host-specific,
    /// data-accessing functions; must not be called concurrently with
    /// evaluation.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn resolve(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("Not", builtins_logical::not_fn),
    ("And", builtins_logical::and_fn),
    ("Or", builtins_logical::or_fn),
    ("IsNull", builtins_logical::isnull_fn),
    ("If", builtins_logical::if_fn),
    ("IsEqual", builtins_logical::isequal_fn),
    ("First", builtins_list::first_fn),
    ("Last", builtins_list::last_fn),
    ("Concat", builtins_text::concat_fn),
    ("PrimaryRecord", builtins_record::primary_record_fn),
    ("Value", builtins_record::value_fn),
    ("Text", builtins_record::text_fn),
];

/// Fail unless exactly `expected` arguments were supplied.
pub(crate) fn expect_arity(
    function: &str,
    args: &[Rc<Thunk>],
    expected: usize,
) -> Result<(), FormulaError> {
    if args.len() != expected {
        return Err(FormulaError::Arity {
            function: function.to_string(),
            expected: format!("exactly {expected}"),
            actual: args.len(),
        });
    }
    Ok(())
}

/// Fail unless the argument count falls in `min..=max`.
pub(crate) fn expect_arity_range(
    function: &str,
    args: &[Rc<Thunk>],
    min: usize,
    max: usize,
) -> Result<(), FormulaError> {
    if args.len() < min || args.len() > max {
        return Err(FormulaError::Arity {
            function: function.to_string(),
            expected: format!("{min} to {max}"),
            actual: args.len(),
        });
    }
    Ok(())
}

/// Force one argument and require it to be a boolean.
pub(crate) fn force_bool(
    ctx: &EvalContext<'_>,
    function: &str,
    arg: &Rc<Thunk>,
) -> Result<bool, FormulaError> {
    match &arg.force(ctx)?.value {
        Value::Bool(b) => Ok(*b),
        other => Err(FormulaError::type_error(
            function,
            "a boolean",
            other.type_name(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered_case_sensitively() {
        let registry = FunctionRegistry::with_builtins();
        for name in [
            "Not",
            "And",
            "Or",
            "IsNull",
            "If",
            "IsEqual",
            "First",
            "Last",
            "Concat",
            "PrimaryRecord",
            "Value",
            "Text",
        ] {
            assert!(registry.contains(name), "missing builtin {name}");
        }
        assert!(!registry.contains("if"));
        assert!(!registry.contains("ISNULL"));
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = FunctionRegistry::empty();
        assert!(registry.resolve("If").is_none());
    }

    #[test]
    fn registration_replaces_existing_entries() {
        let mut registry = FunctionRegistry::with_builtins();
        registry.register(
            "Concat",
            Arc::new(|_: &EvalContext<'_>, _: &[Rc<Thunk>]| {
                Ok(Thunk::constant(Value::Text("override".to_string())))
            }),
        );
        assert!(registry.contains("Concat"));
    }
}
