use crate::error::FormulaError;
use crate::eval::EvalContext;
use crate::functions::{FunctionRegistry, Handler};
use crate::host::{FieldProvider, TraceSink};
use crate::parser;
use crate::value::RecordRef;

/// Host capabilities for one evaluation: a field provider, a trace sink, and
/// an optional primary record.
pub struct HostContext<'a> {
    pub fields: &'a dyn FieldProvider,
    pub trace: &'a dyn TraceSink,
    pub primary: Option<RecordRef>,
}

impl<'a> HostContext<'a> {
    pub fn new(fields: &'a dyn FieldProvider, trace: &'a dyn TraceSink) -> Self {
        HostContext {
            fields,
            trace,
            primary: None,
        }
    }

    #[must_use]
    pub fn with_primary(mut self, record: RecordRef) -> Self {
        self.primary = Some(record);
        self
    }
}

/// The formula interpreter: a function registry plus the `produce` driver.
///
/// Construct one engine, register any host-specific functions, then call
/// [`Engine::produce`] per formula. The registry is read-only during
/// evaluation, so one engine may serve concurrent evaluations on separate
/// threads as long as registered handlers are reentrant.
pub struct Engine {
    registry: FunctionRegistry,
}

impl Engine {
    /// Engine with every built-in registered.
    pub fn new() -> Self {
        Engine {
            registry: FunctionRegistry::with_builtins(),
        }
    }

    /// Engine over a caller-assembled registry.
    pub fn with_registry(registry: FunctionRegistry) -> Self {
        Engine { registry }
    }

    /// Register a host-specific function. Call before evaluating; the
    /// registry must not change concurrently with an evaluation.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) {
        self.registry.register(name, handler);
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Parse `formula` and force its root thunk to text.
    ///
    /// Blank input produces an empty result without invoking the parser.
    /// The lexer/parser/thunk tree live only for this call; any failure
    /// aborts the whole formula with no partial result.
    pub fn produce(&self, formula: &str, host: &HostContext<'_>) -> Result<String, FormulaError> {
        if formula.trim().is_empty() {
            return Ok(String::new());
        }
        let root = parser::parse(formula)?;
        let ctx = EvalContext {
            registry: &self.registry,
            fields: host.fields,
            trace: host.trace,
            primary: host.primary.clone(),
        };
        Ok(root.force(&ctx)?.text.clone())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
