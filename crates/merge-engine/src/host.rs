//! Host embedding traits.
//!
//! The engine evaluates formulas against capabilities the host supplies per
//! evaluation: a field provider for `Value`/`Text` lookups and a trace sink
//! for per-call diagnostics. Both are object-safe so hosts can hand in
//! whatever they have by reference.

use crate::error::FormulaError;
use crate::value::{RecordRef, Value};

/// Resolves dotted field paths against the host record store.
///
/// Path semantics belong entirely to the host: traversal across linked
/// records (`account.owner.fullname`) and locale-aware formatted-value
/// preference happen behind this trait. The engine only calls it when a
/// `Value`/`Text` argument thunk is actually forced, and surfaces its result
/// or failure unchanged.
pub trait FieldProvider {
    fn resolve_field(&self, record: &RecordRef, path: &str) -> Result<Value, FormulaError>;

    /// Rendered string form of a field, used by the `Text` builtin. The
    /// default renders the typed value; hosts override this to prefer a
    /// locale-formatted value over the raw one.
    fn resolve_field_text(&self, record: &RecordRef, path: &str) -> Result<String, FormulaError> {
        Ok(self.resolve_field(record, path)?.render())
    }
}

/// Receives one message before and one after every forced handler call.
///
/// Sink failures are not the engine's concern; implementations should not
/// panic.
pub trait TraceSink {
    fn trace(&self, message: &str);
}

/// Field provider for hosts without a record store: every resolution fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFieldProvider;

impl FieldProvider for NullFieldProvider {
    fn resolve_field(&self, _record: &RecordRef, path: &str) -> Result<Value, FormulaError> {
        Err(FormulaError::Field {
            path: path.to_string(),
            message: "no field provider configured".to_string(),
        })
    }
}

/// Trace sink that discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn trace(&self, _message: &str) {}
}
