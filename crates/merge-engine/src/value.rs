use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Host-owned opaque handle, typically a reference into a remote record store.
///
/// The engine never inspects a handle beyond the methods here: text rendering
/// is delegated to the host, and enumeration-like handles may expose an
/// integer code so `IsEqual` can compare them numerically.
pub trait RecordHandle: Any + fmt::Debug {
    /// Host-supplied stringification used whenever the handle reaches a text
    /// rendering position (e.g. as a `Concat` argument).
    fn display_text(&self) -> String;

    /// Integer reduction for enumeration-like handles (an option-set value's
    /// code). `None` means the handle does not participate in numeric
    /// comparison.
    fn numeric_code(&self) -> Option<i64> {
        None
    }

    /// Downcast seam for field providers, which receive handles back as
    /// `&RecordRef` and need their concrete type. Implementations return
    /// `self`.
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a host record. Evaluation is single-threaded, so `Rc`
/// suffices; only the function registry crosses threads.
pub type RecordRef = Rc<dyn RecordHandle>;

/// Dynamic value flowing through an evaluation.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    /// Ordered, heterogeneous, insertion order significant.
    List(Vec<Value>),
    /// External domain handle the engine only passes through.
    Record(RecordRef),
}

impl Value {
    /// Canonical text rendering. Every value has one; for `Record` it is
    /// delegated to the host via [`RecordHandle::display_text`].
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Text(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::render)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Record(handle) => handle.display_text(),
        }
    }

    /// Runtime type name as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Text(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Integer reduction used by `IsEqual`'s numeric compatibility rule:
    /// plain integers compare with enumeration-like record handles by code.
    pub fn numeric_code(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Record(handle) => handle.numeric_code(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // Handles are opaque; identity is the only equality the engine
            // can decide without the host.
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
