#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

//! An embedded formula language engine for record mail-merge templates.
//!
//! The engine evaluates short textual formulas such as
//! `If(IsNull(Value("subject")), "Fallback", Value("subject"))` and renders a
//! single textual result. Evaluation is lazy: the parser builds a tree of
//! memoized thunks, and each handler decides which of its argument thunks to
//! force, so `If` short-circuits and a data read behind `Value(...)` happens
//! only when that argument is actually needed.
//!
//! Hosts embed the engine by supplying a [`FieldProvider`] (dotted field-path
//! resolution against their record store), a [`TraceSink`], and an optional
//! primary [`RecordRef`] per evaluation:
//!
//! ```
//! use merge_engine::{Engine, HostContext, NullFieldProvider, NullTraceSink};
//!
//! let engine = Engine::new();
//! let host = HostContext::new(&NullFieldProvider, &NullTraceSink);
//! let text = engine.produce("If(true, \"A\", \"B\")", &host).unwrap();
//! assert_eq!(text, "A");
//! ```
//!
//! Host-specific functions are added with [`Engine::register`] before first
//! use; the registry is read-only during evaluation. The outer template-token
//! scanner that extracts `${{ ... }}` regions from a document and calls
//! [`Engine::produce`] per token lives outside this crate.

mod engine;
mod error;
mod eval;
mod functions;
mod host;
mod parser;
mod value;

pub use engine::{Engine, HostContext};
pub use error::FormulaError;
pub use eval::{EvalContext, Forced, Thunk};
pub use functions::{FunctionRegistry, Handler};
pub use host::{FieldProvider, NullFieldProvider, NullTraceSink, TraceSink};
pub use value::{RecordHandle, RecordRef, Value};
