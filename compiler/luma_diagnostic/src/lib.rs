//! Diagnostics for the Luma front-end.
//!
//! Every phase reports problems the same way:
//! - an [`ErrorCode`] whose first digit names the phase,
//! - a [`Severity`] resolved through a [`SeverityPolicy`],
//! - a message and a primary span, plus optional labels and notes.
//!
//! Phases only ever append to a [`DiagnosticSink`]; nothing reads the sink
//! back while lexing or parsing.

mod diagnostic;
pub mod emitter;
mod error_code;
mod policy;

pub use diagnostic::{Diagnostic, DiagnosticSink, Label, Severity};
pub use error_code::ErrorCode;
pub use policy::SeverityPolicy;
