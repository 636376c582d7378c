//! Where parse failures are reported
//!
//! A failed parse hands its single [`ParseError`] to a [`DiagnosticSink`]
//! before returning. The binary reports to stderr; tests collect messages.

use crate::parser::ParseError;

/// Receives the one diagnostic a failed parse produces
pub trait DiagnosticSink {
    fn report(&mut self, error: &ParseError);
}

/// Writes `Error: <message>` to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, error: &ParseError) {
        eprintln!("Error: {}", error);
    }
}

/// Collects rendered messages
impl DiagnosticSink for Vec<String> {
    fn report(&mut self, error: &ParseError) {
        self.push(error.to_string());
    }
}
