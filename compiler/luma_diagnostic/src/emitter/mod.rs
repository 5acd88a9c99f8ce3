//! Human-readable rendering of diagnostics.
//!
//! ```text
//! error[E0001]: unterminated string literal
//!   --> main.lua:2:7
//!    |
//!  2 | print("abc
//!    |       ^^^^
//! ```

use std::io::{self, Write};

use luma_ir::{LineIndex, Span};

use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const HELP: &str = "\x1b[1;32m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()>;

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        for diag in diagnostics {
            self.emit(diag)?;
        }
        Ok(())
    }

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize) -> io::Result<()>;
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Terminal emitter for one source file.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    path: &'src str,
    source: &'src str,
    lines: LineIndex,
    colors: bool,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn new(writer: W, path: &'src str, source: &'src str) -> Self {
        TerminalEmitter {
            writer,
            path,
            source,
            lines: LineIndex::new(source),
            colors: false,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        }
    }

    /// Source line containing `offset`, without its line terminator.
    fn line_text(&self, line: u32) -> &'src str {
        let start = self.lines.line_start(line).unwrap_or(0) as usize;
        let end = self
            .lines
            .line_start(line + 1)
            .map_or(self.source.len(), |next| next as usize);
        self.source[start..end].trim_end_matches(['\n', '\r'])
    }

    fn emit_snippet(
        &mut self,
        span: Span,
        marker: char,
        color: &str,
        label: Option<&str>,
    ) -> io::Result<()> {
        let start = self.lines.line_col(span.start);
        let text = self.line_text(start.line);
        let gutter = start.line.to_string().len();
        let col = start.col as usize - 1;
        let width = (span.len() as usize).clamp(1, text.len().saturating_sub(col).max(1));
        writeln!(self.writer, "{:gutter$} |", "")?;
        writeln!(self.writer, "{} | {text}", start.line)?;
        write!(self.writer, "{:gutter$} | {:col$}", "", "")?;
        self.paint(&marker.to_string().repeat(width), color)?;
        if let Some(label) = label {
            write!(self.writer, " ")?;
            self.paint(label, color)?;
        }
        writeln!(self.writer)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let color = Self::severity_color(diagnostic.severity);
        self.paint(&format!("{}[{}]", diagnostic.severity, diagnostic.code), color)?;
        writeln!(self.writer, ": {}", diagnostic.message_or_summary())?;
        let position = self.lines.line_col(diagnostic.span.start);
        writeln!(self.writer, "  --> {}:{position}", self.path)?;
        let primary = diagnostic.labels.iter().find(|l| l.is_primary);
        self.emit_snippet(
            diagnostic.span,
            '^',
            color,
            primary.map(|l| l.message.as_str()),
        )?;
        for label in diagnostic.labels.iter().filter(|l| !l.is_primary) {
            self.emit_snippet(label.span, '-', colors::SECONDARY, None)?;
            writeln!(self.writer, "   = {}", label.message)?;
        }
        for note in &diagnostic.notes {
            writeln!(self.writer, "   = note: {note}")?;
        }
        writeln!(self.writer)
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) -> io::Result<()> {
        if error_count > 0 {
            self.paint(
                &format!("error: {error_count} error{}", plural_s(error_count)),
                colors::ERROR,
            )?;
            writeln!(self.writer)?;
        }
        if warning_count > 0 {
            self.paint(
                &format!("warning: {warning_count} warning{}", plural_s(warning_count)),
                colors::WARNING,
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
