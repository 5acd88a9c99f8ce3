//! Severity of each error code per language version.
//!
//! Whether a code is an error or a warning depends on the language version
//! (5.1 reads an unknown escape as the escaped character, later versions
//! reject it). The decision is a lookup table rather than control flow in
//! the lexer and parser: built-in defaults, then caller overrides.

use luma_ir::LanguageVersion;
use rustc_hash::FxHashMap;

use crate::{Diagnostic, ErrorCode, Severity};

/// Severity lookup keyed by `(ErrorCode, LanguageVersion)`.
#[derive(Clone, Debug, Default)]
pub struct SeverityPolicy {
    overrides: FxHashMap<(ErrorCode, Option<LanguageVersion>), Severity>,
}

impl SeverityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the severity of `code` in every version.
    #[must_use]
    pub fn with_override(mut self, code: ErrorCode, severity: Severity) -> Self {
        self.overrides.insert((code, None), severity);
        self
    }

    /// Override the severity of `code` in one version. Takes precedence over
    /// an all-versions override.
    #[must_use]
    pub fn with_version_override(
        mut self,
        code: ErrorCode,
        version: LanguageVersion,
        severity: Severity,
    ) -> Self {
        self.overrides.insert((code, Some(version)), severity);
        self
    }

    pub fn severity(&self, code: ErrorCode, version: LanguageVersion) -> Severity {
        self.overrides
            .get(&(code, Some(version)))
            .or_else(|| self.overrides.get(&(code, None)))
            .copied()
            .unwrap_or_else(|| default_severity(code, version))
    }

    /// Create a diagnostic for `code` with the severity this policy assigns.
    pub fn diagnostic(&self, code: ErrorCode, version: LanguageVersion) -> Diagnostic {
        Diagnostic::error(code).with_severity(self.severity(code, version))
    }
}

/// Built-in table.
///
/// | code            | 5.1     | 5.2+    |
/// |-----------------|---------|---------|
/// | E0004 overflow  | warning | warning |
/// | E0005 escape    | warning | error   |
/// | E0010 version   | warning | error   |
/// | everything else | error   | error   |
fn default_severity(code: ErrorCode, version: LanguageVersion) -> Severity {
    match (code, version) {
        (ErrorCode::E0004, _) | (ErrorCode::E0005 | ErrorCode::E0010, LanguageVersion::Lua51) => {
            Severity::Warning
        }
        _ => Severity::Error,
    }
}

#[cfg(test)]
mod tests;
