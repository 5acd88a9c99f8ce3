//! Separated lists inside delimiters.
//!
//! Parameter lists, argument lists and table constructors share one loop:
//! elements separated by one of a set of separators, closed by a
//! terminator. The loop never consumes the terminator; the caller expects
//! it, so a missing closer becomes an ordinary missing token.

use luma_diagnostic::ErrorCode;
use luma_ir::SyntaxKind;

use crate::parser::Parser;
use crate::recovery::{TokenSet, LIST_RECOVERY};

/// Whether a separator may directly precede the terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailingSeparator {
    Allowed,
    Forbidden,
}

/// Shape of one separated list.
#[derive(Clone, Copy, Debug)]
pub struct SeriesConfig {
    pub separators: TokenSet,
    pub terminator: SyntaxKind,
    pub trailing: TrailingSeparator,
    /// Tokens that can start an element.
    pub element_start: TokenSet,
}

impl SeriesConfig {
    /// Comma separated, no trailing comma.
    pub const fn comma(terminator: SyntaxKind, element_start: TokenSet) -> Self {
        SeriesConfig {
            separators: TokenSet::EMPTY.with(SyntaxKind::CommaToken),
            terminator,
            trailing: TrailingSeparator::Forbidden,
            element_start,
        }
    }

    #[must_use]
    pub const fn separators(mut self, separators: TokenSet) -> Self {
        self.separators = separators;
        self
    }

    #[must_use]
    pub const fn trailing(mut self, trailing: TrailingSeparator) -> Self {
        self.trailing = trailing;
        self
    }
}

impl Parser<'_> {
    /// Parse elements until the terminator. `element` is only called when
    /// the current token is in `config.element_start`; `missing` builds the
    /// placeholder for an empty slot.
    ///
    /// Returns the number of elements, placeholders included.
    pub(crate) fn series(
        &mut self,
        config: SeriesConfig,
        mut element: impl FnMut(&mut Self),
        mut missing: impl FnMut(&mut Self),
    ) -> usize {
        let mut count = 0;
        let mut after_separator = false;
        loop {
            let kind = self.current_kind();
            if kind == config.terminator {
                if after_separator && config.trailing == TrailingSeparator::Forbidden {
                    self.missing_element(&mut missing);
                    count += 1;
                }
                break;
            }
            if config.element_start.contains(kind) && (after_separator || count == 0) {
                element(self);
                count += 1;
                after_separator = false;
                continue;
            }
            if config.separators.contains(kind) {
                if after_separator || count == 0 {
                    self.missing_element(&mut missing);
                    count += 1;
                }
                self.bump();
                after_separator = true;
                continue;
            }
            if config.element_start.contains(kind) {
                // Two elements in a row: the separator is missing.
                self.expect(SyntaxKind::CommaToken);
                after_separator = true;
                continue;
            }
            if self.at_set(LIST_RECOVERY) {
                break;
            }
            self.skip();
        }
        count
    }

    fn missing_element(&mut self, missing: &mut impl FnMut(&mut Self)) {
        let message = format!("expected list element, found {}", self.found());
        self.error(ErrorCode::E1005, self.current_span(), message);
        missing(self);
    }
}
