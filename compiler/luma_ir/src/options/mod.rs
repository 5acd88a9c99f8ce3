//! Parse configuration.
//!
//! The language version selects keywords, operators and escape forms. All
//! version gating goes through [`LanguageVersion::supports`] so the lexer and
//! parser never compare versions directly.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Language version, ordered oldest to newest.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LanguageVersion {
    Lua51,
    Lua52,
    Lua53,
    #[default]
    Lua54,
}

/// Version-gated language features.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Feature {
    /// `goto name` and `::name::`.
    Goto,
    /// Floor division `//`.
    IntegerDivision,
    /// `& | ~ << >>` and unary `~`.
    BitwiseOperators,
    /// `local x <const>` and `<close>`.
    LocalAttributes,
    /// `0x1.8p3`.
    HexFloat,
    /// `\xXX` in strings.
    HexEscape,
    /// `\z` in strings.
    WhitespaceEscape,
    /// `\u{XXXX}` in strings.
    UnicodeEscape,
    /// A separate integer subtype for numerals.
    Integers,
}

impl Feature {
    /// User-facing name for diagnostics.
    pub const fn description(self) -> &'static str {
        match self {
            Feature::Goto => "goto statements and labels",
            Feature::IntegerDivision => "floor division operator `//`",
            Feature::BitwiseOperators => "bitwise operators",
            Feature::LocalAttributes => "local variable attributes",
            Feature::HexFloat => "hexadecimal float literals",
            Feature::HexEscape => "hexadecimal escape sequences",
            Feature::WhitespaceEscape => "`\\z` escape sequences",
            Feature::UnicodeEscape => "unicode escape sequences",
            Feature::Integers => "integer numerals",
        }
    }

    /// First version that has the feature.
    pub const fn introduced_in(self) -> LanguageVersion {
        match self {
            Feature::Goto | Feature::HexFloat | Feature::HexEscape | Feature::WhitespaceEscape => {
                LanguageVersion::Lua52
            }
            Feature::IntegerDivision
            | Feature::BitwiseOperators
            | Feature::UnicodeEscape
            | Feature::Integers => LanguageVersion::Lua53,
            Feature::LocalAttributes => LanguageVersion::Lua54,
        }
    }
}

impl LanguageVersion {
    pub const ALL: [LanguageVersion; 4] = [
        LanguageVersion::Lua51,
        LanguageVersion::Lua52,
        LanguageVersion::Lua53,
        LanguageVersion::Lua54,
    ];

    pub const LATEST: LanguageVersion = LanguageVersion::Lua54;

    #[inline]
    pub fn supports(self, feature: Feature) -> bool {
        self >= feature.introduced_in()
    }

    /// Dotted form, e.g. `"5.3"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            LanguageVersion::Lua51 => "5.1",
            LanguageVersion::Lua52 => "5.2",
            LanguageVersion::Lua53 => "5.3",
            LanguageVersion::Lua54 => "5.4",
        }
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lua {}", self.as_str())
    }
}

/// A language version string that matched nothing.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown language version `{0}` (expected one of 5.1, 5.2, 5.3, 5.4)")]
pub struct UnknownLanguageVersion(pub String);

impl FromStr for LanguageVersion {
    type Err = UnknownLanguageVersion;

    /// Accepts `5.1`, `51`, `lua5.1`, `Lua51`, `lua 5.1` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let digits: String = lowered
            .strip_prefix("lua")
            .unwrap_or(&lowered)
            .chars()
            .filter(|c| !matches!(c, ' ' | '.' | '_' | '-'))
            .collect();
        match digits.as_str() {
            "51" => Ok(LanguageVersion::Lua51),
            "52" => Ok(LanguageVersion::Lua52),
            "53" => Ok(LanguageVersion::Lua53),
            "54" => Ok(LanguageVersion::Lua54),
            _ => Err(UnknownLanguageVersion(s.to_owned())),
        }
    }
}

/// What kind of source unit is being parsed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceKind {
    /// A module loaded by `require`.
    #[default]
    Regular,
    /// A script run directly; may start with a `#!` line.
    Script,
}

/// Options that affect lexing and parsing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOptions {
    pub version: LanguageVersion,
    pub kind: SourceKind,
    /// Names defined for external preprocessing collaborators. The core only
    /// stores them.
    pub preprocessor_symbols: BTreeSet<String>,
    /// Use the quick-scan token cache. Output does not depend on this.
    pub quick_scan: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            version: LanguageVersion::default(),
            kind: SourceKind::default(),
            preprocessor_symbols: BTreeSet::new(),
            quick_scan: true,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_version(mut self, version: LanguageVersion) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: SourceKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_preprocessor_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preprocessor_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn without_quick_scan(mut self) -> Self {
        self.quick_scan = false;
        self
    }

    /// Script options for the latest version.
    pub fn script() -> Self {
        Self::default().with_kind(SourceKind::Script)
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.preprocessor_symbols.contains(symbol)
    }

    #[inline]
    pub fn supports(&self, feature: Feature) -> bool {
        self.version.supports(feature)
    }
}
