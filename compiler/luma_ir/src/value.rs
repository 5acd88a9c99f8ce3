//! Cooked literal values carried by tokens.

use std::fmt;

/// The value of a literal token.
///
/// Floats are stored as their bit pattern so the whole enum is `Eq + Hash`
/// and green tokens can be compared and interned by value.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub enum TokenValue {
    /// Token without a value (punctuation, identifiers, keywords other than
    /// the literal ones).
    #[default]
    None,
    Nil,
    Boolean(bool),
    /// String contents after escape processing. Not necessarily UTF-8.
    String(Box<[u8]>),
    Integer(i64),
    /// `f64` bits.
    Float(u64),
}

impl TokenValue {
    #[inline]
    pub fn float(value: f64) -> Self {
        TokenValue::Float(value.to_bits())
    }

    pub fn string(bytes: impl Into<Box<[u8]>>) -> Self {
        TokenValue::String(bytes.into())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TokenValue::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            TokenValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TokenValue::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, TokenValue::None)
    }
}

impl fmt::Debug for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::None => f.write_str("None"),
            TokenValue::Nil => f.write_str("Nil"),
            TokenValue::Boolean(b) => write!(f, "Boolean({b})"),
            TokenValue::String(bytes) => write!(f, "String({:?})", String::from_utf8_lossy(bytes)),
            TokenValue::Integer(i) => write!(f, "Integer({i})"),
            TokenValue::Float(bits) => write!(f, "Float({:?})", f64::from_bits(*bits)),
        }
    }
}
