//! Operand values and their wire encoding
//!
//! PostgREST reserves `,.:()` inside filter values; values containing any
//! of them are wrapped in percent-encoded double quotes. Pattern operands
//! use `*` as the wildcard on the wire, so the caller's SQL-style `%` is
//! rewritten before encoding.

/// Characters that force a value to be quoted on the wire
const RESERVED_CHARS: &[char] = &[',', '.', ':', '(', ')'];

/// A filter operand.
///
/// Scalars cover equality, ordering and pattern operators; `List` carries
/// the ordered sequence used by set-membership operators. Values are
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<Value>),
}

impl Value {
    /// Encode into the wire form used inside filter parameters
    pub fn encode(&self) -> String {
        match self {
            Self::String(s) => sanitize(s),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Null => "null".to_string(),
            Self::List(values) => values
                .iter()
                .map(Self::encode)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Encode as a match pattern, rewriting `%` wildcards to `*`
    ///
    /// Only meaningful for string values; other kinds fall back to the
    /// plain encoding (pattern operators reject them at construction).
    pub fn encode_pattern(&self) -> String {
        match self {
            Self::String(s) => sanitize(&s.replace('%', "*")),
            other => other.encode(),
        }
    }

    /// Human-readable kind name, used in operand validation errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::List(_) => "list",
        }
    }
}

/// Quote values containing PostgREST reserved characters
fn sanitize(value: &str) -> String {
    if value.contains(RESERVED_CHARS) {
        format!("%22{value}%22")
    } else {
        value.to_string()
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Option<bool>> for Value {
    fn from(v: Option<bool>) -> Self {
        match v {
            Some(b) => Self::Bool(b),
            None => Self::Null,
        }
    }
}
