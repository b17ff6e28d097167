//! Filter operators and their wire tokens
//!
//! Each operator has a canonical token used in query parameters and a
//! human-facing symbolic form. Negation is not a separate operator: it
//! composes as a `not.` prefix on the token at serialization time.

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// A PostgREST filter operator.
///
/// The full-text search family (`Fts`, `Plfts`, `Phfts`, `Wfts`) takes a
/// query string operand; the rest follow SQL comparison semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equals
    Eq,
    /// Not equal
    Neq,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Pattern match, case-sensitive
    Like,
    /// Pattern match, case-insensitive
    Ilike,
    /// Set membership
    In,
    /// Exact equality against true/false/null
    Is,
    /// Full-text search (`to_tsquery`)
    Fts,
    /// Full-text search (`plainto_tsquery`)
    Plfts,
    /// Full-text search (`phraseto_tsquery`)
    Phfts,
    /// Full-text search (`websearch_to_tsquery`)
    Wfts,
}

impl Operator {
    /// Canonical wire token expected by the server
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::In => "in",
            Self::Is => "is",
            Self::Fts => "fts",
            Self::Plfts => "plfts",
            Self::Phfts => "phfts",
            Self::Wfts => "wfts",
        }
    }

    /// Human-facing symbolic or method form
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::In => "in",
            Self::Is => "is",
            Self::Fts => "fts",
            Self::Plfts => "plfts",
            Self::Phfts => "phfts",
            Self::Wfts => "wfts",
        }
    }

    /// Whether the operand is a match pattern (`%` rewritten to `*`)
    pub(crate) const fn is_pattern(self) -> bool {
        matches!(self, Self::Like | Self::Ilike)
    }

    /// All operators, in wire-token order
    pub const ALL: [Self; 14] = [
        Self::Eq,
        Self::Neq,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Like,
        Self::Ilike,
        Self::In,
        Self::Is,
        Self::Fts,
        Self::Plfts,
        Self::Phfts,
        Self::Wfts,
    ];
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "neq" => Ok(Self::Neq),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "like" => Ok(Self::Like),
            "ilike" => Ok(Self::Ilike),
            "in" => Ok(Self::In),
            "is" => Ok(Self::Is),
            "fts" => Ok(Self::Fts),
            "plfts" => Ok(Self::Plfts),
            "phfts" => Ok(Self::Phfts),
            "wfts" => Ok(Self::Wfts),
            other => Err(FilterError::UnknownOperator(other.to_string())),
        }
    }
}
