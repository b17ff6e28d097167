//! Columns and condition constructors
//!
//! A [`Column`] names a target field; its methods pair it with an operator
//! and operand to produce an immutable [`Condition`]. Operand validation
//! happens here, at construction time, so incompatible operands fail
//! before any network call.

use crate::error::FilterError;
use crate::filter::expr::Condition;
use crate::filter::operator::Operator;
use crate::filter::value::Value;

/// A column to filter by.
///
/// Dotted paths address embedded resources, e.g. `Column::new("city.name")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    pub(crate) name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Column name as given at construction
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operator: "equals to"
    pub fn eq(&self, value: impl Into<Value>) -> Condition {
        Condition::new(self.clone(), Operator::Eq, value.into())
    }

    /// Operator: "not equal to"
    pub fn neq(&self, value: impl Into<Value>) -> Condition {
        Condition::new(self.clone(), Operator::Neq, value.into())
    }

    /// Operator: "greater than"
    pub fn gt(&self, value: impl Into<Value>) -> Condition {
        Condition::new(self.clone(), Operator::Gt, value.into())
    }

    /// Operator: "greater than or equal to"
    pub fn gte(&self, value: impl Into<Value>) -> Condition {
        Condition::new(self.clone(), Operator::Gte, value.into())
    }

    /// Operator: "less than"
    pub fn lt(&self, value: impl Into<Value>) -> Condition {
        Condition::new(self.clone(), Operator::Lt, value.into())
    }

    /// Operator: "less than or equal to"
    pub fn lte(&self, value: impl Into<Value>) -> Condition {
        Condition::new(self.clone(), Operator::Lte, value.into())
    }

    /// Operator: "is", exact equality against true/false/null
    pub fn is_(&self, value: Option<bool>) -> Condition {
        Condition::new(self.clone(), Operator::Is, Value::from(value))
    }

    /// Operator: "like", case-sensitive pattern match.
    ///
    /// `%` wildcards are rewritten to the server's `*` form when
    /// serialized. Only string operands are accepted.
    pub fn like(&self, pattern: impl Into<Value>) -> Result<Condition, FilterError> {
        self.pattern_condition(Operator::Like, pattern.into())
    }

    /// Operator: "ilike", case-insensitive pattern match
    pub fn ilike(&self, pattern: impl Into<Value>) -> Result<Condition, FilterError> {
        self.pattern_condition(Operator::Ilike, pattern.into())
    }

    /// Operator: "in", membership in a non-empty sequence of values.
    ///
    /// An empty sequence is rejected: an always-false filter must be
    /// expressed explicitly, not implied.
    pub fn in_<I, V>(&self, values: I) -> Result<Condition, FilterError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(FilterError::InvalidOperand {
                operator: Operator::In.token(),
                expected: "a non-empty sequence of values",
                found: "empty sequence".to_string(),
            });
        }
        if let Some(nested) = values.iter().find(|v| matches!(v, Value::List(_))) {
            return Err(FilterError::InvalidOperand {
                operator: Operator::In.token(),
                expected: "a sequence of scalar values",
                found: nested.kind().to_string(),
            });
        }
        Ok(Condition::new(
            self.clone(),
            Operator::In,
            Value::List(values),
        ))
    }

    /// Full-text search using `to_tsquery`
    pub fn fts(&self, query: impl Into<Value>) -> Result<Condition, FilterError> {
        self.text_query_condition(Operator::Fts, query.into())
    }

    /// Full-text search using `plainto_tsquery`
    pub fn plfts(&self, query: impl Into<Value>) -> Result<Condition, FilterError> {
        self.text_query_condition(Operator::Plfts, query.into())
    }

    /// Full-text search using `phraseto_tsquery`
    pub fn phfts(&self, query: impl Into<Value>) -> Result<Condition, FilterError> {
        self.text_query_condition(Operator::Phfts, query.into())
    }

    /// Full-text search using `websearch_to_tsquery`
    pub fn wfts(&self, query: impl Into<Value>) -> Result<Condition, FilterError> {
        self.text_query_condition(Operator::Wfts, query.into())
    }

    fn pattern_condition(
        &self,
        operator: Operator,
        value: Value,
    ) -> Result<Condition, FilterError> {
        match value {
            Value::String(_) => Ok(Condition::new(self.clone(), operator, value)),
            other => Err(FilterError::InvalidOperand {
                operator: operator.token(),
                expected: "a string pattern",
                found: other.kind().to_string(),
            }),
        }
    }

    fn text_query_condition(
        &self,
        operator: Operator,
        value: Value,
    ) -> Result<Condition, FilterError> {
        match value {
            Value::String(_) => Ok(Condition::new(self.clone(), operator, value)),
            other => Err(FilterError::InvalidOperand {
                operator: operator.token(),
                expected: "a query string",
                found: other.kind().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_operators_accept_any_scalar() {
        let col = Column::new("population");
        assert_eq!(col.eq(5).operator, Operator::Eq);
        assert_eq!(col.neq("x").operator, Operator::Neq);
        assert_eq!(col.gt(1.5).operator, Operator::Gt);
        assert_eq!(col.gte(0).operator, Operator::Gte);
        assert_eq!(col.lt(10).operator, Operator::Lt);
        assert_eq!(col.lte(true).operator, Operator::Lte);
    }

    #[test]
    fn is_maps_none_to_null() {
        let c = Column::new("deleted_at").is_(None);
        assert_eq!(c.value, Value::Null);
        let c = Column::new("active").is_(Some(false));
        assert_eq!(c.value, Value::Bool(false));
    }

    #[test]
    fn like_rejects_non_string_operands() {
        let err = Column::new("name").like(42).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidOperand { operator: "like", .. }
        ));

        let err = Column::new("name").ilike(Value::Null).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidOperand { operator: "ilike", .. }
        ));
    }

    #[test]
    fn in_rejects_empty_sequence() {
        let values: Vec<i64> = vec![];
        let err = Column::new("id").in_(values).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidOperand { operator: "in", .. }
        ));
    }

    #[test]
    fn in_keeps_operand_order() {
        let c = Column::new("id").in_([3, 1, 2]).unwrap();
        assert_eq!(
            c.value,
            Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn fts_rejects_non_string_operands() {
        let err = Column::new("body").fts(7).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidOperand { operator: "fts", .. }
        ));
    }

    #[test]
    fn dotted_paths_pass_through() {
        let c = Column::new("city.name").eq("Oslo");
        assert_eq!(c.column.name(), "city.name");
    }
}
