//! Expression serialization into the query-parameter grammar
//!
//! A single recursive descent over the tree. The standalone leaf form is
//! `column=operator.value`; inside a group the dotted form
//! `column.operator.value` is used, and nested groups render as
//! `and(...)`/`or(...)`. A top-level AND over leaves on distinct columns
//! renders as one parameter per condition, since the server treats
//! repeated parameters as an implicit AND.

use std::collections::HashSet;

use crate::error::FilterError;
use crate::filter::expr::{Condition, Expression};
use crate::filter::operator::Operator;

impl Condition {
    /// Standalone form: `(column, "operator.value")`.
    ///
    /// This is the leaf primitive shared by the expression serializer and
    /// the chained filter mode.
    pub fn to_param(&self) -> (String, String) {
        (
            self.column.name.clone(),
            format!("{}.{}", self.wire_operator(), self.encoded_value()),
        )
    }

    /// Dotted form used inside `and(...)`/`or(...)` groups:
    /// `column.operator.value`
    pub fn to_group_entry(&self) -> String {
        format!(
            "{}.{}.{}",
            self.column.name,
            self.wire_operator(),
            self.encoded_value()
        )
    }

    fn wire_operator(&self) -> String {
        if self.negated {
            format!("not.{}", self.operator.token())
        } else {
            self.operator.token().to_string()
        }
    }

    fn encoded_value(&self) -> String {
        if self.operator.is_pattern() {
            self.value.encode_pattern()
        } else if self.operator == Operator::In {
            format!("({})", self.value.encode())
        } else {
            self.value.encode()
        }
    }
}

impl Expression {
    /// Serialize into query parameters.
    ///
    /// Serialization is a pure function: the same tree always yields
    /// byte-identical output. Fails only when a hand-constructed tree
    /// breaks the no-empty-group invariant.
    pub fn to_query(&self) -> Result<Vec<(String, String)>, FilterError> {
        match self {
            Self::Leaf(condition) => Ok(vec![condition.to_param()]),
            Self::And(children) => {
                ensure_non_empty(children, "empty `and` group")?;
                if let Some(conditions) = distinct_leaf_columns(children) {
                    return Ok(conditions.iter().map(|c| c.to_param()).collect());
                }
                Ok(vec![(
                    "and".to_string(),
                    format!("({})", group_entries(children)?),
                )])
            }
            Self::Or(children) => {
                ensure_non_empty(children, "empty `or` group")?;
                Ok(vec![(
                    "or".to_string(),
                    format!("({})", group_entries(children)?),
                )])
            }
        }
    }

    fn group_entry(&self) -> Result<String, FilterError> {
        match self {
            Self::Leaf(condition) => Ok(condition.to_group_entry()),
            Self::And(children) => {
                ensure_non_empty(children, "empty `and` group")?;
                Ok(format!("and({})", group_entries(children)?))
            }
            Self::Or(children) => {
                ensure_non_empty(children, "empty `or` group")?;
                Ok(format!("or({})", group_entries(children)?))
            }
        }
    }
}

fn group_entries(children: &[Expression]) -> Result<String, FilterError> {
    let entries: Vec<String> = children
        .iter()
        .map(Expression::group_entry)
        .collect::<Result<_, _>>()?;
    Ok(entries.join(","))
}

fn ensure_non_empty(children: &[Expression], reason: &'static str) -> Result<(), FilterError> {
    if children.is_empty() {
        return Err(FilterError::UnserializableExpression { reason });
    }
    Ok(())
}

/// The compact repeated-parameter path: taken only when every child is a
/// leaf and all leaf columns are distinct.
fn distinct_leaf_columns(children: &[Expression]) -> Option<Vec<&Condition>> {
    let mut seen = HashSet::new();
    let mut conditions = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Expression::Leaf(condition) if seen.insert(condition.column.name.as_str()) => {
                conditions.push(condition);
            }
            _ => return None,
        }
    }
    Some(conditions)
}
