//! Filter expression tree
//!
//! A `Condition` is a single column comparison; an `Expression` combines
//! conditions with logical AND/OR. Trees are immutable: combinators return
//! new values, so sub-expressions can be reused across queries and
//! traversed concurrently without synchronization.
//!
//! `&` and `|` build expressions with Rust's native operator precedence,
//! where `&` binds tighter than `|`. `a & b | c` therefore groups as
//! `(a AND b) OR c` without explicit parentheses, matching conventional
//! boolean-algebra precedence.

use std::ops::{BitAnd, BitOr};

use crate::filter::column::Column;
use crate::filter::operator::Operator;
use crate::filter::value::Value;

/// A single column comparison: column, operator, operand.
///
/// Constructed through the methods on [`Column`]; immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub(crate) column: Column,
    pub(crate) operator: Operator,
    pub(crate) negated: bool,
    pub(crate) value: Value,
}

impl Condition {
    pub(crate) fn new(column: Column, operator: Operator, value: Value) -> Self {
        Self {
            column,
            operator,
            negated: false,
            value,
        }
    }

    /// Negate this comparison (`not.<operator>` on the wire)
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Combine with another condition or expression using logical AND
    #[must_use]
    pub fn and_(self, other: impl Into<Expression>) -> Expression {
        Expression::from(self).and_(other)
    }

    /// Combine with another condition or expression using logical OR
    #[must_use]
    pub fn or_(self, other: impl Into<Expression>) -> Expression {
        Expression::from(self).or_(other)
    }
}

/// A tree of conditions combined with logical AND/OR.
///
/// `And`/`Or` nodes built through [`and_`](Expression::and_) and
/// [`or_`](Expression::or_) always hold at least two children; a
/// degenerate singleton or empty group is never materialized by the
/// combinators.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Leaf(Condition),
    And(Vec<Expression>),
    Or(Vec<Expression>),
}

impl Expression {
    /// Combine with logical AND.
    ///
    /// When either side is already an `And`, its children are appended
    /// into a single flat `And` list rather than nesting `And(And(..))`,
    /// matching the server's flat n-ary `and(...)` grammar. An `Or` on
    /// either side nests as a child, it does not flatten.
    #[must_use]
    pub fn and_(self, other: impl Into<Expression>) -> Self {
        match (self, other.into()) {
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), right) => {
                left.push(right);
                Self::And(left)
            }
            (left, Self::And(mut right)) => {
                right.insert(0, left);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// Combine with logical OR. Same flattening rule as [`and_`](Self::and_).
    #[must_use]
    pub fn or_(self, other: impl Into<Expression>) -> Self {
        match (self, other.into()) {
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), right) => {
                left.push(right);
                Self::Or(left)
            }
            (left, Self::Or(mut right)) => {
                right.insert(0, left);
                Self::Or(right)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }
}

impl From<Condition> for Expression {
    fn from(condition: Condition) -> Self {
        Self::Leaf(condition)
    }
}

impl<R: Into<Expression>> BitAnd<R> for Expression {
    type Output = Expression;

    fn bitand(self, rhs: R) -> Self::Output {
        self.and_(rhs)
    }
}

impl<R: Into<Expression>> BitOr<R> for Expression {
    type Output = Expression;

    fn bitor(self, rhs: R) -> Self::Output {
        self.or_(rhs)
    }
}

impl<R: Into<Expression>> BitAnd<R> for Condition {
    type Output = Expression;

    fn bitand(self, rhs: R) -> Self::Output {
        Expression::from(self).and_(rhs)
    }
}

impl<R: Into<Expression>> BitOr<R> for Condition {
    type Output = Expression;

    fn bitor(self, rhs: R) -> Self::Output {
        Expression::from(self).or_(rhs)
    }
}
