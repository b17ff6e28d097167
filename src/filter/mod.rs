//! Filter-expression core
//!
//! The purely functional heart of the crate: columns and operators build
//! immutable [`Condition`]s, conditions combine into [`Expression`] trees
//! with `&`/`|` (or the named `and_`/`or_` combinators), and a finished
//! tree serializes into PostgREST query parameters. No I/O happens here;
//! everything is safe to build and share across tasks without locks.

mod column;
mod expr;
mod operator;
mod serialize;
mod value;

pub use column::Column;
pub use expr::{Condition, Expression};
pub use operator::Operator;
pub use value::Value;
