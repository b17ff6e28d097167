//! # postgrest-client
//!
//! Composable filter expressions and a thin async client for
//! [PostgREST](https://postgrest.org) APIs.
//!
//! Filters are built from [`Column`] comparisons and combined with `&`
//! and `|`; `&` binds tighter than `|`, so `a & b | c` groups as
//! `(a AND b) OR c` without explicit parentheses. The finished
//! [`Expression`] serializes into PostgREST's query-parameter grammar and
//! is applied with [`FilterBuilder::where_`]. For flat conditions, the
//! chained shorthands (`eq`, `like`, `in_`, ...) append one implicitly
//! ANDed parameter each.
//!
//! ```no_run
//! use postgrest_client::{Client, Column};
//!
//! # async fn run() -> Result<(), postgrest_client::Error> {
//! let client = Client::new("https://example.org/api")?;
//!
//! let asian_giants_or_stans = Column::new("continent").eq("Asia")
//!     & Column::new("population").gte(5_000_000)
//!     | Column::new("name").ilike("%stan")?;
//!
//! let resp = client
//!     .from_("countries")
//!     .select(&["name", "capital"])
//!     .where_(asian_giants_or_stans)?
//!     .execute()
//!     .await?;
//! # let _ = resp;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod error;
pub mod filter;

pub use builder::{ApiResponse, CountMethod, FilterBuilder, QueryBuilder, RequestBuilder};
pub use client::Client;
pub use error::{Error, ErrorResponse, FilterError};
pub use filter::{Column, Condition, Expression, Operator, Value};
