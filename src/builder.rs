//! Request builders
//!
//! Mirrors the PostgREST calling conventions: a [`RequestBuilder`] picks
//! the verb (`select`/`insert`/`update`/`delete`), a [`FilterBuilder`]
//! accumulates filters and read shaping, and [`QueryBuilder::execute`]
//! sends the request.
//!
//! Chained filters are an explicit append-only list of serialized
//! `column=operator.value` parameters; the server ANDs repeated
//! parameters implicitly. Each chained call consumes and returns the
//! builder, so a partially built query cannot be aliased.

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_RANGE, HeaderMap, HeaderValue};
use serde_json::Value as Json;

use crate::client::{Auth, Client};
use crate::error::{Error, ErrorResponse};
use crate::filter::{Column, Condition, Expression, Operator, Value};

/// Row-count reporting method (`Prefer: count=<method>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMethod {
    Exact,
    Planned,
    Estimated,
}

impl CountMethod {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Planned => "planned",
            Self::Estimated => "estimated",
        }
    }
}

/// Rows returned by a query, plus the count when one was requested
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub data: Json,
    pub count: Option<u64>,
}

/// Entry point for operations on a table
#[derive(Debug)]
pub struct RequestBuilder {
    client: Client,
    url: String,
}

impl RequestBuilder {
    pub(crate) fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }

    /// SELECT query. Pass the column names to retrieve, or `*` for all
    /// columns; an empty slice issues a HEAD request (no rows, useful
    /// with [`FilterBuilder::count`]).
    pub fn select(self, columns: &[&str]) -> FilterBuilder {
        let mut query = Vec::new();
        let method = if columns.is_empty() {
            Method::HEAD
        } else {
            query.push(("select".to_string(), columns.join(",")));
            Method::GET
        };
        FilterBuilder::new(QueryBuilder {
            client: self.client,
            url: self.url,
            method,
            query,
            prefer: Vec::new(),
            body: None,
            count: None,
            range: None,
            accept: None,
        })
    }

    /// INSERT a single row
    pub fn insert(self, row: Json) -> QueryBuilder {
        self.write(Method::POST, row, false)
    }

    /// INSERT multiple rows at once
    pub fn insert_many(self, rows: Vec<Json>) -> QueryBuilder {
        self.write(Method::POST, Json::Array(rows), false)
    }

    /// INSERT with upsert resolution (`resolution=merge-duplicates`)
    pub fn upsert(self, row: Json) -> QueryBuilder {
        self.write(Method::POST, row, true)
    }

    /// UPDATE rows; combine with filters to select which
    pub fn update(self, data: Json) -> FilterBuilder {
        FilterBuilder::new(self.write(Method::PATCH, data, false))
    }

    /// DELETE rows; combine with filters to select which
    pub fn delete(self) -> FilterBuilder {
        let mut builder = self.write(Method::DELETE, Json::Null, false);
        builder.body = None;
        FilterBuilder::new(builder)
    }

    fn write(self, method: Method, body: Json, upsert: bool) -> QueryBuilder {
        let mut prefer = vec!["return=representation".to_string()];
        if upsert {
            prefer.push("resolution=merge-duplicates".to_string());
        }
        QueryBuilder {
            client: self.client,
            url: self.url,
            method,
            query: Vec::new(),
            prefer,
            body: Some(body),
            count: None,
            range: None,
            accept: None,
        }
    }
}

/// A fully specified request, ready to execute
#[derive(Debug)]
pub struct QueryBuilder {
    client: Client,
    url: String,
    method: Method,
    query: Vec<(String, String)>,
    prefer: Vec<String>,
    body: Option<Json>,
    count: Option<CountMethod>,
    range: Option<(u64, u64)>,
    accept: Option<&'static str>,
}

impl QueryBuilder {
    /// Request a row count alongside the response
    #[must_use]
    pub fn count(mut self, method: CountMethod) -> Self {
        self.count = Some(method);
        self
    }

    /// Send the request.
    ///
    /// Transport errors propagate from `reqwest` untouched. A non-2xx
    /// status with a PostgREST error document surfaces as [`Error::Api`].
    pub async fn execute(mut self) -> Result<ApiResponse, Error> {
        let count_requested = self.count.is_some();
        if let Some(count) = self.count {
            self.prefer.push(format!("count={}", count.as_str()));
        }

        let mut headers = HeaderMap::new();
        if !self.prefer.is_empty() {
            headers.insert("Prefer", header_value(&self.prefer.join(","))?);
        }
        if let Some(schema) = &self.client.schema {
            let value = header_value(schema)?;
            headers.insert("Accept-Profile", value.clone());
            headers.insert("Content-Profile", value);
        }
        if let Some((start, end)) = self.range {
            headers.insert("Range-Unit", HeaderValue::from_static("items"));
            headers.insert("Range", header_value(&format!("{start}-{end}"))?);
        }
        if let Some(accept) = self.accept {
            headers.insert(ACCEPT, HeaderValue::from_static(accept));
        }

        let mut request = self
            .client
            .http
            .request(self.method.clone(), &self.url)
            .headers(headers)
            .query(&self.query);
        match &self.client.auth {
            Some(Auth::Bearer(token)) => request = request.bearer_auth(token),
            Some(Auth::Basic { username, password }) => {
                request = request.basic_auth(username, Some(password));
            }
            None => {}
        }
        if let Some(body) = &self.body {
            request = request.json(body);
        }

        tracing::debug!(
            method = %self.method,
            url = %self.url,
            params = self.query.len(),
            "executing PostgREST request"
        );
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let response = response.json::<ErrorResponse>().await.unwrap_or_default();
            return Err(Error::Api { status, response });
        }

        let count = if count_requested {
            parse_content_range(response.headers())
        } else {
            None
        };
        let bytes = response.bytes().await?;
        let data = if bytes.is_empty() {
            Json::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(ApiResponse { data, count })
    }
}

/// Builder with the filter surface: structured expressions via
/// [`where_`](Self::where_), or chained single-condition filters that the
/// server ANDs implicitly.
#[derive(Debug)]
pub struct FilterBuilder {
    query: QueryBuilder,
    negate_next: bool,
}

impl FilterBuilder {
    pub(crate) fn new(query: QueryBuilder) -> Self {
        Self {
            query,
            negate_next: false,
        }
    }

    pub(crate) fn rpc(client: Client, url: String, params: Json) -> Self {
        Self::new(QueryBuilder {
            client,
            url,
            method: Method::POST,
            query: Vec::new(),
            prefer: Vec::new(),
            body: Some(params),
            count: None,
            range: None,
            accept: None,
        })
    }

    /// Apply a composed filter [`Expression`], equivalent to a SQL WHERE
    /// clause.
    ///
    /// A bare [`Condition`] is accepted as well and rendered without any
    /// `and`/`or` wrapper.
    pub fn where_(mut self, expr: impl Into<Expression>) -> Result<Self, Error> {
        let params = expr.into().to_query()?;
        self.query.query.extend(params);
        Ok(self)
    }

    /// Negate the next chained filter (`not.<operator>` on the wire)
    #[must_use]
    pub fn not_(mut self) -> Self {
        self.negate_next = true;
        self
    }

    /// Append a single chained filter.
    ///
    /// The operand is passed through without operator/operand validation;
    /// prefer the typed shorthands or [`Column`] constructors when the
    /// operand shape should be checked.
    #[must_use]
    pub fn filter(self, column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        self.push_condition(Condition::new(Column::new(column), operator, value.into()))
    }

    /// Operator: "equals to"
    #[must_use]
    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, Operator::Eq, value)
    }

    /// Operator: "not equal to"
    #[must_use]
    pub fn neq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, Operator::Neq, value)
    }

    /// Operator: "greater than"
    #[must_use]
    pub fn gt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, Operator::Gt, value)
    }

    /// Operator: "greater than or equal to"
    #[must_use]
    pub fn gte(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, Operator::Gte, value)
    }

    /// Operator: "less than"
    #[must_use]
    pub fn lt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, Operator::Lt, value)
    }

    /// Operator: "less than or equal to"
    #[must_use]
    pub fn lte(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, Operator::Lte, value)
    }

    /// Operator: "is", exact equality against true/false/null
    #[must_use]
    pub fn is_(self, column: impl Into<String>, value: Option<bool>) -> Self {
        self.filter(column, Operator::Is, Value::from(value))
    }

    /// Operator: "like", pattern match (`%` wildcards become `*`)
    #[must_use]
    pub fn like(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filter(column, Operator::Like, pattern.into())
    }

    /// Operator: "ilike", case-insensitive pattern match
    #[must_use]
    pub fn ilike(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filter(column, Operator::Ilike, pattern.into())
    }

    /// Operator: "in", membership in a non-empty sequence
    pub fn in_<I, V>(self, column: impl Into<String>, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let condition = Column::new(column).in_(values)?;
        Ok(self.push_condition(condition))
    }

    /// Full-text search using `to_tsquery`
    #[must_use]
    pub fn fts(self, column: impl Into<String>, query: impl Into<String>) -> Self {
        self.filter(column, Operator::Fts, query.into())
    }

    /// Full-text search using `plainto_tsquery`
    #[must_use]
    pub fn plfts(self, column: impl Into<String>, query: impl Into<String>) -> Self {
        self.filter(column, Operator::Plfts, query.into())
    }

    /// Full-text search using `phraseto_tsquery`
    #[must_use]
    pub fn phfts(self, column: impl Into<String>, query: impl Into<String>) -> Self {
        self.filter(column, Operator::Phfts, query.into())
    }

    /// Full-text search using `websearch_to_tsquery`
    #[must_use]
    pub fn wfts(self, column: impl Into<String>, query: impl Into<String>) -> Self {
        self.filter(column, Operator::Wfts, query.into())
    }

    /// Sort the response, equivalent to SQL ORDER BY
    #[must_use]
    pub fn order(mut self, column: &str, desc: bool, nulls_first: bool) -> Self {
        let mut value = column.to_string();
        if desc {
            value.push_str(".desc");
        }
        if nulls_first {
            value.push_str(".nullsfirst");
        }
        self.query.query.push(("order".to_string(), value));
        self
    }

    /// Limit the number of rows returned, starting at `start` (OFFSET)
    #[must_use]
    pub fn limit(mut self, size: u64, start: u64) -> Self {
        self.query.range = Some((start, start + size.saturating_sub(1)));
        self
    }

    /// Retrieve only rows in the half-open range `[start, end)`
    #[must_use]
    pub fn range_rows(mut self, start: u64, end: u64) -> Self {
        self.query.range = Some((start, end.saturating_sub(1)));
        self
    }

    /// Return exactly one row; the server rejects queries matching more
    #[must_use]
    pub fn single(mut self) -> Self {
        self.query.accept = Some("application/vnd.pgrst.object+json");
        self
    }

    /// Request a row count alongside the response
    #[must_use]
    pub fn count(mut self, method: CountMethod) -> Self {
        self.query = self.query.count(method);
        self
    }

    /// Send the request
    pub async fn execute(self) -> Result<ApiResponse, Error> {
        self.query.execute().await
    }

    fn push_condition(mut self, condition: Condition) -> Self {
        let condition = if self.negate_next {
            self.negate_next = false;
            condition.negate()
        } else {
            condition
        };
        let (key, value) = condition.to_param();
        self.query.query.push((key, value));
        self
    }
}

fn header_value(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|e| Error::Config(format!("invalid header value: {e}")))
}

fn parse_content_range(headers: &HeaderMap) -> Option<u64> {
    let raw = headers.get(CONTENT_RANGE)?.to_str().ok()?;
    raw.split('/').nth(1)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new("http://localhost:3000").unwrap()
    }

    #[test]
    fn select_builds_get_with_select_param() {
        let builder = client().from_("countries").select(&["name", "capital"]);
        assert_eq!(builder.query.method, Method::GET);
        assert_eq!(
            builder.query.query,
            vec![("select".to_string(), "name,capital".to_string())]
        );
    }

    #[test]
    fn select_without_columns_is_head() {
        let builder = client().from_("countries").select(&[]);
        assert_eq!(builder.query.method, Method::HEAD);
        assert!(builder.query.query.is_empty());
    }

    #[test]
    fn chained_filters_accumulate_in_order() {
        let builder = client()
            .from_("countries")
            .select(&["name"])
            .eq("name", "India")
            .like("capital", "%el%");

        assert_eq!(
            builder.query.query,
            vec![
                ("select".to_string(), "name".to_string()),
                ("name".to_string(), "eq.India".to_string()),
                ("capital".to_string(), "like.*el*".to_string()),
            ]
        );
    }

    #[test]
    fn not_negates_only_the_next_filter() {
        let builder = client()
            .from_("countries")
            .select(&["name"])
            .not_()
            .eq("continent", "Asia")
            .eq("name", "India");

        assert_eq!(
            builder.query.query[1],
            ("continent".to_string(), "not.eq.Asia".to_string())
        );
        assert_eq!(
            builder.query.query[2],
            ("name".to_string(), "eq.India".to_string())
        );
    }

    #[test]
    fn where_appends_expression_params() {
        let expr = Column::new("capital").eq("Rome") | Column::new("capital").eq("Berlin");
        let builder = client()
            .from_("countries")
            .select(&["name"])
            .where_(expr)
            .unwrap();

        assert_eq!(
            builder.query.query[1],
            (
                "or".to_string(),
                "(capital.eq.Rome,capital.eq.Berlin)".to_string()
            )
        );
    }

    #[test]
    fn chained_in_rejects_empty_sequence() {
        let values: Vec<i64> = vec![];
        let result = client()
            .from_("countries")
            .select(&["name"])
            .in_("id", values);
        assert!(result.is_err());
    }

    #[test]
    fn insert_sets_representation_prefer_header() {
        let builder = client()
            .from_("countries")
            .insert(serde_json::json!({"name": "India"}));
        assert_eq!(builder.method, Method::POST);
        assert_eq!(builder.prefer, vec!["return=representation".to_string()]);
    }

    #[test]
    fn upsert_adds_merge_duplicates() {
        let builder = client()
            .from_("countries")
            .upsert(serde_json::json!({"name": "India"}));
        assert_eq!(
            builder.prefer,
            vec![
                "return=representation".to_string(),
                "resolution=merge-duplicates".to_string(),
            ]
        );
    }

    #[test]
    fn delete_has_no_body() {
        let builder = client().from_("countries").delete().eq("name", "India");
        assert_eq!(builder.query.method, Method::DELETE);
        assert!(builder.query.body.is_none());
    }

    #[test]
    fn order_and_limit_shape_the_read() {
        let builder = client()
            .from_("countries")
            .select(&["name"])
            .order("population", true, false)
            .limit(10, 20);

        assert_eq!(
            builder.query.query[1],
            ("order".to_string(), "population.desc".to_string())
        );
        assert_eq!(builder.query.range, Some((20, 29)));
    }

    #[test]
    fn rpc_posts_params_as_body() {
        let builder = client().rpc("add_them", serde_json::json!({"a": 1, "b": 2}));
        assert_eq!(builder.query.method, Method::POST);
        assert_eq!(
            builder.query.body,
            Some(serde_json::json!({"a": 1, "b": 2}))
        );
    }

    #[test]
    fn content_range_total_is_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_RANGE, HeaderValue::from_static("0-24/3573"));
        assert_eq!(parse_content_range(&headers), Some(3573));

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_RANGE, HeaderValue::from_static("*/*"));
        assert_eq!(parse_content_range(&headers), None);
    }
}
