// src/modules/remote_table/adapter/outgoing/postgrest_client.rs

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::modules::remote_table::application::ports::outgoing::{
    Filter, RemoteTableClient, Row, SelectQuery, SelectResult, TableError, TableName,
};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Public (anon) API key
    pub api_key: String,
    pub request_timeout: Duration,
}

// ============================================================================
// Client Implementation
// ============================================================================

#[derive(Clone)]
pub struct PostgrestTableClient {
    http: Client,
    rest_url: Url,
    api_key: String,
    bearer: String,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for PostgrestTableClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestTableClient")
            .field("rest_url", &self.rest_url.as_str())
            .finish()
    }
}

impl PostgrestTableClient {
    pub fn new(config: PostgrestConfig) -> Result<Self, TableError> {
        let rest_url = rest_endpoint(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("portfolio-content/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TableError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            rest_url,
            bearer: config.api_key.clone(),
            api_key: config.api_key,
        })
    }

    fn table_url(&self, table: TableName) -> Result<Url, TableError> {
        self.rest_url
            .join(table.as_str())
            .map_err(|e| TableError::Transport(format!("invalid table url: {}", e)))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer))
            .header(ACCEPT, "application/json")
    }

    fn row_url(&self, table: TableName, id: Uuid) -> Result<Url, TableError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));
        Ok(url)
    }
}

#[async_trait]
impl RemoteTableClient for PostgrestTableClient {
    async fn select(
        &self,
        table: TableName,
        query: SelectQuery,
    ) -> Result<SelectResult, TableError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().extend_pairs(encode_query(&query));

        let mut request = self.request(Method::GET, url);
        if query.exact_count {
            request = request.header("Prefer", "count=exact");
        }

        debug!("select from {}", table);
        let res = request.send().await.map_err(map_reqwest_error)?;

        // PostgREST answers an offset past the last row with 416 (PGRST103).
        if res.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            debug!("select from {} starts past the last row", table);
            return Ok(past_the_end(content_range(&res), query.exact_count));
        }

        let res = ensure_success(res).await?;
        let count = if query.exact_count {
            content_range(&res).and_then(parse_content_range_total)
        } else {
            None
        };

        let rows = res
            .json::<Vec<Row>>()
            .await
            .map_err(|e| TableError::Decode(e.to_string()))?;

        Ok(SelectResult { rows, count })
    }

    async fn insert(&self, table: TableName, row: Row) -> Result<(), TableError> {
        let url = self.table_url(table)?;

        debug!("insert into {}", table);
        let res = self
            .request(Method::POST, url)
            .header("Prefer", "return=minimal")
            .json(&vec![row])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        ensure_success(res).await.map(|_| ())
    }

    async fn update(&self, table: TableName, row: Row, id: Uuid) -> Result<(), TableError> {
        let url = self.row_url(table, id)?;

        debug!("update {} row {}", table, id);
        let res = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        ensure_success(res).await.map(|_| ())
    }

    async fn delete(&self, table: TableName, id: Uuid) -> Result<(), TableError> {
        let url = self.row_url(table, id)?;

        debug!("delete {} row {}", table, id);
        let res = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        ensure_success(res).await.map(|_| ())
    }

    fn as_user(&self, access_token: &str) -> Arc<dyn RemoteTableClient> {
        let mut scoped = self.clone();
        scoped.bearer = access_token.to_string();
        Arc::new(scoped)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
}

fn rest_endpoint(base_url: &str) -> Result<Url, TableError> {
    let base = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{}/rest/v1/", base))
        .map_err(|e| TableError::Transport(format!("invalid base url `{}`: {}", base_url, e)))
}

async fn ensure_success(res: Response) -> Result<Response, TableError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                body
            }
        });

    warn!("Remote table rejected request ({}): {}", status, message);
    Err(TableError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn content_range(res: &Response) -> Option<&str> {
    res.headers()
        .get("content-range")
        .and_then(|v| v.to_str().ok())
}

/// Empty page for a window that starts past the last row. The total still
/// comes from `Content-Range` (`*/13`) when a count was asked for.
fn past_the_end(content_range: Option<&str>, exact_count: bool) -> SelectResult {
    SelectResult {
        rows: Vec::new(),
        count: content_range
            .filter(|_| exact_count)
            .and_then(parse_content_range_total),
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TableError {
    if e.is_timeout() {
        TableError::Transport("request timed out".to_string())
    } else {
        TableError::Transport(e.to_string())
    }
}

/// Characters PostgREST treats as syntax inside logic trees and array literals.
const RESERVED: &[char] = &[',', '.', ':', '(', ')', '"', '\\', '{', '}'];

fn quote(value: &str) -> String {
    if value
        .chars()
        .any(|c| RESERVED.contains(&c) || c.is_whitespace())
    {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Escapes LIKE metacharacters so the term matches literally. PostgREST turns
/// every `*` into `%` and has no escape for it, so a literal `*` degrades to a
/// single-character `_`.
fn like_literal(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            '*' => out.push('_'),
            _ => out.push(c),
        }
    }
    out
}

/// Query-string pairs for a select, in PostgREST syntax.
pub fn encode_query(query: &SelectQuery) -> Vec<(String, String)> {
    let mut pairs = vec![("select".to_string(), query.columns.clone())];

    for filter in &query.filters {
        match filter {
            Filter::Eq { column, value } => {
                pairs.push((column.clone(), format!("eq.{}", value)));
            }
            Filter::AnyILike { columns, term } => {
                let pattern = quote(&format!("*{}*", like_literal(term)));
                let alternatives: Vec<String> = columns
                    .iter()
                    .map(|c| format!("{}.ilike.{}", c, pattern))
                    .collect();
                pairs.push(("or".to_string(), format!("({})", alternatives.join(","))));
            }
            Filter::Contains { column, values } => {
                let items: Vec<String> = values.iter().map(|v| quote(v)).collect();
                pairs.push((column.clone(), format!("cs.{{{}}}", items.join(","))));
            }
        }
    }

    if !query.order.is_empty() {
        let order: Vec<String> = query
            .order
            .iter()
            .map(|o| {
                format!(
                    "{}.{}",
                    o.column,
                    if o.ascending { "asc" } else { "desc" }
                )
            })
            .collect();
        pairs.push(("order".to_string(), order.join(",")));
    }

    if let Some(range) = query.range {
        pairs.push(("offset".to_string(), range.from.to_string()));
        pairs.push(("limit".to_string(), range.len().to_string()));
    } else if let Some(limit) = query.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }

    pairs
}

/// Total from a `Content-Range` header: `0-5/13` and `*/0` carry one, `0-5/*` does not.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}

// ============================================================================
// Tests
// ============================================================================
