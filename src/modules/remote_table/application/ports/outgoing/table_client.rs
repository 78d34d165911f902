// src/modules/remote_table/application/ports/outgoing/table_client.rs

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// One row as the backend returns it: column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

//
// ──────────────────────────────────────────────────────────
// Tables
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Projects,
    Experiences,
    Education,
    Certifications,
    Skills,
    PersonalInfo,
    ContactMessages,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Projects => "projects",
            TableName::Experiences => "experiences",
            TableName::Education => "education",
            TableName::Certifications => "certifications",
            TableName::Skills => "skills",
            TableName::PersonalInfo => "personal_info",
            TableName::ContactMessages => "contact_messages",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ──────────────────────────────────────────────────────────
// Query DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// Case-insensitive substring match against any of the columns (OR-combined).
    AnyILike { columns: Vec<String>, term: String },
    /// Array column must contain every value.
    Contains { column: String, values: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

/// Inclusive row range, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

impl RowRange {
    pub fn len(&self) -> u64 {
        self.to.saturating_add(1).saturating_sub(self.from)
    }

    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
    pub range: Option<RowRange>,
    pub limit: Option<u64>,
    pub exact_count: bool,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::all()
    }
}

impl SelectQuery {
    /// `select *` with no filters.
    pub fn all() -> Self {
        Self {
            columns: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            range: None,
            limit: None,
            exact_count: false,
        }
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn any_ilike(mut self, columns: &[&str], term: impl Into<String>) -> Self {
        self.filters.push(Filter::AnyILike {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            term: term.into(),
        });
        self
    }

    pub fn contains(mut self, column: &str, values: Vec<String>) -> Self {
        self.filters.push(Filter::Contains {
            column: column.to_string(),
            values,
        });
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order.push(OrderBy {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some(RowRange { from, to });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_exact_count(mut self) -> Self {
        self.exact_count = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectResult {
    pub rows: Vec<Row>,
    /// Present only when the query asked for an exact count.
    pub count: Option<u64>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

//
// ──────────────────────────────────────────────────────────
// Port
// ──────────────────────────────────────────────────────────
//

/// Row-level read/write access to the hosted table store. Authorization is
/// enforced by the backend; every call is a single independent round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteTableClient: Send + Sync {
    async fn select(&self, table: TableName, query: SelectQuery)
        -> Result<SelectResult, TableError>;

    async fn insert(&self, table: TableName, row: Row) -> Result<(), TableError>;

    async fn update(&self, table: TableName, row: Row, id: Uuid) -> Result<(), TableError>;

    async fn delete(&self, table: TableName, id: Uuid) -> Result<(), TableError>;

    /// Same client, acting on behalf of an end-user session.
    fn as_user(&self, access_token: &str) -> Arc<dyn RemoteTableClient>;
}
