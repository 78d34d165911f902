use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::modules::remote_table::application::ports::outgoing::{
    Filter, RemoteTableClient, Row, SelectQuery, SelectResult, TableError, TableName,
};

/// What a call did, and under which session token.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOp {
    Select(SelectQuery),
    Insert(Row),
    Update(Uuid, Row),
    Delete(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub table: TableName,
    pub op: TableOp,
    pub access_token: Option<String>,
}

#[derive(Default)]
struct Store {
    tables: HashMap<TableName, Vec<Row>>,
    failures: HashMap<TableName, TableError>,
    select_delays: VecDeque<Duration>,
    calls: Vec<RecordedCall>,
}

/// Table store that evaluates filters, ordering, ranges and counts in memory.
/// Clones share the same store.
#[derive(Clone, Default)]
pub struct InMemoryTableClient {
    store: Arc<Mutex<Store>>,
    access_token: Option<String>,
}

impl InMemoryTableClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(&self) -> Arc<dyn RemoteTableClient> {
        Arc::new(self.clone())
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn seed(&self, table: TableName, rows: Vec<Value>) {
        let rows = rows.into_iter().map(into_row).collect();
        self.store().tables.insert(table, rows);
    }

    pub fn push_row(&self, table: TableName, row: Value) {
        self.store()
            .tables
            .entry(table)
            .or_default()
            .push(into_row(row));
    }

    pub fn rows(&self, table: TableName) -> Vec<Row> {
        self.store().tables.get(&table).cloned().unwrap_or_default()
    }

    /// Every call against `table` fails with `error` until `recover`.
    pub fn fail(&self, table: TableName, error: TableError) {
        self.store().failures.insert(table, error);
    }

    pub fn recover(&self, table: TableName) {
        self.store().failures.remove(&table);
    }

    /// Upcoming selects sleep for these durations, in order, after reading rows.
    pub fn delay_next_selects(&self, delays: Vec<Duration>) {
        self.store().select_delays.extend(delays);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.store().calls.clone()
    }

    pub fn calls_for(&self, table: TableName) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.table == table)
            .collect()
    }

    pub fn select_count(&self, table: TableName) -> usize {
        self.calls_for(table)
            .iter()
            .filter(|call| matches!(call.op, TableOp::Select(_)))
            .count()
    }

    pub fn write_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| !matches!(call.op, TableOp::Select(_)))
            .count()
    }

    pub fn last_select(&self, table: TableName) -> Option<SelectQuery> {
        self.calls_for(table)
            .into_iter()
            .rev()
            .find_map(|call| match call.op {
                TableOp::Select(query) => Some(query),
                _ => None,
            })
    }

    fn record(&self, table: TableName, op: TableOp) -> Result<(), TableError> {
        let mut store = self.store();
        store.calls.push(RecordedCall {
            table,
            op,
            access_token: self.access_token.clone(),
        });
        match store.failures.get(&table) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteTableClient for InMemoryTableClient {
    async fn select(
        &self,
        table: TableName,
        query: SelectQuery,
    ) -> Result<SelectResult, TableError> {
        self.record(table, TableOp::Select(query.clone()))?;

        let (result, delay) = {
            let mut store = self.store();
            let rows = store.tables.get(&table).cloned().unwrap_or_default();
            (evaluate(rows, &query), store.select_delays.pop_front())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(result)
    }

    async fn insert(&self, table: TableName, mut row: Row) -> Result<(), TableError> {
        self.record(table, TableOp::Insert(row.clone()))?;

        let now = Value::String(Utc::now().to_rfc3339());
        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        row.entry("created_at").or_insert_with(|| now.clone());
        row.entry("updated_at").or_insert(now);
        self.store().tables.entry(table).or_default().push(row);
        Ok(())
    }

    async fn update(&self, table: TableName, row: Row, id: Uuid) -> Result<(), TableError> {
        self.record(table, TableOp::Update(id, row.clone()))?;

        let mut store = self.store();
        let target = id.to_string();
        if let Some(existing) = store
            .tables
            .entry(table)
            .or_default()
            .iter_mut()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(target.as_str()))
        {
            existing.extend(row);
        }
        Ok(())
    }

    async fn delete(&self, table: TableName, id: Uuid) -> Result<(), TableError> {
        self.record(table, TableOp::Delete(id))?;

        let target = id.to_string();
        self.store()
            .tables
            .entry(table)
            .or_default()
            .retain(|r| r.get("id").and_then(Value::as_str) != Some(target.as_str()));
        Ok(())
    }

    fn as_user(&self, access_token: &str) -> Arc<dyn RemoteTableClient> {
        Arc::new(Self {
            store: Arc::clone(&self.store),
            access_token: Some(access_token.to_string()),
        })
    }
}

fn into_row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture rows must be JSON objects, got {other}"),
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches(row: &Row, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { column, value } => text(row.get(column)).as_deref() == Some(value.as_str()),
        Filter::AnyILike { columns, term } => {
            let term = term.to_lowercase();
            columns.iter().any(|column| {
                text(row.get(column))
                    .map(|v| v.to_lowercase().contains(&term))
                    .unwrap_or(false)
            })
        }
        Filter::Contains { column, values } => match row.get(column) {
            Some(Value::Array(items)) => values
                .iter()
                .all(|wanted| items.iter().any(|item| item.as_str() == Some(wanted))),
            _ => false,
        },
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (x, y) => text(x).cmp(&text(y)),
    }
}

fn evaluate(rows: Vec<Row>, query: &SelectQuery) -> SelectResult {
    let mut matched: Vec<Row> = rows
        .into_iter()
        .filter(|row| query.filters.iter().all(|f| matches(row, f)))
        .collect();

    matched.sort_by(|a, b| {
        query
            .order
            .iter()
            .map(|o| {
                let ord = compare(a.get(&o.column), b.get(&o.column));
                if o.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    let count = query.exact_count.then_some(matched.len() as u64);

    let rows: Vec<Row> = match (query.range, query.limit) {
        (Some(range), _) => matched
            .into_iter()
            .skip(range.from as usize)
            .take(range.len() as usize)
            .collect(),
        (None, Some(limit)) => matched.into_iter().take(limit as usize).collect(),
        (None, None) => matched,
    };

    SelectResult { rows, count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_select_applies_filters_order_and_range() {
        let client = InMemoryTableClient::new();
        client.seed(
            TableName::Skills,
            vec![
                json!({"id": "1", "name": "Rust", "category": "b"}),
                json!({"id": "2", "name": "Go", "category": "a"}),
                json!({"id": "3", "name": "Ruby", "category": "c"}),
            ],
        );

        let result = client
            .select(
                TableName::Skills,
                SelectQuery::all()
                    .any_ilike(&["name"], "R")
                    .order_by("category", false)
                    .range(0, 0)
                    .with_exact_count(),
            )
            .await
            .unwrap();

        assert_eq!(result.count, Some(2));
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0]["name"], json!("Ruby"));
    }

    #[tokio::test]
    async fn test_as_user_shares_store_and_records_token() {
        let client = InMemoryTableClient::new();
        let user = client.as_user("token-1");

        user.insert(TableName::Skills, Row::new()).await.unwrap();

        assert_eq!(client.rows(TableName::Skills).len(), 1);
        assert_eq!(
            client.calls()[0].access_token.as_deref(),
            Some("token-1")
        );
    }
}
