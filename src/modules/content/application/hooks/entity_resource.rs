use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::lock_state;
use super::request_guard::RequestGuard;
use crate::modules::remote_table::application::ports::outgoing::{RemoteTableClient, TableError};

//
// ──────────────────────────────────────────────────────────
// State
// ──────────────────────────────────────────────────────────
//

/// What a page renders: always safe to display, even mid-load or after a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> ResourceState<T> {
    pub fn pending() -> Self {
        Self {
            data: T::default(),
            loading: true,
            error: None,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Query contract
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ResourceQuery: Send + Sync + 'static {
    /// Reset to `Default` whenever a fetch fails.
    type Output: Default + Clone + Send + Sync + 'static;

    fn label(&self) -> &'static str;

    async fn run(&self, client: &dyn RemoteTableClient) -> Result<Self::Output, TableError>;
}

/// Something that can re-read its remote content on demand.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn refresh(&self);
}

/// A refreshable view whose current state can be rendered as JSON.
pub trait Listing: Refresh {
    fn snapshot(&self) -> serde_json::Value;
}

//
// ──────────────────────────────────────────────────────────
// Hook
// ──────────────────────────────────────────────────────────
//

/// Fetch-on-mount resource for one query. Every instance issues its own round
/// trips; nothing is shared or cached between instances.
pub struct EntityResource<Q: ResourceQuery> {
    client: Arc<dyn RemoteTableClient>,
    query: Arc<Q>,
    state: Arc<Mutex<ResourceState<Q::Output>>>,
    guard: RequestGuard,
}

impl<Q: ResourceQuery> EntityResource<Q> {
    /// Unfetched instance, reporting `loading` until the first fetch settles.
    pub fn new(client: Arc<dyn RemoteTableClient>, query: Q) -> Self {
        Self {
            client,
            query: Arc::new(query),
            state: Arc::new(Mutex::new(ResourceState::pending())),
            guard: RequestGuard::new(),
        }
    }

    /// Creates the instance and runs the initial fetch.
    pub async fn mount(client: Arc<dyn RemoteTableClient>, query: Q) -> Self {
        let resource = Self::new(client, query);
        resource.refetch().await;
        resource
    }

    pub fn state(&self) -> ResourceState<Q::Output> {
        lock_state(&self.state).clone()
    }

    pub async fn refetch(&self) -> ResourceState<Q::Output> {
        fetch_into(
            Arc::clone(&self.client),
            Arc::clone(&self.query),
            Arc::clone(&self.state),
            self.guard.clone(),
        )
        .await;

        self.state()
    }

    /// Starts a refetch without awaiting it. The task stops as soon as this
    /// instance is dropped and never writes state afterwards.
    pub fn refetch_in_background(&self) -> JoinHandle<()> {
        tokio::spawn(fetch_into(
            Arc::clone(&self.client),
            Arc::clone(&self.query),
            Arc::clone(&self.state),
            self.guard.clone(),
        ))
    }
}

impl<Q: ResourceQuery> Drop for EntityResource<Q> {
    fn drop(&mut self) {
        self.guard.teardown();
    }
}

#[async_trait]
impl<Q: ResourceQuery> Refresh for EntityResource<Q> {
    async fn refresh(&self) {
        self.refetch().await;
    }
}

impl<Q> Listing for EntityResource<Q>
where
    Q: ResourceQuery,
    Q::Output: Serialize,
{
    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self.state()).unwrap_or(serde_json::Value::Null)
    }
}

async fn fetch_into<Q: ResourceQuery>(
    client: Arc<dyn RemoteTableClient>,
    query: Arc<Q>,
    state: Arc<Mutex<ResourceState<Q::Output>>>,
    guard: RequestGuard,
) {
    let ticket = guard.issue();
    {
        let mut current = lock_state(&state);
        current.loading = true;
        current.error = None;
    }

    let outcome = match guard.run(query.run(client.as_ref())).await {
        Some(outcome) => outcome,
        None => {
            debug!("{} fetch abandoned: owner torn down", query.label());
            return;
        }
    };

    if !guard.is_current(ticket) {
        debug!("{} fetch superseded, discarding result", query.label());
        return;
    }

    let mut current = lock_state(&state);
    match outcome {
        Ok(data) => {
            current.data = data;
            current.error = None;
        }
        Err(e) => {
            warn!("{} fetch failed: {}", query.label(), e);
            current.data = Q::Output::default();
            current.error = Some(e.to_string());
        }
    }
    current.loading = false;
}
