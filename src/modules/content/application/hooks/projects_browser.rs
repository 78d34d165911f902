use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};
use utoipa::ToSchema;

use super::entity_resource::Refresh;
use super::lock_state;
use super::queries::decode_rows;
use super::request_guard::RequestGuard;
use crate::modules::content::application::domain::entities::Project;
use crate::modules::remote_table::application::ports::outgoing::{
    RemoteTableClient, RowRange, SelectQuery, TableName,
};

/// Sentinel accepted in place of a tag meaning "no tag filter".
pub const ALL_TAGS: &str = "all";

const SEARCH_COLUMNS: [&str; 2] = ["title", "description"];

//
// ──────────────────────────────────────────────────────────
// Inputs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_TAGS {
            TagFilter::All
        } else {
            TagFilter::Tag(raw.to_string())
        }
    }

    pub fn as_tag(&self) -> Option<&str> {
        match self {
            TagFilter::All => None,
            TagFilter::Tag(tag) => Some(tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListQueryError {
    #[error("Page size must be a positive integer, got {0}")]
    InvalidPageSize(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(u32);

impl PageSize {
    pub const DEFAULT: PageSize = PageSize(10);

    pub fn new(value: i64) -> Result<Self, ListQueryError> {
        match u32::try_from(value) {
            Ok(size) if size > 0 => Ok(PageSize(size)),
            _ => Err(ListQueryError::InvalidPageSize(value)),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectListParams {
    pub search_term: String,
    pub tag: TagFilter,
}

//
// ──────────────────────────────────────────────────────────
// Query derivation
// ──────────────────────────────────────────────────────────
//

/// Row window for a 1-based page: `[(page-1)*size, page*size-1]`. Page 0 reads
/// as page 1. The window never depends on earlier fetches.
pub fn window_for_page(page: u32, size: PageSize) -> RowRange {
    let page = u64::from(page.max(1));
    let size = u64::from(size.get());

    RowRange {
        from: (page - 1) * size,
        to: page * size - 1,
    }
}

pub fn total_pages(total_count: u64, size: PageSize) -> u32 {
    u32::try_from(total_count.div_ceil(u64::from(size.get()))).unwrap_or(u32::MAX)
}

pub fn build_page_query(params: &ProjectListParams, window: RowRange) -> SelectQuery {
    let mut query = SelectQuery::all().with_exact_count();

    let term = params.search_term.trim();
    if !term.is_empty() {
        query = query.any_ilike(&SEARCH_COLUMNS, term);
    }
    if let Some(tag) = params.tag.as_tag() {
        query = query.contains("tags", vec![tag.to_string()]);
    }

    query
        .order_by("created_at", false)
        .range(window.from, window.to)
}

//
// ──────────────────────────────────────────────────────────
// Browser
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProjectListState {
    pub projects: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub last_window: Option<RowRange>,
}

impl ProjectListState {
    fn pending(page_size: PageSize) -> Self {
        Self {
            projects: Vec::new(),
            loading: true,
            error: None,
            total_count: 0,
            current_page: 1,
            total_pages: 0,
            page_size: page_size.get(),
            last_window: None,
        }
    }
}

struct BrowserInner {
    params: ProjectListParams,
    state: ProjectListState,
}

/// Server-side search, tag filter and offset pagination over `projects`.
/// Every page is read from the backend; nothing is sliced locally.
pub struct ProjectsBrowser {
    client: Arc<dyn RemoteTableClient>,
    page_size: PageSize,
    inner: Arc<Mutex<BrowserInner>>,
    guard: RequestGuard,
}

impl ProjectsBrowser {
    pub fn new(
        client: Arc<dyn RemoteTableClient>,
        page_size: PageSize,
        params: ProjectListParams,
    ) -> Self {
        Self {
            client,
            page_size,
            inner: Arc::new(Mutex::new(BrowserInner {
                params,
                state: ProjectListState::pending(page_size),
            })),
            guard: RequestGuard::new(),
        }
    }

    /// Creates the browser and loads page 1.
    pub async fn mount(
        client: Arc<dyn RemoteTableClient>,
        page_size: PageSize,
        params: ProjectListParams,
    ) -> Self {
        Self::open_at(client, page_size, params, 1).await
    }

    /// Creates the browser and loads `page` directly.
    pub async fn open_at(
        client: Arc<dyn RemoteTableClient>,
        page_size: PageSize,
        params: ProjectListParams,
        page: u32,
    ) -> Self {
        let browser = Self::new(client, page_size, params);
        browser.fetch_page(page).await;
        browser
    }

    pub fn state(&self) -> ProjectListState {
        lock_state(&self.inner).state.clone()
    }

    pub fn params(&self) -> ProjectListParams {
        lock_state(&self.inner).params.clone()
    }

    pub async fn set_search_term(&self, term: &str) -> ProjectListState {
        let params = ProjectListParams {
            search_term: term.to_string(),
            ..self.params()
        };
        self.set_filters(params).await
    }

    pub async fn set_selected_tag(&self, tag: TagFilter) -> ProjectListState {
        let params = ProjectListParams {
            tag,
            ..self.params()
        };
        self.set_filters(params).await
    }

    /// Changed filters restart at page 1; identical filters do nothing.
    pub async fn set_filters(&self, params: ProjectListParams) -> ProjectListState {
        let changed = {
            let mut inner = lock_state(&self.inner);
            if inner.params == params {
                false
            } else {
                inner.params = params;
                true
            }
        };

        if changed {
            self.fetch_page(1).await
        } else {
            self.state()
        }
    }

    pub async fn go_to_page(&self, page: u32) -> ProjectListState {
        self.fetch_page(page).await
    }

    pub async fn refetch(&self) -> ProjectListState {
        let page = lock_state(&self.inner).state.current_page;
        self.fetch_page(page).await
    }

    async fn fetch_page(&self, page: u32) -> ProjectListState {
        let page = page.max(1);
        let ticket = self.guard.issue();

        let (params, window) = {
            let mut inner = lock_state(&self.inner);
            let window = window_for_page(page, self.page_size);

            inner.state.loading = true;
            inner.state.error = None;
            inner.state.current_page = page;
            inner.state.last_window = Some(window);
            (inner.params.clone(), window)
        };

        let query = build_page_query(&params, window);
        let outcome = match self
            .guard
            .run(self.client.select(TableName::Projects, query))
            .await
        {
            Some(outcome) => outcome,
            None => return self.state(),
        };

        if !self.guard.is_current(ticket) {
            debug!("projects page {} superseded, discarding result", page);
            return self.state();
        }

        let outcome = outcome.and_then(|result| {
            let projects: Vec<Project> = decode_rows(result.rows)?;
            let total = result
                .count
                .unwrap_or(window.from + projects.len() as u64);
            Ok((projects, total))
        });

        let mut inner = lock_state(&self.inner);
        match outcome {
            Ok((projects, total)) => {
                inner.state.projects = projects;
                inner.state.total_count = total;
                inner.state.total_pages = total_pages(total, self.page_size);
            }
            Err(e) => {
                warn!("projects page {} failed: {}", page, e);
                inner.state.projects.clear();
                inner.state.total_count = 0;
                inner.state.total_pages = 0;
                inner.state.error = Some(e.to_string());
            }
        }
        inner.state.loading = false;
        inner.state.clone()
    }
}

impl Drop for ProjectsBrowser {
    fn drop(&mut self) {
        self.guard.teardown();
    }
}

#[async_trait]
impl Refresh for ProjectsBrowser {
    async fn refresh(&self) {
        self.refetch().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::remote_table::application::ports::outgoing::{Filter, TableError};
    use crate::tests::support::fixtures::project_row;
    use crate::tests::support::in_memory_table::InMemoryTableClient;

    fn size(n: i64) -> PageSize {
        PageSize::new(n).unwrap()
    }

    fn client_with_projects(count: u32) -> InMemoryTableClient {
        let client = InMemoryTableClient::new();
        client.seed(
            TableName::Projects,
            (0..count)
                .map(|rank| project_row(&format!("Project {}", rank + 1), &[], rank))
                .collect(),
        );
        client
    }

    fn tagged_client() -> InMemoryTableClient {
        let client = InMemoryTableClient::new();
        client.seed(
            TableName::Projects,
            vec![
                project_row("Dashboard", &["react"], 0),
                project_row("Storefront", &["vue"], 1),
                project_row("Chat API", &["react", "node"], 2),
            ],
        );
        client
    }

    // ─── Derivation ───────────────────────────────────────

    #[test]
    fn test_page_size_rejects_non_positive() {
        assert_eq!(PageSize::new(0), Err(ListQueryError::InvalidPageSize(0)));
        assert_eq!(PageSize::new(-3), Err(ListQueryError::InvalidPageSize(-3)));
        assert_eq!(PageSize::new(6).map(|s| s.get()), Ok(6));
    }

    #[test]
    fn test_window_follows_offset_formula() {
        assert_eq!(window_for_page(1, size(6)), RowRange { from: 0, to: 5 });
        assert_eq!(window_for_page(3, size(6)), RowRange { from: 12, to: 17 });
        assert_eq!(window_for_page(0, size(6)), RowRange { from: 0, to: 5 });
        assert_eq!(window_for_page(5, size(6)), RowRange { from: 24, to: 29 });
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(13, size(6)), 3);
        assert_eq!(total_pages(12, size(6)), 2);
        assert_eq!(total_pages(0, size(6)), 0);
    }

    #[test]
    fn test_tag_filter_parses_sentinel() {
        assert_eq!(TagFilter::parse("all"), TagFilter::All);
        assert_eq!(TagFilter::parse(""), TagFilter::All);
        assert_eq!(TagFilter::parse("rust"), TagFilter::Tag("rust".to_string()));
    }

    #[test]
    fn test_build_page_query_combines_search_and_tag() {
        let params = ProjectListParams {
            search_term: "api".to_string(),
            tag: TagFilter::Tag("rust".to_string()),
        };

        let query = build_page_query(&params, RowRange { from: 0, to: 9 });

        assert!(query.exact_count);
        assert_eq!(query.range, Some(RowRange { from: 0, to: 9 }));
        assert_eq!(
            query.filters,
            vec![
                Filter::AnyILike {
                    columns: vec!["title".to_string(), "description".to_string()],
                    term: "api".to_string(),
                },
                Filter::Contains {
                    column: "tags".to_string(),
                    values: vec!["rust".to_string()],
                },
            ]
        );
        assert_eq!(query.order[0].column, "created_at");
        assert!(!query.order[0].ascending);
    }

    #[test]
    fn test_build_page_query_without_filters() {
        let query = build_page_query(&ProjectListParams::default(), RowRange { from: 0, to: 9 });
        assert!(query.filters.is_empty());
    }

    // ─── Browser ──────────────────────────────────────────

    #[tokio::test]
    async fn test_thirteen_rows_in_pages_of_six() {
        let client = client_with_projects(13);
        let browser =
            ProjectsBrowser::mount(client.shared(), size(6), ProjectListParams::default()).await;

        let first = browser.state();
        assert_eq!(first.projects.len(), 6);
        assert_eq!(first.total_count, 13);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.last_window, Some(RowRange { from: 0, to: 5 }));

        let last = browser.go_to_page(3).await;
        assert_eq!(last.projects.len(), 1);
        assert_eq!(last.projects[0].title, "Project 13");
        assert_eq!(last.current_page, 3);
        assert_eq!(last.last_window, Some(RowRange { from: 12, to: 17 }));
        assert_eq!(
            client.last_select(TableName::Projects).unwrap().range,
            Some(RowRange { from: 12, to: 17 })
        );
    }

    #[tokio::test]
    async fn test_same_page_requests_same_window_on_every_path() {
        let client = client_with_projects(13);

        let opened =
            ProjectsBrowser::open_at(client.shared(), size(6), ProjectListParams::default(), 3)
                .await;
        let direct = client.last_select(TableName::Projects).unwrap().range;

        let navigated =
            ProjectsBrowser::mount(client.shared(), size(6), ProjectListParams::default()).await;
        navigated.go_to_page(3).await;
        let after_mount = client.last_select(TableName::Projects).unwrap().range;

        assert_eq!(direct, Some(RowRange { from: 12, to: 17 }));
        assert_eq!(direct, after_mount);
        assert_eq!(opened.state().last_window, navigated.state().last_window);
        assert_eq!(opened.state().projects.len(), 1);
    }

    #[tokio::test]
    async fn test_tag_filter_selects_matching_projects() {
        let client = tagged_client();
        let browser =
            ProjectsBrowser::mount(client.shared(), size(10), ProjectListParams::default()).await;
        assert_eq!(browser.state().projects.len(), 3);

        let react = browser
            .set_selected_tag(TagFilter::parse("react"))
            .await;
        let titles: Vec<&str> = react.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Dashboard", "Chat API"]);
        assert_eq!(react.total_count, 2);

        let all = browser.set_selected_tag(TagFilter::parse("all")).await;
        assert_eq!(all.projects.len(), 3);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_title_and_description() {
        let client = tagged_client();
        let browser =
            ProjectsBrowser::mount(client.shared(), size(10), ProjectListParams::default()).await;

        let by_title = browser.set_search_term("CHAT").await;
        assert_eq!(by_title.projects.len(), 1);

        let by_description = browser.set_search_term("storefront desc").await;
        assert_eq!(by_description.projects[0].title, "Storefront");

        let cleared = browser.set_search_term("").await;
        assert_eq!(cleared.projects.len(), 3);
    }

    #[tokio::test]
    async fn test_filter_change_resets_to_first_page() {
        let client = client_with_projects(13);
        let browser =
            ProjectsBrowser::mount(client.shared(), size(6), ProjectListParams::default()).await;
        browser.go_to_page(2).await;

        let state = browser.set_search_term("Project 1").await;

        assert_eq!(state.current_page, 1);
        assert_eq!(state.last_window.map(|w| w.from), Some(0));
        // "Project 1" and "Project 10" through "Project 13".
        assert_eq!(state.total_count, 5);
    }

    #[tokio::test]
    async fn test_identical_filters_issue_no_request() {
        let client = tagged_client();
        let browser =
            ProjectsBrowser::mount(client.shared(), size(10), ProjectListParams::default()).await;
        let before = client.select_count(TableName::Projects);

        browser.set_selected_tag(TagFilter::All).await;
        browser.set_search_term("").await;

        assert_eq!(client.select_count(TableName::Projects), before);
    }

    #[tokio::test]
    async fn test_every_navigation_queries_the_backend() {
        let client = client_with_projects(13);
        let browser =
            ProjectsBrowser::mount(client.shared(), size(6), ProjectListParams::default()).await;

        browser.go_to_page(2).await;
        browser.go_to_page(1).await;
        browser.refetch().await;

        assert_eq!(client.select_count(TableName::Projects), 4);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_not_an_error() {
        let client = client_with_projects(13);
        let browser =
            ProjectsBrowser::mount(client.shared(), size(6), ProjectListParams::default()).await;

        let state = browser.go_to_page(5).await;

        assert!(state.projects.is_empty());
        assert!(state.error.is_none());
        assert_eq!(state.total_count, 13);
        assert_eq!(state.current_page, 5);
    }

    #[tokio::test]
    async fn test_failure_empties_projects_and_count() {
        let client = client_with_projects(3);
        let browser =
            ProjectsBrowser::mount(client.shared(), size(6), ProjectListParams::default()).await;

        client.fail(
            TableName::Projects,
            TableError::Transport("timed out".to_string()),
        );
        let state = browser.refetch().await;

        assert!(state.projects.is_empty());
        assert_eq!(state.total_count, 0);
        assert_eq!(state.total_pages, 0);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network error: timed out"));
    }
}
