pub mod entity_resource;
pub mod projects_browser;
pub mod queries;
pub mod request_guard;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use entity_resource::{EntityResource, Listing, Refresh, ResourceQuery, ResourceState};
pub use projects_browser::{
    ListQueryError, PageSize, ProjectListParams, ProjectListState, ProjectsBrowser, TagFilter,
};
pub use request_guard::RequestGuard;

/// Hook state stays usable after a panicking writer; the last written value wins.
pub(crate) fn lock_state<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
