pub mod postgrest_client;

pub use postgrest_client::{PostgrestConfig, PostgrestTableClient};
