use std::env;
use std::time::Duration;

use anyhow::{bail, Context};

use crate::modules::admin::application::domain::JsonFieldPolicy;
use crate::modules::content::application::hooks::PageSize;
use crate::modules::remote_table::adapter::outgoing::PostgrestConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub jwt_secret: String,
    pub remote_timeout: Duration,
    pub projects_page_size: PageSize,
    pub json_field_policy: JsonFieldPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} is not set"))
        };

        let port = required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        // HS256 session tokens need a secret of at least 32 bytes
        let jwt_secret = required("SUPABASE_JWT_SECRET")?;
        if jwt_secret.len() < 32 {
            bail!("SUPABASE_JWT_SECRET must be at least 32 characters long");
        }

        let remote_timeout = match lookup("REMOTE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("REMOTE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 10,
        };
        if remote_timeout == 0 {
            bail!("REMOTE_TIMEOUT_SECS must be greater than zero");
        }

        let projects_page_size = match lookup("PROJECTS_PAGE_SIZE") {
            Some(raw) => {
                let value = raw
                    .parse::<i64>()
                    .context("PROJECTS_PAGE_SIZE must be a number")?;
                PageSize::new(value).context("PROJECTS_PAGE_SIZE is out of range")?
            }
            None => PageSize::default(),
        };

        let json_field_policy = match lookup("ADMIN_JSON_FIELD_POLICY") {
            Some(raw) => raw
                .parse::<JsonFieldPolicy>()
                .map_err(anyhow::Error::msg)
                .context("ADMIN_JSON_FIELD_POLICY must be 'fallback' or 'reject'")?,
            None => JsonFieldPolicy::default(),
        };

        Ok(Self {
            host: required("HOST")?,
            port,
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            jwt_secret,
            remote_timeout: Duration::from_secs(remote_timeout),
            projects_page_size,
            json_field_policy,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn postgrest(&self) -> PostgrestConfig {
        PostgrestConfig {
            base_url: self.supabase_url.clone(),
            api_key: self.supabase_anon_key.clone(),
            request_timeout: self.remote_timeout,
        }
    }
}
