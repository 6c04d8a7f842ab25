use std::{collections::HashMap, fs, num::NonZeroUsize, path::Path, time::Duration};

use anyhow::{bail, Context};
use url::Url;

use crate::pagination::{CLIENT_PAGE_SIZE, SERVICE_PAGE_SIZE};

pub const SETTINGS_FILE: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub api_base_url: String,
    pub bearer_token: Option<String>,
    pub request_timeout_secs: u64,
    pub client_page_size: NonZeroUsize,
    pub service_page_size: NonZeroUsize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8085".into(),
            bearer_token: None,
            request_timeout_secs: 15,
            client_page_size: page_size(CLIENT_PAGE_SIZE),
            service_page_size: page_size(SERVICE_PAGE_SIZE),
        }
    }
}

impl ConsoleSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL without trailing slash, ready for route concatenation.
    pub fn api_base_url(&self) -> anyhow::Result<String> {
        normalize_base_url(&self.api_base_url)
    }
}

fn page_size(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).unwrap_or(NonZeroUsize::MIN)
}

pub fn load_settings() -> ConsoleSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the flat `key = "value"` file at `path`, then `env` overrides.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ConsoleSettings {
    let mut settings = ConsoleSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("bearer_token") {
                settings.bearer_token = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("request_timeout_secs") {
                apply_number(&mut settings.request_timeout_secs, v);
            }
            if let Some(v) = file_cfg.get("client_page_size") {
                apply_number(&mut settings.client_page_size, v);
            }
            if let Some(v) = file_cfg.get("service_page_size") {
                apply_number(&mut settings.service_page_size, v);
            }
        }
    }

    if let Some(v) = env("CONSOLE_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("CONSOLE_TOKEN") {
        settings.bearer_token = Some(v);
    }
    if let Some(v) = env("APP__BEARER_TOKEN") {
        settings.bearer_token = Some(v);
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        apply_number(&mut settings.request_timeout_secs, &v);
    }
    if let Some(v) = env("APP__CLIENT_PAGE_SIZE") {
        apply_number(&mut settings.client_page_size, &v);
    }
    if let Some(v) = env("APP__SERVICE_PAGE_SIZE") {
        apply_number(&mut settings.service_page_size, &v);
    }

    settings.bearer_token = settings
        .bearer_token
        .filter(|token| !token.trim().is_empty());
    settings
}

fn apply_number<T: std::str::FromStr>(slot: &mut T, raw: &str) {
    if let Ok(parsed) = raw.trim().parse::<T>() {
        *slot = parsed;
    }
}

pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("api base url is empty");
    }

    let parsed = Url::parse(raw).with_context(|| format!("invalid api base url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("api base url '{raw}' must use http or https");
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
