//! Runtime configuration for the catalog.

use tracing::warn;

pub const MAILBOX_CAPACITY_VAR: &str = "CATALOG_MAILBOX_CAPACITY";
pub const DEFAULT_PAGE_SIZE_VAR: &str = "CATALOG_DEFAULT_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Bound of the author actor's mailbox.
    pub mailbox_capacity: usize,
    /// Page size used by client calls that take a page number only.
    pub default_page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            default_page_size: 20,
        }
    }
}

impl CatalogConfig {
    /// Reads overrides from the environment. Missing variables keep the
    /// default; unparsable or zero values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            mailbox_capacity: positive(&lookup, MAILBOX_CAPACITY_VAR, defaults.mailbox_capacity),
            default_page_size: positive(&lookup, DEFAULT_PAGE_SIZE_VAR, defaults.default_page_size),
        }
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => {
            warn!(key, value = %raw, default, "Ignoring invalid setting");
            default
        }
    }
}
