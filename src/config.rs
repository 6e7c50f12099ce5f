//! Support for library configuration options

use serde::{Deserialize, Serialize};
use url::Url;

/// Whether write operations are refused when nothing says otherwise
const DEFAULT_READ_ONLY: bool = false;

/// Connection and behavior settings, as an embedding application would load
/// them from its configuration file (or environment).
///
/// Every field is optional. What an absent field means is decided by
/// [`ApiOptions::resolve`], which layers explicit arguments over this record
/// over built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The CalDAV server URL, e.g. `https://cloud.example.com/remote.php/dav`
    pub server_url: Option<Url>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Whether write operations should be refused
    pub read_only: Option<bool>,
    /// UIDs or names of the task lists to load; every list is loaded when absent
    pub target_lists: Option<Vec<String>>,
}

/// The settled behavior settings a [`TasksApi`](crate::TasksApi) runs with,
/// after every layer had its say
#[derive(Clone, Debug, PartialEq)]
pub struct ApiOptions {
    pub read_only: bool,
    pub target_lists: Option<Vec<String>>,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            read_only: DEFAULT_READ_ONLY,
            target_lists: None,
        }
    }
}

impl ApiOptions {
    /// Settle the options from the three layers: an explicit argument beats
    /// the configuration record, which beats the built-in default
    pub fn resolve(read_only: Option<bool>, target_lists: Option<Vec<String>>, config: &Config) -> Self {
        Self {
            read_only: resolve_setting(read_only, config.read_only, DEFAULT_READ_ONLY),
            target_lists: target_lists.or_else(|| config.target_lists.clone()),
        }
    }
}

/// A single setting, settled: the explicit value if there is one, else the
/// configured value, else the default
pub fn resolve_setting<T>(explicit: Option<T>, configured: Option<T>, default: T) -> T {
    explicit.or(configured).unwrap_or(default)
}
