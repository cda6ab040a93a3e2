use std::convert::TryFrom;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Router configuration, fixed when the router is built.
///
/// Every field has a default, so a partial table in an application's config
/// file is enough:
/// ```rust
/// use micro_http_router::Config;
///
/// let config: Config = serde_json::from_str(r#"{ "debug": true }"#).unwrap();
/// assert!(config.debug);
/// assert!(!config.strict);
///
/// let config = Config::default().strict(true).timeout(std::time::Duration::from_secs(5));
/// assert_eq!(config.timeout_ms, Some(5000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Treat `/foo/` and `/foo` as different paths.
    pub strict: bool,
    /// Include the failure's kind, message and source chain in the body of
    /// 500 responses.
    pub debug: bool,
    /// Answer a known path requested with an unbound verb with
    /// `405 Method Not Allowed` and an `Allow` header instead of 404.
    pub method_not_allowed: bool,
    /// Deadline for the before-hook and handler of a single request, in
    /// milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Config {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn method_not_allowed(mut self, enabled: bool) -> Self {
        self.method_not_allowed = enabled;
        self
    }

    /// Sets the per-request deadline, rounded up to whole milliseconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let mut millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        if timeout.subsec_nanos() % 1_000_000 != 0 {
            millis = millis.saturating_add(1);
        }
        self.timeout_ms = Some(millis.max(1));
        self
    }

    pub(crate) fn deadline(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_rounds_up_to_whole_millis() {
        let tests = vec![
            (Duration::from_secs(5), 5000),
            (Duration::from_micros(1), 1),
            (Duration::from_micros(1500), 2),
            (Duration::from_nanos(0), 1),
            (Duration::MAX, u64::MAX),
        ];

        for (timeout, want) in tests {
            let config = Config::default().timeout(timeout);
            assert_eq!(config.timeout_ms, Some(want), "timeout: {:?}", timeout);
        }
    }

    #[test]
    fn partial_tables_fill_defaults() {
        let config: Config = serde_json::from_str(r#"{ "strict": true, "timeout_ms": 250 }"#).unwrap();
        assert!(config.strict);
        assert!(!config.method_not_allowed);
        assert_eq!(config.deadline(), Some(Duration::from_millis(250)));
    }
}
