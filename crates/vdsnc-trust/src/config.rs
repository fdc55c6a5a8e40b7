//! Trust-store configuration.

use std::time::Duration;

/// Tunables for refresh scheduling and overdue reporting.
#[derive(Debug, Clone)]
pub struct TrustStoreConfig {
    /// Period between automatic CRL refresh ticks.
    pub refresh_period: Duration,
    /// Age past which a refreshable CRL counts as overdue.
    pub overdue_after: Duration,
    /// Per-request timeout for CRL downloads; `None` keeps the HTTP
    /// client default.
    pub http_timeout: Option<Duration>,
}

impl Default for TrustStoreConfig {
    fn default() -> Self {
        TrustStoreConfig {
            refresh_period: Duration::from_secs(86_400),
            overdue_after: Duration::from_secs(864_000),
            http_timeout: None,
        }
    }
}
