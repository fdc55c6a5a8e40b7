//! The trust store and its refresh scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use log::{debug, info, warn};
use tokio::task::JoinHandle;
use url::Url;

use crate::cache::CrlCache;
use crate::config::TrustStoreConfig;
use crate::crl::Crl;
use crate::csca::CscaCertificate;
use crate::error::TrustStoreError;

/// The result of refreshing one CRL URL in a batch.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// The CRL URL.
    pub url: Url,
    /// Whether download and persistence both succeeded.
    pub ok: bool,
}

/// Observer for refresh batches. Called exactly once per batch, from the
/// runtime driving the store; hosts re-post to their own dispatcher if
/// they need one.
pub trait TrustStoreDelegate: Send + Sync {
    /// A refresh batch finished with these per-URL outcomes.
    fn refresh_completed(&self, outcomes: &[RefreshOutcome]);
}

type SharedDelegate = Arc<RwLock<Option<Arc<dyn TrustStoreDelegate>>>>;

/// An ordered set of CSCA trust anchors with automatic CRL refresh.
pub struct TrustStore {
    certs: Vec<CscaCertificate>,
    config: TrustStoreConfig,
    http: reqwest::Client,
    cache: Arc<dyn CrlCache>,
    delegate: SharedDelegate,
    scheduler: Option<JoinHandle<()>>,
    had_failure: Arc<AtomicBool>,
}

impl TrustStore {
    /// Create an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`TrustStoreError`] when the HTTP client cannot be built
    /// from the configured timeout.
    pub fn new(
        config: TrustStoreConfig,
        cache: Arc<dyn CrlCache>,
    ) -> Result<Self, TrustStoreError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(TrustStore {
            certs: Vec::new(),
            config,
            http: builder.build()?,
            cache,
            delegate: Arc::new(RwLock::new(None)),
            scheduler: None,
            had_failure: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Add a trust anchor, restoring its CRL from the durable cache when
    /// a previous run left one there.
    pub fn add(&mut self, csca: CscaCertificate) {
        csca.crl().load_cached(self.cache.as_ref());
        self.certs.push(csca);
    }

    /// The configured anchors, in insertion order.
    #[must_use]
    pub fn certificates(&self) -> &[CscaCertificate] {
        &self.certs
    }

    /// Replace the overdue threshold.
    pub fn set_overdue_after(&mut self, overdue_after: Duration) {
        self.config.overdue_after = overdue_after;
    }

    /// Install the refresh observer.
    pub fn set_delegate(&self, delegate: Arc<dyn TrustStoreDelegate>) {
        if let Ok(mut slot) = self.delegate.write() {
            *slot = Some(delegate);
        }
    }

    /// `true` when any member CRL is overdue.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        let now = Utc::now();
        self.certs
            .iter()
            .any(|c| c.crl().is_overdue(self.config.overdue_after, now))
    }

    /// Run one refresh batch over every URL-bearing CRL, concurrently,
    /// and notify the delegate once when the whole batch has completed.
    pub async fn refresh_now(&self) -> Vec<RefreshOutcome> {
        run_batch(
            self.refreshable_crls(),
            self.http.clone(),
            Arc::clone(&self.cache),
            Arc::clone(&self.delegate),
            Arc::clone(&self.had_failure),
        )
        .await
    }

    /// To be called from the host's reachability observer: when the last
    /// batch had a failure, connectivity coming back triggers an
    /// immediate retry.
    pub async fn network_became_reachable(&self) {
        if self.had_failure.load(Ordering::Acquire) {
            info!("network reachable again, retrying CRL refresh");
            self.refresh_now().await;
        }
    }

    /// Arm the periodic refresh scheduler. A previous scheduler is
    /// stopped first; pending downloads from it are abandoned.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, which is where the
    /// scheduler task lives.
    pub fn start_auto_refresh(&mut self, period: Duration) {
        self.stop_auto_refresh();
        self.config.refresh_period = period;

        let crls = self.refreshable_crls();
        let http = self.http.clone();
        let cache = Arc::clone(&self.cache);
        let delegate = Arc::clone(&self.delegate);
        let had_failure = Arc::clone(&self.had_failure);

        self.scheduler = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                run_batch(
                    crls.clone(),
                    http.clone(),
                    Arc::clone(&cache),
                    Arc::clone(&delegate),
                    Arc::clone(&had_failure),
                )
                .await;
            }
        }));
    }

    /// Disarm the scheduler; in-flight downloads are abandoned and their
    /// results discarded.
    pub fn stop_auto_refresh(&mut self) {
        if let Some(handle) = self.scheduler.take() {
            handle.abort();
        }
    }

    fn refreshable_crls(&self) -> Vec<Crl> {
        self.certs
            .iter()
            .map(CscaCertificate::crl)
            .filter(|crl| crl.url().is_some())
            .cloned()
            .collect()
    }
}

impl Drop for TrustStore {
    fn drop(&mut self) {
        self.stop_auto_refresh();
    }
}

async fn run_batch(
    crls: Vec<Crl>,
    http: reqwest::Client,
    cache: Arc<dyn CrlCache>,
    delegate: SharedDelegate,
    had_failure: Arc<AtomicBool>,
) -> Vec<RefreshOutcome> {
    debug!("refreshing {} CRLs", crls.len());
    let downloads = crls.iter().map(|crl| {
        let http = http.clone();
        let cache = Arc::clone(&cache);
        async move {
            // refreshable_crls only yields URL-bearing CRLs.
            let url = crl.url().cloned();
            let ok = match crl.refresh(&http, cache.as_ref()).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("CRL refresh failed: {e}");
                    false
                }
            };
            url.map(|url| RefreshOutcome { url, ok })
        }
    });
    let outcomes: Vec<RefreshOutcome> = join_all(downloads).await.into_iter().flatten().collect();

    had_failure.store(outcomes.iter().any(|o| !o.ok), Ordering::Release);

    if let Some(observer) = delegate.read().ok().and_then(|slot| (*slot).clone()) {
        observer.refresh_completed(&outcomes);
    }
    outcomes
}
