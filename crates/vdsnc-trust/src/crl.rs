//! A certificate revocation list and its refresh state.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use url::Url;

use crate::cache::CrlCache;
use crate::error::RefreshError;

/// Cache key for the DER blob of a CRL URL.
#[must_use]
pub fn data_key(url: &Url) -> String {
    format!("crldata.{url}")
}

/// Cache key for the last-download timestamp of a CRL URL.
#[must_use]
pub fn downloaded_key(url: &Url) -> String {
    format!("downloaded.{url}")
}

#[derive(Debug, Default)]
struct CrlState {
    data: Option<Vec<u8>>,
    last_downloaded: Option<DateTime<Utc>>,
}

/// A CRL: either a fixed blob supplied by the host, or one refreshed
/// from a URL.
///
/// State lives behind a lock so a refresh swaps `data` and
/// `last_downloaded` atomically with respect to a concurrent
/// verification reading them. Clones share the same state.
#[derive(Debug, Clone)]
pub struct Crl {
    url: Option<Url>,
    state: Arc<RwLock<CrlState>>,
}

impl Crl {
    /// A CRL that is never refreshed.
    #[must_use]
    pub fn from_static(bytes: Vec<u8>) -> Self {
        Crl {
            url: None,
            state: Arc::new(RwLock::new(CrlState {
                data: Some(bytes),
                last_downloaded: None,
            })),
        }
    }

    /// A refreshable CRL. `seed` is the host-provided initial blob used
    /// until the first successful download (or a cached one) replaces it.
    #[must_use]
    pub fn updating(url: Url, seed: Option<Vec<u8>>) -> Self {
        Crl {
            url: Some(url),
            state: Arc::new(RwLock::new(CrlState {
                data: seed,
                last_downloaded: None,
            })),
        }
    }

    /// The refresh URL, when this CRL has one.
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// A snapshot of the current DER bytes.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.state.read().ok().and_then(|s| s.data.clone())
    }

    /// When the CRL was last downloaded successfully, if ever.
    #[must_use]
    pub fn last_downloaded(&self) -> Option<DateTime<Utc>> {
        self.state.read().ok().and_then(|s| s.last_downloaded)
    }

    /// Replace the seed with cached bytes from a previous run, when the
    /// cache has any.
    pub fn load_cached(&self, cache: &dyn CrlCache) {
        let Some(url) = &self.url else {
            return;
        };
        let Some(bytes) = cache.get(&data_key(url)) else {
            return;
        };
        let stamp = cache
            .get(&downloaded_key(url))
            .and_then(|raw| String::from_utf8(raw).ok())
            .and_then(|text| DateTime::parse_from_rfc3339(&text).ok())
            .map(|t| t.with_timezone(&Utc));
        if let Ok(mut state) = self.state.write() {
            debug!("loaded cached CRL for {url} ({} bytes)", bytes.len());
            state.data = Some(bytes);
            state.last_downloaded = stamp;
        }
    }

    /// `true` when this CRL has a URL and has either never been
    /// downloaded or not been downloaded within `overdue_after`.
    #[must_use]
    pub fn is_overdue(&self, overdue_after: Duration, now: DateTime<Utc>) -> bool {
        if self.url.is_none() {
            return false;
        }
        match self.last_downloaded() {
            None => true,
            Some(last) => match chrono::Duration::from_std(overdue_after) {
                Ok(threshold) => now - last >= threshold,
                Err(_) => false,
            },
        }
    }

    /// Download the CRL, swap in the new bytes, and persist them.
    ///
    /// On any failure the previous state is left untouched. No signature
    /// check happens here; the verifier re-checks the CRL at use time.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] when the download or the persistence
    /// write fails. A CRL without a URL refreshes trivially.
    pub async fn refresh(
        &self,
        http: &reqwest::Client,
        cache: &dyn CrlCache,
    ) -> Result<(), RefreshError> {
        let Some(url) = &self.url else {
            return Ok(());
        };
        debug!("refreshing CRL from {url}");
        let response = http.get(url.clone()).send().await?.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();
        let now = Utc::now();

        cache.put(&data_key(url), &bytes)?;
        if let Err(e) = cache.put(&downloaded_key(url), now.to_rfc3339().as_bytes()) {
            warn!("failed to persist download stamp for {url}: {e}");
        }

        if let Ok(mut state) = self.state.write() {
            state.data = Some(bytes);
            state.last_downloaded = Some(now);
        }
        debug!("CRL for {url} refreshed");
        Ok(())
    }
}
