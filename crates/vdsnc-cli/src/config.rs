//! Trust configuration — read `trust.toml` and build a store from it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

use vdsnc_core::Sha256Digest;
use vdsnc_trust::{Crl, CscaCertificate, FileCache, TrustStore, TrustStoreConfig};

/// The parsed trust configuration file.
#[derive(Debug, Deserialize)]
pub struct TrustConfig {
    /// Directory for the durable CRL cache, relative to the config file.
    pub cache_dir: PathBuf,
    /// Seconds between automatic refresh ticks.
    pub refresh_period_secs: Option<u64>,
    /// Seconds after which an undownloaded CRL counts as overdue.
    pub overdue_after_secs: Option<u64>,
    /// Per-request CRL download timeout in seconds.
    pub http_timeout_secs: Option<u64>,
    /// The configured trust anchors.
    pub csca: Vec<CscaEntry>,
}

/// One `[[csca]]` entry.
#[derive(Debug, Deserialize)]
pub struct CscaEntry {
    /// Path to the certificate (PEM or DER), relative to the config file.
    pub cert: PathBuf,
    /// Expected SHA-256 of the certificate DER, hex.
    pub sha256: String,
    /// CRL download URL. Exactly one of `crl_url` / `crl_file`.
    pub crl_url: Option<String>,
    /// Path to a static CRL file. Exactly one of `crl_url` / `crl_file`.
    pub crl_file: Option<PathBuf>,
}

/// Load and deserialize a [`TrustConfig`] from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialized.
pub fn load_config(path: &Path) -> Result<TrustConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading trust config {}", path.display()))?;
    toml::from_str(&raw).context("parsing trust config")
}

/// Build a [`TrustStore`] from the configuration. Paths resolve relative
/// to `base_dir` (normally the config file's directory).
///
/// # Errors
///
/// Returns an error when a certificate cannot be read or parsed, a
/// digest or URL is invalid, or a CSCA entry does not name exactly one
/// CRL source.
pub fn build_store(cfg: &TrustConfig, base_dir: &Path) -> Result<TrustStore> {
    let cache = FileCache::new(base_dir.join(&cfg.cache_dir))
        .context("opening CRL cache directory")?;

    let mut store_config = TrustStoreConfig::default();
    if let Some(secs) = cfg.refresh_period_secs {
        store_config.refresh_period = Duration::from_secs(secs);
    }
    if let Some(secs) = cfg.overdue_after_secs {
        store_config.overdue_after = Duration::from_secs(secs);
    }
    if let Some(secs) = cfg.http_timeout_secs {
        store_config.http_timeout = Some(Duration::from_secs(secs));
    }

    let mut store = TrustStore::new(store_config, Arc::new(cache))?;
    for entry in &cfg.csca {
        let cert_path = base_dir.join(&entry.cert);
        let cert_bytes = std::fs::read(&cert_path)
            .with_context(|| format!("reading CSCA certificate {}", cert_path.display()))?;
        let digest = Sha256Digest::from_hex(&entry.sha256)
            .with_context(|| format!("invalid sha256 for {}", cert_path.display()))?;
        let crl = match (&entry.crl_url, &entry.crl_file) {
            (Some(url), None) => Crl::updating(
                Url::parse(url).with_context(|| format!("invalid CRL URL {url}"))?,
                None,
            ),
            (None, Some(file)) => {
                let crl_path = base_dir.join(file);
                let bytes = std::fs::read(&crl_path)
                    .with_context(|| format!("reading CRL {}", crl_path.display()))?;
                Crl::from_static(bytes)
            }
            _ => bail!(
                "CSCA entry {} must name exactly one of crl_url or crl_file",
                cert_path.display()
            ),
        };
        let csca = CscaCertificate::new(&cert_bytes, digest, crl)
            .with_context(|| format!("parsing CSCA certificate {}", cert_path.display()))?;
        store.add(csca);
    }
    Ok(store)
}
