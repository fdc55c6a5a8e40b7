//! `vdsnc refresh` — one refresh batch over every configured CRL URL.

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::{build_store, load_config};

/// Download fresh CRLs for every URL-bearing anchor and report per-URL
/// outcomes.
///
/// # Errors
///
/// Returns an error when the configuration cannot be loaded or any
/// download fails.
pub async fn run_refresh(trust_path: &Path) -> Result<()> {
    let cfg = load_config(trust_path)?;
    let base_dir = trust_path.parent().unwrap_or_else(|| Path::new("."));
    let store = build_store(&cfg, base_dir)?;

    let outcomes = store.refresh_now().await;
    if outcomes.is_empty() {
        println!("no refreshable CRLs configured");
        return Ok(());
    }
    let mut failures = 0;
    for outcome in &outcomes {
        let status = if outcome.ok { "ok" } else { "failed" };
        println!("{}: {status}", outcome.url);
        if !outcome.ok {
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{failures} of {} CRL downloads failed", outcomes.len());
    }
    Ok(())
}
