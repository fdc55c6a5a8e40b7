//! `vdsnc status` — show anchors and CRL freshness.

use std::path::Path;

use anyhow::Result;

use crate::config::{build_store, load_config};

/// Print each configured anchor, its CRL state, and whether the store is
/// overdue for a refresh.
///
/// # Errors
///
/// Returns an error when the configuration cannot be loaded.
pub fn run_status(trust_path: &Path) -> Result<()> {
    let cfg = load_config(trust_path)?;
    let base_dir = trust_path.parent().unwrap_or_else(|| Path::new("."));
    let store = build_store(&cfg, base_dir)?;

    for csca in store.certificates() {
        let subject = csca
            .parse()
            .ok()
            .and_then(|cert| cert.subject().map(|dn| dn.to_string()))
            .unwrap_or_else(|| "<unparseable>".to_owned());
        let crl = csca.crl();
        let freshness = match (crl.url(), crl.last_downloaded()) {
            (None, _) => "static".to_owned(),
            (Some(_), Some(at)) => format!("downloaded {}", at.to_rfc3339()),
            (Some(_), None) => "never downloaded".to_owned(),
        };
        println!("{subject}\n  sha256: {}\n  crl: {freshness}", csca.sha256());
    }
    println!(
        "store overdue: {}",
        if store.is_overdue() { "yes" } else { "no" }
    );
    Ok(())
}
