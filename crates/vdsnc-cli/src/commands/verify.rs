//! `vdsnc verify <file>` — run the verification pipeline over one seal.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use vdsnc_core::decode_vds;

use crate::config::{build_store, load_config};

/// Verify the seal in `vds_file` against the trust configuration at
/// `trust_path`. Exits through an error (and a non-zero status) when any
/// check fails.
///
/// # Errors
///
/// Returns an error when configuration or input loading fails, or with
/// the verification failure reason.
pub fn run_verify(trust_path: &Path, vds_file: &Path) -> Result<()> {
    let cfg = load_config(trust_path)?;
    let base_dir = trust_path.parent().unwrap_or_else(|| Path::new("."));
    let store = build_store(&cfg, base_dir)?;

    let text = std::fs::read_to_string(vds_file)
        .with_context(|| format!("reading seal {}", vds_file.display()))?;
    let vds = decode_vds(&text)?;
    info!(
        "verifying {} seal issued by {}",
        vds.data.hdr.t, vds.data.hdr.issuing_country
    );

    vdsnc_verifier::verify(&vds, &store)?;
    println!("seal verified");
    Ok(())
}
