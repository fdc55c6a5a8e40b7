use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vdsnc", about = "VDS-NC seal verifier")]
struct Cli {
    /// Path to the trust configuration file.
    #[arg(long, default_value = "trust.toml")]
    trust: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a seal JSON file against the configured trust anchors
    Verify { vds_file: PathBuf },
    /// Download fresh CRLs for every configured URL
    Refresh,
    /// Show trust anchors and CRL freshness
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Verify { vds_file } => {
            vdsnc_cli::commands::verify::run_verify(&cli.trust, &vds_file)?;
        }
        Commands::Refresh => {
            vdsnc_cli::commands::refresh::run_refresh(&cli.trust).await?;
        }
        Commands::Status => {
            vdsnc_cli::commands::status::run_status(&cli.trust)?;
        }
    }
    Ok(())
}
