use anyhow::Result;
use aws_sdk_ec2::Client as Ec2Client;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use logsweep::config;
use logsweep::ec2::Ec2Api;
use logsweep::scp::ScpFetcher;
use logsweep::sweep::{self, SweepOptions};

#[derive(Parser)]
#[command(name = "logsweep")]
#[command(about = "Pull log files off tagged EC2 instances, then terminate them")]
struct Cli {
    /// Value of the Name tag to match (running instances only)
    #[arg(long)]
    name: String,

    /// AWS region
    #[arg(long, default_value = config::DEFAULT_REGION)]
    region: String,

    /// SSH identity file passed to scp
    #[arg(long, default_value = config::DEFAULT_IDENTITY_FILE)]
    identity_file: String,

    /// Remote user for scp
    #[arg(long, default_value = config::DEFAULT_REMOTE_USER)]
    remote_user: String,

    /// Remote file to copy from each instance
    #[arg(long, default_value = config::DEFAULT_REMOTE_PATH)]
    remote_path: String,

    /// Directory under which the per-run log directory is created
    #[arg(long, default_value = ".")]
    output_root: PathBuf,

    /// Do not terminate instances whose log copy failed
    #[arg(long)]
    keep_failed: bool,

    /// List and fetch, but terminate nothing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let sdk_config = config::aws_sdk_config(Some(cli.region)).await;
    let api = Ec2Api::new(Ec2Client::new(&sdk_config));

    let fetcher = ScpFetcher {
        identity_file: config::expand_identity_file(&cli.identity_file),
        remote_user: cli.remote_user,
        remote_path: cli.remote_path,
    };

    let opts = SweepOptions {
        name_tag: cli.name,
        output_root: cli.output_root,
        keep_failed: cli.keep_failed,
        dry_run: cli.dry_run,
    };

    let report = sweep::run(&api, &fetcher, &opts).await?;

    info!(
        "logs from {} instance(s) copied to {} ({} failure(s)); {} instance(s) terminated",
        report.listed,
        report.log_dir.display(),
        report.fetch_failures,
        report.terminated_ids.len()
    );

    Ok(())
}
