use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use crate::error::SweepError;

/// Pulls the remote log file for a single instance into `dest_dir`.
#[async_trait]
pub trait LogFetcher {
    async fn fetch(&self, public_ip: &str, dest_dir: &Path) -> Result<(), SweepError>;
}

/// Shells out to the system `scp` binary with key auth and host-key
/// checking disabled, the way the instances are provisioned for.
pub struct ScpFetcher {
    pub identity_file: String,
    pub remote_user: String,
    pub remote_path: String,
}

/// Build the scp argv for one instance. The destination file inside
/// `dest_dir` is named after the instance's public IP.
pub fn scp_args(
    identity_file: &str,
    remote_user: &str,
    remote_path: &str,
    public_ip: &str,
    dest_dir: &Path,
) -> Vec<String> {
    vec![
        "-i".to_string(),
        identity_file.to_string(),
        "-o".to_string(),
        "StrictHostKeyChecking=no".to_string(),
        format!("{}@{}:{}", remote_user, public_ip, remote_path),
        dest_dir.join(public_ip).to_string_lossy().into_owned(),
    ]
}

#[async_trait]
impl LogFetcher for ScpFetcher {
    async fn fetch(&self, public_ip: &str, dest_dir: &Path) -> Result<(), SweepError> {
        let args = scp_args(
            &self.identity_file,
            &self.remote_user,
            &self.remote_path,
            public_ip,
            dest_dir,
        );
        info!("scp {}", args.join(" "));

        // scp's own output goes straight to the operator's terminal.
        let status = Command::new("scp")
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| SweepError::Copy {
                host: public_ip.to_string(),
                reason: format!("spawn scp: {}", e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SweepError::Copy {
                host: public_ip.to_string(),
                reason: format!("exit status {}", status.code().unwrap_or(-1)),
            })
        }
    }
}
