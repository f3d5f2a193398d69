use chrono::Local;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Create the per-run log directory under `root`, named after the instance
/// count. If a previous run left `ips_logs_<count>` behind, fall back to a
/// timestamp-suffixed name so runs never share a directory.
pub fn create_log_directory(root: &Path, instance_count: usize) -> std::io::Result<PathBuf> {
    fs::create_dir_all(root)?;

    let dir = root.join(format!("ips_logs_{}", instance_count));
    match fs::create_dir(&dir) {
        Ok(()) => {
            info!("created log directory {}", dir.display());
            Ok(dir)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            let stamped = root.join(format!(
                "ips_logs_{}_{}",
                instance_count,
                Local::now().format("%d-%m-%Y_%H-%M-%S")
            ));
            fs::create_dir(&stamped)?;
            info!("created log directory {}", stamped.display());
            Ok(stamped)
        }
        Err(e) => Err(e),
    }
}
