use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::ec2::{InstanceApi, InstanceRecord};
use crate::error::SweepError;
use crate::logdir;
use crate::scp::LogFetcher;

/// TerminateInstances accepts at most 1000 ids per call.
pub const TERMINATE_BATCH_LIMIT: usize = 1000;

pub struct SweepOptions {
    pub name_tag: String,
    pub output_root: PathBuf,
    pub keep_failed: bool,
    pub dry_run: bool,
}

pub struct SweepReport {
    pub log_dir: PathBuf,
    pub listed: usize,
    pub fetch_failures: usize,
    pub terminated_ids: Vec<String>,
}

/// Run the whole sweep: list, provision the log directory, fetch each
/// instance's log, terminate. Collaborators are injected so the sequencing
/// and failure accounting can be tested without AWS or a network.
pub async fn run(
    api: &dyn InstanceApi,
    fetcher: &dyn LogFetcher,
    opts: &SweepOptions,
) -> Result<SweepReport, SweepError> {
    let mut records = api.list_by_name(&opts.name_tag).await?;
    info!(
        "found {} running instance(s) with Name tag {:?}",
        records.len(),
        opts.name_tag
    );

    let log_dir = logdir::create_log_directory(&opts.output_root, records.len())?;

    let fetch_failures = fetch_all(fetcher, &mut records, &log_dir).await;
    info!("There was {} error(s) processing the instances", fetch_failures);

    let ids = ids_to_terminate(&records, opts.keep_failed);
    let terminated_ids = if opts.dry_run {
        info!("dry run: leaving {} instance(s) running", ids.len());
        Vec::new()
    } else if ids.is_empty() {
        info!("nothing to terminate");
        Vec::new()
    } else {
        for batch in ids.chunks(TERMINATE_BATCH_LIMIT) {
            info!("terminating {} instance(s)", batch.len());
            api.terminate(batch).await?;
        }
        ids
    };

    Ok(SweepReport {
        log_dir,
        listed: records.len(),
        fetch_failures,
        terminated_ids,
    })
}

/// Fetch every record's log into `log_dir`, marking records whose copy
/// failed. Returns the failure count; failures never abort the loop.
async fn fetch_all(
    fetcher: &dyn LogFetcher,
    records: &mut [InstanceRecord],
    log_dir: &Path,
) -> usize {
    let mut failures = 0;
    for record in records.iter_mut() {
        let outcome = match record.public_ip.as_deref() {
            Some(ip) => fetcher.fetch(ip, log_dir).await,
            None => Err(SweepError::Copy {
                host: record.instance_id.clone(),
                reason: "no public IP address".to_string(),
            }),
        };
        if let Err(e) = outcome {
            warn!("error copying from instance {}: {}", record.instance_id, e);
            record.fetch_failed = true;
            failures += 1;
        }
    }
    failures
}

/// Ids handed to the terminator. The default terminates everything that was
/// listed; `keep_failed` spares instances whose log could not be copied.
pub fn ids_to_terminate(records: &[InstanceRecord], keep_failed: bool) -> Vec<String> {
    records
        .iter()
        .filter(|r| !(keep_failed && r.fetch_failed))
        .map(|r| r.instance_id.clone())
        .collect()
}
