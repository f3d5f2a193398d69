use async_trait::async_trait;
use aws_sdk_ec2::types::{Filter, Reservation};
use aws_sdk_ec2::Client as Ec2Client;
use tracing::{debug, info};

use crate::error::SweepError;

/// One running instance from the listing. `fetch_failed` is set by the
/// fetcher when the scp for this instance did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub instance_id: String,
    pub public_ip: Option<String>,
    pub fetch_failed: bool,
}

impl InstanceRecord {
    pub fn new(instance_id: impl Into<String>, public_ip: Option<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            public_ip,
            fetch_failed: false,
        }
    }
}

/// The EC2 surface the pipeline needs, kept behind a trait so the driver
/// can be exercised without an AWS account.
#[async_trait]
pub trait InstanceApi {
    async fn list_by_name(&self, name_tag: &str) -> Result<Vec<InstanceRecord>, SweepError>;
    async fn terminate(&self, instance_ids: &[String]) -> Result<(), SweepError>;
}

pub struct Ec2Api {
    client: Ec2Client,
}

impl Ec2Api {
    pub fn new(client: Ec2Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InstanceApi for Ec2Api {
    /// List running instances whose `Name` tag matches `name_tag`.
    async fn list_by_name(&self, name_tag: &str) -> Result<Vec<InstanceRecord>, SweepError> {
        let resp = self
            .client
            .describe_instances()
            .filters(Filter::builder().name("tag:Name").values(name_tag).build())
            .filters(
                Filter::builder()
                    .name("instance-state-name")
                    .values("running")
                    .build(),
            )
            .send()
            .await
            .map_err(|e| SweepError::Describe(e.to_string()))?;

        let records = records_from_reservations(resp.reservations());
        debug!("DescribeInstances returned {} record(s)", records.len());
        Ok(records)
    }

    async fn terminate(&self, instance_ids: &[String]) -> Result<(), SweepError> {
        let resp = self
            .client
            .terminate_instances()
            .set_instance_ids(Some(instance_ids.to_vec()))
            .send()
            .await
            .map_err(|e| SweepError::Terminate(e.to_string()))?;

        for change in resp.terminating_instances() {
            let id = change.instance_id().unwrap_or("<unknown>");
            let previous = change
                .previous_state()
                .and_then(|s| s.name())
                .map(|n| n.as_str())
                .unwrap_or("?");
            let current = change
                .current_state()
                .and_then(|s| s.name())
                .map(|n| n.as_str())
                .unwrap_or("?");
            info!("{}: {} -> {}", id, previous, current);
        }
        Ok(())
    }
}

/// Flatten `Reservations[].Instances[]` into records. Instances without an
/// id are dropped; a missing public IP is kept as `None` and surfaces later
/// as a fetch failure.
pub fn records_from_reservations(reservations: &[Reservation]) -> Vec<InstanceRecord> {
    reservations
        .iter()
        .flat_map(|res| res.instances())
        .filter_map(|inst| {
            inst.instance_id()
                .map(|id| InstanceRecord::new(id, inst.public_ip_address().map(|ip| ip.to_string())))
        })
        .collect()
}
