pub mod config;
pub mod ec2;
pub mod error;
pub mod logdir;
pub mod scp;
pub mod sweep;

pub use ec2::{Ec2Api, InstanceApi, InstanceRecord};
pub use error::SweepError;
pub use scp::{LogFetcher, ScpFetcher};
pub use sweep::{SweepOptions, SweepReport};
