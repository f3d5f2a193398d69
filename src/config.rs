use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_types::region::Region;

pub const DEFAULT_REGION: &str = "eu-central-1";
pub const DEFAULT_IDENTITY_FILE: &str = "~/.ssh/jesus-eu-central-1.pem";
pub const DEFAULT_REMOTE_USER: &str = "ec2-user";
pub const DEFAULT_REMOTE_PATH: &str = "/home/ec2-user/zypper_timeout";

/// Load the SDK config, preferring an explicit region over the default
/// provider chain (profile, env, IMDS).
pub async fn aws_sdk_config(region: Option<String>) -> aws_types::SdkConfig {
    let region_provider =
        RegionProviderChain::first_try(region.map(Region::new)).or_default_provider();

    aws_config::defaults(BehaviorVersion::v2024_03_28())
        .region(region_provider)
        .load()
        .await
}

/// Expand a leading `~` in the identity file path.
pub fn expand_identity_file(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}
