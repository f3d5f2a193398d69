use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("DescribeInstances failed: {0}")]
    Describe(String),

    #[error("TerminateInstances failed: {0}")]
    Terminate(String),

    #[error("scp to {host} failed: {reason}")]
    Copy { host: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
