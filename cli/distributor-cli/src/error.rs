use thiserror::Error;

/// Failures raised while building or reading a distribution.
///
/// A proof that does not verify is not an error; the verifiers return
/// `false` for that case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    #[error("cannot build a Merkle tree from zero leaves")]
    EmptyTree,

    #[error("leaf {0} is not part of the tree")]
    LeafNotFound(String),

    #[error("account {0} appears more than once")]
    DuplicateAccount(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl DistributionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DistributionError>;
