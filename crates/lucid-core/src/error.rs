/// Registry errors.
///
/// Every operation that fails with one of these has no partial effects.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate credential: {0}")]
    DuplicateCredential(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("unknown identity: {0}")]
    UnknownIdentity(String),

    #[error("need at least 2 ids to link, got {0}")]
    InsufficientOperands(usize),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RegistryError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateCredential(_) => "DuplicateCredential",
            Self::InvalidAddress(_) => "InvalidAddress",
            Self::InvalidCredential(_) => "InvalidCredential",
            Self::UnknownIdentity(_) => "UnknownIdentity",
            Self::InsufficientOperands(_) => "InsufficientOperands",
            Self::Storage(_) => "Storage",
            Self::Serialization(_) => "Serialization",
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
