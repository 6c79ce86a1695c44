use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeomError {
    #[error("polygon needs between 3 and 1024 sides, got {sides}")]
    InvalidSides { sides: u32 },
    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown handle '{0}'")]
    UnknownHandle(String),
    #[error("duplicate handle '{0}'")]
    DuplicateHandle(String),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl GeomError {
    /// Stable machine-readable code, shared with the JS error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            GeomError::InvalidSides { .. } => "invalid_shape",
            GeomError::NonFinite { .. } => "non_finite",
            GeomError::InvalidConfig(_) | GeomError::Config(_) => "invalid_config",
            GeomError::UnknownHandle(_) => "invalid_id",
            GeomError::DuplicateHandle(_) => "duplicate_id",
        }
    }
}
