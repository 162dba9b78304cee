use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("outlet \"{name}\" has an invalid {field}: \"{value}\"")]
    InvalidCoordinate {
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("no outlet at index {index} (store holds {len})")]
    UnknownOutlet { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
