use thiserror::Error;

/// Rejected hero options or tuning values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid range for {name}: min {min} > max {max}")]
    InvalidRange { name: &'static str, min: f64, max: f64 },

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("malformed hero options: {0}")]
    Json(#[from] serde_json::Error),
}
