use thiserror::Error;

#[derive(Error, Debug)]
pub enum EquiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Geometry constraint violated: {0}")]
    GeometryViolation(String),

    #[error("Mode table error: mode (m={m}, n={n}) not representable")]
    ModeOutOfRange { m: i64, n: i64 },

    #[error("Linear algebra error: {0}")]
    LinAlg(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EquiResult<T> = Result<T, EquiError>;
