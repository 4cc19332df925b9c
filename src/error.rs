//! Error type for forecasting and workbook I/O.

use thiserror::Error;

/// Errors surfaced by loading, forecasting, and reporting.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Team '{team}' plans unknown feature '{feature}'")]
    UnknownFeature { team: String, feature: String },

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Team '{team}' has unusable week capacity {capacity}")]
    InvalidCapacity { team: String, capacity: f64 },

    #[error("Team '{team}' has invalid effort {efforts} for feature '{feature}'")]
    NegativeEffort {
        team: String,
        feature: String,
        efforts: f64,
    },

    #[error("Invalid forecast options: {0}")]
    InvalidOptions(String),

    #[error("Week number overflow while scheduling team '{0}'")]
    WeekOverflow(String),

    #[error("Input validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("Workbook sheet not found: {0}")]
    MissingSheet(String),

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ForecastError>;
