use std::path::PathBuf;

/// All domain errors for ordertrail.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum OrderTrailError {
    #[error(
        "File not found: {path}\n\n  \
         Check that the path is correct and the file exists."
    )]
    FileNotFound { path: PathBuf },

    #[error(
        "Parse error in {file}: {detail}\n\n  \
         Expected a JSON order document, e.g. {{\"status\": \"pending\", \"total\": \"10.00\"}}."
    )]
    ParseError { file: PathBuf, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "ordertrail is not initialized in {dir}\n\n  \
         Run 'ordertrail init' first, or point --dir at an existing directory."
    )]
    NotInitialized { dir: PathBuf },

    #[error(
        "Invalid order id '{id}'\n\n  \
         Order ids may only contain letters, digits, '-' and '_'."
    )]
    InvalidRecordId { id: String },

    #[error(
        "Unknown action '{name}'\n\n  \
         Available actions: {available}"
    )]
    UnknownAction { name: String, available: String },

    #[error(
        "Invalid date '{value}'\n\n  \
         Expected ISO 8601 (YYYY-MM-DD), e.g. 2026-01-15"
    )]
    InvalidDate { value: String },

    #[error("Snapshot store error: {detail}")]
    SnapshotError { detail: String },

    #[error("Change log error: {detail}")]
    LogStoreError { detail: String },

    #[error(
        "This project uses format version {project_version}, but this build \
         only supports up to version {supported_version}.\n\n  \
         Update ordertrail to read this directory."
    )]
    FormatVersionTooNew {
        project_version: u32,
        supported_version: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrderTrailError>;
