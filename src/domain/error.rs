//! Domain error types.

/// Top-level error type for tradecheck.
#[derive(Debug, thiserror::Error)]
pub enum TradecheckError {
    #[error("unknown category: {key}")]
    UnknownCategory { key: String },

    #[error("unknown option {code:?} for category {category}")]
    UnknownOption { category: String, code: String },

    #[error("unknown qualifier {qualifier:?} for category {category}")]
    UnknownQualifier { category: String, qualifier: String },

    #[error("invalid date {value:?}, expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("invalid setup {field}: {reason}")]
    InvalidSetup { field: String, reason: String },

    #[error("storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error("export failed: {reason}")]
    ExportFailure { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
