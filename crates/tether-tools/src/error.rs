//! Error types for the tether-tools crate.

/// Errors that can occur while building or invoking tool placeholders.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// No prebuilt tool with this name
    #[error("Unknown prebuilt tool: {0}")]
    UnknownPrebuilt(String),

    /// Invalid parameters passed to tool
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
