use thiserror::Error;

/// Application-wide error types for Haul.
///
/// Each variant is raised at the point where the failure happens, so the
/// classifier can tell failure modes apart without inspecting messages.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request carried no usable item name.
    #[error("Missing item name")]
    MissingItemName,

    /// The requested quantity is negative, infinite, or not a number.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The results page explicitly reported that nothing matched.
    #[error("No results for item '{0}'")]
    ItemNotFound(String),

    /// The page loaded but no row matched the extraction heuristics.
    #[error("Parsing error: {0}")]
    ParsingError(String),

    /// Navigation did not settle within the allotted time.
    #[error("Navigation timed out after {0} seconds")]
    Timeout(u64),

    /// Navigation failed (DNS, connection refused, aborted load).
    #[error("Navigation failed: {0}")]
    NavigationError(String),

    /// The rendering engine could not be launched or driven.
    #[error("Browser error: {0}")]
    BrowserError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
