use thiserror::Error;

/// Errors surfaced by picker configuration.
///
/// Malformed value and bound strings are not errors; they are treated as
/// absent. Only inconsistent configuration is rejected.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Minimum bound {min} is later than maximum bound {max}")]
    InvertedBounds { min: String, max: String },
    #[error("Failed to read picker config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid picker config: {0}")]
    Config(#[from] serde_yaml::Error),
}
