use thiserror::Error;

/// Everything that can abort a weather lookup.
///
/// The `Display` text is what the user sees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Город не найден: {0}")]
    CityNotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Parse(String),
}
