use crate::error::AppError;
use crate::models::{ErrorKind, LookupError};

impl From<&AppError> for ErrorKind {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::MissingItemName => ErrorKind::MissingItemName,
            AppError::InvalidQuantity(_) => ErrorKind::InvalidQuantity,
            AppError::ItemNotFound(_) => ErrorKind::ItemNotFound,
            AppError::ParsingError(_) => ErrorKind::ParsingError,
            AppError::Timeout(_) => ErrorKind::TimeoutError,
            AppError::NavigationError(_) => ErrorKind::NavigationError,
            AppError::BrowserError(_)
            | AppError::SerializationError(_)
            | AppError::ConfigError(_) => ErrorKind::UnknownError,
        }
    }
}

/// Turn an internal failure into the user-facing error for `item_name`.
///
/// Only [`ErrorKind::UnknownError`] carries the raw failure as `details`.
pub fn classify(err: &AppError, item_name: &str) -> LookupError {
    let kind = ErrorKind::from(err);
    let message = match kind {
        ErrorKind::MissingItemName => {
            "Please provide the name of the item you want to sell.".to_string()
        }
        ErrorKind::InvalidQuantity => "Quantity must be a non-negative number.".to_string(),
        ErrorKind::ItemNotFound => format!(
            "I couldn't find any places to sell \"{item_name}\". Please verify that this is a valid commodity in Star Citizen."
        ),
        ErrorKind::ParsingError => format!(
            "I found the page for \"{item_name}\", but couldn't extract the sell locations. Please try again."
        ),
        ErrorKind::TimeoutError => format!(
            "The request timed out while searching for \"{item_name}\". The SC Trade Tools website might be slow or unavailable."
        ),
        ErrorKind::NavigationError => "Couldn't connect to SC Trade Tools. Please check your internet connection and try again.".to_string(),
        ErrorKind::UnknownError => format!(
            "I couldn't find the best places to sell {item_name}. Please check if the item name is correct or try again later."
        ),
    };

    LookupError {
        error: kind,
        message,
        details: (kind == ErrorKind::UnknownError).then(|| err.to_string()),
    }
}
