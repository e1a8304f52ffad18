use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// Container sizes (in SCU) assumed when a row exposes no size buttons.
pub const DEFAULT_CONTAINER_SIZES: [u32; 6] = [1, 2, 4, 8, 16, 32];

/// Star systems the results page may name as a location boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarSystem {
    Stanton,
    Pyro,
}

impl StarSystem {
    /// Every recognised system. Adding a region means adding it here.
    pub const ALL: [StarSystem; 2] = [StarSystem::Stanton, StarSystem::Pyro];

    pub fn as_str(&self) -> &'static str {
        match self {
            StarSystem::Stanton => "Stanton",
            StarSystem::Pyro => "Pyro",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for StarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incoming lookup request as it arrives on the wire.
///
/// Deserialization is lenient: a missing, null, or non-string item name
/// becomes an empty string and a non-numeric quantity becomes `NaN`, so that
/// both are reported through [`LookupRequest::validate`] instead of a decode
/// error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[serde(default, deserialize_with = "lenient_item_name")]
    pub item_name: String,
    #[serde(
        default,
        deserialize_with = "lenient_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<f64>,
}

impl LookupRequest {
    pub fn new(item_name: impl Into<String>, quantity: f64) -> Self {
        Self {
            item_name: item_name.into(),
            quantity: Some(quantity),
        }
    }

    /// A request for the default quantity of one SCU.
    pub fn item(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            quantity: None,
        }
    }

    /// Check the request and produce the query the pipeline works with.
    pub fn validate(&self) -> Result<ItemQuery, AppError> {
        let item_name = self.item_name.trim();
        if item_name.is_empty() {
            return Err(AppError::MissingItemName);
        }

        let quantity = self.quantity.unwrap_or(1.0);
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(AppError::InvalidQuantity(quantity.to_string()));
        }

        Ok(ItemQuery {
            item_name: item_name.to_string(),
            quantity,
        })
    }
}

fn lenient_item_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(name)) => name,
        _ => String::new(),
    })
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

/// A validated lookup: trimmed, non-empty item name and a finite,
/// non-negative quantity in SCU.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemQuery {
    pub item_name: String,
    pub quantity: f64,
}

/// One place that buys the item, as parsed from a results row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellOffer {
    pub shop: String,
    /// Serialized as the system name, or `""` when the row named none.
    #[serde(serialize_with = "system_or_empty", deserialize_with = "system_from_str")]
    pub system: Option<StarSystem>,
    pub location: String,
    /// Price per SCU in UEC.
    pub price: u64,
    pub container_sizes: Vec<u32>,
}

fn system_or_empty<S>(system: &Option<StarSystem>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(system.map(|s| s.as_str()).unwrap_or(""))
}

fn system_from_str<'de, D>(deserializer: D) -> Result<Option<StarSystem>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(StarSystem::from_name(&name))
}

/// Successful lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub item: String,
    pub quantity: f64,
    pub best_sell_locations: Vec<SellOffer>,
    /// Best price multiplied by the quantity, rounded to whole UEC.
    pub total_profit: u64,
    pub message: String,
    pub container_size_options: Vec<u32>,
}

/// Closed set of failure categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingItemName,
    InvalidQuantity,
    ItemNotFound,
    ParsingError,
    TimeoutError,
    NavigationError,
    UnknownError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingItemName => "missing_item_name",
            ErrorKind::InvalidQuantity => "invalid_quantity",
            ErrorKind::ItemNotFound => "item_not_found",
            ErrorKind::ParsingError => "parsing_error",
            ErrorKind::TimeoutError => "timeout_error",
            ErrorKind::NavigationError => "navigation_error",
            ErrorKind::UnknownError => "unknown_error",
        }
    }

    /// Returns true for kinds raised before any network access.
    pub fn is_validation(&self) -> bool {
        matches!(self, ErrorKind::MissingItemName | ErrorKind::InvalidQuantity)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed lookup, shaped for display to an end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupError {
    pub error: ErrorKind,
    pub message: String,
    /// Raw diagnostic text; only present for [`ErrorKind::UnknownError`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for LookupError {}

/// Either outcome of a lookup, serialized as the bare result or error object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LookupResponse {
    Found(LookupResult),
    Failed(LookupError),
}

impl From<Result<LookupResult, LookupError>> for LookupResponse {
    fn from(outcome: Result<LookupResult, LookupError>) -> Self {
        match outcome {
            Ok(result) => LookupResponse::Found(result),
            Err(error) => LookupResponse::Failed(error),
        }
    }
}
