pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod models;
pub mod query;
pub mod rank;
pub mod snapshot;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use classify::classify;
pub use config::LookupConfig;
pub use error::AppError;
pub use lookup::LookupService;
pub use models::{
    ErrorKind, ItemQuery, LookupError, LookupRequest, LookupResponse, LookupResult, SellOffer,
    StarSystem,
};
pub use snapshot::{PageSnapshot, RowSnapshot};
pub use traits::{RenderSession, Renderer};
