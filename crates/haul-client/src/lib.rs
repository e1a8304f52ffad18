#[cfg(feature = "browser")]
pub mod browser;
pub mod snapshot;

#[cfg(feature = "browser")]
pub use browser::{ChromiumRenderer, ChromiumSession};
pub use snapshot::SnapshotParser;
