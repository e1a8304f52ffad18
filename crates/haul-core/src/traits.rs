use std::future::Future;
use std::time::Duration;

use crate::error::AppError;
use crate::snapshot::PageSnapshot;

/// Launches rendering sessions capable of executing page scripts.
pub trait Renderer: Send + Sync + Clone {
    type Session: RenderSession;

    /// Start a fresh, exclusively owned session.
    fn launch(&self) -> impl Future<Output = Result<Self::Session, AppError>> + Send;
}

/// A live rendering session (browser process plus at most one page).
///
/// Callers must finish every session with [`RenderSession::close`], which
/// consumes it, so a session cannot be closed twice.
pub trait RenderSession: Send {
    /// Open the page that subsequent calls operate on.
    fn new_page(&mut self) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Navigate and wait for the load to settle.
    ///
    /// Must report [`AppError::Timeout`] when `timeout` elapses and
    /// [`AppError::NavigationError`] when the page cannot be reached.
    fn goto(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Evaluate the current page into a plain-data snapshot.
    fn snapshot(&mut self) -> impl Future<Output = Result<PageSnapshot, AppError>> + Send;

    /// Release the page and the session.
    fn close(self) -> impl Future<Output = Result<(), AppError>> + Send;
}
