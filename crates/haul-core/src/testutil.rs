//! Test utilities: mock implementations of the rendering traits.
//!
//! Handwritten mocks for dependency injection in unit and integration tests.
//! Every session handed out by a [`MockRenderer`] shares one recorder, so
//! tests can assert on launches, visited URLs, and close calls after the
//! session itself has been consumed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::LookupConfig;
use crate::error::AppError;
use crate::snapshot::PageSnapshot;
use crate::traits::{RenderSession, Renderer};

/// Config pointing at a fake host with no settle delay.
pub fn test_config() -> LookupConfig {
    LookupConfig {
        base_url: "https://trade.test/best-buyer".to_string(),
        navigation_timeout: Duration::from_secs(60),
        settle_delay: Duration::ZERO,
    }
}

#[derive(Default)]
struct Recorder {
    launches: usize,
    pages_opened: usize,
    visits: Vec<(String, Duration)>,
    closes: usize,
}

#[derive(Default)]
struct Script {
    launch_error: Option<AppError>,
    goto_error: Option<AppError>,
    snapshot: Option<Result<PageSnapshot, AppError>>,
    close_error: Option<AppError>,
}

// ---------------------------------------------------------------------------
// MockRenderer
// ---------------------------------------------------------------------------

/// Mock renderer whose sessions replay a scripted outcome.
///
/// Scripted errors are consumed by the first call that hits them.
#[derive(Clone, Default)]
pub struct MockRenderer {
    script: Arc<Mutex<Script>>,
    recorder: Arc<Mutex<Recorder>>,
}

impl MockRenderer {
    /// Sessions navigate successfully and render `snapshot`.
    pub fn with_snapshot(snapshot: PageSnapshot) -> Self {
        Self::scripted(Script {
            snapshot: Some(Ok(snapshot)),
            ..Default::default()
        })
    }

    pub fn with_launch_error(error: AppError) -> Self {
        Self::scripted(Script {
            launch_error: Some(error),
            ..Default::default()
        })
    }

    pub fn with_goto_error(error: AppError) -> Self {
        Self::scripted(Script {
            goto_error: Some(error),
            ..Default::default()
        })
    }

    pub fn with_snapshot_error(error: AppError) -> Self {
        Self::scripted(Script {
            snapshot: Some(Err(error)),
            ..Default::default()
        })
    }

    /// Make the next `close` call fail after recording it.
    pub fn failing_close(self, error: AppError) -> Self {
        self.script.lock().unwrap().close_error = Some(error);
        self
    }

    fn scripted(script: Script) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
            recorder: Arc::new(Mutex::new(Recorder::default())),
        }
    }

    pub fn launch_count(&self) -> usize {
        self.recorder.lock().unwrap().launches
    }

    pub fn pages_opened(&self) -> usize {
        self.recorder.lock().unwrap().pages_opened
    }

    pub fn close_count(&self) -> usize {
        self.recorder.lock().unwrap().closes
    }

    /// URLs passed to `goto`, with the timeout each was given.
    pub fn visits(&self) -> Vec<(String, Duration)> {
        self.recorder.lock().unwrap().visits.clone()
    }
}

impl Renderer for MockRenderer {
    type Session = MockSession;

    async fn launch(&self) -> Result<MockSession, AppError> {
        self.recorder.lock().unwrap().launches += 1;
        if let Some(e) = self.script.lock().unwrap().launch_error.take() {
            return Err(e);
        }
        Ok(MockSession {
            script: Arc::clone(&self.script),
            recorder: Arc::clone(&self.recorder),
        })
    }
}

// ---------------------------------------------------------------------------
// MockSession
// ---------------------------------------------------------------------------

/// Session handed out by [`MockRenderer`].
pub struct MockSession {
    script: Arc<Mutex<Script>>,
    recorder: Arc<Mutex<Recorder>>,
}

impl RenderSession for MockSession {
    async fn new_page(&mut self) -> Result<(), AppError> {
        self.recorder.lock().unwrap().pages_opened += 1;
        Ok(())
    }

    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), AppError> {
        self.recorder
            .lock()
            .unwrap()
            .visits
            .push((url.to_string(), timeout));
        match self.script.lock().unwrap().goto_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn snapshot(&mut self) -> Result<PageSnapshot, AppError> {
        let mut script = self.script.lock().unwrap();
        match script.snapshot.take() {
            Some(Ok(page)) => {
                script.snapshot = Some(Ok(page.clone()));
                Ok(page)
            }
            Some(Err(e)) => Err(e),
            None => Ok(PageSnapshot::default()),
        }
    }

    async fn close(self) -> Result<(), AppError> {
        self.recorder.lock().unwrap().closes += 1;
        match self.script.lock().unwrap().close_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
