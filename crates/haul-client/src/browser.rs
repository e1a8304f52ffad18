use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use haul_core::config::DEFAULT_NAVIGATION_TIMEOUT;
use haul_core::error::AppError;
use haul_core::snapshot::PageSnapshot;
use haul_core::traits::{RenderSession, Renderer};
use tokio::task::JoinHandle;

use crate::snapshot::SnapshotParser;

/// Upper bound for the Chromium process to exit once asked to.
const REAP_TIMEOUT: Duration = Duration::from_secs(10);

/// Headless-browser renderer using Chromium via the Chrome DevTools Protocol.
///
/// Every [`Renderer::launch`] starts a dedicated Chromium process, so each
/// lookup owns its session outright and nothing is shared between
/// concurrent lookups. The process is shut down by [`RenderSession::close`].
///
/// # Example
///
/// ```rust,no_run
/// use haul_client::ChromiumRenderer;
/// use haul_core::{LookupRequest, LookupService};
///
/// # async fn run() {
/// let service = LookupService::new(ChromiumRenderer::new());
/// match service.lookup_best_seller(&LookupRequest::new("Quartz", 12.0)).await {
///     Ok(result) => println!("{}", result.message),
///     Err(err) => eprintln!("{}", err.message),
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct ChromiumRenderer {
    executable: Option<PathBuf>,
    request_timeout: Duration,
    parser: SnapshotParser,
}

impl Default for ChromiumRenderer {
    fn default() -> Self {
        Self {
            executable: None,
            request_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            parser: SnapshotParser::new(),
        }
    }
}

impl ChromiumRenderer {
    /// Renderer that locates Chrome/Chromium on first launch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that always launches the given binary.
    pub fn with_executable(path: impl Into<PathBuf>) -> Self {
        Self {
            executable: Some(path.into()),
            ..Self::default()
        }
    }

    /// Timeout for individual CDP commands, navigation included.
    ///
    /// Must not be shorter than the navigation timeout handed to
    /// [`RenderSession::goto`], or CDP gives up first.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn browser_config(&self) -> Result<BrowserConfig, AppError> {
        let mut builder = BrowserConfig::builder();
        builder = builder.no_sandbox().disable_default_args();

        // Snap-packaged Chromium exposes a wrapper that rejects standard
        // Chrome CLI flags (--headless, --disable-gpu, …), so the real
        // binary inside the snap is preferred when present.
        if let Some(bin) = self.executable.clone().or_else(find_chrome_binary) {
            tracing::info!("Using Chrome binary: {}", bin.display());
            builder = builder.chrome_executable(bin);
        }

        builder
            .request_timeout(self.request_timeout)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-extensions")
            .arg("--disable-popup-blocking")
            .arg("--disable-translate")
            .arg("--no-first-run")
            .build()
            .map_err(|e| AppError::BrowserError(format!("Browser config error: {e}")))
    }
}

/// Tries to locate the real Chrome/Chromium binary.
///
/// `CHROME_BIN` wins when it points at an existing file; otherwise the snap
/// binary and well-known system paths are probed. `None` lets
/// `chromiumoxide` do its own lookup.
fn find_chrome_binary() -> Option<PathBuf> {
    let candidates: &[&str] = &[
        // Snap (Ubuntu default)
        "/snap/chromium/current/usr/lib/chromium-browser/chrome",
        // Flatpak
        "/var/lib/flatpak/exports/bin/org.chromium.Chromium",
        // Common apt / manual installs
        "/usr/bin/google-chrome-stable",
        "/usr/bin/google-chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
    ];

    if let Ok(p) = std::env::var("CHROME_BIN") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}

impl Renderer for ChromiumRenderer {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession, AppError> {
        let config = self.browser_config()?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AppError::BrowserError(format!("Failed to launch browser: {e}")))?;

        // The CDP handler must be polled continuously for the connection to work.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::warn!("Browser CDP handler error: {event:?}");
                    break;
                }
            }
        });

        Ok(ChromiumSession {
            browser,
            handler,
            page: None,
            parser: self.parser.clone(),
        })
    }
}

/// One Chromium process with at most one open tab.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Option<Page>,
    parser: SnapshotParser,
}

impl ChromiumSession {
    fn page(&self) -> Result<&Page, AppError> {
        self.page
            .as_ref()
            .ok_or_else(|| AppError::BrowserError("No page open in session".into()))
    }
}

impl RenderSession for ChromiumSession {
    async fn new_page(&mut self) -> Result<(), AppError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::BrowserError(format!("Failed to open page: {e}")))?;
        self.page = Some(page);
        Ok(())
    }

    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), AppError> {
        let page = self.page()?;

        let result = tokio::time::timeout(timeout, async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<(), CdpError>(())
        })
        .await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(goto_error(e, url, timeout)),
            Err(_) => Err(AppError::Timeout(timeout.as_secs())),
        }
    }

    async fn snapshot(&mut self) -> Result<PageSnapshot, AppError> {
        let html = self
            .page()?
            .content()
            .await
            .map_err(|e| AppError::BrowserError(format!("Failed to read page content: {e}")))?;
        tracing::info!("Rendered {} bytes of HTML", html.len());
        Ok(self.parser.parse(&html))
    }

    async fn close(mut self) -> Result<(), AppError> {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::warn!("Failed to close page: {e}");
            }
        }

        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| AppError::BrowserError(format!("Failed to close browser: {e}")));

        // Without a CDP connection the close request never reaches Chromium.
        if closed.is_err() {
            self.kill().await;
        }
        let reaped = tokio::time::timeout(REAP_TIMEOUT, self.browser.wait()).await;
        match reaped {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!("Failed to reap browser process: {e}"),
            Err(_) => {
                tracing::warn!("Browser did not exit within {REAP_TIMEOUT:?}, killing it");
                self.kill().await;
            }
        }
        self.handler.abort();

        closed
    }
}

impl ChromiumSession {
    async fn kill(&mut self) {
        if let Some(Err(e)) = self.browser.kill().await {
            tracing::warn!("Failed to kill browser process: {e}");
        }
    }
}

/// Maps a CDP failure during `goto` onto the lookup's failure modes.
///
/// Only an error reported by Chrome for the navigation itself is a
/// navigation failure; transport and protocol errors are browser errors.
fn goto_error(err: CdpError, url: &str, timeout: Duration) -> AppError {
    match err {
        CdpError::Timeout => AppError::Timeout(timeout.as_secs()),
        CdpError::ChromeMessage(reason) => {
            AppError::NavigationError(format!("Failed to navigate to {url}: {reason}"))
        }
        other => AppError::BrowserError(format!("Browser failed while loading {url}: {other}")),
    }
}
