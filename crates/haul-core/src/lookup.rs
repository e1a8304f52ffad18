use crate::classify::classify;
use crate::config::LookupConfig;
use crate::error::AppError;
use crate::extract::{extract_offers, shows_no_results};
use crate::models::{ItemQuery, LookupError, LookupRequest, LookupResult};
use crate::query::encode_query_url;
use crate::rank::{build_result, is_price_descending};
use crate::traits::{RenderSession, Renderer};

/// Orchestrates a lookup: validate → encode → render → detect → extract → rank.
///
/// Generic over the rendering engine, so tests run the whole pipeline
/// against a mock session without a browser.
pub struct LookupService<R>
where
    R: Renderer,
{
    renderer: R,
    config: LookupConfig,
}

impl<R> LookupService<R>
where
    R: Renderer,
{
    pub fn new(renderer: R) -> Self {
        Self::with_config(renderer, LookupConfig::default())
    }

    pub fn with_config(renderer: R, config: LookupConfig) -> Self {
        Self { renderer, config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Find where an item sells best and what the quantity would earn.
    ///
    /// Every failure is classified into a [`LookupError`]. Validation
    /// failures return before a session is launched; once launched, the
    /// session is closed exactly once whatever the outcome.
    pub async fn lookup_best_seller(
        &self,
        request: &LookupRequest,
    ) -> Result<LookupResult, LookupError> {
        let query = request.validate().map_err(|e| {
            tracing::info!(error = %e, "Rejected lookup request");
            classify(&e, request.item_name.trim())
        })?;

        let url = encode_query_url(&self.config.base_url, &query.item_name, query.quantity)
            .map_err(|e| classify(&e, &query.item_name))?;

        tracing::info!(item = %query.item_name, quantity = query.quantity, "Launching renderer");
        let mut session = self.renderer.launch().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to launch renderer");
            classify(&e, &query.item_name)
        })?;

        let outcome = self.run(&mut session, &url, &query).await;

        if let Err(e) = session.close().await {
            tracing::warn!(error = %e, "Failed to close rendering session");
        }

        outcome.map_err(|e| {
            let classified = classify(&e, &query.item_name);
            tracing::info!(kind = %classified.error, error = %e, "Lookup failed");
            classified
        })
    }

    async fn run(
        &self,
        session: &mut R::Session,
        url: &str,
        query: &ItemQuery,
    ) -> Result<LookupResult, AppError> {
        // 1. Fetch
        session.new_page().await?;
        tracing::info!("Navigating to {}", url);
        session.goto(url, self.config.navigation_timeout).await?;
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }

        // 2. Snapshot
        let page = session.snapshot().await?;
        tracing::info!(
            "Captured {} candidate rows ({} bytes of text)",
            page.rows.len(),
            page.body_text.len()
        );

        // 3. No-results check
        if shows_no_results(&page) {
            return Err(AppError::ItemNotFound(query.item_name.clone()));
        }

        // 4. Extract
        let offers = extract_offers(&page)?;
        if !is_price_descending(&offers) {
            tracing::debug!(
                prices = ?offers.iter().map(|o| o.price).collect::<Vec<_>>(),
                "Site order is not price-descending; keeping it as-is"
            );
        }

        // 5. Rank
        let result = build_result(query, offers)?;
        tracing::info!(
            offers = result.best_sell_locations.len(),
            total_profit = result.total_profit,
            "Lookup complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::{ErrorKind, StarSystem};
    use crate::snapshot::{PageSnapshot, RowSnapshot};
    use crate::testutil::*;

    fn service(renderer: MockRenderer) -> LookupService<MockRenderer> {
        LookupService::with_config(renderer, test_config())
    }

    fn quartz_page() -> PageSnapshot {
        PageSnapshot::from_rows(vec![
            RowSnapshot::header("Shop Location Price (UEC)"),
            RowSnapshot::new("Some Shop Stanton > Area18 ¤50 UEC"),
        ])
    }

    #[tokio::test]
    async fn single_offer_is_parsed() {
        let renderer = MockRenderer::with_snapshot(quartz_page());
        let svc = service(renderer.clone());

        let result = svc
            .lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
            .await
            .unwrap();

        let best = &result.best_sell_locations[0];
        assert_eq!(best.shop, "Some Shop");
        assert_eq!(best.system, Some(StarSystem::Stanton));
        assert_eq!(best.location, "Area18");
        assert_eq!(best.price, 50);
        assert_eq!(best.container_sizes, vec![1, 2, 4, 8, 16, 32]);
        assert_eq!(result.total_profit, 50);
        assert_eq!(result.container_size_options, vec![1, 2, 4, 8, 16, 32]);
        assert_eq!(renderer.close_count(), 1);
    }

    #[tokio::test]
    async fn no_results_page_is_item_not_found() {
        let renderer = MockRenderer::with_snapshot(PageSnapshot::text_only(
            "Best buyers\nNo results found",
        ));
        let svc = service(renderer.clone());

        let err = svc
            .lookup_best_seller(&LookupRequest::new("Unobtainium", 1.0))
            .await
            .unwrap_err();

        assert_eq!(err.error, ErrorKind::ItemNotFound);
        assert!(err.message.contains("Unobtainium"));
        assert_eq!(renderer.close_count(), 1);
    }

    #[tokio::test]
    async fn unrecognised_page_is_parsing_error() {
        let renderer = MockRenderer::with_snapshot(PageSnapshot::from_rows(vec![
            RowSnapshot::new("Welcome to the trade tools"),
            RowSnapshot::new("Use the filters to see different results UEC"),
        ]));
        let svc = service(renderer.clone());

        let err = svc
            .lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
            .await
            .unwrap_err();

        assert_eq!(err.error, ErrorKind::ParsingError);
        assert_eq!(renderer.close_count(), 1);
    }

    #[tokio::test]
    async fn navigation_timeout_is_classified() {
        let renderer = MockRenderer::with_goto_error(AppError::Timeout(60));
        let svc = service(renderer.clone());

        let err = svc
            .lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
            .await
            .unwrap_err();

        assert_eq!(err.error, ErrorKind::TimeoutError);
        assert_eq!(renderer.close_count(), 1);
    }

    #[tokio::test]
    async fn navigation_failure_is_classified() {
        let renderer = MockRenderer::with_goto_error(AppError::NavigationError(
            "net::ERR_NAME_NOT_RESOLVED".into(),
        ));
        let svc = service(renderer.clone());

        let err = svc
            .lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
            .await
            .unwrap_err();

        assert_eq!(err.error, ErrorKind::NavigationError);
        assert_eq!(renderer.close_count(), 1);
    }

    #[tokio::test]
    async fn snapshot_failure_is_unknown_with_details() {
        let renderer =
            MockRenderer::with_snapshot_error(AppError::BrowserError("target crashed".into()));
        let svc = service(renderer.clone());

        let err = svc
            .lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
            .await
            .unwrap_err();

        assert_eq!(err.error, ErrorKind::UnknownError);
        assert!(err.details.unwrap().contains("target crashed"));
        assert_eq!(renderer.close_count(), 1);
    }

    #[tokio::test]
    async fn close_failure_does_not_mask_result() {
        let renderer = MockRenderer::with_snapshot(quartz_page())
            .failing_close(AppError::BrowserError("already gone".into()));
        let svc = service(renderer.clone());

        let result = svc
            .lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
            .await;

        assert!(result.is_ok());
        assert_eq!(renderer.close_count(), 1);
    }

    #[tokio::test]
    async fn launch_failure_is_unknown_and_nothing_to_close() {
        let renderer = MockRenderer::with_launch_error(AppError::BrowserError(
            "chrome not found".into(),
        ));
        let svc = service(renderer.clone());

        let err = svc
            .lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
            .await
            .unwrap_err();

        assert_eq!(err.error, ErrorKind::UnknownError);
        assert_eq!(renderer.close_count(), 0);
    }

    #[tokio::test]
    async fn missing_item_never_launches() {
        let renderer = MockRenderer::with_snapshot(quartz_page());
        let svc = service(renderer.clone());

        let err = svc
            .lookup_best_seller(&LookupRequest::new("  ", 1.0))
            .await
            .unwrap_err();

        assert_eq!(err.error, ErrorKind::MissingItemName);
        assert_eq!(renderer.launch_count(), 0);
    }

    #[tokio::test]
    async fn invalid_quantity_never_launches() {
        let renderer = MockRenderer::with_snapshot(quartz_page());
        let svc = service(renderer.clone());

        for quantity in [-1.0, f64::NAN] {
            let err = svc
                .lookup_best_seller(&LookupRequest::new("Quartz", quantity))
                .await
                .unwrap_err();
            assert_eq!(err.error, ErrorKind::InvalidQuantity);
        }
        assert_eq!(renderer.launch_count(), 0);
    }

    #[tokio::test]
    async fn visits_encoded_url_with_configured_timeout() {
        let renderer = MockRenderer::with_snapshot(quartz_page());
        let config = test_config().with_navigation_timeout(Duration::from_secs(7));
        let svc = LookupService::with_config(renderer.clone(), config);

        svc.lookup_best_seller(&LookupRequest::new("Quartz", 5.0))
            .await
            .unwrap();

        let visits = renderer.visits();
        assert_eq!(visits.len(), 1);
        assert_eq!(
            visits[0].0,
            encode_query_url(&svc.config().base_url, "Quartz", 5.0).unwrap()
        );
        assert_eq!(visits[0].1, Duration::from_secs(7));
        assert_eq!(renderer.pages_opened(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_settle_delay_before_snapshot() {
        let renderer = MockRenderer::with_snapshot(quartz_page());
        let config = test_config().with_settle_delay(Duration::from_secs(5));
        let svc = LookupService::with_config(renderer, config);

        let started = tokio::time::Instant::now();
        svc.lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test]
    async fn profit_scales_with_quantity() {
        let renderer = MockRenderer::with_snapshot(PageSnapshot::from_rows(vec![
            RowSnapshot::new("Top Buyer Pyro > Checkmate ¤120 UEC"),
            RowSnapshot::new("Runner Up Stanton ¤110 UEC"),
        ]));
        let svc = service(renderer);

        let result = svc
            .lookup_best_seller(&LookupRequest::new("Laranite", 5.0))
            .await
            .unwrap();

        assert_eq!(result.total_profit, 600);
        assert_eq!(result.best_sell_locations.len(), 2);
        assert!(result.message.starts_with("Here are the top 2 places to sell 5 SCU of Laranite:"));
    }
}
