use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crediflow::config::AppConfig;
use crediflow::scoring::resolver::default_legacy_identities;
use crediflow::scoring::{DatasetResolver, StaticLoanRepository, TrustScoreService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Default wiring: seeded loan books, the legacy identity table, and a
/// fresh (uncached) resolver so newly dropped ledger files are picked up
/// per request.
pub(crate) fn build_score_service(
    config: &AppConfig,
) -> Arc<TrustScoreService<StaticLoanRepository>> {
    let resolver = DatasetResolver::new(config.data.data_dir.clone())
        .with_legacy_identities(default_legacy_identities());
    let repository = Arc::new(StaticLoanRepository::seeded());
    Arc::new(TrustScoreService::new(resolver, repository))
}
