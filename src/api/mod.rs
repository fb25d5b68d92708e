pub mod error;
pub mod health;
pub mod response;
pub mod v1;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    config::Config,
    constants::ConstantsService,
    pipeline::QuoteBuilder,
    repo::Repositories,
    validator::{AlertNotifier, LogAlertNotifier, QuoteValidator, WebhookAlertNotifier},
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub constants: Arc<ConstantsService>,
    pub builder: Arc<QuoteBuilder>,
}

impl AppState {
    pub fn new(constants: Arc<ConstantsService>, builder: QuoteBuilder) -> Self {
        Self {
            constants,
            builder: Arc::new(builder),
        }
    }

    /// Wire the services from configuration: alerts go to the webhook when
    /// one is configured, otherwise to the log.
    pub fn from_config(cfg: &Config, repos: Repositories) -> Result<Self> {
        let constants = Arc::new(ConstantsService::new(repos.constants, cfg.constants.cache_ttl()));
        let notifier: Arc<dyn AlertNotifier> = match cfg.validator.alert_webhook_url.as_deref() {
            Some(url) => Arc::new(WebhookAlertNotifier::new(url)?),
            None => Arc::new(LogAlertNotifier),
        };
        let validator = QuoteValidator::new()
            .with_audit_log(repos.audit_log)
            .with_notifier(notifier);
        let builder = QuoteBuilder::from_config(constants.clone(), validator, cfg);
        Ok(Self::new(constants, builder))
    }
}

pub fn router(state: AppState, cfg: &Config) -> Result<Router> {
    let mut router = Router::new()
        .route("/healthz", get(health::health_check))
        .nest("/api/v1", v1::router())
        .with_state(state);

    if cfg.server.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(cfg.server.cors_origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    Ok(router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(256 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(cfg.server.request_timeout_secs))),
        )
        .layer(TraceLayer::new_for_http()))
}
