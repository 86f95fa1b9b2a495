use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::geocode::{GeocodeClient, GeocodeError};
use crate::heading::{HeadingAdapter, TermuxMagnetometer};
use crate::routing::{RouteClient, RouteError};

use super::api::dashboard as dashboard_handlers;
use super::api::map as map_handlers;
use super::api::navigation as navigation_handlers;
use super::api_doc::ApiDoc;
use super::config::{Config, ConfigError, HeadingSource};
use super::state::AppState;
use super::ui::handlers as ui_handlers;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot create geocoding client: {0}")]
    Geocode(#[from] GeocodeError),
    #[error("cannot create routing client: {0}")]
    Route(#[from] RouteError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        // Navigation API endpoints
        .route("/api/navigation", get(navigation_handlers::status))
        .route("/api/navigation/search", post(navigation_handlers::search))
        .route("/api/navigation/cancel", post(navigation_handlers::cancel))
        .route("/api/navigation/confirm", post(navigation_handlers::confirm))
        .route("/api/navigation/stop", post(navigation_handlers::stop))
        .route("/api/navigation/advance", post(navigation_handlers::advance))
        .route("/api/location", post(navigation_handlers::update_location))
        // Dashboard API endpoints
        .route("/api/heading", get(dashboard_handlers::heading))
        .route("/api/dashboard", get(dashboard_handlers::dashboard))
        // Map API endpoints
        .route("/api/map", get(map_handlers::settings))
        .route("/api/map/tiles/{z}/{x}/{y}", get(map_handlers::tile))
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();

    let geocoder = GeocodeClient::new(
        &config.geocoding.endpoint,
        &config.app.identifier,
        config.geocoding.timeout,
    )?;
    let planner = RouteClient::new(
        &config.routing.endpoint,
        &config.app.identifier,
        config.routing.timeout,
    )?;

    let sensor = match config.heading.source {
        HeadingSource::Termux => Some(TermuxMagnetometer::new()),
        HeadingSource::None => None,
    };
    let interval = config.heading.interval;

    let state = AppState::new(config, Arc::new(geocoder), Arc::new(planner))?;
    let heading = HeadingAdapter::new(sensor, interval).start(state.heading_sink());

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    heading.stop().await;
    log::info!("Server stopped");
    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
