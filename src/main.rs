//! Astrology API Server
//!
//! REST API server casting natal charts and transits.

use astrology_api::api::create_router;
use astrology_api::chart::aspects::AspectMember;
use astrology_api::chart::natal::MoonPhase;
use astrology_api::chart::objects::{
    ChartObject, HouseInfo, LongitudeInfo, MovementInfo, ObjectTypeInfo, SignInfo, SignLongitude,
};
use astrology_api::chart::{Aspect, AspectKind, AspectMovement, HouseSystem, NatalChart, SubjectInfo, TransitChart};
use astrology_api::config::{CONFIG_PATH_ENV, Config, DEFAULT_CONFIG_PATH};
use astrology_api::error::ErrorResponse;
use astrology_api::models::{BirthRequest, HealthResponse, TransitRequest};
use astrology_api::state::AppState;
use astrology_api::zodiac::{Element, Modality};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        astrology_api::api::handlers::root,
        astrology_api::api::handlers::health_check,
        astrology_api::api::handlers::birth_chart,
        astrology_api::api::handlers::transits,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            BirthRequest,
            TransitRequest,
            NatalChart,
            TransitChart,
            SubjectInfo,
            HouseSystem,
            MoonPhase,
            ChartObject,
            ObjectTypeInfo,
            LongitudeInfo,
            SignLongitude,
            SignInfo,
            HouseInfo,
            MovementInfo,
            Element,
            Modality,
            Aspect,
            AspectKind,
            AspectMovement,
            AspectMember,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Charts", description = "Natal charts and transits"),
    ),
    info(
        title = "Astrology API",
        version = "0.1.0",
        description = "REST API for natal charts and transits",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, then let the environment override it
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = Config::load_or_default(&config_path)?;
    config.apply_env_overrides(|name| std::env::var(name).ok())?;
    info!("Configuration loaded from {}", config_path);

    // Create application state
    let state = Arc::new(AppState::from_config(&config));

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Starting Astrology API on {}:{}", host, port);
    info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        host, port
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
