pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sea_orm::DatabaseConnection;

pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiPath, ApiQuery};

/// Application state shared across handlers
pub struct AppState {
    pub db: DatabaseConnection,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Linkboard API",
        version = "0.1.0",
        description = "REST API for saving links, labelling them and arranging them on boards",
        contact(
            name = "Linkboard Team",
            email = "team@linkboard.dev"
        )
    ),
    paths(
        handlers::health_check,
        handlers::stats,
        handlers::list_teams,
        handlers::get_team,
        handlers::create_team,
        handlers::create_user,
        handlers::login,
        handlers::get_user,
        handlers::set_main_board,
        handlers::set_favorite_boards,
        handlers::list_labels,
        handlers::get_label,
        handlers::create_label,
        handlers::list_links,
        handlers::get_link,
        handlers::create_link,
        handlers::set_link_labels,
        handlers::list_boards,
        handlers::get_board,
        handlers::create_board,
        handlers::set_board_labels_filters,
    ),
    components(
        schemas(
            models::Team,
            models::CreateTeamRequest,
            models::UserBasicInfo,
            models::User,
            models::CreateUserRequest,
            models::LoginRequest,
            models::Label,
            models::CreateLabelRequest,
            models::Link,
            models::CreateLinkRequest,
            models::Board,
            models::CreateBoardRequest,
            models::EntityCount,
            models::StatsResponse,
            models::HealthResponse,
            models::ErrorResponse,
        )
    ),
    tags(
        (name = "teams", description = "Team endpoints"),
        (name = "users", description = "User accounts, login and board preferences"),
        (name = "labels", description = "Label endpoints"),
        (name = "links", description = "Saved link endpoints"),
        (name = "boards", description = "Board endpoints"),
        (name = "system", description = "System health and info endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS for local development origins
    pub enable_cors: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8000)),
            enable_cors: true,
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, db: DatabaseConnection) -> Self {
        let state = Arc::new(AppState { db });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        let api_router = Router::new()
            .route("/api/health", get(handlers::health_check))
            .route("/api/stats", get(handlers::stats))
            .route(
                "/api/teams",
                get(handlers::list_teams).post(handlers::create_team),
            )
            .route("/api/teams/{id}", get(handlers::get_team))
            .route("/api/users", post(handlers::create_user))
            .route("/api/users/login", post(handlers::login))
            .route("/api/users/{id}", get(handlers::get_user))
            .route(
                "/api/users/{id}/set_main_board",
                put(handlers::set_main_board),
            )
            .route(
                "/api/users/{id}/set_favorite_boards",
                put(handlers::set_favorite_boards),
            )
            .route(
                "/api/labels",
                get(handlers::list_labels).post(handlers::create_label),
            )
            .route("/api/labels/{id}", get(handlers::get_label))
            .route(
                "/api/links",
                get(handlers::list_links).post(handlers::create_link),
            )
            .route("/api/links/{id}", get(handlers::get_link))
            .route("/api/links/{id}/set_labels", post(handlers::set_link_labels))
            .route(
                "/api/boards",
                get(handlers::list_boards).post(handlers::create_board),
            )
            .route("/api/boards/{id}", get(handlers::get_board))
            .route(
                "/api/boards/{id}/set_labels_filters",
                post(handlers::set_board_labels_filters),
            )
            .with_state(self.state.clone());

        // SwaggerUi also serves /api/openapi.json
        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router);

        let mut router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            use tower_http::cors::AllowOrigin;

            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers([header::CONTENT_TYPE])
                .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
                    let origin_str = origin.to_str().unwrap_or("");
                    origin_str.starts_with("http://localhost:")
                        || origin_str.starts_with("http://127.0.0.1:")
                        || origin_str.starts_with("https://localhost:")
                        || origin_str.starts_with("https://127.0.0.1:")
                }));
            router = router.layer(cors);
        }

        router
    }

    /// Start the API server
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        info!(
            "OpenAPI spec: http://{}/api/openapi.json",
            self.config.bind_addr
        );
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        Ok(())
    }
}

/// Convenience function to create and start an API server
pub async fn run_api_server(
    bind_addr: SocketAddr,
    enable_cors: bool,
    db: DatabaseConnection,
) -> Result<(), anyhow::Error> {
    let config = ApiServerConfig {
        bind_addr,
        enable_cors,
    };

    ApiServer::new(config, db).start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let api_doc = ApiDoc::openapi();
        assert!(api_doc.paths.paths.contains_key("/api/boards/{id}/set_labels_filters"));
        assert!(api_doc.paths.paths.contains_key("/api/users/login"));
    }

    #[test]
    fn test_default_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8000");
        assert!(config.enable_cors);
    }
}
