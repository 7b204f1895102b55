/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tomato_api::{app::AppState, config::Config};
/// use tomato_shared::{db::connection::Database, store::pg::PgStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = Database::new(&config.connection_config())?;
/// let state = AppState::new(Arc::new(PgStore::new(db)), config);
/// let app = tomato_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tomato_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for tasks, categories and users
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET        /ping
/// ├── GET        /health
/// ├── POST       /signup
/// ├── POST       /login
/// ├── GET, POST  /alltasks
/// ├── GET        /completedtasks
/// ├── GET        /incompletetasks
/// ├── POST       /gettask
/// ├── POST       /gettaskbycategoryid
/// ├── POST       /addtask
/// ├── POST       /updatetask
/// ├── POST       /completetask
/// ├── POST       /incompletetask
/// ├── POST       /deletetask
/// └── GET        /allcategories
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new()
        .route("/ping", get(routes::health::ping))
        .route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login));

    let task_routes = Router::new()
        .route(
            "/alltasks",
            get(routes::tasks::all_tasks).post(routes::tasks::all_tasks),
        )
        .route("/completedtasks", get(routes::tasks::completed_tasks))
        .route("/incompletetasks", get(routes::tasks::incomplete_tasks))
        .route("/gettask", post(routes::tasks::get_task))
        .route("/gettaskbycategoryid", post(routes::tasks::tasks_by_category))
        .route("/addtask", post(routes::tasks::add_task))
        .route("/updatetask", post(routes::tasks::update_task))
        .route("/completetask", post(routes::tasks::complete_task))
        .route("/incompletetask", post(routes::tasks::incomplete_task))
        .route("/deletetask", post(routes::tasks::delete_task));

    let category_routes =
        Router::new().route("/allcategories", get(routes::categories::all_categories));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(health_routes)
        .merge(auth_routes)
        .merge(task_routes)
        .merge(category_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            header::CACHE_CONTROL,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, DatabaseConfig};
    use axum::{body::Body, http::Request};
    use tomato_shared::store::memory::MemoryStore;
    use tower::ServiceExt;

    fn config_with_origins(origins: &[&str]) -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                connect_timeout_seconds: 10,
                operation_timeout_seconds: 30,
            },
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let state = AppState::new(Arc::new(MemoryStore::default()), config_with_origins(&["*"]));
        let response = build_router(state)
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_configured_origin_is_echoed() {
        let state = AppState::new(
            Arc::new(MemoryStore::default()),
            config_with_origins(&["https://tomato.example"]),
        );
        let response = build_router(state)
            .oneshot(
                Request::get("/ping")
                    .header(header::ORIGIN, "https://tomato.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://tomato.example"))
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&HeaderValue::from_static("true"))
        );
    }
}
