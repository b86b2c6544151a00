use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::auth::JwtKeys;
use crate::config::{AppConfig, GalleryConfig};
use crate::database::{
    DatabaseManager, MemoryProjectStore, MemoryUserStore, PgProjectStore, PgUserStore,
    ProjectStore, UserStore,
};
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::projects::ProjectService;

/// Shared handles every request handler can reach
#[derive(Clone)]
pub struct AppState {
    pub projects: ProjectService,
    pub store: Arc<dyn ProjectStore>,
    pub users: Arc<dyn UserStore>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ProjectStore>,
        users: Arc<dyn UserStore>,
        gallery: GalleryConfig,
        jwt: JwtKeys,
    ) -> anyhow::Result<Self> {
        let projects = ProjectService::new(store.clone(), Arc::new(gallery))?;
        Ok(Self {
            projects,
            store,
            users,
            jwt,
        })
    }

    /// Postgres-backed state when a database is configured, in-memory otherwise
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let jwt = JwtKeys::from_config(&config.security)?;

        let (store, users): (Arc<dyn ProjectStore>, Arc<dyn UserStore>) =
            if config.database.url.is_some() {
                let pool = DatabaseManager::connect(&config.database).await?;
                DatabaseManager::ensure_schema(&pool).await?;
                (
                    Arc::new(PgProjectStore::new(pool.clone())),
                    Arc::new(PgUserStore::new(pool)),
                )
            } else {
                warn!("DATABASE_URL not set; projects are kept in memory and lost on restart");
                (Arc::new(MemoryProjectStore::new()), Arc::new(MemoryUserStore::new()))
            };

        Self::new(store, users, config.gallery.clone(), jwt)
    }
}

/// Routes with authentication wired in
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Requires a bearer token
        .merge(api_routes(state.clone()))
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(handlers::project_list))
        .route("/api/project", post(handlers::project_add))
        .route(
            "/api/project/:id",
            get(handlers::project_detail).post(handlers::project_save),
        )
        .route("/api/project/:id/publish", post(handlers::project_publish))
        .route("/api/user", get(handlers::user_details))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

/// Transport concerns: body size, CORS and request tracing
pub fn with_http_layers(router: Router, config: &AppConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let router = router
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors);

    if config.api.enable_request_logging {
        info!("Request logging enabled");
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
