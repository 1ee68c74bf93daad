//! Tally Web Server
//!
//! Axum-based REST API for the Tally personal finance backend.
//!
//! Security features:
//! - Bearer token authentication (secure by default, use --no-auth for local dev)
//! - Constant-time token comparison
//! - Restrictive CORS policy
//! - Input validation (pagination limits, date parsing)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use axum::routing::get;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use tally_core::db::Database;
use tally_core::models::User;

mod handlers;


/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Authorization header for bearer token auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// The authenticated user for the current request
///
/// Inserted by the auth middleware; every handler reads its user scope
/// from this extension.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Authentication middleware - resolves the request to a user
///
/// With auth enabled, the Authorization header must carry a bearer token
/// belonging to a registered user. The token lookup result is re-checked
/// with a constant-time comparison to avoid timing leaks.
///
/// With auth disabled (local development), every request runs as the
/// shared "local" user.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        match state.db.get_or_create_local_user() {
            Ok(user) => {
                request.extensions_mut().insert(CurrentUser(user));
                return next.run(request).await;
            }
            Err(e) => {
                error!(error = %e, "Failed to resolve local user");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "An internal error occurred" })),
                )
                    .into_response();
            }
        }
    }

    let token = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = token {
        match state.db.get_user_by_token(token) {
            Ok(Some(user)) if token_matches(token, &user.token) => {
                info!(user = %user.username, path = %request.uri().path(), "Authenticated via bearer token");
                request.extensions_mut().insert(CurrentUser(user));
                return next.run(request).await;
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Token lookup failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "An internal error occurred" })),
                )
                    .into_response();
            }
        }
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid token");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Compare a provided token against the stored one in constant time
fn token_matches(provided: &str, stored: &str) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();
    let stored_bytes = stored.as_bytes();
    // Only compare if lengths match (constant-time for same-length tokens)
    provided_bytes.len() == stored_bytes.len()
        && bool::from(provided_bytes.ct_eq(stored_bytes))
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    let api_routes = Router::new()
        // Auth
        .route("/me", get(handlers::get_me))
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/:id",
            get(handlers::get_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction),
        )
        // Derived analytics
        .route("/monthly-summary", get(handlers::monthly_summary))
        .route("/category-analysis", get(handlers::category_analysis))
        .route("/smart-insights", get(handlers::smart_insights))
        .route("/predict-expense", get(handlers::predict_expense))
        .route("/missing-expenses", get(handlers::missing_expenses))
        .route("/saving-suggestion", get(handlers::saving_suggestion))
        // Goals
        .route("/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route(
            "/goals/:id",
            get(handlers::get_goal)
                .patch(handlers::update_goal_saved_amount)
                .delete(handlers::delete_goal),
        )
        // Subscriptions
        .route(
            "/subscriptions",
            get(handlers::list_subscriptions).post(handlers::create_subscription),
        )
        // Bills
        .route("/bills", get(handlers::list_bills).post(handlers::create_bill))
        // Reminders
        .route(
            "/reminders",
            get(handlers::list_reminders).post(handlers::create_reminder),
        )
        .route(
            "/reminders/:id",
            get(handlers::get_reminder)
                .patch(handlers::update_reminder)
                .delete(handlers::delete_reminder),
        )
        // Export
        .route("/export-transactions", get(handlers::export_transactions));

    // CORS policy: same-origin only unless origins are explicitly allowed
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core library error to an HTTP status
    ///
    /// Validation failures become 400s with their message intact; anything
    /// else is treated as internal and sanitized.
    pub fn from_core(err: tally_core::Error) -> Self {
        match err {
            tally_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            tally_core::Error::NotFound(msg) => Self::not_found(&msg),
            other => Self::from(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
