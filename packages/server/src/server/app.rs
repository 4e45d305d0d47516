//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{
    cadangan, dependents, health_handler, kutipan, members, payments, tabung, tags, tetapan,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
}

/// All API routes, relative to the deploy prefix.
fn api_routes() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // Khairat members
        .route("/members/findAll", get(members::find_all))
        .route("/members/find/:id", get(members::find_by_id))
        .route("/members/findBy", get(members::find_by_query))
        .route("/members/findByTag", get(members::find_by_tags))
        .route("/members/count", get(members::count))
        .route("/members/save", post(members::save))
        // Dependents
        .route("/dependents/findByMemberId/:member_id", get(dependents::find_by_member_id))
        .route("/dependents/save/:member_id", post(dependents::save))
        .route("/dependents/delete/:id", delete(dependents::delete))
        // Payments
        .route("/payment/save", post(payments::save))
        .route("/payment/delete/:member_id", delete(payments::delete_current_year))
        .route(
            "/payment/totalMembersPaidForCurrentYear",
            get(payments::total_members_paid_for_current_year),
        )
        // Tags
        .route("/tags/findAll", get(tags::find_all))
        .route("/tags/save", post(tags::save))
        .route("/tags/delete/:id", delete(tags::delete))
        // Cadangan
        .route("/cadangan", get(cadangan::list).post(cadangan::create))
        .route("/cadangan/count", get(cadangan::count))
        .route(
            "/cadangan/:id",
            get(cadangan::find_by_id)
                .put(cadangan::update)
                .delete(cadangan::delete),
        )
        .route("/cadangan-types", get(cadangan::list_types))
        // Tabung
        .route("/tabung-types", get(tabung::list_types).post(tabung::save_type))
        .route("/tabung-types/:id", delete(tabung::delete_type))
        .route("/tabung", get(tabung::list).post(tabung::save))
        .route("/tabung/:id", get(tabung::find_by_id).delete(tabung::delete))
        // Kutipan
        .route("/kutipan", post(kutipan::save))
        .route("/kutipan/tabung/:tabung_id", get(kutipan::list_by_tabung))
        .route(
            "/kutipan/tabung/:tabung_id/betweenCreateDate",
            get(kutipan::list_between_create_dates),
        )
        .route("/kutipan/:id", get(kutipan::find_by_id).delete(kutipan::delete))
        // Tetapan
        .route("/tetapan", get(tetapan::find_all).post(tetapan::save))
        .route("/tetapan/senarai", post(tetapan::save_all))
        .route("/tetapan/:kunci", get(tetapan::find_by_kunci).delete(tetapan::delete))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

/// Build the Axum application router, mounted under `config.deploy_url`.
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let app_state = AppState { db_pool: pool };

    let api = api_routes();
    let router = if config.deploy_url == "/" {
        api
    } else {
        Router::new().nest(config.deploy_url.trim_end_matches('/'), api)
    };

    router
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
