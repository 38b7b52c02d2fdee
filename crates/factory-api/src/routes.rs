//! Router assembly

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{auth, equipment, factories, health, properties, users};
use crate::middleware::require_auth;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/user/token/", post(auth::obtain_token))
        .route("/api/user/token/refresh/", post(auth::refresh_token));

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        // Users
        .route("/api/user/me/", get(users::me))
        .route("/api/user/create/", post(users::create_user))
        .route("/api/user/list/", get(users::list_users))
        .route("/api/user/detail/{id}/", get(users::get_user))
        .route(
            "/api/user/update/{id}/",
            put(users::update_user).patch(users::update_user),
        )
        .route("/api/user/delete/{id}/", delete(users::delete_user))
        // Factories
        .route("/api/factory/", get(factories::list_factories))
        .route("/api/factory/create/", post(factories::create_factory))
        .route("/api/factory/{id}/", get(factories::get_factory))
        .route(
            "/api/factory/update/{id}/",
            put(factories::update_factory).patch(factories::update_factory),
        )
        .route("/api/factory/delete/{id}/", delete(factories::delete_factory))
        // Equipment
        .route(
            "/api/equipment/create/{factory_id}/",
            post(equipment::create_equipment),
        )
        .route(
            "/api/equipment/list/{factory_id}/",
            get(equipment::list_equipment),
        )
        .route("/api/equipment/{id}/", get(equipment::get_equipment))
        .route(
            "/api/equipment/update/{id}/",
            put(equipment::update_equipment).patch(equipment::update_equipment),
        )
        .route("/api/equipment/delete/{id}/", delete(equipment::delete_equipment))
        // Properties
        .route(
            "/api/equipment/create_property/{equipment_id}/",
            post(properties::create_property),
        )
        .route(
            "/api/equipment/properties/{equipment_id}/",
            get(properties::list_properties),
        )
        .route("/api/equipment/property/{id}/", get(properties::get_property))
        .route(
            "/api/equipment/update_property/{id}/",
            put(properties::update_property).patch(properties::update_property),
        )
        .route(
            "/api/equipment/delete_property/{id}/",
            delete(properties::delete_property),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(state)
}
