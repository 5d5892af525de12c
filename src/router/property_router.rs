use axum::{Router, routing::{get, post}, middleware};
use crate::handler::property_handler::{
    search_properties_handler,
    submit_property_handler,
};
use std::sync::Arc;
use crate::service::property_service::PropertyServiceImpl;
use crate::middlewares::auth_middleware::{auth_gate, AuthState};

pub fn property_router(service: Arc<PropertyServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Authenticated inventory routes
    Router::new()
        .route("/properties", get(search_properties_handler))
        .route("/properties", post(submit_property_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_gate))
        .with_state(service)
}
