use axum::{Router, routing::{delete, get, post, put}, middleware};
use crate::handler::demand_handler::{
    list_demands_handler,
    create_demand_handler,
    close_demand_handler,
    delete_demand_handler,
    share_demand_handler,
    demand_events_handler,
};
use std::sync::Arc;
use crate::service::demand_service::DemandServiceImpl;
use crate::middlewares::auth_middleware::{admin_auth, auth_gate, AuthState};

pub fn demand_router(service: Arc<DemandServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Authenticated demand routes
    let authed = Router::new()
        .route("/demands", get(list_demands_handler))
        .route("/demands", post(create_demand_handler))
        .route("/demands/{id}/close", put(close_demand_handler))
        .route("/demands/{id}/share", get(share_demand_handler))
        .route("/demands/events", get(demand_events_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), auth_gate));

    // Deletion stays admin-only
    let admin = Router::new()
        .route("/demands/{id}", delete(delete_demand_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, admin_auth));

    authed
        .merge(admin)
        .with_state(service)
}
