pub mod user_router;
pub mod property_router;
pub mod demand_router;
pub mod admin_router;
