pub mod user_handler;
pub mod property_handler;
pub mod demand_handler;
pub mod admin_handler;
