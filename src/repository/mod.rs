pub mod repository_error;
pub mod user_repo;
pub mod property_repo;
pub mod demand_repo;
