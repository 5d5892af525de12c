pub mod matching;
pub mod user_service;
pub mod property_service;
pub mod demand_service;
