pub mod property_dto;
pub mod demand_dto;
pub mod user_dto;
