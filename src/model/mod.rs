pub mod user;
pub mod property;
pub mod demand;
