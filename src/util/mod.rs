pub mod jwt;
pub mod password;
pub mod sheets;
pub mod events;
pub mod error;
