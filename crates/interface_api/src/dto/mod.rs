//! Request/Response data transfer objects

pub mod upload;
pub mod demands;
pub mod family;
pub mod profiles;
