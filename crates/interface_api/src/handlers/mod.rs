//! Request handlers

pub mod demands;
pub mod family;
pub mod profiles;
pub mod health;
