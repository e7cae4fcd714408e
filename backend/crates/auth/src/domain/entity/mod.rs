//! Domain Entities

pub mod location;
pub mod session;
