//! API route modules.

pub mod connect;
pub mod credentials;
