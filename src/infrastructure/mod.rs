//! Infrastructure layer - implementations behind the domain traits

pub mod cache;
pub mod http;
pub mod logging;
pub mod nivoda;
pub mod services;
