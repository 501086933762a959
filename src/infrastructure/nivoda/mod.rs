//! Nivoda API integration - request pipeline, query documents, throttling

mod client;
pub mod queries;
mod request;
mod throttle;

pub use client::{DEFAULT_API_URL, NivodaClient, NivodaConfig};
pub use request::{GraphqlEnvelope, GraphqlError, QueryRequest};
pub use throttle::RequestThrottle;
