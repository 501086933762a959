//! Domain layer - core types and pure transformations

pub mod cache;
pub mod diamond;
pub mod error;
pub mod filter;
pub mod pricing;

pub use cache::{Cache, CacheExt, PrefixStats};
pub use diamond::{
    Certificate, CertificateSummary, ConnectionStatus, DeliveryTime, Diamond, DiamondMedia,
    Measurements, PageInfo, Pagination, SearchPage,
};
pub use error::GatewayError;
pub use filter::{DiamondQueryFilters, FilterOptions, FilterSet, OneOrMany};
pub use pricing::PricingConfig;
