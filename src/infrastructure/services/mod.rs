//! Services composing the pipeline with pricing policy

mod diamond_search;

pub use diamond_search::DiamondSearchService;
