//! Data types flowing between pipeline stages.

pub mod config;
pub mod page;
pub mod product;
