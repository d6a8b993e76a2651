//! Carrier resolution layer: write-through carrier cache, RDAP registry
//! lookups, and the ordered substring classification rules.

pub mod cache;
pub mod rdap;
pub mod resolver;

pub use cache::{CacheError, CarrierCache, FileCache};
pub use rdap::{LookupError, OrgLookup, RdapClient};
pub use resolver::{Resolver, classify};
