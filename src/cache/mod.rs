// Cache module for local filesystem caching.
// Two TTL-scoped regions let retrievals skip the network and survive outages.

pub mod region;
pub mod store;

pub use region::{CacheRegion, LONG_TERM_TTL, SHORT_TERM_TTL, TieredCache};
pub use store::CacheEntry;
