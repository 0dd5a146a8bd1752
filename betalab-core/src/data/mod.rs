//! Data acquisition and caching

pub mod align;
pub mod cache;
pub mod provider;
pub mod yahoo;

pub use align::align_on_common_dates;
pub use cache::{CacheEntry, DataCache, DataError, UnavailableCause, DEFAULT_INDEX_KEY};
pub use provider::{PriceProvider, ProviderError, DEFAULT_INDEX_SYMBOL};
pub use yahoo::YahooProvider;
