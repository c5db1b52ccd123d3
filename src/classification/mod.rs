//! HSN classification: static registry, custom rates and external providers

#[cfg(feature = "http-provider")]
pub mod http;
pub mod overrides;
pub mod provider;
pub mod registry;

#[cfg(feature = "http-provider")]
pub use http::HttpProvider;
pub use overrides::CustomRateTable;
pub use provider::{
    CachedProvider, LookupResult, LookupSource, ProviderChain, ProviderConfig, ProviderHit,
};
pub use registry::{
    chapter, chapters, find_by_prefix, get_recommended_rate, lookup_exact, normalize_code, search,
    ChapterInfo,
};
