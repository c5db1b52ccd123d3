//! Provider chain for HSN lookups with per-provider caching and timeouts

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::registry;
use crate::config::GstConfig;
use crate::traits::ClassificationProvider;
use crate::types::HsnCode;

/// Scheduling, caching and timeout settings for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Lower priorities are tried first
    pub priority: u32,
    /// Lifetime of a cached classification
    pub cache_ttl: Duration,
    /// Bound on a single fetch
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(priority: u32, cache_ttl: Duration, timeout: Duration) -> Self {
        Self {
            priority,
            cache_ttl,
            timeout,
        }
    }

    /// Provider settings taking TTL and timeout from the crate configuration
    pub fn from_config(config: &GstConfig, priority: u32) -> Self {
        Self::new(priority, config.provider_cache_ttl, config.provider_timeout)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::from_config(&GstConfig::default(), 100)
    }
}

/// Where a lookup result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    /// Fresh answer from a provider
    Api,
    /// Answer from a provider's cache
    Cache,
    /// Static registry, or nothing found
    Fallback,
}

/// Outcome of a chain lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    /// Normalized code that was looked up
    pub code: String,
    pub found: bool,
    pub hsn: Option<HsnCode>,
    pub source: LookupSource,
    /// Provider that answered, `None` for registry and not-found results
    pub provider: Option<String>,
}

impl LookupResult {
    fn not_found(code: String) -> Self {
        Self {
            code,
            found: false,
            hsn: None,
            source: LookupSource::Fallback,
            provider: None,
        }
    }

    fn from_registry(code: String, hsn: Option<HsnCode>) -> Self {
        Self {
            code,
            found: hsn.is_some(),
            hsn,
            source: LookupSource::Fallback,
            provider: None,
        }
    }
}

/// A provider answer and whether it was served from cache
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderHit {
    pub hsn: HsnCode,
    pub from_cache: bool,
}

struct CacheEntry {
    hsn: HsnCode,
    stored_at: Instant,
}

/// Wraps any [`ClassificationProvider`] with a TTL cache and a call timeout
pub struct CachedProvider {
    inner: Arc<dyn ClassificationProvider>,
    config: ProviderConfig,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl CachedProvider {
    pub fn new<P: ClassificationProvider + 'static>(provider: P, config: ProviderConfig) -> Self {
        Self::from_shared(Arc::new(provider), config)
    }

    /// Wrap a provider that is also used elsewhere
    pub fn from_shared(provider: Arc<dyn ClassificationProvider>, config: ProviderConfig) -> Self {
        Self {
            inner: provider,
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn cached(&self, code: &str) -> Option<HsnCode> {
        {
            let cache = self.cache.read();
            match cache.get(code) {
                Some(entry) if entry.stored_at.elapsed() < self.config.cache_ttl => {
                    return Some(entry.hsn.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired
        self.cache.write().remove(code);
        None
    }

    /// Look a code up in the cache, then with the provider.
    ///
    /// Timeouts and provider errors are logged and reported as a miss.
    pub async fn lookup(&self, code: &str) -> Option<ProviderHit> {
        if let Some(hsn) = self.cached(code) {
            debug!(provider = self.name(), code, "classification cache hit");
            return Some(ProviderHit {
                hsn,
                from_cache: true,
            });
        }

        match tokio::time::timeout(self.config.timeout, self.inner.fetch(code)).await {
            Ok(Ok(Some(hsn))) => {
                self.cache.write().insert(
                    code.to_string(),
                    CacheEntry {
                        hsn: hsn.clone(),
                        stored_at: Instant::now(),
                    },
                );
                debug!(provider = self.name(), code, "classification fetched");
                Some(ProviderHit {
                    hsn,
                    from_cache: false,
                })
            }
            Ok(Ok(None)) => {
                debug!(provider = self.name(), code, "classification not known to provider");
                None
            }
            Ok(Err(e)) => {
                warn!(provider = self.name(), code, error = %e, "classification provider failed");
                None
            }
            Err(_) => {
                warn!(
                    provider = self.name(),
                    code,
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "classification provider timed out"
                );
                None
            }
        }
    }

    /// Number of entries currently cached, expired or not
    pub fn cache_len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let ttl = self.config.cache_ttl;
        let mut cache = self.cache.write();
        let before = cache.len();
        cache.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        before - cache.len()
    }
}

/// Ordered set of providers consulted before the static registry
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<CachedProvider>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider; it is placed after existing providers of equal priority
    pub fn register<P: ClassificationProvider + 'static>(
        &mut self,
        provider: P,
        config: ProviderConfig,
    ) -> &mut Self {
        self.insert(CachedProvider::new(provider, config))
    }

    /// Register a provider that is shared with other owners
    pub fn register_shared(
        &mut self,
        provider: Arc<dyn ClassificationProvider>,
        config: ProviderConfig,
    ) -> &mut Self {
        self.insert(CachedProvider::from_shared(provider, config))
    }

    fn insert(&mut self, provider: CachedProvider) -> &mut Self {
        let priority = provider.config.priority;
        let position = self
            .providers
            .partition_point(|p| p.config.priority <= priority);
        self.providers.insert(position, provider);
        self
    }

    /// Provider names in the order they are tried
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(CachedProvider::name).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn clear_caches(&self) {
        for provider in &self.providers {
            provider.clear_cache();
        }
    }

    /// Resolve a code through the providers, one attempt each, in priority order.
    ///
    /// When every provider misses, the static registry answers unless
    /// `api_only` is set, in which case a not-found result is returned. Both
    /// are tagged [`LookupSource::Fallback`]. This never fails.
    pub async fn lookup(&self, code: &str, api_only: bool) -> LookupResult {
        let code = registry::normalize_code(code);

        for provider in &self.providers {
            if let Some(hit) = provider.lookup(&code).await {
                return LookupResult {
                    found: true,
                    hsn: Some(hit.hsn),
                    source: if hit.from_cache {
                        LookupSource::Cache
                    } else {
                        LookupSource::Api
                    },
                    provider: Some(provider.name().to_string()),
                    code,
                };
            }
        }

        if api_only {
            debug!(code = %code, "all classification providers missed");
            return LookupResult::not_found(code);
        }

        debug!(code = %code, "falling back to static HSN registry");
        let hsn = registry::find_by_prefix(&code);
        LookupResult::from_registry(code, hsn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryProvider;
    use bigdecimal::BigDecimal;

    fn sample(code: &str, rate: u32) -> HsnCode {
        HsnCode {
            code: code.to_string(),
            description: format!("Item {code}"),
            chapter: code[..2].to_string(),
            rate: BigDecimal::from(rate),
            cess: None,
            unit: None,
        }
    }

    fn fast(priority: u32) -> ProviderConfig {
        ProviderConfig::new(priority, Duration::from_secs(60), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_priority_order() {
        let mut chain = ProviderChain::new();
        chain
            .register(MemoryProvider::new("late").with_entry(sample("8471", 12)), fast(20))
            .register(MemoryProvider::new("early").with_entry(sample("8471", 5)), fast(10))
            .register(MemoryProvider::new("tie").with_entry(sample("8471", 28)), fast(10));

        assert_eq!(chain.provider_names(), vec!["early", "tie", "late"]);

        let result = chain.lookup("8471", false).await;
        assert_eq!(result.provider.as_deref(), Some("early"));
        assert_eq!(result.hsn.unwrap().rate, BigDecimal::from(5));
    }

    #[tokio::test]
    async fn test_second_lookup_served_from_cache() {
        let provider = Arc::new(MemoryProvider::new("memory").with_entry(sample("8471", 18)));
        let mut chain = ProviderChain::new();
        chain.register_shared(provider.clone(), fast(1));

        let first = chain.lookup("8471", true).await;
        assert_eq!(first.source, LookupSource::Api);
        let second = chain.lookup("8471", true).await;
        assert_eq!(second.source, LookupSource::Cache);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_refetches() {
        let provider = Arc::new(MemoryProvider::new("memory").with_entry(sample("8471", 18)));
        let cached = CachedProvider::from_shared(
            provider.clone(),
            ProviderConfig::new(1, Duration::ZERO, Duration::from_millis(200)),
        );

        assert!(!cached.lookup("8471").await.unwrap().from_cache);
        assert!(!cached.lookup("8471").await.unwrap().from_cache);
        assert_eq!(provider.call_count(), 2);
        assert_eq!(cached.purge_expired(), 1);
        assert_eq!(cached.cache_len(), 0);
    }

    #[tokio::test]
    async fn test_timeout_is_a_miss() {
        let mut chain = ProviderChain::new();
        chain
            .register(
                MemoryProvider::new("slow")
                    .with_entry(sample("8471", 5))
                    .with_latency(Duration::from_millis(500)),
                ProviderConfig::new(1, Duration::from_secs(60), Duration::from_millis(20)),
            )
            .register(MemoryProvider::new("backup").with_entry(sample("8471", 18)), fast(2));

        let result = chain.lookup("8471", true).await;
        assert_eq!(result.provider.as_deref(), Some("backup"));
        assert_eq!(result.source, LookupSource::Api);
    }

    #[tokio::test]
    async fn test_failure_is_a_miss() {
        let mut chain = ProviderChain::new();
        chain.register(MemoryProvider::new("broken").failing(), fast(1));

        let result = chain.lookup("84713000", false).await;
        assert!(result.found);
        assert_eq!(result.source, LookupSource::Fallback);
        assert_eq!(result.hsn.unwrap().code, "847130");
        assert!(result.provider.is_none());
    }

    #[tokio::test]
    async fn test_api_only_exhaustion() {
        let mut chain = ProviderChain::new();
        chain.register(MemoryProvider::new("empty"), fast(1));

        let result = chain.lookup("847130", true).await;
        assert!(!result.found);
        assert!(result.hsn.is_none());
        assert_eq!(result.source, LookupSource::Fallback);
    }

    #[tokio::test]
    async fn test_empty_chain_uses_registry() {
        let chain = ProviderChain::new();
        let result = chain.lookup("0000", false).await;
        assert!(!result.found);
        assert_eq!(result.source, LookupSource::Fallback);
    }
}
