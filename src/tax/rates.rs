//! GST rate resolution for HSN/SAC codes

use bigdecimal::BigDecimal;
use serde::Serialize;
use tracing::debug;

use super::gst::GstCategory;
use crate::classification::{find_by_prefix, normalize_code, CustomRateTable, LookupSource, ProviderChain};
use crate::identifiers::sac_rate;

/// Where a resolved rate came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Caller-managed custom rate
    Override,
    /// Named classification provider
    Provider(String),
    /// Static HSN registry
    Registry,
    /// SAC heading table
    Sac,
    /// Typical slab of the code's chapter
    ChapterDefault,
}

/// A resolved GST rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateResolution {
    /// Normalized code
    pub code: String,
    pub rate: BigDecimal,
    /// Compensation cess rate, when the source knows one
    pub cess: Option<BigDecimal>,
    pub source: RateSource,
}

/// Chapter slab rate for a code whose chapter has no registered entry.
///
/// Codes without a numeric two-digit chapter get the standard 18%.
pub fn chapter_default_rate(code: &str) -> BigDecimal {
    let chapter = normalize_code(code)
        .get(..2)
        .and_then(|c| c.parse::<u32>().ok())
        .unwrap_or(0);
    GstCategory::for_chapter(chapter).rate()
}

/// Resolves rates from custom overrides, the registry and the chapter slabs.
///
/// Clones share the override table.
#[derive(Debug, Clone, Default)]
pub struct RateResolver {
    overrides: CustomRateTable,
}

impl RateResolver {
    pub fn new(overrides: CustomRateTable) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &CustomRateTable {
        &self.overrides
    }

    fn resolution(code: String, rate: BigDecimal, cess: Option<BigDecimal>, source: RateSource) -> RateResolution {
        RateResolution {
            code,
            rate,
            cess,
            source,
        }
    }

    fn resolve_static(&self, code: String) -> RateResolution {
        if let Some(hsn) = find_by_prefix(&code) {
            return Self::resolution(code, hsn.rate, hsn.cess, RateSource::Registry);
        }
        self.resolve_unregistered(code)
    }

    fn resolve_unregistered(&self, code: String) -> RateResolution {
        if code.starts_with("99") {
            if let Some(rate) = sac_rate(&code) {
                return Self::resolution(code, rate, None, RateSource::Sac);
            }
        }

        debug!(code = %code, "no registered rate, using chapter default");
        let rate = chapter_default_rate(&code);
        Self::resolution(code, rate, None, RateSource::ChapterDefault)
    }

    /// Resolve a rate: custom override, registry prefix match, SAC heading,
    /// then the chapter slab. Never fails.
    pub fn resolve(&self, code: &str) -> RateResolution {
        let code = normalize_code(code);

        if let Some(rate) = self.overrides.get(&code) {
            return Self::resolution(code, rate, None, RateSource::Override);
        }

        self.resolve_static(code)
    }

    /// Like [`resolve`](Self::resolve), consulting the provider chain before
    /// the static tables.
    pub async fn resolve_with(&self, code: &str, chain: &ProviderChain) -> RateResolution {
        let code = normalize_code(code);

        if let Some(rate) = self.overrides.get(&code) {
            return Self::resolution(code, rate, None, RateSource::Override);
        }

        let result = chain.lookup(&code, false).await;
        match (result.hsn, result.source) {
            (Some(hsn), LookupSource::Api | LookupSource::Cache) => {
                let provider = result.provider.unwrap_or_default();
                Self::resolution(code, hsn.rate, hsn.cess, RateSource::Provider(provider))
            }
            (Some(hsn), LookupSource::Fallback) => {
                Self::resolution(code, hsn.rate, hsn.cess, RateSource::Registry)
            }
            (None, _) => self.resolve_unregistered(code),
        }
    }
}
