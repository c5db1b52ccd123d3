//! Traits for pluggable classification lookup and return export

use async_trait::async_trait;
use serde::Serialize;

use crate::export::ExportSummary;
use crate::returns::ReturnValidation;
use crate::types::*;

/// Failure of an external classification provider.
///
/// These never escape the provider chain; they are logged and treated as a
/// miss so the next provider can be tried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider network error: {0}")]
    Network(String),
    #[error("Provider API error: {0}")]
    Api(String),
    #[error("Provider response could not be parsed: {0}")]
    Parse(String),
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Source of HSN classifications outside the static registry
///
/// Implementations only fetch; caching and timeouts are added by
/// [`CachedProvider`](crate::classification::CachedProvider).
#[async_trait]
pub trait ClassificationProvider: Send + Sync {
    /// Name used in lookup results and logs
    fn name(&self) -> &str;

    /// Fetch the classification for a normalized code.
    ///
    /// `Ok(None)` means the provider does not know the code.
    async fn fetch(&self, code: &str) -> Result<Option<HsnCode>, ProviderError>;
}

/// Statutory return kinds understood by the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReturnType {
    #[serde(rename = "GSTR1")]
    Gstr1,
    #[serde(rename = "GSTR3B")]
    Gstr3b,
}

impl ReturnType {
    pub fn code(&self) -> &'static str {
        match self {
            ReturnType::Gstr1 => "GSTR1",
            ReturnType::Gstr3b => "GSTR3B",
        }
    }
}

/// A generated return that can be uploaded to the portal
pub trait FilingReturn: Serialize {
    fn return_type(&self) -> ReturnType;

    /// GSTIN of the filer
    fn gstin(&self) -> &str;

    /// Period in `MMYYYY` form
    fn period(&self) -> &str;

    /// Advisory structural validation
    fn validate(&self) -> ReturnValidation;

    /// Record counts and value totals
    fn summary(&self) -> ExportSummary;
}
