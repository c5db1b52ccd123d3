//! Caller-managed custom GST rates that take precedence over the registry

use bigdecimal::BigDecimal;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::registry::normalize_code;
use crate::types::*;
use crate::utils::validate_gst_rate;

/// Shared table of custom rates keyed by HSN/SAC code.
///
/// Clones share the same table, so a handle can be passed to every
/// [`RateResolver`](crate::tax::RateResolver) that should observe updates.
#[derive(Debug, Clone, Default)]
pub struct CustomRateTable {
    rates: Arc<RwLock<HashMap<String, BigDecimal>>>,
}

impl CustomRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom rate, replacing any existing one for the code
    pub fn set(&self, code: &str, rate: BigDecimal) -> GstResult<()> {
        validate_gst_rate(&rate)?;
        self.rates.write().insert(normalize_code(code), rate);
        Ok(())
    }

    /// Custom rate for exactly this code
    pub fn get(&self, code: &str) -> Option<BigDecimal> {
        self.rates.read().get(&normalize_code(code)).cloned()
    }

    /// Remove a custom rate, returning it if present
    pub fn remove(&self, code: &str) -> Option<BigDecimal> {
        self.rates.write().remove(&normalize_code(code))
    }

    pub fn clear(&self) {
        self.rates.write().clear();
    }

    pub fn len(&self) -> usize {
        self.rates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.read().is_empty()
    }
}
