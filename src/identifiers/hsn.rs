//! HSN code validation

use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::classification::registry;
use crate::types::*;

/// A structurally valid HSN code with its registry metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HsnInfo {
    pub code: String,
    pub chapter: String,
    pub chapter_description: String,
    pub section: String,
    /// Description of the most specific registered entry, if any
    pub description: Option<String>,
    /// Recommended rate of the most specific registered entry, if any
    pub recommended_rate: Option<BigDecimal>,
}

fn hsn_error(code: &str, message: String) -> GstError {
    IdentifierError::new(IdentifierErrorKind::Hsn, code, message).into()
}

/// Validate an HSN code: 2, 4, 6 or 8 digits in a known goods chapter.
///
/// Chapter 99 is reserved for services and rejected here; use
/// [`validate_sac`](super::validate_sac) for service codes.
pub fn validate_hsn(code: &str) -> GstResult<HsnInfo> {
    let code = registry::normalize_code(code);

    if !code.chars().all(|c| c.is_ascii_digit()) || !matches!(code.len(), 2 | 4 | 6 | 8) {
        return Err(hsn_error(
            &code,
            format!("HSN code must be 2, 4, 6 or 8 digits, got '{code}'"),
        ));
    }

    let chapter = registry::chapter(&code)
        .filter(|c| c.code != "99")
        .ok_or_else(|| hsn_error(&code, format!("Unknown HSN chapter '{}'", &code[..2])))?;

    let registered = registry::find_by_prefix(&code);

    Ok(HsnInfo {
        chapter: chapter.code.to_string(),
        chapter_description: chapter.description.to_string(),
        section: chapter.section.to_string(),
        description: registered.as_ref().map(|h| h.description.clone()),
        recommended_rate: registered.map(|h| h.rate),
        code,
    })
}
