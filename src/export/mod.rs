//! Portal export of generated returns
//!
//! Serializes a return into the JSON layout accepted by the GST portal,
//! checks the upload size limit and names the file the way the portal
//! expects (`{RETURN_TYPE}_{GSTIN}_{PERIOD}.json`).

use bigdecimal::BigDecimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::{GstConfig, DEFAULT_PORTAL_MAX_SIZE_BYTES};
use crate::returns::ReturnValidation;
use crate::traits::{FilingReturn, ReturnType};
use crate::types::*;

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Pretty-print the JSON
    pub pretty: bool,
    /// Run the return's validator and attach the result
    pub validate: bool,
    /// Upload limit in bytes
    pub max_size_bytes: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            validate: true,
            max_size_bytes: DEFAULT_PORTAL_MAX_SIZE_BYTES,
        }
    }
}

impl From<&GstConfig> for ExportOptions {
    fn from(config: &GstConfig) -> Self {
        Self {
            pretty: config.pretty_export,
            max_size_bytes: config.portal_max_size_bytes,
            ..Self::default()
        }
    }
}

/// Record counts and value totals of an exported return
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSummary {
    pub return_type: ReturnType,
    pub gstin: String,
    pub period: String,
    /// Records per return table
    pub record_counts: BTreeMap<String, usize>,
    pub taxable_value: BigDecimal,
    pub tax_amount: BigDecimal,
}

/// A return ready for upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalExport {
    pub json: String,
    pub filename: String,
    pub size_bytes: usize,
    pub within_size_limit: bool,
    /// Present when validation was requested
    pub validation: Option<ReturnValidation>,
    pub summary: ExportSummary,
}

/// Portal file name of a return
pub fn export_filename<R: FilingReturn>(ret: &R) -> String {
    format!(
        "{}_{}_{}.json",
        ret.return_type().code(),
        ret.gstin(),
        ret.period()
    )
}

/// Serialize a return for upload to the portal.
///
/// An oversize payload is still returned; it is flagged through
/// `within_size_limit` and, when validating, as a validation error.
pub fn export_for_portal<R: FilingReturn>(ret: &R, options: &ExportOptions) -> GstResult<PortalExport> {
    let json = if options.pretty {
        serde_json::to_string_pretty(ret)
    } else {
        serde_json::to_string(ret)
    }
    .map_err(|e| ReturnError::Assembly(e.to_string()))?;

    let size_bytes = json.len();
    let within_size_limit = size_bytes <= options.max_size_bytes;
    let filename = export_filename(ret);

    if !within_size_limit {
        warn!(
            file = %filename,
            size_bytes,
            max_size_bytes = options.max_size_bytes,
            "export exceeds portal size limit"
        );
    }

    let validation = options.validate.then(|| {
        let mut validation = ret.validate();
        if !within_size_limit {
            validation.push(format!(
                "Export size {} bytes exceeds portal limit of {} bytes",
                size_bytes, options.max_size_bytes
            ));
        }
        validation
    });

    debug!(file = %filename, size_bytes, "return exported");

    Ok(PortalExport {
        json,
        filename,
        size_bytes,
        within_size_limit,
        validation,
        summary: ret.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::{generate_gstr1, generate_gstr3b, ItcClaim, TaxComponents};
    use chrono::NaiveDate;

    const GSTIN: &str = "27AAPFU0939F1ZV";

    fn gstr1() -> crate::returns::Gstr1Return {
        let invoice = Invoice::new(
            "INV-1".to_string(),
            NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            TransactionType::B2b,
            GSTIN.to_string(),
            "27".to_string(),
            "24".to_string(),
        )
        .with_customer_gstin("24AAACC1206D1ZM")
        .line(
            InvoiceLineItem::new(
                1,
                "Office chair".to_string(),
                BigDecimal::from(4),
                BigDecimal::from(2500),
                BigDecimal::from(18),
            )
            .with_hsn("9401"),
        );
        generate_gstr1(GSTIN, "042024", &[invoice]).unwrap()
    }

    #[test]
    fn test_filename_and_summary() {
        let export = export_for_portal(&gstr1(), &ExportOptions::default()).unwrap();
        assert_eq!(export.filename, "GSTR1_27AAPFU0939F1ZV_042024.json");
        assert_eq!(export.size_bytes, export.json.len());
        assert!(export.within_size_limit);
        assert_eq!(export.summary.record_counts["b2b"], 1);
        assert_eq!(export.summary.taxable_value, BigDecimal::from(10000));
        assert_eq!(export.summary.tax_amount, BigDecimal::from(1800));
    }

    #[test]
    fn test_oversize_flagged() {
        let options = ExportOptions {
            max_size_bytes: 64,
            ..ExportOptions::default()
        };
        let export = export_for_portal(&gstr1(), &options).unwrap();
        assert!(!export.within_size_limit);
        let validation = export.validation.unwrap();
        assert!(!validation.is_valid);
        assert!(validation.errors.iter().any(|e| e.contains("exceeds portal limit")));
    }

    #[test]
    fn test_pretty_and_unvalidated() {
        let options = ExportOptions {
            pretty: true,
            validate: false,
            ..ExportOptions::default()
        };
        let ret = generate_gstr3b(
            GSTIN,
            "042024",
            TaxComponents::default(),
            TaxComponents::default(),
            ItcClaim::default(),
        )
        .unwrap();
        let export = export_for_portal(&ret, &options).unwrap();
        assert!(export.json.contains('\n'));
        assert!(export.validation.is_none());
        assert_eq!(export.filename, "GSTR3B_27AAPFU0939F1ZV_042024.json");
    }

    #[test]
    fn test_options_from_config() {
        let config = GstConfig {
            pretty_export: true,
            portal_max_size_bytes: 1024,
            ..GstConfig::default()
        };
        let options = ExportOptions::from(&config);
        assert!(options.pretty);
        assert!(options.validate);
        assert_eq!(options.max_size_bytes, 1024);
    }
}
