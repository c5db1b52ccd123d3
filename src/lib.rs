//! # GST Core
//!
//! Indian Goods & Services Tax computation and return filing.
//!
//! ## Features
//!
//! - **Tax calculation**: CGST/SGST/IGST split, cess, inclusive pricing and line discounts
//! - **Identifier validation**: GSTIN checksum, PAN, HSN and SAC codes, state codes
//! - **Classification**: static HSN registry, custom rate overrides and a cached provider chain
//! - **Returns**: GSTR-1 table classification and GSTR-3B aggregation with validation
//! - **Portal export**: JSON in the portal layout with size checks and file naming
//!
//! ## Quick Start
//!
//! ```rust
//! use gst_core::{calculate_gst, validate_gstin, GstOptions};
//! use bigdecimal::BigDecimal;
//!
//! let gstin = validate_gstin("27AAPFU0939F1ZV").unwrap();
//! assert_eq!(&gstin[..2], "27");
//!
//! let breakdown = calculate_gst(
//!     BigDecimal::from(10000),
//!     BigDecimal::from(18),
//!     "27",
//!     "29",
//!     &GstOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(breakdown.igst, BigDecimal::from(1800));
//! ```

pub mod classification;
pub mod config;
pub mod export;
pub mod identifiers;
pub mod returns;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use classification::{CustomRateTable, LookupResult, LookupSource, ProviderChain, ProviderConfig};
pub use config::GstConfig;
pub use export::{export_for_portal, ExportOptions, ExportSummary, PortalExport};
pub use identifiers::{
    extract_gstin, validate_gstin, validate_hsn, validate_pan, validate_sac, GstinDetails,
};
pub use returns::*;
pub use tax::*;
pub use traits::*;
pub use types::*;
