//! Core types and data structures for GST computation and return filing

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statutory transaction category of an invoice.
///
/// The categories are mutually exclusive and decide which GSTR-1 table
/// the invoice is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Supply to a registered business
    #[serde(rename = "B2B")]
    B2b,
    /// Large inter-state supply to an unregistered buyer
    #[serde(rename = "B2CL")]
    B2cl,
    /// Other supplies to unregistered buyers, reported in aggregate
    #[serde(rename = "B2CS")]
    B2cs,
    /// Export of goods or services
    #[serde(rename = "EXPORT")]
    Export,
    /// Nil-rated, exempted or non-GST supply
    #[serde(rename = "NIL")]
    Nil,
}

/// Document type of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvoiceType {
    #[default]
    Regular,
    /// Reduces a previously issued invoice
    CreditNote,
    /// Increases a previously issued invoice
    DebitNote,
}

impl InvoiceType {
    /// Whether this document is a credit or debit note
    pub fn is_note(&self) -> bool {
        matches!(self, InvoiceType::CreditNote | InvoiceType::DebitNote)
    }
}

/// Whether IGST was paid on an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ExportType {
    /// Export with payment of IGST
    #[serde(rename = "WPAY")]
    WithPayment,
    /// Export under bond or LUT without payment of IGST
    #[default]
    #[serde(rename = "WOPAY")]
    WithoutPayment,
}

impl ExportType {
    /// Portal code for this export type
    pub fn code(&self) -> &'static str {
        match self {
            ExportType::WithPayment => "WPAY",
            ExportType::WithoutPayment => "WOPAY",
        }
    }
}

/// A single line of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// Position of the line on the invoice, starting at 1
    pub serial_no: u32,
    /// Goods or service description
    pub description: String,
    /// HSN (goods) or SAC (services) code
    pub hsn_code: Option<String>,
    /// Quantity supplied, must be positive
    pub quantity: BigDecimal,
    /// Unit quantity code (NOS, KGS, ...)
    pub unit: String,
    /// Price per unit before tax
    pub unit_price: BigDecimal,
    /// Discount percentage applied to the gross line value (0-100)
    pub discount_percent: BigDecimal,
    /// GST rate percentage (0-50)
    pub gst_rate: BigDecimal,
    /// Compensation cess rate percentage
    pub cess_rate: BigDecimal,
    /// Whether the line is a service (SAC) rather than goods (HSN)
    pub is_service: bool,
}

impl InvoiceLineItem {
    /// Create a new line item with no discount or cess
    pub fn new(
        serial_no: u32,
        description: String,
        quantity: BigDecimal,
        unit_price: BigDecimal,
        gst_rate: BigDecimal,
    ) -> Self {
        Self {
            serial_no,
            description,
            hsn_code: None,
            quantity,
            unit: "NOS".to_string(),
            unit_price,
            discount_percent: BigDecimal::from(0),
            gst_rate,
            cess_rate: BigDecimal::from(0),
            is_service: false,
        }
    }

    pub fn with_hsn(mut self, code: &str) -> Self {
        self.hsn_code = Some(code.to_string());
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn with_discount(mut self, percent: BigDecimal) -> Self {
        self.discount_percent = percent;
        self
    }

    pub fn with_cess(mut self, rate: BigDecimal) -> Self {
        self.cess_rate = rate;
        self
    }

    /// Mark the line as a service
    pub fn service(mut self) -> Self {
        self.is_service = true;
        self
    }

    /// Validate quantity, price, discount and rate ranges
    pub fn validate(&self) -> GstResult<()> {
        crate::utils::validate_positive_quantity(&self.quantity)?;
        crate::utils::validate_unit_price(&self.unit_price)?;
        crate::utils::validate_discount(&self.discount_percent)?;
        crate::utils::validate_gst_rate(&self.gst_rate)?;
        crate::utils::validate_cess_rate(&self.cess_rate)?;
        Ok(())
    }
}

/// An invoice as supplied by the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice (or note) number
    pub number: String,
    /// Issue date
    pub date: NaiveDate,
    /// Regular invoice or credit/debit note
    pub invoice_type: InvoiceType,
    /// Statutory category driving GSTR-1 classification
    pub transaction_type: TransactionType,
    /// Export type, only meaningful for exports
    pub export_type: Option<ExportType>,
    /// Two-digit state code of the place of supply
    pub place_of_supply: String,
    /// GSTIN of the supplier
    pub supplier_gstin: String,
    /// GSTIN of the customer, required for B2B
    pub customer_gstin: Option<String>,
    /// Two-digit state code of the supplier
    pub supplier_state: String,
    /// Two-digit state code of the customer
    pub customer_state: String,
    /// Ordered invoice lines
    pub line_items: Vec<InvoiceLineItem>,
    /// Whether tax is payable by the recipient under reverse charge
    pub reverse_charge: bool,
}

impl Invoice {
    /// Create a new regular invoice.
    ///
    /// Place of supply defaults to the customer state.
    pub fn new(
        number: String,
        date: NaiveDate,
        transaction_type: TransactionType,
        supplier_gstin: String,
        supplier_state: String,
        customer_state: String,
    ) -> Self {
        Self {
            number,
            date,
            invoice_type: InvoiceType::Regular,
            transaction_type,
            export_type: None,
            place_of_supply: customer_state.clone(),
            supplier_gstin,
            customer_gstin: None,
            supplier_state,
            customer_state,
            line_items: Vec::new(),
            reverse_charge: false,
        }
    }

    pub fn with_customer_gstin(mut self, gstin: &str) -> Self {
        self.customer_gstin = Some(gstin.to_string());
        self
    }

    pub fn with_place_of_supply(mut self, state_code: &str) -> Self {
        self.place_of_supply = state_code.to_string();
        self
    }

    pub fn with_invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = invoice_type;
        self
    }

    pub fn with_export_type(mut self, export_type: ExportType) -> Self {
        self.export_type = Some(export_type);
        self
    }

    pub fn with_reverse_charge(mut self, reverse_charge: bool) -> Self {
        self.reverse_charge = reverse_charge;
        self
    }

    /// Append a line item
    pub fn add_line_item(&mut self, item: InvoiceLineItem) {
        self.line_items.push(item);
    }

    /// Append a line item, builder style
    pub fn line(mut self, item: InvoiceLineItem) -> Self {
        self.add_line_item(item);
        self
    }

    /// Whether supplier and customer are in different states
    pub fn is_inter_state(&self) -> bool {
        self.supplier_state.trim() != self.customer_state.trim()
    }

    /// Export under bond or LUT; an export without a type counts as one
    pub fn is_zero_rated_export(&self) -> bool {
        self.transaction_type == TransactionType::Export
            && self.export_type.unwrap_or_default() == ExportType::WithoutPayment
    }
}

/// Result of a tax computation on one amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Value on which tax is levied
    pub taxable_amount: BigDecimal,
    /// Central GST, intra-state only
    pub cgst: BigDecimal,
    /// State GST, intra-state only
    pub sgst: BigDecimal,
    /// Integrated GST, inter-state only
    pub igst: BigDecimal,
    /// Compensation cess, never split
    pub cess: BigDecimal,
    /// `cgst + sgst + igst + cess`
    pub total_tax: BigDecimal,
    /// `taxable_amount + total_tax`
    pub total_amount: BigDecimal,
    /// GST rate that was applied
    pub applied_rate: BigDecimal,
    /// Cess rate that was applied
    pub cess_rate: BigDecimal,
    pub is_inter_state: bool,
    /// Whether the input amount already included tax
    pub is_inclusive: bool,
}

impl TaxBreakdown {
    /// A breakdown with every amount set to zero
    pub fn zero(
        applied_rate: BigDecimal,
        cess_rate: BigDecimal,
        is_inter_state: bool,
        is_inclusive: bool,
    ) -> Self {
        Self {
            taxable_amount: BigDecimal::from(0),
            cgst: BigDecimal::from(0),
            sgst: BigDecimal::from(0),
            igst: BigDecimal::from(0),
            cess: BigDecimal::from(0),
            total_tax: BigDecimal::from(0),
            total_amount: BigDecimal::from(0),
            applied_rate,
            cess_rate,
            is_inter_state,
            is_inclusive,
        }
    }

    /// GST without cess
    pub fn gst_amount(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }

    /// Check the arithmetic and split invariants of the breakdown
    pub fn validate(&self) -> GstResult<()> {
        let component_sum = &self.cgst + &self.sgst + &self.igst + &self.cess;
        if component_sum != self.total_tax {
            return Err(CalculationError::Inconsistent(format!(
                "tax components add up to {} but total tax is {}",
                component_sum, self.total_tax
            ))
            .into());
        }

        if &self.taxable_amount + &self.total_tax != self.total_amount {
            return Err(CalculationError::Inconsistent(format!(
                "taxable amount {} plus tax {} does not equal total {}",
                self.taxable_amount, self.total_tax, self.total_amount
            ))
            .into());
        }

        let zero = BigDecimal::from(0);
        if self.is_inter_state && (self.cgst != zero || self.sgst != zero) {
            return Err(CalculationError::Inconsistent(
                "only IGST is applicable for inter-state supplies".to_string(),
            )
            .into());
        }

        if !self.is_inter_state && (self.igst != zero || self.cgst != self.sgst) {
            return Err(CalculationError::Inconsistent(
                "intra-state supplies must split tax equally into CGST and SGST".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

/// An HSN or SAC classification entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsnCode {
    /// 2, 4, 6 or 8 digit code
    pub code: String,
    pub description: String,
    /// Two-digit chapter the code belongs to
    pub chapter: String,
    /// Recommended GST rate percentage
    pub rate: BigDecimal,
    /// Compensation cess rate, if any
    pub cess: Option<BigDecimal>,
    /// Unit quantity code usually reported for the code
    pub unit: Option<String>,
}

/// Which identifier rule was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierErrorKind {
    /// Wrong length or character classes
    Format,
    /// Unknown state code
    StateCode,
    /// Embedded or standalone PAN is invalid
    Pan,
    /// 13th GSTIN character is not `1-9` or `A-Z`
    EntityNumber,
    /// Check character does not match
    Checksum,
    /// HSN code is structurally invalid or in an unknown chapter
    Hsn,
    /// SAC code is structurally invalid or in an unknown heading
    Sac,
}

/// A statutory identifier failed validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct IdentifierError {
    pub kind: IdentifierErrorKind,
    /// The offending input, normalized
    pub value: String,
    pub message: String,
}

impl IdentifierError {
    pub fn new(kind: IdentifierErrorKind, value: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.to_string(),
            message: message.into(),
        }
    }
}

/// Tax calculation input was out of range
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(BigDecimal),
    #[error("GST rate must be between 0 and 50, got {0}")]
    InvalidRate(BigDecimal),
    #[error("Cess rate cannot be negative, got {0}")]
    InvalidCessRate(BigDecimal),
    #[error("Quantity must be greater than zero, got {0}")]
    InvalidQuantity(BigDecimal),
    #[error("Unit price cannot be negative, got {0}")]
    InvalidUnitPrice(BigDecimal),
    #[error("Discount must be between 0 and 100 percent, got {0}")]
    InvalidDiscount(BigDecimal),
    #[error("Invalid state code: {0}")]
    InvalidStateCode(String),
    #[error("Inconsistent tax breakdown: {0}")]
    Inconsistent(String),
}

/// A return could not be generated
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReturnError {
    #[error("Invalid return period '{0}': expected MMYYYY")]
    InvalidPeriod(String),
    #[error("Customer GSTIN required for B2B transaction (invoice {0})")]
    MissingCustomerGstin(String),
    #[error("Return assembly failed: {0}")]
    Assembly(String),
}

/// Errors that can occur in GST computation and filing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GstError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    Return(#[from] ReturnError),
}

impl GstError {
    /// The identifier rule that failed, if this is an identifier error
    pub fn identifier_kind(&self) -> Option<IdentifierErrorKind> {
        match self {
            GstError::Identifier(e) => Some(e.kind),
            _ => None,
        }
    }
}

/// Result type for GST operations
pub type GstResult<T> = Result<T, GstError>;
