//! GST (Goods and Services Tax) calculation engine for Indian tax compliance

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::identifiers::is_valid_state_code;
use crate::types::*;
use crate::utils::*;

/// GST rate structure for Indian taxation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRate {
    /// Total GST rate percentage (e.g., 18.0 for 18%)
    pub total_rate: BigDecimal,
    /// CGST rate percentage (Central GST)
    pub cgst_rate: BigDecimal,
    /// SGST rate percentage (State GST)
    pub sgst_rate: BigDecimal,
    /// IGST rate percentage (Integrated GST)
    pub igst_rate: BigDecimal,
}

impl GstRate {
    /// Create a new GST rate with intra-state rates (CGST + SGST)
    pub fn intra_state(total_rate: BigDecimal) -> Self {
        let half_rate = &total_rate / BigDecimal::from(2);
        Self {
            total_rate,
            cgst_rate: half_rate.clone(),
            sgst_rate: half_rate,
            igst_rate: BigDecimal::from(0),
        }
    }

    /// Create a new GST rate with inter-state rates (IGST)
    pub fn inter_state(total_rate: BigDecimal) -> Self {
        Self {
            total_rate: total_rate.clone(),
            cgst_rate: BigDecimal::from(0),
            sgst_rate: BigDecimal::from(0),
            igst_rate: total_rate,
        }
    }

    /// Split a rate for the given supply type
    pub fn for_supply(total_rate: BigDecimal, is_inter_state: bool) -> Self {
        if is_inter_state {
            Self::inter_state(total_rate)
        } else {
            Self::intra_state(total_rate)
        }
    }

    /// Validate that the GST rate structure is correct
    pub fn validate(&self) -> GstResult<()> {
        validate_gst_rate(&self.total_rate)?;

        let calculated_total = &self.cgst_rate + &self.sgst_rate + &self.igst_rate;
        if calculated_total != self.total_rate {
            return Err(CalculationError::Inconsistent(format!(
                "GST components don't add up to total rate: {} != {}",
                calculated_total, self.total_rate
            ))
            .into());
        }

        // For intra-state transactions, CGST and SGST should be equal
        if self.igst_rate == BigDecimal::from(0) && self.cgst_rate != self.sgst_rate {
            return Err(CalculationError::Inconsistent(
                "CGST and SGST rates must be equal for intra-state transactions".to_string(),
            )
            .into());
        }

        // For inter-state transactions, only IGST should be non-zero
        if self.igst_rate > BigDecimal::from(0)
            && (self.cgst_rate > BigDecimal::from(0) || self.sgst_rate > BigDecimal::from(0))
        {
            return Err(CalculationError::Inconsistent(
                "Only IGST should be applicable for inter-state transactions".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

/// Standard GST slabs for different categories of goods and services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GstCategory {
    /// Essential items (food, medicines, etc.) - 0%
    Essential,
    /// Reduced rate items - 5%
    Reduced,
    /// Standard rate items - 12%
    Standard,
    /// Higher rate items - 18%
    Higher,
    /// Luxury/Sin goods - 28%
    Luxury,
}

impl GstCategory {
    /// Get the standard GST rate for this category
    pub fn rate(&self) -> BigDecimal {
        match self {
            GstCategory::Essential => BigDecimal::from(0),
            GstCategory::Reduced => BigDecimal::from(5),
            GstCategory::Standard => BigDecimal::from(12),
            GstCategory::Higher => BigDecimal::from(18),
            GstCategory::Luxury => BigDecimal::from(28),
        }
    }

    /// Typical slab of a two-digit HSN chapter, used when no code matches
    pub fn for_chapter(chapter: u32) -> Self {
        match chapter {
            1..=4 | 7 | 8 | 10 => GstCategory::Essential,
            11 | 15 | 17 | 19..=21 => GstCategory::Reduced,
            25 | 27..=30 => GstCategory::Standard,
            84 | 85 | 87 | 90 => GstCategory::Higher,
            22 | 24 | 33 | 34 => GstCategory::Luxury,
            _ => GstCategory::Higher,
        }
    }
}

/// Input of [`calculate_tax`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRequest {
    /// Amount to tax; includes tax when `is_inclusive` is set
    pub amount: BigDecimal,
    pub gst_rate: BigDecimal,
    pub is_inclusive: bool,
    pub is_inter_state: bool,
    pub cess_rate: BigDecimal,
}

impl TaxRequest {
    /// Exclusive, intra-state request without cess
    pub fn new(amount: BigDecimal, gst_rate: BigDecimal) -> Self {
        Self {
            amount,
            gst_rate,
            is_inclusive: false,
            is_inter_state: false,
            cess_rate: BigDecimal::from(0),
        }
    }

    pub fn inter_state(mut self, is_inter_state: bool) -> Self {
        self.is_inter_state = is_inter_state;
        self
    }

    pub fn inclusive(mut self, is_inclusive: bool) -> Self {
        self.is_inclusive = is_inclusive;
        self
    }

    pub fn cess(mut self, cess_rate: BigDecimal) -> Self {
        self.cess_rate = cess_rate;
        self
    }
}

/// Compute the GST breakdown of a single amount.
///
/// For inclusive amounts the taxable base is
/// `amount / (1 + (gst_rate + cess_rate) / 100)`. Each tax component is
/// computed from the unrounded base and rounded to 2 decimals (half-up). The
/// taxable amount is then the inclusive amount less the rounded tax, so
/// `total_amount` is exactly the amount passed in.
pub fn calculate_tax(request: &TaxRequest) -> GstResult<TaxBreakdown> {
    validate_positive_amount(&request.amount)?;
    validate_gst_rate(&request.gst_rate)?;
    validate_cess_rate(&request.cess_rate)?;

    let split = GstRate::for_supply(request.gst_rate.clone(), request.is_inter_state);
    split.validate()?;

    let base = if request.is_inclusive {
        let divisor = BigDecimal::from(1)
            + (&request.gst_rate + &request.cess_rate) / BigDecimal::from(100);
        &request.amount / divisor
    } else {
        round_half_up(&request.amount)
    };

    let cgst = round_half_up(&percent_of(&base, &split.cgst_rate));
    let sgst = round_half_up(&percent_of(&base, &split.sgst_rate));
    let igst = round_half_up(&percent_of(&base, &split.igst_rate));
    let cess = round_half_up(&percent_of(&base, &request.cess_rate));
    let total_tax = &cgst + &sgst + &igst + &cess;

    let (taxable_amount, total_amount) = if request.is_inclusive {
        let total_amount = round_half_up(&request.amount);
        (&total_amount - &total_tax, total_amount)
    } else {
        let total_amount = &base + &total_tax;
        (base, total_amount)
    };

    Ok(TaxBreakdown {
        taxable_amount,
        cgst,
        sgst,
        igst,
        cess,
        total_tax,
        total_amount,
        applied_rate: request.gst_rate.clone(),
        cess_rate: request.cess_rate.clone(),
        is_inter_state: request.is_inter_state,
        is_inclusive: request.is_inclusive,
    })
}

/// Options of [`calculate_gst`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GstOptions {
    pub is_inclusive: bool,
    pub cess_rate: Option<BigDecimal>,
}

fn require_state(code: &str) -> GstResult<()> {
    if is_valid_state_code(code.trim()) {
        Ok(())
    } else {
        Err(CalculationError::InvalidStateCode(code.to_string()).into())
    }
}

/// Compute GST between two states; different states make the supply inter-state
pub fn calculate_gst(
    amount: BigDecimal,
    rate: BigDecimal,
    supplier_state: &str,
    customer_state: &str,
    options: &GstOptions,
) -> GstResult<TaxBreakdown> {
    require_state(supplier_state)?;
    require_state(customer_state)?;

    let request = TaxRequest::new(amount, rate)
        .inter_state(supplier_state.trim() != customer_state.trim())
        .inclusive(options.is_inclusive)
        .cess(options.cess_rate.clone().unwrap_or_else(|| BigDecimal::from(0)));

    calculate_tax(&request)
}

/// Tax of one invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTax {
    pub serial_no: u32,
    /// Quantity times unit price
    pub gross_amount: BigDecimal,
    pub discount_amount: BigDecimal,
    /// Gross minus discount; the amount that was taxed
    pub net_amount: BigDecimal,
    pub breakdown: TaxBreakdown,
}

/// Compute the tax of a line item on its discounted value.
///
/// A line whose discounted value is zero (free goods, full discount) yields a
/// zero breakdown.
pub fn calculate_line_item_tax(
    item: &InvoiceLineItem,
    is_inter_state: bool,
    is_inclusive: bool,
) -> GstResult<LineTax> {
    item.validate()?;

    let gross_amount = round_half_up(&(&item.quantity * &item.unit_price));
    let discount_amount = round_half_up(&percent_of(&gross_amount, &item.discount_percent));
    let net_amount = &gross_amount - &discount_amount;

    let breakdown = if net_amount == BigDecimal::from(0) {
        TaxBreakdown::zero(
            item.gst_rate.clone(),
            item.cess_rate.clone(),
            is_inter_state,
            is_inclusive,
        )
    } else {
        calculate_tax(
            &TaxRequest::new(net_amount.clone(), item.gst_rate.clone())
                .inter_state(is_inter_state)
                .inclusive(is_inclusive)
                .cess(item.cess_rate.clone()),
        )?
    };

    Ok(LineTax {
        serial_no: item.serial_no,
        gross_amount,
        discount_amount,
        net_amount,
        breakdown,
    })
}

/// Tax of a whole invoice, totalled from rounded line values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTax {
    pub lines: Vec<LineTax>,
    pub is_inter_state: bool,
    pub taxable_amount: BigDecimal,
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
    pub cess: BigDecimal,
    pub total_tax: BigDecimal,
    pub total_amount: BigDecimal,
}

impl InvoiceTax {
    fn from_lines(lines: Vec<LineTax>, is_inter_state: bool) -> Self {
        let taxable_amount: BigDecimal = lines.iter().map(|l| &l.breakdown.taxable_amount).sum();
        let cgst: BigDecimal = lines.iter().map(|l| &l.breakdown.cgst).sum();
        let sgst: BigDecimal = lines.iter().map(|l| &l.breakdown.sgst).sum();
        let igst: BigDecimal = lines.iter().map(|l| &l.breakdown.igst).sum();
        let cess: BigDecimal = lines.iter().map(|l| &l.breakdown.cess).sum();

        let total_tax = &cgst + &sgst + &igst + &cess;
        let total_amount = &taxable_amount + &total_tax;

        Self {
            lines,
            is_inter_state,
            taxable_amount,
            cgst,
            sgst,
            igst,
            cess,
            total_tax,
            total_amount,
        }
    }
}

/// Whether an invoice is an inter-state supply.
///
/// Exports and large B2C invoices are always inter-state. Otherwise both
/// state codes must be known and the supply is inter-state when they differ.
pub fn resolve_inter_state(invoice: &Invoice) -> GstResult<bool> {
    match invoice.transaction_type {
        TransactionType::Export => return Ok(true),
        TransactionType::B2cl => {
            require_state(&invoice.supplier_state)?;
            require_state(&invoice.customer_state)?;
            return Ok(true);
        }
        _ => {}
    }

    require_state(&invoice.supplier_state)?;
    require_state(&invoice.customer_state)?;
    Ok(invoice.is_inter_state())
}

/// Compute every line of an invoice and sum the rounded line values.
///
/// Exports under bond or LUT carry no IGST or cess, so their lines are taxed
/// at a zero rate.
pub fn calculate_invoice_tax(invoice: &Invoice, is_inclusive: bool) -> GstResult<InvoiceTax> {
    let is_inter_state = resolve_inter_state(invoice)?;
    let zero_rated = invoice.is_zero_rated_export();

    let lines = invoice
        .line_items
        .iter()
        .map(|item| {
            if zero_rated {
                let untaxed = InvoiceLineItem {
                    gst_rate: BigDecimal::from(0),
                    cess_rate: BigDecimal::from(0),
                    ..item.clone()
                };
                calculate_line_item_tax(&untaxed, is_inter_state, is_inclusive)
            } else {
                calculate_line_item_tax(item, is_inter_state, is_inclusive)
            }
        })
        .collect::<GstResult<Vec<_>>>()?;

    Ok(InvoiceTax::from_lines(lines, is_inter_state))
}

/// Base and tax contained in a tax-inclusive amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseGst {
    pub inclusive_amount: BigDecimal,
    pub rate: BigDecimal,
    pub base_amount: BigDecimal,
    pub gst_amount: BigDecimal,
}

/// Split a tax-inclusive amount into base and GST
pub fn calculate_reverse_gst(inclusive_amount: BigDecimal, rate: BigDecimal) -> GstResult<ReverseGst> {
    validate_positive_amount(&inclusive_amount)?;
    validate_gst_rate(&rate)?;

    let divisor = BigDecimal::from(1) + &rate / BigDecimal::from(100);
    let base_amount = round_half_up(&(&inclusive_amount / divisor));
    let gst_amount = round_half_up(&(&inclusive_amount - &base_amount));

    Ok(ReverseGst {
        inclusive_amount,
        rate,
        base_amount,
        gst_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_gst_rate_intra_state() {
        let rate = GstRate::intra_state(BigDecimal::from(18));
        assert_eq!(rate.total_rate, BigDecimal::from(18));
        assert_eq!(rate.cgst_rate, BigDecimal::from(9));
        assert_eq!(rate.sgst_rate, BigDecimal::from(9));
        assert_eq!(rate.igst_rate, BigDecimal::from(0));
        assert!(rate.validate().is_ok());
    }

    #[test]
    fn test_gst_rate_inter_state() {
        let rate = GstRate::inter_state(BigDecimal::from(18));
        assert_eq!(rate.cgst_rate, BigDecimal::from(0));
        assert_eq!(rate.sgst_rate, BigDecimal::from(0));
        assert_eq!(rate.igst_rate, BigDecimal::from(18));
        assert!(rate.validate().is_ok());
    }

    #[test]
    fn test_inter_state_tax() {
        let breakdown = calculate_tax(
            &TaxRequest::new(BigDecimal::from(10000), BigDecimal::from(18)).inter_state(true),
        )
        .unwrap();

        assert_eq!(breakdown.taxable_amount, BigDecimal::from(10000));
        assert_eq!(breakdown.igst, BigDecimal::from(1800));
        assert_eq!(breakdown.cgst, BigDecimal::from(0));
        assert_eq!(breakdown.sgst, BigDecimal::from(0));
        assert_eq!(breakdown.total_tax, BigDecimal::from(1800));
        assert_eq!(breakdown.total_amount, BigDecimal::from(11800));
        assert!(breakdown.validate().is_ok());
    }

    #[test]
    fn test_intra_state_tax() {
        let breakdown =
            calculate_tax(&TaxRequest::new(BigDecimal::from(10000), BigDecimal::from(18)))
                .unwrap();

        assert_eq!(breakdown.cgst, BigDecimal::from(900));
        assert_eq!(breakdown.sgst, BigDecimal::from(900));
        assert_eq!(breakdown.igst, BigDecimal::from(0));
        assert!(breakdown.validate().is_ok());
    }

    #[test]
    fn test_inclusive_tax() {
        let breakdown = calculate_tax(
            &TaxRequest::new(BigDecimal::from(11800), BigDecimal::from(18)).inclusive(true),
        )
        .unwrap();

        assert_eq!(breakdown.taxable_amount, BigDecimal::from(10000));
        assert_eq!(breakdown.total_tax, BigDecimal::from(1800));
        assert_eq!(breakdown.total_amount, BigDecimal::from(11800));
    }

    #[test]
    fn test_inclusive_with_cess() {
        // 12800 / 1.40 = 9142.857...
        let breakdown = calculate_tax(
            &TaxRequest::new(BigDecimal::from(12800), BigDecimal::from(28))
                .inclusive(true)
                .inter_state(true)
                .cess(BigDecimal::from(12)),
        )
        .unwrap();

        assert_eq!(breakdown.taxable_amount, dec("9142.86"));
        assert_eq!(breakdown.igst, dec("2560.00"));
        assert_eq!(breakdown.cess, dec("1097.14"));
        assert_eq!(breakdown.total_amount, dec("12800.00"));
    }

    #[test]
    fn test_inclusive_amount_unchanged() {
        // 100 / 1.18 = 84.7457..., IGST 15.2542... -> 15.25
        let inter = calculate_tax(
            &TaxRequest::new(BigDecimal::from(100), BigDecimal::from(18))
                .inclusive(true)
                .inter_state(true),
        )
        .unwrap();
        assert_eq!(inter.igst, dec("15.25"));
        assert_eq!(inter.taxable_amount, dec("84.75"));
        assert_eq!(inter.total_amount, dec("100.00"));
        assert!(inter.validate().is_ok());

        for amount in ["100", "999.99", "1.01", "56789.10"] {
            let intra = calculate_tax(
                &TaxRequest::new(dec(amount), BigDecimal::from(5))
                    .inclusive(true)
                    .cess(dec("1.5")),
            )
            .unwrap();
            assert_eq!(intra.total_amount, dec(amount), "{amount}");
            assert!(intra.validate().is_ok(), "{amount}");
        }
    }

    #[test]
    fn test_inconsistent_split_rejected() {
        let split = GstRate {
            total_rate: BigDecimal::from(18),
            cgst_rate: BigDecimal::from(9),
            sgst_rate: BigDecimal::from(0),
            igst_rate: BigDecimal::from(9),
        };
        assert!(matches!(
            split.validate(),
            Err(GstError::Calculation(CalculationError::Inconsistent(_)))
        ));
    }

    #[test]
    fn test_rounding_half_up_split() {
        // 5% of 100.10 = 5.005, halves 2.5025 -> 2.50 each
        let breakdown =
            calculate_tax(&TaxRequest::new(dec("100.10"), BigDecimal::from(5))).unwrap();
        assert_eq!(breakdown.cgst, dec("2.50"));
        assert_eq!(breakdown.sgst, dec("2.50"));
        assert_eq!(breakdown.total_tax, dec("5.00"));

        let inter = calculate_tax(&TaxRequest::new(dec("100.10"), BigDecimal::from(5)).inter_state(true))
            .unwrap();
        assert_eq!(inter.igst, dec("5.01"));
    }

    #[test]
    fn test_deterministic() {
        let request = TaxRequest::new(dec("1234.56"), dec("12")).cess(dec("1.5"));
        assert_eq!(calculate_tax(&request).unwrap(), calculate_tax(&request).unwrap());
    }

    #[test]
    fn test_inclusive_exclusive_round_trip() {
        for (amount, rate) in [("999.99", 18), ("1.00", 28), ("12345.67", 5), ("80.01", 12)] {
            let exclusive = calculate_tax(
                &TaxRequest::new(dec(amount), BigDecimal::from(rate)).inter_state(true),
            )
            .unwrap();
            let inclusive = calculate_tax(
                &TaxRequest::new(exclusive.total_amount.clone(), BigDecimal::from(rate))
                    .inter_state(true)
                    .inclusive(true),
            )
            .unwrap();
            assert!(within_paisa(&inclusive.taxable_amount, &dec(amount)), "{amount}");
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            calculate_tax(&TaxRequest::new(BigDecimal::from(0), BigDecimal::from(18))),
            Err(GstError::Calculation(CalculationError::InvalidAmount(_)))
        ));
        assert!(matches!(
            calculate_tax(&TaxRequest::new(BigDecimal::from(10), BigDecimal::from(51))),
            Err(GstError::Calculation(CalculationError::InvalidRate(_)))
        ));
        assert!(matches!(
            calculate_tax(
                &TaxRequest::new(BigDecimal::from(10), BigDecimal::from(5)).cess(BigDecimal::from(-1))
            ),
            Err(GstError::Calculation(CalculationError::InvalidCessRate(_)))
        ));
    }

    #[test]
    fn test_calculate_gst_between_states() {
        let options = GstOptions::default();
        let inter = calculate_gst(BigDecimal::from(1000), BigDecimal::from(12), "27", "29", &options)
            .unwrap();
        assert!(inter.is_inter_state);
        assert_eq!(inter.igst, BigDecimal::from(120));

        let intra = calculate_gst(BigDecimal::from(1000), BigDecimal::from(12), "27", "27", &options)
            .unwrap();
        assert_eq!(intra.cgst, BigDecimal::from(60));

        let err = calculate_gst(BigDecimal::from(1000), BigDecimal::from(12), "27", "55", &options)
            .unwrap_err();
        assert_eq!(
            err,
            GstError::Calculation(CalculationError::InvalidStateCode("55".to_string()))
        );
    }

    #[test]
    fn test_line_item_with_discount() {
        let item = InvoiceLineItem::new(
            1,
            "Monitor".to_string(),
            BigDecimal::from(3),
            dec("333.33"),
            BigDecimal::from(18),
        )
        .with_discount(BigDecimal::from(10));

        let line = calculate_line_item_tax(&item, false, false).unwrap();
        assert_eq!(line.gross_amount, dec("999.99"));
        assert_eq!(line.discount_amount, dec("100.00"));
        assert_eq!(line.net_amount, dec("899.99"));
        assert_eq!(line.breakdown.cgst, dec("81.00"));
        assert_eq!(line.breakdown.sgst, dec("81.00"));
    }

    #[test]
    fn test_free_line_item() {
        let item = InvoiceLineItem::new(
            2,
            "Sample".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(0),
            BigDecimal::from(18),
        );
        let line = calculate_line_item_tax(&item, true, false).unwrap();
        assert_eq!(line.breakdown.total_amount, BigDecimal::from(0));
    }

    #[test]
    fn test_line_item_rejects_bad_quantity() {
        let item = InvoiceLineItem::new(
            1,
            "Widget".to_string(),
            BigDecimal::from(0),
            BigDecimal::from(10),
            BigDecimal::from(18),
        );
        assert!(matches!(
            calculate_line_item_tax(&item, true, false),
            Err(GstError::Calculation(CalculationError::InvalidQuantity(_)))
        ));
    }

    #[test]
    fn test_invoice_totals_sum_rounded_lines() {
        // Each line: 0.05 * 18% = 0.009 -> 0.01 IGST; unrounded total would be 0.027
        let mut invoice = Invoice::new(
            "INV-1".to_string(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            TransactionType::B2cs,
            "27AAPFU0939F1ZV".to_string(),
            "27".to_string(),
            "29".to_string(),
        );
        for serial_no in 1..=3 {
            invoice.add_line_item(InvoiceLineItem::new(
                serial_no,
                "Pin".to_string(),
                BigDecimal::from(1),
                dec("0.05"),
                BigDecimal::from(18),
            ));
        }

        let tax = calculate_invoice_tax(&invoice, false).unwrap();
        assert!(tax.is_inter_state);
        assert_eq!(tax.igst, dec("0.03"));
        assert_eq!(tax.taxable_amount, dec("0.15"));
        assert_eq!(tax.total_amount, dec("0.18"));
    }

    #[test]
    fn test_invoice_rejects_unknown_state() {
        let invoice = Invoice::new(
            "INV-2".to_string(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            TransactionType::B2b,
            "27AAPFU0939F1ZV".to_string(),
            "27".to_string(),
            "00".to_string(),
        );
        assert!(calculate_invoice_tax(&invoice, false).is_err());
    }

    #[test]
    fn test_export_is_inter_state() {
        let invoice = Invoice::new(
            "EXP-1".to_string(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            TransactionType::Export,
            "27AAPFU0939F1ZV".to_string(),
            "27".to_string(),
            "96".to_string(),
        );
        assert!(resolve_inter_state(&invoice).unwrap());
    }

    #[test]
    fn test_large_b2c_is_inter_state() {
        let invoice = Invoice::new(
            "L-1".to_string(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            TransactionType::B2cl,
            "27AAPFU0939F1ZV".to_string(),
            "27".to_string(),
            "27".to_string(),
        )
        .line(InvoiceLineItem::new(
            1,
            "Server".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(300000),
            BigDecimal::from(18),
        ));

        let tax = calculate_invoice_tax(&invoice, false).unwrap();
        assert!(tax.is_inter_state);
        assert_eq!(tax.igst, BigDecimal::from(54000));
        assert_eq!(tax.cgst, BigDecimal::from(0));
    }

    #[test]
    fn test_export_under_lut_is_zero_rated() {
        let export = |export_type| {
            Invoice::new(
                "EXP-2".to_string(),
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                TransactionType::Export,
                "27AAPFU0939F1ZV".to_string(),
                "27".to_string(),
                "96".to_string(),
            )
            .with_export_type(export_type)
            .line(
                InvoiceLineItem::new(
                    1,
                    "T-shirts".to_string(),
                    BigDecimal::from(500),
                    BigDecimal::from(210),
                    BigDecimal::from(5),
                )
                .with_cess(BigDecimal::from(1)),
            )
        };

        let lut = calculate_invoice_tax(&export(ExportType::WithoutPayment), false).unwrap();
        assert_eq!(lut.taxable_amount, BigDecimal::from(105000));
        assert_eq!(lut.total_tax, BigDecimal::from(0));
        assert_eq!(lut.total_amount, BigDecimal::from(105000));

        let paid = calculate_invoice_tax(&export(ExportType::WithPayment), false).unwrap();
        assert_eq!(paid.igst, BigDecimal::from(5250));
        assert_eq!(paid.cess, BigDecimal::from(1050));
    }

    #[test]
    fn test_reverse_gst() {
        let reverse = calculate_reverse_gst(BigDecimal::from(1180), BigDecimal::from(18)).unwrap();
        assert_eq!(reverse.base_amount, BigDecimal::from(1000));
        assert_eq!(reverse.gst_amount, BigDecimal::from(180));

        let reverse = calculate_reverse_gst(BigDecimal::from(100), BigDecimal::from(12)).unwrap();
        assert_eq!(reverse.base_amount, dec("89.29"));
        assert_eq!(reverse.gst_amount, dec("10.71"));
    }

    #[test]
    fn test_chapter_slabs() {
        assert_eq!(GstCategory::for_chapter(4), GstCategory::Essential);
        assert_eq!(GstCategory::for_chapter(19), GstCategory::Reduced);
        assert_eq!(GstCategory::for_chapter(30), GstCategory::Standard);
        assert_eq!(GstCategory::for_chapter(85), GstCategory::Higher);
        assert_eq!(GstCategory::for_chapter(24), GstCategory::Luxury);
        assert_eq!(GstCategory::for_chapter(61), GstCategory::Higher);
    }
}
