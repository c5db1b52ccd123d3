//! GSTR-3B monthly summary return

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, Sub};

use super::gstr1::{Gstr1Return, InvoiceItem, NoteRecord};
use super::period::ReturnPeriod;
use crate::export::ExportSummary;
use crate::identifiers::validate_gstin;
use crate::returns::validate::{validate_gstr3b, ReturnValidation};
use crate::tax::calculate_invoice_tax;
use crate::traits::{FilingReturn, ReturnType};
use crate::types::*;
use crate::utils::json_number;

/// Taxable value and tax heads of a supply aggregate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxComponents {
    #[serde(with = "json_number")]
    pub txval: BigDecimal,
    #[serde(with = "json_number")]
    pub iamt: BigDecimal,
    #[serde(with = "json_number")]
    pub camt: BigDecimal,
    #[serde(with = "json_number")]
    pub samt: BigDecimal,
    #[serde(with = "json_number")]
    pub csamt: BigDecimal,
}

impl TaxComponents {
    pub fn new(
        txval: BigDecimal,
        iamt: BigDecimal,
        camt: BigDecimal,
        samt: BigDecimal,
        csamt: BigDecimal,
    ) -> Self {
        Self {
            txval,
            iamt,
            camt,
            samt,
            csamt,
        }
    }

    pub fn total_tax(&self) -> BigDecimal {
        &self.iamt + &self.camt + &self.samt + &self.csamt
    }

    fn add_items(&mut self, items: &[InvoiceItem], negate: bool) {
        for item in items {
            let det = &item.itm_det;
            let zero = BigDecimal::from(0);
            let parts = [
                &det.txval,
                det.iamt.as_ref().unwrap_or(&zero),
                det.camt.as_ref().unwrap_or(&zero),
                det.samt.as_ref().unwrap_or(&zero),
                &det.csamt,
            ];
            let [txval, iamt, camt, samt, csamt] =
                parts.map(|v| if negate { -v.clone() } else { v.clone() });

            self.txval += txval;
            self.iamt += iamt;
            self.camt += camt;
            self.samt += samt;
            self.csamt += csamt;
        }
    }

    fn add_notes(&mut self, notes: &[NoteRecord]) {
        for note in notes {
            self.add_items(&note.itms, note.ntty == "C");
        }
    }

    /// Outward taxable supplies reported in a GSTR-1.
    ///
    /// Sums the B2B, B2CL, B2CS and export tables, adds debit notes and
    /// subtracts credit notes. Nil-rated supplies are excluded.
    pub fn from_gstr1(ret: &Gstr1Return) -> Self {
        let mut totals = Self::default();

        for entry in &ret.b2b {
            for inv in &entry.inv {
                totals.add_items(&inv.itms, false);
            }
        }
        for entry in &ret.b2cl {
            for inv in &entry.inv {
                totals.add_items(&inv.itms, false);
            }
        }
        for entry in &ret.exp {
            for inv in &entry.inv {
                totals.add_items(&inv.itms, false);
            }
        }
        for entry in &ret.b2cs {
            totals.txval += &entry.txval;
            totals.iamt += &entry.iamt;
            totals.camt += &entry.camt;
            totals.samt += &entry.samt;
            totals.csamt += &entry.csamt;
        }
        for entry in &ret.cdnr {
            totals.add_notes(&entry.nt);
        }
        totals.add_notes(&ret.cdnur);

        totals
    }

    /// Inward supplies liable to reverse charge.
    ///
    /// Invoices without the reverse-charge flag are ignored.
    pub fn from_reverse_charge(invoices: &[Invoice]) -> GstResult<Self> {
        let mut totals = Self::default();

        for invoice in invoices.iter().filter(|i| i.reverse_charge) {
            let tax = calculate_invoice_tax(invoice, false)?;
            totals.txval += tax.taxable_amount;
            totals.iamt += tax.igst;
            totals.camt += tax.cgst;
            totals.samt += tax.sgst;
            totals.csamt += tax.cess;
        }

        Ok(totals)
    }
}

impl Add for TaxComponents {
    type Output = TaxComponents;

    fn add(self, other: TaxComponents) -> TaxComponents {
        TaxComponents {
            txval: self.txval + other.txval,
            iamt: self.iamt + other.iamt,
            camt: self.camt + other.camt,
            samt: self.samt + other.samt,
            csamt: self.csamt + other.csamt,
        }
    }
}

/// Input tax credit heads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItcComponents {
    #[serde(with = "json_number")]
    pub iamt: BigDecimal,
    #[serde(with = "json_number")]
    pub camt: BigDecimal,
    #[serde(with = "json_number")]
    pub samt: BigDecimal,
    #[serde(with = "json_number")]
    pub csamt: BigDecimal,
}

impl ItcComponents {
    pub fn new(iamt: BigDecimal, camt: BigDecimal, samt: BigDecimal, csamt: BigDecimal) -> Self {
        Self {
            iamt,
            camt,
            samt,
            csamt,
        }
    }

    pub fn total(&self) -> BigDecimal {
        &self.iamt + &self.camt + &self.samt + &self.csamt
    }
}

impl Sub for &ItcComponents {
    type Output = ItcComponents;

    fn sub(self, other: &ItcComponents) -> ItcComponents {
        ItcComponents {
            iamt: &self.iamt - &other.iamt,
            camt: &self.camt - &other.camt,
            samt: &self.samt - &other.samt,
            csamt: &self.csamt - &other.csamt,
        }
    }
}

/// Credit available and reversed for the period
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItcClaim {
    pub available: ItcComponents,
    pub reversed: ItcComponents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyDetails {
    /// Outward taxable supplies
    pub osup_det: TaxComponents,
    /// Inward supplies liable to reverse charge
    pub isup_rev: TaxComponents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItcEligibility {
    pub itc_avl: ItcComponents,
    pub itc_rev: ItcComponents,
    /// `itc_avl - itc_rev`
    pub itc_net: ItcComponents,
}

/// GSTR-3B return in portal layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gstr3bReturn {
    pub gstin: String,
    #[serde(rename = "ret_period")]
    pub period: String,
    pub sup_details: SupplyDetails,
    pub itc_elg: ItcEligibility,
}

impl Gstr3bReturn {
    /// Tax payable in cash after set-off of net credit, before interest
    pub fn net_tax_payable(&self) -> BigDecimal {
        self.sup_details.osup_det.total_tax() + self.sup_details.isup_rev.total_tax()
            - self.itc_elg.itc_net.total()
    }
}

impl FilingReturn for Gstr3bReturn {
    fn return_type(&self) -> ReturnType {
        ReturnType::Gstr3b
    }

    fn gstin(&self) -> &str {
        &self.gstin
    }

    fn period(&self) -> &str {
        &self.period
    }

    fn validate(&self) -> ReturnValidation {
        validate_gstr3b(self)
    }

    fn summary(&self) -> ExportSummary {
        let mut record_counts = BTreeMap::new();
        record_counts.insert("osup_det".to_string(), 1);
        record_counts.insert("isup_rev".to_string(), 1);
        record_counts.insert("itc_elg".to_string(), 1);

        ExportSummary {
            return_type: ReturnType::Gstr3b,
            gstin: self.gstin.clone(),
            period: self.period.clone(),
            record_counts,
            taxable_value: self.sup_details.osup_det.txval.clone(),
            tax_amount: self.sup_details.osup_det.total_tax(),
        }
    }
}

/// Assemble a GSTR-3B from pre-aggregated figures
pub fn generate_gstr3b(
    gstin: &str,
    period: &str,
    outward: TaxComponents,
    inward_reverse_charge: TaxComponents,
    itc: ItcClaim,
) -> GstResult<Gstr3bReturn> {
    let gstin = validate_gstin(gstin)?;
    let period = ReturnPeriod::parse(period)?;

    let itc_net = &itc.available - &itc.reversed;

    Ok(Gstr3bReturn {
        gstin,
        period: period.to_string(),
        sup_details: SupplyDetails {
            osup_det: outward,
            isup_rev: inward_reverse_charge,
        },
        itc_elg: ItcEligibility {
            itc_avl: itc.available,
            itc_rev: itc.reversed,
            itc_net,
        },
    })
}
