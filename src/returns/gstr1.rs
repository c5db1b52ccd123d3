//! GSTR-1 outward supply return generation

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::period::ReturnPeriod;
use crate::export::ExportSummary;
use crate::identifiers::validate_gstin;
use crate::returns::validate::{validate_gstr1, ReturnValidation};
use crate::tax::{calculate_invoice_tax, InvoiceTax, LineTax};
use crate::traits::{FilingReturn, ReturnType};
use crate::types::*;
use crate::utils::json_number;

/// Tax detail of one invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    #[serde(with = "json_number")]
    pub rt: BigDecimal,
    #[serde(with = "json_number")]
    pub txval: BigDecimal,
    #[serde(default, with = "json_number::option", skip_serializing_if = "Option::is_none")]
    pub iamt: Option<BigDecimal>,
    #[serde(default, with = "json_number::option", skip_serializing_if = "Option::is_none")]
    pub camt: Option<BigDecimal>,
    #[serde(default, with = "json_number::option", skip_serializing_if = "Option::is_none")]
    pub samt: Option<BigDecimal>,
    #[serde(with = "json_number")]
    pub csamt: BigDecimal,
}

/// A numbered invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub num: u32,
    pub itm_det: ItemDetail,
}

/// An invoice as reported in the `b2b`, `b2cl` and `exp` tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub inum: String,
    /// `DD-MM-YYYY`
    pub idt: String,
    /// Invoice value including tax
    #[serde(with = "json_number")]
    pub val: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rchrg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inv_typ: Option<String>,
    pub itms: Vec<InvoiceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B2bEntry {
    /// Counterparty GSTIN
    pub ctin: String,
    pub inv: Vec<InvoiceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B2clEntry {
    pub pos: String,
    pub inv: Vec<InvoiceRecord>,
}

/// Aggregate of small B2C supplies sharing supply type, place and rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B2csEntry {
    /// `INTER` or `INTRA`
    pub sply_ty: String,
    pub pos: String,
    /// `OE` (other than e-commerce)
    pub typ: String,
    #[serde(with = "json_number")]
    pub rt: BigDecimal,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpEntry {
    pub exp_typ: ExportType,
    pub inv: Vec<InvoiceRecord>,
}

/// A credit or debit note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// `C` for credit, `D` for debit
    pub ntty: String,
    pub nt_num: String,
    pub nt_dt: String,
    #[serde(with = "json_number")]
    pub val: BigDecimal,
    pub pos: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rchrg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inv_typ: Option<String>,
    /// Unregistered note type: `B2CL`, `EXPWP` or `EXPWOP`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    pub itms: Vec<InvoiceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdnrEntry {
    pub ctin: String,
    pub nt: Vec<NoteRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NilEntry {
    /// `INTRB2B`, `INTRAB2B`, `INTRB2C` or `INTRAB2C`
    pub sply_ty: String,
    #[serde(with = "json_number")]
    pub expt_amt: BigDecimal,
    #[serde(with = "json_number")]
    pub nil_amt: BigDecimal,
    #[serde(with = "json_number")]
    pub ngsup_amt: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NilSection {
    pub inv: Vec<NilEntry>,
}

/// One HSN/SAC code in the summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsnSummaryEntry {
    pub num: u32,
    pub hsn_sc: String,
    pub desc: String,
    /// Unit quantity code
    pub uqc: String,
    #[serde(with = "json_number")]
    pub qty: BigDecimal,
    #[serde(with = "json_number")]
    pub val: BigDecimal,
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

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HsnSummary {
    pub data: Vec<HsnSummaryEntry>,
}

/// GSTR-1 return in portal layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gstr1Return {
    pub gstin: String,
    #[serde(rename = "ret_period")]
    pub period: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub b2b: Vec<B2bEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub b2cl: Vec<B2clEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub b2cs: Vec<B2csEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exp: Vec<ExpEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cdnr: Vec<CdnrEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cdnur: Vec<NoteRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nil: Option<NilSection>,
    #[serde(default)]
    pub hsn: HsnSummary,
}

impl Gstr1Return {
    /// Number of records per table
    pub fn record_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        counts.insert("b2b".to_string(), self.b2b.iter().map(|e| e.inv.len()).sum());
        counts.insert("b2cl".to_string(), self.b2cl.iter().map(|e| e.inv.len()).sum());
        counts.insert("b2cs".to_string(), self.b2cs.len());
        counts.insert("exp".to_string(), self.exp.iter().map(|e| e.inv.len()).sum());
        counts.insert("cdnr".to_string(), self.cdnr.iter().map(|e| e.nt.len()).sum());
        counts.insert("cdnur".to_string(), self.cdnur.len());
        counts.insert(
            "nil".to_string(),
            self.nil.as_ref().map(|n| n.inv.len()).unwrap_or(0),
        );
        counts.insert("hsn".to_string(), self.hsn.data.len());
        counts
    }

    /// Net taxable value over the HSN summary
    pub fn taxable_value(&self) -> BigDecimal {
        self.hsn.data.iter().map(|e| &e.txval).sum()
    }

    /// Net tax (IGST, CGST, SGST and cess) over the HSN summary
    pub fn tax_amount(&self) -> BigDecimal {
        self.hsn
            .data
            .iter()
            .map(|e| &e.iamt + &e.camt + &e.samt + &e.csamt)
            .sum()
    }
}

impl FilingReturn for Gstr1Return {
    fn return_type(&self) -> ReturnType {
        ReturnType::Gstr1
    }

    fn gstin(&self) -> &str {
        &self.gstin
    }

    fn period(&self) -> &str {
        &self.period
    }

    fn validate(&self) -> ReturnValidation {
        validate_gstr1(self)
    }

    fn summary(&self) -> ExportSummary {
        ExportSummary {
            return_type: ReturnType::Gstr1,
            gstin: self.gstin.clone(),
            period: self.period.clone(),
            record_counts: self.record_counts(),
            taxable_value: self.taxable_value(),
            tax_amount: self.tax_amount(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct B2csKey {
    sply_ty: &'static str,
    pos: String,
    rate: BigDecimal,
}

#[derive(Debug, Default)]
struct Totals {
    txval: BigDecimal,
    iamt: BigDecimal,
    camt: BigDecimal,
    samt: BigDecimal,
    csamt: BigDecimal,
}

impl Totals {
    fn add(&mut self, breakdown: &TaxBreakdown, sign: &BigDecimal) {
        self.txval += &breakdown.taxable_amount * sign;
        self.iamt += &breakdown.igst * sign;
        self.camt += &breakdown.cgst * sign;
        self.samt += &breakdown.sgst * sign;
        self.csamt += &breakdown.cess * sign;
    }
}

#[derive(Debug)]
struct HsnAccumulator {
    desc: String,
    uqc: String,
    qty: BigDecimal,
    val: BigDecimal,
    totals: Totals,
}

const HSN_DESC_MAX_CHARS: usize = 30;

fn format_date(invoice: &Invoice) -> String {
    invoice.date.format("%d-%m-%Y").to_string()
}

fn yes_no(flag: bool) -> String {
    let flag = if flag { "Y" } else { "N" };
    flag.to_string()
}

fn item_detail(breakdown: &TaxBreakdown) -> ItemDetail {
    ItemDetail {
        rt: breakdown.applied_rate.clone(),
        txval: breakdown.taxable_amount.clone(),
        iamt: breakdown.is_inter_state.then(|| breakdown.igst.clone()),
        camt: (!breakdown.is_inter_state).then(|| breakdown.cgst.clone()),
        samt: (!breakdown.is_inter_state).then(|| breakdown.sgst.clone()),
        csamt: breakdown.cess.clone(),
    }
}

fn items(lines: &[LineTax], detail: impl Fn(&TaxBreakdown) -> ItemDetail) -> Vec<InvoiceItem> {
    lines
        .iter()
        .map(|line| InvoiceItem {
            num: line.serial_no,
            itm_det: detail(&line.breakdown),
        })
        .collect()
}

/// Accumulates invoices into the GSTR-1 tables.
///
/// Each invoice is routed to exactly one table by its invoice and transaction
/// type, and each of its lines is added to the HSN summary.
#[derive(Debug)]
pub struct Gstr1Builder {
    period: ReturnPeriod,
    b2b: BTreeMap<String, Vec<InvoiceRecord>>,
    b2cl: BTreeMap<String, Vec<InvoiceRecord>>,
    b2cs: BTreeMap<B2csKey, Totals>,
    exp: BTreeMap<ExportType, Vec<InvoiceRecord>>,
    cdnr: BTreeMap<String, Vec<NoteRecord>>,
    cdnur: Vec<NoteRecord>,
    nil: BTreeMap<&'static str, BigDecimal>,
    hsn: BTreeMap<String, HsnAccumulator>,
}

impl Gstr1Builder {
    pub fn new(period: ReturnPeriod) -> Self {
        Self {
            period,
            b2b: BTreeMap::new(),
            b2cl: BTreeMap::new(),
            b2cs: BTreeMap::new(),
            exp: BTreeMap::new(),
            cdnr: BTreeMap::new(),
            cdnur: Vec::new(),
            nil: BTreeMap::new(),
            hsn: BTreeMap::new(),
        }
    }

    /// Compute the invoice's tax and add it to its table and the HSN summary
    pub fn add_invoice(&mut self, invoice: &Invoice) -> GstResult<()> {
        if invoice.transaction_type == TransactionType::B2b
            && !invoice.invoice_type.is_note()
            && customer_gstin(invoice).is_none()
        {
            return Err(ReturnError::MissingCustomerGstin(invoice.number.clone()).into());
        }

        let tax = calculate_invoice_tax(invoice, false)?;

        if !self.period.contains(invoice.date) {
            warn!(
                invoice = %invoice.number,
                date = %invoice.date,
                period = %self.period,
                "invoice dated outside return period"
            );
        }

        if invoice.invoice_type.is_note() {
            self.add_note(invoice, &tax);
        } else {
            match invoice.transaction_type {
                TransactionType::B2b => self.add_b2b(invoice, &tax),
                TransactionType::B2cl => self.add_b2cl(invoice, &tax),
                TransactionType::B2cs => self.add_b2cs(invoice, &tax),
                TransactionType::Export => self.add_export(invoice, &tax),
                TransactionType::Nil => self.add_nil(invoice, &tax),
            }
        }

        self.add_hsn_lines(invoice, &tax);
        Ok(())
    }

    fn add_b2b(&mut self, invoice: &Invoice, tax: &InvoiceTax) {
        let Some(ctin) = customer_gstin(invoice) else {
            return;
        };

        let record = InvoiceRecord {
            inum: invoice.number.clone(),
            idt: format_date(invoice),
            val: tax.total_amount.clone(),
            pos: Some(invoice.place_of_supply.clone()),
            rchrg: Some(yes_no(invoice.reverse_charge)),
            inv_typ: Some("R".to_string()),
            itms: items(&tax.lines, item_detail),
        };
        self.b2b.entry(ctin).or_default().push(record);
    }

    fn add_b2cl(&mut self, invoice: &Invoice, tax: &InvoiceTax) {
        let record = InvoiceRecord {
            inum: invoice.number.clone(),
            idt: format_date(invoice),
            val: tax.total_amount.clone(),
            pos: None,
            rchrg: None,
            inv_typ: None,
            itms: items(&tax.lines, |b| ItemDetail {
                iamt: Some(b.igst.clone()),
                camt: None,
                samt: None,
                ..item_detail(b)
            }),
        };
        self.b2cl
            .entry(invoice.place_of_supply.clone())
            .or_default()
            .push(record);
    }

    fn add_b2cs(&mut self, invoice: &Invoice, tax: &InvoiceTax) {
        let one = BigDecimal::from(1);
        for line in &tax.lines {
            let key = B2csKey {
                sply_ty: if line.breakdown.is_inter_state { "INTER" } else { "INTRA" },
                pos: invoice.place_of_supply.clone(),
                rate: line.breakdown.applied_rate.clone(),
            };
            self.b2cs.entry(key).or_default().add(&line.breakdown, &one);
        }
    }

    fn add_export(&mut self, invoice: &Invoice, tax: &InvoiceTax) {
        let record = InvoiceRecord {
            inum: invoice.number.clone(),
            idt: format_date(invoice),
            val: tax.total_amount.clone(),
            pos: None,
            rchrg: None,
            inv_typ: None,
            itms: items(&tax.lines, |b| ItemDetail {
                iamt: Some(b.igst.clone()),
                camt: None,
                samt: None,
                ..item_detail(b)
            }),
        };
        self.exp
            .entry(invoice.export_type.unwrap_or_default())
            .or_default()
            .push(record);
    }

    fn add_nil(&mut self, invoice: &Invoice, tax: &InvoiceTax) {
        let sply_ty = match (tax.is_inter_state, customer_gstin(invoice).is_some()) {
            (true, true) => "INTRB2B",
            (false, true) => "INTRAB2B",
            (true, false) => "INTRB2C",
            (false, false) => "INTRAB2C",
        };
        *self.nil.entry(sply_ty).or_default() += &tax.taxable_amount;
    }

    fn add_note(&mut self, invoice: &Invoice, tax: &InvoiceTax) {
        let ntty = match invoice.invoice_type {
            InvoiceType::DebitNote => "D",
            _ => "C",
        };

        let mut note = NoteRecord {
            ntty: ntty.to_string(),
            nt_num: invoice.number.clone(),
            nt_dt: format_date(invoice),
            val: tax.total_amount.clone(),
            pos: invoice.place_of_supply.clone(),
            rchrg: None,
            inv_typ: None,
            typ: None,
            itms: items(&tax.lines, item_detail),
        };

        match customer_gstin(invoice) {
            Some(ctin) => {
                note.rchrg = Some(yes_no(invoice.reverse_charge));
                note.inv_typ = Some("R".to_string());
                self.cdnr.entry(ctin).or_default().push(note);
            }
            None => {
                let typ = match (invoice.transaction_type, invoice.export_type) {
                    (TransactionType::Export, Some(ExportType::WithPayment)) => "EXPWP",
                    (TransactionType::Export, _) => "EXPWOP",
                    _ => "B2CL",
                };
                note.typ = Some(typ.to_string());
                self.cdnur.push(note);
            }
        }
    }

    /// Add each line to the HSN summary.
    ///
    /// Notes adjust values only: a credit note reduces them, a debit note
    /// adds to them, and neither changes the reported quantity.
    fn add_hsn_lines(&mut self, invoice: &Invoice, tax: &InvoiceTax) {
        let sign = if invoice.invoice_type == InvoiceType::CreditNote {
            BigDecimal::from(-1)
        } else {
            BigDecimal::from(1)
        };

        for (item, line) in invoice.line_items.iter().zip(&tax.lines) {
            let code = hsn_summary_code(item);

            let acc = self.hsn.entry(code).or_insert_with(|| HsnAccumulator {
                desc: item.description.chars().take(HSN_DESC_MAX_CHARS).collect(),
                uqc: item.unit.trim().to_uppercase(),
                qty: BigDecimal::from(0),
                val: BigDecimal::from(0),
                totals: Totals::default(),
            });

            if !invoice.invoice_type.is_note() {
                acc.qty += &item.quantity;
            }
            acc.val += &line.breakdown.total_amount * &sign;
            acc.totals.add(&line.breakdown, &sign);
        }
    }

    /// Finish the return for the filer's GSTIN
    pub fn build(self, gstin: String) -> Gstr1Return {
        let b2b = self
            .b2b
            .into_iter()
            .map(|(ctin, inv)| B2bEntry { ctin, inv })
            .collect::<Vec<_>>();

        let b2cl = self
            .b2cl
            .into_iter()
            .map(|(pos, inv)| B2clEntry { pos, inv })
            .collect::<Vec<_>>();

        let b2cs = self
            .b2cs
            .into_iter()
            .map(|(key, totals)| B2csEntry {
                sply_ty: key.sply_ty.to_string(),
                pos: key.pos,
                typ: "OE".to_string(),
                rt: key.rate,
                txval: totals.txval,
                iamt: totals.iamt,
                camt: totals.camt,
                samt: totals.samt,
                csamt: totals.csamt,
            })
            .collect::<Vec<_>>();

        let exp = self
            .exp
            .into_iter()
            .map(|(exp_typ, inv)| ExpEntry { exp_typ, inv })
            .collect::<Vec<_>>();

        let cdnr = self
            .cdnr
            .into_iter()
            .map(|(ctin, nt)| CdnrEntry { ctin, nt })
            .collect::<Vec<_>>();

        let nil = (!self.nil.is_empty()).then(|| NilSection {
            inv: self
                .nil
                .into_iter()
                .map(|(sply_ty, nil_amt)| NilEntry {
                    sply_ty: sply_ty.to_string(),
                    expt_amt: BigDecimal::from(0),
                    nil_amt,
                    ngsup_amt: BigDecimal::from(0),
                })
                .collect(),
        });

        let data = self
            .hsn
            .into_iter()
            .zip(1..)
            .map(|((hsn_sc, acc), num)| HsnSummaryEntry {
                num,
                hsn_sc,
                desc: acc.desc,
                uqc: acc.uqc,
                qty: acc.qty,
                val: acc.val,
                txval: acc.totals.txval,
                iamt: acc.totals.iamt,
                camt: acc.totals.camt,
                samt: acc.totals.samt,
                csamt: acc.totals.csamt,
            })
            .collect::<Vec<_>>();

        debug!(
            gstin = %gstin,
            period = %self.period,
            b2b = b2b.len(),
            b2cl = b2cl.len(),
            b2cs = b2cs.len(),
            exp = exp.len(),
            hsn = data.len(),
            "GSTR-1 assembled"
        );

        Gstr1Return {
            gstin,
            period: self.period.to_string(),
            b2b,
            b2cl,
            b2cs,
            exp,
            cdnr,
            cdnur: self.cdnur,
            nil,
            hsn: HsnSummary { data },
        }
    }
}

/// HSN code a line is summarized under.
///
/// Lines without a code take the code of the registry entry whose description
/// matches theirs. When nothing matches they fall under an empty code, which
/// [`validate_gstr1`] reports.
fn hsn_summary_code(item: &InvoiceLineItem) -> String {
    if let Some(code) = item.hsn_code.as_deref() {
        return crate::classification::normalize_code(code);
    }

    match crate::classification::search(&item.description).into_iter().next() {
        Some(entry) => {
            debug!(description = %item.description, hsn = %entry.code, "HSN code taken from registry");
            entry.code
        }
        None => String::new(),
    }
}

fn customer_gstin(invoice: &Invoice) -> Option<String> {
    invoice
        .customer_gstin
        .as_deref()
        .map(|g| g.trim().to_uppercase())
        .filter(|g| !g.is_empty())
}

/// Generate the GSTR-1 return of `gstin` for `period` from its invoices.
///
/// A line without an HSN code whose description matches no registry entry is
/// summarized under an empty code, and the return will not pass
/// [`validate_gstr1`] until the code is supplied.
pub fn generate_gstr1(gstin: &str, period: &str, invoices: &[Invoice]) -> GstResult<Gstr1Return> {
    let gstin = validate_gstin(gstin)?;
    let period = ReturnPeriod::parse(period)?;

    let mut builder = Gstr1Builder::new(period);
    for invoice in invoices {
        builder.add_invoice(invoice)?;
    }

    Ok(builder.build(gstin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SUPPLIER: &str = "27AAPFU0939F1ZV";
    const CUSTOMER: &str = "07AAACB2894G1ZP";

    fn invoice(number: &str, transaction_type: TransactionType, customer_state: &str) -> Invoice {
        Invoice::new(
            number.to_string(),
            NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            transaction_type,
            SUPPLIER.to_string(),
            "27".to_string(),
            customer_state.to_string(),
        )
    }

    fn laptop(serial_no: u32) -> InvoiceLineItem {
        InvoiceLineItem::new(
            serial_no,
            "Laptop".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(50000),
            BigDecimal::from(18),
        )
        .with_hsn("847130")
    }

    #[test]
    fn test_b2b_requires_customer_gstin() {
        let inv = invoice("INV-1", TransactionType::B2b, "07").line(laptop(1));
        let err = generate_gstr1(SUPPLIER, "042024", &[inv]).unwrap_err();
        assert!(err
            .to_string()
            .contains("Customer GSTIN required for B2B transaction"));
    }

    #[test]
    fn test_b2b_bucket_by_counterparty() {
        let first = invoice("INV-1", TransactionType::B2b, "07")
            .with_customer_gstin(CUSTOMER)
            .line(laptop(1));
        let second = invoice("INV-2", TransactionType::B2b, "07")
            .with_customer_gstin(CUSTOMER)
            .line(laptop(1));

        let ret = generate_gstr1(SUPPLIER, "042024", &[first, second]).unwrap();
        assert_eq!(ret.b2b.len(), 1);
        assert_eq!(ret.b2b[0].ctin, CUSTOMER);
        assert_eq!(ret.b2b[0].inv.len(), 2);

        let record = &ret.b2b[0].inv[0];
        assert_eq!(record.idt, "15-04-2024");
        assert_eq!(record.rchrg.as_deref(), Some("N"));
        assert_eq!(record.val, BigDecimal::from(59000));
        assert_eq!(record.itms[0].itm_det.iamt, Some(BigDecimal::from(9000)));
        assert!(record.itms[0].itm_det.camt.is_none());
    }

    #[test]
    fn test_b2cs_aggregates_by_place_and_rate() {
        let small = |n: &str| {
            invoice(n, TransactionType::B2cs, "27").line(InvoiceLineItem::new(
                1,
                "Mouse".to_string(),
                BigDecimal::from(2),
                BigDecimal::from(500),
                BigDecimal::from(18),
            ))
        };

        let ret = generate_gstr1(SUPPLIER, "042024", &[small("S-1"), small("S-2")]).unwrap();
        assert_eq!(ret.b2cs.len(), 1);
        let entry = &ret.b2cs[0];
        assert_eq!(entry.sply_ty, "INTRA");
        assert_eq!(entry.txval, BigDecimal::from(2000));
        assert_eq!(entry.camt, BigDecimal::from(180));
        assert_eq!(entry.samt, BigDecimal::from(180));
        assert_eq!(entry.iamt, BigDecimal::from(0));
    }

    #[test]
    fn test_exports_and_b2cl() {
        let export = invoice("EXP-1", TransactionType::Export, "96")
            .with_export_type(ExportType::WithPayment)
            .line(laptop(1));
        let large = invoice("L-1", TransactionType::B2cl, "29").line(laptop(1));

        let ret = generate_gstr1(SUPPLIER, "042024", &[export, large]).unwrap();
        assert_eq!(ret.exp.len(), 1);
        assert_eq!(ret.exp[0].exp_typ, ExportType::WithPayment);
        assert_eq!(ret.exp[0].inv[0].itms[0].itm_det.iamt, Some(BigDecimal::from(9000)));
        assert_eq!(ret.exp[0].inv[0].val, BigDecimal::from(59000));

        assert_eq!(ret.b2cl[0].pos, "29");
        assert_eq!(ret.b2cl[0].inv[0].itms[0].itm_det.iamt, Some(BigDecimal::from(9000)));
    }

    #[test]
    fn test_credit_note_nets_hsn_summary() {
        let sale = invoice("INV-1", TransactionType::B2b, "07")
            .with_customer_gstin(CUSTOMER)
            .line(laptop(1).with_unit("nos"));
        let mut credit = invoice("CN-1", TransactionType::B2b, "07")
            .with_customer_gstin(CUSTOMER)
            .with_invoice_type(InvoiceType::CreditNote)
            .line(laptop(1));
        credit.line_items[0].unit_price = BigDecimal::from(10000);

        let ret = generate_gstr1(SUPPLIER, "042024", &[sale, credit]).unwrap();
        assert_eq!(ret.b2b[0].inv.len(), 1);
        assert_eq!(ret.cdnr[0].nt[0].ntty, "C");

        let hsn = &ret.hsn.data[0];
        assert_eq!(hsn.uqc, "NOS");
        assert_eq!(hsn.qty, BigDecimal::from(1));
        assert_eq!(hsn.txval, BigDecimal::from(40000));
        assert_eq!(hsn.iamt, BigDecimal::from(7200));

        let validation = validate_gstr1(&ret);
        assert!(validation.is_valid, "{:?}", validation.errors);
    }

    #[test]
    fn test_export_under_lut_carries_no_tax() {
        let export = invoice("EXP-2", TransactionType::Export, "96")
            .with_export_type(ExportType::WithoutPayment)
            .line(laptop(1).with_cess(BigDecimal::from(1)));

        let ret = generate_gstr1(SUPPLIER, "042024", &[export]).unwrap();
        let record = &ret.exp[0].inv[0];
        assert_eq!(ret.exp[0].exp_typ, ExportType::WithoutPayment);
        assert_eq!(record.val, BigDecimal::from(50000));
        assert_eq!(record.itms[0].itm_det.txval, BigDecimal::from(50000));
        assert_eq!(record.itms[0].itm_det.iamt, Some(BigDecimal::from(0)));
        assert_eq!(record.itms[0].itm_det.csamt, BigDecimal::from(0));

        let hsn = &ret.hsn.data[0];
        assert_eq!(hsn.val, BigDecimal::from(50000));
        assert_eq!(hsn.iamt, BigDecimal::from(0));
        assert_eq!(ret.tax_amount(), BigDecimal::from(0));
    }

    #[test]
    fn test_b2cl_within_state_is_inter_state() {
        let large = invoice("L-2", TransactionType::B2cl, "27").line(
            InvoiceLineItem::new(
                1,
                "Server".to_string(),
                BigDecimal::from(1),
                BigDecimal::from(300000),
                BigDecimal::from(18),
            )
            .with_hsn("847150"),
        );

        let ret = generate_gstr1(SUPPLIER, "042024", &[large]).unwrap();
        let detail = &ret.b2cl[0].inv[0].itms[0].itm_det;
        assert_eq!(detail.iamt, Some(BigDecimal::from(54000)));
        assert_eq!(detail.camt, None);
        assert_eq!(ret.b2cl[0].inv[0].val, BigDecimal::from(354000));
        assert_eq!(ret.hsn.data[0].iamt, BigDecimal::from(54000));
        assert_eq!(ret.hsn.data[0].camt, BigDecimal::from(0));
    }

    #[test]
    fn test_missing_hsn_taken_from_registry() {
        let line = |description: &str| {
            InvoiceLineItem::new(
                1,
                description.to_string(),
                BigDecimal::from(10),
                BigDecimal::from(50),
                BigDecimal::from(0),
            )
        };
        let known = invoice("N-2", TransactionType::Nil, "27").line(line("Milk and cream"));
        let ret = generate_gstr1(SUPPLIER, "042024", &[known]).unwrap();
        assert_eq!(ret.hsn.data[0].hsn_sc, "0401");
        assert!(validate_gstr1(&ret).is_valid);

        let unknown = invoice("N-3", TransactionType::Nil, "27").line(line("Hand-made widget"));
        let ret = generate_gstr1(SUPPLIER, "042024", &[unknown]).unwrap();
        assert_eq!(ret.hsn.data[0].hsn_sc, "");
        assert!(!validate_gstr1(&ret).is_valid);
    }

    #[test]
    fn test_unregistered_export_note_type() {
        let note = invoice("CN-2", TransactionType::Export, "96")
            .with_invoice_type(InvoiceType::CreditNote)
            .line(laptop(1));
        let ret = generate_gstr1(SUPPLIER, "042024", &[note]).unwrap();
        assert_eq!(ret.cdnur[0].typ.as_deref(), Some("EXPWOP"));
        assert!(ret.exp.is_empty());
    }

    #[test]
    fn test_nil_rated_by_supply_type() {
        let nil = invoice("N-1", TransactionType::Nil, "29").line(InvoiceLineItem::new(
            1,
            "Fresh milk".to_string(),
            BigDecimal::from(10),
            BigDecimal::from(50),
            BigDecimal::from(0),
        ));
        let ret = generate_gstr1(SUPPLIER, "042024", &[nil]).unwrap();
        let section = ret.nil.unwrap();
        assert_eq!(section.inv[0].sply_ty, "INTRB2C");
        assert_eq!(section.inv[0].nil_amt, BigDecimal::from(500));
    }

    #[test]
    fn test_hsn_description_truncated() {
        let line = InvoiceLineItem::new(
            1,
            "An unusually long description of a portable computer".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(100),
            BigDecimal::from(18),
        )
        .with_hsn("8471.30");
        let inv = invoice("S-1", TransactionType::B2cs, "27").line(line);

        let ret = generate_gstr1(SUPPLIER, "042024", &[inv]).unwrap();
        assert_eq!(ret.hsn.data[0].hsn_sc, "847130");
        assert_eq!(ret.hsn.data[0].desc.chars().count(), 30);
    }

    #[test]
    fn test_rejects_bad_period_and_gstin() {
        assert!(matches!(
            generate_gstr1(SUPPLIER, "2024-04", &[]),
            Err(GstError::Return(ReturnError::InvalidPeriod(_)))
        ));
        assert!(generate_gstr1("27AAPFU0939F1ZA", "042024", &[]).is_err());
    }

    #[test]
    fn test_out_of_period_invoice_is_included() {
        let mut inv = invoice("S-9", TransactionType::B2cs, "27").line(laptop(1));
        inv.date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let ret = generate_gstr1(SUPPLIER, "042024", &[inv]).unwrap();
        assert_eq!(ret.b2cs.len(), 1);
    }
}
