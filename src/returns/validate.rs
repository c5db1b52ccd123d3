//! Structural validation of generated returns before upload

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::gstr1::{Gstr1Return, InvoiceRecord, NoteRecord};
use super::gstr3b::Gstr3bReturn;
use super::period::ReturnPeriod;
use crate::identifiers::validate_gstin;
use crate::utils::within_paisa;

/// Outcome of a return validation. Validation never fails; problems are
/// collected as messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReturnValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ReturnValidation {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Record another problem
    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }
}

fn check_header(gstin: &str, period: &str, errors: &mut Vec<String>) {
    if let Err(e) = validate_gstin(gstin) {
        errors.push(format!("Invalid filer GSTIN: {e}"));
    }
    if let Err(e) = ReturnPeriod::parse(period) {
        errors.push(e.to_string());
    }
}

fn check_counterparty(table: &str, ctin: &str, errors: &mut Vec<String>) {
    if let Err(e) = validate_gstin(ctin) {
        errors.push(format!("Invalid counterparty GSTIN in {table}: {e}"));
    }
}

fn check_invoices(table: &str, invoices: &[InvoiceRecord], errors: &mut Vec<String>) {
    for inv in invoices.iter().filter(|inv| inv.itms.is_empty()) {
        errors.push(format!("{table} invoice {} has no line items", inv.inum));
    }
}

fn check_notes(table: &str, notes: &[NoteRecord], errors: &mut Vec<String>) {
    for note in notes.iter().filter(|note| note.itms.is_empty()) {
        errors.push(format!("{table} note {} has no line items", note.nt_num));
    }
}

/// Re-check a GSTR-1: filer and counterparty GSTINs, period, line items of
/// every invoice and note, and HSN summary codes and quantities.
pub fn validate_gstr1(ret: &Gstr1Return) -> ReturnValidation {
    let mut errors = Vec::new();
    check_header(&ret.gstin, &ret.period, &mut errors);

    for entry in &ret.b2b {
        check_counterparty("b2b", &entry.ctin, &mut errors);
        check_invoices("b2b", &entry.inv, &mut errors);
    }
    for entry in &ret.b2cl {
        check_invoices("b2cl", &entry.inv, &mut errors);
    }
    for entry in &ret.exp {
        check_invoices("exp", &entry.inv, &mut errors);
    }
    for entry in &ret.cdnr {
        check_counterparty("cdnr", &entry.ctin, &mut errors);
        check_notes("cdnr", &entry.nt, &mut errors);
    }
    check_notes("cdnur", &ret.cdnur, &mut errors);

    let zero = BigDecimal::from(0);
    for entry in &ret.hsn.data {
        if entry.hsn_sc.is_empty() {
            errors.push(format!("HSN summary entry {} has no HSN/SAC code", entry.num));
        }
        if entry.qty <= zero {
            errors.push(format!(
                "HSN summary entry {} ({}) must have a positive quantity, got {}",
                entry.num, entry.hsn_sc, entry.qty
            ));
        }
    }

    ReturnValidation::from_errors(errors)
}

/// Re-check a GSTR-3B: filer GSTIN, period and `itc_net = itc_avl - itc_rev`
/// per head, within 0.01.
pub fn validate_gstr3b(ret: &Gstr3bReturn) -> ReturnValidation {
    let mut errors = Vec::new();
    check_header(&ret.gstin, &ret.period, &mut errors);

    let itc = &ret.itc_elg;
    let heads = [
        ("iamt", &itc.itc_avl.iamt, &itc.itc_rev.iamt, &itc.itc_net.iamt),
        ("camt", &itc.itc_avl.camt, &itc.itc_rev.camt, &itc.itc_net.camt),
        ("samt", &itc.itc_avl.samt, &itc.itc_rev.samt, &itc.itc_net.samt),
        ("csamt", &itc.itc_avl.csamt, &itc.itc_rev.csamt, &itc.itc_net.csamt),
    ];
    for (head, available, reversed, net) in heads {
        let expected = available - reversed;
        if !within_paisa(&expected, net) {
            errors.push(format!(
                "Net ITC {head} is {net}, expected {expected} (available {available} - reversed {reversed})"
            ));
        }
    }

    ReturnValidation::from_errors(errors)
}
