//! GST calculation examples

use bigdecimal::BigDecimal;
use gst_core::{
    calculate_gst, calculate_invoice_tax, calculate_reverse_gst, extract_gstin, GstCategory,
    GstOptions, Invoice, InvoiceLineItem, RateResolver, TransactionType,
};
use std::str::FromStr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 GST Core - Calculation Examples\n");

    // 1. Standard slabs
    println!("📊 Standard GST Rates by Category:");
    let categories = [
        (GstCategory::Essential, "Essential items (medicines, food)"),
        (GstCategory::Reduced, "Reduced rate items"),
        (GstCategory::Standard, "Standard rate items"),
        (GstCategory::Higher, "Higher rate items (most services)"),
        (GstCategory::Luxury, "Luxury/Sin goods"),
    ];

    for (category, description) in categories.iter() {
        println!("  {:?}: {}% - {}", category, category.rate(), description);
    }
    println!();

    // 2. Intra-state vs inter-state
    let base_amount = BigDecimal::from(10000);
    let rate = BigDecimal::from(18);

    println!("🏢 Intra-state Transaction, Maharashtra to Maharashtra (CGST + SGST):");
    let intra = calculate_gst(base_amount.clone(), rate.clone(), "27", "27", &GstOptions::default())?;
    println!("  Taxable:     ₹{}", intra.taxable_amount);
    println!("  CGST (9%):   ₹{}", intra.cgst);
    println!("  SGST (9%):   ₹{}", intra.sgst);
    println!("  Total:       ₹{}", intra.total_amount);
    println!();

    println!("🌍 Inter-state Transaction, Maharashtra to Karnataka (IGST only):");
    let inter = calculate_gst(base_amount.clone(), rate.clone(), "27", "29", &GstOptions::default())?;
    println!("  Taxable:     ₹{}", inter.taxable_amount);
    println!("  IGST (18%):  ₹{}", inter.igst);
    println!("  Total:       ₹{}", inter.total_amount);
    println!();

    // 3. Tax-inclusive price with cess
    println!("🥤 Inclusive price with compensation cess (28% + 12% cess):");
    let inclusive = calculate_gst(
        BigDecimal::from(140),
        BigDecimal::from(28),
        "27",
        "27",
        &GstOptions {
            is_inclusive: true,
            cess_rate: Some(BigDecimal::from(12)),
        },
    )?;
    println!("  Taxable:     ₹{}", inclusive.taxable_amount);
    println!("  CGST + SGST: ₹{} + ₹{}", inclusive.cgst, inclusive.sgst);
    println!("  Cess:        ₹{}", inclusive.cess);
    println!();

    // 4. Reverse calculation
    println!("🔄 Reverse GST (from total to base):");
    let reverse = calculate_reverse_gst(BigDecimal::from(11800), rate.clone())?;
    println!("  Inclusive:   ₹{}", reverse.inclusive_amount);
    println!("  Base:        ₹{}", reverse.base_amount);
    println!("  GST:         ₹{}", reverse.gst_amount);
    println!();

    // 5. Rate resolution from HSN codes
    println!("🔎 Rate resolution:");
    let resolver = RateResolver::default();
    for code in ["84713000", "2202", "998314", "9701"] {
        let resolution = resolver.resolve(code);
        println!("  {:<10} {:>5}% ({:?})", code, resolution.rate, resolution.source);
    }
    resolver.overrides().set("9701", BigDecimal::from(12))?;
    println!("  9701 after override: {}%", resolver.resolve("9701").rate);
    println!();

    // 6. Invoice with discounts
    println!("📄 Complete invoice:");
    let supplier = extract_gstin("27AAPFU0939F1ZV")?;
    println!(
        "  Supplier: {} ({}, PAN {})",
        supplier.gstin, supplier.state_name, supplier.pan
    );

    let invoice = Invoice::new(
        "INV-2024-001".to_string(),
        chrono::NaiveDate::from_ymd_opt(2024, 4, 15).ok_or("invalid date")?,
        TransactionType::B2b,
        supplier.gstin.clone(),
        "27".to_string(),
        "07".to_string(),
    )
    .with_customer_gstin("07AAACB2894G1ZP")
    .line(
        InvoiceLineItem::new(
            1,
            "Laptop".to_string(),
            BigDecimal::from(2),
            BigDecimal::from(55000),
            BigDecimal::from(18),
        )
        .with_hsn("847130")
        .with_discount(BigDecimal::from(5)),
    )
    .line(
        InvoiceLineItem::new(
            2,
            "Annual support".to_string(),
            BigDecimal::from(1),
            BigDecimal::from_str("8999.99")?,
            BigDecimal::from(18),
        )
        .with_hsn("998713")
        .service(),
    );

    let tax = calculate_invoice_tax(&invoice, false)?;
    for line in &tax.lines {
        println!(
            "  #{} net ₹{} -> IGST ₹{}",
            line.serial_no, line.net_amount, line.breakdown.igst
        );
    }
    println!("  Taxable: ₹{}", tax.taxable_amount);
    println!("  IGST:    ₹{}", tax.igst);
    println!("  Total:   ₹{}", tax.total_amount);

    println!("\n✅ GST calculations completed successfully!");

    Ok(())
}
