//! Monthly filing example: classify invoices, build GSTR-1 and GSTR-3B,
//! and export both for the portal.
//!
//! Run with `RUST_LOG=gst_core=debug` to see provider and accumulator logs.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use gst_core::{
    export_for_portal, generate_gstr1, generate_gstr3b, utils::MemoryProvider, ExportOptions,
    ExportType, GstConfig, HsnCode, Invoice, InvoiceLineItem, InvoiceType, ItcClaim,
    ItcComponents, ProviderChain, ProviderConfig, RateResolver, TaxComponents, TransactionType,
};
use tracing_subscriber::EnvFilter;

const SUPPLIER: &str = "27AAPFU0939F1ZV";

fn line(serial_no: u32, description: &str, hsn: &str, qty: u32, price: u32, rate: &BigDecimal) -> InvoiceLineItem {
    InvoiceLineItem::new(
        serial_no,
        description.to_string(),
        BigDecimal::from(qty),
        BigDecimal::from(price),
        rate.clone(),
    )
    .with_hsn(hsn)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,gst_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = GstConfig::from_env();
    println!("📑 GST Core - Monthly Filing Example\n");

    // Rates come from an in-house catalogue first, then the static registry
    let mut chain = ProviderChain::new();
    chain.register(
        MemoryProvider::new("catalogue").with_entry(HsnCode {
            code: "940171".to_string(),
            description: "Upholstered office chairs".to_string(),
            chapter: "94".to_string(),
            rate: BigDecimal::from(18),
            cess: None,
            unit: Some("NOS".to_string()),
        }),
        ProviderConfig::from_config(&config, 10),
    );
    let resolver = RateResolver::default();

    let chair = resolver.resolve_with("940171", &chain).await;
    let laptop = resolver.resolve_with("84713010", &chain).await;
    let milk = resolver.resolve_with("0401", &chain).await;
    println!("🔎 Resolved rates:");
    for resolution in [&chair, &laptop, &milk] {
        println!("  {:<10} {:>3}% via {:?}", resolution.code, resolution.rate, resolution.source);
    }
    println!();

    let date = |day| NaiveDate::from_ymd_opt(2024, 4, day).ok_or("invalid date");
    let invoice = |number: &str, day, kind, state: &str| -> Result<Invoice, &'static str> {
        Ok(Invoice::new(
            number.to_string(),
            date(day)?,
            kind,
            SUPPLIER.to_string(),
            "27".to_string(),
            state.to_string(),
        ))
    };

    let invoices = vec![
        invoice("INV-101", 3, TransactionType::B2b, "07")?
            .with_customer_gstin("07AAACB2894G1ZP")
            .line(line(1, "Office chair", "940171", 12, 8500, &chair.rate))
            .line(line(2, "Laptop", "84713010", 4, 62000, &laptop.rate)),
        invoice("INV-102", 9, TransactionType::B2cl, "29")?
            .line(line(1, "Laptop", "84713010", 5, 62000, &laptop.rate)),
        invoice("INV-103", 12, TransactionType::B2cs, "27")?
            .line(line(1, "Office chair", "940171", 1, 8500, &chair.rate)),
        invoice("INV-104", 18, TransactionType::Export, "96")?
            .with_export_type(ExportType::WithPayment)
            .line(line(1, "Laptop", "84713010", 20, 60000, &laptop.rate)),
        invoice("INV-105", 21, TransactionType::Nil, "27")?
            .line(line(1, "Milk", "0401", 200, 56, &milk.rate).with_unit("ltr")),
        invoice("CN-7", 28, TransactionType::B2b, "07")?
            .with_customer_gstin("07AAACB2894G1ZP")
            .with_invoice_type(InvoiceType::CreditNote)
            .line(line(1, "Office chair", "940171", 2, 8500, &chair.rate)),
    ];

    let gstr1 = generate_gstr1(SUPPLIER, "042024", &invoices)?;
    let options = ExportOptions::from(&config);
    let export = export_for_portal(&gstr1, &options)?;

    println!("📤 {} ({} bytes)", export.filename, export.size_bytes);
    for (table, count) in &export.summary.record_counts {
        println!("  {:<6} {}", table, count);
    }
    println!("  Taxable value: ₹{}", export.summary.taxable_value);
    println!("  Tax:           ₹{}", export.summary.tax_amount);
    if let Some(validation) = &export.validation {
        println!("  Valid: {} {:?}", validation.is_valid, validation.errors);
    }
    println!();

    let gstr3b = generate_gstr3b(
        SUPPLIER,
        "042024",
        TaxComponents::from_gstr1(&gstr1),
        TaxComponents::default(),
        ItcClaim {
            available: ItcComponents::new(
                BigDecimal::from(42000),
                BigDecimal::from(3100),
                BigDecimal::from(3100),
                BigDecimal::from(0),
            ),
            reversed: ItcComponents::default(),
        },
    )?;
    let export = export_for_portal(&gstr3b, &options)?;

    println!("📤 {} ({} bytes)", export.filename, export.size_bytes);
    println!("  Outward tax:   ₹{}", gstr3b.sup_details.osup_det.total_tax());
    println!("  Net ITC:       ₹{}", gstr3b.itc_elg.itc_net.total());
    println!("  Payable:       ₹{}", gstr3b.net_tax_payable());

    println!("\n✅ Returns generated successfully!");

    Ok(())
}
