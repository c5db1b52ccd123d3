//! Range validation for amounts and rates

use bigdecimal::BigDecimal;

use crate::types::*;

/// Highest GST rate accepted by the calculator
pub const MAX_GST_RATE: u32 = 50;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> GstResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(CalculationError::InvalidAmount(amount.clone()).into())
    } else {
        Ok(())
    }
}

/// Validate that a GST rate lies in `0..=50`
pub fn validate_gst_rate(rate: &BigDecimal) -> GstResult<()> {
    if *rate < BigDecimal::from(0) || *rate > BigDecimal::from(MAX_GST_RATE) {
        return Err(CalculationError::InvalidRate(rate.clone()).into());
    }
    Ok(())
}

/// Validate that a cess rate is not negative
pub fn validate_cess_rate(rate: &BigDecimal) -> GstResult<()> {
    if *rate < BigDecimal::from(0) {
        return Err(CalculationError::InvalidCessRate(rate.clone()).into());
    }
    Ok(())
}

/// Validate that a quantity is positive
pub fn validate_positive_quantity(quantity: &BigDecimal) -> GstResult<()> {
    if *quantity <= BigDecimal::from(0) {
        return Err(CalculationError::InvalidQuantity(quantity.clone()).into());
    }
    Ok(())
}

/// Validate that a unit price is not negative
pub fn validate_unit_price(price: &BigDecimal) -> GstResult<()> {
    if *price < BigDecimal::from(0) {
        return Err(CalculationError::InvalidUnitPrice(price.clone()).into());
    }
    Ok(())
}

/// Validate that a discount percentage lies in `0..=100`
pub fn validate_discount(percent: &BigDecimal) -> GstResult<()> {
    if *percent < BigDecimal::from(0) || *percent > BigDecimal::from(100) {
        return Err(CalculationError::InvalidDiscount(percent.clone()).into());
    }
    Ok(())
}
