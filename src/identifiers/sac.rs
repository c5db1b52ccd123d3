//! Services Accounting Code (SAC) validation

use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::types::*;
use crate::utils::from_hundredths;

/// SAC headings (first 4 digits) with their usual GST rate in hundredths.
/// Sorted for binary search.
static SAC_HEADINGS: &[(&str, &str, u32)] = &[
    ("9954", "Construction services", 1800),
    ("9961", "Services in wholesale trade", 1800),
    ("9962", "Services in retail trade", 1800),
    ("9963", "Accommodation, food and beverage services", 1800),
    ("9964", "Passenger transport services", 500),
    ("9965", "Goods transport services", 500),
    ("9966", "Rental services of transport vehicles", 1800),
    ("9967", "Supporting services in transport", 1800),
    ("9968", "Postal and courier services", 1800),
    ("9969", "Electricity, gas, water and other distribution services", 1800),
    ("9971", "Financial and related services", 1800),
    ("9972", "Real estate services", 1800),
    ("9973", "Leasing or rental services without operator", 1800),
    ("9981", "Research and development services", 1800),
    ("9982", "Legal and accounting services", 1800),
    ("9983", "Other professional, technical and business services", 1800),
    ("9984", "Telecommunications, broadcasting and information supply services", 1800),
    ("9985", "Support services", 1800),
    ("9986", "Support services to agriculture, hunting, forestry, fishing, mining", 0),
    ("9987", "Maintenance, repair and installation services", 1800),
    ("9988", "Manufacturing services on physical inputs owned by others", 1200),
    ("9989", "Other manufacturing services; publishing, printing and reproduction", 1200),
    ("9991", "Public administration and other services to the community", 1800),
    ("9992", "Education services", 0),
    ("9993", "Human health and social care services", 0),
    ("9994", "Sewage and waste collection, treatment and disposal", 1800),
    ("9995", "Services of membership organisations", 1800),
    ("9996", "Recreational, cultural and sporting services", 1800),
    ("9997", "Other services", 1800),
    ("9998", "Domestic services", 1800),
    ("9999", "Services provided by extraterritorial organisations", 0),
];

/// A validated SAC code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SacInfo {
    pub code: String,
    pub heading: String,
    pub category: String,
    pub recommended_rate: BigDecimal,
}

fn find_heading(code: &str) -> Option<&'static (&'static str, &'static str, u32)> {
    let prefix = code.get(..4)?;
    SAC_HEADINGS
        .binary_search_by(|(h, _, _)| (*h).cmp(prefix))
        .ok()
        .map(|idx| &SAC_HEADINGS[idx])
}

/// Usual GST rate for the SAC heading of `code`
pub fn sac_rate(code: &str) -> Option<BigDecimal> {
    find_heading(code.trim()).map(|(_, _, rate)| from_hundredths(*rate))
}

/// Validate a SAC code: 6 digits starting with `99` in a known heading
pub fn validate_sac(code: &str) -> GstResult<SacInfo> {
    let code = code.trim().to_string();

    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) || !code.starts_with("99") {
        return Err(IdentifierError::new(
            IdentifierErrorKind::Sac,
            &code,
            format!("SAC code must be 6 digits starting with 99, got '{code}'"),
        )
        .into());
    }

    let (heading, category, rate) = find_heading(&code).ok_or_else(|| {
        IdentifierError::new(
            IdentifierErrorKind::Sac,
            &code,
            format!("Unknown SAC heading '{}'", &code[..4]),
        )
    })?;

    Ok(SacInfo {
        heading: heading.to_string(),
        category: category.to_string(),
        recommended_rate: from_hundredths(*rate),
        code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_sorted() {
        assert!(SAC_HEADINGS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_valid_sac() {
        let info = validate_sac("998314").unwrap();
        assert_eq!(info.heading, "9983");
        assert_eq!(info.category, "Other professional, technical and business services");
        assert_eq!(info.recommended_rate, BigDecimal::from(18));

        assert_eq!(validate_sac("996511").unwrap().recommended_rate, BigDecimal::from(5));
    }

    #[test]
    fn test_invalid_sac() {
        for code in ["99831", "9983145", "847130", "99A314"] {
            let err = validate_sac(code).unwrap_err();
            assert_eq!(err.identifier_kind(), Some(IdentifierErrorKind::Sac), "{code}");
        }
        assert!(validate_sac("997011").is_err());
    }

    #[test]
    fn test_sac_rate() {
        assert_eq!(sac_rate("999293"), Some(BigDecimal::from(0)));
        assert_eq!(sac_rate("99"), None);
    }
}
