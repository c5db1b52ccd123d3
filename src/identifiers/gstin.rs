//! GSTIN validation, decoding and check digit generation
//!
//! A GSTIN is 15 characters:
//!
//! | Position | Meaning |
//! |----------|---------|
//! | 1-2 | State code |
//! | 3-12 | PAN of the holder |
//! | 13 | Entity number for the same PAN in the state (`1-9`, `A-Z`) |
//! | 14 | `Z` by default |
//! | 15 | Check character (mod 36) |

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::pan::{validate_pan, PanHolderType};
use super::states::state_name;
use crate::types::*;

/// Characters of the check-digit alphabet, indexed by value
const CHECKSUM_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

static GSTIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z]Z[0-9A-Z]$")
        .expect("GSTIN pattern is valid")
});

/// The parts of a validated GSTIN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstinDetails {
    pub gstin: String,
    pub state_code: String,
    pub state_name: String,
    pub pan: String,
    pub pan_holder_type: PanHolderType,
    pub entity_number: char,
    pub default_char: char,
    pub check_digit: char,
}

fn format_error(gstin: &str, message: String) -> GstError {
    IdentifierError::new(IdentifierErrorKind::Format, gstin, message).into()
}

fn checksum_value(c: char) -> Option<u32> {
    c.to_digit(36)
}

/// Compute the check character for the first 14 characters of a GSTIN
fn compute_check_digit(prefix: &str) -> Option<char> {
    let mut sum = 0u32;
    let mut factor = 2u32;

    for c in prefix.chars().rev() {
        let product = checksum_value(c)? * factor;
        sum += product / 36 + product % 36;
        factor = if factor == 2 { 1 } else { 2 };
    }

    let index = (36 - sum % 36) % 36;
    Some(char::from(CHECKSUM_ALPHABET[index as usize]))
}

/// Generate the check character for a 14-character GSTIN prefix.
///
/// Useful for producing valid test data; the prefix is not otherwise validated.
pub fn generate_check_digit(prefix: &str) -> GstResult<char> {
    let prefix = prefix.trim().to_uppercase();

    if prefix.len() != 14 || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format_error(
            &prefix,
            format!("GSTIN prefix must be 14 alphanumeric characters, got '{prefix}'"),
        ));
    }

    compute_check_digit(&prefix)
        .ok_or_else(|| format_error(&prefix, format!("Invalid GSTIN prefix '{prefix}'")))
}

/// Validate a GSTIN and return it normalized (trimmed, upper-cased).
///
/// Rules are checked in order and the first violation is reported with its
/// own [`IdentifierErrorKind`]: format, state code, PAN, entity number and
/// finally the check character.
pub fn validate_gstin(gstin: &str) -> GstResult<String> {
    let gstin = gstin.trim().to_uppercase();

    if gstin.len() != 15 {
        return Err(format_error(
            &gstin,
            format!("GSTIN must be 15 characters, got {}", gstin.len()),
        ));
    }

    if !GSTIN_PATTERN.is_match(&gstin) {
        return Err(format_error(&gstin, format!("Invalid GSTIN format: '{gstin}'")));
    }

    let state_code = &gstin[0..2];
    if state_name(state_code).is_none() {
        return Err(IdentifierError::new(
            IdentifierErrorKind::StateCode,
            &gstin,
            format!("Invalid state code '{state_code}' in GSTIN"),
        )
        .into());
    }

    validate_pan(&gstin[2..12]).map_err(|e| {
        IdentifierError::new(
            IdentifierErrorKind::Pan,
            &gstin,
            format!("Invalid PAN in GSTIN: {e}"),
        )
    })?;

    let entity = gstin.as_bytes()[12];
    if entity == b'0' {
        return Err(IdentifierError::new(
            IdentifierErrorKind::EntityNumber,
            &gstin,
            "GSTIN entity number must be 1-9 or A-Z",
        )
        .into());
    }

    let expected = compute_check_digit(&gstin[..14])
        .ok_or_else(|| format_error(&gstin, format!("Invalid GSTIN format: '{gstin}'")))?;
    let found = char::from(gstin.as_bytes()[14]);
    if expected != found {
        return Err(IdentifierError::new(
            IdentifierErrorKind::Checksum,
            &gstin,
            format!("Invalid GSTIN checksum: expected '{expected}', found '{found}'"),
        )
        .into());
    }

    Ok(gstin)
}

/// Validate a GSTIN and split it into its parts
pub fn extract_gstin(gstin: &str) -> GstResult<GstinDetails> {
    let gstin = validate_gstin(gstin)?;
    let pan = validate_pan(&gstin[2..12])?;
    let bytes = gstin.as_bytes();
    let state_code = gstin[0..2].to_string();

    Ok(GstinDetails {
        state_name: state_name(&state_code).unwrap_or_default().to_string(),
        state_code,
        pan: pan.pan,
        pan_holder_type: pan.holder_type,
        entity_number: char::from(bytes[12]),
        default_char: char::from(bytes[13]),
        check_digit: char::from(bytes[14]),
        gstin,
    })
}
