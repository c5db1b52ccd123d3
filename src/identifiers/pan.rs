//! Permanent Account Number (PAN) validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::types::*;

static PAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("PAN pattern is valid"));

/// Holder category encoded in the 4th character of a PAN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanHolderType {
    Individual,
    Company,
    HinduUndividedFamily,
    Firm,
    AssociationOfPersons,
    Trust,
    BodyOfIndividuals,
    LocalAuthority,
    ArtificialJuridicalPerson,
    Government,
}

impl PanHolderType {
    /// Decode the 4th PAN character
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'P' => Some(Self::Individual),
            'C' => Some(Self::Company),
            'H' => Some(Self::HinduUndividedFamily),
            'F' => Some(Self::Firm),
            'A' => Some(Self::AssociationOfPersons),
            'T' => Some(Self::Trust),
            'B' => Some(Self::BodyOfIndividuals),
            'L' => Some(Self::LocalAuthority),
            'J' => Some(Self::ArtificialJuridicalPerson),
            'G' => Some(Self::Government),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Company => "Company",
            Self::HinduUndividedFamily => "Hindu Undivided Family",
            Self::Firm => "Firm / LLP",
            Self::AssociationOfPersons => "Association of Persons",
            Self::Trust => "Trust",
            Self::BodyOfIndividuals => "Body of Individuals",
            Self::LocalAuthority => "Local Authority",
            Self::ArtificialJuridicalPerson => "Artificial Juridical Person",
            Self::Government => "Government",
        }
    }
}

/// A validated PAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanDetails {
    pub pan: String,
    pub holder_type: PanHolderType,
}

/// Validate a PAN, returning it normalized with its holder category
pub fn validate_pan(pan: &str) -> GstResult<PanDetails> {
    let pan = pan.trim().to_uppercase();

    if !PAN_PATTERN.is_match(&pan) {
        return Err(IdentifierError::new(
            IdentifierErrorKind::Pan,
            &pan,
            format!("Invalid PAN format: '{pan}'"),
        )
        .into());
    }

    let category = pan.chars().nth(3).unwrap_or_default();
    let holder_type = PanHolderType::from_code(category).ok_or_else(|| {
        IdentifierError::new(
            IdentifierErrorKind::Pan,
            &pan,
            format!("Invalid PAN holder type '{category}' in '{pan}'"),
        )
    })?;

    Ok(PanDetails { pan, holder_type })
}
