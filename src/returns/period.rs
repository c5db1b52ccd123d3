//! Monthly return periods in `MMYYYY` form

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::*;

/// A monthly tax period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReturnPeriod {
    year: i32,
    month: u32,
}

impl ReturnPeriod {
    pub fn new(month: u32, year: i32) -> GstResult<Self> {
        if !(1..=12).contains(&month) || !(1000..=9999).contains(&year) {
            return Err(ReturnError::InvalidPeriod(format!("{month:02}{year}")).into());
        }
        Ok(Self { year, month })
    }

    /// Parse `MMYYYY`, e.g. `042024` for April 2024
    pub fn parse(period: &str) -> GstResult<Self> {
        let period = period.trim();
        let invalid = || GstError::from(ReturnError::InvalidPeriod(period.to_string()));

        if period.len() != 6 || !period.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let month = period[..2].parse::<u32>().map_err(|_| invalid())?;
        let year = period[2..].parse::<i32>().map_err(|_| invalid())?;
        Self::new(month, year).map_err(|_| invalid())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Whether `date` falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for ReturnPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:04}", self.month, self.year)
    }
}

impl FromStr for ReturnPeriod {
    type Err = GstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
