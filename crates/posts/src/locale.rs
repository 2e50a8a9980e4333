//! 公開日の表示フォーマット (`dd Mon yyyy`)
//!
//! Month abbreviations follow the date-fns locale tables, so `pt-BR` renders
//! lowercase months ("15 mar 2021") while `en-US` capitalizes them.

use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone};
use std::str::FromStr;

const PT_BR_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];
const EN_US_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const ES_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    PtBr,
    EnUs,
    Es,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::EnUs => "en-US",
            Self::Es => "es",
        }
    }

    pub fn month_abbreviations(&self) -> &'static [&'static str; 12] {
        match self {
            Self::PtBr => &PT_BR_MONTHS,
            Self::EnUs => &EN_US_MONTHS,
            Self::Es => &ES_MONTHS,
        }
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Self::PtBr),
            "en-us" | "en" => Ok(Self::EnUs),
            "es" | "es-es" => Ok(Self::Es),
            _ => bail!("Unsupported locale: {}", s),
        }
    }
}

pub trait DateFormatter {
    fn format_date(&self, date: &DateTime<FixedOffset>) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleDateFormatter {
    locale: Locale,
}

impl LocaleDateFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl DateFormatter for LocaleDateFormatter {
    /// The date is rendered in its own offset, not the host's.
    fn format_date(&self, date: &DateTime<FixedOffset>) -> String {
        let month = self.locale.month_abbreviations()[date.month0() as usize];
        format!("{:02} {} {:04}", date.day(), month, date.year())
    }
}

/// Accepts RFC 3339, Prismic's `2021-03-15T19:25:28+0000`, or a bare date.
pub fn parse_publication_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .or_else(|| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z").ok())
        .or_else(|| {
            let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)?;
            Some(FixedOffset::east_opt(0)?.from_utc_datetime(&midnight))
        })
}
