use chrono::prelude::*;
use chrono_tz::{Tz, UTC};
use std::str::FromStr;

/// Whether short times are rendered on a 12 or 24 hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCycle {
    H12,
    H23,
}

impl FromStr for HourCycle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "12" | "h12" => Ok(Self::H12),
            "24" | "h23" | "h24" => Ok(Self::H23),
            _ => Err(anyhow::Error::msg(format!("Unknown hour cycle: {}", s))),
        }
    }
}

/// The locale dependent part of rendering dates: which calendar day
/// "today" is, and how times are written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locale {
    pub timezone: Tz,
    pub hour_cycle: HourCycle,
}

impl Locale {
    pub fn new(timezone: Tz, hour_cycle: HourCycle) -> Self {
        Self {
            timezone,
            hour_cycle,
        }
    }

    pub fn local(&self, date: &DateTime<Utc>) -> DateTime<Tz> {
        date.with_timezone(&self.timezone)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            timezone: UTC,
            hour_cycle: HourCycle::H12,
        }
    }
}

/// Whether both instants fall on the same calendar day in the timezone of the `Locale`
pub fn is_same_day(a: &DateTime<Utc>, b: &DateTime<Utc>, locale: &Locale) -> bool {
    locale.local(a).naive_local().date() == locale.local(b).naive_local().date()
}

// 9:41 AM or 09:41
pub fn format_time_short(date: &DateTime<Utc>, locale: &Locale) -> String {
    let pattern = match locale.hour_cycle {
        HourCycle::H12 => "%-I:%M %p",
        HourCycle::H23 => "%H:%M",
    };
    locale.local(date).format(pattern).to_string()
}

// Oct 19, 2026
pub fn format_date_medium(date: &DateTime<Utc>, locale: &Locale) -> String {
    locale.local(date).format("%b %-d, %Y").to_string()
}

// October 19, 2026
pub fn format_date_long(date: &DateTime<Utc>, locale: &Locale) -> String {
    locale.local(date).format("%B %-d, %Y").to_string()
}

// Oct 19, 2026 at 9:41 AM
pub fn format_date_time_medium(date: &DateTime<Utc>, locale: &Locale) -> String {
    format!(
        "{} at {}",
        format_date_medium(date, locale),
        format_time_short(date, locale)
    )
}
