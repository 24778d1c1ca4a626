use chrono_tz::{Tz, UTC};
use std::{fmt::Display, str::FromStr};
use today_domain::{HourCycle, Locale};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Timezone and clock style used to decide what "today" is and to render
    /// due dates.
    pub locale: Locale,
    /// The answer the simulated device gives when the user is asked for
    /// access to their reminders for the first time.
    pub grant_access_on_prompt: bool,
}

impl Config {
    pub fn new() -> Self {
        let timezone = parse_env::<Tz>("TODAY_TIMEZONE", UTC);
        let hour_cycle = parse_env::<HourCycle>("TODAY_HOUR_CYCLE", HourCycle::H12);
        let grant_access_on_prompt = parse_env::<bool>("TODAY_GRANT_ACCESS", true);
        info!(
            "Using timezone: {:?} with hour cycle: {:?}",
            timezone, hour_cycle
        );
        Self {
            locale: Locale::new(timezone, hour_cycle),
            grant_access_on_prompt,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            grant_access_on_prompt: true,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    "The given {}: {} is not valid ({}), falling back to: {:?}.",
                    key, value, e, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
