// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! League configuration.
//!
//! This module is the single place where process configuration is read.
//! [`LeagueConfig::from_env`] resolves it from environment variables once at
//! startup; [`LeagueConfig::from_lookup`] accepts any key lookup so callers
//! (and tests) can feed values from elsewhere, and [`LeagueSettings`] is the
//! serde shape for file-based configuration.
//!
//! | Key | Required | Default |
//! |-----|----------|---------|
//! | `LEAGUE_START_DATE` | yes | |
//! | `LEAGUE_START_HOUR` | yes | |
//! | `LEAGUE_TIME_ZONE` | no | `US/Pacific` |
//! | `LEAGUE_MAX_SEASONS` | no | `24` |
//! | `LEAGUE_DAYS_PER_SEASON` | no | `49` |
//! | `LEAGUE_HOURS_PER_DAY` | no | `1` |

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use log::info;
use qtty::{Hours, Second, Seconds};
use serde::{Deserialize, Serialize};

pub const ENV_START_DATE: &str = "LEAGUE_START_DATE";
pub const ENV_START_HOUR: &str = "LEAGUE_START_HOUR";
pub const ENV_TIME_ZONE: &str = "LEAGUE_TIME_ZONE";
pub const ENV_MAX_SEASONS: &str = "LEAGUE_MAX_SEASONS";
pub const ENV_DAYS_PER_SEASON: &str = "LEAGUE_DAYS_PER_SEASON";
pub const ENV_HOURS_PER_DAY: &str = "LEAGUE_HOURS_PER_DAY";

pub const DEFAULT_TIME_ZONE: &str = "US/Pacific";
pub const DEFAULT_MAX_SEASONS: u32 = 24;
pub const DEFAULT_DAYS_PER_SEASON: u32 = 49;
pub const DEFAULT_HOURS_PER_DAY: u32 = 1;

/// Broadcast day used to space the championship and final series.
pub(crate) const BROADCAST_DAY_HOURS: i64 = 24;

/// Hours after a season start at which the next season takes over.
pub(crate) const ACTIVE_WINDOW_HOURS: i64 = 6 * 24;

/// Raw, unvalidated settings as they appear in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub start_date: String,
    pub start_hour: u32,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_max_seasons")]
    pub max_seasons: u32,
    #[serde(default = "default_days_per_season")]
    pub days_per_season: u32,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_max_seasons() -> u32 {
    DEFAULT_MAX_SEASONS
}

fn default_days_per_season() -> u32 {
    DEFAULT_DAYS_PER_SEASON
}

fn default_hours_per_day() -> u32 {
    DEFAULT_HOURS_PER_DAY
}

/// Validated, read-only league constants.
///
/// Fields are only reachable through the `with_*` builders, which
/// re-validate. Deserializes through [`LeagueSettings`], so a config file is
/// validated the same way as the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LeagueSettings")]
pub struct LeagueConfig {
    genesis: NaiveDateTime,
    time_zone: Tz,
    max_seasons: u32,
    days_per_season: u32,
    hours_per_day: u32,
}

impl LeagueConfig {
    /// Build a config with the default league constants.
    pub fn new(genesis: NaiveDateTime, time_zone: Tz) -> Result<Self> {
        Self {
            genesis,
            time_zone,
            max_seasons: DEFAULT_MAX_SEASONS,
            days_per_season: DEFAULT_DAYS_PER_SEASON,
            hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
        .validated()
    }

    /// League-local wall-clock start of season 0.
    #[inline]
    pub fn genesis(&self) -> NaiveDateTime {
        self.genesis
    }

    /// The league's home zone; every marker is evaluated here.
    #[inline]
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    #[inline]
    pub fn max_seasons(&self) -> u32 {
        self.max_seasons
    }

    #[inline]
    pub fn days_per_season(&self) -> u32 {
        self.days_per_season
    }

    #[inline]
    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    pub fn with_genesis(mut self, genesis: NaiveDateTime) -> Result<Self> {
        self.genesis = genesis;
        self.validated()
    }

    pub fn with_max_seasons(mut self, max_seasons: u32) -> Result<Self> {
        self.max_seasons = max_seasons;
        self.validated()
    }

    pub fn with_days_per_season(mut self, days_per_season: u32) -> Result<Self> {
        self.days_per_season = days_per_season;
        self.validated()
    }

    pub fn with_hours_per_day(mut self, hours_per_day: u32) -> Result<Self> {
        self.hours_per_day = hours_per_day;
        self.validated()
    }

    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let (Some(start_date), Some(start_hour)) = (read(ENV_START_DATE), read(ENV_START_HOUR))
        else {
            return Err(Error::Configuration(format!(
                "the genesis must be specified via the {ENV_START_DATE} and {ENV_START_HOUR} environment variables"
            )));
        };

        let settings = LeagueSettings {
            start_date,
            start_hour: parse_count(ENV_START_HOUR, &start_hour)?,
            time_zone: read(ENV_TIME_ZONE).unwrap_or_else(default_time_zone),
            max_seasons: read(ENV_MAX_SEASONS)
                .map(|v| parse_count(ENV_MAX_SEASONS, &v))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_SEASONS),
            days_per_season: read(ENV_DAYS_PER_SEASON)
                .map(|v| parse_count(ENV_DAYS_PER_SEASON, &v))
                .transpose()?
                .unwrap_or(DEFAULT_DAYS_PER_SEASON),
            hours_per_day: read(ENV_HOURS_PER_DAY)
                .map(|v| parse_count(ENV_HOURS_PER_DAY, &v))
                .transpose()?
                .unwrap_or(DEFAULT_HOURS_PER_DAY),
        };
        Self::try_from(settings)
    }

    fn validated(self) -> Result<Self> {
        if self.max_seasons == 0 {
            return Err(Error::Configuration("max_seasons must be at least 1".into()));
        }
        if self.days_per_season == 0 {
            return Err(Error::Configuration(
                "days_per_season must be at least 1".into(),
            ));
        }
        if self.hours_per_day == 0 {
            return Err(Error::Configuration("hours_per_day must be at least 1".into()));
        }
        // The division series opens one hour after the last regular-season
        // slot and must still precede the fixed championship start.
        if i64::from(self.hours_per_day) + 1 >= BROADCAST_DAY_HOURS {
            return Err(Error::Configuration(format!(
                "hours_per_day must be below {} (got {})",
                BROADCAST_DAY_HOURS - 1,
                self.hours_per_day
            )));
        }
        // Every anchor must fall before the weekly rollover hands "now" to
        // the next season.
        let hcs_start = i64::from(self.hours_per_day) * (i64::from(self.days_per_season) - 1)
            + 2 * BROADCAST_DAY_HOURS;
        if hcs_start >= ACTIVE_WINDOW_HOURS {
            return Err(Error::Configuration(format!(
                "{} days of {} h push the final series start to +{hcs_start} h, past the {ACTIVE_WINDOW_HOURS} h season window",
                self.days_per_season, self.hours_per_day
            )));
        }
        Ok(self)
    }

    /// Length of one game slot.
    pub fn slot(&self) -> Duration {
        Duration::hours(i64::from(self.hours_per_day))
    }

    /// Length of one game slot as a typed quantity.
    pub fn slot_hours(&self) -> Hours {
        Hours::new(f64::from(self.hours_per_day))
    }

    /// Length of one game slot in whole seconds.
    pub fn slot_seconds(&self) -> i64 {
        let seconds: Seconds = self.slot_hours().to::<Second>();
        seconds.value() as i64
    }

    /// Last season index before retirement.
    pub fn last_season(&self) -> u32 {
        self.max_seasons.saturating_sub(1)
    }
}

impl TryFrom<LeagueSettings> for LeagueConfig {
    type Error = Error;

    fn try_from(settings: LeagueSettings) -> Result<Self> {
        let genesis = parse_genesis(&settings.start_date, settings.start_hour)?;
        let time_zone: Tz = settings.time_zone.parse().map_err(|e| {
            Error::Configuration(format!("unknown time zone {:?}: {e}", settings.time_zone))
        })?;
        let config = LeagueConfig {
            genesis,
            time_zone,
            max_seasons: settings.max_seasons,
            days_per_season: settings.days_per_season,
            hours_per_day: settings.hours_per_day,
        }
        .validated()?;
        info!(
            "league genesis {} ({}), {} seasons of {} days",
            config.genesis(),
            config.time_zone.name(),
            config.max_seasons(),
            config.days_per_season
        );
        Ok(config)
    }
}

/// Parse a genesis date plus hour.
///
/// Accepts a plain `YYYY-MM-DD` date or an ISO date-time; in the latter case
/// the hour is replaced and the remaining fields are kept.
fn parse_genesis(date: &str, hour: u32) -> Result<NaiveDateTime> {
    let date = date.trim();
    let base = match NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        Ok(dt) => dt,
        Err(_) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| Error::Configuration(format!("invalid genesis date {date:?}: {e}")))?
            .and_time(chrono::NaiveTime::MIN),
    };
    base.with_hour(hour)
        .ok_or_else(|| Error::Configuration(format!("genesis hour {hour} is outside 0..=23")))
}

fn parse_count(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::Configuration(format!("{key}={value:?} is not a count: {e}")))
}
