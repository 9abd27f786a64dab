// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Staging a deployment in a chosen phase.
//!
//! Integration environments need the league to be in a particular mode of a
//! particular season *right now*. [`genesis_for`] works backwards from the
//! current instant to the genesis that produces that state, and
//! [`StagedGenesis::env_pairs`] renders it as the configuration keys read by
//! [`LeagueConfig::from_env`].
//!
//! | Code | Placement of "now" |
//! |------|--------------------|
//! | 0..=9 | 2 h before the season start |
//! | 10..=19 | 2 h into the regular season |
//! | 21 | at the regular-season end |
//! | 31 | 2 h after the regular-season end |
//! | 22 | 9 h after the regular-season end |
//! | 32 | 1 h into the championship series window |
//! | 23 | 9 h into the championship series window |
//! | 33 | 1 h into the final series window |
//! | 40.. | 9 h into the final series window |

use crate::config::{LeagueConfig, BROADCAST_DAY_HOURS, ENV_START_DATE, ENV_START_HOUR};
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use log::info;

/// Genesis date and hour, league-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagedGenesis {
    pub date: NaiveDate,
    pub hour: u32,
}

impl StagedGenesis {
    pub fn naive(&self) -> NaiveDateTime {
        self.date.and_time(chrono::NaiveTime::MIN) + Duration::hours(i64::from(self.hour))
    }

    /// `(key, value)` pairs for the genesis configuration keys.
    pub fn env_pairs(&self) -> [(&'static str, String); 2] {
        [
            (ENV_START_DATE, self.date.format("%Y-%m-%d").to_string()),
            (ENV_START_HOUR, self.hour.to_string()),
        ]
    }

    /// `config` moved to this genesis.
    pub fn apply(&self, config: &LeagueConfig) -> Result<LeagueConfig> {
        config.with_genesis(self.naive())
    }
}

/// Hours between the season start and the staged instant.
fn offset_hours(mode_code: u8, config: &LeagueConfig) -> Option<i64> {
    let slot = i64::from(config.hours_per_day());
    let season_end = slot * i64::from(config.days_per_season());
    let lcs_start = season_end - slot + BROADCAST_DAY_HOURS;
    let hcs_start = lcs_start + BROADCAST_DAY_HOURS;

    let hours = match mode_code {
        0..=9 => -2,
        10..=19 => 2,
        21 => season_end,
        31 => season_end + 2,
        22 => season_end + 9,
        32 => lcs_start + 1,
        23 => lcs_start + 9,
        33 => hcs_start + 1,
        40..=u8::MAX => hcs_start + 9,
        _ => return None,
    };
    Some(hours)
}

/// The genesis that puts `season` in `mode_code` at `now`.
///
/// The computed genesis is truncated to the hour, so "now" lands up to one
/// hour later in the phase than the table above.
pub fn genesis_for(
    mode_code: u8,
    season: u32,
    now: DateTime<Utc>,
    config: &LeagueConfig,
) -> Result<StagedGenesis> {
    let offset = offset_hours(mode_code, config)
        .ok_or_else(|| Error::InvalidRequest(format!("mode {mode_code} cannot be staged")))?;

    let local_now = now.with_timezone(&config.time_zone()).naive_local();
    let start = Duration::try_weeks(i64::from(season))
        .and_then(|weeks| weeks.checked_add(&Duration::try_hours(offset)?))
        .and_then(|back| local_now.checked_sub_signed(back))
        .ok_or_else(|| {
            Error::InvalidRequest(format!("season {season} cannot be staged at {now}"))
        })?;

    let staged = StagedGenesis {
        date: start.date(),
        hour: start.hour(),
    };
    info!(
        "staging mode {mode_code} of season {season}: genesis {} {}:00",
        staged.date, staged.hour
    );
    Ok(staged)
}
