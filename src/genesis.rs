// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Season index and season start resolution.
//!
//! Seasons recur weekly from the configured genesis. Each week holds six
//! active calendar days followed by one buffer day; once a week's seventh
//! day begins, the *next* season is considered current (it is in
//! pre-season until its start hour).

use crate::config::LeagueConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_WEEK: i64 = 7;
/// Days of the week after which the next season takes over.
const ACTIVE_DAYS: i64 = 5;

/// Zero-based index of the current season, uncapped by retirement.
///
/// Instants before genesis resolve to season 0.
pub fn resolve_season(config: &LeagueConfig, now: DateTime<Utc>) -> u32 {
    let local_now = now.with_timezone(&config.time_zone()).naive_local();
    let elapsed = local_now - config.genesis();
    let days = elapsed.num_seconds().div_euclid(SECONDS_PER_DAY);
    let weeks = days.div_euclid(DAYS_PER_WEEK);
    let leftover = days.rem_euclid(DAYS_PER_WEEK);

    let season = if leftover > ACTIVE_DAYS { weeks + 1 } else { weeks };
    u32::try_from(season.max(0)).unwrap_or(u32::MAX)
}

/// `true` once the league has run past its final season.
#[inline]
pub fn is_retired(config: &LeagueConfig, season: u32) -> bool {
    season > config.last_season()
}

/// Start instant of `season`, in the league zone.
///
/// The start keeps the genesis wall-clock hour across daylight-saving
/// changes.
pub fn season_start(config: &LeagueConfig, season: u32) -> Result<DateTime<Tz>> {
    let local = config
        .genesis()
        .checked_add_signed(Duration::weeks(i64::from(season)))
        .ok_or_else(|| {
            Error::Configuration(format!("season {season} starts outside the calendar range"))
        })?;
    localize(config.time_zone(), local).ok_or_else(|| {
        Error::Configuration(format!(
            "season {season} start {local} cannot be placed in {}",
            config.time_zone().name()
        ))
    })
}

/// Current season index together with its start instant.
pub fn resolve_season_start(
    config: &LeagueConfig,
    now: DateTime<Utc>,
) -> Result<(u32, DateTime<Tz>)> {
    let season = resolve_season(config, now);
    Ok((season, season_start(config, season)?))
}

/// Attach `zone` to a wall-clock time.
///
/// Ambiguous times take the standard-time reading; times inside a
/// spring-forward gap are read with the pre-transition offset.
pub(crate) fn localize(zone: Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(_, standard) => Some(standard),
        LocalResult::None => zone
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest(),
    }
}
