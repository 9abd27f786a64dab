// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day index resolution.
//!
//! The day index counts game slots since the season start: regular-season
//! days run `0 .. days_per_season`, and postseason days continue the count
//! through each series in turn.

use crate::config::LeagueConfig;
use crate::mode::{Mode, PhaseStatus};
use crate::series::SeriesLengths;

/// Zero-based game-slot index within a season.
pub type DayIndex = i64;

/// Day reported before the season has started.
pub const NO_DAY: DayIndex = -1;

/// Day reported once the league is retired; past every real index.
pub const RETIRED_DAY: DayIndex = 99;

/// Day index for `status`.
///
/// Waiting phases report the last completed day of the phase before them;
/// a complete postseason reports one past the final game.
pub fn resolve_day(config: &LeagueConfig, status: &PhaseStatus, lengths: &SeriesLengths) -> DayIndex {
    let dps = DayIndex::from(config.days_per_season());
    let slot = config.slot_seconds();

    match status.mode {
        Mode::PreSeason { .. } => NO_DAY,
        Mode::RegularSeason { elapsed } => elapsed.div_euclid(slot),
        Mode::AwaitingSeries { series, .. } => dps - 1 + DayIndex::from(lengths.before(series)),
        Mode::SeriesUnderway { series, elapsed } => {
            dps + DayIndex::from(lengths.before(series)) + elapsed.div_euclid(slot)
        }
        Mode::Complete { .. } => dps + DayIndex::from(lengths.total()),
        Mode::Retired => RETIRED_DAY,
    }
}

/// One-based day within the series being waited on or played.
///
/// A waiting phase points at the series' first day.
pub fn series_day(config: &LeagueConfig, mode: &Mode) -> Option<u32> {
    match *mode {
        Mode::AwaitingSeries { .. } => Some(1),
        Mode::SeriesUnderway { elapsed, .. } => {
            u32::try_from(elapsed.div_euclid(config.slot_seconds()) + 1).ok()
        }
        _ => None,
    }
}
