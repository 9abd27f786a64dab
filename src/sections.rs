// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Disclosure of season-level resources.
//!
//! Where [`crate::visibility`] answers "may this day's games be shown",
//! this module answers how much of a whole-season resource (schedule,
//! postseason bracket, seeds, champion, standings) is public right now.

use crate::config::LeagueConfig;
use crate::day::{series_day, DayIndex};
use crate::error::{Error, Result};
use crate::mode::{Mode, PhaseStatus};
use crate::series::Series;
use crate::visibility::check_indices;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonSection {
    Teams,
    /// Regular-season games, day by day.
    Schedule,
    /// Series games, day by day.
    Postseason,
    Seeds,
    Champion,
    /// Win/loss records and standings.
    Records,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum SectionView {
    Full,
    Hidden,
    /// Days strictly before `day`.
    ThroughDay { day: DayIndex },
    /// Every earlier series, plus days of `series` strictly before `day`.
    ThroughSeriesDay { series: Series, day: u32 },
    /// Records as of the start of `day`.
    AsOfDay { day: DayIndex },
}

/// How much of `section` of `requested_season` may be shown.
pub fn section_view(
    config: &LeagueConfig,
    section: SeasonSection,
    requested_season: i64,
    status: &PhaseStatus,
    current_day: DayIndex,
) -> Result<SectionView> {
    check_indices(requested_season, None)?;
    let current = i64::from(status.season);
    if requested_season > current {
        return Err(Error::FutureSeason {
            requested: requested_season,
            current: status.season,
        });
    }
    if requested_season < current {
        return Ok(SectionView::Full);
    }

    let mode = status.mode;
    let view = match section {
        SeasonSection::Teams => SectionView::Full,
        SeasonSection::Schedule => match mode {
            Mode::PreSeason { .. } => SectionView::Hidden,
            Mode::RegularSeason { .. } => SectionView::ThroughDay { day: current_day },
            _ => SectionView::Full,
        },
        SeasonSection::Postseason => match (mode, mode.series(), series_day(config, &mode)) {
            (Mode::PreSeason { .. } | Mode::RegularSeason { .. }, _, _) => SectionView::Hidden,
            (_, Some(series), Some(day)) => SectionView::ThroughSeriesDay { series, day },
            _ => SectionView::Full,
        },
        SeasonSection::Seeds => {
            if mode.is_postseason() {
                SectionView::Full
            } else {
                SectionView::Hidden
            }
        }
        SeasonSection::Champion => {
            if mode.is_finished() {
                SectionView::Full
            } else {
                SectionView::Hidden
            }
        }
        // While idle, the day just played is final and counts.
        SeasonSection::Records => SectionView::AsOfDay {
            day: if mode.is_waiting() {
                current_day + 1
            } else {
                current_day
            },
        },
    };
    Ok(view)
}
