// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Phase-boundary markers for one season.
//!
//! This module provides:
//! - [`Marker`]: the eight named boundaries of a season, in order
//! - [`MarkerSequence`]: the boundary instants of one season
//! - [`Window`]: a half-open span between two boundaries
//!
//! Offsets from the season start, with one game per slot:
//!
//! | Marker | Instant |
//! |--------|---------|
//! | season end | start + `days_per_season` slots |
//! | LDS start | season end + 1 h |
//! | LDS end | LDS start + LDS games |
//! | LCS start | start + (`days_per_season` − 1) slots + 24 h |
//! | LCS end | LCS start + LCS games |
//! | HCS start | LCS start + 24 h |
//! | HCS end | HCS start + HCS games |
//!
//! The championship and final series start at fixed offsets whatever the
//! actual length of the series before them; a series that runs past the
//! next start is not corrected.

use crate::config::{LeagueConfig, BROADCAST_DAY_HOURS};
use crate::error::{Error, Result};
use crate::series::{Series, SeriesLengths};
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gap between the last regular-season slot and the division series.
const POSTSEASON_GAP_HOURS: i64 = 1;

/// Named season boundaries, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    SeasonStart,
    SeasonEnd,
    LdsStart,
    LdsEnd,
    LcsStart,
    LcsEnd,
    HcsStart,
    HcsEnd,
}

impl Marker {
    pub const ALL: [Marker; 8] = [
        Marker::SeasonStart,
        Marker::SeasonEnd,
        Marker::LdsStart,
        Marker::LdsEnd,
        Marker::LcsStart,
        Marker::LcsEnd,
        Marker::HcsStart,
        Marker::HcsEnd,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    pub const fn series_start(series: Series) -> Marker {
        match series {
            Series::Lds => Marker::LdsStart,
            Series::Lcs => Marker::LcsStart,
            Series::Hcs => Marker::HcsStart,
        }
    }

    pub const fn series_end(series: Series) -> Marker {
        match series {
            Series::Lds => Marker::LdsEnd,
            Series::Lcs => Marker::LcsEnd,
            Series::Hcs => Marker::HcsEnd,
        }
    }
}

/// A span between two season boundaries.
///
/// Windows are half-open ranges `[start, end)`; a zero-length series
/// produces an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Window {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Window { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// `true` when the window covers no time at all.
    pub fn is_instantaneous(&self) -> bool {
        self.start == self.end
    }

    pub fn contains<T: chrono::TimeZone>(&self, instant: &DateTime<T>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Boundary instants of one season, built fresh per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSequence {
    season: u32,
    instants: [DateTime<Tz>; 8],
}

impl MarkerSequence {
    /// Lay out the boundaries of `season` starting at `season_start`.
    ///
    /// Fails with [`Error::MarkerOrder`] only if the fixed anchors (season
    /// start, season end, and each series start) are not strictly increasing,
    /// which a validated configuration rules out.
    pub fn build(
        config: &LeagueConfig,
        season: u32,
        season_start: DateTime<Tz>,
        lengths: SeriesLengths,
    ) -> Result<Self> {
        let slot_hours = i64::from(config.hours_per_day());
        let dps = i64::from(config.days_per_season());
        let at = |base: DateTime<Tz>, hours: i64| {
            Duration::try_hours(hours)
                .and_then(|offset| base.checked_add_signed(offset))
                .ok_or_else(|| Error::MarkerOrder {
                    season,
                    detail: format!("{base} + {hours}h overflows the calendar"),
                })
        };
        let games = |n: u32| slot_hours * i64::from(n);

        let season_end = at(season_start, slot_hours * dps)?;
        let lds_start = at(season_end, POSTSEASON_GAP_HOURS)?;
        let lds_end = at(lds_start, games(lengths.lds))?;
        let lcs_start = at(season_start, slot_hours * (dps - 1) + BROADCAST_DAY_HOURS)?;
        let lcs_end = at(lcs_start, games(lengths.lcs))?;
        let hcs_start = at(lcs_start, BROADCAST_DAY_HOURS)?;
        let hcs_end = at(hcs_start, games(lengths.hcs))?;

        let sequence = MarkerSequence {
            season,
            instants: [
                season_start,
                season_end,
                lds_start,
                lds_end,
                lcs_start,
                lcs_end,
                hcs_start,
                hcs_end,
            ],
        };
        sequence.check_anchors()?;
        Ok(sequence)
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    #[inline]
    pub fn at(&self, marker: Marker) -> DateTime<Tz> {
        self.instants[marker.index()]
    }

    /// Markers paired with their instants, in order.
    pub fn iter(&self) -> impl Iterator<Item = (Marker, DateTime<Tz>)> + '_ {
        Marker::ALL.iter().map(move |m| (*m, self.at(*m)))
    }

    pub fn regular_season(&self) -> Window {
        Window::new(self.at(Marker::SeasonStart), self.at(Marker::SeasonEnd))
    }

    pub fn series(&self, series: Series) -> Window {
        Window::new(
            self.at(Marker::series_start(series)),
            self.at(Marker::series_end(series)),
        )
    }

    /// `true` when every marker is at or after the one before it.
    ///
    /// Zero-length series give equal neighbours; a series that overruns the
    /// next fixed start makes this `false` without being an error.
    pub fn is_ordered(&self) -> bool {
        self.instants.windows(2).all(|pair| pair[0] <= pair[1])
    }

    fn check_anchors(&self) -> Result<()> {
        let anchors = [
            Marker::SeasonStart,
            Marker::SeasonEnd,
            Marker::LdsStart,
            Marker::LcsStart,
            Marker::HcsStart,
        ];
        for pair in anchors.windows(2) {
            let (earlier, later) = (self.at(pair[0]), self.at(pair[1]));
            if earlier >= later {
                return Err(Error::MarkerOrder {
                    season: self.season,
                    detail: format!("{:?} ({earlier}) is not before {:?} ({later})", pair[0], pair[1]),
                });
            }
        }
        Ok(())
    }
}
