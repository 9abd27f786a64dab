// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The phase engine façade.
//!
//! [`SeasonClock`] ties together the configuration, the series-length cache
//! and a [`Clock`]. Every question about "now" goes through a [`Snapshot`]:
//! the instant is read once, the season's markers are built once, and all
//! answers for that request are derived from the same value.
//!
//! ```
//! use chrono::{Duration, NaiveDate};
//! use seasonclock::{FixedClock, LeagueConfig, SeasonClock, SeriesLengths, StaticSchedule};
//!
//! let genesis = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let config = LeagueConfig::new(genesis, chrono_tz::US::Pacific).unwrap();
//! let schedule = StaticSchedule::uniform(0..24, SeriesLengths::new(5, 7, 7));
//! let clock = FixedClock::at_local(config.time_zone(), genesis + Duration::hours(12)).unwrap();
//!
//! let engine = SeasonClock::new(config, schedule).with_clock(clock);
//! let snapshot = engine.snapshot().unwrap();
//! assert_eq!(snapshot.status.mode.code(), 10);
//! assert_eq!(snapshot.today(), (0, 12));
//! ```

use crate::clock::{Clock, SystemClock};
use crate::config::LeagueConfig;
use crate::day::{resolve_day, series_day, DayIndex, RETIRED_DAY};
use crate::error::Result;
use crate::genesis::{is_retired, resolve_season, season_start};
use crate::markers::{Marker, MarkerSequence};
use crate::mode::{classify, Mode, PhaseStatus};
use crate::sections::{section_view, SeasonSection, SectionView};
use crate::series::{ScheduleProvider, Series, SeriesLengthCache, SeriesLengths};
use crate::visibility::{decide, decide_game, Disclosure};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Games being played at the snapshot instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slate", rename_all = "snake_case")]
pub enum Slate {
    RegularSeason { day: DayIndex },
    /// One-based day within `series`.
    Postseason { series: Series, day: u32 },
}

/// Everything the engine knows about one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub now: DateTime<Utc>,
    pub status: PhaseStatus,
    pub day: DayIndex,
    /// Series lengths, once the regular season is over.
    pub lengths: Option<SeriesLengths>,
    pub config: LeagueConfig,
}

impl Snapshot {
    /// `(season, day)`; the day is -1 before the season starts.
    pub fn today(&self) -> (u32, DayIndex) {
        (self.status.season, self.day)
    }

    /// Every season that has begun or is about to.
    pub fn started_seasons(&self) -> RangeInclusive<u32> {
        0..=self.status.season
    }

    pub fn current_slate(&self) -> Option<Slate> {
        match self.status.mode {
            Mode::RegularSeason { .. } => Some(Slate::RegularSeason { day: self.day }),
            mode @ (Mode::AwaitingSeries { series, .. } | Mode::SeriesUnderway { series, .. }) => {
                series_day(&self.config, &mode).map(|day| Slate::Postseason { series, day })
            }
            _ => None,
        }
    }

    /// Disclosure for the games of one day.
    pub fn visibility(&self, requested_season: i64, requested_day: DayIndex) -> Result<Disclosure> {
        decide(requested_season, requested_day, &self.status, self.day)
    }

    /// Disclosure for a single game.
    pub fn game_visibility(&self, game_season: i64, game_day: DayIndex) -> Result<Disclosure> {
        decide_game(game_season, game_day, &self.status, self.day)
    }

    /// How much of a season-level resource may be shown.
    pub fn section(&self, section: SeasonSection, requested_season: i64) -> Result<SectionView> {
        section_view(&self.config, section, requested_season, &self.status, self.day)
    }
}

/// League phase engine.
#[derive(Debug)]
pub struct SeasonClock<P, C = SystemClock> {
    config: LeagueConfig,
    lengths: SeriesLengthCache<P>,
    clock: C,
}

impl<P: ScheduleProvider> SeasonClock<P> {
    /// An engine reading the system clock.
    pub fn new(config: LeagueConfig, provider: P) -> Self {
        Self {
            config,
            lengths: SeriesLengthCache::new(provider),
            clock: SystemClock,
        }
    }
}

impl<P: ScheduleProvider, C: Clock> SeasonClock<P, C> {
    /// Replace the source of "now", keeping the cache.
    pub fn with_clock<D: Clock>(self, clock: D) -> SeasonClock<P, D> {
        SeasonClock {
            config: self.config,
            lengths: self.lengths,
            clock,
        }
    }

    #[inline]
    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    #[inline]
    pub fn cache(&self) -> &SeriesLengthCache<P> {
        &self.lengths
    }

    /// Boundaries of `season`, consulting the schedule provider.
    pub fn markers(&self, season: u32) -> Result<MarkerSequence> {
        let start = season_start(&self.config, season)?;
        let lengths = self.lengths.lengths(season)?;
        MarkerSequence::build(&self.config, season, start, lengths)
    }

    /// Snapshot of the clock's current instant.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.snapshot_at(self.clock.now())
    }

    /// Snapshot of an arbitrary instant.
    ///
    /// The schedule provider is only consulted once the regular season of
    /// the current season has ended; a retired league never consults it.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> Result<Snapshot> {
        let config = self.config;
        let season = resolve_season(&config, now);

        if is_retired(&config, season) {
            debug!("season {season} is past the final season; league retired");
            return Ok(Snapshot {
                now,
                status: PhaseStatus::retired(&config),
                day: RETIRED_DAY,
                lengths: None,
                config,
            });
        }

        let start = season_start(&config, season)?;
        let regular = MarkerSequence::build(&config, season, start, SeriesLengths::default())?;
        let (markers, lengths) = if now < regular.at(Marker::SeasonEnd).with_timezone(&Utc) {
            (regular, None)
        } else {
            let lengths = self.lengths.lengths(season)?;
            (
                MarkerSequence::build(&config, season, start, lengths)?,
                Some(lengths),
            )
        };

        let status = PhaseStatus::new(season, classify(&markers, now));
        let day = resolve_day(&config, &status, &lengths.unwrap_or_default());
        debug!(
            "{now}: season {season} mode {} day {day}",
            status.mode.code()
        );

        Ok(Snapshot {
            now,
            status,
            day,
            lengths,
            config,
        })
    }

    pub fn classify(&self, now: DateTime<Utc>) -> Result<PhaseStatus> {
        Ok(self.snapshot_at(now)?.status)
    }

    /// Current season index, capped at the final season.
    pub fn current_season(&self, now: DateTime<Utc>) -> u32 {
        resolve_season(&self.config, now).min(self.config.last_season())
    }

    pub fn current_day(&self, now: DateTime<Utc>) -> Result<DayIndex> {
        Ok(self.snapshot_at(now)?.day)
    }

    pub fn visibility(
        &self,
        requested_season: i64,
        requested_day: DayIndex,
        now: DateTime<Utc>,
    ) -> Result<Disclosure> {
        self.snapshot_at(now)?
            .visibility(requested_season, requested_day)
    }

    pub fn game_visibility(
        &self,
        game_season: i64,
        game_day: DayIndex,
        now: DateTime<Utc>,
    ) -> Result<Disclosure> {
        self.snapshot_at(now)?
            .game_visibility(game_season, game_day)
    }
}
