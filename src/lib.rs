// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! League phase engine
//!
//! This crate maps wall-clock time to the state of a league that plays one
//! season per week: which season is current, which phase it is in, which
//! game day is being played, and what the public may see of past, present
//! and future results.
//!
//! # Core types
//!
//! - [`LeagueConfig`] — validated league constants (genesis, zone, cadence).
//! - [`SeasonClock`] — the engine façade; produces one [`Snapshot`] per request.
//! - [`PhaseStatus`] / [`Mode`] — the season and its phase at an instant.
//! - [`MarkerSequence`] — the eight boundary instants of one season.
//! - [`ScheduleProvider`] — external source of postseason series lengths,
//!   memoized by [`SeriesLengthCache`].
//! - [`Disclosure`] — how much of a day's results may be shown, applied to
//!   [`GameRecord`]s in one place.
//! - [`SectionView`] — how much of a season-level resource may be shown.
//!
//! # Season layout
//!
//! | Phase | Mode code | Starts at (hours after season start) |
//! |-------|-----------|--------------------------------------|
//! | pre-season | 0 | |
//! | regular season | 10 | 0 |
//! | waiting for LDS | 21 | `days_per_season` |
//! | LDS | 31 | `days_per_season` + 1 |
//! | waiting for LCS | 22 | end of LDS |
//! | LCS | 32 | `days_per_season` − 1 + 24 |
//! | waiting for HCS | 23 | end of LCS |
//! | HCS | 33 | LCS start + 24 |
//! | complete | 40 | end of HCS |
//!
//! The offsets above assume one-hour game slots; longer slots stretch every
//! game-count term.
//!
//! # Configuration
//!
//! [`LeagueConfig::from_env`] is the only place process configuration is
//! read. See [`config`] for the keys and their defaults.
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod clock;
pub mod config;
pub mod day;
pub mod engine;
mod error;
pub mod genesis;
pub mod markers;
pub mod mode;
pub mod records;
pub mod rehearsal;
pub mod sections;
pub mod series;
pub mod visibility;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{LeagueConfig, LeagueSettings};
pub use day::{resolve_day, DayIndex, NO_DAY, RETIRED_DAY};
pub use engine::{SeasonClock, Slate, Snapshot};
pub use error::{Error, Result};
pub use genesis::{resolve_season, resolve_season_start, season_start};
pub use markers::{Marker, MarkerSequence, Window};
pub use mode::{classify, Mode, PhaseStatus};
pub use records::GameRecord;
pub use rehearsal::{genesis_for, StagedGenesis};
pub use sections::{SeasonSection, SectionView};
pub use series::{
    JsonSchedule, ProviderError, ScheduleProvider, Series, SeriesLengthCache, SeriesLengths,
    StaticSchedule,
};
pub use visibility::Disclosure;
