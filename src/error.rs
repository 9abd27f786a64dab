// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for seasonclock.

use crate::series::Series;
use thiserror::Error;

/// Result type for seasonclock operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving the league timeline or a disclosure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Genesis or league constants missing or malformed. Fatal.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The caller asked for a season the timeline has not reached.
    #[error("season {requested} has not started (current season is {current})")]
    FutureSeason { requested: i64, current: u32 },

    /// The caller asked for a day the timeline has not reached.
    #[error("season {season} day {requested} has not been played (current day is {current})")]
    FutureDay {
        season: u32,
        requested: i64,
        current: i64,
    },

    /// Negative or otherwise malformed season/day indices.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A game that cannot be disclosed at all.
    #[error("invalid game: season {season} day {day}")]
    InvalidGame { season: i64, day: i64 },

    /// The schedule data provider failed to return a series length.
    #[error("schedule provider unavailable for season {season} {series}: {reason}")]
    ProviderUnavailable {
        season: u32,
        series: Series,
        reason: String,
    },

    /// Marker sequence out of order; indicates bad configuration or provider data.
    #[error("marker sequence for season {season} is out of order: {detail}")]
    MarkerOrder { season: u32, detail: String },
}

impl Error {
    /// HTTP-style status class for this error.
    ///
    /// Caller mistakes map to `400`, everything that indicates a broken
    /// deployment or an unreachable provider maps to `500`.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::FutureSeason { .. }
            | Error::FutureDay { .. }
            | Error::InvalidRequest(_)
            | Error::InvalidGame { .. } => 400,
            Error::Configuration(_) | Error::ProviderUnavailable { .. } | Error::MarkerOrder { .. } => {
                500
            }
        }
    }

    /// `true` for errors that only a redeploy can fix.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::MarkerOrder { .. })
    }
}
