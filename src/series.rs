// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Elimination series and their lengths.
//!
//! Series lengths (in games, one game per slot) come from an external
//! [`ScheduleProvider`]. [`SeriesLengthCache`] memoizes them per
//! `(season, series)`, but only once the provider reports the length as
//! settled: a series that is still being decided may still change length.

use crate::error::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;
use thiserror::Error;

/// The three postseason series, in the order they are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Series {
    /// Division series.
    #[serde(rename = "LDS")]
    Lds,
    /// Championship series.
    #[serde(rename = "LCS")]
    Lcs,
    /// Final series.
    #[serde(rename = "HCS")]
    Hcs,
}

impl Series {
    pub const ALL: [Series; 3] = [Series::Lds, Series::Lcs, Series::Hcs];

    pub const fn as_str(self) -> &'static str {
        match self {
            Series::Lds => "LDS",
            Series::Lcs => "LCS",
            Series::Hcs => "HCS",
        }
    }

    /// Series played before this one.
    pub fn preceding(self) -> &'static [Series] {
        match self {
            Series::Lds => &[],
            Series::Lcs => &[Series::Lds],
            Series::Hcs => &[Series::Lds, Series::Lcs],
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Series {
    type Err = ProviderError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LDS" => Ok(Series::Lds),
            "LCS" => Ok(Series::Lcs),
            "HCS" => Ok(Series::Hcs),
            other => Err(ProviderError(format!("unknown series {other:?}"))),
        }
    }
}

/// Games per series for one season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesLengths {
    #[serde(rename = "LDS")]
    pub lds: u32,
    #[serde(rename = "LCS")]
    pub lcs: u32,
    #[serde(rename = "HCS")]
    pub hcs: u32,
}

impl SeriesLengths {
    pub const fn new(lds: u32, lcs: u32, hcs: u32) -> Self {
        Self { lds, lcs, hcs }
    }

    #[inline]
    pub const fn get(&self, series: Series) -> u32 {
        match series {
            Series::Lds => self.lds,
            Series::Lcs => self.lcs,
            Series::Hcs => self.hcs,
        }
    }

    /// Games played in all series before `series`.
    pub fn before(&self, series: Series) -> u32 {
        series.preceding().iter().map(|s| self.get(*s)).sum()
    }

    /// Games in the whole postseason.
    pub fn total(&self) -> u32 {
        self.lds + self.lcs + self.hcs
    }
}

/// Failure reported by a schedule provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ProviderError(pub String);

/// External lookup of postseason series lengths, usually backed by the
/// league's data store.
pub trait ScheduleProvider: Send + Sync {
    /// Number of games `series` takes in `season`.
    fn series_length(&self, season: u32, series: Series)
        -> std::result::Result<u32, ProviderError>;

    /// Whether the length reported for `series` can no longer change.
    fn is_settled(&self, _season: u32, _series: Series) -> bool {
        true
    }
}

impl<P: ScheduleProvider + ?Sized> ScheduleProvider for &P {
    fn series_length(
        &self,
        season: u32,
        series: Series,
    ) -> std::result::Result<u32, ProviderError> {
        (**self).series_length(season, series)
    }

    fn is_settled(&self, season: u32, series: Series) -> bool {
        (**self).is_settled(season, series)
    }
}

/// Memoizing adapter over a [`ScheduleProvider`].
///
/// Safe to share across concurrent requests. Provider failures are never
/// cached and never retried here.
#[derive(Debug)]
pub struct SeriesLengthCache<P> {
    provider: P,
    settled: RwLock<HashMap<(u32, Series), u32>>,
}

impl<P: ScheduleProvider> SeriesLengthCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            settled: RwLock::new(HashMap::new()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Games in `series` of `season`.
    pub fn length(&self, season: u32, series: Series) -> Result<u32> {
        if let Some(games) = self.cached(season, series) {
            return Ok(games);
        }

        let games = self
            .provider
            .series_length(season, series)
            .map_err(|e| {
                warn!("series length lookup failed for season {season} {series}: {e}");
                Error::ProviderUnavailable {
                    season,
                    series,
                    reason: e.0,
                }
            })?;

        if self.provider.is_settled(season, series) {
            match self.settled.write() {
                Ok(mut settled) => {
                    settled.insert((season, series), games);
                    debug!("cached season {season} {series} length {games}");
                }
                Err(_) => {
                    warn!("series length cache poisoned; season {season} {series} not cached")
                }
            }
        }
        Ok(games)
    }

    /// All three series lengths for `season`.
    pub fn lengths(&self, season: u32) -> Result<SeriesLengths> {
        Ok(SeriesLengths {
            lds: self.length(season, Series::Lds)?,
            lcs: self.length(season, Series::Lcs)?,
            hcs: self.length(season, Series::Hcs)?,
        })
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.settled.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached length.
    pub fn clear(&self) {
        match self.settled.write() {
            Ok(mut settled) => settled.clear(),
            Err(_) => warn!("series length cache poisoned; clear skipped"),
        }
    }

    fn cached(&self, season: u32, series: Series) -> Option<u32> {
        self.settled
            .read()
            .ok()
            .and_then(|m| m.get(&(season, series)).copied())
    }
}

/// In-memory length table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSchedule {
    seasons: HashMap<u32, SeriesLengths>,
    pending: HashSet<(u32, Series)>,
}

impl StaticSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same lengths for every season in `seasons`.
    pub fn uniform(seasons: std::ops::Range<u32>, lengths: SeriesLengths) -> Self {
        seasons.fold(Self::new(), |table, season| table.with_season(season, lengths))
    }

    pub fn with_season(mut self, season: u32, lengths: SeriesLengths) -> Self {
        self.seasons.insert(season, lengths);
        self
    }

    /// Mark a series as still being decided.
    pub fn pending(mut self, season: u32, series: Series) -> Self {
        self.pending.insert((season, series));
        self
    }

    pub fn season(&self, season: u32) -> Option<SeriesLengths> {
        self.seasons.get(&season).copied()
    }
}

impl ScheduleProvider for StaticSchedule {
    fn series_length(
        &self,
        season: u32,
        series: Series,
    ) -> std::result::Result<u32, ProviderError> {
        self.season(season)
            .map(|lengths| lengths.get(series))
            .ok_or_else(|| ProviderError(format!("no postseason data for season {season}")))
    }

    fn is_settled(&self, season: u32, series: Series) -> bool {
        !self.pending.contains(&(season, series))
    }
}

/// Length table parsed from JSON.
///
/// The document maps season indices to per-series game counts:
///
/// ```
/// use seasonclock::{JsonSchedule, ScheduleProvider, Series};
///
/// let table = JsonSchedule::parse(r#"{"0": {"LDS": 5, "LCS": 7, "HCS": 7}}"#).unwrap();
/// assert_eq!(table.series_length(0, Series::Lcs).unwrap(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonSchedule {
    table: StaticSchedule,
}

impl JsonSchedule {
    pub fn parse(json: &str) -> std::result::Result<Self, ProviderError> {
        let raw: HashMap<String, HashMap<String, u32>> = serde_json::from_str(json)
            .map_err(|e| ProviderError(format!("invalid schedule document: {e}")))?;

        let mut table = StaticSchedule::new();
        for (season, series) in raw {
            let season: u32 = season
                .trim()
                .parse()
                .map_err(|e| ProviderError(format!("invalid season key {season:?}: {e}")))?;
            let mut lengths = SeriesLengths::default();
            let mut seen = HashSet::new();
            for (name, games) in series {
                let which: Series = name.parse()?;
                seen.insert(which);
                match which {
                    Series::Lds => lengths.lds = games,
                    Series::Lcs => lengths.lcs = games,
                    Series::Hcs => lengths.hcs = games,
                }
            }
            if let Some(missing) = Series::ALL.iter().find(|s| !seen.contains(*s)) {
                return Err(ProviderError(format!(
                    "season {season} is missing a {missing} length"
                )));
            }
            table = table.with_season(season, lengths);
        }
        Ok(Self { table })
    }
}

impl ScheduleProvider for JsonSchedule {
    fn series_length(
        &self,
        season: u32,
        series: Series,
    ) -> std::result::Result<u32, ProviderError> {
        self.table.series_length(season, series)
    }
}
