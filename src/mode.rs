// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Site mode classification.
//!
//! [`classify`] walks the season's [`MarkerSequence`] in order and stops at
//! the first boundary that has not been reached yet. That boundary decides
//! the [`Mode`]; if every boundary has passed, the postseason is complete.
//!
//! | Mode | Legacy code | Carries |
//! |------|-------------|---------|
//! | [`Mode::PreSeason`] | 0 | seconds until season start |
//! | [`Mode::RegularSeason`] | 10 | seconds since season start |
//! | [`Mode::AwaitingSeries`] | 21 / 22 / 23 | seconds until the series starts |
//! | [`Mode::SeriesUnderway`] | 31 / 32 / 33 | seconds since the series started |
//! | [`Mode::Complete`] | 40 | seconds since the final series ended |
//! | [`Mode::Retired`] | 40 | nothing |

use crate::config::LeagueConfig;
use crate::markers::{Marker, MarkerSequence};
use crate::series::Series;
use chrono::{DateTime, Utc};
use qtty::{Hour, Hours, Seconds};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Coarse phase of the current season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Mode {
    PreSeason { starts_in: i64 },
    RegularSeason { elapsed: i64 },
    AwaitingSeries { series: Series, starts_in: i64 },
    SeriesUnderway { series: Series, elapsed: i64 },
    Complete { elapsed: i64 },
    /// The league has played its final season; time no longer advances.
    Retired,
}

impl Mode {
    /// The integer code used by the legacy site API.
    pub const fn code(&self) -> u8 {
        match self {
            Mode::PreSeason { .. } => 0,
            Mode::RegularSeason { .. } => 10,
            Mode::AwaitingSeries { series, .. } => 20 + series_ordinal(*series),
            Mode::SeriesUnderway { series, .. } => 30 + series_ordinal(*series),
            Mode::Complete { .. } | Mode::Retired => 40,
        }
    }

    /// Idle between the end of one phase and the start of a series.
    pub const fn is_waiting(&self) -> bool {
        matches!(self, Mode::AwaitingSeries { .. })
    }

    /// Games are being played right now.
    pub const fn is_live(&self) -> bool {
        matches!(self, Mode::RegularSeason { .. } | Mode::SeriesUnderway { .. })
    }

    /// The season (and its postseason) is over.
    pub const fn is_finished(&self) -> bool {
        matches!(self, Mode::Complete { .. } | Mode::Retired)
    }

    /// The regular season has ended.
    pub const fn is_postseason(&self) -> bool {
        !matches!(self, Mode::PreSeason { .. } | Mode::RegularSeason { .. })
    }

    /// The series being waited on or played.
    pub const fn series(&self) -> Option<Series> {
        match self {
            Mode::AwaitingSeries { series, .. } | Mode::SeriesUnderway { series, .. } => {
                Some(*series)
            }
            _ => None,
        }
    }

    /// Seconds since the current phase began, for in-progress phases.
    pub const fn elapsed_seconds(&self) -> Option<i64> {
        match self {
            Mode::RegularSeason { elapsed }
            | Mode::SeriesUnderway { elapsed, .. }
            | Mode::Complete { elapsed } => Some(*elapsed),
            _ => None,
        }
    }

    /// Seconds until the next boundary, for waiting phases.
    pub const fn seconds_until_next(&self) -> Option<i64> {
        match self {
            Mode::PreSeason { starts_in } | Mode::AwaitingSeries { starts_in, .. } => {
                Some(*starts_in)
            }
            _ => None,
        }
    }
}

const fn series_ordinal(series: Series) -> u8 {
    match series {
        Series::Lds => 1,
        Series::Lcs => 2,
        Series::Hcs => 3,
    }
}

/// Result of classifying one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseStatus {
    pub season: u32,
    #[serde(flatten)]
    pub mode: Mode,
}

impl PhaseStatus {
    pub const fn new(season: u32, mode: Mode) -> Self {
        Self { season, mode }
    }

    /// The permanent status of a retired league.
    pub fn retired(config: &LeagueConfig) -> Self {
        Self::new(config.last_season(), Mode::Retired)
    }

    pub const fn is_retired(&self) -> bool {
        matches!(self.mode, Mode::Retired)
    }

    /// Time since the current phase began as a typed quantity.
    pub fn elapsed_hours(&self) -> Option<Hours> {
        self.mode
            .elapsed_seconds()
            .map(|s| Seconds::new(s as f64).to::<Hour>())
    }

    /// Time until the next boundary as a typed quantity.
    pub fn hours_until_next(&self) -> Option<Hours> {
        self.mode
            .seconds_until_next()
            .map(|s| Seconds::new(s as f64).to::<Hour>())
    }

    /// The `{"mode", "season", "start"|"elapsed"}` payload of the legacy
    /// site API.
    pub fn to_legacy_json(&self) -> Value {
        let mut body = json!({
            "mode": self.mode.code(),
            "season": self.season,
        });
        if let Some(start) = self.mode.seconds_until_next() {
            body["start"] = json!(start);
        }
        if let Some(elapsed) = self.mode.elapsed_seconds() {
            body["elapsed"] = json!(elapsed);
        }
        body
    }
}

/// Classify `now` against one season's boundaries.
pub fn classify(markers: &MarkerSequence, now: DateTime<Utc>) -> Mode {
    let diff = |marker: Marker| now.signed_duration_since(markers.at(marker)).num_seconds();

    let since_start = diff(Marker::SeasonStart);
    if since_start < 0 {
        return Mode::PreSeason {
            starts_in: -since_start,
        };
    }
    if diff(Marker::SeasonEnd) < 0 {
        return Mode::RegularSeason {
            elapsed: since_start,
        };
    }

    for series in Series::ALL {
        let since_series_start = diff(Marker::series_start(series));
        if since_series_start < 0 {
            return Mode::AwaitingSeries {
                series,
                starts_in: -since_series_start,
            };
        }
        if diff(Marker::series_end(series)) < 0 {
            return Mode::SeriesUnderway {
                series,
                elapsed: since_series_start,
            };
        }
    }

    Mode::Complete {
        elapsed: diff(Marker::HcsEnd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genesis::season_start;
    use crate::series::SeriesLengths;
    use chrono::{Duration, NaiveDate};

    fn markers(lengths: SeriesLengths) -> MarkerSequence {
        let genesis = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let config = LeagueConfig::new(genesis, chrono_tz::US::Pacific).unwrap();
        let start = season_start(&config, 0).unwrap();
        MarkerSequence::build(&config, 0, start, lengths).unwrap()
    }

    fn at(markers: &MarkerSequence, offset: Duration) -> DateTime<Utc> {
        (markers.at(Marker::SeasonStart) + offset).with_timezone(&Utc)
    }

    #[test]
    fn walks_every_phase_in_order() {
        let m = markers(SeriesLengths::new(5, 7, 7));
        let h = Duration::hours;
        let cases = [
            (h(-2), 0),
            (h(0), 10),
            (h(48) + Duration::minutes(59), 10),
            (h(49), 21),
            (h(50), 31),
            (h(54), 31),
            (h(55), 22),
            (h(72), 32),
            (h(79), 23),
            (h(96), 33),
            (h(103), 40),
            (h(500), 40),
        ];
        for (offset, code) in cases {
            assert_eq!(classify(&m, at(&m, offset)).code(), code, "offset {offset}");
        }
    }

    #[test]
    fn carries_elapsed_and_remaining_seconds() {
        let m = markers(SeriesLengths::new(3, 5, 5));
        assert_eq!(
            classify(&m, at(&m, Duration::hours(-1))),
            Mode::PreSeason { starts_in: 3600 }
        );
        assert_eq!(
            classify(&m, at(&m, Duration::hours(49) + Duration::minutes(30))),
            Mode::AwaitingSeries {
                series: Series::Lds,
                starts_in: 1800
            }
        );
        assert_eq!(
            classify(&m, at(&m, Duration::hours(50) + Duration::seconds(1))),
            Mode::SeriesUnderway {
                series: Series::Lds,
                elapsed: 1
            }
        );
        assert_eq!(
            classify(&m, at(&m, Duration::hours(102))),
            Mode::Complete { elapsed: 3600 }
        );
    }

    #[test]
    fn zero_length_series_is_skipped() {
        let m = markers(SeriesLengths::new(0, 5, 5));
        assert_eq!(
            classify(&m, at(&m, Duration::hours(50))),
            Mode::AwaitingSeries {
                series: Series::Lcs,
                starts_in: 22 * 3600
            }
        );
    }

    #[test]
    fn overrunning_series_stays_underway() {
        let m = markers(SeriesLengths::new(30, 5, 5));
        assert_eq!(
            classify(&m, at(&m, Duration::hours(75))).series(),
            Some(Series::Lds)
        );
    }

    #[test]
    fn legacy_payload_shapes() {
        let waiting = PhaseStatus::new(
            2,
            Mode::AwaitingSeries {
                series: Series::Hcs,
                starts_in: 90,
            },
        );
        assert_eq!(
            waiting.to_legacy_json(),
            json!({"mode": 23, "season": 2, "start": 90})
        );

        let genesis = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let config = LeagueConfig::new(genesis, chrono_tz::UTC).unwrap();
        assert_eq!(
            PhaseStatus::retired(&config).to_legacy_json(),
            json!({"mode": 40, "season": 23})
        );
    }

    #[test]
    fn status_serializes_with_phase_tag() {
        let status = PhaseStatus::new(
            1,
            Mode::SeriesUnderway {
                series: Series::Lcs,
                elapsed: 7200,
            },
        );
        let value = serde_json::to_value(status).unwrap();
        assert_eq!(
            value,
            json!({"season": 1, "phase": "series_underway", "series": "LCS", "elapsed": 7200})
        );
        let back: PhaseStatus = serde_json::from_value(value).unwrap();
        assert_eq!(back, status);
        let hours = status.elapsed_hours().map(|h| h.value()).unwrap();
        assert!((hours - 2.0).abs() < 1e-9);
        assert!(status.hours_until_next().is_none());
    }
}
