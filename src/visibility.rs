// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Result disclosure policy.
//!
//! Decides, for a requested season/day, whether the public may see final
//! results ([`Disclosure::Full`]), only schedule and identity data
//! ([`Disclosure::Redacted`]), or nothing yet ([`Disclosure::Hidden`]).
//! The decision is applied to game records through [`Disclosure::apply`],
//! the single place where scores and traces are scrubbed.
//!
//! Rules for the current season, in order:
//!
//! 1. a finished season discloses everything;
//! 2. days before the current day are final;
//! 3. the current day is final while the league idles before a series;
//! 4. the current day is redacted while games are being played;
//! 5. anything later has not happened yet.

use crate::day::DayIndex;
use crate::error::{Error, Result};
use crate::mode::PhaseStatus;
use crate::records::GameRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disclosure {
    /// Every field, including scores and simulation detail.
    Full,
    /// Scores and simulation detail withheld.
    Redacted,
    /// Nothing to show: the day has not happened.
    Hidden,
}

impl Disclosure {
    /// Shape a batch of records according to this decision.
    pub fn apply(self, games: Vec<GameRecord>) -> Vec<GameRecord> {
        match self {
            Disclosure::Full => games,
            Disclosure::Redacted => games.into_iter().map(GameRecord::redacted).collect(),
            Disclosure::Hidden => Vec::new(),
        }
    }

    /// Shape a single record according to this decision.
    pub fn apply_one(self, game: GameRecord) -> Option<GameRecord> {
        match self {
            Disclosure::Full => Some(game),
            Disclosure::Redacted => Some(game.redacted()),
            Disclosure::Hidden => None,
        }
    }

    /// Turn [`Disclosure::Hidden`] into [`Error::FutureDay`].
    pub fn require_visible(self, season: u32, requested: DayIndex, current: DayIndex) -> Result<Self> {
        match self {
            Disclosure::Hidden => Err(Error::FutureDay {
                season,
                requested,
                current,
            }),
            visible => Ok(visible),
        }
    }
}

/// Reject negative indices.
pub(crate) fn check_indices(season: i64, day: Option<i64>) -> Result<()> {
    if season < 0 {
        return Err(Error::InvalidRequest(format!("season {season} is negative")));
    }
    match day {
        Some(day) if day < 0 => Err(Error::InvalidRequest(format!("day {day} is negative"))),
        _ => Ok(()),
    }
}

/// Disclosure for the games of `requested_day` in `requested_season`.
///
/// Future seasons are an error, not an empty result.
pub fn decide(
    requested_season: i64,
    requested_day: DayIndex,
    status: &PhaseStatus,
    current_day: DayIndex,
) -> Result<Disclosure> {
    check_indices(requested_season, Some(requested_day))?;
    let current = i64::from(status.season);

    if requested_season > current {
        return Err(Error::FutureSeason {
            requested: requested_season,
            current: status.season,
        });
    }
    if requested_season < current || status.mode.is_finished() || requested_day < current_day {
        return Ok(Disclosure::Full);
    }
    if requested_day == current_day {
        if status.mode.is_waiting() {
            return Ok(Disclosure::Full);
        }
        if status.mode.is_live() {
            return Ok(Disclosure::Redacted);
        }
    }
    Ok(Disclosure::Hidden)
}

/// Disclosure for a single game played on `game_day` of `game_season`.
///
/// A game that cannot be shown at all is [`Error::InvalidGame`].
pub fn decide_game(
    game_season: i64,
    game_day: DayIndex,
    status: &PhaseStatus,
    current_day: DayIndex,
) -> Result<Disclosure> {
    check_indices(game_season, Some(game_day))?;
    let current = i64::from(status.season);

    if game_season < current {
        return Ok(Disclosure::Full);
    }
    if game_season == current {
        if status.mode.is_finished() || game_day < current_day {
            return Ok(Disclosure::Full);
        }
        if game_day == current_day {
            return Ok(if status.mode.is_waiting() {
                Disclosure::Full
            } else {
                Disclosure::Redacted
            });
        }
    }
    Err(Error::InvalidGame {
        season: game_season,
        day: game_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use crate::series::Series;
    use serde_json::json;

    const REGULAR: Mode = Mode::RegularSeason { elapsed: 3600 * 10 };
    const WAITING: Mode = Mode::AwaitingSeries {
        series: Series::Lcs,
        starts_in: 600,
    };
    const LCS: Mode = Mode::SeriesUnderway {
        series: Series::Lcs,
        elapsed: 60,
    };

    fn status(mode: Mode) -> PhaseStatus {
        PhaseStatus::new(4, mode)
    }

    #[test]
    fn past_seasons_are_always_full() {
        for mode in [REGULAR, WAITING, LCS, Mode::PreSeason { starts_in: 1 }] {
            assert_eq!(decide(3, 60, &status(mode), 10), Ok(Disclosure::Full));
            assert_eq!(decide_game(0, 0, &status(mode), -1), Ok(Disclosure::Full));
        }
    }

    #[test]
    fn future_seasons_are_rejected() {
        assert_eq!(
            decide(5, 0, &status(REGULAR), 10),
            Err(Error::FutureSeason {
                requested: 5,
                current: 4
            })
        );
        assert_eq!(
            decide_game(5, 0, &status(REGULAR), 10),
            Err(Error::InvalidGame { season: 5, day: 0 })
        );
    }

    #[test]
    fn negative_indices_are_invalid() {
        assert!(matches!(
            decide(-1, 0, &status(REGULAR), 10),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            decide_game(4, -3, &status(REGULAR), 10),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn current_season_day_rules() {
        assert_eq!(decide(4, 9, &status(REGULAR), 10), Ok(Disclosure::Full));
        assert_eq!(decide(4, 10, &status(REGULAR), 10), Ok(Disclosure::Redacted));
        assert_eq!(decide(4, 11, &status(REGULAR), 10), Ok(Disclosure::Hidden));
        assert_eq!(decide(4, 53, &status(WAITING), 53), Ok(Disclosure::Full));
        assert_eq!(decide(4, 54, &status(WAITING), 53), Ok(Disclosure::Hidden));
        assert_eq!(decide(4, 56, &status(LCS), 56), Ok(Disclosure::Redacted));
        assert_eq!(
            decide(4, 0, &status(Mode::PreSeason { starts_in: 5 }), -1),
            Ok(Disclosure::Hidden)
        );
        assert_eq!(
            decide(4, 80, &status(Mode::Complete { elapsed: 5 }), 67),
            Ok(Disclosure::Full)
        );
    }

    #[test]
    fn current_season_game_rules() {
        assert_eq!(decide_game(4, 9, &status(REGULAR), 10), Ok(Disclosure::Full));
        assert_eq!(decide_game(4, 10, &status(REGULAR), 10), Ok(Disclosure::Redacted));
        assert_eq!(decide_game(4, 53, &status(WAITING), 53), Ok(Disclosure::Full));
        assert_eq!(
            decide_game(4, 11, &status(REGULAR), 10),
            Err(Error::InvalidGame { season: 4, day: 11 })
        );
    }

    #[test]
    fn apply_scrubs_or_drops() {
        let games = vec![
            GameRecord::new(4, 10)
                .with_scores(3, 1)
                .with_generations(json!(400))
                .with_detail("description", json!("Game 1")),
            GameRecord::new(4, 10).with_scores(0, 2),
        ];

        let full = Disclosure::Full.apply(games.clone());
        assert_eq!(full, games);

        let redacted = Disclosure::Redacted.apply(games.clone());
        assert_eq!(redacted.len(), 2);
        assert!(redacted.iter().all(GameRecord::is_redacted));
        assert_eq!(redacted[0].details["description"], json!("Game 1"));

        assert!(Disclosure::Hidden.apply(games.clone()).is_empty());
        assert_eq!(Disclosure::Hidden.apply_one(games[0].clone()), None);
    }

    #[test]
    fn require_visible_maps_hidden_to_future_day() {
        assert_eq!(
            Disclosure::Hidden.require_visible(4, 12, 10),
            Err(Error::FutureDay {
                season: 4,
                requested: 12,
                current: 10
            })
        );
        assert_eq!(
            Disclosure::Redacted.require_visible(4, 10, 10),
            Ok(Disclosure::Redacted)
        );
    }
}
