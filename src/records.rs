// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Game records as served to the public, and their redacted form.
//!
//! Only the fields the disclosure policy cares about are typed; every other
//! field of the stored record (team names, description, ids, ...) is kept
//! verbatim in [`GameRecord::details`]. Scores stay as raw JSON values so
//! that legacy records with fractional or negative scores still load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-side score keys.
pub const SCORE_FIELDS: [&str; 2] = ["team1Score", "team2Score"];

/// Internal simulation-trace key.
pub const TRACE_FIELD: &str = "generations";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub season: u32,
    pub day: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1_score: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2_score: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generations: Option<Value>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl GameRecord {
    pub fn new(season: u32, day: i64) -> Self {
        Self {
            season,
            day,
            team1_score: None,
            team2_score: None,
            generations: None,
            details: Map::new(),
        }
    }

    pub fn with_scores(mut self, team1: u32, team2: u32) -> Self {
        self.team1_score = Some(Value::from(team1));
        self.team2_score = Some(Value::from(team2));
        self
    }

    pub fn with_generations(mut self, trace: Value) -> Self {
        self.generations = Some(trace);
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }

    /// Strip scores and the simulation trace; keep schedule and identity
    /// fields.
    pub fn redacted(mut self) -> Self {
        self.team1_score = None;
        self.team2_score = None;
        self.generations = None;
        for key in SCORE_FIELDS.iter().chain(std::iter::once(&TRACE_FIELD)) {
            self.details.remove(*key);
        }
        self
    }

    /// `true` when no score or trace data is present.
    pub fn is_redacted(&self) -> bool {
        self.team1_score.is_none()
            && self.team2_score.is_none()
            && self.generations.is_none()
            && !SCORE_FIELDS
                .iter()
                .chain(std::iter::once(&TRACE_FIELD))
                .any(|key| self.details.contains_key(*key))
    }
}
