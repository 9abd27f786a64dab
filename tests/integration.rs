use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use seasonclock::{
    Disclosure, Error, FixedClock, GameRecord, JsonSchedule, LeagueConfig, Mode, SeasonClock,
    SeasonSection, SectionView, Series, SeriesLengths, StaticSchedule,
};
use serde_json::json;

/// Monday 2024-01-01 00:00, league-local.
fn genesis() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn config() -> LeagueConfig {
    LeagueConfig::new(genesis(), chrono_tz::US::Pacific).unwrap()
}

fn local(config: &LeagueConfig, offset: Duration) -> DateTime<Utc> {
    config
        .time_zone()
        .from_local_datetime(&(config.genesis() + offset))
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}

fn engine(config: LeagueConfig) -> SeasonClock<StaticSchedule> {
    SeasonClock::new(
        config,
        StaticSchedule::uniform(0..config.max_seasons(), SeriesLengths::new(3, 5, 5)),
    )
}

#[test]
fn scenario_a_regular_season_day_from_elapsed_hours() {
    // A season long enough for day 74 to still be regular season, with the
    // final series still starting inside the six-day window.
    let config = config().with_days_per_season(75).unwrap();
    let now = local(&config, Duration::days(3) + Duration::hours(2));
    let snapshot = engine(config).snapshot_at(now).unwrap();
    assert_eq!(snapshot.status.mode.code(), 10);
    assert_eq!(snapshot.status.season, 0);
    assert_eq!(snapshot.day, 74);
}

#[test]
fn scenario_b_waiting_for_division_series() {
    let config = config();
    let now = local(&config, Duration::hours(49) + Duration::minutes(30));
    let snapshot = engine(config).snapshot_at(now).unwrap();
    assert_eq!(
        snapshot.status.mode,
        Mode::AwaitingSeries {
            series: Series::Lds,
            starts_in: 1800
        }
    );
    assert_eq!(snapshot.day, 48);
}

#[test]
fn scenario_c_division_series_underway() {
    let config = config();
    let now = local(&config, Duration::hours(50) + Duration::seconds(1));
    let snapshot = engine(config).snapshot_at(now).unwrap();
    assert_eq!(
        snapshot.status.mode,
        Mode::SeriesUnderway {
            series: Series::Lds,
            elapsed: 1
        }
    );
    assert_eq!(snapshot.status.mode.code(), 31);
    assert_eq!(snapshot.day, 49);
}

#[test]
fn scenario_d_current_day_of_championship_is_redacted() {
    let config = config();
    let now = local(&config, Duration::hours(73) + Duration::minutes(15));
    let engine = engine(config);
    let snapshot = engine.snapshot_at(now).unwrap();
    assert_eq!(snapshot.status.mode.code(), 32);

    let (season, day) = snapshot.today();
    assert_eq!(
        engine.visibility(i64::from(season), day, now),
        Ok(Disclosure::Redacted)
    );
    assert_eq!(
        engine.game_visibility(i64::from(season), day, now),
        Ok(Disclosure::Redacted)
    );
}

#[test]
fn scenario_e_retirement_sentinel() {
    let config = config();
    let now = local(&config, Duration::weeks(30) + Duration::hours(3));
    let engine = engine(config);
    let status = engine.classify(now).unwrap();
    assert_eq!(status.mode, Mode::Retired);
    assert_eq!(status.season, 23);
    assert_eq!(status.to_legacy_json(), json!({"mode": 40, "season": 23}));
    assert_eq!(engine.current_season(now), 23);
    assert_eq!(engine.current_day(now), Ok(99));
}

#[test]
fn before_genesis_is_pre_season_zero() {
    let config = config();
    let engine = engine(config);
    for offset in [Duration::days(-400), Duration::hours(-5), Duration::seconds(-1)] {
        let now = local(&config, offset);
        let status = engine.classify(now).unwrap();
        assert_eq!(engine.current_season(now), 0);
        assert_eq!(status.mode.code(), 0);
        assert_eq!(engine.current_day(now), Ok(-1));
    }
}

#[test]
fn full_season_walkthrough_of_legacy_codes() {
    let config = config();
    let engine = engine(config);
    let season_two = Duration::weeks(2);
    let expected = [
        (-1, 0),
        (0, 10),
        (48, 10),
        (49, 21),
        (51, 31),
        (60, 22),
        (74, 32),
        (80, 23),
        (97, 33),
        (102, 40),
        (140, 40),
    ];
    for (hours, code) in expected {
        let now = local(&config, season_two + Duration::hours(hours));
        let status = engine.classify(now).unwrap();
        assert_eq!(status.season, 2, "hour {hours}");
        assert_eq!(status.mode.code(), code, "hour {hours}");
    }
}

#[test]
fn seventh_day_is_next_seasons_pre_season() {
    let config = config();
    let now = local(&config, Duration::days(6) + Duration::hours(2));
    let status = engine(config).classify(now).unwrap();
    assert_eq!(status.season, 1);
    assert!(matches!(status.mode, Mode::PreSeason { .. }));
}

#[test]
fn seasons_across_daylight_saving_keep_their_start_hour() {
    // Season 10 starts 2024-03-11 00:00 PDT, after the spring transition.
    let config = config();
    let start = Utc.with_ymd_and_hms(2024, 3, 11, 7, 0, 0).unwrap();
    let engine = engine(config);
    assert_eq!(engine.classify(start).unwrap().mode.code(), 10);
    assert_eq!(engine.current_day(start), Ok(0));
    assert_eq!(
        engine.classify(start - Duration::seconds(1)).unwrap().mode,
        Mode::PreSeason { starts_in: 1 }
    );
}

#[test]
fn json_provider_drives_the_postseason() {
    let config = config();
    let schedule =
        JsonSchedule::parse(r#"{"0": {"LDS": 4, "LCS": 7, "HCS": 6}}"#).unwrap();
    let engine = SeasonClock::new(config, schedule);

    let now = local(&config, Duration::hours(54) + Duration::minutes(1));
    assert_eq!(engine.classify(now).unwrap().mode.code(), 22);
    assert_eq!(engine.current_day(now), Ok(49 + 4 - 1));

    let other_season = local(&config, Duration::weeks(1) + Duration::hours(54));
    assert!(matches!(
        engine.classify(other_season),
        Err(Error::ProviderUnavailable { season: 1, .. })
    ));
}

#[test]
fn pending_series_lengths_are_not_cached() {
    let config = config();
    let schedule = StaticSchedule::uniform(0..1, SeriesLengths::new(3, 5, 5))
        .pending(0, Series::Hcs);
    let engine = SeasonClock::new(config, schedule);
    engine
        .snapshot_at(local(&config, Duration::hours(97)))
        .unwrap();
    assert_eq!(engine.cache().len(), 2);
}

#[test]
fn visibility_drives_record_redaction() {
    let config = config();
    let now = local(&config, Duration::hours(20) + Duration::minutes(10));
    let engine = engine(config).with_clock(FixedClock(now));
    let snapshot = engine.snapshot().unwrap();

    let games = |day: i64| {
        vec![GameRecord::new(0, day)
            .with_scores(5, 3)
            .with_generations(json!(1200))
            .with_detail("team1Name", json!("Alpha"))]
    };

    let yesterday = snapshot.visibility(0, 19).unwrap().apply(games(19));
    assert_eq!(yesterday[0].team1_score, Some(json!(5)));

    let today = snapshot.visibility(0, 20).unwrap().apply(games(20));
    assert!(today[0].is_redacted());
    assert_eq!(today[0].details["team1Name"], json!("Alpha"));

    let tomorrow = snapshot.visibility(0, 21).unwrap();
    assert_eq!(tomorrow, Disclosure::Hidden);
    assert!(tomorrow.apply(games(21)).is_empty());
    assert_eq!(
        tomorrow.require_visible(0, 21, snapshot.day),
        Err(Error::FutureDay {
            season: 0,
            requested: 21,
            current: 20
        })
    );
    assert!(matches!(
        snapshot.game_visibility(0, 21),
        Err(Error::InvalidGame { season: 0, day: 21 })
    ));
}

#[test]
fn season_sections_follow_the_phase() {
    let config = config();
    let engine = engine(config);
    let waiting_lcs = engine
        .snapshot_at(local(&config, Duration::weeks(1) + Duration::hours(60)))
        .unwrap();
    assert_eq!(waiting_lcs.status.mode.code(), 22);
    assert_eq!(
        waiting_lcs.section(SeasonSection::Postseason, 1),
        Ok(SectionView::ThroughSeriesDay {
            series: Series::Lcs,
            day: 1
        })
    );
    assert_eq!(
        waiting_lcs.section(SeasonSection::Seeds, 1),
        Ok(SectionView::Full)
    );
    assert_eq!(
        waiting_lcs.section(SeasonSection::Records, 1),
        Ok(SectionView::AsOfDay {
            day: waiting_lcs.day + 1
        })
    );
    assert_eq!(
        waiting_lcs.section(SeasonSection::Champion, 0),
        Ok(SectionView::Full)
    );
    assert!(matches!(
        waiting_lcs.section(SeasonSection::Teams, 2),
        Err(Error::FutureSeason { .. })
    ));
}

#[test]
fn configuration_from_lookup_feeds_the_engine() {
    let config = LeagueConfig::from_lookup(|key| match key {
        "LEAGUE_START_DATE" => Some("2024-01-01".to_string()),
        "LEAGUE_START_HOUR" => Some("6".to_string()),
        "LEAGUE_TIME_ZONE" => Some("UTC".to_string()),
        _ => None,
    })
    .unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap();
    let snapshot = engine(config).snapshot_at(now).unwrap();
    assert_eq!(snapshot.today(), (0, 2));
    assert_eq!(
        snapshot.status.to_legacy_json(),
        json!({"mode": 10, "season": 0, "elapsed": 9000})
    );
}
