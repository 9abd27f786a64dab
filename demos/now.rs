use seasonclock::{JsonSchedule, LeagueConfig, SeasonClock, SeasonSection, SeriesLengths, StaticSchedule};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LeagueConfig::from_env()?;

    // Optional JSON length table as the first argument; otherwise best-of-5/7/7.
    let snapshot = match std::env::args().nth(1) {
        Some(path) => {
            let schedule = JsonSchedule::parse(&std::fs::read_to_string(path)?)?;
            SeasonClock::new(config, schedule).snapshot()?
        }
        None => {
            let schedule =
                StaticSchedule::uniform(0..config.max_seasons(), SeriesLengths::new(5, 7, 7));
            SeasonClock::new(config, schedule).snapshot()?
        }
    };

    let (season, day) = snapshot.today();
    println!("now: {}", snapshot.now.with_timezone(&config.time_zone()));
    println!("season: {season}  day: {day}");
    println!("mode: {}", snapshot.status.to_legacy_json());
    if let Some(hours) = snapshot.status.elapsed_hours() {
        println!("elapsed: {hours}");
    }
    if let Some(hours) = snapshot.status.hours_until_next() {
        println!("next boundary in: {hours}");
    }
    println!("slate: {:?}", snapshot.current_slate());
    println!("today's games: {:?}", snapshot.visibility(i64::from(season), day.max(0))?);
    for section in [SeasonSection::Schedule, SeasonSection::Postseason, SeasonSection::Champion] {
        println!("{section:?}: {:?}", snapshot.section(section, i64::from(season))?);
    }
    Ok(())
}
