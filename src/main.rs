use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use squadmind::config::{AppConfig, WeatherConfig};
use squadmind::demo_data::{DEMO_SEED, demo_players};
use squadmind::key_battles::{find_key_battles, load_dismissal_table};
use squadmind::model::{
    MatchContext, MatchFormat, SelectedSquad, SelectionStatus, context_label, format_label,
    parse_context, parse_format, pitch_label, role_label, status_label,
};
use squadmind::optimizer::{SquadRequest, optimize_squad};
use squadmind::player_data::{PlayerRecord, load_players};
use squadmind::predictor::predict_match;
use squadmind::teams::{default_opponent, filtered_teams};
use squadmind::venue::{VenueTable, load_venues};
use squadmind::weather::{self, WeatherReport, live_weather};

const FALLBACK_VENUE: &str = "London";

struct Args {
    command: String,
    flags: HashMap<String, String>,
    demo: bool,
}

impl Args {
    fn flag(&self, key: &str) -> Option<&str> {
        self.flags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    fn format(&self) -> MatchFormat {
        self.flag("format").map(parse_format).unwrap_or(MatchFormat::T20)
    }

    fn context(&self) -> MatchContext {
        self.flag("context")
            .map(parse_context)
            .unwrap_or(MatchContext::International)
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_tracing();

    let args = parse_args(std::env::args().skip(1).collect());
    let cfg = AppConfig::from_env();

    match args.command.as_str() {
        "squad" => run_squad(&args, &cfg),
        "predict" => run_predict(&args, &cfg),
        "teams" => run_teams(&args, &cfg),
        "venues" => run_venues(&cfg),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(raw: Vec<String>) -> Args {
    let mut command = String::new();
    let mut flags = HashMap::new();
    let mut demo = false;

    let mut idx = 0;
    while idx < raw.len() {
        let arg = &raw[idx];
        idx += 1;
        if arg == "--demo" {
            demo = true;
            continue;
        }
        if let Some(flag) = arg.strip_prefix("--") {
            if let Some((key, value)) = flag.split_once('=') {
                flags.insert(key.to_string(), value.trim().to_string());
            } else if let Some(next) = raw.get(idx) {
                flags.insert(flag.to_string(), next.trim().to_string());
                idx += 1;
            }
            continue;
        }
        if command.is_empty() {
            command = arg.clone();
        }
    }

    Args {
        command,
        flags,
        demo,
    }
}

fn load_player_table(args: &Args, cfg: &AppConfig) -> Result<Vec<PlayerRecord>> {
    if args.demo {
        return Ok(demo_players(DEMO_SEED));
    }
    if !cfg.players_path.exists() {
        bail!(
            "player data missing at {} (set SQUADMIND_PLAYERS_PATH or pass --demo)",
            cfg.players_path.display()
        );
    }
    load_players(&cfg.players_path)
}

fn context_teams(players: &[PlayerRecord], context: MatchContext) -> Result<Vec<String>> {
    let teams = filtered_teams(players, context);
    if teams.is_empty() {
        bail!("no teams found for {} context", context_label(context));
    }
    Ok(teams)
}

fn run_teams(args: &Args, cfg: &AppConfig) -> Result<()> {
    let players = load_player_table(args, cfg)?;
    let context = args.context();
    for team in context_teams(&players, context)? {
        println!("{team}");
    }
    Ok(())
}

fn run_venues(cfg: &AppConfig) -> Result<()> {
    let venues = load_venues(&cfg.venues_path)?;
    if venues.is_empty() {
        println!("No venue data at {}", cfg.venues_path.display());
        return Ok(());
    }
    println!("{:<40} {}", "Venue", "Pitch");
    for line in venue_lines(&venues) {
        println!("{line}");
    }
    Ok(())
}

fn venue_lines(venues: &VenueTable) -> Vec<String> {
    venues
        .venue_names()
        .iter()
        .map(|name| format!("{:<40} {}", name, pitch_label(venues.pitch_condition(name))))
        .collect()
}

struct SquadReport {
    squad: SelectedSquad,
    weather: Option<WeatherReport>,
}

/// Selection first; weather is display-only and skipped when there is no squad.
fn build_squad_report(
    players: &[PlayerRecord],
    req: &SquadRequest<'_>,
    venue: &str,
    weather_cfg: &WeatherConfig,
) -> SquadReport {
    let squad = optimize_squad(players, req);
    let weather = if squad.is_empty() {
        None
    } else {
        Some(live_weather(venue, weather_cfg))
    };
    SquadReport { squad, weather }
}

fn run_squad(args: &Args, cfg: &AppConfig) -> Result<()> {
    let players = load_player_table(args, cfg)?;
    let format = args.format();
    let context = args.context();
    let teams = context_teams(&players, context)?;

    let team = args.flag("team").unwrap_or(&teams[0]);
    let opponent = args
        .flag("opponent")
        .unwrap_or_else(|| default_opponent(&teams, team));

    let venues = load_venues(&cfg.venues_path)?;
    let venue = args
        .flag("venue")
        .or_else(|| venues.venue_names().first().map(String::as_str))
        .unwrap_or(FALLBACK_VENUE);
    let pitch = venues.pitch_condition(venue);

    println!(
        "Squad Grandmaster: {} vs {} at {} ({}, {})",
        team,
        opponent,
        venue,
        format_label(format),
        context_label(context)
    );

    let SquadReport {
        squad,
        weather: forecast,
    } = build_squad_report(
        &players,
        &SquadRequest {
            team,
            opponent,
            pitch,
            format,
            context,
        },
        venue,
        &cfg.weather,
    );

    let Some(report) = forecast else {
        println!("Optimization failed: {}", status_label(squad.status));
        return Ok(());
    };

    println!(
        "Weather: {:.1}°C {} [{}]",
        report.temperature_c,
        report.description,
        weather::status_label(report.status)
    );
    println!("Pitch: {}", pitch_label(pitch));
    println!("Strength: {:.0}", squad.strength());
    println!("Status: {}", status_label(squad.status));
    if squad.status != SelectionStatus::Optimal {
        println!("WARNING: Constraints Relaxed");
    }
    println!();
    print_squad(&squad);
    Ok(())
}

fn run_predict(args: &Args, cfg: &AppConfig) -> Result<()> {
    let players = load_player_table(args, cfg)?;
    let format = args.format();
    let context = args.context();
    let teams = context_teams(&players, context)?;

    let home = args.flag("home").unwrap_or(&teams[0]);
    let away = args
        .flag("away")
        .unwrap_or_else(|| teams.get(1).map(String::as_str).unwrap_or(&teams[0]));

    let Some(prediction) = predict_match(home, away, &players, format, context) else {
        println!("No prediction available for {home} vs {away}");
        return Ok(());
    };

    let (winner, pct) = prediction.favourite();
    println!("{winner} wins ({pct:.1}%)");
    println!("{}: {:.0}", prediction.team_a, prediction.strength_a);
    println!("{}: {:.0}", prediction.team_b, prediction.strength_b);
    println!();

    let table = load_dismissal_table(&cfg.battles_path).context("load key battles")?;
    let battles = find_key_battles(&table, &prediction.squad_a, &prediction.squad_b);
    println!("Key battles");
    if battles.is_empty() {
        println!("  No significant matchups found");
    }
    for battle in battles {
        println!("  {battle}");
    }
    Ok(())
}

fn print_squad(squad: &SelectedSquad) {
    println!(
        "{:<28} {:<12} {:>6} {:>4} {:>8} {:>5}",
        "Player", "Role", "Score", "WK", "Bat Avg", "Wkts"
    );
    for p in &squad.players {
        println!(
            "{:<28} {:<12} {:>6.0} {:>4} {:>8.1} {:>5.0}",
            p.name,
            role_label(p.role),
            p.score,
            if p.is_keeper { "yes" } else { "" },
            p.display_bat,
            p.display_bowl
        );
    }
}

fn print_usage() {
    println!("usage: squadmind <command> [--demo] [options]");
    println!();
    println!("  squad    --team T [--opponent O] [--venue V] [--format F] [--context C]");
    println!("  predict  --home A --away B [--format F] [--context C]");
    println!("  teams    [--context C]");
    println!("  venues");
    println!();
    println!("  F: T20 | ODI | Test    C: International | \"Domestic League\"");
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadmind::model::PitchCondition;
    use squadmind::weather::WeatherStatus;

    fn args(raw: &[&str]) -> Args {
        parse_args(raw.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn parses_flags_in_both_forms() {
        let a = args(&["squad", "--team", "India", "--format=odi", "--demo"]);
        assert_eq!(a.command, "squad");
        assert_eq!(a.flag("team"), Some("India"));
        assert_eq!(a.format(), MatchFormat::Odi);
        assert!(a.demo);
    }

    fn request(team: &str) -> SquadRequest<'_> {
        SquadRequest {
            team,
            opponent: "England",
            pitch: PitchCondition::Green,
            format: MatchFormat::T20,
            context: MatchContext::International,
        }
    }

    #[test]
    fn squad_report_fetches_weather_after_selection() {
        let players = demo_players(DEMO_SEED);
        let report = build_squad_report(
            &players,
            &request("Australia"),
            "The Sevens, Dubai",
            &WeatherConfig::default(),
        );
        assert_eq!(report.squad.status, SelectionStatus::Optimal);
        assert_eq!(report.squad.players.len(), 11);
        let weather = report.weather.expect("squad selected, weather attached");
        assert_eq!(weather.status, WeatherStatus::ApiError);
    }

    #[test]
    fn empty_squad_skips_weather() {
        let players = demo_players(DEMO_SEED);
        let report = build_squad_report(
            &players,
            &request("Atlantis"),
            "Lord's",
            &WeatherConfig::default(),
        );
        assert_eq!(report.squad.status, SelectionStatus::NoDataForTeam);
        assert!(report.weather.is_none());
    }

    #[test]
    fn venue_lines_list_each_pitch_in_table_order() {
        let mut venues = VenueTable::default();
        venues.insert("The Sevens, Dubai", PitchCondition::Dusty);
        venues.insert("Lord's", PitchCondition::Green);
        let lines = venue_lines(&venues);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("The Sevens, Dubai"));
        assert!(lines[0].ends_with("Dusty"));
        assert!(lines[1].ends_with("Green"));
    }

    #[test]
    fn context_flag_accepts_spaces() {
        let a = args(&["teams", "--context", "Domestic League"]);
        assert_eq!(a.context(), MatchContext::DomesticLeague);
        assert_eq!(args(&["teams"]).context(), MatchContext::International);
    }
}
