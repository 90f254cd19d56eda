use std::fs;
use std::path::PathBuf;

use squadmind::elo::{EloConfig, win_probability_pct};
use squadmind::key_battles::{MAX_BATTLES, find_key_battles, parse_dismissal_table};
use squadmind::model::{MatchContext, MatchFormat, PitchCondition, SelectionStatus};
use squadmind::optimizer::{SquadRequest, optimize_squad_with};
use squadmind::player_data::{PlayerRecord, parse_players};
use squadmind::predictor::predict_match_with;
use squadmind::reference::KeeperList;
use squadmind::venue::parse_venues;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_players() -> Vec<PlayerRecord> {
    parse_players(read_fixture("players.csv").as_bytes()).expect("fixture should parse")
}

fn predict(team_a: &str, team_b: &str, players: &[PlayerRecord]) -> Option<squadmind::model::MatchPrediction> {
    predict_match_with(
        team_a,
        team_b,
        players,
        MatchFormat::T20,
        MatchContext::International,
        &KeeperList::builtin(),
        EloConfig::default(),
    )
}

#[test]
fn rating_gap_scenario() {
    let p = win_probability_pct(600.0, 500.0, EloConfig::default());
    assert!((p - 64.0).abs() < 0.05);
}

#[test]
fn fixture_match_is_symmetric() {
    let players = fixture_players();
    let ab = predict("Australia", "England", &players).expect("both teams staffed");
    let ba = predict("England", "Australia", &players).expect("both teams staffed");

    assert_eq!(ab.squad_a.status, SelectionStatus::Optimal);
    assert_eq!(ab.squad_b.status, SelectionStatus::Optimal);
    assert!((ab.prob_a + ab.prob_b() - 100.0).abs() < 1e-9);
    assert!((ab.prob_a + ba.prob_a - 100.0).abs() < 1e-9);
    assert!((ab.strength_a - ab.squad_a.strength()).abs() < 1e-9);
}

#[test]
fn short_squad_still_predicts_with_fallback() {
    let players = fixture_players();
    let out = predict("India", "England", &players).expect("india has players");
    assert_eq!(out.squad_a.status, SelectionStatus::Fallback);
    assert_eq!(out.squad_a.players.len(), 5);
    assert!(out.prob_a < 50.0);
}

#[test]
fn empty_team_has_no_squad_and_no_prediction() {
    let players = fixture_players();
    let squad = optimize_squad_with(
        &players,
        &SquadRequest {
            team: "Ireland",
            opponent: "England",
            pitch: PitchCondition::Flat,
            format: MatchFormat::T20,
            context: MatchContext::International,
        },
        &KeeperList::builtin(),
    );
    assert_eq!(squad.status, SelectionStatus::NoDataForTeam);
    assert!(squad.is_empty());
    assert!(predict("Ireland", "England", &players).is_none());
    assert!(predict("England", "Ireland", &players).is_none());
}

#[test]
fn venue_pitch_changes_the_squad_score() {
    let players = fixture_players();
    let venues = parse_venues(read_fixture("venues.csv").as_bytes()).unwrap();
    let keepers = KeeperList::builtin();
    let run = |venue: &str| {
        optimize_squad_with(
            &players,
            &SquadRequest {
                team: "Australia",
                opponent: "England",
                pitch: venues.pitch_condition(venue),
                format: MatchFormat::T20,
                context: MatchContext::International,
            },
            &keepers,
        )
    };
    let flat = run("Melbourne Cricket Ground");
    let green = run("Lord's");
    let dusty = run("The Sevens, Dubai");
    assert!(green.strength() > flat.strength());
    assert!(dusty.strength() > green.strength());
    assert_eq!(run("Nowhere").strength(), flat.strength());
}

#[test]
fn key_battles_from_fixture() {
    let players = fixture_players();
    let table = parse_dismissal_table(&read_fixture("key_battles.json")).unwrap();
    let pred = predict("Australia", "England", &players).expect("both teams staffed");

    let battles: Vec<String> = find_key_battles(&table, &pred.squad_a, &pred.squad_b)
        .iter()
        .map(ToString::to_string)
        .collect();
    // Australia batting comes first; Sciver-Brunt vs Schutt (4) is cut by the limit.
    assert_eq!(
        battles,
        vec![
            "B Mooney vs NR Sciver-Brunt: 1 Dismissals",
            "B Mooney vs S Ecclestone: 3 Dismissals",
            "MM Lanning vs S Ecclestone: 2 Dismissals",
            "MM Lanning vs S Glenn: 1 Dismissals",
            "NR Sciver-Brunt vs EA Perry: 2 Dismissals",
        ]
    );
    assert_eq!(battles.len(), MAX_BATTLES);
}
