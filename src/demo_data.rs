use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::MatchFormat;
use crate::player_data::PlayerRecord;
use crate::reference::international_teams;

pub const DEMO_SEED: u64 = 2024;
const SQUAD_DEPTH: usize = 16;
const LEAGUE_TEAMS: [&str; 4] = [
    "Sydney Sixers",
    "Mumbai Indians",
    "Southern Brave",
    "Perth Scorchers",
];
const DEMO_KEEPERS: [&str; 6] = [
    "AJ Healy",
    "Richa Ghosh",
    "AE Jones",
    "Muneeba Ali",
    "T Chetty",
    "SJ McGlashan",
];
const FORMATS: [MatchFormat; 3] = [MatchFormat::T20, MatchFormat::Odi, MatchFormat::Test];

/// A synthetic player table: every international side plus a handful of
/// league sides, `SQUAD_DEPTH` players each. Same seed, same table.
pub fn demo_players(seed: u64) -> Vec<PlayerRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let intl = international_teams();
    let opponents: Vec<&str> = intl.iter().copied().chain(LEAGUE_TEAMS).collect();

    let mut out = Vec::new();
    for (team_idx, team) in opponents.iter().enumerate() {
        for slot in 0..SQUAD_DEPTH {
            let name = player_name(team, team_idx, slot);
            out.push(demo_player(&mut rng, &name, team, slot, &opponents));
        }
    }
    out
}

fn player_name(team: &str, team_idx: usize, slot: usize) -> String {
    // Slot 0 always carries a known keeper's name, so every side can meet
    // the keeper constraint. Names repeat once the list runs out.
    if slot == 0 {
        return DEMO_KEEPERS[team_idx % DEMO_KEEPERS.len()].to_string();
    }
    format!("{team} #{:02}", slot + 1)
}

fn demo_player<R: Rng>(
    rng: &mut R,
    name: &str,
    team: &str,
    slot: usize,
    opponents: &[&str],
) -> PlayerRecord {
    // Slots 0..6 bat, 6..10 are all-rounders, the tail bowls.
    let (bat_range, wkt_range) = match slot {
        0..=5 => (18.0..48.0, 0.0..4.0),
        6..=9 => (16.0..32.0, 10.0..60.0),
        _ => (4.0..14.0, 20.0..120.0),
    };

    let mut record = PlayerRecord::new(name, team);
    let mut bat_total = 0.0;
    let mut wkt_total = 0.0;
    for fmt in FORMATS {
        let bat: f64 = rng.gen_range(bat_range.clone());
        let wkts: f64 = rng.gen_range(wkt_range.clone());
        let wkts = wkts.floor();
        bat_total += bat;
        wkt_total += wkts;
        record = record.with_format(fmt, round1(bat), wkts);
    }
    record = record
        .with_overall(round1(bat_total / FORMATS.len() as f64), wkt_total)
        .with_league_avg(round1(rng.gen_range(bat_range)));

    for opp in opponents.iter().filter(|o| **o != team) {
        if rng.gen_bool(0.3) {
            record = record.with_avg_vs(opp, round1(rng.gen_range(10.0..45.0)));
        }
    }
    record
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
