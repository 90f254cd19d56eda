use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::SelectedSquad;
use crate::player_data::DataError;

pub const MAX_BATTLES: usize = 5;
const KEY_PLAYERS: usize = 5;

/// batter -> bowler -> dismissals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DismissalTable {
    entries: HashMap<String, HashMap<String, u32>>,
}

impl DismissalTable {
    pub fn insert(&mut self, batter: &str, bowler: &str, dismissals: u32) {
        self.entries
            .entry(batter.to_string())
            .or_default()
            .insert(bowler.to_string(), dismissals);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dismissals(&self, batter: &str, bowler: &str) -> Option<u32> {
        self.entries.get(batter)?.get(bowler).copied()
    }

    fn has_batter(&self, batter: &str) -> bool {
        self.entries.contains_key(batter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyBattle {
    pub batter: String,
    pub bowler: String,
    pub dismissals: u32,
}

impl fmt::Display for KeyBattle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {}: {} Dismissals",
            self.batter, self.bowler, self.dismissals
        )
    }
}

pub fn parse_dismissal_table(raw: &str) -> Result<DismissalTable, DataError> {
    Ok(serde_json::from_str::<DismissalTable>(raw)?)
}

/// A missing file is an empty table.
pub fn load_dismissal_table(path: &Path) -> Result<DismissalTable> {
    if !path.exists() {
        debug!(path = %path.display(), "no dismissal table");
        return Ok(DismissalTable::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read dismissal table {}", path.display()))?;
    parse_dismissal_table(&raw)
        .with_context(|| format!("parse dismissal table {}", path.display()))
}

/// Head-to-heads with at least one dismissal: squad A's top batters against
/// squad B's top bowlers, then the reverse. First `MAX_BATTLES` found, in
/// discovery order.
pub fn find_key_battles(
    table: &DismissalTable,
    squad_a: &SelectedSquad,
    squad_b: &SelectedSquad,
) -> Vec<KeyBattle> {
    if table.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    collect_battles(table, squad_a, squad_b, &mut out);
    collect_battles(table, squad_b, squad_a, &mut out);
    out.truncate(MAX_BATTLES);
    out
}

fn collect_battles(
    table: &DismissalTable,
    batting: &SelectedSquad,
    bowling: &SelectedSquad,
    out: &mut Vec<KeyBattle>,
) {
    let bowlers: Vec<&str> = bowling
        .top_bowlers(KEY_PLAYERS)
        .map(|p| p.name.as_str())
        .collect();
    for batter in batting.top_batters(KEY_PLAYERS) {
        if !table.has_batter(&batter.name) {
            continue;
        }
        for bowler in &bowlers {
            match table.dismissals(&batter.name, bowler) {
                Some(n) if n >= 1 => out.push(KeyBattle {
                    batter: batter.name.clone(),
                    bowler: (*bowler).to_string(),
                    dismissals: n,
                }),
                _ => {}
            }
        }
    }
}
