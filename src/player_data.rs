use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::model::MatchFormat;

const UNKNOWN: &str = "Unknown";
const OPPONENT_PREFIX: &str = "Avg_vs_";
const LEAGUE_COLUMN: &str = "Avg_vs_League";

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required column {0}")]
    MissingColumn(&'static str),
}

/// One row of the player statistics table.
///
/// Format columns are optional per table, so batting and bowling figures are
/// kept per format and only present when the source carried that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub bat_avg: HashMap<MatchFormat, f64>,
    pub bowl_wkts: HashMap<MatchFormat, f64>,
    pub bat_avg_overall: f64,
    pub bowl_wkts_overall: f64,
    pub avg_vs: HashMap<String, f64>,
    pub avg_vs_league: f64,
}

impl PlayerRecord {
    pub fn new(name: &str, team: &str) -> Self {
        Self {
            name: name.to_string(),
            team: team.to_string(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: MatchFormat, bat_avg: f64, bowl_wkts: f64) -> Self {
        self.bat_avg.insert(format, bat_avg);
        self.bowl_wkts.insert(format, bowl_wkts);
        self
    }

    pub fn with_overall(mut self, bat_avg: f64, bowl_wkts: f64) -> Self {
        self.bat_avg_overall = bat_avg;
        self.bowl_wkts_overall = bowl_wkts;
        self
    }

    pub fn with_avg_vs(mut self, opponent: &str, avg: f64) -> Self {
        self.avg_vs.insert(opponent.to_string(), avg);
        self
    }

    pub fn with_league_avg(mut self, avg: f64) -> Self {
        self.avg_vs_league = avg;
        self
    }

    pub fn batting(&self, format: MatchFormat) -> f64 {
        self.bat_avg
            .get(&format)
            .copied()
            .unwrap_or(self.bat_avg_overall)
    }

    pub fn bowling(&self, format: MatchFormat) -> f64 {
        self.bowl_wkts
            .get(&format)
            .copied()
            .unwrap_or(self.bowl_wkts_overall)
    }

    pub fn avg_against(&self, opponent: &str) -> Option<f64> {
        self.avg_vs.get(opponent).copied()
    }
}

pub fn team_pool<'a>(players: &'a [PlayerRecord], team: &str) -> Vec<&'a PlayerRecord> {
    players.iter().filter(|p| p.team == team).collect()
}

pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>> {
    let file =
        File::open(path).with_context(|| format!("open player table {}", path.display()))?;
    let players =
        parse_players(file).with_context(|| format!("parse player table {}", path.display()))?;
    debug!(rows = players.len(), path = %path.display(), "loaded player table");
    Ok(players)
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Name,
    Team,
    Bat(Option<MatchFormat>),
    Bowl(Option<MatchFormat>),
    League,
    Opponent,
    Ignored,
}

fn classify_header(header: &str) -> Column {
    match header {
        "Player" => Column::Name,
        "Country" => Column::Team,
        "Bat_Avg_T20" => Column::Bat(Some(MatchFormat::T20)),
        "Bat_Avg_ODI" => Column::Bat(Some(MatchFormat::Odi)),
        "Bat_Avg_Test" => Column::Bat(Some(MatchFormat::Test)),
        "Bat_Avg_Overall" => Column::Bat(None),
        "Bowl_Wkts_T20" => Column::Bowl(Some(MatchFormat::T20)),
        "Bowl_Wkts_ODI" => Column::Bowl(Some(MatchFormat::Odi)),
        "Bowl_Wkts_Test" => Column::Bowl(Some(MatchFormat::Test)),
        "Bowl_Wkts_Overall" => Column::Bowl(None),
        LEAGUE_COLUMN => Column::League,
        h if h.starts_with(OPPONENT_PREFIX) && h.len() > OPPONENT_PREFIX.len() => {
            Column::Opponent
        }
        _ => Column::Ignored,
    }
}

/// Parse the flat player table. Numeric gaps become 0 and text gaps become
/// "Unknown"; rows the csv reader rejects are skipped.
pub fn parse_players<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, DataError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader.headers()?.clone();
    let columns: Vec<(Column, String)> = headers
        .iter()
        .map(|h| {
            let h = h.trim();
            (classify_header(h), h.to_string())
        })
        .collect();

    if !columns.iter().any(|(c, _)| matches!(c, Column::Name)) {
        return Err(DataError::MissingColumn("Player"));
    }
    if !columns.iter().any(|(c, _)| matches!(c, Column::Team)) {
        return Err(DataError::MissingColumn("Country"));
    }

    let mut players = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = row_idx + 1, "skipping malformed player row: {e}");
                continue;
            }
        };

        let mut player = PlayerRecord::default();
        for ((column, header), cell) in columns.iter().zip(record.iter()) {
            match column {
                Column::Name => player.name = parse_text(cell),
                Column::Team => player.team = parse_text(cell),
                Column::Bat(Some(fmt)) => {
                    player.bat_avg.insert(*fmt, parse_num(cell));
                }
                Column::Bat(None) => player.bat_avg_overall = parse_num(cell),
                Column::Bowl(Some(fmt)) => {
                    player.bowl_wkts.insert(*fmt, parse_num(cell));
                }
                Column::Bowl(None) => player.bowl_wkts_overall = parse_num(cell),
                Column::League => player.avg_vs_league = parse_num(cell),
                Column::Opponent => {
                    let opponent = &header[OPPONENT_PREFIX.len()..];
                    player.avg_vs.insert(opponent.to_string(), parse_num(cell));
                }
                Column::Ignored => {}
            }
        }

        // Short rows still carry every declared format column, as zero.
        for (column, _) in columns.iter().skip(record.len()) {
            match column {
                Column::Name => player.name = UNKNOWN.to_string(),
                Column::Team => player.team = UNKNOWN.to_string(),
                Column::Bat(Some(fmt)) => {
                    player.bat_avg.insert(*fmt, 0.0);
                }
                Column::Bowl(Some(fmt)) => {
                    player.bowl_wkts.insert(*fmt, 0.0);
                }
                _ => {}
            }
        }

        players.push(player);
    }

    Ok(players)
}

fn parse_text(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        UNKNOWN.to_string()
    } else {
        s.to_string()
    }
}

fn parse_num(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
