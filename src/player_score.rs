use tracing::debug;

use crate::model::{MatchContext, MatchFormat, PitchCondition, Role, ScoredCandidate};
use crate::player_data::{PlayerRecord, team_pool};
use crate::reference::{self, KeeperList};

// Bowling figures above either threshold make a player a bowler.
const BOWLER_MIN_WKTS: f64 = 5.0;
const BOWLER_SHARE_OF_MAX: f64 = 0.2;
// A bowler who also bats above this is an all-rounder.
const ALL_ROUNDER_MIN_BAT: f64 = 15.0;
const ALL_ROUNDER_WEIGHT: f64 = 0.6;

const LEAGUE_CAREER_WEIGHT: f64 = 0.4;
const LEAGUE_FORM_WEIGHT: f64 = 0.6;

const GREEN_BOWLING_MULT: f64 = 1.25;
const DUSTY_BOWLING_MULT: f64 = 1.30;
const OPPONENT_MIN_AVG: f64 = 30.0;
const OPPONENT_MULT: f64 = 1.15;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("no data for team {0}")]
    NoDataForTeam(String),
}

/// Everything a scoring run depends on besides the players themselves.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    pub opponent: String,
    pub pitch: PitchCondition,
    pub format: MatchFormat,
    pub context: MatchContext,
}

/// Pool-wide maxima used for normalization. Never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolMaxima {
    pub bat: f64,
    pub bowl: f64,
}

/// Score with its intermediate factors, kept for explainability.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerScore {
    pub role: Role,
    pub bat_value: f64,
    pub bowl_value: f64,
    pub bat_score: f64,
    pub bowl_score: f64,
    pub base: f64,
    pub venue_mult: f64,
    pub opponent_mult: f64,
}

impl PlayerScore {
    pub fn total(&self) -> f64 {
        self.base * self.venue_mult * self.opponent_mult
    }
}

/// Score every player of `team` using the process-wide keeper list.
pub fn score_team(
    players: &[PlayerRecord],
    team: &str,
    req: &ScoreRequest,
) -> Result<Vec<ScoredCandidate>, ScoreError> {
    score_team_with(players, team, req, reference::keepers())
}

pub fn score_team_with(
    players: &[PlayerRecord],
    team: &str,
    req: &ScoreRequest,
    keepers: &KeeperList,
) -> Result<Vec<ScoredCandidate>, ScoreError> {
    let pool = team_pool(players, team);
    if pool.is_empty() {
        return Err(ScoreError::NoDataForTeam(team.to_string()));
    }
    let out = score_pool(&pool, req, keepers);
    debug!(team, candidates = out.len(), "scored team pool");
    Ok(out)
}

/// Score a pool in input order.
pub fn score_pool(
    pool: &[&PlayerRecord],
    req: &ScoreRequest,
    keepers: &KeeperList,
) -> Vec<ScoredCandidate> {
    let maxima = pool_maxima(pool, req);
    pool.iter()
        .map(|p| {
            let s = score_player(p, req, maxima);
            ScoredCandidate {
                name: p.name.clone(),
                score: s.total(),
                role: s.role,
                is_keeper: keepers.is_keeper(&p.name),
                display_bat: s.bat_value,
                display_bowl: s.bowl_value,
            }
        })
        .collect()
}

/// Maxima over the context-adjusted batting values and the raw bowling values.
pub fn pool_maxima(pool: &[&PlayerRecord], req: &ScoreRequest) -> PoolMaxima {
    let mut bat: f64 = 0.0;
    let mut bowl: f64 = 0.0;
    for p in pool {
        bat = bat.max(batting_value(p, req));
        bowl = bowl.max(bowling_value(p, req));
    }
    PoolMaxima {
        bat: if bat > 0.0 { bat } else { 1.0 },
        bowl: if bowl > 0.0 { bowl } else { 1.0 },
    }
}

pub fn score_player(p: &PlayerRecord, req: &ScoreRequest, maxima: PoolMaxima) -> PlayerScore {
    let bat_value = batting_value(p, req);
    let bowl_value = bowling_value(p, req);

    let bat_score = bat_value / maxima.bat * 100.0;
    let bowl_score = bowl_value / maxima.bowl * 100.0;

    let role = classify_role(bat_value, bowl_value, maxima.bowl);
    let base = match role {
        Role::AllRounder => ALL_ROUNDER_WEIGHT * bat_score + ALL_ROUNDER_WEIGHT * bowl_score,
        Role::Batter | Role::Bowler => bat_score.max(bowl_score),
    };

    let venue_mult = match (req.pitch, role.can_bowl()) {
        (PitchCondition::Green, true) => GREEN_BOWLING_MULT,
        (PitchCondition::Dusty, true) => DUSTY_BOWLING_MULT,
        _ => 1.0,
    };

    let opponent_mult = match p.avg_against(&req.opponent) {
        Some(avg) if avg > OPPONENT_MIN_AVG => OPPONENT_MULT,
        _ => 1.0,
    };

    PlayerScore {
        role,
        bat_value,
        bowl_value,
        bat_score,
        bowl_score,
        base,
        venue_mult,
        opponent_mult,
    }
}

pub fn classify_role(bat_value: f64, bowl_value: f64, max_bowl: f64) -> Role {
    let bowls = bowl_value > BOWLER_MIN_WKTS
        || (bowl_value > 0.0 && bowl_value > max_bowl * BOWLER_SHARE_OF_MAX);
    if !bowls {
        Role::Batter
    } else if bat_value > ALL_ROUNDER_MIN_BAT {
        Role::AllRounder
    } else {
        Role::Bowler
    }
}

fn batting_value(p: &PlayerRecord, req: &ScoreRequest) -> f64 {
    let career = p.batting(req.format).max(0.0);
    match req.context {
        MatchContext::International => career,
        MatchContext::DomesticLeague => {
            LEAGUE_CAREER_WEIGHT * career + LEAGUE_FORM_WEIGHT * p.avg_vs_league.max(0.0)
        }
    }
}

fn bowling_value(p: &PlayerRecord, req: &ScoreRequest) -> f64 {
    p.bowling(req.format).max(0.0)
}
