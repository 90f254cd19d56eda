use tracing::info;

use crate::model::{MatchContext, MatchFormat, PitchCondition, SelectedSquad};
use crate::player_data::PlayerRecord;
use crate::player_score::{self, ScoreError, ScoreRequest};
use crate::reference::{self, KeeperList};
use crate::selector::select_squad;

#[derive(Debug, Clone)]
pub struct SquadRequest<'a> {
    pub team: &'a str,
    pub opponent: &'a str,
    pub pitch: PitchCondition,
    pub format: MatchFormat,
    pub context: MatchContext,
}

/// Score the team's pool and pick the best eleven. An empty pool yields an
/// empty squad tagged `NoDataForTeam`.
pub fn optimize_squad(players: &[PlayerRecord], req: &SquadRequest<'_>) -> SelectedSquad {
    optimize_squad_with(players, req, reference::keepers())
}

pub fn optimize_squad_with(
    players: &[PlayerRecord],
    req: &SquadRequest<'_>,
    keepers: &KeeperList,
) -> SelectedSquad {
    let score_req = ScoreRequest {
        opponent: req.opponent.to_string(),
        pitch: req.pitch,
        format: req.format,
        context: req.context,
    };
    match player_score::score_team_with(players, req.team, &score_req, keepers) {
        Ok(candidates) => select_squad(&candidates),
        Err(ScoreError::NoDataForTeam(team)) => {
            info!(team = %team, "no players for team");
            SelectedSquad::no_data()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, SelectionStatus};

    fn pool(team: &str) -> Vec<PlayerRecord> {
        let mut out = Vec::new();
        out.push(
            PlayerRecord::new("AJ Healy", team).with_format(MatchFormat::T20, 30.0, 0.0),
        );
        for i in 0..8 {
            out.push(
                PlayerRecord::new(&format!("{team} Bat {i}"), team)
                    .with_format(MatchFormat::T20, 20.0 + i as f64, 0.0),
            );
        }
        for i in 0..5 {
            out.push(
                PlayerRecord::new(&format!("{team} Bowl {i}"), team)
                    .with_format(MatchFormat::T20, 5.0, 10.0 + i as f64),
            );
        }
        out
    }

    fn req(team: &str) -> SquadRequest<'_> {
        SquadRequest {
            team,
            opponent: "England",
            pitch: PitchCondition::Flat,
            format: MatchFormat::T20,
            context: MatchContext::International,
        }
    }

    #[test]
    fn optimal_squad_meets_constraints() {
        let players = pool("Australia");
        let squad = optimize_squad_with(&players, &req("Australia"), &KeeperList::builtin());
        assert_eq!(squad.status, SelectionStatus::Optimal);
        assert_eq!(squad.players.len(), 11);
        assert!(squad.bowler_count() >= 3);
        assert!(squad.players.iter().any(|p| p.name == "AJ Healy" && p.is_keeper));
        assert!(squad.players.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn unknown_team_is_no_data() {
        let players = pool("Australia");
        let squad = optimize_squad_with(&players, &req("India"), &KeeperList::builtin());
        assert_eq!(squad.status, SelectionStatus::NoDataForTeam);
        assert!(squad.is_empty());
        assert_eq!(squad.strength(), 0.0);
    }

    #[test]
    fn dusty_pitch_lifts_bowlers() {
        let players = pool("Australia");
        let flat = optimize_squad_with(&players, &req("Australia"), &KeeperList::builtin());
        let dusty = optimize_squad_with(
            &players,
            &SquadRequest {
                pitch: PitchCondition::Dusty,
                ..req("Australia")
            },
            &KeeperList::builtin(),
        );
        let top_bowler = |s: &SelectedSquad| {
            s.players
                .iter()
                .filter(|p| p.role == Role::Bowler)
                .map(|p| p.score)
                .fold(0.0, f64::max)
        };
        assert!((top_bowler(&dusty) - top_bowler(&flat) * 1.3).abs() < 1e-9);
    }
}
