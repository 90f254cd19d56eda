use tracing::{debug, info};

use crate::elo::{self, EloConfig};
use crate::model::{MatchContext, MatchFormat, MatchPrediction, PitchCondition, SelectedSquad};
use crate::optimizer::{SquadRequest, optimize_squad_with};
use crate::player_data::PlayerRecord;
use crate::reference::{self, KeeperList};

// Head-to-head projections assume no venue.
const NEUTRAL_PITCH: PitchCondition = PitchCondition::Flat;

/// Project a match between `team_a` and `team_b`. `None` when either side
/// cannot field a squad with positive strength.
pub fn predict_match(
    team_a: &str,
    team_b: &str,
    players: &[PlayerRecord],
    format: MatchFormat,
    context: MatchContext,
) -> Option<MatchPrediction> {
    predict_match_with(
        team_a,
        team_b,
        players,
        format,
        context,
        reference::keepers(),
        EloConfig::default(),
    )
}

pub fn predict_match_with(
    team_a: &str,
    team_b: &str,
    players: &[PlayerRecord],
    format: MatchFormat,
    context: MatchContext,
    keepers: &KeeperList,
    cfg: EloConfig,
) -> Option<MatchPrediction> {
    let squad_a = team_squad(team_a, team_b, players, format, context, keepers);
    let squad_b = team_squad(team_b, team_a, players, format, context, keepers);

    let strength_a = squad_a.strength();
    let strength_b = squad_b.strength();
    if strength_a == 0.0 || strength_b == 0.0 {
        info!(team_a, team_b, strength_a, strength_b, "prediction undefined");
        return None;
    }

    let prob_a = elo::win_probability_pct(strength_a, strength_b, cfg);
    debug!(team_a, team_b, strength_a, strength_b, prob_a, "match projected");

    Some(MatchPrediction {
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        strength_a,
        strength_b,
        prob_a,
        squad_a,
        squad_b,
    })
}

fn team_squad(
    team: &str,
    opponent: &str,
    players: &[PlayerRecord],
    format: MatchFormat,
    context: MatchContext,
    keepers: &KeeperList,
) -> SelectedSquad {
    let req = SquadRequest {
        team,
        opponent,
        pitch: NEUTRAL_PITCH,
        format,
        context,
    };
    optimize_squad_with(players, &req, keepers)
}
