use std::collections::BTreeSet;

use crate::model::MatchContext;
use crate::player_data::PlayerRecord;
use crate::reference::is_international_team;

/// Sorted team names for a context: national sides for `International`,
/// everyone else for `DomesticLeague`.
pub fn filtered_teams(players: &[PlayerRecord], context: MatchContext) -> Vec<String> {
    let all: BTreeSet<&str> = players.iter().map(|p| p.team.as_str()).collect();
    all.into_iter()
        .filter(|t| match context {
            MatchContext::International => is_international_team(t),
            MatchContext::DomesticLeague => !is_international_team(t),
        })
        .map(str::to_string)
        .collect()
}

pub fn default_opponent<'a>(teams: &'a [String], my_team: &'a str) -> &'a str {
    teams
        .iter()
        .map(String::as_str)
        .find(|t| *t != my_team)
        .unwrap_or(my_team)
}
