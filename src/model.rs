use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchFormat {
    T20,
    Odi,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchContext {
    International,
    DomesticLeague,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PitchCondition {
    Flat,
    Green,
    Dusty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Batter,
    Bowler,
    AllRounder,
}

impl Role {
    pub fn can_bowl(self) -> bool {
        matches!(self, Role::Bowler | Role::AllRounder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionStatus {
    Optimal,
    Fallback,
    NoDataForTeam,
}

/// One scored player for a single optimizer run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub name: String,
    pub score: f64,
    pub role: Role,
    pub is_keeper: bool,
    // Raw stats after context blending, for display only.
    pub display_bat: f64,
    pub display_bowl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedSquad {
    /// Sorted by score, highest first.
    pub players: Vec<ScoredCandidate>,
    pub status: SelectionStatus,
}

impl SelectedSquad {
    pub fn no_data() -> Self {
        Self {
            players: Vec::new(),
            status: SelectionStatus::NoDataForTeam,
        }
    }

    pub fn strength(&self) -> f64 {
        self.players.iter().map(|p| p.score).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn bowler_count(&self) -> usize {
        self.players.iter().filter(|p| p.role == Role::Bowler).count()
    }

    pub fn keeper_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_keeper).count()
    }

    pub fn top_batters(&self, n: usize) -> impl Iterator<Item = &ScoredCandidate> {
        self.players.iter().take(n)
    }

    pub fn top_bowlers(&self, n: usize) -> impl Iterator<Item = &ScoredCandidate> {
        self.players.iter().filter(|p| p.role.can_bowl()).take(n)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchPrediction {
    pub team_a: String,
    pub team_b: String,
    pub strength_a: f64,
    pub strength_b: f64,
    // Percent, 0..=100.
    pub prob_a: f64,
    pub squad_a: SelectedSquad,
    pub squad_b: SelectedSquad,
}

impl MatchPrediction {
    pub fn prob_b(&self) -> f64 {
        100.0 - self.prob_a
    }

    /// The favoured side and its win percentage. Ties go to team B.
    pub fn favourite(&self) -> (&str, f64) {
        if self.prob_a > 50.0 {
            (&self.team_a, self.prob_a)
        } else {
            (&self.team_b, self.prob_b())
        }
    }
}

pub fn format_label(format: MatchFormat) -> &'static str {
    match format {
        MatchFormat::T20 => "T20",
        MatchFormat::Odi => "ODI",
        MatchFormat::Test => "Test",
    }
}

pub fn context_label(context: MatchContext) -> &'static str {
    match context {
        MatchContext::International => "International",
        MatchContext::DomesticLeague => "Domestic League",
    }
}

pub fn pitch_label(pitch: PitchCondition) -> &'static str {
    match pitch {
        PitchCondition::Flat => "Flat",
        PitchCondition::Green => "Green",
        PitchCondition::Dusty => "Dusty",
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Batter => "Batter",
        Role::Bowler => "Bowler",
        Role::AllRounder => "All-Rounder",
    }
}

pub fn status_label(status: SelectionStatus) -> &'static str {
    match status {
        SelectionStatus::Optimal => "Optimal",
        SelectionStatus::Fallback => "Suboptimal (Fallback)",
        SelectionStatus::NoDataForTeam => "No Data for Team",
    }
}

/// Unknown formats fall back to T20.
pub fn parse_format(raw: &str) -> MatchFormat {
    match raw.trim().to_ascii_lowercase().as_str() {
        "odi" => MatchFormat::Odi,
        "test" => MatchFormat::Test,
        _ => MatchFormat::T20,
    }
}

pub fn parse_context(raw: &str) -> MatchContext {
    match raw.trim().to_ascii_lowercase().as_str() {
        "domestic league" | "domestic_league" | "domestic" | "league" => {
            MatchContext::DomesticLeague
        }
        _ => MatchContext::International,
    }
}

/// Unknown pitch descriptions are treated as `Flat`.
pub fn parse_pitch(raw: &str) -> PitchCondition {
    match raw.trim().to_ascii_lowercase().as_str() {
        "green" => PitchCondition::Green,
        "dusty" => PitchCondition::Dusty,
        _ => PitchCondition::Flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(name: &str, score: f64, role: Role, is_keeper: bool) -> ScoredCandidate {
        ScoredCandidate {
            name: name.to_string(),
            score,
            role,
            is_keeper,
            display_bat: 0.0,
            display_bowl: 0.0,
        }
    }

    #[test]
    fn parse_format_defaults_to_t20() {
        assert_eq!(parse_format("odi"), MatchFormat::Odi);
        assert_eq!(parse_format(" Test "), MatchFormat::Test);
        assert_eq!(parse_format("T10"), MatchFormat::T20);
    }

    #[test]
    fn parse_context_accepts_short_forms() {
        assert_eq!(parse_context("Domestic League"), MatchContext::DomesticLeague);
        assert_eq!(parse_context("league"), MatchContext::DomesticLeague);
        assert_eq!(parse_context("International"), MatchContext::International);
    }

    #[test]
    fn status_labels_match_display_text() {
        assert_eq!(status_label(SelectionStatus::Fallback), "Suboptimal (Fallback)");
        assert_eq!(status_label(SelectionStatus::NoDataForTeam), "No Data for Team");
    }

    #[test]
    fn top_bowlers_skip_batters() {
        let squad = SelectedSquad {
            players: vec![
                cand("A", 90.0, Role::Batter, false),
                cand("B", 80.0, Role::AllRounder, true),
                cand("C", 70.0, Role::Bowler, false),
            ],
            status: SelectionStatus::Optimal,
        };
        let names: Vec<&str> = squad.top_bowlers(5).map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
        assert!((squad.strength() - 240.0).abs() < 1e-9);
        assert_eq!(squad.bowler_count(), 1);
        assert_eq!(squad.keeper_count(), 1);
    }

    #[test]
    fn favourite_picks_side_above_fifty() {
        let p = MatchPrediction {
            team_a: "A".into(),
            team_b: "B".into(),
            strength_a: 500.0,
            strength_b: 600.0,
            prob_a: 36.0,
            squad_a: SelectedSquad::no_data(),
            squad_b: SelectedSquad::no_data(),
        };
        let (name, pct) = p.favourite();
        assert_eq!(name, "B");
        assert!((pct - 64.0).abs() < 1e-9);
    }
}
