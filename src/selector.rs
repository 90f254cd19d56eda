use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::model::{Role, ScoredCandidate, SelectedSquad, SelectionStatus};

pub const SQUAD_SIZE: usize = 11;
pub const MIN_BOWLERS: usize = 3;
pub const MIN_KEEPERS: usize = 1;

// Above this the exact table gets large enough that we would rather fall back.
const DEFAULT_MAX_EXACT_POOL: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquadConstraints {
    pub squad_size: usize,
    pub min_bowlers: usize,
    pub min_keepers: usize,
}

impl Default for SquadConstraints {
    fn default() -> Self {
        Self {
            squad_size: SQUAD_SIZE,
            min_bowlers: MIN_BOWLERS,
            min_keepers: MIN_KEEPERS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectError {
    #[error("constraints infeasible: {0}")]
    Infeasible(String),

    #[error("exact solver unavailable for a pool of {pool} (limit {limit})")]
    SolverUnavailable { pool: usize, limit: usize },

    #[error("candidate {0} has a negative or non-finite score")]
    InvalidScore(String),
}

/// A squad selection strategy. Returns indices into `candidates`.
pub trait SquadSelector {
    fn name(&self) -> &'static str;

    fn select(
        &self,
        candidates: &[ScoredCandidate],
        constraints: &SquadConstraints,
    ) -> Result<Vec<usize>, SelectError>;
}

/// Exact 0/1 selection by dynamic programming over
/// (players chosen, bowlers chosen capped at the minimum, keepers chosen
/// capped at the minimum). Every feasible subset maps onto one of these
/// states, so the best value at the target state is the true optimum.
#[derive(Debug, Clone, Copy)]
pub struct ExactSelector {
    pub max_pool: usize,
}

impl Default for ExactSelector {
    fn default() -> Self {
        Self {
            max_pool: DEFAULT_MAX_EXACT_POOL,
        }
    }
}

impl SquadSelector for ExactSelector {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn select(
        &self,
        candidates: &[ScoredCandidate],
        constraints: &SquadConstraints,
    ) -> Result<Vec<usize>, SelectError> {
        let n = candidates.len();
        if n > self.max_pool {
            return Err(SelectError::SolverUnavailable {
                pool: n,
                limit: self.max_pool,
            });
        }
        if let Some(bad) = candidates
            .iter()
            .find(|c| !c.score.is_finite() || c.score < 0.0)
        {
            return Err(SelectError::InvalidScore(bad.name.clone()));
        }
        check_counts(candidates, constraints)?;

        let k_max = constraints.squad_size;
        let b_max = constraints.min_bowlers;
        let w_max = constraints.min_keepers;
        let table = StateTable::new(k_max, b_max, w_max);

        let mut best = vec![f64::NEG_INFINITY; table.len()];
        best[table.index(0, 0, 0)] = 0.0;
        // from[i][s] = Some(prev) when state `s` after candidate `i` was
        // reached by taking `i` from state `prev`.
        let mut from: Vec<Vec<Option<usize>>> = Vec::with_capacity(n);

        for c in candidates {
            let db = usize::from(c.role == Role::Bowler);
            let dw = usize::from(c.is_keeper);
            let mut next = best.clone();
            let mut came_from = vec![None; table.len()];

            for k in 0..k_max {
                for b in 0..=b_max {
                    for w in 0..=w_max {
                        let src = table.index(k, b, w);
                        let cur = best[src];
                        if cur == f64::NEG_INFINITY {
                            continue;
                        }
                        let dst = table.index(k + 1, (b + db).min(b_max), (w + dw).min(w_max));
                        let value = cur + c.score;
                        if value > next[dst] {
                            next[dst] = value;
                            came_from[dst] = Some(src);
                        }
                    }
                }
            }

            best = next;
            from.push(came_from);
        }

        let mut state = table.index(k_max, b_max, w_max);
        if best[state] == f64::NEG_INFINITY {
            return Err(SelectError::Infeasible(
                "no subset satisfies every constraint".to_string(),
            ));
        }

        let mut picked = Vec::with_capacity(k_max);
        for i in (0..n).rev() {
            if let Some(prev) = from[i][state] {
                picked.push(i);
                state = prev;
            }
        }
        picked.reverse();
        Ok(picked)
    }
}

/// Top-N by score, ignoring role and keeper constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySelector;

impl GreedySelector {
    pub fn top_n(candidates: &[ScoredCandidate], n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| by_score_desc(&candidates[a], &candidates[b]));
        order.truncate(n);
        order
    }
}

impl SquadSelector for GreedySelector {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select(
        &self,
        candidates: &[ScoredCandidate],
        constraints: &SquadConstraints,
    ) -> Result<Vec<usize>, SelectError> {
        Ok(Self::top_n(candidates, constraints.squad_size))
    }
}

/// Exact selection under the default constraints, greedy on any solver error.
pub fn select_squad(candidates: &[ScoredCandidate]) -> SelectedSquad {
    select_squad_with(
        &ExactSelector::default(),
        candidates,
        &SquadConstraints::default(),
    )
}

pub fn select_squad_with(
    primary: &dyn SquadSelector,
    candidates: &[ScoredCandidate],
    constraints: &SquadConstraints,
) -> SelectedSquad {
    if candidates.is_empty() {
        return SelectedSquad::no_data();
    }

    let (picked, status) = match primary.select(candidates, constraints) {
        Ok(picked) => (picked, SelectionStatus::Optimal),
        Err(err) => {
            warn!(
                solver = primary.name(),
                pool = candidates.len(),
                "squad solver failed, using greedy fallback: {err}"
            );
            (
                GreedySelector::top_n(candidates, constraints.squad_size),
                SelectionStatus::Fallback,
            )
        }
    };

    let mut players: Vec<ScoredCandidate> =
        picked.into_iter().map(|i| candidates[i].clone()).collect();
    players.sort_by(by_score_desc);

    let squad = SelectedSquad { players, status };
    debug!(
        solver = primary.name(),
        status = ?squad.status,
        strength = squad.strength(),
        "squad selected"
    );
    squad
}

fn check_counts(
    candidates: &[ScoredCandidate],
    constraints: &SquadConstraints,
) -> Result<(), SelectError> {
    let n = candidates.len();
    if n < constraints.squad_size {
        return Err(SelectError::Infeasible(format!(
            "pool of {n} is smaller than squad size {}",
            constraints.squad_size
        )));
    }
    let bowlers = candidates.iter().filter(|c| c.role == Role::Bowler).count();
    if bowlers < constraints.min_bowlers {
        return Err(SelectError::Infeasible(format!(
            "{bowlers} bowlers available, {} required",
            constraints.min_bowlers
        )));
    }
    let keepers = candidates.iter().filter(|c| c.is_keeper).count();
    if keepers < constraints.min_keepers {
        return Err(SelectError::Infeasible(format!(
            "{keepers} keepers available, {} required",
            constraints.min_keepers
        )));
    }
    Ok(())
}

fn by_score_desc(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score.total_cmp(&a.score)
}

#[derive(Debug, Clone, Copy)]
struct StateTable {
    b_dim: usize,
    w_dim: usize,
    len: usize,
}

impl StateTable {
    fn new(k_max: usize, b_max: usize, w_max: usize) -> Self {
        let b_dim = b_max + 1;
        let w_dim = w_max + 1;
        Self {
            b_dim,
            w_dim,
            len: (k_max + 1) * b_dim * w_dim,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn index(&self, k: usize, b: usize, w: usize) -> usize {
        (k * self.b_dim + b) * self.w_dim + w
    }
}
