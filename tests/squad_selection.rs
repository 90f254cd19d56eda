use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use squadmind::model::{Role, ScoredCandidate, SelectionStatus};
use squadmind::selector::{ExactSelector, GreedySelector, SquadConstraints, SquadSelector, select_squad};

fn random_pool(rng: &mut StdRng, size: usize, bowlers: usize, keepers: usize) -> Vec<ScoredCandidate> {
    (0..size)
        .map(|i| {
            let role = if i < bowlers {
                Role::Bowler
            } else if rng.gen_bool(0.5) {
                Role::Batter
            } else {
                Role::AllRounder
            };
            ScoredCandidate {
                name: format!("P{i}"),
                score: rng.gen_range(0.0..130.0),
                role,
                is_keeper: i >= size - keepers,
                display_bat: 0.0,
                display_bowl: 0.0,
            }
        })
        .collect()
}

#[test]
fn feasible_pools_are_optimal_and_satisfy_constraints() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let size = rng.gen_range(11..40);
        let bowlers = rng.gen_range(3..=size.min(10));
        let keepers = rng.gen_range(1..=2);
        let pool = random_pool(&mut rng, size, bowlers, keepers);

        let squad = select_squad(&pool);
        assert_eq!(squad.status, SelectionStatus::Optimal);
        assert_eq!(squad.players.len(), 11);
        assert!(squad.bowler_count() >= 3);
        assert!(squad.keeper_count() >= 1);
        assert!(squad.players.windows(2).all(|w| w[0].score >= w[1].score));

        // Never better than the unconstrained top eleven.
        let greedy: f64 = GreedySelector::top_n(&pool, 11).iter().map(|&i| pool[i].score).sum();
        assert!(squad.strength() <= greedy + 1e-9);
    }
}

#[test]
fn small_pools_fall_back_with_everyone() {
    let mut rng = StdRng::seed_from_u64(12);
    for size in 1..11 {
        let pool = random_pool(&mut rng, size, size.min(3), 1);
        let squad = select_squad(&pool);
        assert_eq!(squad.status, SelectionStatus::Fallback);
        assert_eq!(squad.players.len(), size);
    }
}

#[test]
fn pools_without_keepers_never_report_optimal() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..50 {
        let size = rng.gen_range(11..30);
        let pool = random_pool(&mut rng, size, 5, 0);
        let squad = select_squad(&pool);
        assert_eq!(squad.status, SelectionStatus::Fallback);
        assert_eq!(squad.players.len(), 11);
    }
}

#[test]
fn too_few_bowlers_falls_back_to_top_eleven() {
    let mut rng = StdRng::seed_from_u64(14);
    let pool = random_pool(&mut rng, 20, 2, 1);
    assert_eq!(pool.iter().filter(|p| p.role == Role::Bowler).count(), 2);
    let squad = select_squad(&pool);
    assert_eq!(squad.status, SelectionStatus::Fallback);

    let expected: f64 = GreedySelector::top_n(&pool, 11).iter().map(|&i| pool[i].score).sum();
    assert!((squad.strength() - expected).abs() < 1e-9);
}

#[test]
fn strength_is_the_sum_of_selected_scores() {
    let mut rng = StdRng::seed_from_u64(15);
    let mut pool = random_pool(&mut rng, 18, 4, 1);
    for p in pool.iter_mut().take(6) {
        p.score = 77.0;
    }
    let picked = ExactSelector::default()
        .select(&pool, &SquadConstraints::default())
        .expect("feasible");
    let squad = select_squad(&pool);
    let direct: f64 = picked.iter().map(|&i| pool[i].score).sum();
    let listed: f64 = squad.players.iter().map(|p| p.score).sum();
    assert!((squad.strength() - listed).abs() < 1e-9);
    assert!((direct - listed).abs() < 1e-6);
}
