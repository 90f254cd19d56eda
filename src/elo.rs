#[derive(Debug, Clone, Copy)]
pub struct EloConfig {
    // Rating gap that turns into 10:1 odds.
    pub scale: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self { scale: 400.0 }
    }
}

/// Probability that a side rated `r_a` beats a side rated `r_b`.
pub fn expected_score(r_a: f64, r_b: f64, cfg: EloConfig) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((r_b - r_a) / cfg.scale))
}

/// `expected_score` as a percentage.
pub fn win_probability_pct(strength_a: f64, strength_b: f64, cfg: EloConfig) -> f64 {
    expected_score(strength_a, strength_b, cfg) * 100.0
}
