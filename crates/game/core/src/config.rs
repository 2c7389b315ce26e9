/// Simulation constants and per-run tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Base seed for every random roll of a run.
    pub seed: u64,
    /// Hard cap on turns, applied on top of the puzzle's own `max_turns`.
    pub turn_cap: Option<u32>,
}

impl SimulationConfig {
    // ===== compile-time constants =====
    /// Directions an attack can fire in at once.
    pub const MAX_ATTACK_DIRECTIONS: usize = 8;
    /// Bonus movement sub-steps granted by haste.
    pub const HASTE_BONUS_STEPS: u32 = 1;
    /// Iteration guard for `repeat` chains in a single program step.
    pub const MAX_REPEAT_HOPS: usize = 4;

    /// Expiry passes a render particle survives, counting the turn it appeared in.
    pub const PARTICLE_TTL: u32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x7AC7_1C5;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            turn_cap: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = Some(turn_cap);
        self
    }

    /// Effective turn limit for a puzzle declaring `max_turns`.
    pub fn effective_max_turns(&self, max_turns: u32) -> u32 {
        match self.turn_cap {
            Some(cap) => cap.min(max_turns),
            None => max_turns,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_cap_only_tightens() {
        let config = SimulationConfig::new().with_turn_cap(10);
        assert_eq!(config.effective_max_turns(30), 10);
        assert_eq!(config.effective_max_turns(5), 5);
        assert_eq!(SimulationConfig::default().effective_max_turns(7), 7);
    }
}
