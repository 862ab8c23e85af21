//! Static tuning tables. Loaded once, validated once, immutable afterwards.

pub mod staff;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
pub use staff::{StaffImpact, StaffImpactTable};

/// Match clock tuning, all in simulated seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub match_duration_secs: u32,
    /// Hard cap on accrued stoppage time.
    pub stoppage_secs: u32,
    /// Dead time after a goal before the restart.
    pub kickoff_delay_secs: u32,
    /// Dead time after a foul.
    pub foul_delay_secs: u32,
    /// Default cost of one resolution step when the token has no override.
    pub base_tick_secs: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            match_duration_secs: 5400,
            stoppage_secs: 300,
            kickoff_delay_secs: 30,
            foul_delay_secs: 15,
            base_tick_secs: 4,
        }
    }
}

/// Grid-step movement tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Columns a default forward action advances.
    pub step_x: u8,
    /// Rows a lateral drift perturbs.
    pub step_y: u8,
    /// Probability that a horizontal move also drifts vertically by ±step_y.
    pub drift_chance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { step_x: 1, step_y: 1, drift_chance: 0.3 }
    }
}

/// Balancing coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Global offence/defence knob: offensive weights scale by `pct/50`,
    /// defensive by `(100-pct)/50`, so 50 is neutral.
    pub base_success_pct: f32,
    /// Cap on the defensive-pressure multiplier.
    pub max_pressure: f32,
    /// Fatigue above this value starts degrading a player's token weights.
    pub fatigue_threshold: f32,
    /// Weight factor at fatigue 100 is `1.0 - fatigue_weight_penalty`.
    pub fatigue_weight_penalty: f32,
    /// Fatigue accrued per simulated second for an average-stamina player.
    pub fatigue_per_sec: f32,
    /// Extra fatigue for the player who carried out the resolved action.
    pub actor_fatigue_bonus: f32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            base_success_pct: 50.0,
            max_pressure: 1.6,
            fatigue_threshold: 60.0,
            fatigue_weight_penalty: 0.5,
            fatigue_per_sec: 0.008,
            actor_fatigue_bonus: 0.15,
        }
    }
}

/// The full immutable configuration bundle consumed by one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub balance: BalanceConfig,
    #[serde(default)]
    pub staff: StaffImpactTable,
}

impl SimConfig {
    /// Parse and validate a JSON config bundle. Any defect is fatal here;
    /// simulation never starts on an incomplete catalogue.
    pub fn load_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        if t.match_duration_secs == 0 {
            return Err(ConfigError::InvalidTiming("match_duration_secs is zero".into()));
        }
        if t.base_tick_secs == 0 {
            return Err(ConfigError::InvalidTiming("base_tick_secs is zero".into()));
        }
        if t.base_tick_secs > t.match_duration_secs {
            return Err(ConfigError::InvalidTiming(
                "base_tick_secs exceeds match duration".into(),
            ));
        }

        let p = &self.physics;
        if p.step_x == 0 {
            return Err(ConfigError::InvalidPhysics("step_x is zero".into()));
        }
        if !(0.0..=1.0).contains(&p.drift_chance) {
            return Err(ConfigError::InvalidPhysics(format!(
                "drift_chance {} outside [0, 1]",
                p.drift_chance
            )));
        }

        let b = &self.balance;
        if !(0.0..=100.0).contains(&b.base_success_pct) {
            return Err(ConfigError::InvalidBalance(format!(
                "base_success_pct {} outside [0, 100]",
                b.base_success_pct
            )));
        }
        if b.max_pressure < 1.0 {
            return Err(ConfigError::InvalidBalance(format!(
                "max_pressure {} below 1.0",
                b.max_pressure
            )));
        }
        if !(0.0..=100.0).contains(&b.fatigue_threshold) {
            return Err(ConfigError::InvalidBalance(format!(
                "fatigue_threshold {} outside [0, 100]",
                b.fatigue_threshold
            )));
        }
        if !(0.0..1.0).contains(&b.fatigue_weight_penalty) {
            return Err(ConfigError::InvalidBalance(format!(
                "fatigue_weight_penalty {} outside [0, 1)",
                b.fatigue_weight_penalty
            )));
        }
        if b.fatigue_per_sec < 0.0 || b.actor_fatigue_bonus < 0.0 {
            return Err(ConfigError::InvalidBalance("negative fatigue rate".into()));
        }

        self.staff.validate()
    }
}

/// Process-wide default bundle.
pub static DEFAULT_CONFIG: Lazy<SimConfig> = Lazy::new(SimConfig::default);
