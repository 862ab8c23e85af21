//! Per-player fatigue: a 0-100 pool that only rises during play and bends
//! token weights down once it crosses the configured threshold.

use crate::config::BalanceConfig;
use crate::models::player::{SkillKind, TokenPlayer};

/// Time-proportional accrual for everyone on the pitch. High stamina slows
/// the climb; the rate doubles between stamina 100 and stamina 0.
pub fn accrue(player: &mut TokenPlayer, dt_secs: u32, balance: &BalanceConfig) {
    let stamina = player.skill(SkillKind::Stamina) as f32 / 100.0;
    let rate = balance.fatigue_per_sec * (2.0 - stamina);
    player.fatigue = (player.fatigue + rate * dt_secs as f32).clamp(0.0, 100.0);
}

/// Surcharge for the player who carried out the resolved action.
pub fn accrue_actor(player: &mut TokenPlayer, balance: &BalanceConfig) {
    player.fatigue = (player.fatigue + balance.actor_fatigue_bonus).clamp(0.0, 100.0);
}

/// Weight factor contributed by fatigue: 1.0 at or below the threshold,
/// falling linearly to `1.0 - fatigue_weight_penalty` at fatigue 100.
pub fn weight_factor(fatigue: f32, balance: &BalanceConfig) -> f32 {
    if fatigue <= balance.fatigue_threshold {
        return 1.0;
    }
    let span = (100.0 - balance.fatigue_threshold).max(f32::EPSILON);
    let over = (fatigue - balance.fatigue_threshold) / span;
    1.0 - balance.fatigue_weight_penalty * over.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{PlayerRecord, Role, SkillSet};
    use crate::models::team::TeamSide;

    fn player_with_stamina(stamina: u8) -> TokenPlayer {
        let mut skills = SkillSet::uniform(60);
        skills.stamina = stamina;
        TokenPlayer::from_record(
            &PlayerRecord { id: 1, name: "T".into(), role: Role::Midfielder, skills },
            TeamSide::Home,
        )
    }

    #[test]
    fn test_accrual_is_monotone_and_bounded() {
        let balance = BalanceConfig::default();
        let mut player = player_with_stamina(50);
        let mut last = player.fatigue;
        for _ in 0..100_000 {
            accrue(&mut player, 4, &balance);
            assert!(player.fatigue >= last);
            assert!(player.fatigue <= 100.0);
            last = player.fatigue;
        }
        assert_eq!(player.fatigue, 100.0);
    }

    #[test]
    fn test_low_stamina_tires_faster() {
        let balance = BalanceConfig::default();
        let mut sprinter = player_with_stamina(90);
        let mut plodder = player_with_stamina(20);
        for _ in 0..1000 {
            accrue(&mut sprinter, 4, &balance);
            accrue(&mut plodder, 4, &balance);
        }
        assert!(plodder.fatigue > sprinter.fatigue);
    }

    #[test]
    fn test_weight_factor_flat_below_threshold() {
        let balance = BalanceConfig::default();
        assert_eq!(weight_factor(0.0, &balance), 1.0);
        assert_eq!(weight_factor(balance.fatigue_threshold, &balance), 1.0);
    }

    #[test]
    fn test_weight_factor_degrades_above_threshold() {
        let balance = BalanceConfig::default();
        let mid = weight_factor(80.0, &balance);
        let full = weight_factor(100.0, &balance);
        assert!(mid < 1.0);
        assert!(full < mid);
        assert!((full - (1.0 - balance.fatigue_weight_penalty)).abs() < 1e-6);
    }

    #[test]
    fn test_actor_surcharge_applies() {
        let balance = BalanceConfig::default();
        let mut player = player_with_stamina(60);
        accrue_actor(&mut player, &balance);
        assert!((player.fatigue - balance.actor_fatigue_bonus).abs() < 1e-6);
    }
}
