//! Bag construction: turns the current zone, play phase and possession
//! context into a weighted bag of candidate action tokens.
//!
//! The zone catalogue is a fixed table: it decides which token kinds are
//! even possible from a zone band in a given phase. Scaling then bends the
//! base weights by player skill, fatigue, defensive pressure and staff
//! bonuses. The bag is rebuilt from scratch for every resolution step and
//! is never empty: a safe recovery token is always appended last.

use super::token::{Bag, Token, TokenCategory, TokenKind};
use super::weight::WeightComposer;
use super::zone::Zone;
use crate::config::{SimConfig, StaffImpact};
use crate::engine::fatigue;
use crate::engine::phase::PlayPhase;
use crate::models::player::{Role, TokenPlayer};
use crate::models::team::{StaffMember, TeamSide};

/// Weight of the always-present fallback token. Unscaled: the guarantee
/// must hold no matter what the modifiers do to the rest of the bag.
pub const RECOVERY_WEIGHT: f32 = 2.0;

pub struct BagBuilder<'a> {
    config: &'a SimConfig,
}

impl<'a> BagBuilder<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config }
    }

    /// Build the bag for one resolution step. Reads player and staff state,
    /// mutates nothing.
    pub fn build(
        &self,
        zone: Zone,
        phase: PlayPhase,
        possession: TeamSide,
        squads: &[Vec<TokenPlayer>; 2],
        staff: &[Vec<StaffMember>; 2],
    ) -> Bag {
        let band = zone.attacking_band(possession);
        let attackers = &squads[possession.index()];
        let defenders = &squads[possession.opponent().index()];
        let pressure = self.defensive_pressure(defenders, band);

        let mut bag = Bag::new();

        for (kind, base) in offensive_template(band, zone.is_wide(), phase) {
            self.push_per_player(
                &mut bag,
                kind,
                base,
                possession,
                attackers,
                pressure,
                &staff[possession.index()],
            );
        }

        for (kind, base) in defensive_template(band, phase) {
            let defending = possession.opponent();
            self.push_best_defender(
                &mut bag,
                kind,
                base,
                defending,
                defenders,
                pressure,
                &staff[defending.index()],
            );
        }

        bag.push(Token {
            kind: TokenKind::Recovery,
            team: possession,
            player: None,
            weight: RECOVERY_WEIGHT,
        });
        bag
    }

    /// One token per role-eligible player: the draw selects the action and
    /// its actor at once, and better players earn more of the kind's weight.
    #[allow(clippy::too_many_arguments)]
    fn push_per_player(
        &self,
        bag: &mut Bag,
        kind: TokenKind,
        base: f32,
        team: TeamSide,
        players: &[TokenPlayer],
        pressure: f32,
        staff: &[StaffMember],
    ) {
        let eligible: Vec<&TokenPlayer> =
            players.iter().filter(|p| kind.role_affinity(p.role) > 0.0).collect();
        if eligible.is_empty() {
            log::debug!("no eligible player for {kind:?}, token dropped");
            return;
        }
        // Splitting the base keeps the kind-level weight independent of
        // squad composition.
        let per_player_base = base / eligible.len() as f32;
        for player in eligible {
            let mut composer = WeightComposer::new(
                per_player_base * kind.role_affinity(player.role),
            );
            composer
                .scale(skill_factor(player, kind))
                .scale(fatigue::weight_factor(player.fatigue, &self.config.balance))
                .scale(self.category_balance(kind.category()))
                .scale(self.pressure_factor(kind.category(), pressure));
            self.apply_staff(&mut composer, kind, staff);
            bag.push(Token {
                kind,
                team,
                player: Some(player.id),
                weight: composer.compose(),
            });
        }
    }

    /// Defensive kinds are carried by the single best-suited opponent (the
    /// keeper for keeper actions), keeping the bag size bounded.
    #[allow(clippy::too_many_arguments)]
    fn push_best_defender(
        &self,
        bag: &mut Bag,
        kind: TokenKind,
        base: f32,
        team: TeamSide,
        players: &[TokenPlayer],
        pressure: f32,
        staff: &[StaffMember],
    ) {
        let mut best: Option<(&TokenPlayer, f32)> = None;
        for player in players {
            let affinity = kind.role_affinity(player.role);
            if affinity <= 0.0 {
                continue;
            }
            let score = affinity * player.skill(kind.relevant_skill()) as f32;
            // Strict comparison keeps roster order as the tie-break.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((player, score));
            }
        }
        let Some((player, _)) = best else {
            log::debug!("no eligible defender for {kind:?}, token dropped");
            return;
        };
        let mut composer = WeightComposer::new(base * kind.role_affinity(player.role));
        composer
            .scale(skill_factor(player, kind))
            .scale(fatigue::weight_factor(player.fatigue, &self.config.balance))
            .scale(self.category_balance(kind.category()))
            .scale(self.pressure_factor(kind.category(), pressure));
        self.apply_staff(&mut composer, kind, staff);
        bag.push(Token { kind, team, player: Some(player.id), weight: composer.compose() });
    }

    fn apply_staff(
        &self,
        composer: &mut WeightComposer,
        kind: TokenKind,
        staff: &[StaffMember],
    ) {
        for member in staff {
            for impact in self.config.staff.for_specialty(member.specialty) {
                match impact {
                    StaffImpact::CategoryPercent { category, percent }
                        if *category == kind.category() =>
                    {
                        composer.scale(1.0 + percent / 100.0);
                    }
                    StaffImpact::KindPercent { kinds, percent }
                        if kinds.contains(&kind) =>
                    {
                        composer.scale(1.0 + percent / 100.0);
                    }
                    StaffImpact::KindDelta { kind: target, delta } if *target == kind => {
                        composer.add_flat(*delta);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Global offence/defence balance knob; neutral at 50.
    fn category_balance(&self, category: TokenCategory) -> f32 {
        let pct = self.config.balance.base_success_pct;
        match category {
            TokenCategory::Offensive => pct / 50.0,
            TokenCategory::Defensive => (100.0 - pct) / 50.0,
            TokenCategory::SetPiece => 1.0,
        }
    }

    /// Pressure suppresses offensive weights and inflates defensive ones.
    fn pressure_factor(&self, category: TokenCategory, pressure: f32) -> f32 {
        match category {
            TokenCategory::Offensive => 1.0 / pressure,
            TokenCategory::Defensive => pressure,
            TokenCategory::SetPiece => 1.0,
        }
    }

    /// Opposing-team pressure multiplier, 1.0 up to the configured cap.
    /// Rises with the defenders' quality and with how deep the attack has
    /// pushed (defences concentrate in front of their own goal).
    fn defensive_pressure(&self, defenders: &[TokenPlayer], attacking_band: u8) -> f32 {
        let outfield: Vec<&TokenPlayer> =
            defenders.iter().filter(|p| p.role != Role::Goalkeeper).collect();
        if outfield.is_empty() {
            return 1.0;
        }
        let avg_defending = outfield
            .iter()
            .map(|p| p.skills.defending as f32)
            .sum::<f32>()
            / outfield.len() as f32
            / 100.0;
        let depth = attacking_band as f32 / 5.0;
        let max = self.config.balance.max_pressure;
        (1.0 + avg_defending * (max - 1.0) * depth).clamp(1.0, max)
    }
}

/// Offensive token kinds a zone band offers, with base weights. Declaration
/// order here is the bag's insertion order and therefore the draw's
/// tie-break order.
fn offensive_template(band: u8, wide: bool, phase: PlayPhase) -> Vec<(TokenKind, f32)> {
    use TokenKind::*;
    match phase {
        PlayPhase::Open => {
            let mut template = vec![(PassShort, 26.0), (PassBack, 6.0)];
            match band {
                0 | 1 => {
                    template.push((PassLong, 14.0));
                    template.push((Dribble, 6.0));
                }
                2 | 3 => {
                    template.push((PassLong, 10.0));
                    template.push((Dribble, 10.0));
                    if wide {
                        template.push((Cross, 6.0));
                    }
                }
                4 => {
                    template.push((Dribble, 10.0));
                    if wide {
                        template.push((Cross, 10.0));
                    }
                    template.push((ShotGoal, 1.2));
                    template.push((ShotOnTarget, 4.0));
                    template.push((ShotOffTarget, 6.0));
                }
                _ => {
                    template.push((Dribble, 8.0));
                    if wide {
                        template.push((Cross, 8.0));
                    }
                    template.push((ShotGoal, 2.5));
                    template.push((ShotOnTarget, 6.0));
                    template.push((ShotOffTarget, 7.0));
                }
            }
            template
        }
        PlayPhase::Kickoff => vec![(KickoffPass, 10.0)],
        PlayPhase::ThrowIn => vec![(ThrowIn, 10.0)],
        PlayPhase::Corner => {
            vec![(CornerKick, 10.0), (ShotGoal, 1.0), (ShotOnTarget, 3.0)]
        }
        PlayPhase::GoalKick => vec![(GoalKick, 10.0)],
        PlayPhase::FreeKick => {
            let mut template = vec![(FreeKick, 8.0), (PassShort, 6.0)];
            if band >= 3 {
                template.push((Cross, 5.0));
            }
            template
        }
        PlayPhase::Penalty => vec![(PenaltyGoal, 7.5)],
    }
}

/// Defensive token kinds the opposing team contributes, by the attacker's
/// band. Keeper actions only appear where shots are possible.
fn defensive_template(band: u8, phase: PlayPhase) -> Vec<(TokenKind, f32)> {
    use TokenKind::*;
    match phase {
        PlayPhase::Open => {
            let mut template = vec![(Tackle, 10.0), (Intercept, 8.0), (Foul, 2.5)];
            if band >= 3 {
                template.push((Clearance, 6.0));
            }
            if band >= 4 {
                template.push((Block, 6.0));
                template.push((KeeperClaim, 4.0));
                template.push((KeeperSave, 3.0));
            }
            template
        }
        PlayPhase::Kickoff => Vec::new(),
        PlayPhase::ThrowIn => vec![(Intercept, 3.0)],
        PlayPhase::Corner => vec![(KeeperClaim, 6.0), (Clearance, 6.0)],
        PlayPhase::GoalKick => vec![(Intercept, 2.0)],
        PlayPhase::FreeKick => vec![(Intercept, 3.0)],
        PlayPhase::Penalty => vec![(PenaltySaved, 2.5)],
    }
}

fn skill_factor(player: &TokenPlayer, kind: TokenKind) -> f32 {
    0.6 + 0.8 * player.skill(kind.relevant_skill()) as f32 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{squad, staffed};
    use crate::engine::zone::{GRID_COLS, GRID_ROWS};
    use crate::models::team::StaffSpecialty;

    fn default_squads() -> [Vec<TokenPlayer>; 2] {
        [squad(TeamSide::Home, 0, 60), squad(TeamSide::Away, 100, 60)]
    }

    #[test]
    fn test_bag_never_empty_for_all_zones_and_possessions() {
        let config = SimConfig::default();
        let builder = BagBuilder::new(&config);
        let squads = default_squads();
        let staff = [Vec::new(), Vec::new()];
        for x in 0..GRID_COLS {
            for y in 0..GRID_ROWS {
                for possession in [TeamSide::Home, TeamSide::Away] {
                    let zone = Zone::new(x, y).unwrap();
                    let bag = builder.build(zone, PlayPhase::Open, possession, &squads, &staff);
                    assert!(!bag.is_empty(), "empty bag at ({x},{y}) for {possession:?}");
                    assert!(bag.total_weight() > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_bag_never_empty_in_every_phase() {
        let config = SimConfig::default();
        let builder = BagBuilder::new(&config);
        let squads = default_squads();
        let staff = [Vec::new(), Vec::new()];
        for phase in [
            PlayPhase::Open,
            PlayPhase::Kickoff,
            PlayPhase::ThrowIn,
            PlayPhase::Corner,
            PlayPhase::GoalKick,
            PlayPhase::FreeKick,
            PlayPhase::Penalty,
        ] {
            let bag =
                builder.build(Zone::CENTER, phase, TeamSide::Home, &squads, &staff);
            assert!(!bag.is_empty(), "empty bag in {phase:?}");
            assert!(bag.kind_weight(TokenKind::Recovery) > 0.0);
        }
    }

    #[test]
    fn test_shot_tokens_only_near_opposing_goal() {
        let config = SimConfig::default();
        let builder = BagBuilder::new(&config);
        let squads = default_squads();
        let staff = [Vec::new(), Vec::new()];
        for x in 0..GRID_COLS {
            let zone = Zone::new(x, 2).unwrap();
            let bag = builder.build(zone, PlayPhase::Open, TeamSide::Home, &squads, &staff);
            let has_shots = bag.kind_weight(TokenKind::ShotGoal) > 0.0;
            assert_eq!(has_shots, x >= 4, "shot availability wrong at column {x}");
        }
    }

    #[test]
    fn test_set_piece_tokens_gated_by_phase() {
        let config = SimConfig::default();
        let builder = BagBuilder::new(&config);
        let squads = default_squads();
        let staff = [Vec::new(), Vec::new()];

        let open = builder.build(Zone::CENTER, PlayPhase::Open, TeamSide::Home, &squads, &staff);
        assert_eq!(open.kind_weight(TokenKind::ThrowIn), 0.0);
        assert_eq!(open.kind_weight(TokenKind::CornerKick), 0.0);

        let throw_in =
            builder.build(Zone::CENTER, PlayPhase::ThrowIn, TeamSide::Home, &squads, &staff);
        assert!(throw_in.kind_weight(TokenKind::ThrowIn) > 0.0);
        assert_eq!(throw_in.kind_weight(TokenKind::PassShort), 0.0);
    }

    #[test]
    fn test_fatigue_degrades_token_weight() {
        let config = SimConfig::default();
        let builder = BagBuilder::new(&config);
        let staff = [Vec::new(), Vec::new()];

        let fresh = default_squads();
        let mut tired = default_squads();
        for player in tired[0].iter_mut() {
            player.fatigue = config.balance.fatigue_threshold + 30.0;
        }

        let zone = Zone::new(4, 2).unwrap();
        let bag_fresh = builder.build(zone, PlayPhase::Open, TeamSide::Home, &fresh, &staff);
        let bag_tired = builder.build(zone, PlayPhase::Open, TeamSide::Home, &tired, &staff);

        let fresh_w = bag_fresh.kind_weight(TokenKind::PassShort);
        let tired_w = bag_tired.kind_weight(TokenKind::PassShort);
        assert!(
            tired_w < fresh_w,
            "fatigued squad should weigh less: {tired_w} vs {fresh_w}"
        );
    }

    #[test]
    fn test_technical_staff_boosts_pass_and_dribble_weights() {
        let config = SimConfig::default();
        let builder = BagBuilder::new(&config);
        let squads = default_squads();

        let no_staff = [Vec::new(), Vec::new()];
        let with_staff = [staffed(StaffSpecialty::Technical), Vec::new()];

        let zone = Zone::new(2, 2).unwrap();
        let plain = builder.build(zone, PlayPhase::Open, TeamSide::Home, &squads, &no_staff);
        let boosted =
            builder.build(zone, PlayPhase::Open, TeamSide::Home, &squads, &with_staff);

        for kind in [TokenKind::PassShort, TokenKind::PassLong, TokenKind::Dribble] {
            let before = plain.kind_weight(kind);
            let after = boosted.kind_weight(kind);
            // Default technical bonus is +10% on pass/dribble kinds.
            assert!(
                (after / before - 1.10).abs() < 1e-3,
                "{kind:?}: {before} -> {after}"
            );
        }
        // Defensive tokens belong to the away side and must be untouched.
        assert!(
            (plain.kind_weight(TokenKind::Tackle)
                - boosted.kind_weight(TokenKind::Tackle))
            .abs()
                < 1e-6
        );
    }

    #[test]
    fn test_medical_staff_reduces_foul_weight() {
        let config = SimConfig::default();
        let builder = BagBuilder::new(&config);
        let squads = default_squads();

        let no_staff = [Vec::new(), Vec::new()];
        let with_staff = [Vec::new(), staffed(StaffSpecialty::Medical)];

        let plain =
            builder.build(Zone::CENTER, PlayPhase::Open, TeamSide::Home, &squads, &no_staff);
        let reduced =
            builder.build(Zone::CENTER, PlayPhase::Open, TeamSide::Home, &squads, &with_staff);

        let before = plain.kind_weight(TokenKind::Foul);
        let after = reduced.kind_weight(TokenKind::Foul);
        assert!((before - after - 1.0).abs() < 1e-3, "flat -1.0 expected: {before} -> {after}");
    }

    #[test]
    fn test_stronger_defence_suppresses_offence() {
        let config = SimConfig::default();
        let builder = BagBuilder::new(&config);
        let staff = [Vec::new(), Vec::new()];

        let weak_def = [squad(TeamSide::Home, 0, 60), squad(TeamSide::Away, 100, 30)];
        let strong_def = [squad(TeamSide::Home, 0, 60), squad(TeamSide::Away, 100, 90)];

        let zone = Zone::new(4, 2).unwrap();
        let vs_weak = builder.build(zone, PlayPhase::Open, TeamSide::Home, &weak_def, &staff);
        let vs_strong =
            builder.build(zone, PlayPhase::Open, TeamSide::Home, &strong_def, &staff);

        assert!(
            vs_strong.kind_weight(TokenKind::ShotGoal)
                < vs_weak.kind_weight(TokenKind::ShotGoal)
        );
    }
}
