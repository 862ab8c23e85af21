//! Token resolution: the weighted draw and the per-kind effect rules.

use rand::Rng;

use super::effect::{ActionEffect, RestartAward, RestartKind, TokenOutcome};
use super::token::{Bag, Token, TokenKind};
use super::zone::Zone;
use crate::config::SimConfig;
use crate::models::match_result::StatKey;

/// Time costs that override the default tick, in simulated seconds.
mod costs {
    pub const LONG_BALL: u32 = 7;
    pub const CROSS: u32 = 6;
    pub const CLEARANCE: u32 = 5;
    pub const SHOT: u32 = 6;
    pub const KEEPER: u32 = 8;
    pub const SET_PIECE: u32 = 10;
}

/// Cumulative-weight sampling: draw `r` uniformly in `[0, total)`, walk the
/// bag accumulating weight, first token whose running sum exceeds `r` wins.
/// Ties break by insertion order. One pass, no allocation.
pub fn draw<'a, R: Rng>(bag: &'a Bag, rng: &mut R) -> Option<&'a Token> {
    if bag.is_empty() {
        return None;
    }
    let total = bag.total_weight();
    if total <= 0.0 {
        return None;
    }
    let r = rng.gen_range(0.0..total);
    let mut acc = 0.0f32;
    for token in bag.tokens() {
        acc += token.weight;
        if r < acc {
            return Some(token);
        }
    }
    // Float rounding can leave r a hair under the recomputed total.
    bag.tokens().last()
}

/// Draw one token and produce its effect. `zone` is the ball position the
/// bag was built for; `None` only when the bag is empty or weightless,
/// which the loop treats as an invariant violation.
pub fn resolve<R: Rng>(
    bag: &Bag,
    zone: Zone,
    rng: &mut R,
    config: &SimConfig,
) -> Option<(Token, TokenOutcome)> {
    let token = draw(bag, rng)?.clone();
    let outcome = outcome_for(&token, zone, rng, config);
    Some((token, outcome))
}

/// The neutral possession-retaining action substituted when an empty bag
/// reaches the resolver in a release build.
pub fn fallback_outcome() -> TokenOutcome {
    TokenOutcome {
        effect: ActionEffect::StatOnly,
        time_cost: None,
        stats: Vec::new(),
        narrative: "play.recovery",
    }
}

/// Lateral drift: a horizontal move perturbs the row by ±step_y with the
/// configured probability, bounded to the grid by the caller's clamping.
fn drift<R: Rng>(rng: &mut R, config: &SimConfig) -> i8 {
    if rng.gen::<f32>() < config.physics.drift_chance {
        if rng.gen::<bool>() {
            config.physics.step_y as i8
        } else {
            -(config.physics.step_y as i8)
        }
    } else {
        0
    }
}

fn outcome_for<R: Rng>(
    token: &Token,
    zone: Zone,
    rng: &mut R,
    config: &SimConfig,
) -> TokenOutcome {
    use TokenKind::*;
    let step = config.physics.step_x as i8;
    match token.kind {
        PassShort => TokenOutcome {
            effect: ActionEffect::Move { dx: step, dy: drift(rng, config) },
            time_cost: None,
            stats: vec![(StatKey::PassAttempted, 1), (StatKey::PassCompleted, 1)],
            narrative: "pass.short",
        },
        PassLong => TokenOutcome {
            effect: ActionEffect::Move { dx: 2 * step, dy: drift(rng, config) },
            time_cost: Some(costs::LONG_BALL),
            stats: vec![(StatKey::PassAttempted, 1), (StatKey::PassCompleted, 1)],
            narrative: "pass.long",
        },
        PassBack => TokenOutcome {
            effect: ActionEffect::Move { dx: -step, dy: drift(rng, config) },
            time_cost: None,
            stats: vec![(StatKey::PassAttempted, 1), (StatKey::PassCompleted, 1)],
            narrative: "pass.back",
        },
        Cross => TokenOutcome {
            effect: ActionEffect::Reposition { zone: Zone::attacking_box(token.team) },
            time_cost: Some(costs::CROSS),
            stats: vec![(StatKey::Cross, 1)],
            narrative: "cross.delivery",
        },
        Dribble => TokenOutcome {
            effect: ActionEffect::Move { dx: step, dy: drift(rng, config) },
            time_cost: None,
            stats: vec![(StatKey::Dribble, 1)],
            narrative: "dribble.advance",
        },
        ShotGoal => TokenOutcome {
            effect: ActionEffect::Goal,
            time_cost: Some(costs::SHOT),
            stats: vec![
                (StatKey::Shot, 1),
                (StatKey::ShotOnTarget, 1),
                (StatKey::Goal, 1),
            ],
            narrative: "shot.goal",
        },
        ShotOnTarget => TokenOutcome {
            effect: ActionEffect::Turnover {
                zone: Some(Zone::keeper_spot(token.team.opponent())),
            },
            time_cost: Some(costs::SHOT),
            stats: vec![(StatKey::Shot, 1), (StatKey::ShotOnTarget, 1)],
            narrative: "shot.on_target",
        },
        ShotOffTarget => TokenOutcome {
            effect: ActionEffect::OutOfPlay {
                restart: RestartKind::GoalKick,
                award: RestartAward::Opponent,
            },
            time_cost: Some(costs::SHOT),
            stats: vec![(StatKey::Shot, 1)],
            narrative: "shot.off_target",
        },
        PenaltyGoal => TokenOutcome {
            effect: ActionEffect::Goal,
            time_cost: Some(costs::SHOT),
            stats: vec![
                (StatKey::Shot, 1),
                (StatKey::ShotOnTarget, 1),
                (StatKey::Goal, 1),
            ],
            narrative: "penalty.goal",
        },
        PenaltySaved => TokenOutcome {
            effect: ActionEffect::Turnover { zone: Some(Zone::keeper_spot(token.team)) },
            time_cost: Some(costs::KEEPER),
            stats: vec![(StatKey::Save, 1)],
            narrative: "penalty.saved",
        },
        Tackle => TokenOutcome {
            effect: ActionEffect::Turnover { zone: None },
            time_cost: None,
            stats: vec![(StatKey::Tackle, 1)],
            narrative: "duel.tackle",
        },
        Intercept => TokenOutcome {
            effect: ActionEffect::Turnover { zone: None },
            time_cost: None,
            stats: vec![(StatKey::Interception, 1)],
            narrative: "duel.intercept",
        },
        Block => TokenOutcome {
            // Deflected behind: corner stays with the attacking side.
            effect: ActionEffect::OutOfPlay {
                restart: RestartKind::Corner,
                award: RestartAward::Possession,
            },
            time_cost: None,
            stats: vec![(StatKey::Block, 1)],
            narrative: "shot.blocked",
        },
        Clearance => {
            // A hurried clearance from a wide zone often goes over the
            // touchline; the attacking side throws in.
            let out_wide = zone.is_wide() && rng.gen::<f32>() < 0.4;
            let effect = if out_wide {
                ActionEffect::OutOfPlay {
                    restart: RestartKind::ThrowIn,
                    award: RestartAward::Possession,
                }
            } else {
                ActionEffect::Turnover { zone: Some(Zone::own_midfield(token.team)) }
            };
            TokenOutcome {
                effect,
                time_cost: Some(costs::CLEARANCE),
                stats: vec![(StatKey::Clearance, 1)],
                narrative: "defence.clearance",
            }
        }
        KeeperClaim => TokenOutcome {
            effect: ActionEffect::Turnover { zone: Some(Zone::keeper_spot(token.team)) },
            time_cost: Some(costs::KEEPER),
            stats: Vec::new(),
            narrative: "keeper.claim",
        },
        KeeperSave => TokenOutcome {
            effect: ActionEffect::Turnover { zone: Some(Zone::keeper_spot(token.team)) },
            time_cost: Some(costs::KEEPER),
            stats: vec![(StatKey::Save, 1)],
            narrative: "keeper.save",
        },
        Foul => {
            // The fouled side restarts; fouls inside the defended box
            // concede a penalty instead of a free kick.
            let fouled = token.team.opponent();
            let restart = if zone.attacking_band(fouled) == 5 {
                RestartKind::Penalty
            } else {
                RestartKind::FreeKick
            };
            TokenOutcome {
                effect: ActionEffect::OutOfPlay { restart, award: RestartAward::Possession },
                time_cost: None,
                stats: vec![(StatKey::Foul, 1)],
                narrative: "foul.committed",
            }
        }
        ThrowIn => TokenOutcome {
            effect: ActionEffect::StatOnly,
            time_cost: Some(costs::SET_PIECE),
            stats: Vec::new(),
            narrative: "restart.throw_in",
        },
        CornerKick => TokenOutcome {
            effect: ActionEffect::Reposition { zone: Zone::attacking_box(token.team) },
            time_cost: Some(costs::SET_PIECE),
            stats: vec![(StatKey::Corner, 1)],
            narrative: "restart.corner",
        },
        GoalKick => TokenOutcome {
            effect: ActionEffect::Reposition { zone: Zone::own_midfield(token.team) },
            time_cost: Some(costs::SET_PIECE),
            stats: Vec::new(),
            narrative: "restart.goal_kick",
        },
        FreeKick => TokenOutcome {
            effect: ActionEffect::Move { dx: step, dy: 0 },
            time_cost: Some(costs::SET_PIECE),
            stats: Vec::new(),
            narrative: "restart.free_kick",
        },
        KickoffPass => TokenOutcome {
            effect: ActionEffect::StatOnly,
            time_cost: None,
            stats: vec![(StatKey::PassAttempted, 1), (StatKey::PassCompleted, 1)],
            narrative: "restart.kickoff",
        },
        Recovery => fallback_outcome(),
    }
}
