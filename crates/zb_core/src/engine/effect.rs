//! Typed action effects. One variant per effect shape; the match loop
//! matches exhaustively instead of probing optional fields.

use serde::{Deserialize, Serialize};

use super::zone::Zone;
use crate::models::match_result::StatKey;

/// How play restarts after the ball leaves play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartKind {
    ThrowIn,
    Corner,
    GoalKick,
    FreeKick,
    Penalty,
}

/// Which side takes the restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartAward {
    /// The side currently in possession keeps the ball.
    Possession,
    /// Possession flips to the opponent.
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum ActionEffect {
    /// Grid displacement in the attacking frame of the possession side
    /// (positive dx = toward the opponent's goal).
    Move { dx: i8, dy: i8 },
    /// Discontinuous ball placement (crosses, restarts).
    Reposition { zone: Zone },
    /// Possession flips; the ball optionally moves to `zone`.
    Turnover { zone: Option<Zone> },
    /// The possession side scores.
    Goal,
    /// Ball out of play; play resumes via `restart` for the awarded side.
    OutOfPlay { restart: RestartKind, award: RestartAward },
    /// Nothing but stats and time.
    StatOnly,
}

impl ActionEffect {
    /// True for effects that stop open play: the boundary events that can
    /// end a match once regulation time is exhausted.
    pub fn is_boundary(&self) -> bool {
        matches!(self, ActionEffect::Goal | ActionEffect::OutOfPlay { .. })
    }
}

/// Everything the match loop needs to apply one drawn token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenOutcome {
    pub effect: ActionEffect,
    /// Overrides the default tick cost when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_cost: Option<u32>,
    /// Stat increments credited to the token's team and actor.
    pub stats: Vec<(StatKey, u16)>,
    /// Key for the external narrative-lookup collaborator; never rendered
    /// by the engine.
    pub narrative: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_classification() {
        assert!(ActionEffect::Goal.is_boundary());
        assert!(ActionEffect::OutOfPlay {
            restart: RestartKind::Corner,
            award: RestartAward::Possession
        }
        .is_boundary());
        assert!(!ActionEffect::Move { dx: 1, dy: 0 }.is_boundary());
        assert!(!ActionEffect::Turnover { zone: None }.is_boundary());
        assert!(!ActionEffect::StatOnly.is_boundary());
    }
}
