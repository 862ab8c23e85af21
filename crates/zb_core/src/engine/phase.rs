//! Match loop states and restart play phases.

use serde::{Deserialize, Serialize};

use super::effect::RestartKind;

/// Coarse state of the match loop.
/// `Kickoff → InPlay → (GoalStoppage ⇄ InPlay) → HalfBreak → InPlay → FullTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    Kickoff,
    InPlay,
    GoalStoppage,
    HalfBreak,
    FullTime,
}

impl LoopState {
    pub fn is_terminal(self) -> bool {
        self == LoopState::FullTime
    }
}

/// Fine-grained play context gating which token templates a zone offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayPhase {
    Open,
    Kickoff,
    ThrowIn,
    Corner,
    GoalKick,
    FreeKick,
    Penalty,
}

impl PlayPhase {
    pub fn from_restart(restart: RestartKind) -> Self {
        match restart {
            RestartKind::ThrowIn => PlayPhase::ThrowIn,
            RestartKind::Corner => PlayPhase::Corner,
            RestartKind::GoalKick => PlayPhase::GoalKick,
            RestartKind::FreeKick => PlayPhase::FreeKick,
            RestartKind::Penalty => PlayPhase::Penalty,
        }
    }

    pub fn is_set_piece(self) -> bool {
        !matches!(self, PlayPhase::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_time_is_terminal() {
        assert!(LoopState::FullTime.is_terminal());
        for state in [
            LoopState::Kickoff,
            LoopState::InPlay,
            LoopState::GoalStoppage,
            LoopState::HalfBreak,
        ] {
            assert!(!state.is_terminal());
        }
    }

    #[test]
    fn test_restart_phase_mapping() {
        assert_eq!(PlayPhase::from_restart(RestartKind::Corner), PlayPhase::Corner);
        assert_eq!(PlayPhase::from_restart(RestartKind::Penalty), PlayPhase::Penalty);
        assert!(PlayPhase::Corner.is_set_piece());
        assert!(!PlayPhase::Open.is_set_piece());
    }
}
