use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::team::TeamSide;
use crate::engine::token::{Token, TokenKind};
use crate::engine::zone::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum EventKind {
    KickOff,
    HalfTime,
    FullTime,
    Goal,
    Shot,
    Save,
    Pass,
    Dribble,
    Cross,
    Tackle,
    Interception,
    Block,
    Clearance,
    Foul,
    ThrowIn,
    Corner,
    GoalKick,
    FreeKick,
    Penalty,
    Recovery,
}

impl EventKind {
    pub fn from_token(kind: TokenKind) -> Self {
        use TokenKind::*;
        match kind {
            PassShort | PassLong | PassBack | KickoffPass => EventKind::Pass,
            Cross => EventKind::Cross,
            Dribble => EventKind::Dribble,
            ShotGoal | PenaltyGoal => EventKind::Goal,
            ShotOnTarget | ShotOffTarget => EventKind::Shot,
            Tackle => EventKind::Tackle,
            Intercept => EventKind::Interception,
            Block => EventKind::Block,
            Clearance => EventKind::Clearance,
            KeeperClaim | KeeperSave | PenaltySaved => EventKind::Save,
            Foul => EventKind::Foul,
            ThrowIn => EventKind::ThrowIn,
            CornerKick => EventKind::Corner,
            GoalKick => EventKind::GoalKick,
            FreeKick => EventKind::FreeKick,
            Recovery => EventKind::Recovery,
        }
    }
}

/// One resolved step of the match. Produced once, never mutated.
///
/// `bag` and `token` are analysis/debug payloads: populated only when the
/// engine runs with debug capture, and stripped from serialization otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub time_secs: u32,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub narrative_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<PlayerId>,
    pub team: TeamSide,
    /// Side in possession at the instant the event resolved.
    pub possession: TeamSide,
    pub ball: Zone,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bag: Option<Vec<Token>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token: Option<Token>,
}
