//! Tokens: weighted candidate actions offered for one zone/possession
//! context, and the bag they are drawn from.

use serde::{Deserialize, Serialize};

use crate::models::player::{PlayerId, Role, SkillKind};
use crate::models::team::TeamSide;

/// Every action kind the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum TokenKind {
    // Offensive
    PassShort,
    PassLong,
    PassBack,
    Cross,
    Dribble,
    ShotGoal,
    ShotOnTarget,
    ShotOffTarget,
    PenaltyGoal,
    // Defensive
    Tackle,
    Intercept,
    Block,
    Clearance,
    KeeperClaim,
    KeeperSave,
    PenaltySaved,
    Foul,
    // Neutral / set piece
    ThrowIn,
    CornerKick,
    GoalKick,
    FreeKick,
    KickoffPass,
    Recovery,
}

/// Balance-tuning classification. Fixed table: membership is declared here,
/// never derived from behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Offensive,
    Defensive,
    SetPiece,
}

impl TokenKind {
    pub fn category(self) -> TokenCategory {
        use TokenKind::*;
        match self {
            PassShort | PassLong | PassBack | Cross | Dribble | ShotGoal | ShotOnTarget
            | ShotOffTarget | PenaltyGoal => TokenCategory::Offensive,
            Tackle | Intercept | Block | Clearance | KeeperClaim | KeeperSave
            | PenaltySaved | Foul => TokenCategory::Defensive,
            ThrowIn | CornerKick | GoalKick | FreeKick | KickoffPass | Recovery => {
                TokenCategory::SetPiece
            }
        }
    }

    /// Which skill attribute scales this token's weight.
    pub fn relevant_skill(self) -> SkillKind {
        use TokenKind::*;
        match self {
            PassShort | PassLong | PassBack | ThrowIn | FreeKick | KickoffPass => {
                SkillKind::Passing
            }
            Cross | CornerKick => SkillKind::Passing,
            Dribble => SkillKind::Dribbling,
            ShotGoal | ShotOnTarget | ShotOffTarget | PenaltyGoal => SkillKind::Shooting,
            Tackle | Intercept | Block | Clearance | Foul => SkillKind::Defending,
            KeeperClaim | KeeperSave | PenaltySaved | GoalKick => SkillKind::Goalkeeping,
            Recovery => SkillKind::Pace,
        }
    }

    /// Role suitability multiplier. Zero means the role never carries this
    /// token; the bag builder skips those players entirely.
    pub fn role_affinity(self, role: Role) -> f32 {
        use TokenKind::*;
        match self {
            PassShort | PassBack => match role {
                Role::Goalkeeper => 0.0,
                Role::Defender => 0.9,
                Role::Midfielder => 1.1,
                Role::Forward => 0.8,
            },
            PassLong => match role {
                Role::Goalkeeper => 0.0,
                Role::Defender => 1.0,
                Role::Midfielder => 1.1,
                Role::Forward => 0.5,
            },
            Cross => match role {
                Role::Goalkeeper => 0.0,
                Role::Defender => 0.6,
                Role::Midfielder => 1.0,
                Role::Forward => 0.8,
            },
            Dribble => match role {
                Role::Goalkeeper => 0.0,
                Role::Defender => 0.4,
                Role::Midfielder => 1.0,
                Role::Forward => 1.2,
            },
            ShotGoal | ShotOnTarget | ShotOffTarget => match role {
                Role::Goalkeeper => 0.0,
                Role::Defender => 0.2,
                Role::Midfielder => 0.7,
                Role::Forward => 1.3,
            },
            PenaltyGoal => match role {
                Role::Forward => 1.0,
                Role::Midfielder => 0.6,
                _ => 0.0,
            },
            Tackle | Intercept | Block | Clearance | Foul => match role {
                Role::Goalkeeper => 0.0,
                Role::Defender => 1.2,
                Role::Midfielder => 0.9,
                Role::Forward => 0.4,
            },
            KeeperClaim | KeeperSave | PenaltySaved | GoalKick => match role {
                Role::Goalkeeper => 1.0,
                _ => 0.0,
            },
            ThrowIn | CornerKick | FreeKick | KickoffPass => match role {
                Role::Goalkeeper => 0.0,
                Role::Defender => 0.8,
                Role::Midfielder => 1.0,
                Role::Forward => 0.9,
            },
            Recovery => match role {
                Role::Goalkeeper => 0.0,
                _ => 1.0,
            },
        }
    }
}

/// One weighted candidate action. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub team: TeamSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
    pub weight: f32,
}

/// Ordered token multiset for one resolution step. Built fresh each step,
/// consumed immediately by the draw; insertion order is the declaration
/// order of the zone catalogue and is the tie-break rule for the draw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    tokens: Vec<Token>,
}

impl Bag {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn total_weight(&self) -> f32 {
        self.tokens.iter().map(|t| t.weight).sum()
    }

    /// Summed weight of all tokens of one kind, for balance assertions.
    pub fn kind_weight(&self, kind: TokenKind) -> f32 {
        self.tokens.iter().filter(|t| t.kind == kind).map(|t| t.weight).sum()
    }
}
