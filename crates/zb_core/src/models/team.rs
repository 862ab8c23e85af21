use serde::{Deserialize, Serialize};

use super::player::PlayerRecord;
use crate::error::SimError;

/// Which of the two fixture teams an entity belongs to.
///
/// The engine works in sides; the fixture's string ids are carried in the
/// final result and mapped back by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Index into `[home, away]` arrays.
    pub fn index(self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }
}

/// Staff specializations that can influence token weights.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum StaffSpecialty {
    Technical,
    Physical,
    Tactical,
    Goalkeeping,
    Medical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub name: String,
    pub specialty: StaffSpecialty,
}

/// One team's matchday sheet: identity, ordered roster, staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSheet {
    pub team_id: String,
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

/// A scheduled match: everything the engine consumes for one simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub match_id: String,
    pub home: TeamSheet,
    pub away: TeamSheet,
    /// Explicit seed for reproducible simulation. When absent the caller
    /// must supply one at the API boundary; the engine never reads a clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Fixture {
    /// Reject fixtures the engine cannot simulate meaningfully.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.match_id.is_empty() {
            return Err(SimError::InvalidFixture("empty match_id".into()));
        }
        if self.home.team_id.is_empty() || self.away.team_id.is_empty() {
            return Err(SimError::InvalidFixture("empty team id".into()));
        }
        if self.home.team_id == self.away.team_id {
            return Err(SimError::InvalidFixture(format!(
                "home and away share team id '{}'",
                self.home.team_id
            )));
        }
        for (label, sheet) in [("home", &self.home), ("away", &self.away)] {
            if sheet.players.is_empty() {
                return Err(SimError::InvalidFixture(format!("{label} roster is empty")));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for record in self.home.players.iter().chain(self.away.players.iter()) {
            if !seen.insert(record.id) {
                return Err(SimError::InvalidFixture(format!(
                    "duplicate player id {}",
                    record.id
                )));
            }
        }
        Ok(())
    }
}
