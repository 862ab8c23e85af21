use serde::{Deserialize, Serialize};

use super::match_result::PlayerStats;
use super::team::TeamSide;

pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// Skill attribute axes, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Passing,
    Shooting,
    Dribbling,
    Defending,
    Goalkeeping,
    Pace,
    Stamina,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    pub passing: u8,
    pub shooting: u8,
    pub dribbling: u8,
    pub defending: u8,
    pub goalkeeping: u8,
    pub pace: u8,
    pub stamina: u8,
}

impl SkillSet {
    pub fn uniform(value: u8) -> Self {
        Self {
            passing: value,
            shooting: value,
            dribbling: value,
            defending: value,
            goalkeeping: value,
            pace: value,
            stamina: value,
        }
    }

    pub fn get(&self, kind: SkillKind) -> u8 {
        match kind {
            SkillKind::Passing => self.passing,
            SkillKind::Shooting => self.shooting,
            SkillKind::Dribbling => self.dribbling,
            SkillKind::Defending => self.defending,
            SkillKind::Goalkeeping => self.goalkeeping,
            SkillKind::Pace => self.pace,
            SkillKind::Stamina => self.stamina,
        }
    }
}

/// Immutable roster entry as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub skills: SkillSet,
}

/// Simulation-time player state, owned by one match loop for one match.
///
/// Fatigue is 0.0-100.0 and never decreases during play; per-match stats are
/// aggregated into the result and discarded with the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPlayer {
    pub id: PlayerId,
    pub name: String,
    pub side: TeamSide,
    pub role: Role,
    pub skills: SkillSet,
    pub fatigue: f32,
    pub stats: PlayerStats,
}

impl TokenPlayer {
    pub fn from_record(record: &PlayerRecord, side: TeamSide) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            side,
            role: record.role,
            skills: record.skills,
            fatigue: 0.0,
            stats: PlayerStats::default(),
        }
    }

    pub fn skill(&self, kind: SkillKind) -> u8 {
        self.skills.get(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_player_starts_fresh() {
        let record = PlayerRecord {
            id: 9,
            name: "Nine".into(),
            role: Role::Forward,
            skills: SkillSet::uniform(75),
        };
        let player = TokenPlayer::from_record(&record, TeamSide::Away);
        assert_eq!(player.id, 9);
        assert_eq!(player.side, TeamSide::Away);
        assert_eq!(player.fatigue, 0.0);
        assert_eq!(player.stats.passes_attempted, 0);
    }

    #[test]
    fn test_skill_lookup_covers_all_axes() {
        let mut skills = SkillSet::uniform(10);
        skills.goalkeeping = 88;
        skills.stamina = 42;
        assert_eq!(skills.get(SkillKind::Goalkeeping), 88);
        assert_eq!(skills.get(SkillKind::Stamina), 42);
        assert_eq!(skills.get(SkillKind::Passing), 10);
    }
}
