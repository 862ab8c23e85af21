pub mod events;
pub mod match_result;
pub mod player;
pub mod team;

pub use events::{EventKind, MatchEvent};
pub use match_result::{FixtureReport, MatchResult, PlayerStats, StatKey, TeamStats};
pub use player::{PlayerId, PlayerRecord, Role, SkillKind, SkillSet, TokenPlayer};
pub use team::{Fixture, StaffMember, StaffSpecialty, TeamSheet, TeamSide};
