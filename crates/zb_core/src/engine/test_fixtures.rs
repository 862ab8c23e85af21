//! Shared builders for engine tests.

use crate::models::player::{PlayerRecord, Role, SkillSet, TokenPlayer};
use crate::models::team::{Fixture, StaffMember, StaffSpecialty, TeamSheet, TeamSide};

/// Standard 11-player test squad: 1 GK, 4 DF, 4 MF, 2 FW, uniform skills.
pub fn squad(side: TeamSide, first_id: u32, skill: u8) -> Vec<TokenPlayer> {
    roster(first_id, skill)
        .iter()
        .map(|record| TokenPlayer::from_record(record, side))
        .collect()
}

pub fn roster(first_id: u32, skill: u8) -> Vec<PlayerRecord> {
    let roles = [
        Role::Goalkeeper,
        Role::Defender,
        Role::Defender,
        Role::Defender,
        Role::Defender,
        Role::Midfielder,
        Role::Midfielder,
        Role::Midfielder,
        Role::Midfielder,
        Role::Forward,
        Role::Forward,
    ];
    roles
        .iter()
        .enumerate()
        .map(|(i, &role)| PlayerRecord {
            id: first_id + i as u32,
            name: format!("Player {}", first_id + i as u32),
            role,
            skills: SkillSet::uniform(skill),
        })
        .collect()
}

pub fn sheet(team_id: &str, first_id: u32, skill: u8) -> TeamSheet {
    TeamSheet { team_id: team_id.to_string(), players: roster(first_id, skill), staff: Vec::new() }
}

pub fn fixture(seed: u64) -> Fixture {
    Fixture {
        match_id: "test-match".into(),
        home: sheet("lions", 0, 60),
        away: sheet("wolves", 100, 60),
        seed: Some(seed),
    }
}

pub fn staffed(specialty: StaffSpecialty) -> Vec<StaffMember> {
    vec![StaffMember { name: "Coach".into(), specialty }]
}
