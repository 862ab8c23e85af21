use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::events::MatchEvent;
use super::player::PlayerId;

/// Typed stat counters incremented by resolved tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum StatKey {
    PassAttempted,
    PassCompleted,
    Shot,
    ShotOnTarget,
    Goal,
    Tackle,
    Interception,
    Block,
    Clearance,
    Save,
    Foul,
    Dribble,
    Cross,
    Corner,
}

/// Per-player running statistics for one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub passes_attempted: u16,
    pub passes_completed: u16,
    pub shots: u16,
    pub shots_on_target: u16,
    pub goals: u16,
    pub tackles: u16,
    pub interceptions: u16,
    pub blocks: u16,
    pub clearances: u16,
    pub saves: u16,
    pub fouls: u16,
    pub dribbles: u16,
    pub crosses: u16,
}

impl PlayerStats {
    pub fn apply(&mut self, key: StatKey, amount: u16) {
        match key {
            StatKey::PassAttempted => self.passes_attempted += amount,
            StatKey::PassCompleted => self.passes_completed += amount,
            StatKey::Shot => self.shots += amount,
            StatKey::ShotOnTarget => self.shots_on_target += amount,
            StatKey::Goal => self.goals += amount,
            StatKey::Tackle => self.tackles += amount,
            StatKey::Interception => self.interceptions += amount,
            StatKey::Block => self.blocks += amount,
            StatKey::Clearance => self.clearances += amount,
            StatKey::Save => self.saves += amount,
            StatKey::Foul => self.fouls += amount,
            StatKey::Dribble => self.dribbles += amount,
            StatKey::Cross => self.crosses += amount,
            StatKey::Corner => {} // team-level only
        }
    }
}

/// Aggregated team statistics for one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Resolution steps spent in possession; the percentage is derived from
    /// this once the match ends.
    pub possession_ticks: u32,
    pub possession_pct: f32,
    pub passes_attempted: u16,
    pub passes_completed: u16,
    pub shots: u16,
    pub shots_on_target: u16,
    pub tackles: u16,
    pub interceptions: u16,
    pub clearances: u16,
    pub saves: u16,
    pub fouls: u16,
    pub corners: u16,
    pub dribbles: u16,
    pub crosses: u16,
}

impl TeamStats {
    pub fn apply(&mut self, key: StatKey, amount: u16) {
        match key {
            StatKey::PassAttempted => self.passes_attempted += amount,
            StatKey::PassCompleted => self.passes_completed += amount,
            StatKey::Shot => self.shots += amount,
            StatKey::ShotOnTarget => self.shots_on_target += amount,
            StatKey::Goal => {} // tracked by the score itself
            StatKey::Tackle => self.tackles += amount,
            StatKey::Interception => self.interceptions += amount,
            StatKey::Block => {} // player-level only
            StatKey::Clearance => self.clearances += amount,
            StatKey::Save => self.saves += amount,
            StatKey::Foul => self.fouls += amount,
            StatKey::Dribble => self.dribbles += amount,
            StatKey::Cross => self.crosses += amount,
            StatKey::Corner => self.corners += amount,
        }
    }

    pub fn pass_accuracy(&self) -> f32 {
        if self.passes_attempted == 0 {
            return 0.0;
        }
        self.passes_completed as f32 / self.passes_attempted as f32 * 100.0
    }
}

/// Final output of one simulated match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: String,
    pub home_team: String,
    pub away_team: String,
    pub score_home: u8,
    pub score_away: u8,
    pub stats_home: TeamStats,
    pub stats_away: TeamStats,
    /// Keyed by player id; BTreeMap keeps serialization order stable.
    pub player_stats: BTreeMap<PlayerId, PlayerStats>,
    pub events: Vec<MatchEvent>,
    pub seed: u64,
}

/// Outcome of one fixture inside a batch run. A failed fixture never aborts
/// its siblings; it is reported here instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureReport {
    pub match_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FixtureReport {
    pub fn ok(match_id: String, result: MatchResult) -> Self {
        Self { match_id, success: true, result: Some(result), error: None }
    }

    pub fn failed(match_id: String, error: String) -> Self {
        Self { match_id, success: false, result: None, error: Some(error) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_stat_key_is_applicable() {
        // Exercise the full key space against both accumulators; a new key
        // that panics or is silently dropped from both would be caught here.
        let mut player = PlayerStats::default();
        let mut team = TeamStats::default();
        for key in StatKey::iter() {
            player.apply(key, 1);
            team.apply(key, 1);
        }
        assert_eq!(player.passes_attempted, 1);
        assert_eq!(team.corners, 1);
        assert_eq!(team.shots, 1);
    }

    #[test]
    fn test_pass_accuracy() {
        let mut team = TeamStats::default();
        assert_eq!(team.pass_accuracy(), 0.0);
        team.passes_attempted = 10;
        team.passes_completed = 8;
        assert!((team.pass_accuracy() - 80.0).abs() < f32::EPSILON);
    }
}
