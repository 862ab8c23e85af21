//! Staff impact tables: how a staff specialization bends token weights.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::token::{TokenCategory, TokenKind};
use crate::error::ConfigError;
use crate::models::team::StaffSpecialty;

/// One configured bonus. Qualitative bonuses scale weight by a percentage;
/// quantitative bonuses add or subtract a flat amount from a named token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "impact")]
pub enum StaffImpact {
    CategoryPercent { category: TokenCategory, percent: f32 },
    KindPercent { kinds: Vec<TokenKind>, percent: f32 },
    KindDelta { kind: TokenKind, delta: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffImpactTable {
    pub impacts: BTreeMap<StaffSpecialty, Vec<StaffImpact>>,
}

impl StaffImpactTable {
    /// Every specialty the data model names must be present; an incomplete
    /// catalogue must never reach the bag builder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const ALL: [StaffSpecialty; 5] = [
            StaffSpecialty::Technical,
            StaffSpecialty::Physical,
            StaffSpecialty::Tactical,
            StaffSpecialty::Goalkeeping,
            StaffSpecialty::Medical,
        ];
        for specialty in ALL {
            let entries = self
                .impacts
                .get(&specialty)
                .ok_or(ConfigError::MissingStaffImpact(specialty))?;
            for entry in entries {
                match entry {
                    StaffImpact::CategoryPercent { percent, .. }
                    | StaffImpact::KindPercent { percent, .. } => {
                        if *percent <= -100.0 {
                            return Err(ConfigError::InvalidStaffImpact {
                                specialty,
                                reason: format!(
                                    "percent {percent} would zero or negate weights"
                                ),
                            });
                        }
                    }
                    StaffImpact::KindDelta { .. } => {}
                }
            }
        }
        Ok(())
    }

    pub fn for_specialty(&self, specialty: StaffSpecialty) -> &[StaffImpact] {
        self.impacts.get(&specialty).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for StaffImpactTable {
    fn default() -> Self {
        use StaffSpecialty::*;
        let mut impacts = BTreeMap::new();
        impacts.insert(
            Technical,
            vec![StaffImpact::KindPercent {
                kinds: vec![
                    TokenKind::PassShort,
                    TokenKind::PassLong,
                    TokenKind::PassBack,
                    TokenKind::Cross,
                    TokenKind::Dribble,
                ],
                percent: 10.0,
            }],
        );
        impacts.insert(
            Physical,
            vec![StaffImpact::CategoryPercent {
                category: TokenCategory::Offensive,
                percent: 4.0,
            }],
        );
        impacts.insert(
            Tactical,
            vec![StaffImpact::CategoryPercent {
                category: TokenCategory::Defensive,
                percent: 8.0,
            }],
        );
        impacts.insert(
            Goalkeeping,
            vec![StaffImpact::KindPercent {
                kinds: vec![
                    TokenKind::KeeperClaim,
                    TokenKind::KeeperSave,
                    TokenKind::PenaltySaved,
                ],
                percent: 12.0,
            }],
        );
        // Medical staff keep players out of the challenges that wear them
        // down: flat reduction of the foul token.
        impacts.insert(
            Medical,
            vec![StaffImpact::KindDelta { kind: TokenKind::Foul, delta: -1.0 }],
        );
        Self { impacts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_complete() {
        assert!(StaffImpactTable::default().validate().is_ok());
    }

    #[test]
    fn test_missing_specialty_is_fatal() {
        let mut table = StaffImpactTable::default();
        table.impacts.remove(&StaffSpecialty::Medical);
        assert!(matches!(
            table.validate(),
            Err(ConfigError::MissingStaffImpact(StaffSpecialty::Medical))
        ));
    }

    #[test]
    fn test_degenerate_percent_rejected() {
        let mut table = StaffImpactTable::default();
        table.impacts.insert(
            StaffSpecialty::Technical,
            vec![StaffImpact::CategoryPercent {
                category: TokenCategory::Offensive,
                percent: -100.0,
            }],
        );
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_unknown_specialty_lookup_is_empty() {
        let mut table = StaffImpactTable::default();
        table.impacts.remove(&StaffSpecialty::Tactical);
        assert!(table.for_specialty(StaffSpecialty::Tactical).is_empty());
    }
}
