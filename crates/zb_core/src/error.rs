use thiserror::Error;

use crate::models::team::StaffSpecialty;

/// Configuration problems are fatal before any simulation starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid timing config: {0}")]
    InvalidTiming(String),

    #[error("invalid physics config: {0}")]
    InvalidPhysics(String),

    #[error("invalid balance config: {0}")]
    InvalidBalance(String),

    #[error("missing staff impact entry for specialty {0:?}")]
    MissingStaffImpact(StaffSpecialty),

    #[error("invalid staff impact for {specialty:?}: {reason}")]
    InvalidStaffImpact {
        specialty: StaffSpecialty,
        reason: String,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SimError::Deserialization(err.to_string())
        } else {
            SimError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
