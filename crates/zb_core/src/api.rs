//! JSON boundary for host integrations. Requests are schema-versioned;
//! responses always carry a `success` flag so a host can treat the payload
//! uniformly.

use serde::{Deserialize, Serialize};

use crate::batch::simulate_batch;
use crate::config::SimConfig;
use crate::engine::simulate_match;
use crate::error::{Result, SimError};
use crate::models::match_result::{FixtureReport, MatchResult};
use crate::models::team::Fixture;

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub fixture: Fixture,
    /// Omitted sections fall back to the tuned defaults.
    #[serde(default)]
    pub config: Option<SimConfig>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub schema_version: u8,
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub config: Option<SimConfig>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub schema_version: u8,
    pub reports: Vec<FixtureReport>,
}

fn check_schema(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(SimError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

fn resolve_config(config: Option<SimConfig>) -> Result<SimConfig> {
    match config {
        Some(config) => {
            config.validate()?;
            Ok(config)
        }
        None => Ok(SimConfig::default()),
    }
}

/// Simulate one fixture from a JSON request. A simulation failure is still
/// a well-formed response; only an unreadable request or an unserializable
/// response is an `Err`.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let config = resolve_config(request.config)?;

    let response = match simulate_match(&request.fixture, &config) {
        Ok(result) => MatchResponse {
            schema_version: SCHEMA_VERSION,
            success: true,
            result: Some(result),
            error: None,
        },
        Err(err) => MatchResponse {
            schema_version: SCHEMA_VERSION,
            success: false,
            result: None,
            error: Some(err.to_string()),
        },
    };
    serde_json::to_string(&response).map_err(Into::into)
}

/// Simulate a whole league day from a JSON request. Per-fixture failures
/// are reported inside the response, never as an `Err`.
pub fn simulate_batch_json(request_json: &str) -> Result<String> {
    let request: BatchRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let config = resolve_config(request.config)?;

    let reports = simulate_batch(&request.fixtures, &config);
    let response = BatchResponse { schema_version: SCHEMA_VERSION, reports };
    serde_json::to_string(&response).map_err(Into::into)
}
