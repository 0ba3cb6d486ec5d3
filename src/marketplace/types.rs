//! Wire types for the marketplace API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Bearer token for the agents API. Issued by the marketplace auth service.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Agent as reported by the agents API. Richer than the local entry and has
/// no notion of "active" or of a secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerAgent {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub wallet_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerAgent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, wallet: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            wallet_address: wallet.into(),
            description: None,
            metrics: None,
            jobs: None,
            resources: None,
            extra: Map::new(),
        }
    }
}

/// Response of the create-agent call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAgent {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub wallet_address: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Response of the regenerate-key call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedApiKey {
    #[serde(default)]
    pub api_key: Option<String>,
}

/// One search hit. Only the fields the table needs are typed; the rest is
/// kept verbatim for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub successful_job_count: Option<u64>,
    #[serde(default)]
    pub unique_buyer_count: Option<u64>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `{"data": [...]}` envelope used by the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<AgentRecord>,
}

/// The agents API answers with either an envelope or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AgentsResponse {
    Wrapped { data: Vec<ServerAgent> },
    Bare(Vec<ServerAgent>),
}

impl AgentsResponse {
    pub fn into_agents(self) -> Vec<ServerAgent> {
        match self {
            AgentsResponse::Wrapped { data } => data,
            AgentsResponse::Bare(agents) => agents,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
