use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Custom deserializer: some endpoints send numeric ids as strings, and
/// detached references as null or "none".
fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(n.as_u64().map(|id| id as u32)),
        Value::String(s) => {
            if s == "none" {
                Ok(None)
            } else if let Ok(id) = s.parse::<u32>() {
                Ok(Some(id))
            } else {
                Ok(None)
            }
        }
        Value::Null => Ok(None),
        _ => Ok(None),
    }
}

// Pagination metadata

/// Totals returned by list endpoints; `total` counts records before the
/// limit/offset window.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
}

/// Standard list envelope for every collection endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

// Authentication models

/// The authenticated principal, returned by `GET /api/v1/me`.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionUser {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

// Agent models

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Draft,
    Active,
    Paused,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Draft => write!(f, "draft"),
            AgentStatus::Active => write!(f, "active"),
            AgentStatus::Paused => write!(f, "paused"),
        }
    }
}

impl std::str::FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AgentStatus::Draft),
            "active" => Ok(AgentStatus::Active),
            "paused" => Ok(AgentStatus::Paused),
            other => Err(format!(
                "unknown status '{}': expected draft, active, or paused",
                other
            )),
        }
    }
}

/// A voice agent: the automated caller that runs a routine against a lead
/// group using a configured voice.
#[derive(Debug, Deserialize, Clone)]
pub struct Agent {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: AgentStatus,
    #[serde(deserialize_with = "deserialize_opt_id", default)]
    pub routine_id: Option<u32>,
    #[serde(deserialize_with = "deserialize_opt_id", default)]
    pub voice_id: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CreateAgentRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<u32>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct UpdateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<u32>,
}

// Routine models

/// A call script: the ordered steps an agent walks through on a call.
#[derive(Debug, Deserialize, Clone)]
pub struct Routine {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub step_count: u32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CreateRoutineRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct UpdateRoutineRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

// User models

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Operator,
    Viewer,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Operator => write!(f, "operator"),
            UserRole::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "operator" => Ok(UserRole::Operator),
            "viewer" => Ok(UserRole::Viewer),
            other => Err(format!(
                "unknown role '{}': expected admin, operator, or viewer",
                other
            )),
        }
    }
}

/// A back-office user of the organization.
#[derive(Debug, Deserialize, Clone)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

// Lead group models

/// A named batch of leads an agent dials through.
#[derive(Debug, Deserialize, Clone)]
pub struct LeadGroup {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lead_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CreateLeadGroupRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct UpdateLeadGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// Voice asset models

/// A recorded voice sample or synthesized voice configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct VoiceAsset {
    pub id: u32,
    pub name: String,
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CreateVoiceAssetRequest {
    pub name: String,
    pub file_name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct UpdateVoiceAssetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_agent_with_string_reference_ids() {
        // Numeric reference sent as string
        let json = r#"{
            "id": 1,
            "name": "Receptionist",
            "status": "active",
            "routine_id": "42",
            "voice_id": null,
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-02T08:30:00Z"
        }"#;
        let agent: Agent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.routine_id, Some(42));
        assert_eq!(agent.voice_id, None);
        assert_eq!(agent.status, AgentStatus::Active);

        // "none" sentinel maps to None
        let json = r#"{
            "id": 2,
            "name": "Collector",
            "status": "paused",
            "routine_id": "none",
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-02T08:30:00Z"
        }"#;
        let agent: Agent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.routine_id, None);
        assert_eq!(agent.voice_id, None);
    }

    #[test]
    fn test_list_envelope_without_meta() {
        let json = r#"{ "data": [] }"#;
        let envelope: ListEnvelope<Agent> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_empty());
        assert!(envelope.meta.is_none());
    }

    #[test]
    fn test_status_and_role_round_trip_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&AgentStatus::Paused).unwrap(),
            "\"paused\""
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"operator\"").unwrap(),
            UserRole::Operator
        );
        assert_eq!("active".parse::<AgentStatus>().unwrap(), AgentStatus::Active);
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_update_request_skips_absent_fields() {
        let update = UpdateAgentRequest {
            status: Some(AgentStatus::Active),
            ..UpdateAgentRequest::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"status":"active"}"#
        );
    }
}
