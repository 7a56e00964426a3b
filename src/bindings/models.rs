use super::vocab::{AgentType, GoalStatus, ProviderType, Role, TaskStatus};
use super::{Binding, BindingError, Source};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Backend timestamp, kept exactly as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub Value);

impl Timestamp {
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Read the value as RFC 3339 text, if it is that.
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.as_str()?).ok()
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp(Value::String(text.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct Goal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Binding for Goal {
    const NAME: &'static str = "Goal";

    fn from_source(source: &Source) -> Self {
        Self {
            id: source.field("id"),
            title: source.field("title"),
            description: source.field("description"),
            target_date: source.timestamp("targetDate"),
            status: source.field("status"),
            context: source.object("context"),
            created_at: source.timestamp("createdAt"),
            updated_at: source.timestamp("updatedAt"),
        }
    }
}

impl TryFrom<Value> for Goal {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Goal {
    pub fn status_kind(&self) -> Option<GoalStatus> {
        GoalStatus::from_wire(self.status.as_deref()?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub struggle_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Binding for Task {
    const NAME: &'static str = "Task";

    fn from_source(source: &Source) -> Self {
        Self {
            id: source.field("id"),
            goal_id: source.field("goalId"),
            parent_id: source.field("parentId"),
            title: source.field("title"),
            description: source.field("description"),
            due_date: source.timestamp("dueDate"),
            status: source.field("status"),
            priority: source.integer("priority"),
            difficulty_rating: source.integer("difficultyRating"),
            estimated_minutes: source.integer("estimatedMinutes"),
            actual_minutes: source.integer("actualMinutes"),
            struggle_notes: source.field("struggleNotes"),
            completed_at: source.timestamp("completedAt"),
            created_at: source.timestamp("createdAt"),
            updated_at: source.timestamp("updatedAt"),
        }
    }
}

impl TryFrom<Value> for Task {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Task {
    pub fn status_kind(&self) -> Option<TaskStatus> {
        TaskStatus::from_wire(self.status.as_deref()?)
    }

    pub fn is_subtask(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Direct children of `parent_id`, in the order given. The tree is not
    /// checked for cycles or dangling parents.
    pub fn children_of<'a>(tasks: &'a [Task], parent_id: &str) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| task.parent_id.as_deref() == Some(parent_id))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct Conversation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Binding for Conversation {
    const NAME: &'static str = "Conversation";

    fn from_source(source: &Source) -> Self {
        Self {
            id: source.field("id"),
            goal_id: source.field("goalId"),
            session_id: source.field("sessionId"),
            role: source.field("role"),
            content: source.field("content"),
            agent_type: source.field("agentType"),
            metadata: source.object("metadata"),
            created_at: source.timestamp("createdAt"),
            updated_at: source.timestamp("updatedAt"),
        }
    }
}

impl TryFrom<Value> for Conversation {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Conversation {
    pub fn role_kind(&self) -> Option<Role> {
        Role::from_wire(self.role.as_deref()?)
    }

    pub fn agent_kind(&self) -> Option<AgentType> {
        AgentType::from_wire(self.agent_type.as_deref()?)
    }
}

/// Stored LLM provider settings. Field names are snake_case on the wire.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct LlmProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Binding for LlmProviderConfig {
    const NAME: &'static str = "LLMProviderConfig";

    fn from_source(source: &Source) -> Self {
        Self {
            id: source.integer("id"),
            name: source.field("name"),
            provider: source.field("provider"),
            base_url: source.field("base_url"),
            api_key: source.field("api_key"),
            default_model: source.field("default_model"),
            is_default: source.field("is_default"),
            is_active: source.field("is_active"),
            created_at: source.timestamp("created_at"),
            updated_at: source.timestamp("updated_at"),
        }
    }
}

impl TryFrom<Value> for LlmProviderConfig {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl LlmProviderConfig {
    pub fn provider_kind(&self) -> Option<ProviderType> {
        ProviderType::from_wire(self.provider.as_deref()?)
    }

    /// API key for display: first and last four characters only.
    pub fn masked_api_key(&self) -> Option<String> {
        let key = self.api_key.as_deref()?;
        let chars: Vec<char> = key.chars().collect();
        if chars.len() <= 8 {
            return Some("****".to_string());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        Some(format!("{}...{}", head, tail))
    }
}

impl fmt::Debug for LlmProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmProviderConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.masked_api_key())
            .field("default_model", &self.default_model)
            .field("is_default", &self.is_default)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
