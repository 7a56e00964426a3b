use super::vocab::AgentType;
use super::{Binding, BindingError, Source};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outbound chat turn for the coach.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, goal_id: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            goal_id: Some(goal_id.into()),
        }
    }
}

impl Binding for ChatRequest {
    const NAME: &'static str = "ChatRequest";

    fn from_source(source: &Source) -> Self {
        Self {
            message: source.field("message"),
            goal_id: source.field("goalId"),
        }
    }
}

impl TryFrom<Value> for ChatRequest {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
}

impl Binding for ChatResponse {
    const NAME: &'static str = "ChatResponse";

    fn from_source(source: &Source) -> Self {
        Self {
            content: source.field("content"),
            agent_type: source.field("agentType"),
        }
    }
}

impl TryFrom<Value> for ChatResponse {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl ChatResponse {
    pub fn agent_kind(&self) -> Option<AgentType> {
        AgentType::from_wire(self.agent_type.as_deref()?)
    }
}
