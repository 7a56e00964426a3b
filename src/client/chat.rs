use super::{BackendError, CoachClient, Transport};
use crate::bindings::chat::{ChatRequest, ChatResponse};
use crate::bindings::models::Conversation;
use serde_json::Value;

impl<T: Transport> CoachClient<T> {
    pub fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        let result = self.call("Chat", vec![Self::encode(request)?])?;
        self.decode_record("Chat", result)
    }

    /// Most recent entries for a goal. A missing or non-positive `limit`
    /// sends the configured default.
    pub fn get_conversation_history(
        &self,
        goal_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Conversation>, BackendError> {
        let limit = self.config.history_limit(limit);
        let result = self.call(
            "GetConversationHistory",
            vec![Value::from(goal_id), Value::from(limit)],
        )?;
        self.decode_list("GetConversationHistory", result)
    }
}
