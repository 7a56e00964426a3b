use super::{BackendError, CoachClient, Transport};
use crate::bindings::models::Goal;
use serde_json::Value;

impl<T: Transport> CoachClient<T> {
    /// Returns the goal as stored, with the id the backend assigned.
    pub fn create_goal(&self, goal: &Goal) -> Result<Goal, BackendError> {
        let result = self.call("CreateGoal", vec![Self::encode(goal)?])?;
        self.decode_record("CreateGoal", result)
    }

    pub fn get_goal(&self, id: &str) -> Result<Option<Goal>, BackendError> {
        let result = self.call("GetGoal", vec![Value::from(id)])?;
        Self::decode_optional(result)
    }

    pub fn update_goal(&self, goal: &Goal) -> Result<(), BackendError> {
        self.call("UpdateGoal", vec![Self::encode(goal)?])?;
        Ok(())
    }

    pub fn delete_goal(&self, id: &str) -> Result<(), BackendError> {
        self.call("DeleteGoal", vec![Value::from(id)])?;
        Ok(())
    }
}
