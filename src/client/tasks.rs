use super::{BackendError, CoachClient, Transport};
use crate::bindings::models::Task;
use serde_json::Value;

impl<T: Transport> CoachClient<T> {
    pub fn create_task(&self, task: &Task) -> Result<Task, BackendError> {
        let result = self.call("CreateTask", vec![Self::encode(task)?])?;
        self.decode_record("CreateTask", result)
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>, BackendError> {
        let result = self.call("GetTask", vec![Value::from(id)])?;
        Self::decode_optional(result)
    }

    pub fn get_tasks_by_goal_id(&self, goal_id: &str) -> Result<Vec<Task>, BackendError> {
        let result = self.call("GetTasksByGoalID", vec![Value::from(goal_id)])?;
        self.decode_list("GetTasksByGoalID", result)
    }

    pub fn get_todays_tasks(&self) -> Result<Vec<Task>, BackendError> {
        let result = self.call("GetTodaysTasks", Vec::new())?;
        self.decode_list("GetTodaysTasks", result)
    }

    /// `actual_minutes` of `None` is sent as `null`.
    pub fn complete_task(&self, id: &str, actual_minutes: Option<i64>) -> Result<(), BackendError> {
        self.call(
            "CompleteTask",
            vec![Value::from(id), Value::from(actual_minutes)],
        )?;
        Ok(())
    }

    pub fn log_struggle(&self, id: &str, notes: &str) -> Result<(), BackendError> {
        self.call("LogStruggle", vec![Value::from(id), Value::from(notes)])?;
        Ok(())
    }
}
