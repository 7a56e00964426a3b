mod chat;
pub mod config;
mod goals;
mod providers;
mod tasks;

use crate::bindings::{Binding, BindingError};
use serde::Serialize;
use serde_json::Value;

pub use config::{ClientConfig, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error("Unexpected result from {method}: expected {expected}")]
    UnexpectedShape {
        method: String,
        expected: &'static str,
    },
}

impl Serialize for BackendError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Carries a call to the backend and hands back its raw JSON result.
pub trait Transport {
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, BackendError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, BackendError> {
        (**self).invoke(method, args)
    }
}

/// Typed front for the coach backend methods.
pub struct CoachClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> CoachClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, BackendError> {
        let method = self.config.method(name);
        log::debug!("Invoking {} with {} argument(s)", method, args.len());
        self.transport.invoke(&method, args)
    }

    fn encode<S: Serialize>(value: &S) -> Result<Value, BackendError> {
        serde_json::to_value(value).map_err(|e| BackendError::Binding(BindingError::Encode(e)))
    }

    fn decode_one<B: Binding>(value: Value) -> Result<B, BackendError> {
        Ok(B::parse(value)?)
    }

    /// A call that must hand back a record; `null` is not one.
    fn decode_record<B: Binding>(&self, name: &str, value: Value) -> Result<B, BackendError> {
        match value {
            Value::Null => Err(self.unexpected(name, "object")),
            value => Self::decode_one(value),
        }
    }

    fn decode_optional<B: Binding>(value: Value) -> Result<Option<B>, BackendError> {
        match value {
            Value::Null => Ok(None),
            value => Self::decode_one(value).map(Some),
        }
    }

    fn decode_list<B: Binding>(&self, name: &str, value: Value) -> Result<Vec<B>, BackendError> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items.into_iter().map(Self::decode_one::<B>).collect(),
            _ => Err(self.unexpected(name, "array")),
        }
    }

    fn unexpected(&self, name: &str, expected: &'static str) -> BackendError {
        let method = self.config.method(name);
        log::warn!("{} returned a non-{} result", method, expected);
        BackendError::UnexpectedShape { method, expected }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeTransport;
    use super::*;
    use crate::bindings::models::Goal;
    use serde_json::json;

    #[test]
    fn test_custom_namespace() {
        let fake = FakeTransport::default();
        let config = ClientConfig {
            namespace: "coach.Api".to_string(),
            ..Default::default()
        };
        let client = CoachClient::with_config(&fake, config);
        client.get_goal("g1").unwrap();
        assert_eq!(fake.last_call().0, "coach.Api.GetGoal");
    }

    #[test]
    fn test_transport_error_propagates() {
        let fake = FakeTransport {
            fail_with: Some("backend not ready".to_string()),
            ..Default::default()
        };
        let client = CoachClient::new(&fake);
        let err = client.get_goal("g1").unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!("Transport error: backend not ready")
        );
    }

    #[test]
    fn test_malformed_text_result_is_binding_error() {
        let fake = FakeTransport::answering("main.App.GetGoal", json!("{not valid json"));
        let client = CoachClient::new(&fake);
        assert!(matches!(
            client.get_goal("g1"),
            Err(BackendError::Binding(BindingError::MalformedInput(_)))
        ));
    }

    #[test]
    fn test_null_record_result_is_rejected() {
        let fake = FakeTransport::default();
        let client = CoachClient::new(&fake);
        let goal = Goal {
            title: Some("Run a 10k".into()),
            ..Default::default()
        };

        assert!(matches!(
            client.create_goal(&goal),
            Err(BackendError::UnexpectedShape { expected: "object", .. })
        ));
        assert!(matches!(
            client.decode_record::<Goal>("X", json!({"id": "g1"})),
            Ok(Goal { id: Some(_), .. })
        ));
    }

    #[test]
    fn test_list_decoding() {
        let fake = FakeTransport::default();
        let client = CoachClient::new(&fake);
        assert!(client.decode_list::<Goal>("X", Value::Null).unwrap().is_empty());
        assert!(matches!(
            client.decode_list::<Goal>("X", json!({"id": "g1"})),
            Err(BackendError::UnexpectedShape { expected: "array", .. })
        ));
        let goals = client
            .decode_list::<Goal>("X", json!([{"id": "g1"}, r#"{"id":"g2"}"#]))
            .unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[1].id.as_deref(), Some("g2"));
    }
}
