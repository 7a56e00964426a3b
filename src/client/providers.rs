use super::{BackendError, CoachClient, Transport};
use crate::bindings::models::LlmProviderConfig;
use serde_json::Value;

impl<T: Transport> CoachClient<T> {
    /// Provider type names the backend can build, e.g. `openrouter`.
    /// Entries that are not text are skipped.
    pub fn get_llm_providers(&self) -> Result<Vec<String>, BackendError> {
        match self.call("GetLLMProviders", Vec::new())? {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()),
            _ => Err(self.unexpected("GetLLMProviders", "array")),
        }
    }

    pub fn get_llm_provider_configs(&self) -> Result<Vec<LlmProviderConfig>, BackendError> {
        let result = self.call("GetLLMProviderConfigs", Vec::new())?;
        self.decode_list("GetLLMProviderConfigs", result)
    }

    pub fn save_llm_provider_config(
        &self,
        config: &LlmProviderConfig,
    ) -> Result<LlmProviderConfig, BackendError> {
        let result = self.call("SaveLLMProviderConfig", vec![Self::encode(config)?])?;
        self.decode_record("SaveLLMProviderConfig", result)
    }

    pub fn update_llm_provider_config(&self, config: &LlmProviderConfig) -> Result<(), BackendError> {
        self.call("UpdateLLMProviderConfig", vec![Self::encode(config)?])?;
        Ok(())
    }

    pub fn delete_llm_provider_config(&self, id: i64) -> Result<(), BackendError> {
        self.call("DeleteLLMProviderConfig", vec![Value::from(id)])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeTransport;
    use super::*;
    use crate::bindings::vocab::ProviderType;
    use serde_json::json;

    #[test]
    fn test_available_providers() {
        let fake = FakeTransport::answering(
            "main.App.GetLLMProviders",
            json!(["openrouter", "ollama", 3]),
        );
        let client = CoachClient::new(&fake);

        let providers = client.get_llm_providers().unwrap();

        assert_eq!(providers, vec!["openrouter", "ollama"]);
        let kinds: Vec<_> = providers.iter().filter_map(|p| ProviderType::from_wire(p)).collect();
        assert_eq!(kinds, vec![ProviderType::OpenRouter, ProviderType::Ollama]);
    }

    #[test]
    fn test_save_sends_api_key_in_clear() {
        let fake = FakeTransport::answering(
            "main.App.SaveLLMProviderConfig",
            json!({"id": 7, "name": "Router", "provider": "openrouter", "is_default": true, "is_active": true}),
        );
        let client = CoachClient::new(&fake);
        let config = LlmProviderConfig {
            name: Some("Router".into()),
            provider: Some("openrouter".into()),
            api_key: Some("sk-or-0123456789".into()),
            is_default: Some(true),
            is_active: Some(true),
            ..Default::default()
        };

        let saved = client.save_llm_provider_config(&config).unwrap();

        assert_eq!(saved.id, Some(7));
        assert_eq!(fake.last_call().1[0]["api_key"], json!("sk-or-0123456789"));
    }

    #[test]
    fn test_configs_update_and_delete() {
        let mut fake = FakeTransport::answering(
            "main.App.GetLLMProviderConfigs",
            json!([{"id": 1, "provider": "ollama", "base_url": "http://localhost:11434"}]),
        );
        fake.results.insert("main.App.GetLLMProviders".into(), json!("openrouter"));
        let client = CoachClient::new(&fake);

        let configs = client.get_llm_provider_configs().unwrap();
        assert_eq!(configs[0].provider_kind(), Some(ProviderType::Ollama));

        client.update_llm_provider_config(&configs[0]).unwrap();
        assert_eq!(fake.last_call().0, "main.App.UpdateLLMProviderConfig");

        client.delete_llm_provider_config(1).unwrap();
        assert_eq!(fake.last_call().1, vec![json!(1)]);

        assert!(matches!(
            client.get_llm_providers(),
            Err(BackendError::UnexpectedShape { expected: "array", .. })
        ));
    }
}
