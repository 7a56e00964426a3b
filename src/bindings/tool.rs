//! Tool descriptions passed to the model and the calls it returns.

use super::{decode, Binding, BindingError, NormalizeMode, Source};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ToolParam {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Binding for ToolParam {
    const NAME: &'static str = "ToolParam";

    fn from_source(source: &Source) -> Self {
        Self {
            kind: source.field("type"),
            description: source.field("description"),
            required: source.field("required"),
            options: source.field("enum"),
        }
    }
}

impl TryFrom<Value> for ToolParam {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Tool {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, ToolParam>>,
}

impl Binding for Tool {
    const NAME: &'static str = "Tool";

    fn from_source(source: &Source) -> Self {
        Self {
            kind: source.field("type"),
            name: source.field("name"),
            description: source.field("description"),
            parameters: match source.normalized::<ToolParam>("parameters", NormalizeMode::Map) {
                Some(Value::Object(entries)) => Some(decode_params(entries)),
                _ => None,
            },
        }
    }
}

/// Entries that are not parameter objects are dropped one by one.
fn decode_params(entries: Map<String, Value>) -> BTreeMap<String, ToolParam> {
    entries
        .into_iter()
        .filter(|(_, param)| param.is_object())
        .filter_map(|(name, param)| Some((name, decode::<ToolParam>(param)?)))
        .collect()
}

impl TryFrom<Value> for Tool {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Tool {
    /// Names of the parameters marked required, sorted.
    pub fn required_params(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .flatten()
            .filter(|(_, param)| param.required == Some(true))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ToolFunction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Map<String, Value>>,
}

impl Binding for ToolFunction {
    const NAME: &'static str = "ToolFunction";

    fn from_source(source: &Source) -> Self {
        Self {
            name: source.field("name"),
            arguments: source.object("arguments"),
        }
    }
}

impl TryFrom<Value> for ToolFunction {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ToolCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<ToolFunction>,
}

impl Binding for ToolCall {
    const NAME: &'static str = "ToolCall";

    fn from_source(source: &Source) -> Self {
        Self {
            id: source.field("id"),
            kind: source.field("type"),
            function: source
                .normalized::<ToolFunction>("function", NormalizeMode::Element)
                .filter(Value::is_object)
                .and_then(decode),
        }
    }
}

impl TryFrom<Value> for ToolCall {
    type Error = BindingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_parameters_are_typed() {
        let tool = Tool::parse(json!({
            "type": "function",
            "name": "create_task",
            "description": "Create a task under a goal",
            "parameters": {
                "title": {"type": "string", "description": "Task title", "required": true},
                "priority": {"type": "integer", "required": false, "enum": ["1", "2", "3"], "min": 1}
            }
        }))
        .unwrap();

        let params = tool.parameters.as_ref().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["priority"].options.as_deref().map(<[String]>::len), Some(3));
        assert_eq!(tool.required_params(), vec!["title"]);
        // Unknown keys inside a parameter are dropped.
        assert!(tool.to_value().unwrap()["parameters"]["priority"].get("min").is_none());
    }

    #[test]
    fn test_bad_parameter_entry_keeps_the_rest() {
        let tool = Tool::parse(json!({
            "name": "log_struggle",
            "parameters": {
                "title": {"type": "string", "required": true},
                "notes": "string",
                "count": 3,
                "mood": null
            }
        }))
        .unwrap();

        let params = tool.parameters.unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["title"].kind.as_deref(), Some("string"));
    }

    #[test]
    fn test_parameters_not_an_object() {
        let tool = Tool::parse(json!({"parameters": ["title"]})).unwrap();
        assert_eq!(tool.parameters, None);
    }

    #[test]
    fn test_tool_call_function_arguments() {
        let call = ToolCall::parse(
            r#"{"id":"call_1","type":"function","function":{"name":"log_struggle","arguments":{"taskId":"t1","notes":"tired"}}}"#,
        )
        .unwrap();

        let function = call.function.unwrap();
        assert_eq!(function.name.as_deref(), Some("log_struggle"));
        assert_eq!(function.arguments.unwrap()["notes"], json!("tired"));
    }

    #[test]
    fn test_tool_call_with_non_object_function() {
        let call = ToolCall::parse(json!({"id": "call_2", "function": 5})).unwrap();
        assert_eq!(call.id.as_deref(), Some("call_2"));
        assert_eq!(call.function, None);
    }
}
