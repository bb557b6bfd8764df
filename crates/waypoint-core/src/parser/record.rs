//! Intermediate plan records produced by the parsing strategies.
//!
//! Records are decoded leniently: language models routinely return numbers
//! as strings, `null` for absent fields, or mixed-type lists, and none of
//! that should cost a content-repair round trip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title given to tasks without any extractable text.
pub const UNTITLED_TASK: &str = "Untitled Task";

/// Plan-shaped output of a parsing strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedPlanRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub notes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_tasks")]
    pub tasks: Vec<ParsedTaskRecord>,
}

/// Task-shaped output of a parsing strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTaskRecord {
    #[serde(default = "untitled", deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub dependencies: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub comments: Vec<String>,
}

impl Default for ParsedTaskRecord {
    fn default() -> Self {
        Self {
            title: untitled(),
            description: String::new(),
            status: String::new(),
            order: None,
            dependencies: Vec::new(),
            comments: Vec::new(),
        }
    }
}

impl ParsedPlanRecord {
    /// Decodes a JSON value into a record. Only JSON objects qualify.
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

fn untitled() -> String {
    UNTITLED_TASK.to_string()
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value).unwrap_or_default())
}

fn lenient_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let title = lenient_string(deserializer)?;
    if title.trim().is_empty() {
        Ok(untitled())
    } else {
        Ok(title.trim().to_string())
    }
}

fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.is_finite())
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(value_to_text)
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        Value::String(text) if !text.trim().is_empty() => vec![text.trim().to_string()],
        _ => Vec::new(),
    })
}

fn lenient_tasks<'de, D>(deserializer: D) -> Result<Vec<ParsedTaskRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let record = ParsedPlanRecord::from_value(json!({"tasks": [{}]})).unwrap();

        assert_eq!(record.name, "");
        assert!(record.notes.is_empty());
        assert_eq!(record.tasks.len(), 1);
        assert_eq!(record.tasks[0].title, UNTITLED_TASK);
        assert_eq!(record.tasks[0].order, None);
    }

    #[test]
    fn test_lenient_field_types() {
        let record = ParsedPlanRecord::from_value(json!({
            "name": "Launch",
            "description": null,
            "notes": "single note",
            "tasks": [
                {"title": "A", "order": "2", "dependencies": [1, "B", null]},
                {"title": "  ", "order": 3.0, "comments": ["docs/api.md"]},
                "not a task"
            ]
        }))
        .unwrap();

        assert_eq!(record.description, "");
        assert_eq!(record.notes, vec!["single note"]);
        assert_eq!(record.tasks.len(), 2);
        assert_eq!(record.tasks[0].order, Some(2));
        assert_eq!(record.tasks[0].dependencies, vec!["1", "B"]);
        assert_eq!(record.tasks[1].title, UNTITLED_TASK);
        assert_eq!(record.tasks[1].order, Some(3));
        assert_eq!(record.tasks[1].comments, vec!["docs/api.md"]);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(ParsedPlanRecord::from_value(json!([1, 2, 3])).is_none());
        assert!(ParsedPlanRecord::from_value(json!("plan")).is_none());
    }
}
