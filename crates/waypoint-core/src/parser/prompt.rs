//! Instruction prompt for the model-backed parser.

/// System role sent with every plan parsing request.
pub const SYSTEM_PROMPT: &str = "You are a project plan parsing specialist. You convert project plans \
written in natural language into structured JSON, and you are careful to identify tasks, advisory notes \
and the dependencies between tasks.";

/// Appended to the prompt after a reply that could not be decoded as JSON.
pub const JSON_ONLY_REMINDER: &str = "\n\nIMPORTANT: Your previous response could not be parsed as valid JSON. \
Please ensure you return ONLY a valid JSON object with no additional text or formatting.";

const OUTPUT_SHAPE: &str = r#"```json
{
  "name": "Plan name - use the provided name or infer it from the content",
  "description": "Overall plan description or objective",
  "notes": ["Advisory note 1", "Advisory note 2"],
  "tasks": [
    {
      "title": "Short, clear task title",
      "description": "Detailed task description",
      "status": "One of: Pending, Working, Pending For Review, Complete, Need Fixed",
      "order": 1,
      "dependencies": ["Titles of the tasks this task depends on"],
      "comments": ["Details worth keeping with the task, such as links or file paths the user provided"]
    }
  ]
}
```"#;

const PARSING_RULES: &str = "\
1. COMPLETENESS: Extract ALL tasks mentioned in the text, however minor.
2. ACCURACY: Do not add information that is not stated or strongly implied by the text.
3. TASK IDENTIFICATION: Tasks are usually introduced by numbers, bullet points, action verbs or clearly described activities.
4. STATUS: The default status is \"Pending\" unless the text explicitly says a task is in progress (\"Working\"), awaiting review (\"Pending For Review\"), done (\"Complete\") or needs fixes (\"Need Fixed\").
5. DEPENDENCIES: When one task refers to another task by title or position, list the referenced task's title in its dependencies array.
6. ORDER: Assign sequential order numbers that follow the logical sequence of the work and respect dependencies.
7. NOTES: Keep general notes and reminders separate from actionable tasks.
8. STRUCTURE: Use correct JSON types for every key and value.";

/// Renders the user prompt for a parsing request.
///
/// Pure and deterministic: the same `text` and `name` always produce the
/// same prompt.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::parser::prompt::build_prompt;
///
/// let prompt = build_prompt("1. Draft outline", Some("Essay"));
/// assert!(prompt.contains("1. Draft outline"));
/// assert!(prompt.contains("with the name: Essay"));
/// ```
pub fn build_prompt(text: &str, name: Option<&str>) -> String {
    let name_hint = match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("with the name: {name}"),
        None => "for which you should infer a fitting name from the content".to_string(),
    };

    format!(
        "Convert the project plan below into structured JSON.\n\
         \n\
         # INPUT\n\
         The following is a project plan text {name_hint}:\n\
         \n\
         ```\n\
         {text}\n\
         ```\n\
         \n\
         # OUTPUT FORMAT\n\
         Return an object with exactly this shape:\n\
         \n\
         {OUTPUT_SHAPE}\n\
         \n\
         # PARSING RULES\n\
         {PARSING_RULES}\n\
         \n\
         # LANGUAGE\n\
         Write every name, description, note and comment in the SAME LANGUAGE as the input text.\n\
         \n\
         # RESPONSE\n\
         Return ONLY the JSON object, without explanations, surrounding prose or markdown fences.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let text = "1. Design API\n2. Build backend";
        assert_eq!(build_prompt(text, Some("API")), build_prompt(text, Some("API")));
        assert_eq!(build_prompt(text, None), build_prompt(text, None));
    }

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let text = "first line\n  indented second line\n- bullet";
        let prompt = build_prompt(text, None);

        assert!(prompt.contains(&format!("```\n{text}\n```")));
        assert!(prompt.contains("infer a fitting name"));
    }

    #[test]
    fn test_prompt_mentions_shape_and_rules() {
        let prompt = build_prompt("anything", Some("Launch"));

        for key in ["\"name\"", "\"notes\"", "\"tasks\"", "\"dependencies\"", "\"comments\"", "\"order\""] {
            assert!(prompt.contains(key), "missing {key}");
        }
        for status in ["Pending", "Working", "Pending For Review", "Complete", "Need Fixed"] {
            assert!(prompt.contains(status), "missing {status}");
        }
        assert!(prompt.contains("8. STRUCTURE"));
        assert!(prompt.contains("SAME LANGUAGE"));
        assert!(prompt.contains("Return ONLY the JSON object"));
    }

    #[test]
    fn test_blank_name_is_inferred() {
        assert!(build_prompt("x", Some("  ")).contains("infer a fitting name"));
    }
}
