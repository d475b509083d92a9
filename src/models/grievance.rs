// Grievance classification prompt and result types
// Author: kelexine (https://github.com/kelexine)

use super::gemini::{Content, GenerateContentRequest, InlineData, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Instruction sent alongside every image. Constant across requests.
pub const CLASSIFICATION_PROMPT: &str = concat!(
    "You are an expert grievance classification system. Given an input image showing an issue, you must respond with three things:\n\n",
    "1. Title: A short, 3-6 word heading describing the grievance.\n",
    "2. Description: A short, 2-3 sentence description about the issue shown.\n",
    "3. Category: Choose the most appropriate department that should handle this grievance from the following list: ",
    "Water-department, Electricity-department, Roads-department, Traffic-department, Fire-department, Police-department, ",
    "Health-department, Education-department, Agriculture-department, Other.\n\n",
    "Important:\n",
    "- Select the department based on who can solve the issue, not just matching the photo.\n",
    "- Output should be in strict JSON format like:\n",
    "{\n",
    "  \"title\": \"...\",\n",
    "  \"description\": \"...\",\n",
    "  \"category\": \"...\"\n",
    "}"
);

/// Departments the model is asked to choose from, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Water,
    Electricity,
    Roads,
    Traffic,
    Fire,
    Police,
    Health,
    Education,
    Agriculture,
    Other,
}

impl Department {
    pub const ALL: [Department; 10] = [
        Department::Water,
        Department::Electricity,
        Department::Roads,
        Department::Traffic,
        Department::Fire,
        Department::Police,
        Department::Health,
        Department::Education,
        Department::Agriculture,
        Department::Other,
    ];

    /// Label as it appears in the prompt
    pub fn label(&self) -> &'static str {
        match self {
            Department::Water => "Water-department",
            Department::Electricity => "Electricity-department",
            Department::Roads => "Roads-department",
            Department::Traffic => "Traffic-department",
            Department::Fire => "Fire-department",
            Department::Police => "Police-department",
            Department::Health => "Health-department",
            Department::Education => "Education-department",
            Department::Agriculture => "Agriculture-department",
            Department::Other => "Other",
        }
    }

    /// Match a model-produced category label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the fixed-shape classification payload around a normalized image.
pub fn classification_request(image: InlineData) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: None,
            parts: vec![
                Part::InlineData { inline_data: image },
                Part::Text {
                    text: CLASSIFICATION_PROMPT.to_string(),
                },
            ],
        }],
    }
}

/// What the prompt asks the model to produce.
///
/// Extracted on a best-effort basis for logging. The upstream body is always
/// forwarded untouched whether or not this parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrievanceSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl GrievanceSummary {
    /// Pull the model's JSON answer out of a `generateContent` response body.
    pub fn from_response(body: &Value) -> Option<Self> {
        let parts = body
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect();

        // Models often wrap the object in ```json fences
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }

        serde_json::from_str(&text[start..=end]).ok()
    }

    pub fn department(&self) -> Option<Department> {
        self.category.as_deref().and_then(Department::from_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_lists_every_department_in_order() {
        let listed = Department::ALL
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(", ");
        assert!(CLASSIFICATION_PROMPT.contains(&format!("{}.\n\n", listed)));
    }

    #[test]
    fn test_prompt_ends_with_json_template() {
        assert!(CLASSIFICATION_PROMPT.starts_with("You are an expert grievance classification system."));
        assert!(CLASSIFICATION_PROMPT
            .ends_with("{\n  \"title\": \"...\",\n  \"description\": \"...\",\n  \"category\": \"...\"\n}"));
    }

    #[test]
    fn test_department_from_label() {
        assert_eq!(Department::from_label("Roads-department"), Some(Department::Roads));
        assert_eq!(Department::from_label(" water-DEPARTMENT "), Some(Department::Water));
        assert_eq!(Department::from_label("Other"), Some(Department::Other));
        assert_eq!(Department::from_label("Sanitation"), None);
    }

    #[test]
    fn test_classification_request_shape() {
        let request = classification_request(InlineData {
            mime_type: "image/jpeg".to_string(),
            data: "/9j/".to_string(),
        });
        let value = serde_json::to_value(&request).unwrap();

        let parts = &value["contents"][0]["parts"];
        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "/9j/");
        assert_eq!(parts[1]["text"], CLASSIFICATION_PROMPT);
    }

    #[test]
    fn test_summary_from_fenced_response() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{
                        "text": "```json\n{\"title\": \"Burst water main\", \"description\": \"Water floods the street.\", \"category\": \"Water-department\"}\n```"
                    }]
                }
            }]
        });

        let summary = GrievanceSummary::from_response(&body).unwrap();
        assert_eq!(summary.title.as_deref(), Some("Burst water main"));
        assert_eq!(summary.department(), Some(Department::Water));
    }

    #[test]
    fn test_summary_absent_for_unexpected_body() {
        assert!(GrievanceSummary::from_response(&json!({ "foo": "bar" })).is_none());
        let no_json = json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot help" }] } }]
        });
        assert!(GrievanceSummary::from_response(&no_json).is_none());
    }
}
