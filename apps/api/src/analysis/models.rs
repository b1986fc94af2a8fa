use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeSummary {
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillAnalysis {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    pub career_positioning: Vec<String>,
}

/// Structured half of an analysis reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub resume_text: String,
    pub summary: ResumeSummary,
    pub analysis: SkillAnalysis,
}

impl AnalysisResult {
    /// Reads the fenced JSON object field by field. Missing or mistyped fields
    /// become empty values instead of failing the whole result.
    pub fn from_json(map: &Map<String, Value>) -> Self {
        let summary = map.get("summary");
        let analysis = map.get("analysis");

        Self {
            resume_text: map
                .get("resume_text")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            summary: ResumeSummary {
                education: string_list(summary, "education"),
                experience: string_list(summary, "experience"),
                skills: string_list(summary, "skills"),
                certifications: string_list(summary, "certifications"),
            },
            analysis: SkillAnalysis {
                matched_skills: string_list(analysis, "matched_skills"),
                missing_skills: string_list(analysis, "missing_skills"),
                recommendations: string_list(analysis, "recommendations"),
                career_positioning: string_list(analysis, "career_positioning"),
            },
        }
    }
}

/// Scalars are stringified; nested objects (e.g. `{"degree": .., "school": ..}`)
/// are flattened to their scalar values joined with ", ".
fn string_list(parent: Option<&Value>, key: &str) -> Vec<String> {
    parent
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_array())
        .map(|items| items.iter().filter_map(stringify).collect())
        .unwrap_or_default()
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(fields) => {
            let parts: Vec<String> = fields.values().filter_map(stringify).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Array(_) | Value::Null => None,
    }
}
