//! Response Parser: pulls structured data out of free-text model replies.
//!
//! Every function here is pure and total: a reply that ignores the requested
//! format produces empty containers or the placeholder, never an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

pub mod markdown;

/// Rendered in place of a section the model did not produce.
pub const SECTION_PLACEHOLDER: &str = "<p>Content not available.</p>";

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("valid regex")
});

static TITLE_WITH_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\((.*?)\)$").expect("valid regex"));

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("valid regex"));

const DESCRIPTION_LABELS: &[&str] = &["brief description:", "description:"];
const FIT_LABELS: &[&str] = &[
    "why it might be a good fit:",
    "why it's a good fit:",
    "why it fits:",
    "why this fits:",
    "good fit because:",
    "fit:",
    "why:",
];

/// One step of a career roadmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapStep {
    pub job: String,
    pub duration: Option<String>,
}

/// One alternative career path proposed by the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerSuggestion {
    pub title: String,
    pub description: String,
    pub fit: String,
}

/// Parses the first ```json fenced block. Missing fences, invalid JSON and
/// non-object payloads all yield an empty object.
pub fn extract_json_block(response_text: &str) -> Map<String, Value> {
    let Some(captures) = JSON_FENCE.captures(response_text) else {
        debug!("No JSON fence found in model response");
        return Map::new();
    };

    match serde_json::from_str::<Value>(captures[1].trim()) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!("JSON fence held a non-object value: {}", json_kind(&other));
            Map::new()
        }
        Err(e) => {
            debug!("JSON fence failed to parse: {e}");
            Map::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns the raw Markdown between the line `## {header_text}` and the next
/// `## ` line (or end of text), trimmed. The header is compared literally.
pub fn markdown_section_span<'a>(response_text: &'a str, header_text: &str) -> Option<&'a str> {
    let wanted = format!("## {header_text}");

    let mut offset = 0;
    let mut start = None;
    for line in response_text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let bare = line.trim_end_matches(['\n', '\r']);

        match start {
            None if bare.trim_end() == wanted => start = Some(offset),
            Some(body_start) if bare.starts_with("## ") => {
                return Some(response_text[body_start..line_start].trim());
            }
            _ => {}
        }
    }

    start.map(|body_start| response_text[body_start..].trim())
}

/// Extracts a named Markdown section and renders it to HTML, or returns
/// [`SECTION_PLACEHOLDER`] when the header is absent.
pub fn extract_markdown_section(response_text: &str, header_text: &str) -> String {
    match markdown_section_span(response_text, header_text) {
        Some(span) => markdown::render_html(span),
        None => {
            debug!("Section '{header_text}' not found in model response");
            SECTION_PLACEHOLDER.to_string()
        }
    }
}

/// Splits a one-line roadmap on `|` (or `→` when no pipe is present) into
/// `Title (duration)` steps. Empty segments are kept.
pub fn parse_pipe_delimited_roadmap(text: &str) -> Vec<RoadmapStep> {
    let separator = if text.contains('|') { '|' } else { '→' };

    text.split(separator)
        .map(|segment| {
            let segment = segment.trim();
            match TITLE_WITH_DURATION.captures(segment) {
                Some(caps) => RoadmapStep {
                    job: caps[1].trim().to_string(),
                    duration: Some(caps[2].trim().to_string()),
                },
                None => RoadmapStep {
                    job: segment.to_string(),
                    duration: None,
                },
            }
        })
        .collect()
}

/// Splits a reply into blank-line separated blocks and reads each block with at
/// least three lines as title / description / fit. Shorter blocks are dropped.
pub fn parse_paragraph_suggestions(text: &str) -> Vec<CareerSuggestion> {
    BLANK_LINE
        .split(text.trim())
        .filter_map(|block| {
            let lines: Vec<&str> = block
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();
            if lines.len() < 3 {
                return None;
            }

            let fit = lines[2..]
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let line = clean_line(line);
                    if i == 0 {
                        strip_label(&line, FIT_LABELS)
                    } else {
                        line
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");

            Some(CareerSuggestion {
                title: clean_title(lines[0]),
                description: strip_label(&clean_line(lines[1]), DESCRIPTION_LABELS),
                fit,
            })
        })
        .collect()
}

fn clean_title(line: &str) -> String {
    let line = line.replace("**", "");
    line.trim_start_matches('#')
        .trim()
        .trim_end_matches(':')
        .trim()
        .to_string()
}

fn clean_line(line: &str) -> String {
    let line = line.replace("**", "");
    let line = line.trim();
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line)
        .trim()
        .to_string()
}

fn strip_label(line: &str, labels: &[&str]) -> String {
    let lowered = line.to_lowercase();
    labels
        .iter()
        .find(|label| lowered.starts_with(*label))
        .and_then(|label| line.get(label.len()..))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_else(|| line.to_string())
}
