// Prompt templates for career recommendations, suggestions and roadmaps.
// Only the recommendation prompt carries a fenced-JSON contract; the others are
// read back heuristically by `crate::parsing`.

/// Skill extraction prompt. Replace `{resume_text}`.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = "From the following resume text, extract all key skills. \
Return them as a single, comma-separated string. \
Example: Python, SQL, Project Management, FastAPI.\n\nTEXT: \"{resume_text}\"";

/// Dataset-grounded recommendation prompt.
/// Replace: {candidate_jobs}, {resume_text}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"
You are an expert AI career counselor. Analyze the candidate's resume text and recommend the most suitable careers.

**Candidate Job Titles (shortlisted from our job dataset):**
{candidate_jobs}

**Candidate's Full Resume Text:**
---
{resume_text}
---

**Your Task:**
1. Deeply analyze the candidate's experience and skills from their full resume text.
2. Provide the top 3 career recommendations, preferring the candidate job titles above.
3. For each recommendation, provide a "match_score" (a percentage from 0-100) and a brief "justification".
4. **Strictly** provide your output as a single, clean JSON object.

**JSON Output Format:**
```json
{
  "recommendations": [
    { "job_title": "...", "match_score": 90, "justification": "..." },
    { "job_title": "...", "match_score": 82, "justification": "..." },
    { "job_title": "...", "match_score": 75, "justification": "..." }
  ]
}
```
"#;

/// General-market suggestion prompt. Replace `{profile}`.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = "Based on {profile}, suggest 3 alternative career paths. \
For each path, provide a job title, a brief description, and why it might be a good fit. \
Put the job title, the description and the fit explanation on separate lines, \
and separate the paths with a blank line.";

/// Roadmap prompt. Replace `{current_job}`.
pub const ROADMAP_PROMPT_TEMPLATE: &str = "Generate a detailed career roadmap for a '{current_job}'. \
Provide the output as a single line of text, with each job and duration separated by a '|' character. \
For example: Junior Software Engineer (0-3 years) | Software Engineer (3-5 years) | Senior Software Engineer (5+ years)";

/// What the suggestion prompt is grounded on.
#[derive(Debug, Clone, Copy)]
pub enum SuggestionProfile<'a> {
    /// Full resume text, as used by the aggregator.
    ResumeText(&'a str),
    /// Skills and experience lifted from an earlier analysis.
    Summary {
        skills: &'a [String],
        experience: &'a [String],
    },
}

pub fn build_skill_extraction_prompt(resume_text: &str) -> String {
    SKILL_EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

pub fn build_recommendation_prompt(resume_text: &str, candidate_job_titles: &[String]) -> String {
    let candidate_jobs = candidate_job_titles
        .iter()
        .map(|title| format!("- {title}"))
        .collect::<Vec<_>>()
        .join("\n");

    RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{candidate_jobs}", &candidate_jobs)
        .replace("{resume_text}", resume_text)
}

pub fn build_suggestion_prompt(profile: SuggestionProfile<'_>) -> String {
    match profile {
        SuggestionProfile::ResumeText(text) => {
            let mut prompt = SUGGESTION_PROMPT_TEMPLATE.replace("{profile}", "the resume below");
            prompt.push_str(&format!("\n\nRESUME:\n---\n{text}\n---"));
            prompt
        }
        SuggestionProfile::Summary { skills, experience } => {
            let profile = format!(
                "the following skills: {} and experience: {}",
                list_literal(skills),
                list_literal(experience)
            );
            SUGGESTION_PROMPT_TEMPLATE.replace("{profile}", &profile)
        }
    }
}

pub fn build_roadmap_prompt(current_job: &str) -> String {
    ROADMAP_PROMPT_TEMPLATE.replace("{current_job}", current_job)
}

fn list_literal(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
