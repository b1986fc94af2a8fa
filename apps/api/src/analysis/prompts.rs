// Prompt templates for resume analysis.
//
// The section headers below are shared with the analyzer, which looks them up
// verbatim in the model reply. Change them here only.

pub const PROFILE_TITLE: &str = "🔍 Your Profile Analysis";
pub const MISSING_SKILLS_HEADER: &str = "⚠️ Missing Skills";
pub const RECOMMENDATIONS_HEADER: &str = "🎯 Recommendations";
pub const CAREER_POSITIONING_HEADER: &str = "🌟 Career Positioning Advice";

/// Analysis prompt template.
/// Replace: {job_role}, {reference_skills}, {profile_title}, {missing_header},
///          {recommendations_header}, {positioning_header}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"
You are an expert career advisor and resume analyzer.
The user uploads a resume and is targeting the role: {job_role}

Your task:
1. Extract all readable text from the resume.
2. Summarize the applicant's background in structured form.
3. Compare the extracted skills and experiences with BOTH:
   - (a) the following job dataset information (if relevant): {reference_skills}
   - (b) general industry standards and best practices for the role.
4. Identify:
   - Skills the applicant already has (matched_skills)
   - Missing or weak skills the applicant needs (missing_skills)
   - Recommended next steps (recommendations)
   - Career positioning advice (career_positioning)

Output format:
(1) JSON (for backend processing)
```json
{
  "resume_text": "...",
  "summary": {
    "education": [],
    "experience": [],
    "skills": [],
    "certifications": []
  },
  "analysis": {
    "matched_skills": [],
    "missing_skills": [],
    "recommendations": [],
    "career_positioning": []
  }
}
```

(2) Human-Friendly Career Feedback (Markdown format, visually structured like a report card):

# {profile_title}

## {missing_header}
- List in bullet points

## {recommendations_header}
- Action items with **bold highlights** and clear next steps

## {positioning_header}
- Practical tips on how to improve resume presentation, storytelling, or role positioning
"#;

/// Appended to the analysis prompt when the resume arrives as text instead of an image.
pub const RESUME_TEXT_SUFFIX: &str = r#"
The resume was provided as text rather than an image:
---
{resume_text}
---
"#;

/// Builds the analysis prompt with the dataset's reference skills embedded.
pub fn build_analysis_prompt(job_role: &str, reference_skills: &str) -> String {
    let reference_skills = if reference_skills.trim().is_empty() {
        crate::dataset::ANY_SKILLS
    } else {
        reference_skills
    };

    let template = ANALYSIS_PROMPT_TEMPLATE
        .replace("{profile_title}", PROFILE_TITLE)
        .replace("{missing_header}", MISSING_SKILLS_HEADER)
        .replace("{recommendations_header}", RECOMMENDATIONS_HEADER)
        .replace("{positioning_header}", CAREER_POSITIONING_HEADER);

    // Caller and dataset text go in last, in one pass, so neither is scanned
    // for placeholders.
    template
        .split("{job_role}")
        .map(|piece| piece.replace("{reference_skills}", reference_skills))
        .collect::<Vec<_>>()
        .join(job_role)
}

/// Analysis prompt for a resume supplied as plain text.
pub fn build_text_analysis_prompt(job_role: &str, reference_skills: &str, resume_text: &str) -> String {
    let mut prompt = build_analysis_prompt(job_role, reference_skills);
    prompt.push_str(&RESUME_TEXT_SUFFIX.replace("{resume_text}", resume_text));
    prompt
}
