//! Prompt templates for every career action, and the builder that fills them.
//!
//! Fields are substituted verbatim in a single pass: a value that itself
//! contains `{placeholder}` text is never re-expanded. Unset fields render as
//! an empty string.

use std::collections::HashMap;

/// Domain recommendation. Fields: {skills}, {interests}
pub const DOMAIN_RECOMMENDATION_TEMPLATE: &str =
    "Suggest the best career domain for someone with skills: {skills} and interests: {interests}.";

/// Learning resources. Fields: {domain}
pub const LEARNING_RESOURCES_TEMPLATE: &str = "\
Provide 5 top learning resources (title & link) for the career domain: {domain}.
Put each resource on its own line in the form: Title - https://link
Do NOT number the lines or add any other text.";

/// Job preparation guide. Fields: {job_title}
pub const JOB_PREPARATION_TEMPLATE: &str =
    "Provide a detailed preparation guide for the job: {job_title}.";

/// Skill gap analysis. Fields: {current_skills}, {target_job}
pub const SKILL_GAP_TEMPLATE: &str =
    "Analyze the skill gap for someone with current skills: {current_skills} aiming for job: {target_job}.";

/// Résumé optimization. Fields: {job_description}, {resume_text}
pub const RESUME_OPTIMIZATION_TEMPLATE: &str = "\
Optimize the following resume to match this job description:

Job Description:
{job_description}

Resume:
{resume_text}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptTemplate {
    DomainRecommendation,
    LearningResources,
    JobPreparation,
    SkillGap,
    ResumeOptimization,
}

impl PromptTemplate {
    pub fn text(self) -> &'static str {
        match self {
            PromptTemplate::DomainRecommendation => DOMAIN_RECOMMENDATION_TEMPLATE,
            PromptTemplate::LearningResources => LEARNING_RESOURCES_TEMPLATE,
            PromptTemplate::JobPreparation => JOB_PREPARATION_TEMPLATE,
            PromptTemplate::SkillGap => SKILL_GAP_TEMPLATE,
            PromptTemplate::ResumeOptimization => RESUME_OPTIMIZATION_TEMPLATE,
        }
    }

    /// The fixed field set of this template.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            PromptTemplate::DomainRecommendation => &["skills", "interests"],
            PromptTemplate::LearningResources => &["domain"],
            PromptTemplate::JobPreparation => &["job_title"],
            PromptTemplate::SkillGap => &["current_skills", "target_job"],
            PromptTemplate::ResumeOptimization => &["job_description", "resume_text"],
        }
    }
}

/// Field values keyed by placeholder name.
#[derive(Debug, Clone, Default)]
pub struct PromptFields {
    values: HashMap<&'static str, String>,
}

impl PromptFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Renders `template` with `fields`. Pure and deterministic.
pub fn build_prompt(template: PromptTemplate, fields: &PromptFields) -> String {
    let known = template.fields();
    let text = template.text();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if known.contains(&&after[..close]) => {
                out.push_str(fields.get(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
