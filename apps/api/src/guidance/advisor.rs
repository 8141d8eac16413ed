//! Career actions: one function per user action.
//!
//! Each action builds a prompt, makes exactly one completion call and structures
//! the reply. Errors from the completion client are returned as-is so the HTTP
//! layer can tell a missing credential from a failed call.

use std::sync::Arc;

use tracing::info;

use crate::guidance::prompts::{build_prompt, PromptFields, PromptTemplate};
use crate::guidance::structurer::{structure, ParseMode, Plain, ResourceList};
use crate::llm_client::{CompletionClient, CompletionRequest, LlmError};
use crate::models::career::{display_list, JobQuery, LearningResource, UserProfile};
use crate::models::resume::ResumeDocument;

/// Model and temperature applied to every call.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
}

#[derive(Clone)]
pub struct CareerAdvisor {
    client: Arc<dyn CompletionClient>,
    settings: CompletionSettings,
}

impl CareerAdvisor {
    pub fn new(client: Arc<dyn CompletionClient>, settings: CompletionSettings) -> Self {
        Self { client, settings }
    }

    /// Recommends a single career domain.
    pub async fn recommend_domain(&self, profile: &UserProfile) -> Result<String, LlmError> {
        info!(
            "Recommending domain for {} skills / {} interests",
            profile.skills.len(),
            profile.interests.len()
        );
        let fields = PromptFields::new()
            .with("skills", display_list(&profile.skills))
            .with("interests", display_list(&profile.interests));
        self.complete::<Plain>(PromptTemplate::DomainRecommendation, &fields)
            .await
    }

    /// Learning resources for a domain. Always returns dereferenceable links.
    pub async fn learning_resources(&self, domain: &str) -> Result<Vec<LearningResource>, LlmError> {
        info!("Fetching learning resources for domain");
        let fields = PromptFields::new().with("domain", domain);
        self.complete::<ResourceList>(PromptTemplate::LearningResources, &fields)
            .await
    }

    pub async fn job_preparation_guide(&self, query: &JobQuery) -> Result<String, LlmError> {
        info!("Generating job preparation guide");
        let fields = PromptFields::new().with("job_title", query.title.trim());
        self.complete::<Plain>(PromptTemplate::JobPreparation, &fields)
            .await
    }

    pub async fn skill_gap(&self, query: &JobQuery) -> Result<String, LlmError> {
        info!("Analyzing skill gap");
        let current = query
            .current_skills
            .as_deref()
            .map(display_list)
            .unwrap_or_default();
        let fields = PromptFields::new()
            .with("current_skills", current)
            .with("target_job", query.title.trim());
        self.complete::<Plain>(PromptTemplate::SkillGap, &fields)
            .await
    }

    /// Rewrites the résumé to match `job_description`.
    pub async fn optimize_resume(
        &self,
        job_description: &str,
        resume: &ResumeDocument,
    ) -> Result<String, LlmError> {
        info!(
            "Optimizing resume ({} chars) against job description ({} chars)",
            resume.source_text.len(),
            job_description.len()
        );
        let fields = PromptFields::new()
            .with("job_description", job_description)
            .with("resume_text", resume.source_text.as_str());
        self.complete::<Plain>(PromptTemplate::ResumeOptimization, &fields)
            .await
    }

    /// Prompt → one completion call → reply structured per `M`.
    async fn complete<M: ParseMode>(
        &self,
        template: PromptTemplate,
        fields: &PromptFields,
    ) -> Result<M::Output, LlmError> {
        let prompt = build_prompt(template, fields);
        let request =
            CompletionRequest::new(prompt, &self.settings.model, self.settings.temperature)?;
        let result = self.client.complete(&request).await?;
        Ok(structure::<M>(&result.raw_text))
    }
}
