//! Skill, requirement, and domain extraction backed by the generative
//! capability
//!
//! Disabled mode returns empty/neutral defaults, mock mode returns fixed
//! sample data, and live mode calls the provider through a strict
//! schema-validated boundary. A live response that fails validation is
//! treated exactly like an outage: the mock data takes over.

use super::AiRuntime;
use crate::config::AiMode;
use crate::error::{ResumeMatcherError, Result};
use crate::types::{ExtractedSkills, JobRequirements, SkillSource};
use serde::Deserialize;

/// Boundary schema for skill extraction responses. Missing or mistyped
/// fields fail deserialization and trigger the fallback.
#[derive(Debug, Deserialize)]
struct RawExtractedSkills {
    technical_skills: Vec<String>,
    soft_skills: Vec<String>,
    tools: Vec<String>,
    certifications: Vec<String>,
    domain_keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawJobRequirements {
    required_skills: Vec<String>,
    preferred_skills: Vec<String>,
    experience_requirements: Vec<String>,
}

fn source_label(source: SkillSource) -> &'static str {
    match source {
        SkillSource::Resume => "resume",
        SkillSource::JobDescription => "job description",
    }
}

impl AiRuntime {
    /// Extract categorized skills from resume or job text.
    pub async fn extract_skills(
        &self,
        text: &str,
        source: SkillSource,
        domain: Option<&str>,
    ) -> ExtractedSkills {
        match self.mode() {
            AiMode::Disabled => ExtractedSkills::default(),
            AiMode::Mock => mock_extracted_skills(),
            AiMode::Live => match self.extract_skills_live(text, source, domain).await {
                Ok(skills) => skills,
                Err(e) => {
                    log::warn!("skill extraction failed ({}), using mock data", e);
                    mock_extracted_skills()
                }
            },
        }
    }

    async fn extract_skills_live(
        &self,
        text: &str,
        source: SkillSource,
        domain: Option<&str>,
    ) -> Result<ExtractedSkills> {
        let client = self.client().ok_or_else(|| {
            ResumeMatcherError::Configuration("no provider client in live mode".to_string())
        })?;

        let context = source_label(source);
        let domain_context = domain
            .map(|d| format!(" for a {} position", d))
            .unwrap_or_default();
        let focus = match source {
            SkillSource::Resume => "demonstrated capabilities",
            SkillSource::JobDescription => "required qualifications",
        };

        let system = format!(
            "You are an expert career advisor. Extract all relevant skills, qualifications, \
             and keywords from the provided text.\n\
             Context: this is a {context}{domain_context}.\n\
             Return a JSON object with exactly these keys, each an array of strings:\n\
             {{\"technical_skills\": [], \"soft_skills\": [], \"tools\": [], \
             \"certifications\": [], \"domain_keywords\": []}}\n\
             Normalize variations (\"React.js\" -> \"React\"), include implied skills, \
             and focus on {focus}. Return only the JSON object."
        );
        let user = format!("Extract skills from this {context}:\n\n{text}");

        let value = client.chat_json(&system, &user, 800).await?;
        let raw: RawExtractedSkills = serde_json::from_value(value)
            .map_err(|e| ResumeMatcherError::Validation(format!("skill extraction schema: {}", e)))?;

        Ok(ExtractedSkills {
            technical_skills: raw.technical_skills,
            soft_skills: raw.soft_skills,
            tools: raw.tools,
            certifications: raw.certifications,
            domain_keywords: raw.domain_keywords,
            all_skills: Vec::new(),
        }
        .with_all_skills())
    }

    /// Extract structured requirements from a job description.
    pub async fn extract_requirements(
        &self,
        job_description: &str,
        domain: Option<&str>,
    ) -> JobRequirements {
        match self.mode() {
            AiMode::Disabled => JobRequirements::default(),
            AiMode::Mock => mock_job_requirements(),
            AiMode::Live => match self.extract_requirements_live(job_description, domain).await {
                Ok(requirements) => requirements,
                Err(e) => {
                    log::warn!("requirement extraction failed ({}), using mock data", e);
                    mock_job_requirements()
                }
            },
        }
    }

    async fn extract_requirements_live(
        &self,
        job_description: &str,
        domain: Option<&str>,
    ) -> Result<JobRequirements> {
        let client = self.client().ok_or_else(|| {
            ResumeMatcherError::Configuration("no provider client in live mode".to_string())
        })?;

        let domain_context = domain.map(|d| format!(" in {}", d)).unwrap_or_default();
        let system = format!(
            "You are an expert career advisor. Extract and categorize job requirements from \
             the job description{domain_context}.\n\
             Return a JSON object with exactly these keys, each an array of strings:\n\
             {{\"required_skills\": [], \"preferred_skills\": [], \"experience_requirements\": []}}\n\
             Distinguish \"must have\"/\"required\" from \"nice to have\"/\"preferred\". \
             Normalize skill names. Keep experience requirements (\"5+ years\", degrees) out of \
             the skills arrays. Return only the JSON object."
        );
        let user = format!("Extract requirements from this job description:\n\n{job_description}");

        let value = client.chat_json(&system, &user, 800).await?;
        let raw: RawJobRequirements = serde_json::from_value(value).map_err(|e| {
            ResumeMatcherError::Validation(format!("requirement extraction schema: {}", e))
        })?;

        Ok(JobRequirements {
            required_skills: raw.required_skills,
            preferred_skills: raw.preferred_skills,
            experience_requirements: raw.experience_requirements,
            all_required_skills: Vec::new(),
        }
        .with_all_required())
    }

    /// Detect the job's industry/category label. Falls back to "General".
    pub async fn detect_domain(&self, job_description: &str) -> String {
        match self.mode() {
            AiMode::Disabled | AiMode::Mock => "General".to_string(),
            AiMode::Live => match self.detect_domain_live(job_description).await {
                Ok(domain) => domain,
                Err(e) => {
                    log::warn!("domain detection failed ({}), using \"General\"", e);
                    "General".to_string()
                }
            },
        }
    }

    async fn detect_domain_live(&self, job_description: &str) -> Result<String> {
        let client = self.client().ok_or_else(|| {
            ResumeMatcherError::Configuration("no provider client in live mode".to_string())
        })?;

        let system = "You are an expert at categorizing job postings. Identify the primary \
                      industry or job domain from the job description. Return a single concise \
                      domain name (2-4 words), e.g. \"Software Engineering\", \"Healthcare\", \
                      \"Financial Services\". Return only the domain name.";
        let excerpt: String = job_description.chars().take(1000).collect();
        let user = format!("Identify the domain:\n\n{excerpt}");

        let domain = client.chat_text(system, &user, 20).await?;
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(ResumeMatcherError::Validation(
                "empty domain label".to_string(),
            ));
        }
        Ok(domain.to_string())
    }
}

/// Fixed sample skills for mock mode.
pub(crate) fn mock_extracted_skills() -> ExtractedSkills {
    ExtractedSkills {
        technical_skills: vec![
            "React".into(),
            "TypeScript".into(),
            "Node.js".into(),
            "Python".into(),
            "SQL".into(),
        ],
        soft_skills: vec![
            "Leadership".into(),
            "Communication".into(),
            "Problem Solving".into(),
            "Teamwork".into(),
        ],
        tools: vec!["Git".into(), "Docker".into(), "VS Code".into(), "Jira".into()],
        certifications: vec![
            "Bachelor's in Computer Science".into(),
            "AWS Certified".into(),
        ],
        domain_keywords: vec!["Agile".into(), "CI/CD".into(), "Microservices".into()],
        all_skills: Vec::new(),
    }
    .with_all_skills()
}

/// Fixed sample requirements for mock mode.
pub(crate) fn mock_job_requirements() -> JobRequirements {
    JobRequirements {
        required_skills: vec![
            "React".into(),
            "TypeScript".into(),
            "3+ years experience".into(),
        ],
        preferred_skills: vec!["AWS".into(), "Docker".into(), "GraphQL".into()],
        experience_requirements: vec![
            "Bachelor's degree".into(),
            "5+ years in software development".into(),
        ],
        all_required_skills: Vec::new(),
    }
    .with_all_required()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;

    fn runtime(mode: AiMode) -> AiRuntime {
        AiRuntime::new(&AiConfig {
            mode,
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            embedding_model: "text-embedding-3-small".into(),
            timeout_ms: 1000,
        })
    }

    #[tokio::test]
    async fn test_disabled_mode_returns_neutral_defaults() {
        let runtime = runtime(AiMode::Disabled);
        let skills = runtime
            .extract_skills("text", SkillSource::Resume, None)
            .await;
        assert!(skills.all_skills.is_empty());

        let requirements = runtime.extract_requirements("text", None).await;
        assert!(requirements.all_required_skills.is_empty());

        assert_eq!(runtime.detect_domain("text").await, "General");
    }

    #[tokio::test]
    async fn test_mock_mode_returns_samples() {
        let runtime = runtime(AiMode::Mock);
        let skills = runtime
            .extract_skills("text", SkillSource::Resume, None)
            .await;
        assert!(skills.all_skills.contains(&"React".to_string()));
        assert_eq!(skills.all_skills.len(), 18);

        let requirements = runtime.extract_requirements("text", None).await;
        assert_eq!(requirements.all_required_skills.len(), 6);
        assert!(requirements
            .required_skills
            .contains(&"TypeScript".to_string()));
    }

    #[test]
    fn test_raw_schema_rejects_missing_fields() {
        let value = serde_json::json!({ "technical_skills": ["React"] });
        assert!(serde_json::from_value::<RawExtractedSkills>(value).is_err());
    }

    #[test]
    fn test_raw_schema_rejects_nested_objects() {
        let value = serde_json::json!({
            "technical_skills": { "frontend": ["React"] },
            "soft_skills": [],
            "tools": [],
            "certifications": [],
            "domain_keywords": [],
        });
        assert!(serde_json::from_value::<RawExtractedSkills>(value).is_err());
    }
}
