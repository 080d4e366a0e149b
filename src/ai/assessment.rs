//! Externally judged scoring components: experience relevance, education,
//! achievements
//!
//! Each judge sends the relevant resume section plus the job context to the
//! generative capability and expects `{"score": 0-100, "reasoning": "..."}`.
//! Mock and disabled modes, and any live failure, resolve to fixed
//! per-domain lookup tables so scoring never blocks on the provider.

use super::AiRuntime;
use crate::config::AiMode;
use crate::error::{ResumeMatcherError, Result};
use crate::sections::{
    extract_section, ACHIEVEMENT_HEADINGS, EDUCATION_HEADINGS, EXPERIENCE_HEADINGS,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawAssessment {
    score: f64,
    #[allow(dead_code)]
    reasoning: String,
}

impl RawAssessment {
    fn validated(self) -> Result<u8> {
        if !(0.0..=100.0).contains(&self.score) {
            return Err(ResumeMatcherError::Validation(format!(
                "assessment score {} outside 0-100",
                self.score
            )));
        }
        Ok(self.score.round() as u8)
    }
}

impl AiRuntime {
    /// Quality and relevance of the described work experience, 0-100.
    pub async fn score_experience_relevance(
        &self,
        resume_text: &str,
        job_description: &str,
        domain: &str,
    ) -> u8 {
        if self.mode() != AiMode::Live {
            return mock_relevance_score(domain);
        }

        let section = extract_section(resume_text, EXPERIENCE_HEADINGS)
            .unwrap_or_else(|| "No experience section found".to_string());
        let system = format!(
            "You are an expert recruiter for {domain} roles. Analyze the QUALITY and RELEVANCE \
             of the candidate's work experience. Weigh task complexity (40), impact and \
             outcomes (30), relevance to the target role (20), and leadership (10). Focus on \
             what they accomplished, not where they worked; transferable skills count across \
             domains. Return JSON: {{\"score\": 0-100, \"reasoning\": \"...\"}}"
        );
        let user = format!(
            "Resume experience section:\n{section}\n\nJob description:\n{job_description}\n\n\
             Target role domain: {domain}\n\nScore the candidate's experience relevance (0-100)."
        );

        match self.judge(&system, &user).await {
            Ok(score) => score,
            Err(e) => {
                log::warn!("experience relevance scoring failed ({}), using mock", e);
                mock_relevance_score(domain)
            }
        }
    }

    /// Degree level, field relevance, and academic record, 0-100.
    pub async fn score_education(
        &self,
        resume_text: &str,
        job_description: &str,
        domain: &str,
    ) -> u8 {
        if self.mode() != AiMode::Live {
            return mock_education_score(domain);
        }

        let section = extract_section(resume_text, EDUCATION_HEADINGS)
            .unwrap_or_else(|| "No education section found".to_string());
        let system = format!(
            "You are an expert recruiter for {domain} roles. Score the candidate's EDUCATION \
             (0-100). Weigh degree level (40), field of study (30), academic performance (20), \
             and institution (10). Relevant certifications or strong experience can compensate \
             for degree gaps. Return JSON: {{\"score\": 0-100, \"reasoning\": \"...\"}}"
        );
        let user = format!(
            "Resume education section:\n{section}\n\nJob requirements:\n{job_description}\n\n\
             Target role domain: {domain}\n\nScore the candidate's education (0-100)."
        );

        match self.judge(&system, &user).await {
            Ok(score) => score,
            Err(e) => {
                log::warn!("education scoring failed ({}), using mock", e);
                mock_education_score(domain)
            }
        }
    }

    /// Awards, competitions, publications, 0-100. No achievements at all is
    /// mid-scale, not zero.
    pub async fn score_achievements(
        &self,
        resume_text: &str,
        job_description: &str,
        domain: &str,
    ) -> u8 {
        if self.mode() != AiMode::Live {
            return mock_achievements_score(domain);
        }

        let section = extract_section(resume_text, ACHIEVEMENT_HEADINGS)
            .unwrap_or_else(|| "No achievements section found".to_string());
        let system = format!(
            "You are an expert recruiter for {domain} roles. Score the candidate's ACHIEVEMENTS \
             (0-100). Weigh relevance (40), prestige and impact (30), recency (20), and \
             quantity (10). No achievements is a 50 baseline; irrelevant ones barely move it. \
             Return JSON: {{\"score\": 0-100, \"reasoning\": \"...\"}}"
        );
        let user = format!(
            "Resume achievements section:\n{section}\n\nJob context:\n{job_description}\n\n\
             Target role domain: {domain}\n\nScore the candidate's achievements (0-100)."
        );

        match self.judge(&system, &user).await {
            Ok(score) => score,
            Err(e) => {
                log::warn!("achievements scoring failed ({}), using mock", e);
                mock_achievements_score(domain)
            }
        }
    }

    async fn judge(&self, system: &str, user: &str) -> Result<u8> {
        let client = self.client().ok_or_else(|| {
            ResumeMatcherError::Configuration("no provider client in live mode".to_string())
        })?;
        let value = client.chat_json(system, user, 300).await?;
        let raw: RawAssessment = serde_json::from_value(value)
            .map_err(|e| ResumeMatcherError::Validation(format!("assessment schema: {}", e)))?;
        raw.validated()
    }
}

fn mock_relevance_score(domain: &str) -> u8 {
    match domain {
        "Software Engineering" => 90,
        "Human Resources" => 60,
        "Healthcare" => 70,
        "Finance" => 75,
        "Marketing" => 65,
        _ => 70,
    }
}

fn mock_education_score(domain: &str) -> u8 {
    match domain {
        "Software Engineering" => 85,
        "Human Resources" => 70,
        "Healthcare" => 90,
        "Finance" => 80,
        "Marketing" => 75,
        _ => 75,
    }
}

fn mock_achievements_score(domain: &str) -> u8 {
    match domain {
        "Software Engineering" => 80,
        "Human Resources" => 50,
        "Healthcare" => 70,
        "Finance" => 60,
        "Marketing" => 65,
        _ => 60,
    }
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
    async fn test_mock_scores_are_domain_keyed() {
        let runtime = runtime(AiMode::Mock);
        let se = runtime
            .score_experience_relevance("", "", "Software Engineering")
            .await;
        let hr = runtime
            .score_experience_relevance("", "", "Human Resources")
            .await;
        assert_eq!(se, 90);
        assert_eq!(hr, 60);

        let unknown = runtime.score_education("", "", "Astrology").await;
        assert_eq!(unknown, 75);
    }

    #[tokio::test]
    async fn test_disabled_mode_uses_table_defaults() {
        let runtime = runtime(AiMode::Disabled);
        assert_eq!(runtime.score_achievements("", "", "General").await, 60);
    }

    #[test]
    fn test_assessment_validation() {
        let ok = RawAssessment {
            score: 84.6,
            reasoning: "strong".into(),
        };
        assert_eq!(ok.validated().unwrap(), 85);

        let bad = RawAssessment {
            score: 140.0,
            reasoning: "overflow".into(),
        };
        assert!(bad.validated().is_err());
    }
}
