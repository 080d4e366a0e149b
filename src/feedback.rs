//! Feedback synthesis: matches and gaps into structured improvement advice
//!
//! Live mode asks the generative capability for both the legacy flat lists
//! and the per-category structure, behind a strict validated boundary.
//! Anything else (mock mode, disabled mode, transport failure, schema
//! failure, out-of-bounds list lengths) resolves to the domain-keyed static
//! tables, so a candidate always gets feedback.

use crate::ai::AiRuntime;
use crate::config::AiMode;
use crate::error::{ResumeMatcherError, Result};
use crate::types::{
    AtsCompatibilityData, ComprehensiveFeedback, EducationCredentialsData, ImpactAchievementsData,
    JobRequirements, MatchOverviewData, ProfessionalQualityData, Relevance, RequiredSkillsData,
    SkillMatch, WorkExperienceData,
};

pub struct FeedbackParams<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub domain: &'a str,
    pub matches: &'a [SkillMatch],
    pub requirements: &'a JobRequirements,
}

/// List-length bounds the synthesizer must respect. A response outside them
/// is discarded wholesale rather than partially trusted.
fn validate(feedback: &ComprehensiveFeedback) -> Result<()> {
    fn check(name: &str, len: usize, min: usize, max: usize) -> Result<()> {
        if len < min || len > max {
            return Err(ResumeMatcherError::Validation(format!(
                "{} has {} entries, expected {}-{}",
                name, len, min, max
            )));
        }
        Ok(())
    }

    check("strengthAreas", feedback.strength_areas.len(), 3, 5)?;
    check("improvementAreas", feedback.improvement_areas.len(), 3, 5)?;
    check("atsTips", feedback.ats_tips.len(), 5, 7)?;
    check("suggestedBullets", feedback.suggested_bullets.len(), 5, 8)?;
    Ok(())
}

impl AiRuntime {
    /// Generate comprehensive feedback for the analyzed pair.
    pub async fn generate_feedback(&self, params: &FeedbackParams<'_>) -> ComprehensiveFeedback {
        if self.mode() != AiMode::Live {
            return mock_feedback(params.domain);
        }

        match self.generate_feedback_live(params).await {
            Ok(feedback) => feedback,
            Err(e) => {
                log::warn!("feedback generation failed ({}), using mock table", e);
                mock_feedback(params.domain)
            }
        }
    }

    async fn generate_feedback_live(
        &self,
        params: &FeedbackParams<'_>,
    ) -> Result<ComprehensiveFeedback> {
        let client = self.client().ok_or_else(|| {
            ResumeMatcherError::Configuration("no provider client in live mode".to_string())
        })?;

        let matched: Vec<&str> = params
            .matches
            .iter()
            .filter(|m| m.relevance == Relevance::High)
            .map(|m| m.resume_skill.as_str())
            .take(10)
            .collect();
        let missing: Vec<&str> = params
            .requirements
            .required_skills
            .iter()
            .filter(|skill| {
                !params.matches.iter().any(|m| {
                    m.relevance != Relevance::Low
                        && m.job_skill.to_lowercase().contains(&skill.to_lowercase())
                })
            })
            .map(|s| s.as_str())
            .take(10)
            .collect();

        let domain = params.domain;
        let system = format!(
            "You are an expert career advisor specializing in {domain}. Analyze this resume \
             against the job description and return comprehensive, actionable feedback as one \
             JSON object.\n\
             Legacy fields (required): strengthAreas (3-5, only strengths relevant to the \
             {domain} role; prefer transferable skills on a domain mismatch), improvementAreas \
             (3-5), experienceGaps, relevantExperiences, atsTips (5-7), suggestedBullets (5-8, \
             STAR method with metrics).\n\
             Category fields (each an object): matchOverview {{topStrengths, topImprovements, \
             priorityActions}}, requiredSkills {{skillGaps, missingCriticalSkills}}, \
             workExperience {{durationAnalysis, relevantExperiences, experienceGaps}}, \
             educationCredentials {{educationMatch, missingCredentials}}, impactAchievements \
             {{currentAchievements, missingMetrics}}, atsCompatibility {{atsIssues, \
             missingKeywords, formattingProblems}}, professionalQuality {{writingIssues, \
             consistencyProblems, formattingConcerns}}.\n\
             Derive experience claims from actual work-history dates; never treat \"N+ years\" \
             requirements as missing skills. Be specific, honest, and encouraging. Return only \
             valid JSON."
        );
        let user = format!(
            "Resume:\n{resume}\n\nJob description:\n{job}\n\nSkill analysis:\n\
             - Matched skills (high relevance): {matched}\n\
             - Missing required skills: {missing}\n\
             - Experience requirements from the job: {experience}\n\
             Target role domain: {domain}\n\nProvide comprehensive feedback in JSON format.",
            resume = params.resume_text,
            job = params.job_description,
            matched = if matched.is_empty() { "None".to_string() } else { matched.join(", ") },
            missing = if missing.is_empty() { "None".to_string() } else { missing.join(", ") },
            experience = params.requirements.experience_requirements.join(", "),
        );

        let value = client.chat_json(&system, &user, 1500).await?;
        let feedback: ComprehensiveFeedback = serde_json::from_value(value)
            .map_err(|e| ResumeMatcherError::Validation(format!("feedback schema: {}", e)))?;
        validate(&feedback)?;
        Ok(feedback)
    }
}

/// Domain-keyed static feedback used whenever the live path is unavailable.
pub fn mock_feedback(domain: &str) -> ComprehensiveFeedback {
    match domain {
        "Software Engineering" => software_engineering_feedback(),
        "Human Resources" => human_resources_feedback(),
        _ => generic_feedback(),
    }
}

fn vecs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn software_engineering_feedback() -> ComprehensiveFeedback {
    ComprehensiveFeedback {
        strength_areas: vecs(&[
            "Strong technical foundation with demonstrated hands-on experience in modern web development",
            "Excellent track record of leading teams and mentoring junior developers",
            "Clear evidence of problem-solving skills with quantifiable impact",
            "Good balance of technical and soft skills relevant to the role",
        ]),
        improvement_areas: vecs(&[
            "Add more specific metrics to quantify achievements",
            "Highlight experience with modern tools and frameworks mentioned in the job description",
            "Expand on leadership experiences to better align with senior-level expectations",
        ]),
        experience_gaps: vecs(&[
            "No explicit mention of cloud platform experience (AWS/Azure/GCP)",
            "Limited evidence of experience with CI/CD pipelines and DevOps practices",
            "Missing specific examples of cross-functional collaboration",
        ]),
        relevant_experiences: vecs(&[
            "Led TypeScript migration project - directly relevant to role requirements",
            "Experience with React and modern web development aligns well",
            "Demonstrated leadership through team management and mentorship",
        ]),
        ats_tips: vecs(&[
            "Add a 'Technical Skills' section with explicit keywords: React, TypeScript, Node.js",
            "Include the exact job title or similar variations in your resume",
            "Use standard section headers: 'Experience', 'Education', 'Skills'",
            "Spell out acronyms on first use (e.g., 'CI/CD')",
            "Use bullet points instead of paragraphs for better readability",
        ]),
        suggested_bullets: vecs(&[
            "Led a team of 5 developers in migrating a legacy application to React and TypeScript, resulting in 40% faster load times",
            "Architected and implemented microservices using Node.js and Docker, reducing deployment time by 60%",
            "Mentored 3 junior developers through code reviews and pair programming, resulting in 2 promotions within 12 months",
            "Collaborated with product managers to deliver 15+ features, maintaining 98% on-time delivery rate",
            "Implemented testing strategy using Jest, achieving 85% code coverage and reducing production bugs by 50%",
        ]),
        match_overview: Some(MatchOverviewData {
            top_strengths: vecs(&[
                "Strong technical foundation in modern web development",
                "Excellent leadership and team management experience",
                "Proven problem-solving skills with quantifiable impact",
            ]),
            top_improvements: vecs(&[
                "Add more specific metrics to quantify achievements",
                "Highlight cloud platform and DevOps experience",
                "Expand on cross-functional collaboration examples",
            ]),
            priority_actions: vecs(&[
                "Add cloud platform experience (AWS/Azure/GCP) to skills section",
                "Include specific metrics in all achievement bullets",
                "Highlight CI/CD and DevOps experience more prominently",
            ]),
            action_items: Vec::new(),
        }),
        required_skills: Some(RequiredSkillsData {
            skill_gaps: vecs(&[
                "Missing: Cloud platforms (AWS/Azure/GCP) (critical)",
                "Limited: CI/CD pipelines and DevOps practices (important)",
                "Missing: Container orchestration (nice-to-have)",
            ]),
            missing_critical_skills: vecs(&["AWS/Azure/GCP", "CI/CD pipelines"]),
            action_items: Vec::new(),
        }),
        work_experience: Some(WorkExperienceData {
            duration_analysis: "Experience duration aligns with senior-level expectations, but cloud \
                                and DevOps gaps need to be addressed."
                .to_string(),
            relevant_experiences: vecs(&[
                "TypeScript migration project - directly relevant",
                "React and modern web development experience",
                "Team leadership and mentorship",
            ]),
            experience_gaps: vecs(&[
                "No explicit cloud platform experience",
                "Limited CI/CD and DevOps experience",
            ]),
            action_items: Vec::new(),
        }),
        education_credentials: Some(EducationCredentialsData {
            education_match: "Technical degree provides a strong foundation aligned with the role."
                .to_string(),
            missing_credentials: vecs(&["Cloud certifications (AWS, Azure, or GCP) would strengthen the profile"]),
            action_items: Vec::new(),
        }),
        impact_achievements: Some(ImpactAchievementsData {
            current_achievements: vecs(&[
                "Led team of 5 developers",
                "Reduced deployment time by 60%",
                "Achieved 85% code coverage",
            ]),
            missing_metrics: vecs(&[
                "Add specific performance improvement percentages",
                "Quantify business impact of projects",
            ]),
            action_items: Vec::new(),
        }),
        ats_compatibility: Some(AtsCompatibilityData {
            ats_issues: vecs(&["Technical skills section could be more explicit"]),
            missing_keywords: vecs(&["AWS", "CI/CD", "Microservices", "Docker"]),
            formatting_problems: vecs(&["Consider adding a dedicated technical skills section"]),
            action_items: Vec::new(),
        }),
        professional_quality: Some(ProfessionalQualityData {
            writing_issues: vecs(&["Some bullets could include more metrics"]),
            consistency_problems: vecs(&["Date formats are consistent"]),
            formatting_concerns: vecs(&["Consider adding a professional summary"]),
            action_items: Vec::new(),
        }),
    }
}

fn human_resources_feedback() -> ComprehensiveFeedback {
    ComprehensiveFeedback {
        strength_areas: vecs(&[
            "Demonstrated leadership experience managing teams, which translates well to HR team management",
            "Strong stakeholder engagement and communication skills across functions",
            "Experience in process improvement, valuable for HR process development",
            "Proven ability to manage multiple priorities and deliver on time",
        ]),
        improvement_areas: vecs(&[
            "Gain direct experience in HR functions such as compensation, onboarding, and performance management",
            "Include relevant HR coursework or certifications",
            "Add a summary statement highlighting transferable skills",
        ]),
        experience_gaps: vecs(&[
            "No direct experience in compensation and benefits administration",
            "Limited evidence of experience with employee onboarding processes",
            "Missing examples of performance management processes",
        ]),
        relevant_experiences: vecs(&[
            "Led sub-teams and managed interns - demonstrates team management skills",
            "Engaged with stakeholders across functions - shows communication abilities",
            "Conducted structured reviews - indicates process orientation",
        ]),
        ats_tips: vecs(&[
            "Add 'Human Resources' and related keywords to the skills section",
            "Include any HR coursework or certifications in a separate section",
            "Use clear headings and bullet points for better ATS readability",
            "Incorporate HR action verbs like 'administered', 'developed', 'implemented'",
            "Ensure the resume is in a standard ATS-friendly format",
        ]),
        suggested_bullets: vecs(&[
            "Led cross-functional teams and mentored interns, fostering collaborative environments and improving team productivity",
            "Engaged with stakeholders to gather requirements and align goals, demonstrating strong relationship-building skills",
            "Implemented process improvements that enhanced efficiency and reduced delivery times",
            "Managed multiple concurrent projects while maintaining high quality standards",
            "Documented project requirements systematically, highlighting attention to detail",
        ]),
        match_overview: Some(MatchOverviewData {
            top_strengths: vecs(&[
                "Strong leadership and team management experience",
                "Excellent communication and stakeholder engagement skills",
                "Proven ability to deliver results",
            ]),
            top_improvements: vecs(&[
                "Gain direct HR experience in compensation and benefits",
                "Add HR-specific certifications or coursework",
                "Highlight transferable skills more prominently",
            ]),
            priority_actions: vecs(&[
                "Complete an HR certification or relevant coursework",
                "Add HR keywords and terminology to the skills section",
                "Rewrite experience bullets to emphasize HR-relevant skills",
            ]),
            action_items: Vec::new(),
        }),
        required_skills: Some(RequiredSkillsData {
            skill_gaps: vecs(&[
                "Missing: HRIS systems (critical)",
                "Missing: Compensation and benefits administration (critical)",
                "Limited: Employee relations experience (important)",
            ]),
            missing_critical_skills: vecs(&[
                "HRIS systems",
                "Compensation and benefits administration",
            ]),
            action_items: Vec::new(),
        }),
        work_experience: Some(WorkExperienceData {
            duration_analysis: "Experience demonstrates transferable leadership skills but lacks \
                                direct HR exposure."
                .to_string(),
            relevant_experiences: vecs(&[
                "Team leadership and intern management",
                "Stakeholder engagement and communication",
            ]),
            experience_gaps: vecs(&[
                "No direct experience in HR functions",
                "Missing performance management experience",
            ]),
            action_items: Vec::new(),
        }),
        education_credentials: Some(EducationCredentialsData {
            education_match: "Background provides analytical strength but lacks formal HR \
                              education or certifications."
                .to_string(),
            missing_credentials: vecs(&[
                "HR certification (SHRM, PHR, or equivalent)",
                "HR-related coursework or training",
            ]),
            action_items: Vec::new(),
        }),
        impact_achievements: Some(ImpactAchievementsData {
            current_achievements: vecs(&[
                "Led teams and managed multiple interns",
                "Implemented process improvements",
            ]),
            missing_metrics: vecs(&[
                "Add specific numbers for team size managed",
                "Quantify process improvement impact",
            ]),
            action_items: Vec::new(),
        }),
        ats_compatibility: Some(AtsCompatibilityData {
            ats_issues: vecs(&["Missing HR-specific keywords in skills section"]),
            missing_keywords: vecs(&["Human Resources", "HRIS", "Employee Relations"]),
            formatting_problems: vecs(&["Consider adding a dedicated HR skills section"]),
            action_items: Vec::new(),
        }),
        professional_quality: Some(ProfessionalQualityData {
            writing_issues: vecs(&["Some bullet points could be more concise"]),
            consistency_problems: vecs(&["Terminology is consistent within domain"]),
            formatting_concerns: vecs(&["Consider adding a professional summary section"]),
            action_items: Vec::new(),
        }),
    }
}

fn generic_feedback() -> ComprehensiveFeedback {
    ComprehensiveFeedback {
        strength_areas: vecs(&[
            "Strong analytical and problem-solving skills demonstrated through project work",
            "Excellent communication and collaboration abilities",
            "Proven track record of delivering results and meeting deadlines",
            "Adaptable and quick learner with diverse experience",
        ]),
        improvement_areas: vecs(&[
            "Add more specific metrics to quantify achievements",
            "Highlight experience relevant to the target role",
            "Expand on transferable skills that align with job requirements",
        ]),
        experience_gaps: vecs(&[
            "Limited direct experience in the target domain",
            "Missing specific skills mentioned in the job description",
        ]),
        relevant_experiences: vecs(&[
            "Demonstrated leadership and team management skills",
            "Strong communication and stakeholder engagement abilities",
            "Proven ability to deliver projects on time and within scope",
        ]),
        ats_tips: vecs(&[
            "Add relevant keywords from the job description to your skills section",
            "Use clear headings and bullet points for better readability",
            "Include quantifiable achievements where possible",
            "Use standard section headers: 'Experience', 'Education', 'Skills'",
            "Ensure the resume is in a standard ATS-friendly format",
        ]),
        suggested_bullets: vecs(&[
            "Led cross-functional teams to deliver projects on time and within scope",
            "Collaborated with stakeholders to gather requirements and align on project goals",
            "Implemented process improvements that enhanced efficiency and productivity",
            "Managed multiple priorities while maintaining high quality standards",
            "Demonstrated strong problem-solving and analytical skills in complex projects",
        ]),
        match_overview: Some(MatchOverviewData {
            top_strengths: vecs(&[
                "Strong analytical and problem-solving skills",
                "Excellent communication and collaboration abilities",
                "Proven track record of delivering results",
            ]),
            top_improvements: vecs(&[
                "Add more specific metrics to quantify achievements",
                "Highlight experience relevant to target role",
                "Expand on transferable skills",
            ]),
            priority_actions: vecs(&[
                "Add relevant keywords from the job description",
                "Include quantifiable achievements",
                "Highlight transferable skills more prominently",
            ]),
            action_items: Vec::new(),
        }),
        required_skills: Some(RequiredSkillsData {
            skill_gaps: vecs(&[
                "Missing: Domain-specific skills (critical)",
                "Limited: Relevant experience in target domain (important)",
            ]),
            missing_critical_skills: vecs(&["Domain-specific technical skills"]),
            action_items: Vec::new(),
        }),
        work_experience: Some(WorkExperienceData {
            duration_analysis: "Experience is relevant but could align more closely with the \
                                target role requirements."
                .to_string(),
            relevant_experiences: vecs(&[
                "Leadership and team management",
                "Project delivery and execution",
            ]),
            experience_gaps: vecs(&["Limited direct experience in target domain"]),
            action_items: Vec::new(),
        }),
        education_credentials: Some(EducationCredentialsData {
            education_match: "Education provides a foundation but may need additional alignment \
                              with role requirements."
                .to_string(),
            missing_credentials: vecs(&["Domain-specific certifications (if required)"]),
            action_items: Vec::new(),
        }),
        impact_achievements: Some(ImpactAchievementsData {
            current_achievements: vecs(&[
                "Led cross-functional teams",
                "Delivered projects on time",
            ]),
            missing_metrics: vecs(&[
                "Add specific numbers and percentages",
                "Quantify business impact",
            ]),
            action_items: Vec::new(),
        }),
        ats_compatibility: Some(AtsCompatibilityData {
            ats_issues: vecs(&["Missing some keywords from the job description"]),
            missing_keywords: vecs(&["Domain-specific keywords", "Industry terminology"]),
            formatting_problems: vecs(&["Consider adding a dedicated skills section"]),
            action_items: Vec::new(),
        }),
        professional_quality: Some(ProfessionalQualityData {
            writing_issues: vecs(&["Some bullets could be more concise"]),
            consistency_problems: vecs(&["Date formats are consistent"]),
            formatting_concerns: vecs(&["Consider adding a professional summary"]),
            action_items: Vec::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiRuntime;
    use crate::config::{AiConfig, AiMode};

    #[test]
    fn test_mock_tables_pass_validation() {
        for domain in ["Software Engineering", "Human Resources", "Underwater Basket Weaving"] {
            let feedback = mock_feedback(domain);
            validate(&feedback).unwrap();
            assert!(feedback.match_overview.is_some());
            assert!(feedback.professional_quality.is_some());
        }
    }

    #[test]
    fn test_unknown_domain_uses_generic_table() {
        assert_eq!(mock_feedback("Astrology"), mock_feedback("Numerology"));
        assert_ne!(
            mock_feedback("Software Engineering"),
            mock_feedback("Astrology")
        );
    }

    #[test]
    fn test_validation_rejects_out_of_bounds() {
        let mut feedback = mock_feedback("General");
        feedback.strength_areas.truncate(1);
        assert!(validate(&feedback).is_err());

        let mut feedback = mock_feedback("General");
        feedback.suggested_bullets = vec!["only one".into()];
        assert!(validate(&feedback).is_err());
    }

    #[tokio::test]
    async fn test_disabled_mode_returns_mock_table() {
        let runtime = AiRuntime::new(&AiConfig {
            mode: AiMode::Disabled,
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            embedding_model: "text-embedding-3-small".into(),
            timeout_ms: 1000,
        });
        let requirements = JobRequirements::default();
        let params = FeedbackParams {
            resume_text: "resume",
            job_description: "job",
            domain: "Software Engineering",
            matches: &[],
            requirements: &requirements,
        };
        let feedback = runtime.generate_feedback(&params).await;
        assert_eq!(feedback, mock_feedback("Software Engineering"));
    }
}
