//! Analysis pipeline orchestration
//!
//! `AnalysisEngine` wires the components together: extraction (concurrent
//! for resume and job), tiered matching, dimensional scoring, feedback
//! synthesis, and assembly of the immutable [`AnalysisResult`]. Every
//! external dependency degrades to a deterministic path, so `analyze` always
//! produces a complete result.

use crate::ai::AiRuntime;
use crate::categories::transform_to_category_analysis;
use crate::config::Config;
use crate::experience;
use crate::feedback::FeedbackParams;
use crate::matching::{match_simple, TieredMatcher};
use crate::scoring;
use crate::types::{
    normalize_skill, AnalysisResult, CategoryAnalysisResponse, ComprehensiveFeedback, GapPriority,
    JobRequirements, MatchedSkill, ScoreBreakdown, SkillCategory, SkillGap, SkillMatch,
    SkillRecord, SkillSource,
};
use chrono::{Datelike, Utc};
use std::collections::HashSet;

/// One analysis request as handed over by the (excluded) transport layer.
/// `job_title` and `company` are carried as context for persistence by the
/// caller; the pipeline itself scores text only.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description: String,
    pub domain: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
}

pub struct AnalysisEngine {
    config: Config,
    ai: AiRuntime,
    matcher: TieredMatcher,
}

impl AnalysisEngine {
    pub fn new(config: Config) -> Self {
        let ai = AiRuntime::new(&config.ai);
        let matcher = TieredMatcher::new(&config.matching);
        Self {
            config,
            ai,
            matcher,
        }
    }

    /// Run the full pipeline and return the analysis aggregate.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> AnalysisResult {
        self.run_pipeline(request).await.0
    }

    /// Run the full pipeline and additionally reshape the feedback into the
    /// seven-category response contract.
    pub async fn analyze_by_category(
        &self,
        request: &AnalyzeRequest,
    ) -> (AnalysisResult, CategoryAnalysisResponse) {
        let (analysis, feedback) = self.run_pipeline(request).await;
        let categories = transform_to_category_analysis(&feedback, &analysis);
        (analysis, categories)
    }

    async fn run_pipeline(
        &self,
        request: &AnalyzeRequest,
    ) -> (AnalysisResult, ComprehensiveFeedback) {
        let domain = match &request.domain {
            Some(domain) if !domain.trim().is_empty() => domain.clone(),
            _ => self.ai.detect_domain(&request.job_description).await,
        };
        log::debug!("analyzing against domain '{}'", domain);

        // Resume and job extraction are independent external calls.
        let (resume_skills, requirements) = tokio::join!(
            self.ai
                .extract_skills(&request.resume_text, SkillSource::Resume, Some(&domain)),
            self.ai
                .extract_requirements(&request.job_description, Some(&domain)),
        );

        let matches = if self.config.matching.semantic_matching {
            self.matcher
                .match_skills(
                    &resume_skills.all_skills,
                    &requirements.all_required_skills,
                    self.ai.embedder(),
                )
                .await
        } else {
            match_simple(&resume_skills.all_skills, &requirements.all_required_skills)
        };

        let missing_skills = identify_missing_skills(&requirements, &matches);

        let now = Utc::now();
        let total_years = experience::total_years_at(
            &request.resume_text,
            now.year(),
            now.month0() as i32,
            self.config.scoring.max_total_years,
        );
        let required = scoring::required_years(&requirements);

        // Three independently judged components, issued concurrently.
        let (relevance, education, achievements) = tokio::join!(
            self.ai.score_experience_relevance(
                &request.resume_text,
                &request.job_description,
                &domain
            ),
            self.ai
                .score_education(&request.resume_text, &request.job_description, &domain),
            self.ai
                .score_achievements(&request.resume_text, &request.job_description, &domain),
        );

        let duration = scoring::duration_score(total_years, required);
        let breakdown = ScoreBreakdown {
            experience_match: scoring::experience_match_score(relevance, duration),
            skills: scoring::skills_score(&matches, &missing_skills),
            education,
            achievements,
            ats: scoring::ats_score(&request.resume_text, &requirements),
        };
        let weights = scoring::weights_for_experience_level(total_years);
        let overall = scoring::overall_score(&breakdown, &weights);

        let feedback = self
            .ai
            .generate_feedback(&FeedbackParams {
                resume_text: &request.resume_text,
                job_description: &request.job_description,
                domain: &domain,
                matches: &matches,
                requirements: &requirements,
            })
            .await;

        let resume_records = resume_skills.records(SkillSource::Resume);
        let matched_skills = to_matched_skills(&matches, &resume_records);
        let missing_keywords = missing_skills.iter().map(|g| g.skill.clone()).collect();

        log::debug!(
            "analysis complete: overall={} ats={} matched={} missing={}",
            overall,
            breakdown.ats,
            matched_skills.len(),
            missing_skills.len()
        );

        let analysis = AnalysisResult {
            overall_score: overall,
            ats_score: breakdown.ats,
            domain,
            score_breakdown: breakdown,
            weights,
            total_years_experience: total_years,
            matched_skills,
            missing_skills,
            relevant_experiences: feedback.relevant_experiences.clone(),
            experience_gaps: feedback.experience_gaps.clone(),
            strength_areas: feedback.strength_areas.clone(),
            improvement_areas: feedback.improvement_areas.clone(),
            ats_tips: feedback.ats_tips.clone(),
            suggested_bullets: feedback.suggested_bullets.clone(),
            missing_keywords,
        };

        (analysis, feedback)
    }
}

/// A job skill with a match at any relevance is covered; uncovered required
/// skills are critical gaps, uncovered preferred ones nice-to-have. A skill
/// never appears both matched and missing.
fn identify_missing_skills(
    requirements: &JobRequirements,
    matches: &[SkillMatch],
) -> Vec<SkillGap> {
    let matched_jobs: HashSet<String> = matches
        .iter()
        .map(|m| normalize_skill(&m.job_skill))
        .collect();

    let mut gaps = Vec::new();
    for skill in &requirements.required_skills {
        if !matched_jobs.contains(&normalize_skill(skill)) {
            gaps.push(SkillGap {
                skill: skill.clone(),
                priority: GapPriority::Critical,
                category: categorize_skill(skill),
            });
        }
    }
    for skill in &requirements.preferred_skills {
        if !matched_jobs.contains(&normalize_skill(skill)) {
            gaps.push(SkillGap {
                skill: skill.clone(),
                priority: GapPriority::NiceToHave,
                category: categorize_skill(skill),
            });
        }
    }
    gaps
}

/// Keyword heuristic for job-side skills, which arrive uncategorized.
fn categorize_skill(skill: &str) -> SkillCategory {
    const SOFT: &[&str] = &[
        "leadership",
        "communication",
        "teamwork",
        "problem",
        "analytical",
        "creative",
        "management",
    ];
    const CERTIFICATION: &[&str] = &[
        "certified",
        "certification",
        "degree",
        "bachelor",
        "master",
        "phd",
    ];
    const TOOL: &[&str] = &["software", "platform", "tool", "system", "application"];

    let lower = skill.to_lowercase();
    if SOFT.iter().any(|k| lower.contains(k)) {
        SkillCategory::Soft
    } else if CERTIFICATION.iter().any(|k| lower.contains(k)) {
        SkillCategory::Certification
    } else if TOOL.iter().any(|k| lower.contains(k)) {
        SkillCategory::Tool
    } else {
        SkillCategory::Technical
    }
}

/// Flatten matcher output into the result contract, recovering each resume
/// skill's extraction category where known.
fn to_matched_skills(matches: &[SkillMatch], resume_records: &[SkillRecord]) -> Vec<MatchedSkill> {
    matches
        .iter()
        .map(|m| {
            let category = resume_records
                .iter()
                .find(|r| normalize_skill(&r.name) == normalize_skill(&m.resume_skill))
                .map(|r| r.category)
                .unwrap_or_else(|| categorize_skill(&m.resume_skill));
            MatchedSkill {
                skill: m.resume_skill.clone(),
                relevance: m.relevance,
                category,
                source: SkillSource::Resume,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Relevance;

    fn match_pair(resume: &str, job: &str, relevance: Relevance) -> SkillMatch {
        SkillMatch {
            resume_skill: resume.to_string(),
            job_skill: job.to_string(),
            similarity: match relevance {
                Relevance::High => 1.0,
                Relevance::Medium => 0.7,
                Relevance::Low => 0.4,
            },
            relevance,
        }
    }

    #[test]
    fn test_missing_skills_priorities() {
        let requirements = JobRequirements {
            required_skills: vec!["React".into(), "Node".into()],
            preferred_skills: vec!["GraphQL".into()],
            ..Default::default()
        }
        .with_all_required();
        let matches = vec![match_pair("React", "React", Relevance::High)];

        let gaps = identify_missing_skills(&requirements, &matches);
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].skill, "Node");
        assert_eq!(gaps[0].priority, GapPriority::Critical);
        assert_eq!(gaps[1].skill, "GraphQL");
        assert_eq!(gaps[1].priority, GapPriority::NiceToHave);
    }

    #[test]
    fn test_no_skill_is_both_matched_and_missing() {
        let requirements = JobRequirements {
            required_skills: vec!["React".into(), "SQL".into()],
            preferred_skills: vec![],
            ..Default::default()
        }
        .with_all_required();
        // Low relevance still counts as covered
        let matches = vec![match_pair("Postgres", "SQL", Relevance::Low)];

        let gaps = identify_missing_skills(&requirements, &matches);
        let gap_names: Vec<&str> = gaps.iter().map(|g| g.skill.as_str()).collect();
        assert!(gap_names.contains(&"React"));
        assert!(!gap_names.contains(&"SQL"));
    }

    #[test]
    fn test_categorize_skill_heuristic() {
        assert_eq!(categorize_skill("Team Leadership"), SkillCategory::Soft);
        assert_eq!(
            categorize_skill("AWS Certified Architect"),
            SkillCategory::Certification
        );
        assert_eq!(categorize_skill("HRIS platform"), SkillCategory::Tool);
        assert_eq!(categorize_skill("React"), SkillCategory::Technical);
    }

    #[test]
    fn test_matched_skill_category_lookup() {
        let records = vec![SkillRecord {
            name: "Docker".into(),
            category: SkillCategory::Tool,
            source: SkillSource::Resume,
        }];
        let matches = vec![match_pair("Docker", "docker", Relevance::High)];

        let matched = to_matched_skills(&matches, &records);
        assert_eq!(matched[0].category, SkillCategory::Tool);
        assert_eq!(matched[0].source, SkillSource::Resume);

        // Unknown skills fall back to the heuristic
        let matched = to_matched_skills(&matches, &[]);
        assert_eq!(matched[0].category, SkillCategory::Technical);
    }
}
