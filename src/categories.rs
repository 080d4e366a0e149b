//! Transforming feedback and analysis into the seven-category response
//!
//! Pure reshaping: each category prefers the synthesizer's structured
//! sub-object and otherwise derives an equivalent from the legacy flat
//! fields, so the response contract holds even for minimal feedback.

use crate::types::{
    ActionItem, AnalysisResult, AtsCompatibilityCategory, CategoryAnalysisResponse,
    ComprehensiveFeedback, EducationCredentialsCategory, ImpactAchievementsCategory,
    MatchOverviewCategory, ProfessionalQualityCategory, RequiredSkillsCategory,
    WorkExperienceCategory,
};

const ATS_WEIGHT: f64 = 0.7;
const WRITING_WEIGHT: f64 = 0.3;

/// Explicit action items win; otherwise the category counts its most
/// specific non-empty action-relevant lists.
fn count_or(action_items: &[ActionItem], fallback: usize) -> usize {
    if action_items.is_empty() {
        fallback
    } else {
        action_items.len()
    }
}

/// Professional quality is computed, not passed through: ATS score blended
/// with a writing-quality deduction per reported issue, each issue class
/// capped.
fn professional_quality_score(ats_score: u8, feedback: &ComprehensiveFeedback) -> u8 {
    let mut writing: f64 = 100.0;
    if let Some(quality) = &feedback.professional_quality {
        writing -= (quality.writing_issues.len() as f64 * 5.0).min(30.0);
        writing -= (quality.consistency_problems.len() as f64 * 5.0).min(20.0);
        writing -= (quality.formatting_concerns.len() as f64 * 5.0).min(20.0);
    }
    writing = writing.max(0.0);

    let score = f64::from(ats_score) * ATS_WEIGHT + writing * WRITING_WEIGHT;
    score.round().clamp(0.0, 100.0) as u8
}

pub fn transform_to_category_analysis(
    feedback: &ComprehensiveFeedback,
    analysis: &AnalysisResult,
) -> CategoryAnalysisResponse {
    let overview_items = feedback
        .match_overview
        .as_ref()
        .map(|o| o.action_items.clone())
        .unwrap_or_default();
    let overview = MatchOverviewCategory {
        score: analysis.overall_score,
        action_items_count: count_or(
            &overview_items,
            feedback
                .match_overview
                .as_ref()
                .map(|o| o.priority_actions.len())
                .unwrap_or(feedback.improvement_areas.len()),
        ),
        top_strengths: feedback
            .match_overview
            .as_ref()
            .map(|o| o.top_strengths.clone())
            .unwrap_or_else(|| feedback.strength_areas.iter().take(5).cloned().collect()),
        top_improvements: feedback
            .match_overview
            .as_ref()
            .map(|o| o.top_improvements.clone())
            .unwrap_or_else(|| feedback.improvement_areas.iter().take(5).cloned().collect()),
        priority_actions: feedback
            .match_overview
            .as_ref()
            .map(|o| o.priority_actions.clone())
            .unwrap_or_else(|| feedback.improvement_areas.iter().take(5).cloned().collect()),
        action_items: overview_items,
    };

    let skills_items = feedback
        .required_skills
        .as_ref()
        .map(|s| s.action_items.clone())
        .unwrap_or_default();
    let skill_gaps = feedback
        .required_skills
        .as_ref()
        .map(|s| s.skill_gaps.clone())
        .unwrap_or_default();
    let missing_critical = feedback
        .required_skills
        .as_ref()
        .map(|s| s.missing_critical_skills.clone())
        .unwrap_or_default();
    let skills = RequiredSkillsCategory {
        score: analysis.score_breakdown.skills,
        action_items_count: count_or(&skills_items, skill_gaps.len() + missing_critical.len()),
        matched_skills: analysis.matched_skills.clone(),
        missing_skills: analysis.missing_skills.clone(),
        skill_gaps,
        missing_critical_skills: missing_critical,
        action_items: skills_items,
    };

    let experience_items = feedback
        .work_experience
        .as_ref()
        .map(|e| e.action_items.clone())
        .unwrap_or_default();
    let experience_gaps = feedback
        .work_experience
        .as_ref()
        .map(|e| e.experience_gaps.clone())
        .unwrap_or_else(|| feedback.experience_gaps.clone());
    let experience = WorkExperienceCategory {
        score: analysis.score_breakdown.experience_match,
        action_items_count: count_or(&experience_items, experience_gaps.len()),
        duration_analysis: feedback
            .work_experience
            .as_ref()
            .map(|e| e.duration_analysis.clone())
            .unwrap_or_else(|| {
                format!(
                    "Total years of experience: {}",
                    analysis.total_years_experience
                )
            }),
        relevant_experiences: feedback
            .work_experience
            .as_ref()
            .map(|e| e.relevant_experiences.clone())
            .unwrap_or_else(|| feedback.relevant_experiences.clone()),
        experience_gaps,
        action_items: experience_items,
    };

    let education_items = feedback
        .education_credentials
        .as_ref()
        .map(|e| e.action_items.clone())
        .unwrap_or_default();
    let missing_credentials = feedback
        .education_credentials
        .as_ref()
        .map(|e| e.missing_credentials.clone())
        .unwrap_or_default();
    let education = EducationCredentialsCategory {
        score: analysis.score_breakdown.education,
        action_items_count: count_or(&education_items, missing_credentials.len()),
        education_match: feedback
            .education_credentials
            .as_ref()
            .map(|e| e.education_match.clone())
            .unwrap_or_else(|| {
                "Education background assessment based on job requirements".to_string()
            }),
        missing_credentials,
        action_items: education_items,
    };

    let impact_items = feedback
        .impact_achievements
        .as_ref()
        .map(|i| i.action_items.clone())
        .unwrap_or_default();
    let missing_metrics = feedback
        .impact_achievements
        .as_ref()
        .map(|i| i.missing_metrics.clone())
        .unwrap_or_default();
    let impact = ImpactAchievementsCategory {
        score: analysis.score_breakdown.achievements,
        action_items_count: count_or(&impact_items, missing_metrics.len()),
        current_achievements: feedback
            .impact_achievements
            .as_ref()
            .map(|i| i.current_achievements.clone())
            .unwrap_or_default(),
        missing_metrics,
        action_items: impact_items,
    };

    let ats_items = feedback
        .ats_compatibility
        .as_ref()
        .map(|a| a.action_items.clone())
        .unwrap_or_default();
    let ats_issues = feedback
        .ats_compatibility
        .as_ref()
        .map(|a| a.ats_issues.clone())
        .unwrap_or_else(|| feedback.ats_tips.clone());
    let ats_missing_keywords = feedback
        .ats_compatibility
        .as_ref()
        .map(|a| a.missing_keywords.clone())
        .unwrap_or_default();
    let formatting_problems = feedback
        .ats_compatibility
        .as_ref()
        .map(|a| a.formatting_problems.clone())
        .unwrap_or_default();
    let ats = AtsCompatibilityCategory {
        score: analysis.ats_score,
        action_items_count: count_or(
            &ats_items,
            ats_issues.len() + ats_missing_keywords.len() + formatting_problems.len(),
        ),
        ats_issues,
        missing_keywords: ats_missing_keywords,
        formatting_problems,
        action_items: ats_items,
    };

    let quality_items = feedback
        .professional_quality
        .as_ref()
        .map(|q| q.action_items.clone())
        .unwrap_or_default();
    let writing_issues = feedback
        .professional_quality
        .as_ref()
        .map(|q| q.writing_issues.clone())
        .unwrap_or_default();
    let consistency_problems = feedback
        .professional_quality
        .as_ref()
        .map(|q| q.consistency_problems.clone())
        .unwrap_or_default();
    let formatting_concerns = feedback
        .professional_quality
        .as_ref()
        .map(|q| q.formatting_concerns.clone())
        .unwrap_or_default();
    let quality = ProfessionalQualityCategory {
        score: professional_quality_score(analysis.ats_score, feedback),
        action_items_count: count_or(
            &quality_items,
            writing_issues.len() + consistency_problems.len() + formatting_concerns.len(),
        ),
        writing_issues,
        consistency_problems,
        formatting_concerns,
        action_items: quality_items,
    };

    CategoryAnalysisResponse {
        overview,
        skills,
        experience,
        education,
        impact,
        ats,
        quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProfessionalQualityData, ScoreBreakdown, ScoringWeights};

    fn minimal_analysis() -> AnalysisResult {
        AnalysisResult {
            overall_score: 72,
            ats_score: 80,
            domain: "General".into(),
            score_breakdown: ScoreBreakdown {
                experience_match: 60,
                skills: 75,
                education: 70,
                achievements: 55,
                ats: 80,
            },
            weights: ScoringWeights {
                experience_match: 0.5,
                skills: 0.25,
                education: 0.15,
                achievements: 0.05,
                ats: 0.05,
            },
            total_years_experience: 4.5,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            relevant_experiences: Vec::new(),
            experience_gaps: Vec::new(),
            strength_areas: Vec::new(),
            improvement_areas: Vec::new(),
            ats_tips: Vec::new(),
            suggested_bullets: Vec::new(),
            missing_keywords: Vec::new(),
        }
    }

    /// Legacy-only feedback: every optional category field absent.
    fn legacy_feedback() -> ComprehensiveFeedback {
        ComprehensiveFeedback {
            strength_areas: vec![
                "s1".into(),
                "s2".into(),
                "s3".into(),
                "s4".into(),
                "s5".into(),
                "s6".into(),
            ],
            improvement_areas: vec!["i1".into(), "i2".into()],
            experience_gaps: vec!["g1".into()],
            relevant_experiences: vec!["r1".into()],
            ats_tips: vec!["t1".into(), "t2".into()],
            suggested_bullets: vec!["b1".into()],
            match_overview: None,
            required_skills: None,
            work_experience: None,
            education_credentials: None,
            impact_achievements: None,
            ats_compatibility: None,
            professional_quality: None,
        }
    }

    #[test]
    fn test_all_categories_populated_from_legacy_fields() {
        let response = transform_to_category_analysis(&legacy_feedback(), &minimal_analysis());

        assert_eq!(response.overview.score, 72);
        assert_eq!(response.skills.score, 75);
        assert_eq!(response.experience.score, 60);
        assert_eq!(response.education.score, 70);
        assert_eq!(response.impact.score, 55);
        assert_eq!(response.ats.score, 80);
        assert!(response.quality.score <= 100);

        // topStrengths defaults to the first 5 legacy strengths
        assert_eq!(response.overview.top_strengths.len(), 5);
        // actionItemsCount falls back to improvement areas
        assert_eq!(response.overview.action_items_count, 2);
        // ATS issues default to the legacy tips
        assert_eq!(response.ats.ats_issues, vec!["t1", "t2"]);
        assert_eq!(response.ats.action_items_count, 2);
        // duration analysis derives from the computed total
        assert!(response
            .experience
            .duration_analysis
            .contains("Total years of experience"));
    }

    #[test]
    fn test_quality_score_formula() {
        let mut feedback = legacy_feedback();
        feedback.professional_quality = Some(ProfessionalQualityData {
            writing_issues: vec!["w1".into(), "w2".into()],
            consistency_problems: vec![],
            formatting_concerns: vec![],
            action_items: Vec::new(),
        });
        let response = transform_to_category_analysis(&feedback, &minimal_analysis());

        // writing = 100 - 10 = 90; score = 0.7*80 + 0.3*90 = 83
        assert_eq!(response.quality.score, 83);
        assert_eq!(response.quality.action_items_count, 2);
    }

    #[test]
    fn test_writing_deductions_are_capped() {
        let mut feedback = legacy_feedback();
        feedback.professional_quality = Some(ProfessionalQualityData {
            writing_issues: (0..20).map(|i| format!("w{i}")).collect(),
            consistency_problems: (0..20).map(|i| format!("c{i}")).collect(),
            formatting_concerns: (0..20).map(|i| format!("f{i}")).collect(),
            action_items: Vec::new(),
        });
        let response = transform_to_category_analysis(&feedback, &minimal_analysis());

        // writing floor: 100 - 30 - 20 - 20 = 30; score = 0.7*80 + 0.3*30 = 65
        assert_eq!(response.quality.score, 65);
    }

    #[test]
    fn test_structured_fields_win_over_legacy() {
        let mut feedback = legacy_feedback();
        feedback.match_overview = Some(crate::types::MatchOverviewData {
            top_strengths: vec!["structured".into()],
            top_improvements: vec![],
            priority_actions: vec!["p1".into(), "p2".into(), "p3".into()],
            action_items: Vec::new(),
        });
        let response = transform_to_category_analysis(&feedback, &minimal_analysis());

        assert_eq!(response.overview.top_strengths, vec!["structured"]);
        assert_eq!(response.overview.action_items_count, 3);
    }
}
