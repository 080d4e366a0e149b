//! Multi-dimensional scoring
//!
//! Six component signals reduce to one overall score: skills coverage,
//! experience match (external relevance judgement blended with duration),
//! education, achievements, and ATS survivability, weighted by the
//! candidate's seniority band.

use crate::sections::SectionScanner;
use crate::types::{
    GapPriority, JobRequirements, Relevance, ScoreBreakdown, ScoringWeights, SkillGap, SkillMatch,
};
use aho_corasick::AhoCorasick;
use regex::Regex;
use std::collections::HashSet;

/// Points deducted from the skills score per unmatched critical skill.
pub const CRITICAL_GAP_PENALTY: f64 = 10.0;

/// Relevance blend weight inside the experience-match score; duration takes
/// the remainder.
const EXPERIENCE_RELEVANCE_WEIGHT: f64 = 0.7;

/// Weight vector for the seniority band `total_years` falls into.
/// Entry-level candidates are judged more on education, seniors more on the
/// quality of past work. Every vector sums to 1.0.
pub fn weights_for_experience_level(total_years: f64) -> ScoringWeights {
    if total_years < 2.0 {
        ScoringWeights {
            experience_match: 0.25,
            skills: 0.30,
            education: 0.30,
            achievements: 0.10,
            ats: 0.05,
        }
    } else if total_years < 6.0 {
        ScoringWeights {
            experience_match: 0.50,
            skills: 0.25,
            education: 0.15,
            achievements: 0.05,
            ats: 0.05,
        }
    } else {
        ScoringWeights {
            experience_match: 0.55,
            skills: 0.25,
            education: 0.10,
            achievements: 0.05,
            ats: 0.05,
        }
    }
}

/// Skills score: relevance-weighted coverage of the matched skills, minus a
/// fixed penalty per unmatched critical skill. No matches scores 0.
pub fn skills_score(matches: &[SkillMatch], gaps: &[SkillGap]) -> u8 {
    if matches.is_empty() {
        return 0;
    }

    let weighted: f64 = matches
        .iter()
        .map(|m| match m.relevance {
            Relevance::High => 100.0,
            Relevance::Medium => 70.0,
            Relevance::Low => 40.0,
        })
        .sum();
    let possible = matches.len() as f64 * 100.0;

    let critical_missing = gaps
        .iter()
        .filter(|g| g.priority == GapPriority::Critical)
        .count() as f64;
    let penalty = critical_missing * CRITICAL_GAP_PENALTY;

    ((weighted / possible) * 100.0 - penalty).max(0.0).round() as u8
}

/// Duration score from the ratio of actual to required years: diminishing
/// returns above the requirement, steep penalty below it. No stated
/// requirement is treated as met.
pub fn duration_score(actual_years: f64, required_years: f64) -> u8 {
    if required_years <= 0.0 {
        return 100;
    }

    let ratio = actual_years / required_years;
    let score = if ratio >= 1.5 {
        80.0 + (ratio - 1.5) * 20.0
    } else if ratio >= 0.8 {
        60.0 + (ratio - 0.8) * 100.0
    } else if ratio >= 0.6 {
        40.0 + (ratio - 0.6) * 100.0
    } else {
        ratio * 66.67
    };

    score.clamp(0.0, 100.0).round() as u8
}

/// Experience-match score: externally judged relevance of the described work
/// blended 70/30 with the duration component.
pub fn experience_match_score(relevance_score: u8, duration: u8) -> u8 {
    let blended = f64::from(relevance_score) * EXPERIENCE_RELEVANCE_WEIGHT
        + f64::from(duration) * (1.0 - EXPERIENCE_RELEVANCE_WEIGHT);
    blended.round().clamp(0.0, 100.0) as u8
}

/// Deterministic ATS heuristic: section headers, required-keyword coverage,
/// and length sanity. Bounded to [0, 100] for any input.
pub fn ats_score(resume_text: &str, requirements: &JobRequirements) -> u8 {
    let scanner = SectionScanner::new();
    let mut score: f64 = 100.0;

    if !scanner.has_experience(resume_text) {
        score -= 15.0;
    }
    if !scanner.has_education(resume_text) {
        score -= 10.0;
    }
    if !scanner.has_skills(resume_text) {
        score -= 15.0;
    }

    let matched = matched_keyword_count(resume_text, &requirements.required_skills);
    let keyword_score =
        matched as f64 / requirements.required_skills.len().max(1) as f64 * 40.0;
    score = (score - 40.0 + keyword_score).min(100.0);

    let length = resume_text.chars().count();
    if length < 500 {
        score -= 10.0;
    }
    if length > 5000 {
        score -= 5.0;
    }

    score.max(0.0).round() as u8
}

/// Count how many of `keywords` occur in `text`, case-insensitively.
fn matched_keyword_count(text: &str, keywords: &[String]) -> usize {
    if keywords.is_empty() {
        return 0;
    }
    let matcher = AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(keywords)
        .expect("Invalid keyword patterns");

    let mut seen: HashSet<usize> = HashSet::new();
    for found in matcher.find_iter(text) {
        seen.insert(found.pattern().as_usize());
    }
    seen.len()
}

/// Overall score: weighted sum of the component scores, rounded and clamped.
pub fn overall_score(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> u8 {
    let total = f64::from(breakdown.experience_match) * weights.experience_match
        + f64::from(breakdown.skills) * weights.skills
        + f64::from(breakdown.education) * weights.education
        + f64::from(breakdown.achievements) * weights.achievements
        + f64::from(breakdown.ats) * weights.ats;
    total.round().clamp(0.0, 100.0) as u8
}

/// Largest "N+ years" figure stated in the job's experience requirements, or
/// 0.0 when none is stated.
pub fn required_years(requirements: &JobRequirements) -> f64 {
    let years_re = Regex::new(r"(?i)(\d+)\s*\+?\s*years?").expect("Invalid years regex");

    requirements
        .experience_requirements
        .iter()
        .flat_map(|req| years_re.captures_iter(req))
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkillCategory;

    fn high_match(skill: &str) -> SkillMatch {
        SkillMatch {
            resume_skill: skill.to_string(),
            job_skill: skill.to_string(),
            similarity: 1.0,
            relevance: Relevance::High,
        }
    }

    fn critical_gap(skill: &str) -> SkillGap {
        SkillGap {
            skill: skill.to_string(),
            priority: GapPriority::Critical,
            category: SkillCategory::Technical,
        }
    }

    #[test]
    fn test_weight_bands_sum_to_one() {
        for years in [0.0, 1.9, 2.0, 5.9, 6.0, 15.0] {
            let weights = weights_for_experience_level(years);
            assert!(
                (weights.sum() - 1.0).abs() < 1e-6,
                "weights for {} years sum to {}",
                years,
                weights.sum()
            );
        }
    }

    #[test]
    fn test_entry_band_favors_education() {
        let entry = weights_for_experience_level(0.5);
        let senior = weights_for_experience_level(10.0);
        assert!(entry.education > senior.education);
        assert!(senior.experience_match > entry.experience_match);
    }

    #[test]
    fn test_skills_score_full_coverage() {
        let matches = vec![high_match("react"), high_match("node"), high_match("sql")];
        assert_eq!(skills_score(&matches, &[]), 100);
    }

    #[test]
    fn test_skills_score_penalized_by_critical_gaps() {
        let matches = vec![high_match("react")];
        let gaps = vec![critical_gap("node"), critical_gap("sql")];
        assert_eq!(skills_score(&matches, &gaps), 80);
    }

    #[test]
    fn test_skills_score_empty_matches() {
        assert_eq!(skills_score(&[], &[critical_gap("node")]), 0);
    }

    #[test]
    fn test_skills_score_floor() {
        let matches = vec![SkillMatch {
            resume_skill: "a".into(),
            job_skill: "a".into(),
            similarity: 0.4,
            relevance: Relevance::Low,
        }];
        let gaps: Vec<SkillGap> = (0..10).map(|i| critical_gap(&format!("g{i}"))).collect();
        assert_eq!(skills_score(&matches, &gaps), 0);
    }

    #[test]
    fn test_duration_score_meets_requirement() {
        let score = duration_score(5.0, 5.0);
        assert!((60..=100).contains(&score));
        assert_eq!(score, 80);
    }

    #[test]
    fn test_duration_score_zero_actual() {
        assert_eq!(duration_score(0.0, 5.0), 0);
    }

    #[test]
    fn test_duration_score_never_exceeds_cap() {
        assert_eq!(duration_score(15.0, 5.0), 100);
        for actual in [0.0, 1.0, 3.0, 5.0, 8.0, 20.0, 100.0] {
            assert!(duration_score(actual, 5.0) <= 100);
        }
    }

    #[test]
    fn test_duration_score_no_requirement() {
        assert_eq!(duration_score(0.0, 0.0), 100);
    }

    #[test]
    fn test_experience_match_blend() {
        assert_eq!(experience_match_score(100, 0), 70);
        assert_eq!(experience_match_score(0, 100), 30);
        assert_eq!(experience_match_score(80, 80), 80);
    }

    #[test]
    fn test_ats_score_bounds_on_pathological_input() {
        let empty_requirements = JobRequirements::default();
        let score = ats_score("", &empty_requirements);
        assert!(score <= 100);

        let requirements = JobRequirements {
            required_skills: vec!["React".into(), "Node".into()],
            ..Default::default()
        };
        let score = ats_score("react node sql", &requirements);
        assert!(score <= 100);
    }

    #[test]
    fn test_ats_score_rewards_structure() {
        let requirements = JobRequirements {
            required_skills: vec!["React".into(), "SQL".into()],
            ..Default::default()
        };
        let structured = "EXPERIENCE\nBuilt React apps\nEDUCATION\nB.S.\nSKILLS\nReact, SQL";
        let unstructured = "I once used a computer";
        assert!(ats_score(structured, &requirements) > ats_score(unstructured, &requirements));
    }

    #[test]
    fn test_ats_keyword_coverage_case_insensitive() {
        let requirements = JobRequirements {
            required_skills: vec!["REACT".into()],
            ..Default::default()
        };
        let with = ats_score("Experience Education Skills react", &requirements);
        let without = ats_score("Experience Education Skills", &requirements);
        assert!(with > without);
    }

    #[test]
    fn test_overall_score_weighted_sum() {
        let breakdown = ScoreBreakdown {
            experience_match: 80,
            skills: 90,
            education: 70,
            achievements: 60,
            ats: 50,
        };
        let weights = weights_for_experience_level(4.0);
        // 0.5*80 + 0.25*90 + 0.15*70 + 0.05*60 + 0.05*50 = 78.5
        assert_eq!(overall_score(&breakdown, &weights), 79);
    }

    #[test]
    fn test_overall_score_bounds() {
        let breakdown = ScoreBreakdown {
            experience_match: 100,
            skills: 100,
            education: 100,
            achievements: 100,
            ats: 100,
        };
        let weights = weights_for_experience_level(10.0);
        assert_eq!(overall_score(&breakdown, &weights), 100);
    }

    #[test]
    fn test_required_years_extraction() {
        let requirements = JobRequirements {
            experience_requirements: vec![
                "Bachelor's degree".into(),
                "5+ years in software development".into(),
                "3 years of leadership".into(),
            ],
            ..Default::default()
        };
        assert_eq!(required_years(&requirements), 5.0);
        assert_eq!(required_years(&JobRequirements::default()), 0.0);
    }
}
