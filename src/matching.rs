//! Tiered skill matching
//!
//! Three escalating strategies cover the ways a job skill can appear in a
//! resume: exact equality (same skill), edit distance (typos and spelling
//! variants), and embedding similarity (synonyms and domain variance). Each
//! tier only sees skills no earlier tier has claimed. The per-tier scan is
//! greedy first-match, which is deterministic for a stable input order but
//! not a globally optimal assignment.

use crate::ai::EmbeddingProvider;
use crate::config::MatchingConfig;
use crate::error::Result;
use crate::similarity::{cosine_similarity, edit_distance_similarity};
use crate::types::{normalize_skill, Relevance, SkillMatch};
use std::cmp::Ordering;
use std::collections::HashSet;

pub struct TieredMatcher {
    fuzzy_threshold: f64,
    semantic_threshold: f64,
}

impl TieredMatcher {
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            fuzzy_threshold: config.fuzzy_threshold,
            semantic_threshold: config.semantic_threshold,
        }
    }

    /// Match resume skills against job skills, best matches first.
    ///
    /// The semantic tier runs only when an embedding provider is available;
    /// without one (or when its call fails) the result is exact+fuzzy only
    /// rather than an error.
    pub async fn match_skills(
        &self,
        resume_skills: &[String],
        job_skills: &[String],
        embedder: Option<&dyn EmbeddingProvider>,
    ) -> Vec<SkillMatch> {
        if resume_skills.is_empty() || job_skills.is_empty() {
            return Vec::new();
        }

        let mut matches = self.exact_tier(resume_skills, job_skills);

        let fuzzy = self.fuzzy_tier(resume_skills, job_skills, &matches);
        matches.extend(fuzzy);

        if let Some(embedder) = embedder {
            match self
                .semantic_tier(resume_skills, job_skills, &matches, embedder)
                .await
            {
                Ok(semantic) => matches.extend(semantic),
                Err(e) => log::warn!("semantic tier skipped: {}", e),
            }
        }

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        matches
    }

    /// Tier 1: case-insensitive, whitespace-trimmed equality.
    fn exact_tier(&self, resume_skills: &[String], job_skills: &[String]) -> Vec<SkillMatch> {
        let resume_lower: Vec<String> = resume_skills.iter().map(|s| normalize_skill(s)).collect();
        let mut matches = Vec::new();

        for job_skill in job_skills {
            let job_lower = normalize_skill(job_skill);
            for (r, resume_lower) in resume_lower.iter().enumerate() {
                if *resume_lower == job_lower {
                    matches.push(SkillMatch {
                        resume_skill: resume_skills[r].clone(),
                        job_skill: job_skill.clone(),
                        similarity: 1.0,
                        relevance: Relevance::High,
                    });
                    break;
                }
            }
        }

        matches
    }

    /// Tier 2: greedy edit-distance matching over skills the exact tier left
    /// unmatched. First resume skill at or above the threshold wins.
    fn fuzzy_tier(
        &self,
        resume_skills: &[String],
        job_skills: &[String],
        existing: &[SkillMatch],
    ) -> Vec<SkillMatch> {
        let mut matched_jobs: HashSet<String> =
            existing.iter().map(|m| normalize_skill(&m.job_skill)).collect();
        let mut matched_resumes: HashSet<String> = existing
            .iter()
            .map(|m| normalize_skill(&m.resume_skill))
            .collect();

        let mut matches = Vec::new();

        for job_skill in job_skills {
            let job_lower = normalize_skill(job_skill);
            if matched_jobs.contains(&job_lower) {
                continue;
            }

            for resume_skill in resume_skills {
                let resume_lower = normalize_skill(resume_skill);
                if matched_resumes.contains(&resume_lower) {
                    continue;
                }

                let similarity = edit_distance_similarity(&resume_lower, &job_lower);
                if similarity >= self.fuzzy_threshold {
                    matches.push(SkillMatch {
                        resume_skill: resume_skill.clone(),
                        job_skill: job_skill.clone(),
                        similarity,
                        relevance: if similarity >= 0.9 {
                            Relevance::High
                        } else {
                            Relevance::Medium
                        },
                    });
                    matched_jobs.insert(job_lower.clone());
                    matched_resumes.insert(resume_lower);
                    break;
                }
            }
        }

        matches
    }

    /// Tier 3: embed the still-unmatched skills and take the highest-cosine
    /// resume skill per job skill, subject to the semantic threshold.
    async fn semantic_tier(
        &self,
        resume_skills: &[String],
        job_skills: &[String],
        existing: &[SkillMatch],
        embedder: &dyn EmbeddingProvider,
    ) -> Result<Vec<SkillMatch>> {
        let matched_jobs: HashSet<String> =
            existing.iter().map(|m| normalize_skill(&m.job_skill)).collect();
        let matched_resumes: HashSet<String> = existing
            .iter()
            .map(|m| normalize_skill(&m.resume_skill))
            .collect();

        let unmatched_resume: Vec<String> = resume_skills
            .iter()
            .filter(|s| !matched_resumes.contains(&normalize_skill(s)))
            .cloned()
            .collect();
        let unmatched_job: Vec<String> = job_skills
            .iter()
            .filter(|s| !matched_jobs.contains(&normalize_skill(s)))
            .cloned()
            .collect();

        if unmatched_resume.is_empty() || unmatched_job.is_empty() {
            return Ok(Vec::new());
        }

        let (resume_embeddings, job_embeddings) = tokio::try_join!(
            embedder.embed_batch(&unmatched_resume),
            embedder.embed_batch(&unmatched_job),
        )?;

        let mut matches = Vec::new();

        for (j, job_skill) in unmatched_job.iter().enumerate() {
            let mut best: Option<SkillMatch> = None;
            let mut best_similarity = 0.0;

            for (r, resume_skill) in unmatched_resume.iter().enumerate() {
                let similarity = cosine_similarity(&resume_embeddings[r], &job_embeddings[j])?;
                if similarity > best_similarity && similarity >= self.semantic_threshold {
                    best_similarity = similarity;
                    best = Some(SkillMatch {
                        resume_skill: resume_skill.clone(),
                        job_skill: job_skill.clone(),
                        similarity,
                        relevance: Relevance::from_similarity(similarity),
                    });
                }
            }

            if let Some(m) = best {
                matches.push(m);
            }
        }

        Ok(matches)
    }
}

/// Degraded deterministic fallback for when semantic matching is globally
/// disabled: exact or one-way substring containment, everything relevance
/// high.
pub fn match_simple(resume_skills: &[String], job_skills: &[String]) -> Vec<SkillMatch> {
    let resume_lower: Vec<String> = resume_skills.iter().map(|s| normalize_skill(s)).collect();
    let mut matches = Vec::new();

    for job_skill in job_skills {
        let job_lower = normalize_skill(job_skill);
        for (r, resume_lower) in resume_lower.iter().enumerate() {
            if *resume_lower == job_lower
                || resume_lower.contains(&job_lower)
                || job_lower.contains(resume_lower.as_str())
            {
                matches.push(SkillMatch {
                    resume_skill: resume_skills[r].clone(),
                    job_skill: job_skill.clone(),
                    similarity: 1.0,
                    relevance: Relevance::High,
                });
                break;
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;

    fn matcher() -> TieredMatcher {
        TieredMatcher::new(&MatchingConfig {
            semantic_matching: true,
            fuzzy_threshold: 0.8,
            semantic_threshold: 0.3,
        })
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Maps each known skill to a fixed unit vector.
    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| match normalize_skill(t).as_str() {
                    "kubernetes" => vec![1.0, 0.0, 0.0],
                    "container orchestration" => vec![0.9, 0.1, 0.0],
                    "watercolor painting" => vec![0.0, 0.0, 1.0],
                    _ => vec![0.0, 1.0, 0.0],
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_exact_tier() {
        let matches = matcher()
            .match_skills(&skills(&["React", "SQL"]), &skills(&["react", "sql"]), None)
            .await;
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.similarity == 1.0));
        assert!(matches.iter().all(|m| m.relevance == Relevance::High));
    }

    #[tokio::test]
    async fn test_fuzzy_tier_catches_typo() {
        let matches = matcher()
            .match_skills(&skills(&["Javascrip"]), &skills(&["JavaScript"]), None)
            .await;
        assert_eq!(matches.len(), 1);
        assert!((matches[0].similarity - 0.9).abs() < 1e-9);
        assert_eq!(matches[0].relevance, Relevance::High);
    }

    #[tokio::test]
    async fn test_fuzzy_below_090_is_medium() {
        // Transposed "pi": distance 2 over 10 chars -> similarity 0.8
        let matches = matcher()
            .match_skills(&skills(&["Javascrpit"]), &skills(&["JavaScript"]), None)
            .await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].relevance, Relevance::Medium);
    }

    #[tokio::test]
    async fn test_semantic_tier_matches_synonym() {
        let matches = matcher()
            .match_skills(
                &skills(&["Kubernetes"]),
                &skills(&["Container Orchestration"]),
                Some(&StubEmbedder),
            )
            .await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].resume_skill, "Kubernetes");
        assert_eq!(matches[0].relevance, Relevance::High);
    }

    #[tokio::test]
    async fn test_semantic_tier_respects_threshold() {
        let matches = matcher()
            .match_skills(
                &skills(&["Watercolor Painting"]),
                &skills(&["Kubernetes"]),
                Some(&StubEmbedder),
            )
            .await;
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_semantic_skipped_without_embedder() {
        let matches = matcher()
            .match_skills(
                &skills(&["Kubernetes"]),
                &skills(&["Container Orchestration"]),
                None,
            )
            .await;
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_earlier_tiers_exclude_skills() {
        // "React" matches exactly; the fuzzy tier must not re-match it to
        // "Reacts".
        let matches = matcher()
            .match_skills(&skills(&["React"]), &skills(&["React", "Reacts"]), None)
            .await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].job_skill, "React");
    }

    #[tokio::test]
    async fn test_empty_inputs() {
        let matches = matcher().match_skills(&[], &skills(&["React"]), None).await;
        assert!(matches.is_empty());
        let matches = matcher().match_skills(&skills(&["React"]), &[], None).await;
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_deterministic_on_repeat() {
        let resume = skills(&["React", "Nodejs", "SQL"]);
        let job = skills(&["react", "node.js", "sql", "python"]);
        let first = matcher().match_skills(&resume, &job, None).await;
        let second = matcher().match_skills(&resume, &job, None).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_sorted_by_similarity() {
        let matches = matcher()
            .match_skills(
                &skills(&["React", "Javascrip"]),
                &skills(&["JavaScript", "React"]),
                None,
            )
            .await;
        assert_eq!(matches.len(), 2);
        assert!(matches[0].similarity >= matches[1].similarity);
    }

    #[test]
    fn test_match_simple_substring() {
        let matches = match_simple(&skills(&["React Native"]), &skills(&["React"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].relevance, Relevance::High);
    }

    #[test]
    fn test_match_simple_all_exact() {
        let matches = match_simple(
            &skills(&["react", "node", "sql"]),
            &skills(&["react", "node", "sql"]),
        );
        assert_eq!(matches.len(), 3);
    }
}
