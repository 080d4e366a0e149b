//! Data model for skill matching, scoring, and feedback
//!
//! Response-contract types serialize camelCase for the consuming layer; the
//! AI boundary types (`ExtractedSkills`, `JobRequirements`) mirror the
//! provider's snake_case JSON.

use serde::{Deserialize, Serialize};

/// Relevance tier derived from a continuous similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    /// Bucket a semantic similarity score: >= 0.8 high, >= 0.6 medium.
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= 0.8 {
            Relevance::High
        } else if similarity >= 0.6 {
            Relevance::Medium
        } else {
            Relevance::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapPriority {
    #[serde(rename = "critical")]
    Critical,
    #[serde(rename = "important")]
    Important,
    #[serde(rename = "nice-to-have")]
    NiceToHave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Tool,
    Certification,
    Domain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillSource {
    #[serde(rename = "resume")]
    Resume,
    #[serde(rename = "job_description")]
    JobDescription,
}

/// A categorized skill as extracted from one side of the comparison.
/// Immutable once built; comparison always goes through [`normalize_skill`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub category: SkillCategory,
    pub source: SkillSource,
}

/// Case-fold and trim a skill name for comparison.
pub fn normalize_skill(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One resume-skill/job-skill pairing produced by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    pub resume_skill: String,
    pub job_skill: String,
    pub similarity: f64,
    pub relevance: Relevance,
}

/// A matched resume skill as it appears in the analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedSkill {
    pub skill: String,
    pub relevance: Relevance,
    pub category: SkillCategory,
    pub source: SkillSource,
}

/// A job skill the resume does not cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub priority: GapPriority,
    pub category: SkillCategory,
}

/// Categorized skills extracted from free text by the external capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools: Vec<String>,
    pub certifications: Vec<String>,
    pub domain_keywords: Vec<String>,
    /// Flattened union of the categorized lists, in category order.
    pub all_skills: Vec<String>,
}

impl ExtractedSkills {
    /// Rebuild the flattened list from the categorized ones.
    pub fn with_all_skills(mut self) -> Self {
        self.all_skills = self
            .technical_skills
            .iter()
            .chain(&self.soft_skills)
            .chain(&self.tools)
            .chain(&self.certifications)
            .chain(&self.domain_keywords)
            .cloned()
            .collect();
        self
    }

    /// Skill records carrying the category each skill was extracted under.
    pub fn records(&self, source: SkillSource) -> Vec<SkillRecord> {
        let tagged = [
            (&self.technical_skills, SkillCategory::Technical),
            (&self.soft_skills, SkillCategory::Soft),
            (&self.tools, SkillCategory::Tool),
            (&self.certifications, SkillCategory::Certification),
            (&self.domain_keywords, SkillCategory::Domain),
        ];
        tagged
            .iter()
            .flat_map(|(skills, category)| {
                skills.iter().map(|name| SkillRecord {
                    name: name.clone(),
                    category: *category,
                    source,
                })
            })
            .collect()
    }
}

/// Structured requirements extracted from a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub experience_requirements: Vec<String>,
    /// Required + preferred, the list the matcher runs against.
    pub all_required_skills: Vec<String>,
}

impl JobRequirements {
    pub fn with_all_required(mut self) -> Self {
        self.all_required_skills = self
            .required_skills
            .iter()
            .chain(&self.preferred_skills)
            .cloned()
            .collect();
        self
    }
}

/// Component scores, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub experience_match: u8,
    pub skills: u8,
    pub education: u8,
    pub achievements: u8,
    pub ats: u8,
}

/// Per-component weights; every band sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub experience_match: f64,
    pub skills: f64,
    pub education: f64,
    pub achievements: f64,
    pub ats: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.experience_match + self.skills + self.education + self.achievements + self.ats
    }
}

/// The aggregate produced once per analysis request. Never mutated after
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub ats_score: u8,
    pub domain: String,
    pub score_breakdown: ScoreBreakdown,
    pub weights: ScoringWeights,
    pub total_years_experience: f64,
    pub matched_skills: Vec<MatchedSkill>,
    pub missing_skills: Vec<SkillGap>,
    pub relevant_experiences: Vec<String>,
    pub experience_gaps: Vec<String>,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub ats_tips: Vec<String>,
    pub suggested_bullets: Vec<String>,
    /// Deprecated flat list of gap names, kept for older consumers.
    pub missing_keywords: Vec<String>,
}

// --- Feedback synthesis output -------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOverviewData {
    pub top_strengths: Vec<String>,
    pub top_improvements: Vec<String>,
    pub priority_actions: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredSkillsData {
    pub skill_gaps: Vec<String>,
    pub missing_critical_skills: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceData {
    pub duration_analysis: String,
    pub relevant_experiences: Vec<String>,
    pub experience_gaps: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationCredentialsData {
    pub education_match: String,
    pub missing_credentials: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAchievementsData {
    pub current_achievements: Vec<String>,
    pub missing_metrics: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsCompatibilityData {
    pub ats_issues: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub formatting_problems: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalQualityData {
    pub writing_issues: Vec<String>,
    pub consistency_problems: Vec<String>,
    pub formatting_concerns: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

/// Synthesized improvement feedback: flat legacy lists plus the richer
/// per-category structure. The category fields are optional so that older
/// provider responses still validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveFeedback {
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub experience_gaps: Vec<String>,
    pub relevant_experiences: Vec<String>,
    pub ats_tips: Vec<String>,
    pub suggested_bullets: Vec<String>,

    #[serde(default)]
    pub match_overview: Option<MatchOverviewData>,
    #[serde(default)]
    pub required_skills: Option<RequiredSkillsData>,
    #[serde(default)]
    pub work_experience: Option<WorkExperienceData>,
    #[serde(default)]
    pub education_credentials: Option<EducationCredentialsData>,
    #[serde(default)]
    pub impact_achievements: Option<ImpactAchievementsData>,
    #[serde(default)]
    pub ats_compatibility: Option<AtsCompatibilityData>,
    #[serde(default)]
    pub professional_quality: Option<ProfessionalQualityData>,
}

// --- Category response contract ------------------------------------------

/// Stable identifiers for the seven response categories. The full names the
/// synthesizer sometimes emits are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    #[serde(alias = "matchOverview")]
    Overview,
    #[serde(alias = "requiredSkills")]
    Skills,
    #[serde(alias = "workExperience")]
    Experience,
    #[serde(alias = "educationCredentials")]
    Education,
    #[serde(alias = "impactAchievements")]
    Impact,
    #[serde(alias = "atsCompatibility")]
    Ats,
    #[serde(alias = "professionalQuality")]
    Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub category: CategoryId,
    pub title: String,
    pub description: String,
    pub priority: ActionPriority,
    pub estimated_impact: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOverviewCategory {
    pub score: u8,
    pub action_items_count: usize,
    pub action_items: Vec<ActionItem>,
    pub top_strengths: Vec<String>,
    pub top_improvements: Vec<String>,
    pub priority_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredSkillsCategory {
    pub score: u8,
    pub action_items_count: usize,
    pub action_items: Vec<ActionItem>,
    pub matched_skills: Vec<MatchedSkill>,
    pub missing_skills: Vec<SkillGap>,
    pub skill_gaps: Vec<String>,
    pub missing_critical_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceCategory {
    pub score: u8,
    pub action_items_count: usize,
    pub action_items: Vec<ActionItem>,
    pub duration_analysis: String,
    pub relevant_experiences: Vec<String>,
    pub experience_gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationCredentialsCategory {
    pub score: u8,
    pub action_items_count: usize,
    pub action_items: Vec<ActionItem>,
    pub education_match: String,
    pub missing_credentials: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAchievementsCategory {
    pub score: u8,
    pub action_items_count: usize,
    pub action_items: Vec<ActionItem>,
    pub current_achievements: Vec<String>,
    pub missing_metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsCompatibilityCategory {
    pub score: u8,
    pub action_items_count: usize,
    pub action_items: Vec<ActionItem>,
    pub ats_issues: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub formatting_problems: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalQualityCategory {
    pub score: u8,
    pub action_items_count: usize,
    pub action_items: Vec<ActionItem>,
    pub writing_issues: Vec<String>,
    pub consistency_problems: Vec<String>,
    pub formatting_concerns: Vec<String>,
}

/// The fixed seven-bucket response consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysisResponse {
    pub overview: MatchOverviewCategory,
    pub skills: RequiredSkillsCategory,
    pub experience: WorkExperienceCategory,
    pub education: EducationCredentialsCategory,
    pub impact: ImpactAchievementsCategory,
    pub ats: AtsCompatibilityCategory,
    pub quality: ProfessionalQualityCategory,
}
