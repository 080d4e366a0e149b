//! Locating named sections inside free-form resume text
//!
//! Resumes carry no reliable structure, so sections are found by heading
//! heuristics: a line containing a known alias opens the section, and the
//! next standalone all-caps line that is not itself a recognized heading
//! closes it.

use regex::Regex;

/// Heading aliases for the work-experience section.
pub const EXPERIENCE_HEADINGS: &[&str] = &[
    "EXPERIENCE",
    "WORK HISTORY",
    "EMPLOYMENT",
    "PROFESSIONAL EXPERIENCE",
];

/// Heading aliases for the education section.
pub const EDUCATION_HEADINGS: &[&str] = &["EDUCATION", "ACADEMIC BACKGROUND", "QUALIFICATIONS"];

/// Heading aliases for achievements/awards sections.
pub const ACHIEVEMENT_HEADINGS: &[&str] = &[
    "ACHIEVEMENTS",
    "AWARDS",
    "HONORS",
    "CERTIFICATIONS",
    "COMPETITIONS",
];

/// Extract the first section whose heading matches one of `headings`
/// (case-insensitive substring match on the heading line). Returns the
/// heading line plus everything up to the next section boundary, or `None`
/// when no heading is found.
pub fn extract_section(text: &str, headings: &[&str]) -> Option<String> {
    let mut in_section = false;
    let mut collected: Vec<&str> = Vec::new();

    for line in text.lines() {
        let upper = line.trim().to_uppercase();
        let is_heading = headings.iter().any(|h| upper.contains(h));

        if is_heading {
            in_section = true;
            collected = vec![line];
            continue;
        }

        if in_section && is_section_boundary(line.trim(), &upper) {
            break;
        }

        if in_section {
            collected.push(line);
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}

/// A boundary is a short standalone all-caps token line ("SKILLS",
/// "PROJECTS"). Requires at least one letter so bare years or dividers don't
/// truncate the section.
fn is_section_boundary(trimmed: &str, upper: &str) -> bool {
    !trimmed.is_empty()
        && trimmed.len() < 50
        && !trimmed.contains(' ')
        && trimmed == upper
        && trimmed.chars().any(|c| c.is_ascii_alphabetic())
}

/// Standard-section presence checks used by the ATS heuristic.
pub struct SectionScanner {
    experience: Regex,
    education: Regex,
    skills: Regex,
}

impl Default for SectionScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionScanner {
    pub fn new() -> Self {
        Self {
            experience: Regex::new(r"(?i)experience|work history|employment")
                .expect("Invalid experience regex"),
            education: Regex::new(r"(?i)education|academic|degree")
                .expect("Invalid education regex"),
            skills: Regex::new(r"(?i)skills|technical skills|competencies")
                .expect("Invalid skills regex"),
        }
    }

    pub fn has_experience(&self, text: &str) -> bool {
        self.experience.is_match(text)
    }

    pub fn has_education(&self, text: &str) -> bool {
        self.education.is_match(text)
    }

    pub fn has_skills(&self, text: &str) -> bool {
        self.skills.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "John Doe\n\
        \n\
        EXPERIENCE\n\
        Software Engineer at Acme\n\
        January 2020 - March 2022\n\
        \n\
        EDUCATION\n\
        B.S. Computer Science\n";

    #[test]
    fn test_extracts_experience_section() {
        let section = extract_section(RESUME, EXPERIENCE_HEADINGS).unwrap();
        assert!(section.contains("Software Engineer at Acme"));
        assert!(section.contains("January 2020 - March 2022"));
        assert!(!section.contains("B.S. Computer Science"));
    }

    #[test]
    fn test_missing_section() {
        assert!(extract_section("no headings here", EXPERIENCE_HEADINGS).is_none());
    }

    #[test]
    fn test_year_line_does_not_close_section() {
        let text = "EXPERIENCE\nDeveloper\n2019-2021\nStill inside\nSKILLS\nRust";
        let section = extract_section(text, EXPERIENCE_HEADINGS).unwrap();
        assert!(section.contains("Still inside"));
        assert!(!section.contains("Rust"));
    }

    #[test]
    fn test_case_insensitive_heading() {
        let text = "Work History\nBarista 2018-2019";
        let section = extract_section(text, EXPERIENCE_HEADINGS).unwrap();
        assert!(section.contains("Barista"));
    }

    #[test]
    fn test_section_scanner() {
        let scanner = SectionScanner::new();
        assert!(scanner.has_experience("Professional Experience: ..."));
        assert!(scanner.has_education("B.S. degree in CS"));
        assert!(scanner.has_skills("Technical Skills: Rust"));
        assert!(!scanner.has_experience("react node sql"));
    }
}
