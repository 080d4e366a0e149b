//! Estimating total years of experience from employment date ranges
//!
//! Best-effort heuristic: dates are scanned inside the experience section
//! only, every discovered range contributes additively, and overlapping roles
//! double-count. Callers must treat the output as an approximation, not an
//! authoritative figure.

use crate::sections::{extract_section, EXPERIENCE_HEADINGS};
use chrono::{Datelike, Utc};
use regex::Regex;

/// Default cap on the summed total, in years.
pub const DEFAULT_MAX_YEARS: f64 = 20.0;

/// One parsed employment range. Months are zero-based (January = 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceInterval {
    pub start_year: i32,
    pub start_month: i32,
    pub end_year: i32,
    pub end_month: i32,
}

impl ExperienceInterval {
    /// Duration in fractional years. Negative spans collapse to zero rather
    /// than subtracting from the total.
    pub fn duration_years(&self) -> f64 {
        let years = f64::from(self.end_year - self.start_year)
            + f64::from(self.end_month - self.start_month) / 12.0;
        years.max(0.0)
    }
}

/// Total years of experience found in `resume_text`, capped at
/// [`DEFAULT_MAX_YEARS`]. Returns 0.0 when no experience section exists.
pub fn extract_years_of_experience(resume_text: &str) -> f64 {
    let now = Utc::now();
    total_years_at(resume_text, now.year(), now.month0() as i32, DEFAULT_MAX_YEARS)
}

/// Same as [`extract_years_of_experience`] with an injectable current date
/// (for "Present"/"Current" endpoints) and cap.
pub fn total_years_at(
    resume_text: &str,
    current_year: i32,
    current_month: i32,
    cap: f64,
) -> f64 {
    let Some(section) = extract_section(resume_text, EXPERIENCE_HEADINGS) else {
        log::debug!("no experience section found, assuming 0 years");
        return 0.0;
    };

    let total: f64 = parse_intervals(&section, current_year, current_month)
        .iter()
        .map(ExperienceInterval::duration_years)
        .sum();

    total.min(cap)
}

/// Scan a text block for date ranges in both supported families:
/// `"<Month> <Year> - <Month> <Year>"` and numeric `"<Year>-<Year>"`, each
/// with a `Present`/`Current` open-ended variant. A leading word that isn't a
/// month name (e.g. "from 2019 - 2021") is ignored and the year parses with
/// month zero.
pub fn parse_intervals(text: &str, current_year: i32, current_month: i32) -> Vec<ExperienceInterval> {
    let range_re = Regex::new(
        r"(?i)\b(?:([a-z]{3,9})\s+)?(\d{4})\s*-\s*(?:(?:([a-z]{3,9})\s+)?(\d{4})|(present|current))\b",
    )
    .expect("Invalid date range regex");

    let mut intervals = Vec::new();

    for caps in range_re.captures_iter(text) {
        let start_year: i32 = match caps.get(2).and_then(|m| m.as_str().parse().ok()) {
            Some(y) => y,
            None => continue,
        };
        let start_month = caps
            .get(1)
            .and_then(|m| month_number(m.as_str()))
            .unwrap_or(0);

        let (end_year, end_month) = if caps.get(5).is_some() {
            // Open-ended range ("Present"/"Current")
            (current_year, current_month)
        } else {
            let end_year: i32 = match caps.get(4).and_then(|m| m.as_str().parse().ok()) {
                Some(y) => y,
                None => continue,
            };
            let end_month = caps
                .get(3)
                .and_then(|m| month_number(m.as_str()))
                .unwrap_or(0);
            (end_year, end_month)
        };

        let interval = ExperienceInterval {
            start_year,
            start_month,
            end_year,
            end_month,
        };
        log::debug!(
            "date range '{}' -> {:.2} years",
            &caps[0],
            interval.duration_years()
        );
        intervals.push(interval);
    }

    intervals
}

/// Map a month name (full or 3-letter abbreviation, plus "sept") to 0-11.
fn month_number(name: &str) -> Option<i32> {
    match name.to_lowercase().as_str() {
        "january" | "jan" => Some(0),
        "february" | "feb" => Some(1),
        "march" | "mar" => Some(2),
        "april" | "apr" => Some(3),
        "may" => Some(4),
        "june" | "jun" => Some(5),
        "july" | "jul" => Some(6),
        "august" | "aug" => Some(7),
        "september" | "sept" | "sep" => Some(8),
        "october" | "oct" => Some(9),
        "november" | "nov" => Some(10),
        "december" | "dec" => Some(11),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_with(ranges: &str) -> String {
        format!("Jane Doe\n\nEXPERIENCE\nEngineer at Acme\n{ranges}\n")
    }

    #[test]
    fn test_month_year_range() {
        let text = resume_with("January 2020 - March 2022");
        let years = total_years_at(&text, 2024, 5, DEFAULT_MAX_YEARS);
        assert!((years - (2.0 + 2.0 / 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_open_range() {
        let text = resume_with("2019 - Present");
        // Reference date June 2024 (month index 5)
        let years = total_years_at(&text, 2024, 5, DEFAULT_MAX_YEARS);
        assert!((years - (5.0 + 5.0 / 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_month_open_range_not_double_counted() {
        let text = resume_with("July 2020 - Present");
        let years = total_years_at(&text, 2024, 6, DEFAULT_MAX_YEARS);
        // Exactly four years; the bare "2020 - Present" reading must not add
        // a second interval.
        assert!((years - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiple_jobs_sum() {
        let text = resume_with("2018 - 2020\nMore work\n2020 - 2022");
        let years = total_years_at(&text, 2024, 0, DEFAULT_MAX_YEARS);
        assert!((years - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_span_discarded() {
        let text = resume_with("2022 - 2020");
        assert_eq!(total_years_at(&text, 2024, 0, DEFAULT_MAX_YEARS), 0.0);
    }

    #[test]
    fn test_cap_applied() {
        let text = resume_with("1990 - 2020");
        assert_eq!(total_years_at(&text, 2024, 0, DEFAULT_MAX_YEARS), 20.0);
    }

    #[test]
    fn test_no_experience_section() {
        assert_eq!(
            total_years_at("react node sql", 2024, 0, DEFAULT_MAX_YEARS),
            0.0
        );
    }

    #[test]
    fn test_dates_outside_section_ignored() {
        let text = "Summary\n2010 - 2015 irrelevant\n\nEXPERIENCE\nDev\n2020 - 2021\n";
        let years = total_years_at(text, 2024, 0, DEFAULT_MAX_YEARS);
        assert!((years - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrecognized_leading_word_parses_numeric() {
        let text = resume_with("from 2019 - 2021");
        let years = total_years_at(&text, 2024, 0, DEFAULT_MAX_YEARS);
        assert!((years - 2.0).abs() < 1e-9);
    }
}
