//! Candidate scoring: the weighted filter score used to bucket applicants.
//!
//! Pure functions over plain data. Nothing here touches storage or HTTP, and
//! nothing here fails: missing or unparseable inputs degrade to zero-valued
//! components.
//!
//! Algorithm:
//! 1. personality = overall_score × 0.40
//! 2. job_fit     = job_fit × 0.30
//! 3. skills      = skill_overlap × 100 × 0.20
//! 4. experience  = experience_match (100 / 70 / 30, or 0 when not comparable) × 0.10
//! 5. filter_score = round(Σ), category by fixed inclusive lower bounds 80 / 65 / 50

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// "5 years", "3+ years", "10 Year". Takes the first integer directly followed by "year".
static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*\+?\s*year").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Weights & categories
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterWeights {
    pub personality: f64,
    pub job_fit: f64,
    pub skills: f64,
    pub experience: f64,
}

impl Default for FilterWeights {
    fn default() -> Self {
        Self {
            personality: 0.40,
            job_fit: 0.30,
            skills: 0.20,
            experience: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiringCategory {
    HighPotential,
    GoodFit,
    NeedsDevelopment,
    NotSuitable,
}

impl HiringCategory {
    /// Lower bounds are inclusive: 80 is high potential, 79 is a good fit.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => HiringCategory::HighPotential,
            s if s >= 65 => HiringCategory::GoodFit,
            s if s >= 50 => HiringCategory::NeedsDevelopment,
            _ => HiringCategory::NotSuitable,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs & outputs
// ────────────────────────────────────────────────────────────────────────────

/// Everything the filter looks at. Scores are expected in 0..=100.
#[derive(Debug, Clone, Copy)]
pub struct ScreeningInput<'a> {
    pub overall_score: f64,
    pub job_fit: f64,
    pub cv_skills: &'a [String],
    pub job_skills: &'a [String],
    pub cv_experience: Option<&'a str>,
    pub job_experience: Option<&'a str>,
}

/// Weighted contribution of each component to the filter score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub personality: f64,
    pub job_fit: f64,
    pub skills: f64,
    pub experience: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.personality + self.job_fit + self.skills + self.experience
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    pub filter_score: u32,
    pub category: HiringCategory,
    pub breakdown: ScoreBreakdown,
    pub skill_overlap: f64,
    /// 100 / 70 / 30, or `None` when either side has no year count.
    pub experience_match: Option<u32>,
    pub reasoning: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// String heuristics
// ────────────────────────────────────────────────────────────────────────────

/// Case-insensitive substring containment in either direction.
///
/// Deliberately loose: "Java" matches "JavaScript". Blank skills never match.
pub fn skill_matches(cv_skill: &str, job_skill: &str) -> bool {
    let cv = cv_skill.trim().to_lowercase();
    let job = job_skill.trim().to_lowercase();
    if cv.is_empty() || job.is_empty() {
        return false;
    }
    cv.contains(&job) || job.contains(&cv)
}

/// Splits the job's required skills into (matched, missing), preserving job order.
pub fn partition_skills(cv_skills: &[String], job_skills: &[String]) -> (Vec<String>, Vec<String>) {
    job_skills
        .iter()
        .cloned()
        .partition(|job_skill| cv_skills.iter().any(|cv| skill_matches(cv, job_skill)))
}

/// Fraction of required job skills covered by the CV, in [0, 1].
/// An empty requirement list yields 0 rather than dividing by zero.
pub fn skill_overlap(cv_skills: &[String], job_skills: &[String]) -> f64 {
    if job_skills.is_empty() {
        return 0.0;
    }
    let (matched, _) = partition_skills(cv_skills, job_skills);
    matched.len() as f64 / job_skills.len() as f64
}

/// First integer followed by the word "year". `None` when there is none.
pub fn extract_years(text: &str) -> Option<u32> {
    YEARS_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 100 when the CV meets the requirement, 70 within 70% of it, 30 below that.
/// `None` when either text lacks a year count.
pub fn experience_match(cv_experience: Option<&str>, job_experience: Option<&str>) -> Option<u32> {
    let cv_years = extract_years(cv_experience?)?;
    let job_years = extract_years(job_experience?)?;

    let band = if cv_years >= job_years {
        100
    } else if f64::from(cv_years) >= 0.7 * f64::from(job_years) {
        70
    } else {
        30
    };
    Some(band)
}

// ────────────────────────────────────────────────────────────────────────────
// Filter
// ────────────────────────────────────────────────────────────────────────────

pub fn evaluate(input: &ScreeningInput<'_>) -> FilterResult {
    evaluate_with(input, &FilterWeights::default())
}

pub fn evaluate_with(input: &ScreeningInput<'_>, weights: &FilterWeights) -> FilterResult {
    let overlap = skill_overlap(input.cv_skills, input.job_skills);
    let experience = experience_match(input.cv_experience, input.job_experience);

    let breakdown = ScoreBreakdown {
        personality: input.overall_score * weights.personality,
        job_fit: input.job_fit * weights.job_fit,
        skills: overlap * 100.0 * weights.skills,
        experience: f64::from(experience.unwrap_or(0)) * weights.experience,
    };

    // `as` saturates, so a negative total lands on 0.
    let filter_score = breakdown.total().round() as u32;

    FilterResult {
        filter_score,
        category: HiringCategory::from_score(filter_score),
        reasoning: build_reasoning(input, overlap, experience),
        breakdown,
        skill_overlap: overlap,
        experience_match: experience,
    }
}

fn build_reasoning(input: &ScreeningInput<'_>, overlap: f64, experience: Option<u32>) -> Vec<String> {
    let personality = if input.overall_score >= 80.0 {
        "Excellent personality assessment result"
    } else if input.overall_score >= 60.0 {
        "Solid personality assessment result"
    } else {
        "Personality assessment result below expectations"
    };

    let job_fit = if input.job_fit >= 80.0 {
        "Strong job fit"
    } else if input.job_fit >= 60.0 {
        "Reasonable job fit"
    } else {
        "Weak job fit"
    };

    let skills = if input.job_skills.is_empty() {
        "No required skills listed for this job".to_string()
    } else {
        let pct = (overlap * 100.0).round();
        if overlap >= 0.70 {
            format!("Strong skill alignment ({pct}% of required skills)")
        } else if overlap >= 0.50 {
            format!("Moderate skill alignment ({pct}% of required skills)")
        } else {
            format!("Limited skill alignment ({pct}% of required skills)")
        }
    };

    let experience = match experience {
        Some(100) => "Meets or exceeds the experience requirement",
        Some(70) => "Close to the experience requirement",
        Some(_) => "Below the experience requirement",
        None => "Experience could not be compared with the requirement",
    };

    vec![
        personality.to_string(),
        job_fit.to_string(),
        skills,
        experience.to_string(),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn input<'a>(
        overall: f64,
        fit: f64,
        cv_skills: &'a [String],
        job_skills: &'a [String],
        cv_exp: Option<&'a str>,
        job_exp: Option<&'a str>,
    ) -> ScreeningInput<'a> {
        ScreeningInput {
            overall_score: overall,
            job_fit: fit,
            cv_skills,
            job_skills,
            cv_experience: cv_exp,
            job_experience: job_exp,
        }
    }

    #[test]
    fn test_skill_matches_either_direction() {
        assert!(skill_matches("react", "React"));
        assert!(skill_matches("React Native", "react"));
        assert!(skill_matches("SQL", "PostgreSQL"));
        assert!(!skill_matches("Python", "Rust"));
    }

    #[test]
    fn test_java_matches_javascript_quirk() {
        assert!(skill_matches("Java", "JavaScript"));
        assert!(skill_matches("JavaScript", "Java"));
    }

    #[test]
    fn test_blank_skill_never_matches() {
        assert!(!skill_matches("", "Rust"));
        assert!(!skill_matches("  ", "Rust"));
        assert!(!skill_matches("Rust", ""));
    }

    #[test]
    fn test_skill_overlap_fraction() {
        let cv = skills(&["React", "Node"]);
        let job = skills(&["React", "Node", "SQL"]);
        let overlap = skill_overlap(&cv, &job);
        assert!((overlap - 2.0 / 3.0).abs() < 1e-9, "overlap was {overlap}");
    }

    #[test]
    fn test_skill_overlap_bounded_and_order_independent() {
        let cv = skills(&["rust", "go", "sql", "docker", "kubernetes"]);
        let job = skills(&["Docker", "Rust", "Terraform"]);
        let forward = skill_overlap(&cv, &job);

        let mut cv_rev = cv.clone();
        cv_rev.reverse();
        let mut job_rev = job.clone();
        job_rev.reverse();
        let reversed = skill_overlap(&cv_rev, &job_rev);

        assert!((0.0..=1.0).contains(&forward));
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_skill_overlap_empty_job_skills_is_zero() {
        assert_eq!(skill_overlap(&skills(&["Rust"]), &[]), 0.0);
    }

    #[test]
    fn test_partition_skills_keeps_job_order() {
        let (matched, missing) =
            partition_skills(&skills(&["node.js"]), &skills(&["SQL", "Node", "AWS"]));
        assert_eq!(matched, vec!["Node"]);
        assert_eq!(missing, vec!["SQL", "AWS"]);
    }

    #[test]
    fn test_extract_years() {
        assert_eq!(extract_years("5 years"), Some(5));
        assert_eq!(extract_years("3+ years of backend work"), Some(3));
        assert_eq!(extract_years("At least 10 Years"), Some(10));
        assert_eq!(extract_years("1 year"), Some(1));
        assert_eq!(extract_years("Led 4 teams over 6 years"), Some(6));
        assert_eq!(extract_years("senior"), None);
        assert_eq!(extract_years(""), None);
    }

    #[test]
    fn test_experience_bands() {
        assert_eq!(experience_match(Some("5 years"), Some("3 years")), Some(100));
        assert_eq!(experience_match(Some("3 years"), Some("3 years")), Some(100));
        // 7 >= 0.7 * 10
        assert_eq!(experience_match(Some("7 years"), Some("10 years")), Some(70));
        assert_eq!(experience_match(Some("6 years"), Some("10 years")), Some(30));
    }

    #[test]
    fn test_experience_missing_is_none() {
        assert_eq!(experience_match(None, Some("3 years")), None);
        assert_eq!(experience_match(Some("5 years"), None), None);
        assert_eq!(experience_match(Some(""), Some("2 years")), None);
        assert_eq!(experience_match(Some("plenty"), Some("2 years")), None);
    }

    #[test]
    fn test_category_boundaries_inclusive() {
        assert_eq!(HiringCategory::from_score(100), HiringCategory::HighPotential);
        assert_eq!(HiringCategory::from_score(80), HiringCategory::HighPotential);
        assert_eq!(HiringCategory::from_score(79), HiringCategory::GoodFit);
        assert_eq!(HiringCategory::from_score(65), HiringCategory::GoodFit);
        assert_eq!(HiringCategory::from_score(64), HiringCategory::NeedsDevelopment);
        assert_eq!(HiringCategory::from_score(50), HiringCategory::NeedsDevelopment);
        assert_eq!(HiringCategory::from_score(49), HiringCategory::NotSuitable);
        assert_eq!(HiringCategory::from_score(0), HiringCategory::NotSuitable);
    }

    #[test]
    fn test_strong_candidate_example() {
        let cv = skills(&["React", "Node"]);
        let job = skills(&["React", "Node", "SQL"]);
        let result = evaluate(&input(90.0, 85.0, &cv, &job, Some("5 years"), Some("3 years")));

        assert!((result.breakdown.personality - 36.0).abs() < 1e-9);
        assert!((result.breakdown.job_fit - 25.5).abs() < 1e-9);
        assert!((result.breakdown.skills - 13.333).abs() < 1e-3);
        assert!((result.breakdown.experience - 10.0).abs() < 1e-9);
        assert_eq!(result.filter_score, 85);
        assert_eq!(result.category, HiringCategory::HighPotential);
        assert_eq!(result.experience_match, Some(100));
    }

    #[test]
    fn test_weak_candidate_example() {
        let cv: Vec<String> = vec![];
        let job = skills(&["Python"]);
        let result = evaluate(&input(40.0, 30.0, &cv, &job, Some(""), Some("2 years")));

        assert_eq!(result.breakdown.skills, 0.0);
        assert_eq!(result.breakdown.experience, 0.0);
        assert_eq!(result.filter_score, 25);
        assert_eq!(result.category, HiringCategory::NotSuitable);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let cv = skills(&["Rust", "SQL"]);
        let job = skills(&["Rust", "Kafka"]);
        let i = input(72.5, 61.0, &cv, &job, Some("4 years"), Some("5 years"));
        let first = evaluate(&i);
        for _ in 0..10 {
            assert_eq!(evaluate(&i), first);
        }
    }

    #[test]
    fn test_empty_job_skills_and_missing_experience() {
        let cv = skills(&["Rust"]);
        let result = evaluate(&input(100.0, 100.0, &cv, &[], None, None));
        // 40 + 30, nothing else
        assert_eq!(result.filter_score, 70);
        assert_eq!(result.category, HiringCategory::GoodFit);
        assert_eq!(result.experience_match, None);
    }

    #[test]
    fn test_score_at_exact_boundary() {
        // 50 * 0.4 + 100 * 0.3 + 0 + 100 * 0.1 = 60; plus full skills 20 = 80
        let cv = skills(&["Go"]);
        let job = skills(&["Go"]);
        let result = evaluate(&input(50.0, 100.0, &cv, &job, Some("2 years"), Some("2 years")));
        assert_eq!(result.filter_score, 80);
        assert_eq!(result.category, HiringCategory::HighPotential);
    }

    #[test]
    fn test_reasoning_thresholds() {
        let cv = skills(&["A", "B", "C"]);
        let job = skills(&["A", "B", "C", "D"]);
        let result = evaluate(&input(85.0, 65.0, &cv, &job, Some("7 years"), Some("10 years")));
        assert_eq!(result.reasoning[0], "Excellent personality assessment result");
        assert_eq!(result.reasoning[1], "Reasonable job fit");
        assert!(result.reasoning[2].starts_with("Strong skill alignment"));
        assert_eq!(result.reasoning[3], "Close to the experience requirement");

        let job = skills(&["A", "X"]);
        let result = evaluate(&input(10.0, 10.0, &cv, &job, None, None));
        assert!(result.reasoning[2].starts_with("Moderate skill alignment"));
        assert_eq!(
            result.reasoning[3],
            "Experience could not be compared with the requirement"
        );
    }

    #[test]
    fn test_custom_weights() {
        let weights = FilterWeights {
            personality: 1.0,
            job_fit: 0.0,
            skills: 0.0,
            experience: 0.0,
        };
        let result = evaluate_with(&input(64.4, 100.0, &[], &[], None, None), &weights);
        assert_eq!(result.filter_score, 64);
    }
}
