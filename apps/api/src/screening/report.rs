//! Candidate report: derived text assembled from threshold rules.
//!
//! Reports are recomputed on every request and never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::assessment::AssessmentResult;
use crate::models::cv::CandidateCv;
use crate::models::job::Job;
use crate::screening::scoring::{experience_match, partition_skills, skill_overlap, ScreeningInput};

const STRONG_SCORE: f64 = 70.0;
const BASELINE_SCORE: f64 = 50.0;
const SIGNIFICANT_GAP_COUNT: usize = 3;

const SKILL_WEIGHT: f64 = 0.7;
const EXPERIENCE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub cv_id: Uuid,
    pub job_id: Uuid,
    pub applicant_name: String,
    pub trait_name: String,
    pub overall_score: f64,
    pub job_fit: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub experience_match: Option<u32>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
    pub summary: String,
}

impl CandidateReport {
    /// Feeds this report's scores, together with the CV and job it was built
    /// from, into the screening filter.
    pub fn screening_input<'a>(&self, cv: &'a CandidateCv, job: &'a Job) -> ScreeningInput<'a> {
        ScreeningInput {
            overall_score: self.overall_score,
            job_fit: self.job_fit,
            cv_skills: &cv.skills,
            job_skills: &job.skills,
            cv_experience: cv.experience.as_deref(),
            job_experience: job.experience.as_deref(),
        }
    }
}

/// Job fit in 0..=100: 70% skill coverage, 30% experience band.
/// Experience that cannot be compared contributes nothing.
pub fn compute_job_fit(overlap: f64, experience: Option<u32>) -> f64 {
    let skills = overlap * 100.0 * SKILL_WEIGHT;
    let experience = f64::from(experience.unwrap_or(0)) * EXPERIENCE_WEIGHT;
    (skills + experience).round()
}

pub fn generate_report(cv: &CandidateCv, job: &Job, assessment: &AssessmentResult) -> CandidateReport {
    let (matched_skills, missing_skills) = partition_skills(&cv.skills, &job.skills);
    let overlap = skill_overlap(&cv.skills, &job.skills);
    let experience = experience_match(cv.experience.as_deref(), job.experience.as_deref());

    let overall_score = assessment.score;
    let job_fit = compute_job_fit(overlap, experience);

    let mut strengths = Vec::new();
    let mut areas = Vec::new();
    let mut risks = Vec::new();

    if overall_score >= STRONG_SCORE {
        strengths.push(format!(
            "Strong capability shown in the {} assessment ({overall_score:.0}/100)",
            assessment.trait_name
        ));
    }
    if job_fit >= STRONG_SCORE {
        strengths.push(format!("High alignment with the {} role", job.title));
    }
    if !matched_skills.is_empty() {
        strengths.push(format!("Relevant skills: {}", matched_skills.join(", ")));
    }
    if experience == Some(100) {
        strengths.push("Experience meets or exceeds the requirement".to_string());
    }

    for skill in &missing_skills {
        areas.push(format!("Skill gap: {skill}"));
    }
    if overall_score < BASELINE_SCORE {
        areas.push(format!(
            "{} assessment result is below the expected baseline",
            assessment.trait_name
        ));
        risks.push(format!("Low assessment score ({overall_score:.0}/100)"));
    }
    match experience {
        Some(30) => areas.push("Experience is well below the requirement".to_string()),
        Some(70) => areas.push("Experience is slightly below the requirement".to_string()),
        None => risks.push("Experience could not be verified against the requirement".to_string()),
        _ => {}
    }
    if job_fit < BASELINE_SCORE {
        risks.push(format!("Low job fit ({job_fit:.0}%)"));
    }
    if missing_skills.len() >= SIGNIFICANT_GAP_COUNT {
        risks.push(format!(
            "Significant skill gaps ({} required skills missing)",
            missing_skills.len()
        ));
    }

    let recommendations = build_recommendations(overall_score, job_fit, &missing_skills);
    let summary = build_summary(cv, job, assessment, job_fit, matched_skills.len());

    CandidateReport {
        cv_id: cv.id,
        job_id: job.id,
        applicant_name: cv.applicant_name.clone(),
        trait_name: assessment.trait_name.clone(),
        overall_score,
        job_fit,
        matched_skills,
        missing_skills,
        experience_match: experience,
        strengths,
        areas_for_improvement: areas,
        recommendations,
        risk_factors: risks,
        summary,
    }
}

fn build_recommendations(overall_score: f64, job_fit: f64, missing_skills: &[String]) -> Vec<String> {
    let mut recs = Vec::new();

    if overall_score >= STRONG_SCORE && job_fit >= STRONG_SCORE {
        recs.push("Advance to interview".to_string());
    } else if overall_score >= BASELINE_SCORE || job_fit >= BASELINE_SCORE {
        recs.push("Run a follow-up screening focused on the weaker areas".to_string());
    } else {
        recs.push("Not recommended for this role at this stage".to_string());
    }

    if !missing_skills.is_empty() {
        let top: Vec<&str> = missing_skills.iter().take(3).map(String::as_str).collect();
        recs.push(format!("Probe or train for: {}", top.join(", ")));
    }

    recs
}

fn build_summary(
    cv: &CandidateCv,
    job: &Job,
    assessment: &AssessmentResult,
    job_fit: f64,
    matched: usize,
) -> String {
    let skills_line = if job.skills.is_empty() {
        "The posting lists no required skills.".to_string()
    } else {
        format!("{matched} of {} required skills matched.", job.skills.len())
    };
    format!(
        "{} scored {:.0}/100 on the {} assessment and has a {job_fit:.0}% fit for {}. {skills_line}",
        cv.applicant_name, assessment.score, assessment.trait_name, job.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::CvRequest;
    use crate::models::job::JobRequest;
    use crate::screening::scoring::{evaluate, HiringCategory};

    fn job(skills: &[&str], experience: Option<&str>) -> Job {
        Job::create(
            JobRequest {
                title: "Frontend Engineer".into(),
                description: String::new(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
                experience: experience.map(str::to_string),
                education: None,
                location: None,
            },
            Uuid::new_v4(),
        )
        .unwrap()
    }

    fn cv(job_id: Uuid, skills: &[&str], experience: Option<&str>) -> CandidateCv {
        CandidateCv::submit(
            CvRequest {
                applicant_name: "Ada".into(),
                email: "ada@example.com".into(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
                experience: experience.map(str::to_string),
                education: None,
                work_history: vec![],
            },
            job_id,
            Uuid::new_v4(),
        )
        .unwrap()
    }

    fn assessment(cv_id: Uuid, score: f64) -> AssessmentResult {
        AssessmentResult::record(cv_id, "Conscientiousness", score).unwrap()
    }

    #[test]
    fn test_job_fit_formula() {
        assert_eq!(compute_job_fit(1.0, Some(100)), 100.0);
        // 66.67 * 0.7 + 100 * 0.3 = 76.67
        assert_eq!(compute_job_fit(2.0 / 3.0, Some(100)), 77.0);
        assert_eq!(compute_job_fit(0.5, None), 35.0);
        assert_eq!(compute_job_fit(0.0, None), 0.0);
    }

    #[test]
    fn test_strong_candidate_report() {
        let j = job(&["React", "Node", "SQL"], Some("3 years"));
        let c = cv(j.id, &["React", "Node"], Some("5 years"));
        let report = generate_report(&c, &j, &assessment(c.id, 90.0));

        assert_eq!(report.job_fit, 77.0);
        assert_eq!(report.matched_skills, vec!["React", "Node"]);
        assert_eq!(report.missing_skills, vec!["SQL"]);
        assert!(report.strengths.iter().any(|s| s.starts_with("Strong capability")));
        assert!(report.strengths.iter().any(|s| s.contains("Frontend Engineer")));
        assert_eq!(report.areas_for_improvement, vec!["Skill gap: SQL"]);
        assert!(report.risk_factors.is_empty());
        assert_eq!(report.recommendations[0], "Advance to interview");
        assert!(report.summary.contains("2 of 3 required skills matched"));

        let result = evaluate(&report.screening_input(&c, &j));
        assert_eq!(result.category, HiringCategory::HighPotential);
    }

    #[test]
    fn test_weak_candidate_report_flags_risks() {
        let j = job(&["Python", "Django", "AWS", "Docker"], Some("5 years"));
        let c = cv(j.id, &[], None);
        let report = generate_report(&c, &j, &assessment(c.id, 35.0));

        assert!(report.strengths.is_empty());
        assert_eq!(report.missing_skills.len(), 4);
        assert!(report.risk_factors.iter().any(|r| r.starts_with("Low assessment score")));
        assert!(report.risk_factors.iter().any(|r| r.starts_with("Low job fit")));
        assert!(report.risk_factors.iter().any(|r| r.starts_with("Significant skill gaps")));
        assert!(report
            .risk_factors
            .iter()
            .any(|r| r.contains("could not be verified")));
        assert_eq!(
            report.recommendations[0],
            "Not recommended for this role at this stage"
        );
        assert_eq!(
            report.recommendations[1],
            "Probe or train for: Python, Django, AWS"
        );
    }

    #[test]
    fn test_middle_candidate_gets_follow_up() {
        let j = job(&["Go"], Some("10 years"));
        let c = cv(j.id, &["Go"], Some("7 years"));
        let report = generate_report(&c, &j, &assessment(c.id, 60.0));

        // 100 * 0.7 + 70 * 0.3 = 91
        assert_eq!(report.job_fit, 91.0);
        assert!(report
            .areas_for_improvement
            .contains(&"Experience is slightly below the requirement".to_string()));
        assert_eq!(
            report.recommendations[0],
            "Run a follow-up screening focused on the weaker areas"
        );
    }

    #[test]
    fn test_no_required_skills_summary() {
        let j = job(&[], None);
        let c = cv(j.id, &["Rust"], None);
        let report = generate_report(&c, &j, &assessment(c.id, 75.0));
        assert!(report.summary.ends_with("The posting lists no required skills."));
    }

    #[test]
    fn test_unverifiable_experience_flagged_without_job_requirement() {
        let j = job(&["Rust"], None);
        let c = cv(j.id, &["Rust"], Some("6 years"));
        let report = generate_report(&c, &j, &assessment(c.id, 85.0));

        assert_eq!(report.experience_match, None);
        assert!(report
            .risk_factors
            .contains(&"Experience could not be verified against the requirement".to_string()));
    }
}
