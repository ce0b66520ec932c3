use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{clean_list, normalize_email, optional, required};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHistoryEntry {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub years: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A CV submitted against a job. The submission is the applicant's application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCv {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub work_history: Vec<WorkHistoryEntry>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CvRequest {
    #[serde(default)]
    pub applicant_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    #[serde(default)]
    pub work_history: Vec<WorkHistoryEntry>,
}

impl CandidateCv {
    pub fn submit(request: CvRequest, job_id: Uuid, applicant_id: Uuid) -> Result<Self, AppError> {
        let work_history = request
            .work_history
            .into_iter()
            .map(validate_work_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: Uuid::new_v4(),
            job_id,
            applicant_id,
            applicant_name: required("applicant_name", &request.applicant_name)?,
            email: normalize_email(&request.email)?,
            skills: clean_list(request.skills),
            experience: optional(request.experience),
            education: optional(request.education),
            work_history,
            submitted_at: Utc::now(),
        })
    }
}

fn validate_work_entry(entry: WorkHistoryEntry) -> Result<WorkHistoryEntry, AppError> {
    if let Some(years) = entry.years {
        if !years.is_finite() || years < 0.0 {
            return Err(AppError::Validation(
                "work_history years must be a non-negative number".to_string(),
            ));
        }
    }
    Ok(WorkHistoryEntry {
        company: required("work_history company", &entry.company)?,
        role: required("work_history role", &entry.role)?,
        years: entry.years,
        description: optional(entry.description),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CvRequest {
        CvRequest {
            applicant_name: " Grace Hopper ".into(),
            email: "Grace@Navy.mil".into(),
            skills: vec!["COBOL".into(), "".into()],
            experience: Some("12 years".into()),
            education: None,
            work_history: vec![WorkHistoryEntry {
                company: "US Navy".into(),
                role: "Rear Admiral".into(),
                years: Some(12.0),
                description: Some("  ".into()),
            }],
        }
    }

    #[test]
    fn test_submit_normalizes() {
        let cv = CandidateCv::submit(request(), Uuid::new_v4(), Uuid::new_v4()).unwrap();
        assert_eq!(cv.applicant_name, "Grace Hopper");
        assert_eq!(cv.email, "grace@navy.mil");
        assert_eq!(cv.skills, vec!["COBOL"]);
        assert_eq!(cv.work_history[0].description, None);
    }

    #[test]
    fn test_submit_rejects_negative_years() {
        let mut req = request();
        req.work_history[0].years = Some(-1.0);
        assert!(CandidateCv::submit(req, Uuid::new_v4(), Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_submit_requires_name() {
        let mut req = request();
        req.applicant_name = String::new();
        assert!(CandidateCv::submit(req, Uuid::new_v4(), Uuid::new_v4()).is_err());
    }
}
