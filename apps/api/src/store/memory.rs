use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::assessment::AssessmentResult;
use crate::models::cv::CandidateCv;
use crate::models::decision::HiringDecision;
use crate::models::job::Job;
use crate::models::user::User;
use crate::store::{
    AssessmentStore, CandidateStore, DecisionStore, JobStore, StoreError, UserStore,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    jobs: HashMap<Uuid, Job>,
    cvs: HashMap<Uuid, CandidateCv>,
    assessments: Vec<AssessmentResult>,
    decisions: HashMap<Uuid, HiringDecision>,
}

/// Process-local store. All tables sit behind one lock so cascading deletes
/// stay consistent.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!(
                "An account with email {} already exists",
                user.email
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn insert_job(&self, job: &Job) -> Result<(), StoreError> {
        self.tables.write().await.jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        Ok(self.tables.read().await.jobs.get(&id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let mut jobs: Vec<Job> = self.tables.read().await.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(jobs)
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.jobs.remove(&id).is_none() {
            return Ok(false);
        }
        let cv_ids: Vec<Uuid> = tables
            .cvs
            .values()
            .filter(|cv| cv.job_id == id)
            .map(|cv| cv.id)
            .collect();
        for cv_id in &cv_ids {
            tables.cvs.remove(cv_id);
            tables.decisions.remove(cv_id);
        }
        tables.assessments.retain(|a| !cv_ids.contains(&a.cv_id));
        Ok(true)
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn insert_cv(&self, cv: &CandidateCv) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .cvs
            .values()
            .any(|c| c.job_id == cv.job_id && c.applicant_id == cv.applicant_id)
        {
            return Err(StoreError::Duplicate(format!(
                "Applicant already applied to job {}",
                cv.job_id
            )));
        }
        tables.cvs.insert(cv.id, cv.clone());
        Ok(())
    }

    async fn find_cv(&self, id: Uuid) -> Result<Option<CandidateCv>, StoreError> {
        Ok(self.tables.read().await.cvs.get(&id).cloned())
    }

    async fn list_cvs_for_job(&self, job_id: Uuid) -> Result<Vec<CandidateCv>, StoreError> {
        let mut cvs: Vec<CandidateCv> = self
            .tables
            .read()
            .await
            .cvs
            .values()
            .filter(|cv| cv.job_id == job_id)
            .cloned()
            .collect();
        cvs.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at).then(a.id.cmp(&b.id)));
        Ok(cvs)
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    async fn insert_assessment(&self, result: &AssessmentResult) -> Result<(), StoreError> {
        self.tables.write().await.assessments.push(result.clone());
        Ok(())
    }

    async fn latest_assessment(
        &self,
        cv_id: Uuid,
    ) -> Result<Option<AssessmentResult>, StoreError> {
        // Later pushes win ties on timestamp.
        Ok(self
            .tables
            .read()
            .await
            .assessments
            .iter()
            .filter(|a| a.cv_id == cv_id)
            .fold(None, |latest: Option<&AssessmentResult>, a| match latest {
                Some(l) if l.taken_at > a.taken_at => Some(l),
                _ => Some(a),
            })
            .cloned())
    }
}

#[async_trait]
impl DecisionStore for MemoryStore {
    async fn upsert_decision(&self, decision: &HiringDecision) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .decisions
            .insert(decision.cv_id, decision.clone());
        Ok(())
    }

    async fn find_decision(&self, cv_id: Uuid) -> Result<Option<HiringDecision>, StoreError> {
        Ok(self.tables.read().await.decisions.get(&cv_id).cloned())
    }

    async fn list_decisions_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<HiringDecision>, StoreError> {
        let mut decisions: Vec<HiringDecision> = self
            .tables
            .read()
            .await
            .decisions
            .values()
            .filter(|d| d.job_id == job_id)
            .cloned()
            .collect();
        decisions.sort_by(|a, b| b.decided_at.cmp(&a.decided_at));
        Ok(decisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::CvRequest;
    use crate::models::decision::{Decision, DecisionRequest};
    use crate::models::job::JobRequest;
    use crate::models::user::Role;
    use chrono::{Duration, Utc};

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::Employer,
            created_at: Utc::now(),
        }
    }

    fn job(owner: Uuid) -> Job {
        Job::create(
            JobRequest {
                title: "Engineer".into(),
                description: String::new(),
                skills: vec!["Rust".into()],
                experience: None,
                education: None,
                location: None,
            },
            owner,
        )
        .unwrap()
    }

    fn cv(job_id: Uuid) -> CandidateCv {
        CandidateCv::submit(
            CvRequest {
                applicant_name: "Lin".into(),
                email: "lin@example.com".into(),
                skills: vec!["Rust".into()],
                experience: None,
                education: None,
                work_history: vec![],
            },
            job_id,
            Uuid::new_v4(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store.insert_user(&user("a@example.com")).await.unwrap();
        let err = store.insert_user(&user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let store = MemoryStore::new();
        let u = user("b@example.com");
        store.insert_user(&u).await.unwrap();
        let found = store.find_user_by_email("b@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, u.id);
        assert!(store.find_user_by_email("c@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_assessment_picks_newest() {
        let store = MemoryStore::new();
        let cv_id = Uuid::new_v4();
        let mut older = AssessmentResult::record(cv_id, "Openness", 40.0).unwrap();
        older.taken_at = Utc::now() - Duration::hours(1);
        let newer = AssessmentResult::record(cv_id, "Openness", 90.0).unwrap();
        store.insert_assessment(&newer).await.unwrap();
        store.insert_assessment(&older).await.unwrap();

        let latest = store.latest_assessment(cv_id).await.unwrap().unwrap();
        assert_eq!(latest.score, 90.0);
    }

    #[tokio::test]
    async fn test_upsert_decision_replaces() {
        let store = MemoryStore::new();
        let (cv_id, job_id, staff) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        for decision in [Decision::Hold, Decision::Hire] {
            let d = HiringDecision::new(
                DecisionRequest { decision, notes: None },
                cv_id,
                job_id,
                staff,
            );
            store.upsert_decision(&d).await.unwrap();
        }
        let decisions = store.list_decisions_for_job(job_id).await.unwrap();
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].decision, Decision::Hire);
    }

    #[tokio::test]
    async fn test_second_application_to_same_job_rejected() {
        let store = MemoryStore::new();
        let first = cv(Uuid::new_v4());
        store.insert_cv(&first).await.unwrap();

        let mut again = cv(first.job_id);
        again.applicant_id = first.applicant_id;
        let err = store.insert_cv(&again).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        // Same applicant, different job.
        let mut elsewhere = cv(Uuid::new_v4());
        elsewhere.applicant_id = first.applicant_id;
        store.insert_cv(&elsewhere).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_job_cascades() {
        let store = MemoryStore::new();
        let j = job(Uuid::new_v4());
        store.insert_job(&j).await.unwrap();
        let c = cv(j.id);
        store.insert_cv(&c).await.unwrap();
        store
            .insert_assessment(&AssessmentResult::record(c.id, "Openness", 70.0).unwrap())
            .await
            .unwrap();

        assert!(store.delete_job(j.id).await.unwrap());
        assert!(store.find_cv(c.id).await.unwrap().is_none());
        assert!(store.latest_assessment(c.id).await.unwrap().is_none());
        assert!(!store.delete_job(j.id).await.unwrap());
    }
}
