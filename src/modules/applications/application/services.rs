use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::applications::application::{
    domain::{ApplicationStatus, JobApplication},
    ports::{
        incoming::{ApplicationActor, ApplicationError, ApplicationUseCase},
        outgoing::{ApplicationRepository, ApplicationRepositoryError, NewApplication},
    },
};
use crate::candidates::application::{
    domain::Candidate, ports::outgoing::CandidateRepository,
};
use crate::companies::application::{domain::Company, ports::outgoing::CompanyRepository};
use crate::jobs::application::{domain::Job, ports::outgoing::JobRepository};
use crate::shared::status::StatusMachine;

impl From<ApplicationRepositoryError> for ApplicationError {
    fn from(err: ApplicationRepositoryError) -> Self {
        match err {
            ApplicationRepositoryError::AlreadyApplied => ApplicationError::AlreadyApplied,
            ApplicationRepositoryError::DatabaseError(msg) => ApplicationError::Internal(msg),
        }
    }
}

fn internal(err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Internal(err.to_string())
}

pub struct ApplicationService<A>
where
    A: ApplicationRepository,
{
    applications: A,
    jobs: Arc<dyn JobRepository>,
    candidates: Arc<dyn CandidateRepository>,
    companies: Arc<dyn CompanyRepository>,
}

impl<A> ApplicationService<A>
where
    A: ApplicationRepository,
{
    pub fn new(
        applications: A,
        jobs: Arc<dyn JobRepository>,
        candidates: Arc<dyn CandidateRepository>,
        companies: Arc<dyn CompanyRepository>,
    ) -> Self {
        Self {
            applications,
            jobs,
            candidates,
            companies,
        }
    }

    async fn job(&self, job_id: Uuid) -> Result<Job, ApplicationError> {
        self.jobs
            .find_by_id(job_id)
            .await
            .map_err(internal)?
            .ok_or(ApplicationError::JobNotFound)
    }

    async fn candidate_of(&self, user_id: Uuid) -> Result<Candidate, ApplicationError> {
        self.candidates
            .find_by_user(user_id)
            .await
            .map_err(internal)?
            .ok_or(ApplicationError::CandidateProfileMissing)
    }

    async fn company_of(&self, user_id: Uuid) -> Result<Company, ApplicationError> {
        self.companies
            .find_by_owner(user_id)
            .await
            .map_err(internal)?
            .ok_or(ApplicationError::CompanyMissing)
    }

    /// The employer may only touch applications to its own jobs.
    async fn ensure_employer_of(&self, user_id: Uuid, job_id: Uuid) -> Result<(), ApplicationError> {
        let company = self.company_of(user_id).await?;
        let job = self.job(job_id).await?;
        if job.employer_id != company.id {
            return Err(ApplicationError::Forbidden);
        }
        Ok(())
    }
}

#[async_trait]
impl<A> ApplicationUseCase for ApplicationService<A>
where
    A: ApplicationRepository,
{
    async fn apply(
        &self,
        job_id: Uuid,
        candidate_user: Uuid,
        cover_letter: Option<String>,
    ) -> Result<JobApplication, ApplicationError> {
        let job = self.job(job_id).await?;
        if !job.is_open(Utc::now()) {
            return Err(ApplicationError::JobClosed);
        }

        let candidate = self.candidate_of(candidate_user).await?;
        if self.applications.exists(job.id, candidate.id).await? {
            return Err(ApplicationError::AlreadyApplied);
        }

        // A concurrent duplicate still lands on the unique index.
        let application = self
            .applications
            .insert(NewApplication {
                job_id: job.id,
                candidate_id: candidate.id,
                cover_letter: cover_letter
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
            })
            .await?;

        tracing::info!(
            application_id = %application.id,
            job_id = %job.id,
            "Application submitted"
        );
        Ok(application)
    }

    async fn list_for_job(
        &self,
        job_id: Uuid,
        employer_user: Uuid,
    ) -> Result<Vec<JobApplication>, ApplicationError> {
        self.ensure_employer_of(employer_user, job_id).await?;
        Ok(self.applications.list_by_job(job_id).await?)
    }

    async fn list_own(
        &self,
        candidate_user: Uuid,
    ) -> Result<Vec<JobApplication>, ApplicationError> {
        let candidate = self.candidate_of(candidate_user).await?;
        Ok(self.applications.list_by_candidate(candidate.id).await?)
    }

    async fn change_status(
        &self,
        id: Uuid,
        next: ApplicationStatus,
        actor: ApplicationActor,
    ) -> Result<JobApplication, ApplicationError> {
        let application = self
            .applications
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        match actor {
            ApplicationActor::Candidate(user_id) => {
                let candidate = self.candidate_of(user_id).await?;
                if candidate.id != application.candidate_id
                    || next != ApplicationStatus::Withdrawn
                {
                    return Err(ApplicationError::Forbidden);
                }
            }
            ApplicationActor::Employer(user_id) => {
                if next == ApplicationStatus::Withdrawn {
                    return Err(ApplicationError::Forbidden);
                }
                self.ensure_employer_of(user_id, application.job_id).await?;
            }
        }

        let next = application.status.transition(next)?;

        self.applications
            .update_status(id, application.status, next)
            .await?
            .ok_or(ApplicationError::StatusChanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::application::ports::outgoing::MockApplicationRepository;
    use crate::candidates::application::ports::outgoing::MockCandidateRepository;
    use crate::companies::application::ports::outgoing::MockCompanyRepository;
    use crate::jobs::application::ports::outgoing::{
        JobChanges, JobRepositoryError, NewJob,
    };
    use crate::tests::support::fixtures::{sample_company, sample_job};
    use chrono::Duration;

    /// Job store backed by a fixed list.
    struct FixedJobs(Vec<Job>);

    #[async_trait]
    impl JobRepository for FixedJobs {
        async fn list_all(&self) -> Result<Vec<Job>, JobRepositoryError> {
            Ok(self.0.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobRepositoryError> {
            Ok(self.0.iter().find(|j| j.id == id).cloned())
        }

        async fn list_by_employer(&self, employer_id: Uuid) -> Result<Vec<Job>, JobRepositoryError> {
            Ok(self.0.iter().filter(|j| j.employer_id == employer_id).cloned().collect())
        }

        async fn insert(&self, _job: NewJob) -> Result<Job, JobRepositoryError> {
            Err(JobRepositoryError::DatabaseError("read-only".to_string()))
        }

        async fn update(
            &self,
            _id: Uuid,
            _changes: JobChanges,
        ) -> Result<Option<Job>, JobRepositoryError> {
            Err(JobRepositoryError::DatabaseError("read-only".to_string()))
        }
    }

    fn candidate(user_id: Uuid) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            user_id,
            name: "Jane".to_string(),
            phone: None,
            description: None,
            cv_url: None,
            created_at: Utc::now(),
        }
    }

    fn application(job_id: Uuid, candidate_id: Uuid, status: ApplicationStatus) -> JobApplication {
        JobApplication {
            id: Uuid::new_v4(),
            job_id,
            candidate_id,
            status,
            cover_letter: None,
            created_at: Utc::now(),
        }
    }

    fn candidates_for(candidate: Candidate) -> MockCandidateRepository {
        let mut repo = MockCandidateRepository::new();
        repo.expect_find_by_user()
            .returning(move |_| Ok(Some(candidate.clone())));
        repo
    }

    fn companies_for(company: Company) -> MockCompanyRepository {
        let mut repo = MockCompanyRepository::new();
        repo.expect_find_by_owner()
            .returning(move |_| Ok(Some(company.clone())));
        repo
    }

    fn service(
        applications: MockApplicationRepository,
        jobs: Vec<Job>,
        candidates: MockCandidateRepository,
        companies: MockCompanyRepository,
    ) -> ApplicationService<MockApplicationRepository> {
        ApplicationService::new(
            applications,
            Arc::new(FixedJobs(jobs)),
            Arc::new(candidates),
            Arc::new(companies),
        )
    }

    // ────────────────────────────────────────────────────────
    // apply
    // ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn apply_inserts_pending_application() {
        // Arrange
        let job = sample_job(Uuid::new_v4());
        let job_id = job.id;
        let user_id = Uuid::new_v4();
        let me = candidate(user_id);
        let candidate_id = me.id;
        let mut applications = MockApplicationRepository::new();
        applications.expect_exists().returning(|_, _| Ok(false));
        applications
            .expect_insert()
            .withf(move |new| {
                new.job_id == job_id
                    && new.candidate_id == candidate_id
                    && new.cover_letter.as_deref() == Some("Hello")
            })
            .times(1)
            .returning(|new| Ok(application(new.job_id, new.candidate_id, ApplicationStatus::Pending)));
        let service = service(
            applications,
            vec![job],
            candidates_for(me),
            MockCompanyRepository::new(),
        );

        // Act
        let created = service
            .apply(job_id, user_id, Some("  Hello ".to_string()))
            .await
            .unwrap();

        // Assert
        assert_eq!(created.status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn second_application_is_already_applied() {
        let job = sample_job(Uuid::new_v4());
        let job_id = job.id;
        let mut applications = MockApplicationRepository::new();
        applications.expect_exists().returning(|_, _| Ok(true));
        applications.expect_insert().never();
        let service = service(
            applications,
            vec![job],
            candidates_for(candidate(Uuid::new_v4())),
            MockCompanyRepository::new(),
        );

        let result = service.apply(job_id, Uuid::new_v4(), None).await;

        assert!(matches!(result, Err(ApplicationError::AlreadyApplied)));
    }

    #[tokio::test]
    async fn racing_duplicate_is_already_applied() {
        let job = sample_job(Uuid::new_v4());
        let job_id = job.id;
        let mut applications = MockApplicationRepository::new();
        applications.expect_exists().returning(|_, _| Ok(false));
        applications
            .expect_insert()
            .returning(|_| Err(ApplicationRepositoryError::AlreadyApplied));
        let service = service(
            applications,
            vec![job],
            candidates_for(candidate(Uuid::new_v4())),
            MockCompanyRepository::new(),
        );

        let result = service.apply(job_id, Uuid::new_v4(), None).await;

        assert!(matches!(result, Err(ApplicationError::AlreadyApplied)));
    }

    #[tokio::test]
    async fn expired_job_is_closed() {
        let mut job = sample_job(Uuid::new_v4());
        job.deadline = Some(Utc::now() - Duration::hours(1));
        let job_id = job.id;
        let service = service(
            MockApplicationRepository::new(),
            vec![job],
            MockCandidateRepository::new(),
            MockCompanyRepository::new(),
        );

        let result = service.apply(job_id, Uuid::new_v4(), None).await;

        assert!(matches!(result, Err(ApplicationError::JobClosed)));
    }

    // ────────────────────────────────────────────────────────
    // change_status
    // ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn employer_moves_pending_to_reviewed() {
        let owner = Uuid::new_v4();
        let company = sample_company(Some(owner));
        let job = sample_job(company.id);
        let current = application(job.id, Uuid::new_v4(), ApplicationStatus::Pending);
        let id = current.id;
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        applications
            .expect_update_status()
            .with(
                mockall::predicate::eq(id),
                mockall::predicate::eq(ApplicationStatus::Pending),
                mockall::predicate::eq(ApplicationStatus::Reviewed),
            )
            .times(1)
            .returning(|id, _, status| {
                let mut app = application(Uuid::new_v4(), Uuid::new_v4(), status);
                app.id = id;
                Ok(Some(app))
            });
        let service = service(
            applications,
            vec![job],
            MockCandidateRepository::new(),
            companies_for(company),
        );

        let updated = service
            .change_status(id, ApplicationStatus::Reviewed, ApplicationActor::Employer(owner))
            .await
            .unwrap();

        assert_eq!(updated.status, ApplicationStatus::Reviewed);
    }

    #[tokio::test]
    async fn withdrawn_in_the_meantime_is_a_conflict() {
        let owner = Uuid::new_v4();
        let company = sample_company(Some(owner));
        let job = sample_job(company.id);
        let current = application(job.id, Uuid::new_v4(), ApplicationStatus::Pending);
        let id = current.id;
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        applications
            .expect_update_status()
            .times(1)
            .returning(|_, _, _| Ok(None));
        let service = service(
            applications,
            vec![job],
            MockCandidateRepository::new(),
            companies_for(company),
        );

        let result = service
            .change_status(id, ApplicationStatus::Rejected, ApplicationActor::Employer(owner))
            .await;

        assert!(matches!(result, Err(ApplicationError::StatusChanged)));
    }

    #[tokio::test]
    async fn pending_cannot_jump_to_accepted() {
        let owner = Uuid::new_v4();
        let company = sample_company(Some(owner));
        let job = sample_job(company.id);
        let current = application(job.id, Uuid::new_v4(), ApplicationStatus::Pending);
        let id = current.id;
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        applications.expect_update_status().never();
        let service = service(
            applications,
            vec![job],
            MockCandidateRepository::new(),
            companies_for(company),
        );

        let result = service
            .change_status(id, ApplicationStatus::Accepted, ApplicationActor::Employer(owner))
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn candidate_may_only_withdraw() {
        let user_id = Uuid::new_v4();
        let me = candidate(user_id);
        let current = application(Uuid::new_v4(), me.id, ApplicationStatus::Pending);
        let id = current.id;
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        applications.expect_update_status().never();
        let service = service(
            applications,
            vec![],
            candidates_for(me),
            MockCompanyRepository::new(),
        );

        let result = service
            .change_status(id, ApplicationStatus::Accepted, ApplicationActor::Candidate(user_id))
            .await;

        assert!(matches!(result, Err(ApplicationError::Forbidden)));
    }

    #[tokio::test]
    async fn other_company_cannot_read_applications() {
        let owner = Uuid::new_v4();
        let job = sample_job(Uuid::new_v4());
        let job_id = job.id;
        let mut applications = MockApplicationRepository::new();
        applications.expect_list_by_job().never();
        let service = service(
            applications,
            vec![job],
            MockCandidateRepository::new(),
            companies_for(sample_company(Some(owner))),
        );

        let result = service.list_for_job(job_id, owner).await;

        assert!(matches!(result, Err(ApplicationError::Forbidden)));
    }
}
