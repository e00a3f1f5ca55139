use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Entity, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl SalaryRange {
    pub fn validate(&self) -> Result<(), StoreError> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(StoreError::Invalid(format!(
                "salary min ({min}) exceeds max ({max})"
            ))),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub company_id: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary: Option<SalaryRange>,
    pub posted_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub company_id: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary: Option<SalaryRange>,
    #[serde(default)]
    pub posted_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub company_id: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<SalaryRange>,
    pub posted_date: Option<DateTime<Utc>>,
}

impl Job {
    fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Invalid("job title cannot be empty".to_string()));
        }
        if self.company.trim().is_empty() {
            return Err(StoreError::Invalid("job company cannot be empty".to_string()));
        }
        if let Some(salary) = &self.salary {
            salary.validate()?;
        }
        Ok(())
    }
}

impl Entity for Job {
    type New = NewJob;
    type Patch = JobPatch;

    const KIND: &'static str = "Job";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, now: DateTime<Utc>, new: NewJob) -> Result<Self, StoreError> {
        let job = Job {
            id,
            title: new.title,
            company: new.company,
            company_id: new.company_id,
            location: new.location,
            job_type: new.job_type,
            description: new.description,
            requirements: new.requirements,
            salary: new.salary,
            posted_date: new.posted_date.unwrap_or(now),
        };
        job.validate()?;
        Ok(job)
    }

    fn apply(&mut self, patch: JobPatch) -> Result<(), StoreError> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(company_id) = patch.company_id {
            self.company_id = Some(company_id);
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(job_type) = patch.job_type {
            self.job_type = job_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(requirements) = patch.requirements {
            self.requirements = requirements;
        }
        if let Some(salary) = patch.salary {
            self.salary = Some(salary);
        }
        if let Some(posted_date) = patch.posted_date {
            self.posted_date = posted_date;
        }
        self.validate()
    }
}
