use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Entity, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Interview,
    Accepted,
    Rejected,
}

/// A submitted application. Unique per (user_id, job_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub user_id: String,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub resume_url: String,
    #[serde(default)]
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: String,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub resume_url: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationPatch {
    pub status: Option<ApplicationStatus>,
    pub cover_letter: Option<String>,
}

impl Entity for Application {
    type New = NewApplication;
    type Patch = ApplicationPatch;

    const KIND: &'static str = "Application";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(
        id: String,
        now: DateTime<Utc>,
        new: NewApplication,
    ) -> Result<Self, StoreError> {
        Ok(Application {
            id,
            user_id: new.user_id,
            job_id: new.job_id,
            job_title: new.job_title,
            company: new.company,
            resume_url: new.resume_url,
            cover_letter: new.cover_letter,
            status: new.status,
            applied_date: new.applied_date.unwrap_or(now),
        })
    }

    fn apply(&mut self, patch: ApplicationPatch) -> Result<(), StoreError> {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(cover_letter) = patch.cover_letter {
            self.cover_letter = cover_letter;
        }
        Ok(())
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.user_id == other.user_id && self.job_id == other.job_id
    }
}
