use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Entity, StoreError};

/// A user's bookmark of a job. Unique per (user_id, job_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: String,
    pub user_id: String,
    pub job_id: String,
    pub saved_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSavedJob {
    pub user_id: String,
    pub job_id: String,
    #[serde(default)]
    pub saved_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedJobPatch {
    pub saved_date: Option<DateTime<Utc>>,
}

impl Entity for SavedJob {
    type New = NewSavedJob;
    type Patch = SavedJobPatch;

    const KIND: &'static str = "Saved job";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, now: DateTime<Utc>, new: NewSavedJob) -> Result<Self, StoreError> {
        Ok(SavedJob {
            id,
            user_id: new.user_id,
            job_id: new.job_id,
            saved_date: new.saved_date.unwrap_or(now),
        })
    }

    fn apply(&mut self, patch: SavedJobPatch) -> Result<(), StoreError> {
        if let Some(saved_date) = patch.saved_date {
            self.saved_date = saved_date;
        }
        Ok(())
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.user_id == other.user_id && self.job_id == other.job_id
    }
}
