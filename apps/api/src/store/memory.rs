use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::store::{Entity, Latency, Repository, StoreError};

/// Process-local store backed by a `Vec`. Cloning shares the underlying
/// collection.
#[derive(Clone)]
pub struct InMemoryStore<E> {
    records: Arc<RwLock<Vec<E>>>,
    latency: Latency,
}

impl<E: Entity> InMemoryStore<E> {
    #[cfg(test)]
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    pub fn with_records(records: Vec<E>, latency: Latency) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            latency,
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryStore<E> {
    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        Latency::pause(self.latency.get_all).await;
        Ok(self.records.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<E, StoreError> {
        Latency::pause(self.latency.get_by_id).await;
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(E::KIND, id))
    }

    async fn create(&self, new: E::New) -> Result<E, StoreError> {
        Latency::pause(self.latency.create).await;
        let record = E::from_new(Uuid::new_v4().to_string(), Utc::now(), new)?;

        let mut records = self.records.write().await;
        if records.iter().any(|existing| existing.conflicts_with(&record)) {
            return Err(StoreError::Conflict(format!(
                "{} already exists for these keys",
                E::KIND
            )));
        }
        records.push(record.clone());
        debug!(kind = E::KIND, id = record.id(), "record created");
        Ok(record)
    }

    async fn update(&self, id: &str, patch: E::Patch) -> Result<E, StoreError> {
        Latency::pause(self.latency.update).await;
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;

        // Merge into a copy so a rejected patch leaves the stored record intact.
        let mut updated = slot.clone();
        updated.apply(patch)?;
        *slot = updated.clone();
        debug!(kind = E::KIND, id, "record updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        Latency::pause(self.latency.delete).await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;
        records.remove(index);
        debug!(kind = E::KIND, id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::job::{Job, JobPatch, JobType, NewJob, SalaryRange};
    use crate::models::saved_job::{NewSavedJob, SavedJob};

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            company: "Acme Corp".to_string(),
            company_id: None,
            location: "Austin, TX".to_string(),
            job_type: JobType::FullTime,
            description: String::new(),
            requirements: vec!["rust".to_string()],
            salary: None,
            posted_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = InMemoryStore::<Job>::new(Latency::none());
        let before = Utc::now();
        let job = store.create(new_job("Backend Engineer")).await.unwrap();

        assert!(!job.id.is_empty());
        assert!(job.posted_date >= before);
        assert_eq!(store.get_by_id(&job.id).await.unwrap().title, "Backend Engineer");
    }

    #[tokio::test]
    async fn test_create_ids_are_unique() {
        let store = InMemoryStore::<Job>::new(Latency::none());
        let a = store.create(new_job("A")).await.unwrap();
        let b = store.create(new_job("B")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_get_all_returns_copies() {
        let store = InMemoryStore::<Job>::new(Latency::none());
        store.create(new_job("Original")).await.unwrap();

        let mut snapshot = store.get_all().await.unwrap();
        snapshot[0].title = "Mutated".to_string();
        snapshot.clear();

        let fresh = store.get_all().await.unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].title, "Original");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = InMemoryStore::<Job>::new(Latency::none());
        assert!(store.get_by_id("missing").await.unwrap_err().is_not_found());
        assert!(store
            .update("missing", JobPatch::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store.delete("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_merges_present_fields_only() {
        let store = InMemoryStore::<Job>::new(Latency::none());
        let job = store.create(new_job("Engineer")).await.unwrap();

        let patch = JobPatch {
            title: Some("Senior Engineer".to_string()),
            ..Default::default()
        };
        let updated = store.update(&job.id, patch).await.unwrap();
        assert_eq!(updated.title, "Senior Engineer");
        assert_eq!(updated.company, "Acme Corp");
        assert_eq!(updated.requirements, vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_patch_leaves_record_untouched() {
        let store = InMemoryStore::<Job>::new(Latency::none());
        let job = store.create(new_job("Engineer")).await.unwrap();

        let patch = JobPatch {
            title: Some("Changed".to_string()),
            salary: Some(SalaryRange {
                min: Some(200_000),
                max: Some(100_000),
            }),
            ..Default::default()
        };
        assert!(matches!(
            store.update(&job.id, patch).await,
            Err(StoreError::Invalid(_))
        ));
        assert_eq!(store.get_by_id(&job.id).await.unwrap().title, "Engineer");
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = InMemoryStore::<Job>::new(Latency::none());
        let job = store.create(new_job("Engineer")).await.unwrap();
        store.delete(&job.id).await.unwrap();
        assert_eq!(store.len().await, 0);
        assert!(store.delete(&job.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_saved_job_conflicts() {
        let store = InMemoryStore::<SavedJob>::new(Latency::none());
        let new = || NewSavedJob {
            user_id: "user1".to_string(),
            job_id: "job1".to_string(),
            saved_date: None,
        };
        store.create(new()).await.unwrap();
        assert!(matches!(
            store.create(new()).await,
            Err(StoreError::Conflict(_))
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_operations_wait_for_simulated_latency() {
        let store = InMemoryStore::<Job>::new(Latency::default());

        let start = tokio::time::Instant::now();
        store.get_all().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));

        let start = tokio::time::Instant::now();
        store.create(new_job("Engineer")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(400));
    }
}
