use std::sync::Arc;

use crate::config::Config;
use crate::models::application::Application;
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::saved_job::SavedJob;
use crate::models::user::UserProfile;
use crate::recommendation::Recommender;
use crate::seed::SeedData;
use crate::store::{InMemoryStore, Latency, Repository};

/// One repository per entity kind. Handlers and the recommender only see the
/// trait objects.
#[derive(Clone)]
pub struct Stores {
    pub jobs: Arc<dyn Repository<Job>>,
    pub users: Arc<dyn Repository<UserProfile>>,
    pub saved_jobs: Arc<dyn Repository<SavedJob>>,
    pub applications: Arc<dyn Repository<Application>>,
    pub companies: Arc<dyn Repository<Company>>,
}

impl Stores {
    pub fn in_memory(seed: SeedData, latency: Latency) -> Self {
        Self {
            jobs: Arc::new(InMemoryStore::with_records(seed.jobs, latency)),
            users: Arc::new(InMemoryStore::with_records(seed.users, latency)),
            saved_jobs: Arc::new(InMemoryStore::with_records(seed.saved_jobs, latency)),
            applications: Arc::new(InMemoryStore::with_records(seed.applications, latency)),
            companies: Arc::new(InMemoryStore::with_records(seed.companies, latency)),
        }
    }
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(config: &Config, stores: Stores) -> Self {
        let recommender = Arc::new(Recommender::new(&stores, config.recommendation_limit));
        Self {
            stores,
            recommender,
        }
    }
}
