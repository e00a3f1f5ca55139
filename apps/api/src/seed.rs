use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::models::application::Application;
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::saved_job::SavedJob;
use crate::models::user::UserProfile;
use crate::store::Entity;

const BUNDLED_JOBS: &str = include_str!("../seed/jobs.json");
const BUNDLED_USERS: &str = include_str!("../seed/users.json");
const BUNDLED_SAVED_JOBS: &str = include_str!("../seed/saved_jobs.json");
const BUNDLED_APPLICATIONS: &str = include_str!("../seed/applications.json");
const BUNDLED_COMPANIES: &str = include_str!("../seed/companies.json");

/// Initial contents of every store.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub jobs: Vec<Job>,
    pub users: Vec<UserProfile>,
    pub saved_jobs: Vec<SavedJob>,
    pub applications: Vec<Application>,
    pub companies: Vec<Company>,
}

/// Loads seed collections from `dir`, falling back to the bundled file for
/// any collection missing on disk.
pub fn load_seed_data(dir: Option<&Path>) -> Result<SeedData> {
    let seed = SeedData {
        jobs: load_collection(dir, "jobs.json", BUNDLED_JOBS)?,
        users: load_collection(dir, "users.json", BUNDLED_USERS)?,
        saved_jobs: load_collection(dir, "saved_jobs.json", BUNDLED_SAVED_JOBS)?,
        applications: load_collection(dir, "applications.json", BUNDLED_APPLICATIONS)?,
        companies: load_collection(dir, "companies.json", BUNDLED_COMPANIES)?,
    };

    info!(
        jobs = seed.jobs.len(),
        users = seed.users.len(),
        saved_jobs = seed.saved_jobs.len(),
        applications = seed.applications.len(),
        companies = seed.companies.len(),
        "Seed data loaded"
    );
    Ok(seed)
}

fn load_collection<E>(dir: Option<&Path>, file: &str, bundled: &str) -> Result<Vec<E>>
where
    E: Entity + DeserializeOwned,
{
    let records: Vec<E> = match dir.map(|d| d.join(file)).filter(|p| p.exists()) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Seed file {} is not valid", path.display()))?
        }
        None => serde_json::from_str(bundled)
            .with_context(|| format!("Bundled seed {file} is not valid"))?,
    };

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id()) {
            bail!("{file} contains duplicate {} id '{}'", E::KIND, record.id());
        }
    }
    // Seeds obey the same uniqueness rules as `Repository::create`.
    for (i, record) in records.iter().enumerate() {
        if let Some(earlier) = records[..i].iter().find(|other| record.conflicts_with(other)) {
            bail!(
                "{file} has {} '{}' conflicting with '{}'",
                E::KIND,
                record.id(),
                earlier.id()
            );
        }
    }
    Ok(records)
}
