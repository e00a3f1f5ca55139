//! Job listing filters and the most-recent ordering shared with the dashboard
//! and the recommendation fallback.

use serde::Deserialize;

use crate::models::job::{Job, JobType};

/// Query filters for job listings. Every field is optional; an empty filter
/// keeps every job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    /// Case-insensitive substring of title, company or description.
    pub search: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(term) = non_blank(&self.search) {
            let term = term.to_lowercase();
            let hit = job.title.to_lowercase().contains(&term)
                || job.company.to_lowercase().contains(&term)
                || job.description.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let Some(location) = non_blank(&self.location) {
            if !job
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(job_type) = self.job_type {
            if job.job_type != job_type {
                return false;
            }
        }

        if self.salary_min.is_some() || self.salary_max.is_some() {
            // Salary bounds apply to the advertised minimum; jobs without one drop out.
            let Some(job_min) = job.salary.and_then(|s| s.min) else {
                return false;
            };
            let lower = self.salary_min.unwrap_or(0);
            let upper = self.salary_max.unwrap_or(u64::MAX);
            if job_min < lower || job_min > upper {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn filter_jobs(jobs: Vec<Job>, filter: &JobFilter) -> Vec<Job> {
    jobs.into_iter().filter(|job| filter.matches(job)).collect()
}

/// Newest postings first, ties by id ascending, truncated to `limit`.
pub fn most_recent(mut jobs: Vec<Job>, limit: usize) -> Vec<Job> {
    jobs.sort_by(|a, b| {
        b.posted_date
            .cmp(&a.posted_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    jobs.truncate(limit);
    jobs
}
