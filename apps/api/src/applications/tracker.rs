use serde::{Deserialize, Serialize};

use crate::models::application::{Application, ApplicationStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Interview,
    Accepted,
    Rejected,
}

impl StatusFilter {
    pub fn matches(self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == ApplicationStatus::Pending,
            StatusFilter::Interview => status == ApplicationStatus::Interview,
            StatusFilter::Accepted => status == ApplicationStatus::Accepted,
            StatusFilter::Rejected => status == ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationSort {
    #[default]
    Recent,
    Oldest,
    Company,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationQuery {
    pub user_id: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub sort: ApplicationSort,
}

/// Applies the query's user and status filters, then its sort order.
/// Company sort is alphabetical (case-insensitive) with newest first within a company.
pub fn filter_and_sort(applications: Vec<Application>, query: &ApplicationQuery) -> Vec<Application> {
    let mut filtered: Vec<Application> = applications
        .into_iter()
        .filter(|a| query.user_id.as_deref().map_or(true, |u| a.user_id == u))
        .filter(|a| query.status.matches(a.status))
        .collect();

    match query.sort {
        ApplicationSort::Recent => {
            filtered.sort_by(|a, b| b.applied_date.cmp(&a.applied_date));
        }
        ApplicationSort::Oldest => {
            filtered.sort_by(|a, b| a.applied_date.cmp(&b.applied_date));
        }
        ApplicationSort::Company => {
            filtered.sort_by(|a, b| {
                a.company
                    .to_lowercase()
                    .cmp(&b.company.to_lowercase())
                    .then_with(|| b.applied_date.cmp(&a.applied_date))
            });
        }
    }
    filtered
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub interview: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn tally<'a>(applications: impl IntoIterator<Item = &'a Application>) -> Self {
        let mut counts = StatusCounts::default();
        for application in applications {
            counts.total += 1;
            match application.status {
                ApplicationStatus::Pending => counts.pending += 1,
                ApplicationStatus::Interview => counts.interview += 1,
                ApplicationStatus::Accepted => counts.accepted += 1,
                ApplicationStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}
