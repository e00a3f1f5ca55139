//! Job Recommendation Scoring: weighted multi-factor relevance of a job to one user.
//!
//! Five independent factors, each a fraction in [0, 1] scaled by its weight:
//! skill match (40), location (20), job type preference (15),
//! similarity to the user's saved jobs (15), recency (10).
//! Pure functions only; the async fetch and fallback live in `engine`.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::application::Application;
use crate::models::job::Job;
use crate::models::saved_job::SavedJob;
use crate::models::user::UserProfile;
use crate::recommendation::{RecommendationError, ScoredJob};

/// Jobs older than this many days earn no recency credit.
pub const RECENCY_WINDOW_DAYS: f64 = 7.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Contribution ceiling of each factor. The defaults sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub location: f64,
    pub job_type: f64,
    pub saved_similarity: f64,
    pub recency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 40.0,
            location: 20.0,
            job_type: 15.0,
            saved_similarity: 15.0,
            recency: 10.0,
        }
    }
}

/// Per-factor points for one job. Each field is already clamped to its weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub location: f64,
    pub job_type: f64,
    pub saved_similarity: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.skills + self.location + self.job_type + self.saved_similarity + self.recency
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Factors
// ────────────────────────────────────────────────────────────────────────────

/// Fraction of non-blank requirements that substring-match (either direction,
/// case-insensitive) at least one non-blank skill.
pub fn skill_match_fraction(requirements: &[String], skills: &[String]) -> f64 {
    let skills: Vec<String> = skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    let requirements: Vec<String> = requirements
        .iter()
        .map(|r| r.trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .collect();

    if skills.is_empty() || requirements.is_empty() {
        return 0.0;
    }

    let matched = requirements
        .iter()
        .filter(|req| {
            skills
                .iter()
                .any(|skill| req.contains(skill.as_str()) || skill.contains(req.as_str()))
        })
        .count();

    matched as f64 / requirements.len() as f64
}

/// True when the user's location is non-empty and appears inside the job's
/// location, ignoring case.
pub fn location_matches(user_location: &str, job_location: &str) -> bool {
    let user_location = user_location.trim().to_lowercase();
    !user_location.is_empty() && job_location.to_lowercase().contains(&user_location)
}

/// Fraction of the user's saved jobs that share company, type, or at least
/// one requirement with `job`. Zero when nothing is saved.
pub fn saved_similarity_fraction(job: &Job, saved_jobs: &[&Job]) -> f64 {
    let company = job.company.trim().to_lowercase();
    let requirements: HashSet<String> = job
        .requirements
        .iter()
        .map(|r| r.trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .collect();

    let similar = saved_jobs
        .iter()
        .filter(|saved| {
            saved.company.trim().to_lowercase() == company
                || saved.job_type == job.job_type
                || saved
                    .requirements
                    .iter()
                    .any(|r| requirements.contains(&r.trim().to_lowercase()))
        })
        .count();

    similar as f64 / saved_jobs.len().max(1) as f64
}

/// Linear decay from 1.0 for a job posted at `now` to 0.0 at seven days old.
/// Jobs dated in the future get full credit.
pub fn recency_fraction(posted_date: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days_since = (now - posted_date).num_milliseconds() as f64 / MILLIS_PER_DAY;
    ((RECENCY_WINDOW_DAYS - days_since) / RECENCY_WINDOW_DAYS).clamp(0.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores one job for `profile`. `saved_jobs` are the user's saved jobs
/// resolved against the job collection.
pub fn score_job(
    job: &Job,
    profile: &UserProfile,
    saved_jobs: &[&Job],
    now: DateTime<Utc>,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let skills = skill_match_fraction(&job.requirements, &profile.skills);
    let location = if location_matches(&profile.location, &job.location) {
        1.0
    } else {
        0.0
    };
    let job_type = if profile.preferred_job_types.contains(&job.job_type) {
        1.0
    } else {
        0.0
    };
    let saved_similarity = saved_similarity_fraction(job, saved_jobs);
    let recency = recency_fraction(job.posted_date, now);

    ScoreBreakdown {
        skills: (skills * weights.skills).clamp(0.0, weights.skills),
        location: (location * weights.location).clamp(0.0, weights.location),
        job_type: (job_type * weights.job_type).clamp(0.0, weights.job_type),
        saved_similarity: (saved_similarity * weights.saved_similarity)
            .clamp(0.0, weights.saved_similarity),
        recency: (recency * weights.recency).clamp(0.0, weights.recency),
    }
}

/// Ranking order: score descending, then newest posting, then id ascending.
fn compare_ranked(a: (f64, &Job), b: (f64, &Job)) -> Ordering {
    b.0.total_cmp(&a.0)
        .then_with(|| b.1.posted_date.cmp(&a.1.posted_date))
        .then_with(|| a.1.id.cmp(&b.1.id))
}

/// Scores every job the user has not applied to and returns the top `limit`.
///
/// `saved_jobs` and `applications` hold every user's records; only the
/// profile owner's are considered. Saved records pointing at jobs missing
/// from `jobs` are ignored.
pub fn rank_jobs(
    profile: &UserProfile,
    jobs: &[Job],
    saved_jobs: &[SavedJob],
    applications: &[Application],
    now: DateTime<Utc>,
    limit: usize,
    weights: &ScoringWeights,
) -> Result<Vec<ScoredJob>, RecommendationError> {
    let applied: HashSet<&str> = applications
        .iter()
        .filter(|a| a.user_id == profile.id)
        .map(|a| a.job_id.as_str())
        .collect();
    let saved_ids: HashSet<&str> = saved_jobs
        .iter()
        .filter(|s| s.user_id == profile.id)
        .map(|s| s.job_id.as_str())
        .collect();
    let saved: Vec<&Job> = jobs
        .iter()
        .filter(|j| saved_ids.contains(j.id.as_str()))
        .collect();

    let mut scored: Vec<(f64, &Job)> = Vec::with_capacity(jobs.len());
    for job in jobs.iter().filter(|j| !applied.contains(j.id.as_str())) {
        let total = score_job(job, profile, &saved, now, weights).total();
        if !(0.0..=100.0).contains(&total) {
            return Err(RecommendationError::InvalidScore {
                job_id: job.id.clone(),
                score: total,
            });
        }
        scored.push((total, job));
    }

    let eligible = scored.len();
    scored.sort_by(|a, b| compare_ranked(*a, *b));
    scored.truncate(limit);

    debug!(
        user_id = %profile.id,
        eligible,
        returned = scored.len(),
        "ranked jobs"
    );

    Ok(scored
        .into_iter()
        .map(|(score, job)| ScoredJob::scored(job.clone(), score))
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus;
    use crate::models::job::JobType;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn make_job(id: &str, company: &str, requirements: &[&str], posted_days_ago: i64) -> Job {
        Job {
            id: id.to_string(),
            title: format!("Role {id}"),
            company: company.to_string(),
            company_id: None,
            location: "Denver, CO".to_string(),
            job_type: JobType::Contract,
            description: String::new(),
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            salary: None,
            posted_date: now() - Duration::days(posted_days_ago),
        }
    }

    fn make_user(skills: &[&str], location: &str, types: Vec<JobType>) -> UserProfile {
        UserProfile {
            id: "user1".to_string(),
            name: "Jordan Lee".to_string(),
            email: "jordan@example.com".to_string(),
            phone: None,
            location: location.to_string(),
            headline: None,
            summary: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            preferred_job_types: types,
            experience: vec![],
            education: vec![],
            resume_url: None,
            created_at: now(),
        }
    }

    fn saved(user_id: &str, job_id: &str) -> SavedJob {
        SavedJob {
            id: format!("s-{job_id}"),
            user_id: user_id.to_string(),
            job_id: job_id.to_string(),
            saved_date: now(),
        }
    }

    fn applied(user_id: &str, job_id: &str) -> Application {
        Application {
            id: format!("a-{job_id}"),
            user_id: user_id.to_string(),
            job_id: job_id.to_string(),
            job_title: String::new(),
            company: String::new(),
            resume_url: "default-resume.pdf".to_string(),
            cover_letter: String::new(),
            status: ApplicationStatus::Pending,
            applied_date: now(),
        }
    }

    fn rank(
        user: &UserProfile,
        jobs: &[Job],
        saved: &[SavedJob],
        apps: &[Application],
    ) -> Vec<ScoredJob> {
        rank_jobs(user, jobs, saved, apps, now(), 4, &ScoringWeights::default()).unwrap()
    }

    #[test]
    fn test_skill_match_either_direction_case_insensitive() {
        let reqs = vec!["react".to_string(), "GraphQL".to_string()];
        let skills = vec!["React".to_string(), "Node".to_string()];
        assert_eq!(skill_match_fraction(&reqs, &skills), 0.5);

        // skill contains requirement
        let reqs = vec!["SQL".to_string()];
        let skills = vec!["PostgreSQL".to_string()];
        assert_eq!(skill_match_fraction(&reqs, &skills), 1.0);
    }

    #[test]
    fn test_skill_match_zero_without_skills_or_requirements() {
        assert_eq!(skill_match_fraction(&[], &["Rust".to_string()]), 0.0);
        assert_eq!(skill_match_fraction(&["Rust".to_string()], &[]), 0.0);
        assert_eq!(
            skill_match_fraction(&["Rust".to_string()], &["  ".to_string()]),
            0.0
        );
    }

    #[test]
    fn test_blank_requirements_ignored() {
        let reqs = vec!["".to_string(), "rust".to_string()];
        assert_eq!(skill_match_fraction(&reqs, &["Go".to_string()]), 0.0);
        assert_eq!(skill_match_fraction(&reqs, &["Rust".to_string()]), 1.0);
    }

    #[test]
    fn test_location_requires_non_empty_substring() {
        assert!(location_matches("Austin", "Austin, TX"));
        assert!(location_matches("austin", "AUSTIN, TX"));
        assert!(!location_matches("", "Austin, TX"));
        assert!(!location_matches("   ", "Austin, TX"));
        assert!(!location_matches("Dallas", "Austin, TX"));
    }

    #[test]
    fn test_recency_decays_linearly_over_a_week() {
        let now = now();
        assert_eq!(recency_fraction(now, now), 1.0);
        let half = recency_fraction(now - Duration::hours(84), now);
        assert!((half - 0.5).abs() < 1e-9, "got {half}");
        assert_eq!(recency_fraction(now - Duration::days(7), now), 0.0);
        assert_eq!(recency_fraction(now - Duration::days(30), now), 0.0);
        assert_eq!(recency_fraction(now + Duration::days(2), now), 1.0);
    }

    #[test]
    fn test_saved_similarity_zero_without_saved_jobs() {
        let job = make_job("j1", "Acme Corp", &["rust"], 0);
        assert_eq!(saved_similarity_fraction(&job, &[]), 0.0);
    }

    #[test]
    fn test_saved_similarity_counts_shared_requirement() {
        let job = make_job("j1", "Acme Corp", &["Kubernetes"], 0);
        let mut other = make_job("j2", "Globex", &["kubernetes"], 0);
        other.job_type = JobType::FullTime;
        let mut unrelated = make_job("j3", "Initech", &["COBOL"], 0);
        unrelated.job_type = JobType::PartTime;
        let fraction = saved_similarity_fraction(&job, &[&other, &unrelated]);
        assert_eq!(fraction, 0.5);
    }

    #[test]
    fn test_example_react_austin_scores_at_least_65() {
        let user = make_user(&["React", "Node"], "Austin", vec![JobType::FullTime]);
        let mut job = make_job("a", "Startup", &["react", "graphql"], 0);
        job.location = "Austin, TX".to_string();
        job.job_type = JobType::FullTime;

        let breakdown = score_job(&job, &user, &[], now(), &ScoringWeights::default());
        assert_eq!(breakdown.skills, 20.0);
        assert_eq!(breakdown.location, 20.0);
        assert_eq!(breakdown.job_type, 15.0);
        assert_eq!(breakdown.saved_similarity, 0.0);
        assert_eq!(breakdown.recency, 10.0);
        assert!(breakdown.total() >= 65.0);
    }

    #[test]
    fn test_two_saved_jobs_same_company_gives_full_similarity() {
        let user = make_user(&[], "", vec![]);
        let mut saved_a = make_job("s1", "Acme Corp", &["excel"], 30);
        saved_a.job_type = JobType::PartTime;
        let mut saved_b = make_job("s2", "Acme Corp", &["sales"], 30);
        saved_b.job_type = JobType::Remote;
        let candidate = make_job("new", "Acme Corp", &["rust"], 30);

        let jobs = vec![saved_a, saved_b, candidate];
        let saved_records = vec![saved("user1", "s1"), saved("user1", "s2")];
        let ranked = rank(&user, &jobs, &saved_records, &[]);

        let new = ranked.iter().find(|s| s.job.id == "new").unwrap();
        assert_eq!(new.recommendation_score, Some(15.0));
    }

    #[test]
    fn test_other_users_saved_jobs_ignored() {
        let user = make_user(&[], "", vec![]);
        let saved_job = make_job("s1", "Acme Corp", &[], 30);
        let candidate = make_job("new", "Acme Corp", &[], 30);
        let jobs = vec![saved_job, candidate];

        let ranked = rank(&user, &jobs, &[saved("someone-else", "s1")], &[]);
        assert!(ranked.iter().all(|s| s.recommendation_score == Some(0.0)));
    }

    #[test]
    fn test_applied_jobs_excluded() {
        let user = make_user(&["rust"], "Denver", vec![JobType::Contract]);
        let jobs = vec![
            make_job("j1", "Acme", &["rust"], 0),
            make_job("j2", "Acme", &["rust"], 1),
        ];
        let ranked = rank(&user, &jobs, &[], &[applied("user1", "j1")]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].job.id, "j2");
    }

    #[test]
    fn test_other_users_applications_do_not_exclude() {
        let user = make_user(&[], "", vec![]);
        let jobs = vec![make_job("j1", "Acme", &[], 0)];
        let ranked = rank(&user, &jobs, &[], &[applied("user2", "j1")]);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_truncates_to_limit() {
        let user = make_user(&[], "", vec![]);
        let jobs: Vec<Job> = (0..10)
            .map(|i| make_job(&format!("j{i}"), "Acme", &[], i))
            .collect();
        assert_eq!(rank(&user, &jobs, &[], &[]).len(), 4);

        let two = rank_jobs(&user, &jobs, &[], &[], now(), 2, &ScoringWeights::default()).unwrap();
        assert_eq!(two.len(), 2);

        let none = rank_jobs(&user, &jobs, &[], &[], now(), 0, &ScoringWeights::default()).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_fewer_eligible_than_limit_returns_all() {
        let user = make_user(&[], "", vec![]);
        let jobs = vec![make_job("j1", "Acme", &[], 0), make_job("j2", "Acme", &[], 0)];
        assert_eq!(rank(&user, &jobs, &[], &[]).len(), 2);
    }

    #[test]
    fn test_empty_job_collection_returns_empty() {
        let user = make_user(&["rust"], "Austin", vec![JobType::FullTime]);
        assert!(rank(&user, &[], &[], &[]).is_empty());
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let user = make_user(&["rust", "go"], "Denver", vec![JobType::Contract]);
        let jobs = vec![
            make_job("low", "Acme", &["java"], 10),
            make_job("high", "Acme", &["rust", "go"], 0),
            make_job("mid", "Acme", &["rust", "java"], 3),
        ];
        let ranked = rank(&user, &jobs, &[], &[]);
        let ids: Vec<&str> = ranked.iter().map(|s| s.job.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);

        let scores: Vec<f64> = ranked.iter().filter_map(|s| s.recommendation_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_ties_broken_by_recency_then_id() {
        let user = make_user(&[], "", vec![]);
        // All older than the recency window, so every score is 0.
        let jobs = vec![
            make_job("b", "Acme", &[], 20),
            make_job("c", "Acme", &[], 10),
            make_job("a", "Acme", &[], 20),
        ];
        let ranked = rank(&user, &jobs, &[], &[]);
        let ids: Vec<&str> = ranked.iter().map(|s| s.job.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let user = make_user(&["rust"], "Denver", vec![JobType::Contract]);
        let jobs: Vec<Job> = (0..8)
            .map(|i| make_job(&format!("j{i}"), "Acme", &["rust"], i % 3))
            .collect();
        let first = rank(&user, &jobs, &[], &[]);
        let second = rank(&user, &jobs, &[], &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scores_bounded_0_to_100() {
        let mut user = make_user(&["rust"], "Denver", vec![JobType::Contract]);
        user.skills.push("go".to_string());
        let jobs = vec![
            make_job("j1", "Acme", &["rust", "go"], 0),
            make_job("j2", "Acme", &[], 100),
        ];
        let records = vec![saved("user1", "j1")];
        let ranked = rank(&user, &jobs, &records, &[]);
        for s in &ranked {
            let score = s.recommendation_score.unwrap();
            assert!((0.0..=100.0).contains(&score), "score {score}");
        }
        // j1 maxes out every factor.
        assert_eq!(ranked[0].recommendation_score, Some(100.0));
    }

    #[test]
    fn test_oversized_weights_rejected_as_invalid_score() {
        let user = make_user(&[], "Denver", vec![]);
        let jobs = vec![make_job("j1", "Acme", &[], 0)];
        let weights = ScoringWeights {
            location: 200.0,
            ..Default::default()
        };
        let err = rank_jobs(&user, &jobs, &[], &[], now(), 4, &weights).unwrap_err();
        assert!(matches!(err, RecommendationError::InvalidScore { .. }));
    }
}
