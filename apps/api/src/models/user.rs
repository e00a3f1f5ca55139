use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::JobType;
use crate::store::{Entity, StoreError};

fn default_preferred_job_types() -> Vec<JobType> {
    vec![JobType::FullTime]
}

fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Falls back to full-time only when the field is absent.
    #[serde(default = "default_preferred_job_types")]
    pub preferred_job_types: Vec<JobType>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub preferred_job_types: Option<Vec<JobType>>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<Vec<String>>,
    pub preferred_job_types: Option<Vec<JobType>>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub resume_url: Option<String>,
}

impl UserProfile {
    fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Invalid("name cannot be empty".to_string()));
        }
        if !self.email.contains('@') {
            return Err(StoreError::Invalid(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

/// Trims skills and drops blanks and case-insensitive duplicates, keeping the
/// first spelling.
pub fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(skills.len());
    let mut out = Vec::with_capacity(skills.len());
    for skill in skills {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        out.push(trimmed.to_string());
    }
    out
}

impl Entity for UserProfile {
    type New = NewUser;
    type Patch = UserPatch;

    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, now: DateTime<Utc>, new: NewUser) -> Result<Self, StoreError> {
        let user = UserProfile {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            location: new.location,
            headline: new.headline,
            summary: new.summary,
            skills: normalize_skills(new.skills),
            preferred_job_types: new
                .preferred_job_types
                .unwrap_or_else(default_preferred_job_types),
            experience: new.experience,
            education: new.education,
            resume_url: new.resume_url,
            created_at: now,
        };
        user.validate()?;
        Ok(user)
    }

    fn apply(&mut self, patch: UserPatch) -> Result<(), StoreError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(headline) = patch.headline {
            self.headline = Some(headline);
        }
        if let Some(summary) = patch.summary {
            self.summary = Some(summary);
        }
        if let Some(skills) = patch.skills {
            self.skills = normalize_skills(skills);
        }
        if let Some(types) = patch.preferred_job_types {
            self.preferred_job_types = types;
        }
        if let Some(experience) = patch.experience {
            self.experience = experience;
        }
        if let Some(education) = patch.education {
            self.education = education;
        }
        if let Some(resume_url) = patch.resume_url {
            self.resume_url = Some(resume_url);
        }
        self.validate()
    }
}
