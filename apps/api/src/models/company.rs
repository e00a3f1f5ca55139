use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Entity, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub industry: String,
    /// Employee band, e.g. "51-200".
    pub size: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    pub founded: i32,
    #[serde(default)]
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub industry: String,
    pub size: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    pub founded: i32,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub founded: Option<i32>,
    pub website: Option<String>,
}

impl Company {
    fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Invalid("company name cannot be empty".to_string()));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(StoreError::Invalid(format!(
                "rating {} must be between 0 and 5",
                self.rating
            )));
        }
        Ok(())
    }
}

impl Entity for Company {
    type New = NewCompany;
    type Patch = CompanyPatch;

    const KIND: &'static str = "Company";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, now: DateTime<Utc>, new: NewCompany) -> Result<Self, StoreError> {
        let company = Company {
            id,
            name: new.name,
            industry: new.industry,
            size: new.size,
            location: new.location,
            description: new.description,
            rating: new.rating,
            review_count: new.review_count,
            founded: new.founded,
            website: new.website,
            created_at: now,
        };
        company.validate()?;
        Ok(company)
    }

    fn apply(&mut self, patch: CompanyPatch) -> Result<(), StoreError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(industry) = patch.industry {
            self.industry = industry;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(review_count) = patch.review_count {
            self.review_count = review_count;
        }
        if let Some(founded) = patch.founded {
            self.founded = founded;
        }
        if let Some(website) = patch.website {
            self.website = Some(website);
        }
        self.validate()
    }
}
