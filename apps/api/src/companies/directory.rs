use serde::Deserialize;

use crate::models::company::Company;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySort {
    #[default]
    Name,
    Rating,
    /// Most reviewed first.
    Reviews,
    /// Youngest first.
    Founded,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyQuery {
    /// Case-insensitive substring of name, industry or location.
    pub search: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    #[serde(default)]
    pub sort: CompanySort,
}

pub fn query_companies(companies: Vec<Company>, query: &CompanyQuery) -> Vec<Company> {
    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let industry = query
        .industry
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let size = query.size.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let mut matched: Vec<Company> = companies
        .into_iter()
        .filter(|c| {
            search.as_deref().map_or(true, |term| {
                c.name.to_lowercase().contains(term)
                    || c.industry.to_lowercase().contains(term)
                    || c.location.to_lowercase().contains(term)
            })
        })
        .filter(|c| industry.map_or(true, |i| c.industry.eq_ignore_ascii_case(i)))
        .filter(|c| size.map_or(true, |s| c.size == s))
        .collect();

    match query.sort {
        CompanySort::Name => {
            matched.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        CompanySort::Rating => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        CompanySort::Reviews => matched.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        CompanySort::Founded => matched.sort_by(|a, b| b.founded.cmp(&a.founded)),
    }
    matched
}
