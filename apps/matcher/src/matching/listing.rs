//! Structured job listings flattened to a composite description before ranking.

use serde::{Deserialize, Serialize};

use crate::matching::models::{JobId, JobPosting};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub id: JobId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub min_experience: Option<u32>,
    #[serde(default)]
    pub max_experience: Option<u32>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl JobListing {
    /// Renders every listing field into one block of text for embedding and keyword extraction.
    pub fn composite_description(&self) -> String {
        let max_experience = match self.max_experience {
            Some(max) if max > 0 => max.to_string(),
            _ => "Any".to_string(),
        };

        format!(
            "Job Title: {}\n\
             Description: {}\n\
             Required Skills: {}\n\
             Experience: {} - {} years\n\
             Education: {}\n\
             Job Type: {}\n\
             Location: {}",
            self.title,
            self.description,
            self.required_skills.join(", "),
            self.min_experience.unwrap_or(0),
            max_experience,
            non_empty_or(&self.education, "Any"),
            non_empty_or(&self.job_type, "Full-time"),
            non_empty_or(&self.location, "Remote"),
        )
    }
}

impl From<JobListing> for JobPosting {
    fn from(listing: JobListing) -> Self {
        let description = listing.composite_description();
        JobPosting {
            id: listing.id,
            title: listing.title,
            description,
        }
    }
}

fn non_empty_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
