use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::errors::AppError;

/// Caller-supplied job identifier, echoed back with the same JSON type it arrived in.
///
/// Any JSON scalar is accepted. Numbers keep their original representation,
/// so `1.5` and `18446744073709551615` come back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(Number),
    Text(String),
    Bool(bool),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Number(id) => write!(f, "{id}"),
            JobId::Text(id) => f.write_str(id),
            JobId::Bool(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        JobId::Number(Number::from(id))
    }
}

impl From<i32> for JobId {
    fn from(id: i32) -> Self {
        JobId::Number(Number::from(id))
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        JobId::Text(id.to_string())
    }
}

/// A validated job posting. `title` defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    pub description: String,
}

impl JobPosting {
    pub fn new(id: impl Into<JobId>, title: &str, description: &str) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// Validates a decoded `jobs` payload. Any malformed record rejects the whole batch.
    pub fn from_payload(payload: Value) -> Result<Vec<Self>, AppError> {
        let Value::Array(records) = payload else {
            return Err(AppError::Validation(
                "Invalid jobs format. Expected JSON array.".to_string(),
            ));
        };

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Self::from_record(index, record))
            .collect()
    }

    /// Decodes and validates a raw `jobs` string as sent in the multipart form.
    pub fn from_json_str(raw: &str) -> Result<Vec<Self>, AppError> {
        let payload: Value = serde_json::from_str(raw).map_err(|_| {
            AppError::Validation("Invalid jobs format. Expected JSON array.".to_string())
        })?;
        Self::from_payload(payload)
    }

    fn from_record(index: usize, record: Value) -> Result<Self, AppError> {
        let Value::Object(mut fields) = record else {
            return Err(AppError::Validation(format!(
                "Job at index {index} must be a JSON object"
            )));
        };

        let id = match fields.remove("id") {
            None | Some(Value::Null) => {
                return Err(missing_field(index, "id"));
            }
            Some(Value::String(s)) => JobId::Text(s),
            Some(Value::Number(n)) => JobId::Number(n),
            Some(Value::Bool(b)) => JobId::Bool(b),
            Some(_) => {
                return Err(AppError::Validation(format!(
                    "Job at index {index} must have a scalar id, not an array or object"
                )))
            }
        };

        let description = match fields.remove("description") {
            Some(Value::String(s)) => s,
            None | Some(Value::Null) => return Err(missing_field(index, "description")),
            Some(_) => {
                return Err(AppError::Validation(format!(
                    "Job at index {index} has a non-string description"
                )))
            }
        };

        let title = match fields.remove("title") {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };

        Ok(Self {
            id,
            title,
            description,
        })
    }
}

fn missing_field(index: usize, field: &str) -> AppError {
    AppError::Validation(format!(
        "Job at index {index} is missing required field '{field}'"
    ))
}

/// Ranking output for one job. Skill sets are ordered for stable serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: JobId,
    pub job_title: String,
    /// 0 – 100, rounded to 2 dp before calibration.
    pub score: f64,
    pub matching_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
}
