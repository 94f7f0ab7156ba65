use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub goals: String,
    pub interests: String,
    pub current_skills: String,
    pub created_at: DateTime<Utc>,
}

/// Profile fields as submitted, before the database assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewProfile<'a> {
    pub name: Option<&'a str>,
    pub goals: &'a str,
    pub interests: &'a str,
    pub current_skills: &'a str,
}
