use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One calendar day of contribution activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Display-only; carried through untouched.
    #[serde(default)]
    pub color_hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityWeek {
    pub days: Vec<ActivityDay>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatistics {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub best_day: u32,
    pub days_considered: u32,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub username: Option<String>,
}

/// Username after defaulting, ready for validation.
#[derive(Debug, Validate)]
pub struct ActivityRequest {
    #[validate(length(min = 1, max = 39, message = "username must be 1-39 characters"))]
    pub username: String,
}

/// GET /api/github-activity
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub username: String,
    pub total: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub best_day: u32,
    pub days_considered: u32,
    pub days: Vec<ActivityDay>,
    pub weeks: Vec<ActivityWeek>,
    pub updated_at: DateTime<Utc>,
}
