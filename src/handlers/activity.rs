use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::activity::{ActivityQuery, ActivityRequest, ActivityResponse};
use crate::services::streaks::compute_statistics;
use crate::AppState;

pub async fn get_github_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<ActivityResponse>> {
    let request = resolve_request(query, &state.config.github_default_username)?;

    let calendar = state.github.fetch_calendar(&request.username).await?;
    let total = calendar.total_contributions;
    let weeks = calendar.into_weeks();
    let days: Vec<_> = weeks.iter().flat_map(|w| w.days.iter().cloned()).collect();

    let today = Utc::now().date_naive();
    let stats = compute_statistics(&days, today);

    tracing::info!(
        username = %request.username,
        total,
        current_streak = stats.current_streak,
        longest_streak = stats.longest_streak,
        "Contribution calendar served"
    );

    Ok(Json(ActivityResponse {
        username: request.username,
        total,
        current_streak: stats.current_streak,
        longest_streak: stats.longest_streak,
        best_day: stats.best_day,
        days_considered: stats.days_considered,
        days,
        weeks,
        updated_at: Utc::now(),
    }))
}

fn resolve_request(query: ActivityQuery, default_username: &str) -> AppResult<ActivityRequest> {
    let username = query
        .username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| default_username.to_string());

    let request = ActivityRequest { username };
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !request
        .username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(AppError::Validation(
            "username may only contain letters, digits and hyphens".into(),
        ));
    }

    Ok(request)
}
