use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::guestbook::{
    CreateEntryRequest, GuestbookEntry, GuestbookStats, RECENT_ENTRIES_LIMIT,
};
use crate::AppState;

pub async fn list_entries(State(state): State<AppState>) -> AppResult<Json<Vec<GuestbookEntry>>> {
    let entries = sqlx::query_as::<_, GuestbookEntry>(
        r#"
        SELECT * FROM guestbook_entries
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(RECENT_ENTRIES_LIMIT)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<GuestbookEntry>)> {
    let body = body.trimmed();
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = sqlx::query_as::<_, GuestbookEntry>(
        r#"
        INSERT INTO guestbook_entries (id, author_name, message, likes)
        VALUES ($1, $2, $3, 0)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.author_name)
    .bind(&body.message)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(entry_id = %entry.id, "Guestbook entry created");

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn like_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<GuestbookEntry>> {
    let entry = sqlx::query_as::<_, GuestbookEntry>(
        r#"
        UPDATE guestbook_entries SET likes = likes + 1
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<GuestbookStats>> {
    let stats = sqlx::query_as::<_, GuestbookStats>(
        r#"
        SELECT
            COUNT(*)::BIGINT AS total_entries,
            COALESCE(SUM(likes), 0)::BIGINT AS total_likes
        FROM guestbook_entries
        "#,
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(stats))
}
