use std::{sync::Arc, time::Duration};

use axum::{
    Json,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode, header::ORIGIN},
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::{
    database::{count_recent, insert_score, top_scores},
    error::AppError,
    state::State,
    utils::{client_addr, identity_hash, origin_allowed, parse_submission},
};

pub const LEADERBOARD_WINDOW: Duration = Duration::from_secs(60 * 60 * 24);
pub const LEADERBOARD_LIMIT: u32 = 50;

pub const RATE_LIMIT_MAX: i64 = 3;
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(10);

/// `GET /scores`: top entries from the trailing 24 hours. Read-only and
/// side-effect free, so clients may poll it as often as they like.
pub async fn scores_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<impl IntoResponse, AppError> {
    let scores = top_scores(&state.pool, LEADERBOARD_WINDOW, LEADERBOARD_LIMIT).await?;

    Ok(Json(json!({ "ok": true, "scores": scores })))
}

/// `POST /scores`: origin pre-check, then validation, then the rate limit,
/// then persist. Each failure short-circuits before any write. A failed
/// rate-limit read surfaces as a store error rather than an implicit allow.
pub async fn submit_handler(
    AxumState(state): AxumState<Arc<State>>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    if !origin_allowed(origin, state.config.allowed_origin.as_deref()) {
        return Err(AppError::Forbidden);
    }

    let submission = parse_submission(&payload)?;

    let ip_hash = identity_hash(&client_addr(&headers), &state.config.ip_salt);

    let recent = count_recent(&state.pool, &ip_hash, RATE_LIMIT_WINDOW).await?;
    if recent >= RATE_LIMIT_MAX {
        return Err(AppError::RateLimited);
    }

    insert_score(&state.pool, &submission.name, submission.points, &ip_hash).await?;

    Ok((StatusCode::CREATED, Json(json!({ "ok": true }))))
}
