use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::models::{Like, LikedBeat};

/// `POST /api/likes`
///
/// Responds with the like and the beat carrying its new `likes_count`.
pub async fn create_like(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Like>, JsonRejection>,
) -> Result<Json<ApiResponse<LikedBeat>>, ApiError> {
    let Json(like) = payload?;
    let liked = state.likes.like_beat(like).await?;
    Ok(Json(ApiResponse::success(liked)))
}

pub async fn get_like(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<ApiResponse<Like>>, ApiError> {
    let Path((user_id, beat_id)) = ids?;
    let like = state.likes.get_like(user_id, beat_id).await?;
    Ok(Json(ApiResponse::success(like)))
}

pub async fn delete_like(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path((user_id, beat_id)) = ids?;
    state
        .likes
        .unlike_beat(Like { user_id, beat_id })
        .await?;
    Ok(Json(ApiResponse::success(())))
}
