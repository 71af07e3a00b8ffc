use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, UpdateBeatRequest};
use crate::listing::{BeatListingParams, PageParams};
use crate::models::{Beat, BeatUpdate, Like, NewBeat};

pub async fn create_beat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBeat>, JsonRejection>,
) -> Result<Json<ApiResponse<Beat>>, ApiError> {
    let Json(payload) = payload?;
    let beat = state.beats.create_beat(payload).await?;
    Ok(Json(ApiResponse::success(beat)))
}

/// `POST|PUT /api/beats/{id}`
///
/// `creator_id`, `likes_count` and `s3_key` cannot be changed here.
pub async fn update_beat(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateBeatRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Beat>>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let beat = state
        .beats
        .update_beat(BeatUpdate {
            id,
            title: payload.title,
            genre: payload.genre,
            key: payload.key,
            bpm: payload.bpm,
            tags: payload.tags,
        })
        .await?;
    Ok(Json(ApiResponse::success(beat)))
}

pub async fn get_beat(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<Beat>>, ApiError> {
    let Path(id) = id?;
    let beat = state.beats.get_beat(id).await?;
    Ok(Json(ApiResponse::success(beat)))
}

/// `GET /api/beats?page_id=&page_size=&order=ID|BPM|KEY|GENRE`
///
/// `order=BPM` needs `min` and `max`, `order=KEY` needs `key`, and
/// `order=GENRE` needs `genre`.
pub async fn list_beats(
    State(state): State<Arc<AppState>>,
    params: Result<Query<BeatListingParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Beat>>>, ApiError> {
    let Query(params) = params?;
    let beats = state.beats.list_beats(params).await?;
    Ok(Json(ApiResponse::success(beats)))
}

pub async fn delete_beat(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path(id) = id?;
    state.beats.delete_beat(id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn list_beat_likes(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    page: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Like>>>, ApiError> {
    let Path(beat_id) = id?;
    let Query(page) = page?;
    let likes = state.likes.list_likes_by_beat(beat_id, page).await?;
    Ok(Json(ApiResponse::success(likes)))
}
