use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, UpdateUserRequest, UserDto};
use crate::listing::{BeatListingParams, PageParams, UserListingParams};
use crate::models::{Beat, Like, NewUser, UserUpdate};

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let Json(payload) = payload?;
    let user = state.users.create_user(payload).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

/// `POST|PUT /api/users/{id}`
///
/// Full replace: username, password and email are all required.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let user = state
        .users
        .update_user(UserUpdate {
            id,
            username: payload.username,
            password: payload.password,
            email: payload.email,
        })
        .await?;
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let Path(id) = id?;
    let user = state.users.get_user(id).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn get_user_by_username(
    State(state): State<Arc<AppState>>,
    username: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let Path(username) = username?;
    let user = state.users.get_user_by_username(&username).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

/// `GET /api/users?page_id=&page_size=[&order=ID|USERNAME]`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    params: Result<Query<UserListingParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let Query(params) = params?;
    let users = state.users.list_users(params).await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path(id) = id?;
    state.users.delete_user(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// `GET /api/users/{id}/beats`, same query parameters as `/api/beats`.
pub async fn list_creator_beats(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    params: Result<Query<BeatListingParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Beat>>>, ApiError> {
    let Path(creator_id) = id?;
    let Query(params) = params?;
    let beats = state
        .beats
        .list_beats_by_creator(creator_id, params)
        .await?;
    Ok(Json(ApiResponse::success(beats)))
}

pub async fn list_user_likes(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    page: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Like>>>, ApiError> {
    let Path(user_id) = id?;
    let Query(page) = page?;
    let likes = state.likes.list_likes_by_user(user_id, page).await?;
    Ok(Json(ApiResponse::success(likes)))
}
