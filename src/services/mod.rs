use sea_orm::{DbErr, SqlErr};

pub mod password;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::DefaultUserService;

pub mod beat_service;
pub mod beat_service_impl;
pub use beat_service::{BeatError, BeatService};
pub use beat_service_impl::DefaultBeatService;

pub mod like_service;
pub mod like_service_impl;
pub use like_service::{LikeError, LikeService};
pub use like_service_impl::DefaultLikeService;

/// Constraint class of a store failure, when the database reported one.
pub(crate) fn constraint_violation(err: &anyhow::Error) -> Option<SqlErr> {
    err.downcast_ref::<DbErr>().and_then(DbErr::sql_err)
}
