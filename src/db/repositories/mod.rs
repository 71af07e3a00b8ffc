pub mod beat;
pub mod like;
pub mod user;
