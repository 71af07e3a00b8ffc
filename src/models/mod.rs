pub mod beat;
pub mod like;
pub mod user;

pub use beat::{Beat, BeatUpdate, NewBeat};
pub use like::{Like, LikedBeat};
pub use user::{NewUser, User, UserUpdate};
