pub mod prelude;

pub mod beats;
pub mod likes;
pub mod users;
