pub use super::beats::Entity as Beats;
pub use super::likes::Entity as Likes;
pub use super::users::Entity as Users;
