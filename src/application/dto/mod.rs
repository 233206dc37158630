//! Data transfer objects for the application layer.

mod activity_dto;
mod auth_dto;
mod news_dto;

pub use activity_dto::ActivityForm;
pub use auth_dto::{LoginRequest, LoginResponse, SessionSource};
pub use news_dto::NewsForm;
