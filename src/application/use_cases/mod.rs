//! Use case implementations.

mod activity_use_case;
mod login_use_case;
mod news_use_case;
mod resolve_session_use_case;

pub use activity_use_case::{
    ActivityUseCase, CREATE_ACTIVITY_FALLBACK, DELETE_ACTIVITY_FALLBACK, EDIT_LOAD_FALLBACK,
    LIST_ACTIVITIES_FALLBACK, LOAD_ACTIVITY_FALLBACK, UPDATE_ACTIVITY_FALLBACK,
};
pub use login_use_case::{LOGIN_FALLBACK_MESSAGE, LoginUseCase};
pub use news_use_case::{
    DELETE_NEWS_FALLBACK, LOAD_NEWS_FALLBACK, NewsUseCase, SAVE_NEWS_FALLBACK,
};
pub use resolve_session_use_case::{ResolveSessionUseCase, ResolvedSession};
