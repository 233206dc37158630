//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateful services driving the UI.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{ActivityForm, LoginRequest, LoginResponse, NewsForm, SessionSource};
pub use services::{LocationPicker, MapViewport, NotificationManager};
pub use use_cases::{ActivityUseCase, LoginUseCase, NewsUseCase, ResolveSessionUseCase};
