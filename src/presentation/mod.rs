//! Presentation layer with UI components and event handling.

/// Event handling.
pub mod events;
/// Path to screen mapping.
pub mod router;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use router::Route;
pub use ui::App;
