//! UI screens.

mod activity_detail_screen;
mod activity_form_screen;
mod app;
mod home_screen;
mod load_state;
mod location_picker_view;
mod login_screen;
mod news_form_screen;
mod notification_popup;
mod utils;

pub use activity_detail_screen::{ActivityDetailScreen, DetailAction};
pub use activity_form_screen::{ActivityFormScreen, FormAction, FormMode};
pub use app::App;
pub use home_screen::{HomeAction, HomeScreen};
pub use load_state::LoadState;
pub use location_picker_view::{LocationPickerView, PickerAction, PickerFocus};
pub use login_screen::{LoginAction, LoginScreen, LoginState};
pub use news_form_screen::{NewsAction, NewsFormScreen, NewsMode};
pub use notification_popup::NotificationPopup;
