//! Main application orchestrator.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, MouseEvent};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::dto::LoginResponse;
use crate::application::services::{GeocodeOutcome, GeocodeTasks, NotificationManager};
use crate::application::use_cases::{
    ActivityUseCase, CREATE_ACTIVITY_FALLBACK, DELETE_ACTIVITY_FALLBACK, DELETE_NEWS_FALLBACK,
    EDIT_LOAD_FALLBACK, LIST_ACTIVITIES_FALLBACK, LOAD_ACTIVITY_FALLBACK, LOAD_NEWS_FALLBACK,
    LOGIN_FALLBACK_MESSAGE, LoginUseCase, NewsUseCase, ResolveSessionUseCase, SAVE_NEWS_FALLBACK,
    UPDATE_ACTIVITY_FALLBACK,
};
use crate::domain::entities::{Activity, ActivityId, Coordinates, News, NewsId, Session};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ActivityPort, AuthPort, GeocodingPort, NewsPort, SessionStoragePort};
use crate::infrastructure::config::AppConfig;
use crate::presentation::events::EventHandler;
use crate::presentation::router::Route;
use crate::presentation::ui::{
    ActivityDetailScreen, ActivityFormScreen, DetailAction, FormAction, FormMode, HomeAction,
    HomeScreen, LoginAction, LoginScreen, NewsAction, NewsFormScreen, NewsMode, NotificationPopup,
};
use crate::presentation::widgets::StatusBar;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Results reported by spawned network tasks.
#[derive(Debug)]
enum Action {
    ActivitiesLoaded(Result<Vec<Activity>, ApiError>),
    DetailLoaded(ActivityId, Result<Activity, ApiError>),
    NewsLoaded(ActivityId, Result<Vec<News>, ApiError>),
    EditLoaded(ActivityId, Result<Activity, ApiError>),
    NewsEditLoaded(NewsId, Result<News, ApiError>),
    LoggedIn(Result<LoginResponse, ApiError>),
    LoggedOut(Result<(), ApiError>),
    ActivitySaved {
        id: Option<ActivityId>,
        result: Result<(), ApiError>,
    },
    ActivityDeleted(ActivityId, Result<(), ApiError>),
    NewsSaved {
        activity_id: ActivityId,
        result: Result<(), ApiError>,
    },
    NewsDeleted(NewsId, Result<(), ApiError>),
}

enum CurrentScreen {
    Home(HomeScreen),
    Login(LoginScreen),
    Detail(ActivityDetailScreen),
    ActivityForm(Box<ActivityFormScreen>),
    NewsForm(NewsFormScreen),
}

pub struct App {
    route: Route,
    history: Vec<Route>,
    after_login: Option<Route>,
    screen: CurrentScreen,
    session: Option<Session>,
    login_use_case: LoginUseCase,
    resolve_session_use_case: ResolveSessionUseCase,
    activities: ActivityUseCase,
    news: NewsUseCase,
    geocode_tasks: GeocodeTasks,
    geocode_rx: mpsc::UnboundedReceiver<GeocodeOutcome>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    notifications: NotificationManager,
    map_center: Coordinates,
    map_zoom: u8,
    excerpt_length: usize,
    body_area: Rect,
    exiting: bool,
}

impl App {
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthPort>,
        activity_port: Arc<dyn ActivityPort>,
        news_port: Arc<dyn NewsPort>,
        geocoder: Arc<dyn GeocodingPort>,
        storage_port: Arc<dyn SessionStoragePort>,
        config: &AppConfig,
    ) -> Self {
        let login_use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let resolve_session_use_case = ResolveSessionUseCase::new(storage_port);
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (geocode_tx, geocode_rx) = mpsc::unbounded_channel();

        Self {
            route: Route::Home,
            history: Vec::new(),
            after_login: None,
            screen: CurrentScreen::Home(HomeScreen::new(false, config.ui.excerpt_length)),
            session: None,
            login_use_case,
            resolve_session_use_case,
            activities: ActivityUseCase::new(activity_port),
            news: NewsUseCase::new(news_port),
            geocode_tasks: GeocodeTasks::new(geocoder, geocode_tx),
            geocode_rx,
            action_tx,
            action_rx,
            notifications: NotificationManager::new(config.ui.notification_duration()),
            map_center: config.map.default_center(),
            map_zoom: config.map.zoom,
            excerpt_length: config.ui.excerpt_length,
            body_area: Rect::default(),
            exiting: false,
        }
    }

    /// # Errors
    /// Returns error if the terminal cannot be drawn.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        cli_token: Option<String>,
        initial: Route,
    ) -> color_eyre::Result<()> {
        match self.resolve_session_use_case.execute(cli_token).await {
            Ok(Some(resolved)) => {
                info!(
                    source = %resolved.source,
                    username = %resolved.session.display_name(),
                    "Found existing session"
                );
                self.session = Some(resolved.session);
            }
            Ok(None) => debug!("No stored session"),
            Err(e) => warn!(error = %e, "Failed to read stored session"),
        }

        self.mount(initial);
        self.run_event_loop(terminal).await?;

        self.geocode_tasks.abort_all();
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick_interval = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Some(outcome) = self.geocode_rx.recv() => {
                    self.handle_geocode(outcome);
                }

                Some(Ok(event)) = terminal_event => {
                    self.handle_terminal_event(event);
                }

                _ = tick_interval.tick() => {
                    self.notifications.tick();
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(&key),
            Event::Mouse(mouse) => self.handle_mouse(&mouse),
            _ => {}
        }
    }

    /// Runs `task` on the runtime and feeds its result back to the loop.
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            if tx.send(task.await).is_err() {
                debug!("Action channel closed, dropping result");
            }
        });
    }

    /// Goes to `route`, remembering the current one for Esc.
    fn navigate(&mut self, route: Route) {
        let previous = std::mem::take(&mut self.route);
        self.history.push(previous);
        self.mount(route);
    }

    fn go_back(&mut self) {
        let route = self.history.pop().unwrap_or_default();
        self.mount(route);
    }

    /// Builds the screen for `route` and starts its fetches. Forms that
    /// mutate data send a signed-out user to the login screen first.
    fn mount(&mut self, route: Route) {
        let route = if route.requires_session() && self.session.is_none() {
            info!(route = %route, "Sign-in required, redirecting to login");
            self.after_login = Some(route);
            Route::Login
        } else {
            route
        };

        debug!(route = %route, "Mounting screen");
        self.geocode_tasks.abort_all();
        if route == Route::Home {
            self.history.clear();
        }

        let signed_in = self.session.is_some();
        self.screen = match &route {
            Route::Home => {
                self.load_activities();
                CurrentScreen::Home(HomeScreen::new(signed_in, self.excerpt_length))
            }
            Route::Login => CurrentScreen::Login(LoginScreen::new()),
            Route::ActivityDetail(id) => {
                self.load_detail(id);
                CurrentScreen::Detail(ActivityDetailScreen::new(id.clone(), signed_in))
            }
            Route::CreateActivity => CurrentScreen::ActivityForm(Box::new(
                ActivityFormScreen::new(
                    FormMode::Create,
                    self.map_center,
                    self.map_zoom,
                    self.geocode_tasks.generations(),
                ),
            )),
            Route::EditActivity(id) => {
                let activities = self.activities.clone();
                let id_for_task = id.clone();
                self.spawn(async move {
                    let result = activities.get(&id_for_task).await;
                    Action::EditLoaded(id_for_task, result)
                });
                CurrentScreen::ActivityForm(Box::new(ActivityFormScreen::new(
                    FormMode::Edit(id.clone()),
                    self.map_center,
                    self.map_zoom,
                    self.geocode_tasks.generations(),
                )))
            }
            Route::CreateNews(activity_id) => {
                CurrentScreen::NewsForm(NewsFormScreen::new(NewsMode::Create(activity_id.clone())))
            }
            Route::EditNews(id) => {
                let news = self.news.clone();
                let id_for_task = id.clone();
                self.spawn(async move {
                    let result = news.get(&id_for_task).await;
                    Action::NewsEditLoaded(id_for_task, result)
                });
                CurrentScreen::NewsForm(NewsFormScreen::new(NewsMode::Edit(id.clone())))
            }
        };
        self.route = route;
    }

    fn load_activities(&self) {
        let activities = self.activities.clone();
        self.spawn(async move { Action::ActivitiesLoaded(activities.list().await) });
    }

    fn load_detail(&self, id: &ActivityId) {
        let activities = self.activities.clone();
        let activity_id = id.clone();
        self.spawn(async move {
            let result = activities.get(&activity_id).await;
            Action::DetailLoaded(activity_id, result)
        });

        let news = self.news.clone();
        let activity_id = id.clone();
        self.spawn(async move {
            let result = news.list(&activity_id).await;
            Action::NewsLoaded(activity_id, result)
        });
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if EventHandler::is_force_quit(key) {
            self.exiting = true;
            return;
        }

        match self.screen {
            CurrentScreen::Home(_) => self.handle_home_key(key),
            CurrentScreen::Login(_) => self.handle_login_key(key),
            CurrentScreen::Detail(_) => self.handle_detail_key(key),
            CurrentScreen::ActivityForm(_) => self.handle_form_key(key),
            CurrentScreen::NewsForm(_) => self.handle_news_key(key),
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let body = self.body_area;
        if let CurrentScreen::ActivityForm(screen) = &mut self.screen {
            let action = screen.handle_mouse(mouse, body);
            self.apply_form_action(action);
        }
    }

    fn handle_home_key(&mut self, key: &KeyEvent) {
        let CurrentScreen::Home(screen) = &mut self.screen else {
            return;
        };

        match screen.handle_key(key) {
            HomeAction::None => {}
            HomeAction::Quit => self.exiting = true,
            HomeAction::Open(id) => self.navigate(Route::ActivityDetail(id)),
            HomeAction::Create => self.navigate(Route::CreateActivity),
            HomeAction::Login => self.navigate(Route::Login),
            HomeAction::Logout => {
                screen.set_signed_in(false);
                self.session = None;
                let login = self.login_use_case.clone();
                self.spawn(async move { Action::LoggedOut(login.logout().await) });
            }
            HomeAction::Reload => {
                screen.set_loading();
                self.load_activities();
            }
        }
    }

    fn handle_login_key(&mut self, key: &KeyEvent) {
        let CurrentScreen::Login(screen) = &mut self.screen else {
            return;
        };

        match screen.handle_key(key) {
            LoginAction::None => {}
            LoginAction::Back => {
                self.after_login = None;
                self.go_back();
            }
            LoginAction::Submit => {
                let request = screen.request();
                screen.set_submitting();
                let login = self.login_use_case.clone();
                self.spawn(async move { Action::LoggedIn(login.execute(request).await) });
            }
        }
    }

    fn handle_detail_key(&mut self, key: &KeyEvent) {
        let CurrentScreen::Detail(screen) = &mut self.screen else {
            return;
        };

        match screen.handle_key(key) {
            DetailAction::None => {}
            DetailAction::Back => self.go_back(),
            DetailAction::Reload => {
                screen.set_loading();
                let id = screen.id().clone();
                self.load_detail(&id);
            }
            DetailAction::Edit(id) => self.navigate(Route::EditActivity(id)),
            DetailAction::CreateNews(id) => self.navigate(Route::CreateNews(id)),
            DetailAction::EditNews(id) => self.navigate(Route::EditNews(id)),
            DetailAction::Delete(id) => {
                screen.set_busy(true);
                let activities = self.activities.clone();
                let session = self.session.clone();
                self.spawn(async move {
                    let result = activities.delete(session.as_ref(), &id).await;
                    Action::ActivityDeleted(id, result)
                });
            }
            DetailAction::DeleteNews(id) => {
                let news = self.news.clone();
                let session = self.session.clone();
                self.spawn(async move {
                    let result = news.delete(session.as_ref(), &id).await;
                    Action::NewsDeleted(id, result)
                });
            }
        }
    }

    fn handle_form_key(&mut self, key: &KeyEvent) {
        let CurrentScreen::ActivityForm(screen) = &mut self.screen else {
            return;
        };
        let action = screen.handle_key(key);
        self.apply_form_action(action);
    }

    fn apply_form_action(&mut self, action: FormAction) {
        let CurrentScreen::ActivityForm(screen) = &mut self.screen else {
            return;
        };

        match action {
            FormAction::None => {}
            FormAction::Cancel => self.go_back(),
            FormAction::Search(request) => self.geocode_tasks.search(request),
            FormAction::Reverse(request) => self.geocode_tasks.reverse(request),
            FormAction::PickerClosed => self.geocode_tasks.abort_all(),
            FormAction::Submit => {
                let form = screen.form();
                let id = match screen.mode() {
                    FormMode::Create => None,
                    FormMode::Edit(id) => Some(id.clone()),
                };
                screen.set_submitting();

                let activities = self.activities.clone();
                let session = self.session.clone();
                self.spawn(async move {
                    let result = match &id {
                        None => activities.create(session.as_ref(), &form).await,
                        Some(id) => activities.update(session.as_ref(), id, &form).await,
                    };
                    Action::ActivitySaved { id, result }
                });
            }
        }
    }

    fn handle_news_key(&mut self, key: &KeyEvent) {
        let CurrentScreen::NewsForm(screen) = &mut self.screen else {
            return;
        };

        match screen.handle_key(key) {
            NewsAction::None => {}
            NewsAction::Cancel => self.go_back(),
            NewsAction::Submit => {
                let Some(form) = screen.form() else {
                    return;
                };
                let id = match screen.mode() {
                    NewsMode::Create(_) => None,
                    NewsMode::Edit(id) => Some(id.clone()),
                };
                screen.set_submitting();

                let news = self.news.clone();
                let session = self.session.clone();
                self.spawn(async move {
                    let result = news.save(session.as_ref(), id.as_ref(), &form).await;
                    Action::NewsSaved {
                        activity_id: form.activity_id,
                        result,
                    }
                });
            }
        }
    }

    fn handle_geocode(&mut self, outcome: GeocodeOutcome) {
        match &mut self.screen {
            CurrentScreen::ActivityForm(screen) => {
                screen.apply_geocode(outcome);
            }
            _ => debug!("Dropping geocode result, picker closed"),
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::ActivitiesLoaded(result) => {
                if let CurrentScreen::Home(screen) = &mut self.screen {
                    match result {
                        Ok(activities) => screen.set_activities(activities),
                        Err(e) => {
                            warn!(error = %e, "Failed to load activities");
                            screen.set_error(LIST_ACTIVITIES_FALLBACK);
                        }
                    }
                }
            }
            Action::DetailLoaded(id, result) => {
                if let CurrentScreen::Detail(screen) = &mut self.screen
                    && screen.id() == &id
                {
                    match result {
                        Ok(activity) => screen.set_activity(activity),
                        Err(ApiError::NotFound { .. }) => screen.set_error("Activity not found"),
                        Err(_) => screen.set_error(LOAD_ACTIVITY_FALLBACK),
                    }
                }
            }
            Action::NewsLoaded(id, result) => {
                if let CurrentScreen::Detail(screen) = &mut self.screen
                    && screen.id() == &id
                {
                    match result {
                        Ok(news) => screen.set_news(news),
                        Err(e) => {
                            warn!(activity_id = %id, error = %e, "Failed to load news");
                            screen.set_news_error(LOAD_NEWS_FALLBACK);
                        }
                    }
                }
            }
            Action::EditLoaded(id, result) => {
                if let CurrentScreen::ActivityForm(screen) = &mut self.screen
                    && screen.mode() == &FormMode::Edit(id)
                {
                    match result {
                        Ok(activity) => screen.set_activity(&activity),
                        Err(_) => screen.set_load_error(EDIT_LOAD_FALLBACK),
                    }
                }
            }
            Action::NewsEditLoaded(id, result) => {
                if let CurrentScreen::NewsForm(screen) = &mut self.screen
                    && screen.mode() == &NewsMode::Edit(id)
                {
                    match result {
                        Ok(news) => screen.set_news(&news),
                        Err(e) => screen.set_load_error(e.user_message(LOAD_NEWS_FALLBACK)),
                    }
                }
            }
            Action::LoggedIn(result) => self.handle_login_result(result),
            Action::LoggedOut(result) => match result {
                Ok(()) => self.notifications.info("Logged out."),
                Err(e) => {
                    warn!(error = %e, "Logout left a stored session behind");
                    self.notifications.error("Logged out, but the stored session could not be removed.");
                }
            },
            Action::ActivitySaved { id, result } => self.handle_activity_saved(id, result),
            Action::ActivityDeleted(id, result) => match result {
                Ok(()) => {
                    info!(activity_id = %id, "Activity deleted");
                    self.notifications.success("Activity deleted.");
                    self.mount(Route::Home);
                }
                Err(e) => {
                    if let CurrentScreen::Detail(screen) = &mut self.screen {
                        screen.set_busy(false);
                    }
                    self.notifications
                        .error(e.user_message(DELETE_ACTIVITY_FALLBACK));
                }
            },
            Action::NewsSaved {
                activity_id,
                result,
            } => {
                let CurrentScreen::NewsForm(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(()) => {
                        self.notifications.success("News saved successfully!");
                        self.history.pop();
                        self.mount(Route::ActivityDetail(activity_id));
                    }
                    Err(e) => screen.set_error(e.user_message(SAVE_NEWS_FALLBACK)),
                }
            }
            Action::NewsDeleted(id, result) => match result {
                Ok(()) => {
                    if let CurrentScreen::Detail(screen) = &mut self.screen {
                        screen.remove_news(&id);
                    }
                    self.notifications.success("News deleted.");
                }
                Err(e) => self.notifications.error(e.user_message(DELETE_NEWS_FALLBACK)),
            },
        }
    }

    fn handle_login_result(&mut self, result: Result<LoginResponse, ApiError>) {
        match result {
            Ok(response) => {
                if !response.session_persisted {
                    self.notifications
                        .info("Signed in for this run only; the keyring was unavailable.");
                }
                self.session = Some(response.session);
                let next = self.after_login.take().unwrap_or_default();
                self.mount(next);
            }
            Err(e) => {
                if let CurrentScreen::Login(screen) = &mut self.screen {
                    screen.set_error(e.user_message(LOGIN_FALLBACK_MESSAGE));
                }
            }
        }
    }

    fn handle_activity_saved(&mut self, id: Option<ActivityId>, result: Result<(), ApiError>) {
        let CurrentScreen::ActivityForm(screen) = &mut self.screen else {
            return;
        };

        match (result, id) {
            (Ok(()), None) => {
                self.notifications.success("Activity created successfully!");
                self.mount(Route::Home);
            }
            (Ok(()), Some(id)) => {
                self.notifications.success("Activity updated successfully!");
                self.history.pop();
                self.mount(Route::ActivityDetail(id));
            }
            (Err(e), None) => screen.set_error(e.user_message(CREATE_ACTIVITY_FALLBACK)),
            (Err(e), Some(_)) => screen.set_error(e.user_message(UPDATE_ACTIVITY_FALLBACK)),
        }
    }

    fn header_line(&self) -> Line<'_> {
        let user = self.session.as_ref().map_or_else(
            || Span::styled("Guest", Style::default().fg(Color::DarkGray)),
            |session| {
                Span::styled(
                    format!("Signed in as {}", session.display_name()),
                    Style::default().fg(Color::Green),
                )
            },
        );

        Line::from(vec![
            Span::styled(
                " Care Connect ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}  ", self.route.path()),
                Style::default().fg(Color::Gray),
            ),
            user,
        ])
    }

    fn status_bar(&self) -> StatusBar {
        match &self.screen {
            CurrentScreen::Home(screen) => screen.status_bar(),
            CurrentScreen::Login(screen) => screen.status_bar(),
            CurrentScreen::Detail(screen) => screen.status_bar(),
            CurrentScreen::ActivityForm(screen) => screen.status_bar(),
            CurrentScreen::NewsForm(screen) => screen.status_bar(),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        self.body_area = body;

        frame.render_widget(self.header_line(), header);
        match &self.screen {
            CurrentScreen::Home(screen) => frame.render_widget(screen, body),
            CurrentScreen::Login(screen) => frame.render_widget(screen, body),
            CurrentScreen::Detail(screen) => frame.render_widget(screen, body),
            CurrentScreen::ActivityForm(screen) => frame.render_widget(&**screen, body),
            CurrentScreen::NewsForm(screen) => frame.render_widget(screen, body),
        }
        frame.render_widget(&self.status_bar(), footer);

        if let Some(notification) = self.notifications.current_notification() {
            frame.render_widget(NotificationPopup::new(notification), frame.area());
        }
    }
}
