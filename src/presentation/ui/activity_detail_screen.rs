//! Full view of one activity with its volunteers, donations and news.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::load_state::LoadState;
use super::utils::{centered_fixed, format_long_date};
use crate::domain::entities::{Activity, ActivityId, News, NewsId, format_rupiah};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::StatusBar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    None,
    Back,
    Reload,
    Edit(ActivityId),
    Delete(ActivityId),
    CreateNews(ActivityId),
    EditNews(NewsId),
    DeleteNews(NewsId),
}

/// What a pending `y` confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Confirm {
    DeleteActivity,
    DeleteNews(NewsId),
}

pub struct ActivityDetailScreen {
    id: ActivityId,
    activity: LoadState<Activity>,
    news: LoadState<Vec<News>>,
    selected_news: usize,
    scroll: u16,
    signed_in: bool,
    confirm: Option<Confirm>,
    busy: bool,
}

impl ActivityDetailScreen {
    #[must_use]
    pub fn new(id: ActivityId, signed_in: bool) -> Self {
        Self {
            id,
            activity: LoadState::Loading,
            news: LoadState::Loading,
            selected_news: 0,
            scroll: 0,
            signed_in,
            confirm: None,
            busy: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ActivityId {
        &self.id
    }

    #[must_use]
    pub const fn activity(&self) -> Option<&Activity> {
        self.activity.loaded()
    }

    pub fn set_loading(&mut self) {
        self.activity = LoadState::Loading;
        self.news = LoadState::Loading;
        self.confirm = None;
    }

    pub fn set_activity(&mut self, activity: Activity) {
        self.activity = LoadState::Loaded(activity);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.activity = LoadState::Failed(message.into());
    }

    pub fn set_news(&mut self, news: Vec<News>) {
        self.selected_news = self.selected_news.min(news.len().saturating_sub(1));
        self.news = LoadState::Loaded(news);
    }

    pub fn set_news_error(&mut self, message: impl Into<String>) {
        self.news = LoadState::Failed(message.into());
    }

    /// Drops a deleted post without refetching the list.
    pub fn remove_news(&mut self, id: &NewsId) {
        if let Some(list) = self.news.loaded_mut() {
            list.retain(|news| &news.id != id);
            self.selected_news = self.selected_news.min(list.len().saturating_sub(1));
        }
    }

    /// Blocks input while a delete request runs.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn set_signed_in(&mut self, signed_in: bool) {
        self.signed_in = signed_in;
    }

    #[must_use]
    pub fn selected_news(&self) -> Option<&News> {
        self.news.loaded().and_then(|list| list.get(self.selected_news))
    }

    fn news_len(&self) -> usize {
        self.news.loaded().map_or(0, Vec::len)
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> DetailAction {
        if self.busy {
            return DetailAction::None;
        }

        if let Some(confirm) = self.confirm.take() {
            return match (key.code, confirm) {
                (KeyCode::Char('y' | 'Y'), Confirm::DeleteActivity) => {
                    DetailAction::Delete(self.id.clone())
                }
                (KeyCode::Char('y' | 'Y'), Confirm::DeleteNews(id)) => DetailAction::DeleteNews(id),
                _ => DetailAction::None,
            };
        }

        if EventHandler::is_back_event(key) || EventHandler::is_quit_event(key) {
            return DetailAction::Back;
        }

        let loaded = self.activity.loaded().is_some();
        match key.code {
            KeyCode::Char('r') if !self.activity.is_loading() => return DetailAction::Reload,
            KeyCode::PageDown | KeyCode::Char('J') => self.scroll = self.scroll.saturating_add(5),
            KeyCode::PageUp | KeyCode::Char('K') => self.scroll = self.scroll.saturating_sub(5),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_news + 1 < self.news_len() {
                    self.selected_news += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_news = self.selected_news.saturating_sub(1);
            }
            KeyCode::Char('e') if self.signed_in && loaded => {
                return DetailAction::Edit(self.id.clone());
            }
            KeyCode::Char('d') if self.signed_in && loaded => {
                self.confirm = Some(Confirm::DeleteActivity);
            }
            KeyCode::Char('n') if self.signed_in && loaded => {
                return DetailAction::CreateNews(self.id.clone());
            }
            KeyCode::Enter if self.signed_in => {
                if let Some(news) = self.selected_news() {
                    return DetailAction::EditNews(news.id.clone());
                }
            }
            KeyCode::Char('x') if self.signed_in => {
                if let Some(news) = self.selected_news() {
                    self.confirm = Some(Confirm::DeleteNews(news.id.clone()));
                }
            }
            _ => {}
        }

        DetailAction::None
    }

    #[must_use]
    pub fn status_bar(&self) -> StatusBar {
        if self.confirm.is_some() {
            return StatusBar::warning("Confirm")
                .hint("y", "delete")
                .hint("any key", "cancel");
        }
        let bar = StatusBar::info("Activity").hint("PgUp/PgDn", "scroll");
        let bar = if self.signed_in {
            bar.hint("e", "edit")
                .hint("d", "delete")
                .hint("n", "add news")
                .hint("Enter", "edit news")
                .hint("x", "delete news")
        } else {
            bar
        };
        bar.hint("r", "reload").hint("Esc", "back")
    }

    fn detail_lines(activity: &Activity) -> Vec<Line<'_>> {
        let label = Style::default().fg(Color::Gray);
        let heading = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                activity.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Location: ", label),
                Span::raw(activity.location_name()),
            ]),
        ];
        if let Some(date) = activity.date.as_deref() {
            lines.push(Line::from(vec![
                Span::styled("Date: ", label),
                Span::raw(format_long_date(date)),
            ]));
        }
        if !activity.category.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Category: ", label),
                Span::styled(activity.category_label(), Style::default().fg(Color::Magenta)),
            ]));
        }
        if activity.target_money > 0 {
            lines.push(Line::from(vec![
                Span::styled("Raised: ", label),
                Span::raw(format!(
                    "{} of {}",
                    format_rupiah(activity.collected_money),
                    format_rupiah(activity.target_money)
                )),
            ]));
        }
        if let Some(image) = activity.cover_image() {
            lines.push(Line::from(vec![
                Span::styled("Image: ", label),
                Span::styled(image, Style::default().fg(Color::Blue)),
            ]));
        }

        lines.push(Line::default());
        lines.extend(activity.description.lines().map(Line::raw));
        lines.push(Line::default());

        lines.push(Line::from(Span::styled(
            format!("Volunteers ({})", activity.volunteer_count()),
            heading,
        )));
        if activity.volunteers.is_empty() {
            lines.push(Line::from(Span::styled("No volunteers yet", label)));
        }
        for volunteer in &activity.volunteers {
            lines.push(Line::from(format!("  • {}", volunteer.display_name())));
        }
        lines.push(Line::default());

        lines.push(Line::from(Span::styled(
            format!("Donations ({})", activity.donations.len()),
            heading,
        )));
        if activity.donations.is_empty() {
            lines.push(Line::from(Span::styled("No donations yet", label)));
        }
        for donation in &activity.donations {
            let mut spans = vec![
                Span::raw(format!("  • {} ", donation.donor())),
                Span::styled(
                    format_rupiah(donation.amount),
                    Style::default().fg(Color::Green),
                ),
            ];
            if let Some(message) = donation.message.as_deref().filter(|m| !m.is_empty()) {
                spans.push(Span::styled(format!("  \"{message}\""), label));
            }
            lines.push(Line::from(spans));
        }

        lines
    }

    fn render_news(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" News ")
            .border_style(Style::default().fg(Color::DarkGray));

        let lines: Vec<Line> = match &self.news {
            LoadState::Loading => vec![Line::from(Span::styled(
                "Loading news...",
                Style::default().fg(Color::Yellow),
            ))],
            LoadState::Failed(error) => vec![Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))],
            LoadState::Loaded(list) if list.is_empty() => vec![Line::from(Span::styled(
                "No news yet",
                Style::default().fg(Color::Gray),
            ))],
            LoadState::Loaded(list) => list
                .iter()
                .enumerate()
                .flat_map(|(i, news)| {
                    let selected = i == self.selected_news;
                    let marker = if selected { "▌ " } else { "  " };
                    let title_style = if selected {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    let mut title = vec![
                        Span::styled(marker, title_style),
                        Span::styled(news.title.as_str(), title_style),
                    ];
                    if let Some(date) = news.created_at.as_deref() {
                        title.push(Span::styled(
                            format!("  {}", format_long_date(date)),
                            Style::default().fg(Color::Gray),
                        ));
                    }
                    let body = news.content.lines().next().unwrap_or_default();
                    [Line::from(title), Line::from(format!("  {body}"))]
                })
                .collect(),
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn render_confirm(&self, area: Rect, buf: &mut Buffer) {
        let Some(confirm) = &self.confirm else {
            return;
        };
        let question = match confirm {
            Confirm::DeleteActivity => "Are you sure you want to delete this activity?",
            Confirm::DeleteNews(_) => "Are you sure you want to delete this news post?",
        };
        let popup = centered_fixed(56, 5, area);
        Clear.render(popup, buf);
        Paragraph::new(vec![
            Line::from(question),
            Line::from(Span::styled(
                "y: delete   any other key: cancel",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true })
        .render(popup, buf);
    }
}

impl Widget for &ActivityDetailScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let activity = match &self.activity {
            LoadState::Loading => {
                Paragraph::new("Loading activity...")
                    .style(Style::default().fg(Color::Yellow))
                    .render(area, buf);
                return;
            }
            LoadState::Failed(error) => {
                Paragraph::new(vec![
                    Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
                    Line::from(Span::styled(
                        "Press r to retry or Esc to go back.",
                        Style::default().fg(Color::Gray),
                    )),
                ])
                .wrap(Wrap { trim: true })
                .render(area, buf);
                return;
            }
            LoadState::Loaded(activity) => activity,
        };

        let [detail, news] =
            Layout::vertical([Constraint::Fill(2), Constraint::Fill(1)]).areas(area);

        Paragraph::new(ActivityDetailScreen::detail_lines(activity))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Activity ")
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(detail, buf);

        self.render_news(news, buf);
        self.render_confirm(area, buf);
    }
}
