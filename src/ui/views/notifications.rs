//! Notification feed: unread entries first, with per-entry and bulk
//! read/delete actions handed back to the host.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::api::NotificationFeed;
use crate::types::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationsAction {
    None,
    /// Mark one entry read; host calls the API and refreshes the feed.
    MarkRead(i64),
    MarkAllRead,
    Delete(i64),
    ClearRead,
    Close,
}

pub struct NotificationsView {
    /// Unread first, then read, both newest-first as the backend sends them.
    entries: Vec<Notification>,
    unread_count: u32,
    list_state: ListState,
}

impl Default for NotificationsView {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationsView {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            entries: Vec::new(),
            unread_count: 0,
            list_state,
        }
    }

    pub fn set_feed(&mut self, feed: NotificationFeed) {
        self.unread_count = feed.unread_count;
        self.entries = feed.unread;
        self.entries.extend(feed.read);
        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state
            .select(Some(selected.min(self.entries.len().saturating_sub(1))));
    }

    pub fn selected(&self) -> Option<&Notification> {
        self.list_state
            .selected()
            .and_then(|i| self.entries.get(i))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> NotificationsAction {
        match key.code {
            KeyCode::Esc => NotificationsAction::Close,
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                NotificationsAction::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                NotificationsAction::None
            }
            KeyCode::Enter => self.selected().map_or(NotificationsAction::None, |n| {
                if n.is_read {
                    NotificationsAction::None
                } else {
                    NotificationsAction::MarkRead(n.notif_id)
                }
            }),
            KeyCode::Char('a') => NotificationsAction::MarkAllRead,
            KeyCode::Char('x') => self
                .selected()
                .map_or(NotificationsAction::None, |n| {
                    NotificationsAction::Delete(n.notif_id)
                }),
            KeyCode::Char('c') => NotificationsAction::ClearRead,
            _ => NotificationsAction::None,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.list_state.select(Some(next));
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" Notifications ({} unread) ", self.unread_count);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|n| {
                let style = if n.is_read {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", n.notif_type.glyph())),
                    Span::styled(n.notif_title.clone(), style),
                    Span::styled(
                        format!("  {}", n.notif_message),
                        Style::default().fg(Color::Gray),
                    ),
                ]))
            })
            .collect();

        let hint = " [Enter] read  [a] read all  [x] delete  [c] clear read  [Esc] back ";
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .title_bottom(hint)
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
