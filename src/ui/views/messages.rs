//! Chat view: conversation list, message history, compose line.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::types::{Chat, Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagesAction {
    None,
    /// A different chat was selected; host fetches its messages and marks
    /// it read.
    SelectChat(i64),
    /// Send the composed text to the active chat.
    Send { chat_id: i64, content: String },
    /// Leave the messages view.
    Close,
}

pub struct MessagesView {
    chats: Vec<Chat>,
    chat_state: ListState,
    messages: Vec<Message>,
    compose: String,
    /// Account id of the viewer, for message alignment.
    own_user_id: i64,
}

impl MessagesView {
    pub fn new(own_user_id: i64) -> Self {
        let mut chat_state = ListState::default();
        chat_state.select(Some(0));
        Self {
            chats: Vec::new(),
            chat_state,
            messages: Vec::new(),
            compose: String::new(),
            own_user_id,
        }
    }

    pub fn set_chats(&mut self, chats: Vec<Chat>) {
        self.chats = chats;
        let selected = self.chat_state.selected().unwrap_or(0);
        self.chat_state
            .select(Some(selected.min(self.chats.len().saturating_sub(1))));
    }

    pub fn set_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.compose.clear();
    }

    pub fn selected_chat(&self) -> Option<&Chat> {
        self.chat_state.selected().and_then(|i| self.chats.get(i))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MessagesAction {
        match key.code {
            KeyCode::Esc => MessagesAction::Close,
            KeyCode::Down => self.move_selection(1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Enter => {
                let content = self.compose.trim().to_string();
                match (self.selected_chat(), content.is_empty()) {
                    (Some(chat), false) => MessagesAction::Send {
                        chat_id: chat.chat_id,
                        content,
                    },
                    _ => MessagesAction::None,
                }
            }
            KeyCode::Backspace => {
                self.compose.pop();
                MessagesAction::None
            }
            KeyCode::Char(c) => {
                self.compose.push(c);
                MessagesAction::None
            }
            _ => MessagesAction::None,
        }
    }

    fn move_selection(&mut self, delta: isize) -> MessagesAction {
        let len = self.chats.len();
        if len == 0 {
            return MessagesAction::None;
        }
        let current = self.chat_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.chat_state.select(Some(next));
        self.chats
            .get(next)
            .map_or(MessagesAction::None, |chat| {
                MessagesAction::SelectChat(chat.chat_id)
            })
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        let items: Vec<ListItem> = self
            .chats
            .iter()
            .map(|chat| {
                let who = chat.counterparty(self.own_user_id).full_name.clone();
                let unread = if chat.unread_count > 0 {
                    format!(" ({})", chat.unread_count)
                } else {
                    String::new()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(who),
                    Span::styled(unread, Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("  {}", chat.listing_title),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title(" Chats ").borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black));
        frame.render_stateful_widget(list, columns[0], &mut self.chat_state);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(columns[1]);

        let mut lines: Vec<Line> = Vec::new();
        for message in &self.messages {
            let own = message.sender.user_id == self.own_user_id;
            let style = if own {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let prefix = if own { "you" } else { &message.sender.full_name };
            lines.push(Line::from(Span::styled(
                format!("{}: {}", prefix, message.content),
                style,
            )));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().title(" Messages ").borders(Borders::ALL))
                .wrap(Wrap { trim: false }),
            right[0],
        );

        frame.render_widget(
            Paragraph::new(self.compose.as_str()).block(
                Block::default()
                    .title(" Compose (Enter to send, Esc to close) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().add_modifier(Modifier::DIM)),
            ),
            right[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn chat(id: i64, unread: u32) -> Chat {
        serde_json::from_value(serde_json::json!({
            "chat_id": id,
            "buyer": {
                "userid": 1, "user_firstname": "B", "user_lastname": "U",
                "full_name": "B U", "email": "b@example.com",
                "user_role": "buyer", "date_joined": "2025-01-01T00:00:00Z"
            },
            "seller": {
                "userid": 2, "user_firstname": "S", "user_lastname": "E",
                "full_name": "S E", "email": "s@example.com",
                "user_role": "seller", "date_joined": "2025-01-01T00:00:00Z"
            },
            "listing_id": 5,
            "listing_title": "Old coupe",
            "last_message_at": null,
            "unread_count": unread
        }))
        .unwrap()
    }

    #[test]
    fn typing_and_enter_produce_send_action() {
        let mut view = MessagesView::new(1);
        view.set_chats(vec![chat(10, 0)]);
        for c in "hello".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            view.handle_key(key(KeyCode::Enter)),
            MessagesAction::Send {
                chat_id: 10,
                content: "hello".into()
            }
        );
    }

    #[test]
    fn enter_with_empty_compose_does_nothing() {
        let mut view = MessagesView::new(1);
        view.set_chats(vec![chat(10, 0)]);
        assert_eq!(view.handle_key(key(KeyCode::Enter)), MessagesAction::None);
    }

    #[test]
    fn chat_selection_emits_select_action() {
        let mut view = MessagesView::new(1);
        view.set_chats(vec![chat(10, 0), chat(11, 2)]);
        assert_eq!(
            view.handle_key(key(KeyCode::Down)),
            MessagesAction::SelectChat(11)
        );
        assert_eq!(
            view.handle_key(key(KeyCode::Down)),
            MessagesAction::SelectChat(10)
        );
    }

    #[test]
    fn counterparty_is_the_other_account() {
        let c = chat(10, 0);
        assert_eq!(c.counterparty(1).user_id, 2);
        assert_eq!(c.counterparty(2).user_id, 1);
    }
}
