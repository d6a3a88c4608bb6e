//! Read-only status screen for an already-submitted dealer application.
//!
//! Shown instead of the application wizard when the account has one on
//! record; re-applying is a backend decision, not a client affordance.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::types::{ApplicationStatus, DealerApplication};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStatusAction {
    None,
    Close,
}

pub struct DealerStatusView {
    application: DealerApplication,
}

impl DealerStatusView {
    pub fn new(application: DealerApplication) -> Self {
        Self { application }
    }

    pub fn status(&self) -> ApplicationStatus {
        self.application.status
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DealerStatusAction {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => DealerStatusAction::Close,
            _ => DealerStatusAction::None,
        }
    }

    fn status_style(&self) -> Style {
        match self.application.status {
            ApplicationStatus::Pending => Style::default().fg(Color::Yellow),
            ApplicationStatus::Approved => Style::default().fg(Color::Green),
            ApplicationStatus::Rejected => Style::default().fg(Color::Red),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Dealer Application ")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let app = &self.application;
        let mut lines = vec![
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(
                    app.status.label(),
                    self.status_style().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(format!("Business:  {}", app.business_name)),
            Line::from(format!("Type:      {}", app.business_type.label())),
            Line::from(format!("Address:   {}", app.business_address)),
            Line::from(format!(
                "Submitted: {}",
                app.created_at.format("%Y-%m-%d")
            )),
        ];
        if let Some(note) = &app.review_note {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Reviewer note: {note}"),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Esc] Back",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn application(status: &str) -> DealerApplication {
        serde_json::from_value(serde_json::json!({
            "dealerapp_id": 4,
            "business_name": "Coastal Motors",
            "business_type": "vehicle",
            "business_address": "1 Harbour Rd",
            "appli_status": status,
            "createdat": "2025-06-01T09:00:00Z",
            "review_note": if status == "rejected" { Some("Missing license") } else { None }
        }))
        .unwrap()
    }

    #[test]
    fn escape_and_enter_both_close() {
        let mut view = DealerStatusView::new(application("pending"));
        assert_eq!(view.handle_key(key(KeyCode::Esc)), DealerStatusAction::Close);
        assert_eq!(view.handle_key(key(KeyCode::Enter)), DealerStatusAction::Close);
        assert_eq!(
            view.handle_key(key(KeyCode::Char('x'))),
            DealerStatusAction::None
        );
    }

    #[test]
    fn exposes_the_application_status() {
        let view = DealerStatusView::new(application("approved"));
        assert_eq!(view.status(), ApplicationStatus::Approved);
        let view = DealerStatusView::new(application("rejected"));
        assert_eq!(view.status(), ApplicationStatus::Rejected);
    }
}
