//! Shared chrome around a wizard step: header and navigation hints.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::StepNavigator;

/// Header (title + description) and footer (key hints) around the active
/// step's fields. The Next hint becomes Submit on the last step and is
/// dimmed while the step's validation gate fails.
pub struct StepFrame<'a> {
    title: &'a str,
    description: &'a str,
}

impl<'a> StepFrame<'a> {
    pub fn new(title: &'a str, description: &'a str) -> Self {
        Self { title, description }
    }

    pub fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.description,
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    pub fn render_hints(frame: &mut Frame, area: Rect, nav: &StepNavigator, step_valid: bool) {
        let mut spans: Vec<Span> = Vec::new();

        if !nav.is_first_step() {
            spans.push(Span::styled("[←] Back", Style::default().fg(Color::Gray)));
            spans.push(Span::raw("   "));
        }

        let forward_label = if nav.is_last_step() {
            "[Enter] Submit"
        } else {
            "[→] Next"
        };
        let forward_style = if step_valid {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(forward_label, forward_style));
        spans.push(Span::raw("   "));
        spans.push(Span::styled("[Tab] Field", Style::default().fg(Color::Gray)));
        spans.push(Span::raw("   "));
        spans.push(Span::styled("[Esc] Back/Exit", Style::default().fg(Color::Gray)));

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}
