//! Progress indicator for wizard forms.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::StepNavigator;

/// Display metadata for one step cell.
#[derive(Debug, Clone)]
pub struct StepLabel {
    pub number: usize,
    pub label: &'static str,
}

/// Renders one cell per step (step number, or a check glyph once the step
/// is completed), joined by connector dashes that fill as the user advances.
/// Purely derived from navigator state; holds no state of its own.
pub struct StepIndicator<'a> {
    steps: &'a [StepLabel],
}

impl<'a> StepIndicator<'a> {
    pub fn new(steps: &'a [StepLabel]) -> Self {
        Self { steps }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, nav: &StepNavigator) {
        let mut cells: Vec<Span> = Vec::new();
        let mut labels: Vec<Span> = Vec::new();

        for (i, step) in self.steps.iter().enumerate() {
            let completed = nav.is_step_completed(step.number);
            let active = nav.current_step() == step.number;

            let cell_style = if active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let glyph = if completed {
                " ✓ ".to_string()
            } else {
                format!(" {} ", step.number)
            };
            cells.push(Span::styled(glyph, cell_style));

            let label_style = if active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            labels.push(Span::styled(format!(" {} ", step.label), label_style));

            if i + 1 < self.steps.len() {
                let filled = completed || nav.current_step() > step.number;
                let connector_style = if filled {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                cells.push(Span::styled("────", connector_style));
                labels.push(Span::raw("    "));
            }
        }

        let percent = nav.progress().round() as u16;
        let lines = vec![
            Line::from(cells),
            Line::from(labels),
            Line::from(Span::styled(
                format!("{percent}% complete"),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
