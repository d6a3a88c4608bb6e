//! Reusable input widgets for wizard forms.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

/// One labelled input inside a form step.
pub struct FormField {
    pub label: &'static str,
    pub required: bool,
    pub input: FieldInput,
}

/// The input widget behind a field.
pub enum FieldInput {
    /// Single-line text input.
    Text {
        value: String,
        cursor: usize,
        placeholder: &'static str,
    },
    /// Multi-line text input.
    TextArea { textarea: Box<TextArea<'static>> },
    /// Selection between fixed options, cycled with Space/arrows.
    Select {
        options: Vec<String>,
        selected: usize,
    },
}

impl FormField {
    pub fn text(label: &'static str, required: bool, placeholder: &'static str) -> Self {
        Self {
            label,
            required,
            input: FieldInput::Text {
                value: String::new(),
                cursor: 0,
                placeholder,
            },
        }
    }

    pub fn text_area(label: &'static str, required: bool) -> Self {
        Self {
            label,
            required,
            input: FieldInput::TextArea {
                textarea: Box::new(TextArea::default()),
            },
        }
    }

    pub fn select(label: &'static str, options: Vec<String>) -> Self {
        Self {
            label,
            required: true,
            input: FieldInput::Select {
                options,
                selected: 0,
            },
        }
    }

    /// Replace select options, keeping the selection in range.
    pub fn set_options(&mut self, new_options: Vec<String>) {
        if let FieldInput::Select { options, selected } = &mut self.input {
            *options = new_options;
            *selected = (*selected).min(options.len().saturating_sub(1));
        }
    }

    /// Current value as a string (selected option label for selects,
    /// joined lines for text areas).
    pub fn value(&self) -> String {
        match &self.input {
            FieldInput::Text { value, .. } => value.clone(),
            FieldInput::TextArea { textarea } => textarea.lines().join("\n"),
            FieldInput::Select { options, selected } => {
                options.get(*selected).cloned().unwrap_or_default()
            }
        }
    }

    /// Index of the selected option; `None` for non-selects and for
    /// selects with no options yet.
    pub fn selected_index(&self) -> Option<usize> {
        match &self.input {
            FieldInput::Select { options, selected } => options.get(*selected).map(|_| *selected),
            _ => None,
        }
    }

    pub fn set_value(&mut self, new_value: &str) {
        match &mut self.input {
            FieldInput::Text { value, cursor, .. } => {
                *value = new_value.to_string();
                *cursor = value.chars().count();
            }
            FieldInput::TextArea { textarea } => {
                textarea.select_all();
                textarea.cut();
                textarea.insert_str(new_value);
            }
            FieldInput::Select { options, selected } => {
                if let Some(idx) = options.iter().position(|o| *o == new_value) {
                    *selected = idx;
                }
            }
        }
    }

    /// Feed a key event into the field. Returns true if the key was
    /// consumed (form-level keys like Esc pass through).
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match &mut self.input {
            FieldInput::Text { value, cursor, .. } => match key.code {
                KeyCode::Char(c) => {
                    let byte_idx = char_to_byte(value, *cursor);
                    value.insert(byte_idx, c);
                    *cursor += 1;
                    true
                }
                KeyCode::Backspace => {
                    if *cursor > 0 {
                        *cursor -= 1;
                        let byte_idx = char_to_byte(value, *cursor);
                        value.remove(byte_idx);
                    }
                    true
                }
                KeyCode::Left => {
                    *cursor = cursor.saturating_sub(1);
                    true
                }
                KeyCode::Right => {
                    *cursor = (*cursor + 1).min(value.chars().count());
                    true
                }
                KeyCode::Home => {
                    *cursor = 0;
                    true
                }
                KeyCode::End => {
                    *cursor = value.chars().count();
                    true
                }
                _ => false,
            },
            FieldInput::TextArea { textarea } => match key.code {
                // Enter/Esc/Tab are navigation keys at the form level
                KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => false,
                _ => {
                    textarea.input(key);
                    true
                }
            },
            FieldInput::Select { options, selected } => match key.code {
                // Nothing to cycle while options are empty (still loading,
                // or the backend returned none).
                _ if options.is_empty() => false,
                KeyCode::Char(' ') | KeyCode::Down => {
                    *selected = (*selected + 1) % options.len();
                    true
                }
                KeyCode::Up => {
                    *selected = if *selected == 0 {
                        options.len() - 1
                    } else {
                        *selected - 1
                    };
                    true
                }
                _ => false,
            },
        }
    }

    /// Render the field with its label; `focused` drives the border style.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let marker = if self.required { " *" } else { "" };
        let title = format!(" {}{} ", self.label, marker);
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        match &mut self.input {
            FieldInput::Text {
                value,
                cursor,
                placeholder,
            } => {
                let inner = block.inner(area);
                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        *placeholder,
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    Line::from(value.as_str())
                };
                frame.render_widget(block, area);
                frame.render_widget(Paragraph::new(content), inner);
                if focused {
                    let x = inner.x + (*cursor).min(inner.width.saturating_sub(1) as usize) as u16;
                    frame.set_cursor_position((x, inner.y));
                }
            }
            FieldInput::TextArea { textarea } => {
                textarea.set_block(block);
                textarea.set_cursor_line_style(Style::default());
                frame.render_widget(&**textarea, area);
            }
            FieldInput::Select { options, selected } => {
                let inner = block.inner(area);
                frame.render_widget(block, area);
                let spans: Vec<Span> = options
                    .iter()
                    .enumerate()
                    .flat_map(|(i, option)| {
                        let style = if i == *selected {
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Gray)
                        };
                        [Span::styled(format!(" {option} "), style), Span::raw(" ")]
                    })
                    .collect();
                frame.render_widget(Paragraph::new(Line::from(spans)), inner);
            }
        }
    }
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte_idx, _)| byte_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn text_input_edits_at_cursor() {
        let mut field = FormField::text("Title", true, "");
        for c in "abd".chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Char('c')));
        assert_eq!(field.value(), "abcd");

        field.handle_key(key(KeyCode::End));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn empty_select_ignores_cycling_keys() {
        let mut field = FormField::select("Category", Vec::new());
        assert!(!field.handle_key(key(KeyCode::Char(' '))));
        assert!(!field.handle_key(key(KeyCode::Down)));
        assert!(!field.handle_key(key(KeyCode::Up)));
        assert_eq!(field.selected_index(), None);
    }

    #[test]
    fn text_input_handles_multibyte_chars() {
        let mut field = FormField::text("Location", true, "");
        for c in "Λεμεσός".chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "Λεμεσό");
    }

    #[test]
    fn select_cycles_with_space_and_wraps() {
        let mut field = FormField::select(
            "Type",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        assert_eq!(field.value(), "a");
        field.handle_key(key(KeyCode::Char(' ')));
        field.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(field.value(), "c");
        field.handle_key(key(KeyCode::Down));
        assert_eq!(field.value(), "a");
        field.handle_key(key(KeyCode::Up));
        assert_eq!(field.value(), "c");
    }

    #[test]
    fn set_value_moves_cursor_to_end() {
        let mut field = FormField::text("Phone", false, "");
        field.set_value("+35799");
        field.handle_key(key(KeyCode::Char('1')));
        assert_eq!(field.value(), "+357991");
    }

    #[test]
    fn textarea_passes_navigation_keys_through() {
        let mut field = FormField::text_area("Description", true);
        assert!(!field.handle_key(key(KeyCode::Esc)));
        assert!(!field.handle_key(key(KeyCode::Tab)));
        assert!(field.handle_key(key(KeyCode::Char('x'))));
        assert_eq!(field.value(), "x");
    }
}
