//! Listing creation wizard: basics, description, images.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::debug;

use super::FormResult;
use crate::api::listings::CreateListingRequest;
use crate::types::Category;
use crate::ui::form_field::FormField;
use crate::ui::wizard::{StepFrame, StepIndicator, StepLabel, StepNavigator};
use crate::validation;

const STEPS: &[StepLabel] = &[
    StepLabel { number: 1, label: "Basic Info" },
    StepLabel { number: 2, label: "Description" },
    StepLabel { number: 3, label: "Images" },
];

const MAX_IMAGES: usize = 10;

const F_TITLE: usize = 0;
const F_CATEGORY: usize = 1;
const F_PRICE: usize = 2;
const F_LOCATION: usize = 3;
const F_DESCRIPTION: usize = 4;
const F_IMAGES: usize = 5;

pub struct ListingForm {
    nav: StepNavigator,
    fields: Vec<FormField>,
    categories: Vec<Category>,
    focus: usize,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingForm {
    pub fn new() -> Self {
        let nav = StepNavigator::new(STEPS.len())
            .on_step_change(|step| debug!(step, "listing form step change"));
        let fields = vec![
            FormField::text("Title", true, "what are you selling?"),
            FormField::select("Category", vec!["(loading...)".to_string()]),
            FormField::text("Price", true, "e.g. 12500.00"),
            FormField::text("Location", true, "city or area"),
            FormField::text_area("Description", true),
            FormField::text_area("Image URLs (one per line, up to 10)", false),
        ];
        Self {
            nav,
            fields,
            categories: Vec::new(),
            focus: 0,
        }
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.nav
    }

    /// Categories arrive async from the backend after the form opens.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        let labels = categories.iter().map(|c| c.cat_name.clone()).collect();
        self.fields[F_CATEGORY].set_options(labels);
        self.categories = categories;
    }

    fn step_fields(step: usize) -> &'static [usize] {
        match step {
            1 => &[F_TITLE, F_CATEGORY, F_PRICE, F_LOCATION],
            2 => &[F_DESCRIPTION],
            3 => &[F_IMAGES],
            _ => &[],
        }
    }

    fn value(&self, idx: usize) -> String {
        self.fields[idx].value()
    }

    pub fn set_field(&mut self, idx: usize, value: &str) {
        self.fields[idx].set_value(value);
    }

    fn image_urls(&self) -> Vec<String> {
        self.value(F_IMAGES)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Per-step gate: basics need a title, a loaded category, a positive
    /// price and a location; description must be non-empty; images are
    /// optional but capped.
    pub fn step_valid(&self, step: usize) -> bool {
        match step {
            1 => {
                validation::required(&self.value(F_TITLE))
                    && !self.categories.is_empty()
                    && validation::positive_price(&self.value(F_PRICE))
                    && validation::required(&self.value(F_LOCATION))
            }
            2 => validation::required(&self.value(F_DESCRIPTION)),
            3 => self.image_urls().len() <= MAX_IMAGES,
            _ => false,
        }
    }

    pub fn request(&self) -> CreateListingRequest {
        let category_id = self.fields[F_CATEGORY]
            .selected_index()
            .and_then(|idx| self.categories.get(idx))
            .map_or(0, |c| c.cat_id);
        CreateListingRequest {
            listing_title: self.value(F_TITLE).trim().to_string(),
            list_description: self.value(F_DESCRIPTION).trim().to_string(),
            listing_price: self.value(F_PRICE).trim().to_string(),
            list_location: self.value(F_LOCATION).trim().to_string(),
            category_id,
            image_urls: self.image_urls(),
        }
    }

    pub fn reset(&mut self) {
        self.nav.reset();
        self.focus = 0;
        for field in &mut self.fields {
            field.set_value("");
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormResult {
        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(c) = key.code {
                if let Some(step) = c.to_digit(10) {
                    let step = step as usize;
                    if self.nav.is_step_visited(step) {
                        self.nav.go_to_step(step);
                        self.focus = 0;
                    }
                    return FormResult::Continue;
                }
            }
        }

        match key.code {
            KeyCode::Esc => {
                if self.nav.is_first_step() {
                    return FormResult::Exit;
                }
                self.nav.previous_step();
                self.focus = 0;
                FormResult::Continue
            }
            KeyCode::Tab => {
                let count = Self::step_fields(self.nav.current_step()).len();
                self.focus = (self.focus + 1) % count.max(1);
                FormResult::Continue
            }
            KeyCode::BackTab => {
                let count = Self::step_fields(self.nav.current_step()).len().max(1);
                self.focus = (self.focus + count - 1) % count;
                FormResult::Continue
            }
            KeyCode::Enter => {
                // Description and images are multi-line; Enter inserts a
                // newline there, so advancing uses Ctrl+Enter on those steps.
                let step = self.nav.current_step();
                let multiline_step = step != 1;
                if multiline_step && !key.modifiers.contains(KeyModifiers::CONTROL) {
                    if let Some(&field_idx) = Self::step_fields(step).get(self.focus) {
                        let newline =
                            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
                        // TextArea consumes Enter when fed directly.
                        if let crate::ui::form_field::FieldInput::TextArea { textarea } =
                            &mut self.fields[field_idx].input
                        {
                            textarea.input(newline);
                        }
                    }
                    return FormResult::Continue;
                }
                if !self.step_valid(step) {
                    return FormResult::Continue;
                }
                if self.nav.is_last_step() {
                    return FormResult::Submit;
                }
                self.nav.next_step();
                self.focus = 0;
                FormResult::Continue
            }
            _ => {
                if let Some(&field_idx) =
                    Self::step_fields(self.nav.current_step()).get(self.focus)
                {
                    self.fields[field_idx].handle_key(key);
                }
                FormResult::Continue
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let step = self.nav.current_step();
        let field_indices = Self::step_fields(step);

        let mut constraints = vec![Constraint::Length(4), Constraint::Length(3)];
        if step == 1 {
            constraints.extend(field_indices.iter().map(|_| Constraint::Length(3)));
            constraints.push(Constraint::Min(0));
        } else {
            // Single multi-line field gets the remaining height
            constraints.push(Constraint::Min(5));
        }
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(area);

        StepIndicator::new(STEPS).render(frame, chunks[0], &self.nav);

        let (title, description) = match step {
            1 => ("Basic Info", "Title, category, price and location"),
            2 => ("Description", "Tell buyers about the item (Ctrl+Enter to continue)"),
            _ => ("Images", "Optional image URLs, one per line (Ctrl+Enter to submit)"),
        };
        StepFrame::new(title, description).render_header(frame, chunks[1]);

        for (slot, &field_idx) in field_indices.iter().enumerate() {
            self.fields[field_idx].render(frame, chunks[2 + slot], slot == self.focus);
        }

        let valid = self.step_valid(step);
        StepFrame::render_hints(frame, chunks[chunks.len() - 1], &self.nav, valid);
    }
}
