//! Dealer application wizard: three steps from business basics to legal
//! details, submitted from the terminal step.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::debug;

use super::FormResult;
use crate::api::dealers::DealerApplicationRequest;
use crate::types::BusinessType;
use crate::ui::form_field::FormField;
use crate::ui::wizard::{StepFrame, StepIndicator, StepLabel, StepNavigator};
use crate::validation;

const STEPS: &[StepLabel] = &[
    StepLabel { number: 1, label: "Business Info" },
    StepLabel { number: 2, label: "Contact Details" },
    StepLabel { number: 3, label: "Legal Info" },
];

// Field indices into `fields`
const F_NAME: usize = 0;
const F_TYPE: usize = 1;
const F_ADDRESS: usize = 2;
const F_PHONE: usize = 3;
const F_EMAIL: usize = 4;
const F_TAX_ID: usize = 5;
const F_LICENSE: usize = 6;

pub struct DealerApplicationForm {
    nav: StepNavigator,
    fields: Vec<FormField>,
    /// Focused field, as an index into the active step's field list.
    focus: usize,
}

impl Default for DealerApplicationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DealerApplicationForm {
    pub fn new() -> Self {
        let nav = StepNavigator::new(STEPS.len())
            .on_step_change(|step| debug!(step, "dealer application step change"));
        let type_labels = BusinessType::all()
            .iter()
            .map(|t| t.label().to_string())
            .collect();
        let fields = vec![
            FormField::text("Business name", true, "e.g. Coastal Motors Ltd"),
            FormField::select("Business type", type_labels),
            FormField::text("Business address", true, "street, city"),
            FormField::text("Business phone", false, "+35799123456"),
            FormField::text("Business email", false, "sales@example.com"),
            FormField::text("Tax ID", false, ""),
            FormField::text("Business license no.", false, ""),
        ];
        Self {
            nav,
            fields,
            focus: 0,
        }
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.nav
    }

    fn step_fields(step: usize) -> &'static [usize] {
        match step {
            1 => &[F_NAME, F_TYPE],
            2 => &[F_ADDRESS, F_PHONE, F_EMAIL],
            3 => &[F_TAX_ID, F_LICENSE],
            _ => &[],
        }
    }

    fn value(&self, idx: usize) -> String {
        self.fields[idx].value()
    }

    pub fn set_field(&mut self, idx: usize, value: &str) {
        self.fields[idx].set_value(value);
    }

    /// The per-step validation gate. Mirrors the product rules: step 1
    /// needs a name of 3+ chars, step 2 a non-empty address plus
    /// well-formed optional contacts, step 3 is always passable.
    pub fn step_valid(&self, step: usize) -> bool {
        match step {
            1 => validation::min_len(&self.value(F_NAME), 3),
            2 => {
                validation::required(&self.value(F_ADDRESS))
                    && validation::phone(&self.value(F_PHONE))
                    && validation::email(&self.value(F_EMAIL))
            }
            3 => true,
            _ => false,
        }
    }

    fn business_type(&self) -> BusinessType {
        let idx = self.fields[F_TYPE].selected_index().unwrap_or(0);
        BusinessType::all()[idx.min(BusinessType::all().len() - 1)]
    }

    /// Build the submit payload. Only meaningful once every gate passed.
    pub fn request(&self) -> DealerApplicationRequest {
        let optional = |idx: usize| {
            let v = self.value(idx).trim().to_string();
            (!v.is_empty()).then_some(v)
        };
        DealerApplicationRequest {
            business_name: self.value(F_NAME).trim().to_string(),
            business_type: self.business_type(),
            business_address: self.value(F_ADDRESS).trim().to_string(),
            business_phone: optional(F_PHONE),
            business_email: optional(F_EMAIL),
            tax_id: optional(F_TAX_ID),
            business_license: optional(F_LICENSE),
        }
    }

    /// Clear everything back to step 1 (after a successful submission).
    pub fn reset(&mut self) {
        self.nav.reset();
        self.focus = 0;
        for field in &mut self.fields {
            field.set_value("");
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormResult {
        // Alt+digit jumps to a visited step only; forward skips stay gated.
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
                let step = self.nav.current_step();
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

        let mut constraints = vec![
            Constraint::Length(4), // indicator
            Constraint::Length(3), // header
        ];
        constraints.extend(field_indices.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1)); // hints

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(area);

        StepIndicator::new(STEPS).render(frame, chunks[0], &self.nav);

        let (title, description) = match step {
            1 => ("Business Info", "Basic business details"),
            2 => ("Contact Details", "Address and contact"),
            _ => ("Legal Info", "Tax ID and license (optional)"),
        };
        StepFrame::new(title, description).render_header(frame, chunks[1]);

        for (slot, &field_idx) in field_indices.iter().enumerate() {
            self.fields[field_idx].render(frame, chunks[2 + slot], slot == self.focus);
        }

        let valid = self.step_valid(step);
        StepFrame::render_hints(frame, chunks[chunks.len() - 1], &self.nav, valid);
    }
}
