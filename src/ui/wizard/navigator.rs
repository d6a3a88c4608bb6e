//! Step-progression state for multi-step forms.
//!
//! Owns the current step index plus the completed/visited sets and enforces
//! the step-count boundary. Validation is not its concern: the hosting form
//! runs its per-step gate before calling [`StepNavigator::next_step`].

use std::collections::BTreeSet;

/// Observer invoked synchronously after every accepted transition.
type StepObserver = Box<dyn FnMut(usize) + Send>;

/// State machine over step indices `1..=total_steps`.
///
/// All invalid requests degrade to silent no-ops: the navigator never
/// panics and never leaves the `[1, total_steps]` range. Completed and
/// visited sets only grow, except through [`StepNavigator::reset`].
pub struct StepNavigator {
    total_steps: usize,
    initial_step: usize,
    current_step: usize,
    completed_steps: BTreeSet<usize>,
    visited_steps: BTreeSet<usize>,
    on_step_change: Option<StepObserver>,
}

impl StepNavigator {
    /// Create a navigator for `total_steps` steps, starting at step 1.
    ///
    /// `total_steps` of zero is clamped to 1 so the index range stays valid.
    pub fn new(total_steps: usize) -> Self {
        Self::with_initial_step(total_steps, 1)
    }

    /// Create a navigator starting at `initial_step`.
    ///
    /// An out-of-range `initial_step` is clamped into `[1, total_steps]`.
    pub fn with_initial_step(total_steps: usize, initial_step: usize) -> Self {
        let total_steps = total_steps.max(1);
        let initial_step = initial_step.clamp(1, total_steps);
        Self {
            total_steps,
            initial_step,
            current_step: initial_step,
            completed_steps: BTreeSet::new(),
            visited_steps: BTreeSet::from([initial_step]),
            on_step_change: None,
        }
    }

    /// Attach an observer called with the new step after each accepted
    /// transition (host uses this for screen-change logging).
    pub fn on_step_change(mut self, observer: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_step_change = Some(Box::new(observer));
        self
    }

    /// Jump to an arbitrary step.
    ///
    /// Out-of-range targets are rejected silently: no state change, no
    /// observer call. Callers with jump affordances (step shortcuts) are
    /// expected to restrict targets to visited steps.
    pub fn go_to_step(&mut self, step: usize) {
        if step < 1 || step > self.total_steps {
            return;
        }
        self.current_step = step;
        self.visited_steps.insert(step);
        if let Some(observer) = self.on_step_change.as_mut() {
            observer(step);
        }
    }

    /// Advance one step, marking the step being left as completed.
    ///
    /// No-op at the terminal step; submission is the host's business.
    pub fn next_step(&mut self) {
        if self.current_step < self.total_steps {
            self.completed_steps.insert(self.current_step);
            self.go_to_step(self.current_step + 1);
        }
    }

    /// Go back one step. Leaves both sets untouched so a cleared step is
    /// not re-validated when the user moves forward again.
    pub fn previous_step(&mut self) {
        if self.current_step > 1 {
            self.go_to_step(self.current_step - 1);
        }
    }

    /// Restore the construction-time state: back to the initial step,
    /// completed cleared, visited reduced to the initial step.
    pub fn reset(&mut self) {
        self.current_step = self.initial_step;
        self.completed_steps.clear();
        self.visited_steps.clear();
        self.visited_steps.insert(self.initial_step);
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.total_steps
    }

    pub fn is_step_completed(&self, step: usize) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn is_step_visited(&self, step: usize) -> bool {
        self.visited_steps.contains(&step)
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed_steps
    }

    pub fn visited_steps(&self) -> &BTreeSet<usize> {
        &self.visited_steps
    }

    /// Share of completed steps as a display percentage.
    pub fn progress(&self) -> f64 {
        self.completed_steps.len() as f64 / self.total_steps as f64 * 100.0
    }
}

impl std::fmt::Debug for StepNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepNavigator")
            .field("current_step", &self.current_step)
            .field("total_steps", &self.total_steps)
            .field("completed_steps", &self.completed_steps)
            .field("visited_steps", &self.visited_steps)
            .finish_non_exhaustive()
    }
}
