//! End-to-end invariants of the step navigator under arbitrary input,
//! exercised through the public crate surface like the forms use it.

use std::sync::{Arc, Mutex};

use plaza::ui::wizard::StepNavigator;

/// Drives a navigator through a scripted mix of every operation and
/// checks the invariants after each one.
fn drive_and_check(total: usize, script: &[Op]) {
    let mut nav = StepNavigator::new(total);
    for op in script {
        match *op {
            Op::Go(step) => nav.go_to_step(step),
            Op::Next => nav.next_step(),
            Op::Prev => nav.previous_step(),
            Op::Reset => nav.reset(),
        }
        check_invariants(&nav);
    }
}

#[derive(Clone, Copy)]
enum Op {
    Go(usize),
    Next,
    Prev,
    Reset,
}

fn check_invariants(nav: &StepNavigator) {
    let current = nav.current_step();
    assert!(
        (1..=nav.total_steps()).contains(&current),
        "current step {current} out of range"
    );
    // Whatever we're on has been visited
    assert!(nav.is_step_visited(current));
    // Completed and visited sets only hold in-range steps
    for &s in nav.completed_steps() {
        assert!((1..=nav.total_steps()).contains(&s));
    }
    for &s in nav.visited_steps() {
        assert!((1..=nav.total_steps()).contains(&s));
    }
    // Progress stays within [0, 100]
    let p = nav.progress();
    assert!((0.0..=100.0).contains(&p), "progress {p} out of range");
}

#[test]
fn survives_a_hostile_input_script() {
    let script = [
        Op::Go(0),
        Op::Go(99),
        Op::Prev,
        Op::Next,
        Op::Next,
        Op::Go(5),
        Op::Prev,
        Op::Prev,
        Op::Prev,
        Op::Next,
        Op::Go(3),
        Op::Next,
        Op::Next,
        Op::Next,
        Op::Next,
        Op::Reset,
        Op::Go(4),
        Op::Next,
    ];
    drive_and_check(5, &script);
    drive_and_check(1, &script);
    drive_and_check(3, &script);
}

#[test]
fn completion_and_visits_never_shrink_except_on_reset() {
    let mut nav = StepNavigator::new(4);
    nav.next_step();
    nav.next_step();
    let completed_before = nav.completed_steps().clone();
    let visited_before = nav.visited_steps().clone();

    // Wander around; neither set loses members
    nav.previous_step();
    nav.go_to_step(1);
    nav.go_to_step(3);
    nav.previous_step();
    assert!(nav.completed_steps().is_superset(&completed_before));
    assert!(nav.visited_steps().is_superset(&visited_before));

    nav.reset();
    assert!(nav.completed_steps().is_empty());
    assert_eq!(nav.visited_steps().len(), 1);
    assert_eq!(nav.current_step(), 1);
}

#[test]
fn observer_fires_once_per_accepted_transition_only() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let mut nav = StepNavigator::new(3).on_step_change(move |step| {
        sink.lock().unwrap().push(step);
    });

    nav.go_to_step(0); // rejected
    nav.previous_step(); // no-op on step 1
    nav.next_step(); // -> 2
    nav.next_step(); // -> 3
    nav.next_step(); // no-op on terminal step
    nav.go_to_step(2); // -> 2
    nav.go_to_step(2); // same step, still an accepted jump

    assert_eq!(*seen.lock().unwrap(), vec![2, 3, 2, 2]);
}

#[test]
fn terminal_next_does_not_mark_the_last_step_completed() {
    let mut nav = StepNavigator::new(2);
    nav.next_step();
    assert!(nav.is_step_completed(1));
    nav.next_step();
    assert!(!nav.is_step_completed(2));
    assert!((nav.progress() - 50.0).abs() < f64::EPSILON);
}
