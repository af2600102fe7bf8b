//! Integration tests: end-to-end gating scenarios.
//!
//! Each test drives a fresh engine through the public API only and checks
//! the emit/suppress answer after every step.

use mdtrace_kernel::{GateDecision, GatingEngine, KeyedStore, TicketState};

#[test]
fn unrelated_keys_do_not_affect_emission() {
    let mut engine = GatingEngine::new();
    engine.set_condition("name", "Jane");
    engine.set_value("name", "Jane");
    assert!(engine.should_emit());

    engine.set_value("age", "22");
    engine.set_condition("city", "Lima");
    assert!(engine.should_emit());
}

#[test]
fn equal_condition_and_value_satisfy_differing_value_denies() {
    let mut engine = GatingEngine::new();
    engine.set_condition("k", "X");
    engine.set_value("k", "X");
    assert!(engine.match_key("k"));
    assert!(engine.should_emit());

    engine.set_value("k", "Y");
    assert!(!engine.match_key("k"));
    assert!(!engine.should_emit());
}

#[test]
fn in_progress_ticket_overrides_unsatisfied_record() {
    let mut engine = GatingEngine::new();
    engine.set_condition("name", "Jane");
    engine.set_value("name", "Bob");
    assert!(!engine.should_emit());

    engine.add_ticket("t");
    engine.use_ticket("t");
    assert!(engine.should_emit());
}

#[test]
fn ticket_lifecycle_controls_override() {
    let mut engine = GatingEngine::new();
    engine.set_condition("name", "Jane");
    engine.set_value("name", "Bob");

    engine.add_ticket("t");
    assert_eq!(engine.ticket_state("t"), Some(TicketState::New));
    assert!(!engine.should_emit());

    engine.use_ticket("t");
    assert!(engine.should_emit());

    engine.finish_ticket("t");
    assert_eq!(engine.ticket_state("t"), Some(TicketState::Used));
    assert!(!engine.should_emit());
}

#[test]
fn used_ticket_needs_re_adding_before_it_overrides_again() {
    let mut engine = GatingEngine::new();
    engine.mute();
    engine.add_ticket("t");
    engine.use_ticket("t");
    engine.finish_ticket("t");

    engine.use_ticket("t");
    assert!(!engine.should_emit());

    engine.add_ticket("t");
    engine.use_ticket("t");
    assert!(engine.should_emit());
}

#[test]
fn override_holds_while_any_ticket_is_in_progress() {
    let mut engine = GatingEngine::new();
    engine.mute();
    engine.use_ticket("a");
    engine.use_ticket("b");

    engine.finish_ticket("a");
    assert!(engine.should_emit());

    engine.finish_ticket("b");
    assert!(!engine.should_emit());
}

#[test]
fn mute_suppresses_satisfied_record_and_unmute_restores() {
    let mut engine = GatingEngine::new();
    engine.set_condition("name", "Jane");
    engine.set_value("name", "Jane");
    assert!(engine.should_emit());

    engine.mute();
    assert!(!engine.should_emit());
    assert_eq!(engine.decide(), GateDecision::Muted);

    engine.unmute();
    assert!(engine.should_emit());
}

#[test]
fn clear_all_twice_leaves_store_empty() {
    let mut store = KeyedStore::new();
    store.set_many([("a", "1"), ("b", "2")]);

    store.clear_all();
    assert!(store.get_all().is_empty());

    store.clear_all();
    assert!(store.get_all().is_empty());
}

#[test]
fn scoped_condition_walkthrough() {
    let mut engine = GatingEngine::new();
    assert!(engine.should_emit());

    engine.set_condition("name", "Jane");
    engine.set_value("name", "John");
    assert!(!engine.should_emit());

    engine.set_value("name", "Jane");
    assert!(engine.should_emit());

    engine.clear_values();
    assert!(engine.should_emit());
}

#[test]
fn ticket_beats_mute_walkthrough() {
    let mut engine = GatingEngine::new();
    engine.mute();
    assert!(!engine.should_emit());

    engine.add_ticket("x");
    engine.use_ticket("x");
    assert!(engine.should_emit());

    engine.finish_ticket("x");
    assert!(!engine.should_emit());
}

#[test]
fn loop_narrates_only_the_matching_item() {
    let mut engine = GatingEngine::new();
    engine.set_condition("name", "Jane");

    let emitted: Vec<&str> = ["John", "Jane", "Jack"]
        .into_iter()
        .filter(|name| {
            engine.set_value("name", *name);
            engine.should_emit()
        })
        .collect();

    assert_eq!(emitted, vec!["Jane"]);
}

#[test]
fn empty_strings_on_either_side_never_restrict() {
    let mut engine = GatingEngine::new();
    engine.set_conditions([("name", ""), ("step", "2")]);
    engine.set_values([("name", "Bob"), ("step", "")]);
    assert!(engine.values_match());
    assert!(engine.should_emit());

    engine.set_value("step", "3");
    assert!(!engine.should_emit());
}
