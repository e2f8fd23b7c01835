use super::*;

#[test]
fn default_step_is_idle() {
    assert_eq!(DeleteStep::default(), DeleteStep::Idle);
}

#[test]
fn request_then_confirm_starts_deleting() {
    let step = DeleteStep::Idle.request();
    assert_eq!(step, DeleteStep::Confirming);
    assert_eq!(step.confirm(), DeleteStep::Deleting);
}

#[test]
fn confirm_without_request_does_nothing() {
    assert_eq!(DeleteStep::Idle.confirm(), DeleteStep::Idle);
}

#[test]
fn cancel_returns_to_idle_only_before_deleting() {
    assert_eq!(DeleteStep::Confirming.cancel(), DeleteStep::Idle);
    assert_eq!(DeleteStep::Deleting.cancel(), DeleteStep::Deleting);
}

#[test]
fn repeated_request_while_deleting_is_ignored() {
    assert_eq!(DeleteStep::Deleting.request(), DeleteStep::Deleting);
}
