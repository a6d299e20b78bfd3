use courier_core::{JobId, JobRegistry};

#[test]
fn second_admission_for_active_id_is_refused() {
    let mut registry = JobRegistry::new();
    let id = JobId::from("789");

    assert!(registry.try_admit(&id));
    assert!(!registry.try_admit(&id));
    assert!(registry.contains(&id));
    registry.release(&id);
    assert!(registry.is_empty());
}

#[test]
fn release_allows_a_fresh_admission() {
    let mut registry = JobRegistry::new();
    let id = JobId::from("123");

    assert!(registry.try_admit(&id));
    registry.release(&id);
    assert!(!registry.contains(&id));
    assert!(registry.try_admit(&id));
}

#[test]
fn release_is_idempotent() {
    let mut registry = JobRegistry::new();
    let id = JobId::from("absent");

    registry.release(&id);
    registry.release(&id);
    assert!(registry.is_empty());

    assert!(registry.try_admit(&id));
    registry.release(&id);
    registry.release(&id);
    assert!(registry.is_empty());
}

#[test]
fn ids_are_tracked_independently() {
    let mut registry = JobRegistry::new();

    assert!(registry.try_admit(&JobId::from("a")));
    assert!(registry.try_admit(&JobId::from("b")));
    registry.release(&JobId::from("a"));

    assert!(!registry.contains(&JobId::from("a")));
    assert!(registry.contains(&JobId::from("b")));
}
