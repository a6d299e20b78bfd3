use courier_core::{SearchDecision, SearchGate, SearchTicket};

#[test]
fn short_input_is_never_dispatched() {
    let mut gate = SearchGate::new();
    for text in ["", " ", "a", "  a  ", "\tb\n", "é"] {
        assert_eq!(gate.on_input(text), SearchDecision::TooShort, "{text:?}");
    }
}

#[test]
fn dispatch_carries_trimmed_query() {
    let mut gate = SearchGate::new();
    match gate.on_input("  show a ") {
        SearchDecision::Dispatch(SearchTicket { query, .. }) => assert_eq!(query, "show a"),
        other => panic!("expected dispatch, got {other:?}"),
    }
}

#[test]
fn multibyte_input_counts_characters_not_bytes() {
    let mut gate = SearchGate::new();
    assert!(matches!(gate.on_input("ró"), SearchDecision::Dispatch(_)));
}

#[test]
fn newer_input_makes_older_ticket_stale() {
    let mut gate = SearchGate::new();
    let first = match gate.on_input("sho") {
        SearchDecision::Dispatch(ticket) => ticket,
        other => panic!("expected dispatch, got {other:?}"),
    };
    assert!(gate.is_current(first.seq));

    let second = match gate.on_input("show") {
        SearchDecision::Dispatch(ticket) => ticket,
        other => panic!("expected dispatch, got {other:?}"),
    };
    assert!(second.seq > first.seq);
    assert!(!gate.is_current(first.seq));
    assert!(gate.is_current(second.seq));
}

#[test]
fn too_short_input_also_invalidates_outstanding_queries() {
    let mut gate = SearchGate::new();
    let ticket = match gate.on_input("show") {
        SearchDecision::Dispatch(ticket) => ticket,
        other => panic!("expected dispatch, got {other:?}"),
    };

    assert_eq!(gate.on_input("s"), SearchDecision::TooShort);
    assert!(!gate.is_current(ticket.seq));
}
