use arena_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn removing_without_document_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::DocumentRemoved);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
