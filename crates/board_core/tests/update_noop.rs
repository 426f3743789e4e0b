use board_core::{update, BoardState, DropZone, Msg};

#[test]
fn leaving_an_unhighlighted_zone_is_noop() {
    let state = BoardState::default();
    let (mut next, effects) = update(state.clone(), Msg::DragLeft(DropZone::Run));

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(state, next);
}
