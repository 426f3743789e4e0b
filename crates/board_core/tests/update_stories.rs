use std::sync::Once;

use board_core::{update, BoardSession, BoardState, Effect, Msg, OutboundEvent, StorySeed};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(board_logging::initialize_for_tests);
}

fn enter_story(state: BoardState, input: &str) -> (BoardState, Vec<Effect>) {
    let (state, _) = update(state, Msg::NewStoryInputChanged(input.to_string()));
    update(state, Msg::NewStoryEntered)
}

fn board() -> BoardState {
    BoardState::new(BoardSession::new("alice", "webshop"))
}

#[test]
fn whitespace_input_warns_and_adds_nothing() {
    init_logging();
    let (mut state, effects) = enter_story(board(), "   \t ");

    assert_eq!(
        effects,
        vec![Effect::Alert {
            message: "Please enter a user story.".to_string()
        }]
    );
    let view = state.view();
    assert!(view.backlog.is_empty());
    assert_eq!(view.story_count, 0);
    // The input was edited, nothing else.
    assert!(state.consume_dirty());
}

#[test]
fn entered_story_gets_fresh_id_and_empty_tracker_id() {
    init_logging();
    let (state, _) = enter_story(board(), "Existing story");
    let (mut state, effects) = enter_story(state, "  Add retry logic ");

    assert_eq!(
        effects,
        vec![Effect::Emit(OutboundEvent::AddUserStory {
            story: "Add retry logic".to_string(),
            project_name: "webshop".to_string(),
            jira_id: String::new(),
        })]
    );
    let view = state.view();
    assert_eq!(view.backlog.len(), 2);
    let story = &view.backlog[1];
    assert_eq!(story.element_id, "story2");
    assert_eq!(story.text, "Add retry logic");
    assert_eq!(story.jira_id, "");
    assert!(story.draggable);
    assert_ne!(view.backlog[0].element_id, story.element_id);
    assert_eq!(view.new_story_input, "");
    assert!(state.consume_dirty());
}

#[test]
fn ids_keep_counting_after_deletions() {
    init_logging();
    let (state, _) = enter_story(board(), "one");
    let (state, _) = update(
        state,
        Msg::DragStarted {
            element_id: "story1".to_string(),
        },
    );
    let (state, _) = update(state, Msg::Dropped(board_core::DropZone::Trash));
    let (state, _) = enter_story(state, "two");

    let view = state.view();
    assert_eq!(view.backlog.len(), 1);
    assert_eq!(view.backlog[0].element_id, "story2");
}

#[test]
fn seeded_backlog_advances_the_counter() {
    init_logging();
    let (state, effects) = update(
        board(),
        Msg::BacklogLoaded(vec![
            StorySeed {
                text: "Stored one".to_string(),
                jira_id: "SHOP-1".to_string(),
            },
            StorySeed {
                text: "Stored two".to_string(),
                jira_id: String::new(),
            },
        ]),
    );
    assert!(effects.is_empty());

    let (state, _) = enter_story(state, "Typed");
    let ids: Vec<_> = state
        .view()
        .backlog
        .iter()
        .map(|s| s.element_id.clone())
        .collect();
    assert_eq!(ids, vec!["story1", "story2", "story3"]);
}

#[test]
fn imported_story_is_added_and_announced() {
    init_logging();
    let (state, effects) = update(
        board(),
        Msg::JiraStoryImported {
            summary: "Checkout times out".to_string(),
            jira_id: "SHOP-17".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Emit(OutboundEvent::AddUserStory {
            story: "Checkout times out".to_string(),
            project_name: "webshop".to_string(),
            jira_id: "SHOP-17".to_string(),
        })]
    );
    let view = state.view();
    assert_eq!(view.backlog[0].jira_id, "SHOP-17");
    assert_eq!(view.backlog[0].element_id, "story1");
}

#[test]
fn imported_tracker_id_round_trips_into_run_story() {
    init_logging();
    let (state, _) = update(
        board(),
        Msg::JiraStoryImported {
            summary: "Checkout times out".to_string(),
            jira_id: "SHOP-17".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::DragStarted {
            element_id: "story1".to_string(),
        },
    );
    let (_state, effects) = update(state, Msg::Dropped(board_core::DropZone::Run));

    assert_eq!(
        effects,
        vec![Effect::Emit(OutboundEvent::RunStory {
            user_id: "alice".to_string(),
            project_name: "webshop".to_string(),
            jira_id: "SHOP-17".to_string(),
            user_story: "Checkout times out".to_string(),
        })]
    );
}

#[test]
fn imported_story_with_blank_summary_is_ignored() {
    init_logging();
    let (state, effects) = update(
        board(),
        Msg::JiraStoryImported {
            summary: "  ".to_string(),
            jira_id: "SHOP-3".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().backlog.is_empty());
}

#[test]
fn jira_button_requests_an_import() {
    init_logging();
    let state = board();
    let before = state.view();
    let (next, effects) = update(state, Msg::JiraImportClicked);

    assert_eq!(next.view(), before);
    assert_eq!(
        effects,
        vec![Effect::Emit(OutboundEvent::JiraImport {
            project_name: "webshop".to_string()
        })]
    );
}

#[test]
fn script_output_is_formatted_and_appended() {
    init_logging();
    let (state, _) = update(
        board(),
        Msg::ScriptOutput {
            data: "Started working on provided user-story..".to_string(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::ScriptOutput {
            data: "**Plan**\n1. read".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().output_log,
        vec![
            "Started working on provided user-story..".to_string(),
            "<strong>Plan</strong><br><ol><li>read</li></ol>".to_string(),
        ]
    );
}
