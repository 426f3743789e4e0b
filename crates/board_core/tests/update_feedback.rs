use std::sync::Once;

use board_core::{
    update, BoardSession, BoardState, Effect, GitChoice, Layout, Msg, OutboundEvent, StoryOutcome,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(board_logging::initialize_for_tests);
}

fn board() -> BoardState {
    BoardState::new(BoardSession::new("alice", "webshop"))
}

#[test]
fn story_done_reveals_result_panel_and_manual_choice_answers() {
    init_logging();
    let (state, effects) = update(
        board(),
        Msg::StoryDone {
            message: "Finished".to_string(),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.result_panel_visible);
    assert_eq!(view.output_log, vec!["Finished".to_string()]);

    let (state, effects) = update(state, Msg::StoryResultClicked(StoryOutcome::ManualChanges));

    assert_eq!(
        effects,
        vec![Effect::Emit(OutboundEvent::UserStoryResult {
            feedback: "implemented_manual_changes".to_string()
        })]
    );
    assert!(!state.view().result_panel_visible);
}

#[test]
fn each_result_choice_sends_its_tag() {
    init_logging();
    for (outcome, tag) in [
        (StoryOutcome::Success, "implemented_successfully"),
        (StoryOutcome::ManualChanges, "implemented_manual_changes"),
        (StoryOutcome::Failed, "implementation_failed"),
    ] {
        let (state, _) = update(
            board(),
            Msg::StoryDone {
                message: "Let me know how it worked out..".to_string(),
            },
        );
        let (_state, effects) = update(state, Msg::StoryResultClicked(outcome));
        assert_eq!(
            effects,
            vec![Effect::Emit(OutboundEvent::UserStoryResult {
                feedback: tag.to_string()
            })]
        );
    }
}

#[test]
fn result_choice_on_hidden_panel_is_ignored() {
    init_logging();
    let (_state, effects) = update(board(), Msg::StoryResultClicked(StoryOutcome::Success));
    assert!(effects.is_empty());
}

#[test]
fn git_choice_sends_label_and_hides_panel() {
    init_logging();
    let (state, _) = update(
        board(),
        Msg::GitFeedbackRequested {
            message: "Choose an action:".to_string(),
        },
    );
    assert!(state.view().git_panel_visible);

    let (state, effects) = update(state, Msg::GitChoiceClicked(GitChoice::WaitForClean));

    assert_eq!(
        effects,
        vec![Effect::Emit(OutboundEvent::GitFeedbackDirty {
            feedback: "Wait for Clean Repository".to_string()
        })]
    );
    let view = state.view();
    assert!(!view.git_panel_visible);
    assert_eq!(view.output_log, vec!["Choose an action:".to_string()]);

    // A second click has nothing left to answer.
    let (_state, effects) = update(state, Msg::GitChoiceClicked(GitChoice::CommitChanges));
    assert!(effects.is_empty());
}

#[test]
fn refinement_feedback_is_trimmed_and_sent() {
    init_logging();
    let (state, _) = update(
        board(),
        Msg::StoryFeedbackRequested {
            message: "Please respond whether you agree with this".to_string(),
        },
    );
    assert!(state.view().refinement_panel_visible);

    let (state, _) = update(state, Msg::FeedbackInputChanged("  yes \n".to_string()));
    let (state, effects) = update(state, Msg::FeedbackSubmitted);

    assert_eq!(
        effects,
        vec![Effect::Emit(OutboundEvent::UserStoryFeedback {
            user_id: "alice".to_string(),
            feedback: "yes".to_string(),
        })]
    );
    let view = state.view();
    assert!(!view.refinement_panel_visible);
    assert_eq!(view.feedback_input, "");
}

#[test]
fn empty_refinement_feedback_warns_and_keeps_panel_open() {
    init_logging();
    let (state, _) = update(
        board(),
        Msg::StoryFeedbackRequested {
            message: "Agree?".to_string(),
        },
    );
    let (state, _) = update(state, Msg::FeedbackInputChanged("   ".to_string()));
    let (state, effects) = update(state, Msg::FeedbackSubmitted);

    assert_eq!(
        effects,
        vec![Effect::Alert {
            message: "Please enter some feedback.".to_string()
        }]
    );
    assert!(state.view().refinement_panel_visible);
}

#[test]
fn prompts_need_their_panel_in_the_document() {
    init_logging();
    let layout = Layout {
        result_panel: false,
        ..Layout::default()
    };
    let state = BoardState::with_layout(BoardSession::default(), layout);
    let (mut state, effects) = update(
        state,
        Msg::StoryDone {
            message: "Finished".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.result_panel_visible);
    assert!(view.output_log.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn prompts_need_the_output_log_in_the_document() {
    init_logging();
    let layout = Layout {
        output_log: false,
        ..Layout::default()
    };
    let state = BoardState::with_layout(BoardSession::default(), layout);
    let (state, _) = update(
        state,
        Msg::GitFeedbackRequested {
            message: "Choose an action:".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::ScriptOutput {
            data: "lost".to_string(),
        },
    );

    let view = state.view();
    assert!(!view.git_panel_visible);
    assert!(view.output_log.is_empty());
}
