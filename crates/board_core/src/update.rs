use board_logging::{board_debug, board_info, board_warn};

use crate::{format_output, BoardState, DropZone, Effect, Msg, OutboundEvent, Panel};

const EMPTY_STORY_ALERT: &str = "Please enter a user story.";
const EMPTY_FEEDBACK_ALERT: &str = "Please enter some feedback.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BoardState, msg: Msg) -> (BoardState, Vec<Effect>) {
    let effects = match msg {
        Msg::BacklogLoaded(seeds) => {
            state.seed_backlog(seeds);
            Vec::new()
        }
        Msg::DragEntered(zone) => {
            highlight_zone(&mut state, zone, true);
            Vec::new()
        }
        Msg::DragLeft(zone) => {
            highlight_zone(&mut state, zone, false);
            Vec::new()
        }
        Msg::Dropped(DropZone::Run) => drop_on_run_zone(&mut state),
        Msg::Dropped(DropZone::Trash) => drop_on_trash(&mut state),
        Msg::DragStarted { element_id } => {
            if !state.begin_drag(&element_id) {
                board_warn!("Drag started on unknown story {}", element_id);
            }
            Vec::new()
        }
        Msg::DragEnded { element_id } => {
            state.end_drag(&element_id);
            Vec::new()
        }
        Msg::NewStoryInputChanged(text) => {
            state.set_new_story_input(text);
            Vec::new()
        }
        Msg::NewStoryEntered => {
            let story = state.new_story_input().trim().to_owned();
            if story.is_empty() {
                vec![Effect::Alert {
                    message: EMPTY_STORY_ALERT.to_string(),
                }]
            } else {
                let effect = add_story(&mut state, story, String::new());
                state.set_new_story_input(String::new());
                vec![effect]
            }
        }
        Msg::JiraImportClicked => vec![Effect::Emit(OutboundEvent::JiraImport {
            project_name: state.session().project_name.clone(),
        })],
        Msg::GitChoiceClicked(choice) => {
            if answer_panel(&mut state, Panel::GitDirty) {
                vec![Effect::Emit(OutboundEvent::GitFeedbackDirty {
                    feedback: choice.label().to_string(),
                })]
            } else {
                Vec::new()
            }
        }
        Msg::FeedbackInputChanged(text) => {
            state.set_feedback_input(text);
            Vec::new()
        }
        Msg::FeedbackSubmitted => submit_feedback(&mut state),
        Msg::StoryResultClicked(outcome) => {
            if answer_panel(&mut state, Panel::StoryResult) {
                vec![Effect::Emit(OutboundEvent::UserStoryResult {
                    feedback: outcome.tag().to_string(),
                })]
            } else {
                Vec::new()
            }
        }
        Msg::DropEnabled => {
            state.set_drop_allowed(true);
            Vec::new()
        }
        Msg::GitFeedbackRequested { message } => {
            reveal_panel(&mut state, Panel::GitDirty, message);
            Vec::new()
        }
        Msg::StoryFeedbackRequested { message } => {
            reveal_panel(&mut state, Panel::Refinement, message);
            Vec::new()
        }
        Msg::StoryDone { message } => {
            reveal_panel(&mut state, Panel::StoryResult, message);
            Vec::new()
        }
        Msg::JiraStoryImported { summary, jira_id } => {
            if summary.trim().is_empty() {
                board_warn!("Ignoring imported story {:?} with empty summary", jira_id);
                Vec::new()
            } else {
                vec![add_story(&mut state, summary, jira_id)]
            }
        }
        Msg::ScriptOutput { data } => {
            if state.layout().output_log {
                state.append_output(format_output(&data));
            } else {
                board_warn!("Script output dropped: no output log in the document");
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn highlight_zone(state: &mut BoardState, zone: DropZone, on: bool) {
    if zone == DropZone::Trash && !state.layout().trash {
        board_warn!("Trash button not found in the document");
        return;
    }
    state.set_highlight(zone, on);
}

fn drop_on_run_zone(state: &mut BoardState) -> Vec<Effect> {
    state.set_highlight(DropZone::Run, false);
    if !state.drop_allowed() {
        board_info!("Run drop rejected: a story is already running");
        return Vec::new();
    }
    let Some(payload) = state.transfer().cloned() else {
        board_warn!("Run drop without a dragged story");
        return Vec::new();
    };

    state.show_output_in_running();
    // Reopened by the backend once the run is over.
    state.set_drop_allowed(false);

    let session = state.session();
    vec![Effect::Emit(OutboundEvent::RunStory {
        user_id: session.user_id.clone(),
        project_name: session.project_name.clone(),
        jira_id: payload.jira_id,
        user_story: payload.text,
    })]
}

fn drop_on_trash(state: &mut BoardState) -> Vec<Effect> {
    if !state.layout().trash {
        board_warn!("Trash button not found in the document");
        return Vec::new();
    }
    state.set_highlight(DropZone::Trash, false);
    let Some(payload) = state.transfer().cloned() else {
        board_warn!("Trash drop without a dragged story");
        return Vec::new();
    };

    let removed = state.remove_stories_matching(&payload.text);
    board_debug!("Trash drop removed {} stories", removed);

    vec![Effect::Emit(OutboundEvent::DeleteUserStory {
        user_story: payload.text,
        project_name: state.session().project_name.clone(),
    })]
}

fn add_story(state: &mut BoardState, story: String, jira_id: String) -> Effect {
    let element_id = state.push_story(story.clone(), jira_id.clone());
    board_debug!("Added story {}", element_id);
    Effect::Emit(OutboundEvent::AddUserStory {
        story,
        project_name: state.session().project_name.clone(),
        jira_id,
    })
}

fn reveal_panel(state: &mut BoardState, panel: Panel, message: String) {
    let layout = state.layout();
    if !layout.output_log || !layout.has_panel(panel) {
        board_warn!("Cannot show {:?} panel: element missing from the document", panel);
        return;
    }
    state.append_output(message);
    state.set_panel_visible(panel, true);
}

/// Hides the panel if it is showing. Returns whether the answer counts.
fn answer_panel(state: &mut BoardState, panel: Panel) -> bool {
    if !state.is_panel_visible(panel) {
        board_debug!("Ignoring answer on hidden {:?} panel", panel);
        return false;
    }
    state.set_panel_visible(panel, false);
    true
}

fn submit_feedback(state: &mut BoardState) -> Vec<Effect> {
    if !state.is_panel_visible(Panel::Refinement) {
        board_debug!("Ignoring feedback submit on hidden panel");
        return Vec::new();
    }
    let feedback = state.feedback_input().trim().to_owned();
    if feedback.is_empty() {
        return vec![Effect::Alert {
            message: EMPTY_FEEDBACK_ALERT.to_string(),
        }];
    }
    state.set_feedback_input(String::new());
    state.set_panel_visible(Panel::Refinement, false);
    vec![Effect::Emit(OutboundEvent::UserStoryFeedback {
        user_id: state.session().user_id.clone(),
        feedback,
    })]
}
