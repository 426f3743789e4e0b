use crate::{GitChoice, StoryOutcome, StorySeed};

/// Drop targets on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    /// The backlog/running container; dropping here runs the story.
    Run,
    /// The trash button; dropping here deletes the story.
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Stories already stored for the project, rendered before any gesture.
    BacklogLoaded(Vec<StorySeed>),
    /// A drag entered a drop zone.
    DragEntered(DropZone),
    /// A drag left a drop zone.
    DragLeft(DropZone),
    /// The dragged story was released over a drop zone.
    Dropped(DropZone),
    /// User started dragging a backlog story.
    DragStarted { element_id: String },
    /// The drag gesture on a story ended (after any drop).
    DragEnded { element_id: String },
    /// User edited the new-story input box.
    NewStoryInputChanged(String),
    /// User pressed Enter in the new-story input box.
    NewStoryEntered,
    /// User clicked the Jira import button.
    JiraImportClicked,
    /// User picked an action on the dirty-repository panel.
    GitChoiceClicked(GitChoice),
    /// User edited the refinement feedback text box.
    FeedbackInputChanged(String),
    /// User clicked the refinement feedback submit button.
    FeedbackSubmitted,
    /// User picked an outcome on the story-result panel.
    StoryResultClicked(StoryOutcome),
    /// Backend re-opened the run drop zone.
    DropEnabled,
    /// Backend found uncommitted changes and asks what to do.
    GitFeedbackRequested { message: String },
    /// Backend asks for feedback on the refined story.
    StoryFeedbackRequested { message: String },
    /// Backend finished the story and asks for the result.
    StoryDone { message: String },
    /// Backend imported a story from the external tracker.
    JiraStoryImported { summary: String, jira_id: String },
    /// Backend script produced output.
    ScriptOutput { data: String },
}
