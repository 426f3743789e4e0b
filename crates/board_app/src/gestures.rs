//! User gestures arrive as one JSON object per line, tagged by `gesture`:
//!
//! ```text
//! {"gesture":"drag_start","element_id":"story1"}
//! {"gesture":"drag_enter","zone":"trash"}
//! {"gesture":"drop","zone":"trash"}
//! {"gesture":"new_story_input","text":"Add retry logic"}
//! {"gesture":"enter"}
//! ```

use board_core::{DropZone, GitChoice, Msg, StoryOutcome, StorySeed};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Zone {
    Run,
    Trash,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum GitAnswer {
    Commit,
    Discard,
    Wait,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ResultAnswer {
    Success,
    Manual,
    Failed,
}

#[derive(Debug, Clone, Deserialize)]
struct SeedStory {
    text: String,
    #[serde(default)]
    jira_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
enum Gesture {
    LoadBacklog { stories: Vec<SeedStory> },
    DragEnter { zone: Zone },
    DragLeave { zone: Zone },
    Drop { zone: Zone },
    DragStart { element_id: String },
    DragEnd { element_id: String },
    NewStoryInput { text: String },
    Enter,
    JiraImport,
    GitChoice { choice: GitAnswer },
    FeedbackInput { text: String },
    SubmitFeedback,
    StoryResult { outcome: ResultAnswer },
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Msg>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let gesture: Gesture = serde_json::from_str(line)?;
    Ok(Some(to_msg(gesture)))
}

fn to_msg(gesture: Gesture) -> Msg {
    match gesture {
        Gesture::LoadBacklog { stories } => Msg::BacklogLoaded(
            stories
                .into_iter()
                .map(|story| StorySeed {
                    text: story.text,
                    jira_id: story.jira_id,
                })
                .collect(),
        ),
        Gesture::DragEnter { zone } => Msg::DragEntered(map_zone(zone)),
        Gesture::DragLeave { zone } => Msg::DragLeft(map_zone(zone)),
        Gesture::Drop { zone } => Msg::Dropped(map_zone(zone)),
        Gesture::DragStart { element_id } => Msg::DragStarted { element_id },
        Gesture::DragEnd { element_id } => Msg::DragEnded { element_id },
        Gesture::NewStoryInput { text } => Msg::NewStoryInputChanged(text),
        Gesture::Enter => Msg::NewStoryEntered,
        Gesture::JiraImport => Msg::JiraImportClicked,
        Gesture::GitChoice { choice } => Msg::GitChoiceClicked(match choice {
            GitAnswer::Commit => GitChoice::CommitChanges,
            GitAnswer::Discard => GitChoice::DiscardChanges,
            GitAnswer::Wait => GitChoice::WaitForClean,
        }),
        Gesture::FeedbackInput { text } => Msg::FeedbackInputChanged(text),
        Gesture::SubmitFeedback => Msg::FeedbackSubmitted,
        Gesture::StoryResult { outcome } => Msg::StoryResultClicked(match outcome {
            ResultAnswer::Success => StoryOutcome::Success,
            ResultAnswer::Manual => StoryOutcome::ManualChanges,
            ResultAnswer::Failed => StoryOutcome::Failed,
        }),
    }
}

fn map_zone(zone: Zone) -> DropZone {
    match zone {
        Zone::Run => DropZone::Run,
        Zone::Trash => DropZone::Trash,
    }
}
