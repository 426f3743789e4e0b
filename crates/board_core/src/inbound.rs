use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::Msg;

/// Names of the events the backend sends to the board.
pub const INBOUND_EVENTS: [&str; 6] = [
    "enable_drop_object",
    "request_git_feedback_dirty",
    "request_user_story_feedback",
    "user_story_done",
    "add_jira_story",
    "script_output",
];

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown inbound event `{0}`")]
    UnknownEvent(String),
    #[error("invalid payload for `{event}`: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct MessagePayload {
    // The backend sends `data` for `user_story_done`.
    #[serde(alias = "data")]
    message: String,
}

#[derive(Deserialize)]
struct ImportedStoryPayload {
    summary: String,
    #[serde(default)]
    jira_id: Value,
}

#[derive(Deserialize)]
struct ScriptOutputPayload {
    data: String,
}

/// Maps a named channel event and its payload to a board message.
pub fn decode_inbound(name: &str, payload: Value) -> Result<Msg, DecodeError> {
    match name {
        "enable_drop_object" => Ok(Msg::DropEnabled),
        "request_git_feedback_dirty" => {
            let MessagePayload { message } = parse(name, payload)?;
            Ok(Msg::GitFeedbackRequested { message })
        }
        "request_user_story_feedback" => {
            let MessagePayload { message } = parse(name, payload)?;
            Ok(Msg::StoryFeedbackRequested { message })
        }
        "user_story_done" => {
            let MessagePayload { message } = parse(name, payload)?;
            Ok(Msg::StoryDone { message })
        }
        "add_jira_story" => {
            let ImportedStoryPayload { summary, jira_id } = parse(name, payload)?;
            Ok(Msg::JiraStoryImported {
                summary,
                jira_id: opaque_id(jira_id),
            })
        }
        "script_output" => {
            let ScriptOutputPayload { data } = parse(name, payload)?;
            Ok(Msg::ScriptOutput { data })
        }
        other => Err(DecodeError::UnknownEvent(other.to_string())),
    }
}

fn parse<T: DeserializeOwned>(event: &str, payload: Value) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|source| DecodeError::InvalidPayload {
        event: event.to_string(),
        source,
    })
}

/// Tracker ids are opaque; numbers are kept as their decimal text.
fn opaque_id(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(id) => id,
        other => other.to_string(),
    }
}
