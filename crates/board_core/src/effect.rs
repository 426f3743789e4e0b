use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one named event on the channel.
    Emit(OutboundEvent),
    /// Show a blocking warning to the user.
    Alert { message: String },
}

/// Events sent from the board to the backend.
///
/// Serializes to the bare payload object; the event name comes from [`OutboundEvent::name`].
/// Field names follow the backend's wire keys, mixed casing included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundEvent {
    JiraImport {
        project_name: String,
    },
    RunStory {
        user_id: String,
        project_name: String,
        jira_id: String,
        user_story: String,
    },
    DeleteUserStory {
        user_story: String,
        #[serde(rename = "projectName")]
        project_name: String,
    },
    AddUserStory {
        story: String,
        #[serde(rename = "projectName")]
        project_name: String,
        #[serde(rename = "jiraID")]
        jira_id: String,
    },
    GitFeedbackDirty {
        feedback: String,
    },
    UserStoryFeedback {
        user_id: String,
        feedback: String,
    },
    UserStoryResult {
        feedback: String,
    },
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::JiraImport { .. } => "jira_import",
            OutboundEvent::RunStory { .. } => "run_story",
            OutboundEvent::DeleteUserStory { .. } => "delete_user_story",
            OutboundEvent::AddUserStory { .. } => "add_user_story",
            OutboundEvent::GitFeedbackDirty { .. } => "git_feedback_dirty",
            OutboundEvent::UserStoryFeedback { .. } => "user_story_feedback",
            OutboundEvent::UserStoryResult { .. } => "user_story_result",
        }
    }

    pub fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
