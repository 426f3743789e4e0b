#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardViewModel {
    pub user_id: String,
    pub project_name: String,
    pub backlog: Vec<StoryView>,
    pub story_count: u64,
    pub drop_allowed: bool,
    pub run_zone_highlighted: bool,
    pub trash_present: bool,
    pub trash_highlighted: bool,
    /// The running pane has been cleared down to the output log.
    pub running_shows_output: bool,
    /// HTML fragments, oldest first.
    pub output_log: Vec<String>,
    pub new_story_input: String,
    pub feedback_input: String,
    pub git_panel_visible: bool,
    pub refinement_panel_visible: bool,
    pub result_panel_visible: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryView {
    pub element_id: String,
    pub text: String,
    pub jira_id: String,
    pub draggable: bool,
    pub lifted: bool,
}

impl BoardViewModel {
    pub fn story(&self, element_id: &str) -> Option<&StoryView> {
        self.backlog
            .iter()
            .find(|story| story.element_id == element_id)
    }
}
