use crate::view_model::{BoardViewModel, StoryView};
use crate::{DropZone, Panel};

pub const DEFAULT_USER_ID: &str = "Developer";

/// Who is using the board and for which project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSession {
    pub user_id: String,
    pub project_name: String,
}

impl BoardSession {
    pub fn new(user_id: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            project_name: project_name.into(),
        }
    }
}

impl Default for BoardSession {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID, "")
    }
}

/// Which optional elements the board document contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub output_log: bool,
    pub trash: bool,
    pub git_panel: bool,
    pub refinement_panel: bool,
    pub result_panel: bool,
}

impl Layout {
    pub fn has_panel(&self, panel: Panel) -> bool {
        match panel {
            Panel::GitDirty => self.git_panel,
            Panel::Refinement => self.refinement_panel,
            Panel::StoryResult => self.result_panel,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            output_log: true,
            trash: true,
            git_panel: true,
            refinement_panel: true,
            result_panel: true,
        }
    }
}

/// A stored story used to seed the backlog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorySeed {
    pub text: String,
    pub jira_id: String,
}

/// Data attached to a drag gesture, read back by the drop handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub text: String,
    pub jira_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoryItem {
    element_id: String,
    text: String,
    /// Empty when the story did not come from the tracker.
    jira_id: String,
    lifted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PanelVisibility {
    git: bool,
    refinement: bool,
    result: bool,
}

impl PanelVisibility {
    fn get(&self, panel: Panel) -> bool {
        match panel {
            Panel::GitDirty => self.git,
            Panel::Refinement => self.refinement,
            Panel::StoryResult => self.result,
        }
    }

    fn slot(&mut self, panel: Panel) -> &mut bool {
        match panel {
            Panel::GitDirty => &mut self.git,
            Panel::Refinement => &mut self.refinement,
            Panel::StoryResult => &mut self.result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    session: BoardSession,
    layout: Layout,
    backlog: Vec<StoryItem>,
    /// Only ever incremented; mints element ids.
    story_count: u64,
    drop_allowed: bool,
    transfer: Option<DragPayload>,
    run_zone_highlighted: bool,
    trash_highlighted: bool,
    running_shows_output: bool,
    output_log: Vec<String>,
    new_story_input: String,
    feedback_input: String,
    panels: PanelVisibility,
    dirty: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(BoardSession::default())
    }
}

impl BoardState {
    pub fn new(session: BoardSession) -> Self {
        Self::with_layout(session, Layout::default())
    }

    pub fn with_layout(session: BoardSession, layout: Layout) -> Self {
        Self {
            session,
            layout,
            backlog: Vec::new(),
            story_count: 0,
            drop_allowed: true,
            transfer: None,
            run_zone_highlighted: false,
            trash_highlighted: false,
            running_shows_output: false,
            output_log: Vec::new(),
            new_story_input: String::new(),
            feedback_input: String::new(),
            panels: PanelVisibility::default(),
            dirty: false,
        }
    }

    pub fn view(&self) -> BoardViewModel {
        BoardViewModel {
            user_id: self.session.user_id.clone(),
            project_name: self.session.project_name.clone(),
            backlog: self
                .backlog
                .iter()
                .map(|story| StoryView {
                    element_id: story.element_id.clone(),
                    text: story.text.clone(),
                    jira_id: story.jira_id.clone(),
                    draggable: true,
                    lifted: story.lifted,
                })
                .collect(),
            story_count: self.story_count,
            drop_allowed: self.drop_allowed,
            run_zone_highlighted: self.run_zone_highlighted,
            trash_present: self.layout.trash,
            trash_highlighted: self.trash_highlighted,
            running_shows_output: self.running_shows_output,
            output_log: self.output_log.clone(),
            new_story_input: self.new_story_input.clone(),
            feedback_input: self.feedback_input.clone(),
            git_panel_visible: self.panels.git,
            refinement_panel_visible: self.panels.refinement,
            result_panel_visible: self.panels.result,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn drop_allowed(&self) -> bool {
        self.drop_allowed
    }

    pub fn transfer(&self) -> Option<&DragPayload> {
        self.transfer.as_ref()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn seed_backlog(&mut self, seeds: Vec<StorySeed>) {
        for seed in seeds {
            self.push_story(seed.text, seed.jira_id);
        }
    }

    /// Mints the next element id and appends the story. Returns the new element id.
    pub(crate) fn push_story(&mut self, text: String, jira_id: String) -> String {
        self.story_count += 1;
        let element_id = format!("story{}", self.story_count);
        self.backlog.push(StoryItem {
            element_id: element_id.clone(),
            text,
            jira_id,
            lifted: false,
        });
        self.mark_dirty();
        element_id
    }

    /// Removes every story whose trimmed text equals `text` trimmed. Returns how many went.
    pub(crate) fn remove_stories_matching(&mut self, text: &str) -> usize {
        let needle = text.trim();
        let before = self.backlog.len();
        self.backlog.retain(|story| story.text.trim() != needle);
        let removed = before - self.backlog.len();
        if removed > 0 {
            self.mark_dirty();
        }
        removed
    }

    /// Lifts the story and records the transfer payload. `false` when no such story exists.
    pub(crate) fn begin_drag(&mut self, element_id: &str) -> bool {
        let Some(story) = self
            .backlog
            .iter_mut()
            .find(|story| story.element_id == element_id)
        else {
            return false;
        };
        story.lifted = true;
        self.transfer = Some(DragPayload {
            text: story.text.clone(),
            jira_id: story.jira_id.clone(),
        });
        self.mark_dirty();
        true
    }

    pub(crate) fn end_drag(&mut self, element_id: &str) {
        if let Some(story) = self
            .backlog
            .iter_mut()
            .find(|story| story.element_id == element_id)
        {
            if story.lifted {
                story.lifted = false;
                self.mark_dirty();
            }
        }
        self.transfer = None;
    }

    pub(crate) fn set_highlight(&mut self, zone: DropZone, on: bool) {
        let slot = match zone {
            DropZone::Run => &mut self.run_zone_highlighted,
            DropZone::Trash => &mut self.trash_highlighted,
        };
        if *slot != on {
            *slot = on;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_drop_allowed(&mut self, allowed: bool) {
        if self.drop_allowed != allowed {
            self.drop_allowed = allowed;
            self.mark_dirty();
        }
    }

    /// Clears the running pane down to the output log.
    pub(crate) fn show_output_in_running(&mut self) {
        self.running_shows_output = true;
        self.mark_dirty();
    }

    pub(crate) fn append_output(&mut self, fragment: String) {
        self.output_log.push(fragment);
        self.mark_dirty();
    }

    pub(crate) fn new_story_input(&self) -> &str {
        &self.new_story_input
    }

    pub(crate) fn set_new_story_input(&mut self, text: String) {
        if self.new_story_input != text {
            self.new_story_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn feedback_input(&self) -> &str {
        &self.feedback_input
    }

    pub(crate) fn set_feedback_input(&mut self, text: String) {
        if self.feedback_input != text {
            self.feedback_input = text;
            self.mark_dirty();
        }
    }

    pub fn is_panel_visible(&self, panel: Panel) -> bool {
        self.panels.get(panel)
    }

    pub(crate) fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        let slot = self.panels.slot(panel);
        if *slot != visible {
            *slot = visible;
            self.mark_dirty();
        }
    }
}
