/// Feedback panels the backend can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    GitDirty,
    Refinement,
    StoryResult,
}

/// Answers offered when the repository has uncommitted changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitChoice {
    CommitChanges,
    DiscardChanges,
    WaitForClean,
}

impl GitChoice {
    /// Label sent verbatim to the backend.
    pub fn label(self) -> &'static str {
        match self {
            GitChoice::CommitChanges => "Commit Changes",
            GitChoice::DiscardChanges => "Discard Changes",
            GitChoice::WaitForClean => "Wait for Clean Repository",
        }
    }
}

/// How a finished story turned out, as reported by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryOutcome {
    Success,
    ManualChanges,
    Failed,
}

impl StoryOutcome {
    pub fn tag(self) -> &'static str {
        match self {
            StoryOutcome::Success => "implemented_successfully",
            StoryOutcome::ManualChanges => "implemented_manual_changes",
            StoryOutcome::Failed => "implementation_failed",
        }
    }
}
