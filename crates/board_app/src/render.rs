//! Renders the board view model as an HTML document fragment.
//!
//! Element ids and utility classes match the page the backend serves, so a
//! snapshot can be dropped into that page's stylesheet unchanged.

use std::fmt::Write;

use board_core::{BoardViewModel, StoryView};

const STORY_CLASS: &str = "bg-gray-700 p-2 rounded";
const LIFTED_CLASS: &str = "opacity-50";
const RUN_HIGHLIGHT_CLASS: &str = "bg-gray-600";
const TRASH_HIGHLIGHT_CLASS: &str = "bg-red-600";

pub fn render(view: &BoardViewModel) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        r#"<body data-user-id="{}" data-project-name="{}">"#,
        escape(&view.user_id),
        escape(&view.project_name)
    );

    let _ = writeln!(
        html,
        r#"<div id="backlog">{}</div>"#,
        view.backlog.iter().map(render_story).collect::<String>()
    );

    let _ = writeln!(
        html,
        r#"<div id="draggable-container" class="{}" data-drop-allowed="{}"><div id="running">{}</div></div>"#,
        highlight(view.run_zone_highlighted, RUN_HIGHLIGHT_CLASS),
        view.drop_allowed,
        if view.running_shows_output {
            render_output(view)
        } else {
            String::new()
        }
    );
    if !view.running_shows_output {
        let _ = writeln!(html, "{}", render_output(view));
    }

    if view.trash_present {
        let _ = writeln!(
            html,
            r#"<button id="trash-button" class="{}"></button>"#,
            highlight(view.trash_highlighted, TRASH_HIGHLIGHT_CLASS)
        );
    }

    let _ = writeln!(
        html,
        r#"<input id="newUserStory" value="{}">"#,
        escape(&view.new_story_input)
    );
    let _ = writeln!(
        html,
        r#"<div id="gitFeedbackButtons" style="display: {}"></div>"#,
        display(view.git_panel_visible)
    );
    let _ = writeln!(
        html,
        r#"<div id="userStoryRefinementFeedback" style="display: {}"><input id="feedbackInput" value="{}"></div>"#,
        display(view.refinement_panel_visible),
        escape(&view.feedback_input)
    );
    let _ = writeln!(
        html,
        r#"<div id="userStoryResultFeedback" style="display: {}"></div>"#,
        display(view.result_panel_visible)
    );
    html.push_str("</body>\n");
    html
}

fn render_story(story: &StoryView) -> String {
    let class = if story.lifted {
        format!("{STORY_CLASS} {LIFTED_CLASS}")
    } else {
        STORY_CLASS.to_string()
    };
    format!(
        r#"<div id="{}" data-jira-id="{}" class="{}" draggable="{}">{}</div>"#,
        escape(&story.element_id),
        escape(&story.jira_id),
        class,
        story.draggable,
        escape(&story.text)
    )
}

/// Log fragments are already HTML and go in as-is.
fn render_output(view: &BoardViewModel) -> String {
    let fragments: String = view
        .output_log
        .iter()
        .map(|fragment| format!("<div>{fragment}</div>"))
        .collect();
    format!(r#"<div id="pythonOutput">{fragments}</div>"#)
}

fn highlight(on: bool, class: &str) -> &str {
    if on {
        class
    } else {
        ""
    }
}

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::{update, BoardSession, BoardState, DropZone, Msg, StorySeed};

    fn board_with_story(text: &str, jira_id: &str) -> BoardState {
        let state = BoardState::new(BoardSession::new("alice", "webshop"));
        update(
            state,
            Msg::BacklogLoaded(vec![StorySeed {
                text: text.to_string(),
                jira_id: jira_id.to_string(),
            }]),
        )
        .0
    }

    #[test]
    fn stories_render_draggable_with_tracker_id() {
        let html = render(&board_with_story("Fix <b>login</b>", "SHOP-1").view());
        assert!(html.contains(
            r#"<div id="story1" data-jira-id="SHOP-1" class="bg-gray-700 p-2 rounded" draggable="true">Fix &lt;b&gt;login&lt;/b&gt;</div>"#
        ));
    }

    #[test]
    fn lifted_story_is_faded() {
        let (state, _) = update(
            board_with_story("Fix login", ""),
            Msg::DragStarted {
                element_id: "story1".to_string(),
            },
        );
        assert!(render(&state.view()).contains("rounded opacity-50"));
    }

    #[test]
    fn output_moves_into_running_pane_after_run_drop() {
        let state = board_with_story("Fix login", "");
        let (state, _) = update(
            state,
            Msg::ScriptOutput {
                data: "**ok**".to_string(),
            },
        );
        let before = render(&state.view());
        assert!(before.contains(r#"<div id="running"></div>"#));

        let (state, _) = update(
            state,
            Msg::DragStarted {
                element_id: "story1".to_string(),
            },
        );
        let (state, _) = update(state, Msg::Dropped(DropZone::Run));
        let after = render(&state.view());
        assert!(after.contains(
            r#"<div id="running"><div id="pythonOutput"><div><strong>ok</strong></div></div></div>"#
        ));
        assert!(after.contains(r#"data-drop-allowed="false""#));
    }

    #[test]
    fn panels_toggle_display() {
        let (state, _) = update(
            board_with_story("x", ""),
            Msg::StoryDone {
                message: "Finished".to_string(),
            },
        );
        let html = render(&state.view());
        assert!(html.contains(r#"<div id="userStoryResultFeedback" style="display: block">"#));
        assert!(html.contains(r#"<div id="gitFeedbackButtons" style="display: none">"#));
    }
}
