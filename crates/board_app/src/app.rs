use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use board_channel::ChannelHandle;
use board_core::{update, BoardState};
use board_logging::{board_info, board_warn};

use crate::config::BoardConfig;
use crate::effects::{AppEvent, ChannelForwarder, EffectRunner, Outbox};
use crate::gestures;
use crate::render;

/// How long shutdown waits for the channel to say goodbye to the backend.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

pub fn run_board() -> anyhow::Result<()> {
    board_logging::initialize(
        board_logging::destination_from_env(),
        board_logging::level_from_env(),
    );

    let config = BoardConfig::from_env();
    board_info!(
        "Board for project {:?} as {}",
        config.session.project_name,
        config.session.user_id
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let channel = ChannelHandle::spawn(
        config.channel.clone(),
        Arc::new(ChannelForwarder::new(event_tx.clone())),
    );
    spawn_gesture_reader(event_tx);

    let stdout = io::stdout();
    let mut board = BoardLoop::new(BoardState::new(config.session), channel.clone());
    board.render_to(&mut stdout.lock())?;

    let mut channel_open = true;
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => {
                let alerts = board.dispatch(msg);
                let mut out = stdout.lock();
                for alert in alerts {
                    writeln!(out, "alert: {alert}").context("write alert")?;
                }
                if board.consume_dirty() {
                    board.render_to(&mut out)?;
                }
            }
            AppEvent::ChannelClosed { reason } => {
                // No reconnect: gestures keep working locally, emits are dropped.
                board_warn!("Channel closed: {}", reason);
                channel_open = false;
            }
            AppEvent::InputClosed => {
                board_info!("Gesture input closed, shutting down");
                break;
            }
        }
    }

    channel.close();
    if channel_open {
        wait_for_channel_close(&event_rx, CLOSE_GRACE);
    }
    Ok(())
}

/// Drains the queue until the channel reports it is closed or `grace` runs out.
fn wait_for_channel_close(events: &mpsc::Receiver<AppEvent>, grace: Duration) -> bool {
    let deadline = Instant::now() + grace;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match events.recv_timeout(remaining) {
            Ok(AppEvent::ChannelClosed { reason }) => {
                board_info!("Channel closed: {}", reason);
                return true;
            }
            Ok(_) => continue,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                board_warn!("Channel did not close within {:?}", grace);
                return false;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => return true,
        }
    }
}

/// Reads gestures from stdin on a background thread.
fn spawn_gesture_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    board_warn!("Failed to read gesture input: {}", err);
                    break;
                }
            };
            match gestures::parse_line(&line) {
                Ok(Some(msg)) => {
                    if tx.send(AppEvent::Msg(msg)).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => board_warn!("Ignoring gesture {:?}: {}", line, err),
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

/// Owns the board state and applies messages one at a time.
struct BoardLoop<O: Outbox> {
    state: BoardState,
    effects: EffectRunner<O>,
}

impl<O: Outbox> BoardLoop<O> {
    fn new(state: BoardState, outbox: O) -> Self {
        Self {
            state,
            effects: EffectRunner::new(outbox),
        }
    }

    /// Applies one message and runs its effects. Returns the alerts to show.
    fn dispatch(&mut self, msg: board_core::Msg) -> Vec<String> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects)
    }

    fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    fn render_to(&self, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "{}", render::render(&self.state.view())).context("write board")?;
        out.flush().context("flush board")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use board_core::{BoardSession, Msg};
    use serde_json::{json, Value};

    #[derive(Default)]
    struct RecordingOutbox {
        sent: RefCell<Vec<(String, Value)>>,
    }

    impl Outbox for &RecordingOutbox {
        fn send(&self, name: &str, payload: Value) {
            self.sent.borrow_mut().push((name.to_string(), payload));
        }
    }

    #[test]
    fn dispatch_runs_effects_in_order() {
        let outbox = RecordingOutbox::default();
        let state = BoardState::new(BoardSession::new("alice", "webshop"));
        let mut board = BoardLoop::new(state, &outbox);

        assert_eq!(board.dispatch(Msg::NewStoryEntered).len(), 1);
        board.dispatch(Msg::NewStoryInputChanged("Add retry logic".to_string()));
        assert!(board.dispatch(Msg::NewStoryEntered).is_empty());
        board.dispatch(Msg::JiraImportClicked);
        assert!(board.consume_dirty());

        let names: Vec<_> = outbox.sent.borrow().iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(names, vec!["add_user_story", "jira_import"]);
        assert_eq!(outbox.sent.borrow()[1].1, json!({"project_name": "webshop"}));
    }

    #[test]
    fn shutdown_waits_for_the_channel_to_close() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::InputClosed).unwrap();
        tx.send(AppEvent::ChannelClosed {
            reason: "closed".to_string(),
        })
        .unwrap();
        assert!(wait_for_channel_close(&rx, Duration::from_secs(1)));
    }

    #[test]
    fn shutdown_gives_up_after_the_grace_period() {
        let (_tx, rx) = mpsc::channel();
        let started = Instant::now();
        assert!(!wait_for_channel_close(&rx, Duration::from_millis(50)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn render_writes_a_full_snapshot() {
        let outbox = RecordingOutbox::default();
        let board = BoardLoop::new(BoardState::default(), &outbox);
        let mut out = Vec::new();
        board.render_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(r#"<body data-user-id="Developer""#));
        assert!(text.trim_end().ends_with("</body>"));
    }
}
