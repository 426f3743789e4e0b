use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use board_logging::{board_debug, board_info, board_warn};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::config::ShellConfig;

/// How long teardown waits for buffered backend output after the kill.
const OUTPUT_DRAIN: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to spawn backend {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("backend is already running")]
    AlreadyStarted,
    #[error("display surface requested before the backend was started")]
    BackendNotStarted,
    #[error("failed to open {url}: {source}")]
    Display {
        url: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for the backend: {0}")]
    Wait(#[source] io::Error),
}

/// Something that can show the board page.
pub trait DisplaySurface {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens the page in the system's default browser.
pub struct SystemBrowser;

impl DisplaySurface for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        open::that(url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsClosedAction {
    Quit,
    KeepRunning,
}

/// macOS apps stay alive without windows; everywhere else the shell quits.
pub fn on_all_windows_closed(platform: Platform) -> WindowsClosedAction {
    match platform {
        Platform::MacOs => WindowsClosedAction::KeepRunning,
        Platform::Other => WindowsClosedAction::Quit,
    }
}

#[derive(Debug, Clone, Copy)]
enum OutputStream {
    Stdout,
    Stderr,
}

/// Owns the backend process and the display surface pointed at it.
///
/// The backend is killed when the shell is torn down or dropped.
pub struct HostShell {
    config: ShellConfig,
    display: Box<dyn DisplaySurface>,
    backend: Option<Child>,
    forwarders: Vec<JoinHandle<()>>,
}

impl HostShell {
    pub fn new(config: ShellConfig, display: Box<dyn DisplaySurface>) -> Self {
        Self {
            config,
            display,
            backend: None,
            forwarders: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.backend.is_some()
    }

    /// Spawns the backend and forwards its output to the log. Needs a tokio runtime.
    pub fn start(&mut self) -> Result<(), ShellError> {
        if self.backend.is_some() {
            return Err(ShellError::AlreadyStarted);
        }

        let mut child = Command::new(&self.config.interpreter)
            .arg(&self.config.entry_point)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ShellError::Spawn {
                path: self.config.interpreter.clone(),
                source,
            })?;
        board_info!(
            "Backend started (pid {:?}): {:?} {:?}",
            child.id(),
            self.config.interpreter,
            self.config.entry_point
        );

        if let Some(stdout) = child.stdout.take() {
            self.forwarders
                .push(forward_lines(stdout, OutputStream::Stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            self.forwarders
                .push(forward_lines(stderr, OutputStream::Stderr));
        }
        self.backend = Some(child);
        Ok(())
    }

    /// Points the display surface at the backend endpoint.
    ///
    /// The server may still be binding; the page simply shows an error until it is up.
    pub fn show_window(&self) -> Result<(), ShellError> {
        if self.backend.is_none() {
            return Err(ShellError::BackendNotStarted);
        }
        let url = &self.config.endpoint;
        self.display
            .open(url)
            .map_err(|source| ShellError::Display {
                url: url.clone(),
                source,
            })?;
        board_info!("Display opened at {}", url);
        Ok(())
    }

    /// Resolves when the backend exits on its own.
    pub async fn wait_backend(&mut self) -> Result<ExitStatus, ShellError> {
        let child = self
            .backend
            .as_mut()
            .ok_or(ShellError::BackendNotStarted)?;
        let status = child.wait().await.map_err(ShellError::Wait)?;
        self.backend = None;
        Ok(status)
    }

    /// Kills the backend unconditionally, then gives its output a short while to drain.
    ///
    /// Processes the backend left behind can keep the pipes open; their output is cut off.
    pub async fn teardown(&mut self) {
        if let Some(mut child) = self.backend.take() {
            match child.kill().await {
                Ok(()) => board_info!("Backend stopped"),
                Err(err) => board_debug!("Backend kill failed: {}", err),
            }
        }
        for mut forwarder in self.forwarders.drain(..) {
            if tokio::time::timeout(OUTPUT_DRAIN, &mut forwarder)
                .await
                .is_err()
            {
                board_debug!("Backend output still open after kill, detaching");
                forwarder.abort();
            }
        }
    }
}

fn forward_lines<R>(reader: R, stream: OutputStream) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match stream {
                    OutputStream::Stdout => board_info!("Backend: {}", line),
                    OutputStream::Stderr => board_warn!("Backend: {}", line),
                },
                Ok(None) => break,
                Err(err) => {
                    board_warn!("Backend {:?} unreadable: {}", stream, err);
                    break;
                }
            }
        }
    })
}
