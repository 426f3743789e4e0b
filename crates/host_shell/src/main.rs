mod config;
mod shell;

use anyhow::Context;
use board_logging::{board_error, board_info, board_warn};

use crate::config::ShellConfig;
use crate::shell::{
    on_all_windows_closed, HostShell, Platform, SystemBrowser, WindowsClosedAction,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    board_logging::initialize(
        board_logging::destination_from_env(),
        board_logging::level_from_env(),
    );

    let config = ShellConfig::from_env().context("resolve backend configuration")?;
    let mut shell = HostShell::new(config, Box::new(SystemBrowser));
    shell.start().context("start backend")?;

    if let Err(err) = shell.show_window() {
        board_warn!("No display surface: {}", err);
        // With no window open the platform's all-windows-closed rule applies.
        if on_all_windows_closed(Platform::current()) == WindowsClosedAction::Quit {
            shell.teardown().await;
            return Ok(());
        }
    }

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                board_error!("Cannot listen for Ctrl+C: {}", err);
            }
            board_info!("Shutting down");
        }
        status = shell.wait_backend() => match status {
            Ok(status) => board_info!("Backend exited: {}", status),
            Err(err) => board_error!("Lost track of the backend: {}", err),
        },
    }

    shell.teardown().await;
    Ok(())
}
