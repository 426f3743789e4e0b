//! Start-up configuration for the board, read from the environment.

use board_channel::ChannelSettings;
use board_core::{BoardSession, DEFAULT_USER_ID};

pub const USER_VAR: &str = "BOARD_USER_ID";
pub const PROJECT_VAR: &str = "BOARD_PROJECT";

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub session: BoardSession,
    pub channel: ChannelSettings,
}

impl BoardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let user_id = lookup(USER_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        let project_name = lookup(PROJECT_VAR).unwrap_or_default();
        Self {
            session: BoardSession::new(user_id, project_name),
            channel: ChannelSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_developer_and_local_backend() {
        let config = BoardConfig::from_lookup(|_| None);
        assert_eq!(config.session.user_id, "Developer");
        assert_eq!(config.session.project_name, "");
        assert_eq!(config.channel.endpoint, "http://localhost:5000");
    }

    #[test]
    fn reads_user_and_project() {
        let config = BoardConfig::from_lookup(|key| match key {
            USER_VAR => Some("alice".to_string()),
            PROJECT_VAR => Some("webshop".to_string()),
            _ => None,
        });
        assert_eq!(config.session, BoardSession::new("alice", "webshop"));
    }

    #[test]
    fn blank_user_falls_back_to_default() {
        let config = BoardConfig::from_lookup(|key| (key == USER_VAR).then(|| "  ".to_string()));
        assert_eq!(config.session.user_id, "Developer");
    }
}
