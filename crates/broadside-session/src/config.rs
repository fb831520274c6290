//! Directory configuration.

use std::time::Duration;

use broadside_grid::GameConfig;
use broadside_room::RoomConfig;

/// Settings for the [`SessionDirectory`](crate::SessionDirectory) and
/// every room it creates.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Board size and ruleset every fleet is checked against.
    pub game: GameConfig,

    pub room: RoomConfig,

    /// How long a finished room stays reachable so both players can see
    /// the result. After that its sessions become unknown.
    pub finished_room_grace_secs: u64,
}

impl DirectoryConfig {
    pub fn finished_room_grace(&self) -> Duration {
        Duration::from_secs(self.finished_room_grace_secs)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            room: RoomConfig::default(),
            finished_room_grace_secs: 60,
        }
    }
}
