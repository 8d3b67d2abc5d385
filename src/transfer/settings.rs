use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::TransferError;

fn default_port() -> u16 {
    22
}

/// Connection settings for an SFTP drop-folder host.
///
/// Read by an external [`RemoteFolder`](super::RemoteFolder) transport;
/// [`LocalFolder`](super::LocalFolder) needs none of them. `Debug` output
/// hides the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSettings {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Known-hosts file; `None` disables host key checking.
    #[serde(default)]
    pub known_hosts: Option<PathBuf>,
}

impl fmt::Debug for TransferSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("known_hosts", &self.known_hosts)
            .finish()
    }
}

impl TransferSettings {
    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, TransferError> {
        serde_json::from_str(json).map_err(|e| TransferError::wrap("invalid transfer settings", e))
    }
}
