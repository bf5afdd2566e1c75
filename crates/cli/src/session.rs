//! Persisted session fields: the current email and role, nothing else.
//! No expiry; the server decides on every request.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use shared::Session;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    current_email: String,
    #[serde(default)]
    current_role: String,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(crate::config::config_dir()?.join("session.toml")))
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// A missing or unreadable file is a guest session.
    pub fn load(&self) -> Session {
        let stored = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| toml::from_str::<StoredSession>(&content).ok())
            .unwrap_or_default();
        Session::new(&stored.current_email, &stored.current_role)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let stored = StoredSession {
            current_email: session.email().to_string(),
            current_role: session.role().as_str().to_string(),
        };
        std::fs::write(&self.path, toml::to_string_pretty(&stored)?)?;
        tracing::info!("Stored session for {}", session.email());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
