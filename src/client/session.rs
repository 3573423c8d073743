use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::auth::dto::PublicUser;

/// Storage lifetime class for a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Written to disk; survives process restarts ("remember me").
    Durable,
    /// Held in memory only; gone once the session value is dropped.
    Ephemeral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user: PublicUser,
}

/// Single abstraction over both persistence tiers.
///
/// `set` always clears both tiers before writing to the chosen one, so the
/// tiers can never hold diverging sessions.
pub struct SessionStore {
    durable_path: PathBuf,
    ephemeral: Option<StoredSession>,
}

impl SessionStore {
    pub fn new(durable_path: impl Into<PathBuf>) -> Self {
        Self {
            durable_path: durable_path.into(),
            ephemeral: None,
        }
    }

    pub fn set(&mut self, tier: Tier, token: String, user: PublicUser) -> anyhow::Result<()> {
        self.clear_all()?;
        let session = StoredSession { token, user };
        match tier {
            Tier::Durable => {
                let json = serde_json::to_string(&session)?;
                fs::write(&self.durable_path, json)?;
            }
            Tier::Ephemeral => self.ephemeral = Some(session),
        }
        Ok(())
    }

    /// Durable tier first, then ephemeral; the lookup order used on each
    /// protected-view load.
    pub fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }

    /// Cached `{email, role, id}` snapshot written at login.
    pub fn user_snapshot(&self) -> Option<PublicUser> {
        self.load().map(|s| s.user)
    }

    pub fn clear_all(&mut self) -> anyhow::Result<()> {
        self.ephemeral = None;
        match fs::remove_file(&self.durable_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self) -> Option<StoredSession> {
        if let Ok(raw) = fs::read_to_string(&self.durable_path) {
            if let Ok(session) = serde_json::from_str(&raw) {
                return Some(session);
            }
        }
        self.ephemeral.clone()
    }
}
