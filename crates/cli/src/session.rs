//! Persisted session file
//!
//! The token pair lives in `<user config dir>/suft/session.json` together
//! with the time of its last refresh. The store never touches the network;
//! deciding when to refresh is the command layer's job.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use suft_domain::Token;

/// Error text for commands that need a session that is not there.
pub const NOT_LOGGED_IN: &str = "not logged in; run `suft login` first";

const SESSION_FILE: &str = "session.json";
const CONFIG_DIR: &str = "suft";

/// A token pair is considered stale this long after its last refresh and is
/// rotated before the next resource command uses it.
const STALE_AFTER_SECS: i64 = 120;

/// Contents of the session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: Token,
    pub refreshed_at: DateTime<Utc>,
}

impl StoredSession {
    /// Wrap a just-issued token pair, stamped with the current time.
    pub fn new(token: Token) -> Self {
        Self { token, refreshed_at: Utc::now() }
    }

    /// Whether the pair should be rotated before use.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.refreshed_at >= Duration::seconds(STALE_AFTER_SECS)
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store under the user's configuration directory.
    pub fn open_default() -> Result<Self> {
        let base = dirs::config_dir().context("no user configuration directory available")?;
        Ok(Self { dir: base.join(CONFIG_DIR) })
    }

    /// Store under an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the session file (and the logging-time draft) live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Load the stored session.
    ///
    /// # Errors
    /// Fails with [`NOT_LOGGED_IN`] when no session file exists.
    pub fn load(&self) -> Result<StoredSession> {
        let path = self.file();
        if !path.exists() {
            bail!(NOT_LOGGED_IN);
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("session file {} is corrupt", path.display()))
    }

    /// Write the session, creating the directory on first use.
    pub fn save(&self, session: &StoredSession) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.file();
        let data = serde_json::to_string_pretty(session)?;
        fs::write(&path, data).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Delete the session file.
    ///
    /// # Errors
    /// Fails with [`NOT_LOGGED_IN`] when no session file exists.
    pub fn clear(&self) -> Result<()> {
        let path = self.file();
        if !path.exists() {
            bail!(NOT_LOGGED_IN);
        }
        fs::remove_file(&path).with_context(|| format!("failed to remove {}", path.display()))
    }
}
