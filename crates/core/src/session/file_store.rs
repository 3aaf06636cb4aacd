use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::{SessionError, SessionIdentifiers, SessionStore, TICKET_COOKIE};

type CookieJar = BTreeMap<String, Value>;

/// Session store backed by a JSON cookie jar file.
///
/// The file maps cookie names to values, so unrelated entries written by
/// other tools survive a save or clear of the `ticket` cookie.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_jar(&self) -> Result<CookieJar, SessionError> {
        if !self.path.exists() {
            return Ok(CookieJar::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(CookieJar::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes go through a sibling temp file and a rename.
    fn write_jar(&self, jar: &CookieJar) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(jar)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionIdentifiers>, SessionError> {
        let mut jar = self.read_jar()?;
        match jar.remove(TICKET_COOKIE) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn save(&self, identifiers: &SessionIdentifiers) -> Result<(), SessionError> {
        let mut jar = self.read_jar()?;
        jar.insert(TICKET_COOKIE.to_string(), serde_json::to_value(identifiers)?);
        self.write_jar(&jar)?;
        debug!(path = %self.path.display(), ticket = %identifiers.ticket, "Saved ticket cookie");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut jar = self.read_jar()?;
        if jar.remove(TICKET_COOKIE).is_some() {
            self.write_jar(&jar)?;
            debug!(path = %self.path.display(), "Removed ticket cookie");
        }
        Ok(())
    }
}
