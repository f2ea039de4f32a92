use std::path::{Path, PathBuf};

use judge_webclient::SessionContext;

use super::{error::*, util::SingleFileDriver};

pub const SESSION_FILENAME: &str = "session.json";

/// Persists the [`SessionContext`] as JSON in a cache dir.
pub struct SessionStore {
    file: SingleFileDriver,
}

impl SessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            file: SingleFileDriver::new(dir.as_ref().join(SESSION_FILENAME)),
        }
    }

    pub fn filepath(&self) -> &PathBuf {
        &self.file.filepath
    }

    pub fn save(&self, session: &SessionContext) -> Result<()> {
        let json = session.to_json().map_err(|e| Error {
            action: ActionKind::SerializeSession,
            path: self.file.filepath.clone(),
            source: Box::new(e),
        })?;
        self.file.write(&json)
    }

    pub fn load(&self) -> Result<SessionContext> {
        let json = self.file.read()?;
        SessionContext::from_json(&json).map_err(|e| Error {
            action: ActionKind::DeserializeSession,
            path: self.file.filepath.clone(),
            source: Box::new(e),
        })
    }

    /// A missing file means nobody has logged in yet.
    pub fn load_or_anonymous(&self) -> Result<SessionContext> {
        match self.load() {
            Err(e) if e.is_not_found() => Ok(SessionContext::anonymous()),
            res => res,
        }
    }

    /// Erasing a session that was never saved is not an error.
    pub fn erase(&self) -> Result<()> {
        match self.file.remove() {
            Err(e) if e.is_not_found() => Ok(()),
            res => res,
        }
    }
}
