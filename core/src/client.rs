use std::{ops::Deref, path::Path};

use anyhow::{anyhow, Context as _};
use judge_webclient::{JudgeClient, SessionContext, Url};

use crate::storage::SessionStore;

/// A [`JudgeClient`] whose session survives across processes.
pub struct SessionPersistentClient {
    cli: JudgeClient,
    store: SessionStore,
}

impl Deref for SessionPersistentClient {
    type Target = JudgeClient;

    fn deref(&self) -> &Self::Target {
        &self.cli
    }
}

impl SessionPersistentClient {
    pub fn new(base_url: Url, save_dir: impl AsRef<Path>) -> Self {
        let store = SessionStore::new(save_dir);
        let session = store.load_or_anonymous().unwrap_or_else(|e| {
            log::warn!("Ignoring saved session: {}", e);
            SessionContext::anonymous()
        });
        Self {
            cli: JudgeClient::new(base_url, session),
            store,
        }
    }

    pub fn client(&self) -> &JudgeClient {
        &self.cli
    }

    pub fn into_client(self) -> JudgeClient {
        self.cli
    }

    pub fn is_logged_in(&self) -> bool {
        self.cli.session().is_logged_in()
    }

    /// Use `token` for this process only; the saved session is left untouched.
    pub fn use_token(&mut self, token: impl Into<String>) {
        self.cli.set_session(SessionContext::with_token(token));
    }

    pub fn login(&mut self, token: impl Into<String>) -> anyhow::Result<()> {
        let session = SessionContext::with_token(token);
        self.store
            .save(&session)
            .context("Failed to save session")?;
        self.cli.set_session(session);
        Ok(())
    }

    pub fn logout(&mut self) -> anyhow::Result<()> {
        let mut session = self.cli.session().clone();
        session.revoke();
        self.cli.set_session(session);
        self.store.erase().map_err(|e| anyhow!(e))
    }
}
