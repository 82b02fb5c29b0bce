//! SessionRunner – loads a session, applies **one** client action, persists the result and
//! renders the screen the client should show next.
//!
//! Actions that need the AI service are split in two: the action is applied and saved first
//! (so concurrent readers see the loading state), the AI call runs without holding the session,
//! and its outcome is applied in a second load → complete → save round.
//!
//! Each session has its own async lock, so two requests for the same session never interleave
//! their load and save and no update is lost. Requests for different sessions run in parallel.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::{
    action::Action,
    ai::AiService,
    dataset::Dataset,
    error::{CuraError, Result},
    screen::Screen,
    session::Session,
    storage::SessionStorage,
};

#[derive(Clone)]
pub struct SessionRunner {
    storage: Arc<dyn SessionStorage>,
    ai: Arc<dyn AiService>,
    dataset: Arc<Dataset>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl SessionRunner {
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        ai: Arc<dyn AiService>,
        dataset: Arc<Dataset>,
    ) -> Self {
        Self {
            storage,
            ai,
            dataset,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Start a fresh session on the landing view.
    pub async fn create(&self) -> Result<Session> {
        let session = Session::new_random();
        self.storage.save(session.clone()).await?;
        info!(session_id = %session.id, "Session created");
        Ok(session)
    }

    pub async fn screen(&self, session_id: &str) -> Result<Screen> {
        let session = self.load(session_id).await?;
        Ok(session.render(&self.dataset))
    }

    /// Apply `action` to the session and return the resulting screen.
    ///
    /// A rejected action leaves the stored session unchanged.
    #[instrument(skip(self, action), fields(action = action.name()))]
    pub async fn run(&self, session_id: &str, action: Action) -> Result<Screen> {
        let lock = self.lock_for(session_id);

        let effect = {
            let _guard = lock.lock().await;
            let mut session = self.load(session_id).await?;
            let effect = session.apply(action, &self.dataset)?;
            if effect.is_none() {
                let screen = session.render(&self.dataset);
                self.storage.save(session).await?;
                return Ok(screen);
            }
            self.storage.save(session).await?;
            effect
        };

        debug!(?effect, "Running effect");
        let completion = effect.run(self.ai.as_ref()).await;

        let _guard = lock.lock().await;
        let mut session = self.load(session_id).await?;
        if let Some(completion) = completion {
            session.complete(completion);
        }
        let screen = session.render(&self.dataset);
        self.storage.save(session).await?;
        Ok(screen)
    }

    pub async fn delete(&self, session_id: &str) -> Result<()> {
        self.load(session_id).await?;
        self.storage.delete(session_id).await?;
        self.locks.remove(session_id);
        info!(session_id, "Session deleted");
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Session> {
        match self.storage.get(session_id).await? {
            Some(session) => Ok(session),
            None => {
                self.locks.remove(session_id);
                Err(CuraError::SessionNotFound(session_id.to_string()))
            }
        }
    }

    fn lock_for(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(session_id.to_string())
            .or_default()
            .value()
            .clone()
    }
}
