//! Session tokens and logout.
//!
//! Pages never reach into storage for tokens. They receive a
//! [`SessionContext`] holding the tokens, the store they came from and
//! the login URL to send the user to after logout.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use super::router::Route;

/// Access and refresh tokens issued by the external login flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// When the tokens were stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Session holding freshly issued tokens
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token,
            saved_at: Some(Utc::now()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Drop both tokens
    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.saved_at = None;
    }
}

/// Where session tokens live between runs
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session (empty if nothing is stored)
    async fn load(&self) -> Result<Session>;

    /// Replace the stored session
    async fn save(&self, session: &Session) -> Result<()>;

    /// Remove stored tokens
    async fn clear(&self) -> Result<()>;
}

/// JSON file store (`~/.shiksha/session.json` by default)
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read session: {}", self.path.display()))?;

        serde_json::from_str(&content).context("Failed to parse session JSON")
    }

    async fn save(&self, session: &Session) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write session: {}", self.path.display()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove session: {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-process store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    /// Copy of the stored session
    pub fn snapshot(&self) -> Session {
        self.session
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn replace(&self, session: Session) {
        match self.session.lock() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Session> {
        Ok(self.snapshot())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.replace(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.replace(Session::default());
        Ok(())
    }
}

/// The session a page acts on, plus the capability to end it
pub struct SessionContext {
    session: Session,
    store: Arc<dyn SessionStore>,
    login_url: String,
}

impl SessionContext {
    pub fn new(
        session: Session,
        store: Arc<dyn SessionStore>,
        login_url: impl Into<String>,
    ) -> Self {
        Self {
            session,
            store,
            login_url: login_url.into(),
        }
    }

    /// Load the session from `store`
    pub async fn load(store: Arc<dyn SessionStore>, login_url: impl Into<String>) -> Result<Self> {
        let session = store.load().await?;
        Ok(Self::new(session, store, login_url))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token.as_deref()
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Clear access and refresh tokens and route to the login page
    pub async fn logout(&mut self) -> Result<Route> {
        self.session.clear();
        self.store.clear().await?;
        info!(login_url = %self.login_url, "Logged out");
        Ok(Route::External(self.login_url.clone()))
    }
}
